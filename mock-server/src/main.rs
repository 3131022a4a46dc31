use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("listening on http://{addr}");
    tracing::info!(
        "point ONCOKB_API_LINK at http://{addr}{}, ONCOKB_CURATION_LINK at http://{addr}{}, ONCOKB_ONCOTREE_LINK at http://{addr}{}",
        mock_server::API_PREFIX,
        mock_server::CURATION_PREFIX,
        mock_server::ONCO_TREE_PREFIX,
    );
    mock_server::run(listener).await
}
