use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;

pub const API_PREFIX: &str = "/legacy-api";
pub const CURATION_PREFIX: &str = "/curation";
pub const ONCO_TREE_PREFIX: &str = "/oncotree";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneStatus {
    #[serde(rename = "geneId")]
    pub gene_id: String,
    pub status: String,
}

#[derive(Deserialize)]
pub struct CacheForm {
    pub cmd: String,
    #[serde(rename = "hugoSymbol")]
    pub hugo_symbol: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct TumorTypeQuery {
    #[serde(rename = "type")]
    pub kind: String,
    pub query: String,
    #[serde(rename = "exactMatch")]
    pub exact_match: bool,
}

#[derive(Deserialize)]
pub struct TumorTypeSearch {
    pub queries: Vec<TumorTypeQuery>,
    pub version: String,
}

#[derive(Debug)]
pub struct Backend {
    pub gene_status: HashMap<String, String>,
    pub cache_enabled: bool,
    pub cache_updates: Vec<String>,
}

impl Default for Backend {
    fn default() -> Self {
        Self {
            gene_status: HashMap::new(),
            cache_enabled: true,
            cache_updates: Vec::new(),
        }
    }
}

pub type Db = Arc<RwLock<Backend>>;

const MAIN_TYPES: &[&str] = &["Breast Cancer", "Lung Cancer", "Melanoma"];

/// Static files served under `/data/`, keyed by file name.
fn fixture(name: &str) -> Option<(&'static str, &'static str)> {
    let json = "application/json";
    let entry = match name {
        "tumorType.json" => (json, r#"[{"name":"Melanoma","source":"fixture"}]"#),
        "gene.json" => (json, r#"[{"hugoSymbol":"BRAF","source":"fixture"}]"#),
        "summary.json" => (json, r#"{"genes":1,"alterations":1,"source":"fixture"}"#),
        "geneStatus.json" => (json, r#"[{"geneId":"BRAF","status":"Complete"}]"#),
        "alteration.json" => (json, r#"[{"alteration":"V600E","source":"fixture"}]"#),
        "oncokbInfo.json" => (json, r#"{"version":"fixture"}"#),
        "hotspot.json" => (json, r#"[{"hugoSymbol":"BRAF","residue":"V600"}]"#),
        "autoMutation.json" => (json, r#"[{"hugoSymbol":"TP53","alteration":"R175H"}]"#),
        "annotation.xml" => ("application/xml", "<xml><annotation source=\"fixture\"/></xml>"),
        _ => return None,
    };
    Some(entry)
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Backend::default()));

    let api = Router::new()
        .route("/tumorType.json", get(|| async { Json(json!([{"name": "Melanoma", "source": "remote"}])) }))
        .route("/alteration.json", get(|| async { Json(json!([{"alteration": "V600E", "source": "remote"}])) }))
        .route("/geneStatus.json", get(get_gene_status).post(set_gene_status))
        .route("/var_annotation", get(echo_query).post(echo_query))
        .route("/generateGoogleDoc", post(echo_form))
        .route("/createGoogleFolder", post(echo_form))
        .route("/sendEmail", post(echo_form))
        .route("/access", get(|| async { Json(json!({"access": true})) }))
        .route("/utils", get(utils))
        .route("/cache", get(cache_status).post(cache_command));

    let curation = Router::new()
        .route("/gene.json", get(|| async { Json(json!([{"hugoSymbol": "BRAF", "source": "remote"}])) }))
        .route("/oncokbInfo.json", get(|| async { Json(json!({"version": "remote"})) }))
        .route("/driveAnnotation", post(echo_form));

    let onco_tree = Router::new()
        .route("/mainTypes", get(main_types))
        .route("/tumorTypes/search", post(search_tumor_types))
        .route("/tumorTypes/search/{kind}/{query}", get(search_tumor_type));

    Router::new()
        .nest(API_PREFIX, api)
        .nest(CURATION_PREFIX, curation)
        .nest(ONCO_TREE_PREFIX, onco_tree)
        .route("/data/{file}", get(data_file))
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn data_file(Path(file): Path<String>) -> Result<impl IntoResponse, StatusCode> {
    let (content_type, body) = fixture(&file).ok_or(StatusCode::NOT_FOUND)?;
    Ok(([(header::CONTENT_TYPE, content_type)], body))
}

async fn get_gene_status(
    State(db): State<Db>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<GeneStatus>>, StatusCode> {
    let gene_id = params.get("geneId").ok_or(StatusCode::BAD_REQUEST)?;
    let backend = db.read().await;
    let statuses = backend
        .gene_status
        .iter()
        .filter(|(id, _)| gene_id.is_empty() || *id == gene_id)
        .map(|(id, status)| GeneStatus {
            gene_id: id.clone(),
            status: status.clone(),
        })
        .collect();
    Ok(Json(statuses))
}

async fn set_gene_status(State(db): State<Db>, Form(input): Form<GeneStatus>) -> Json<GeneStatus> {
    db.write()
        .await
        .gene_status
        .insert(input.gene_id.clone(), input.status.clone());
    Json(input)
}

async fn echo_query(Query(params): Query<HashMap<String, String>>) -> Json<HashMap<String, String>> {
    Json(params)
}

async fn echo_form(Form(params): Form<HashMap<String, String>>) -> Json<HashMap<String, String>> {
    Json(params)
}

async fn utils(Query(params): Query<HashMap<String, String>>) -> Result<Json<Value>, StatusCode> {
    match params.get("cmd").map(String::as_str) {
        Some("hotspot") => Ok(Json(json!([{"hugoSymbol": "BRAF", "residue": "V600", "source": "remote"}]))),
        Some("autoMutation") => Ok(Json(json!([{"hugoSymbol": "TP53", "source": "remote"}]))),
        _ => Err(StatusCode::BAD_REQUEST),
    }
}

async fn cache_status(
    State(db): State<Db>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<String, StatusCode> {
    if params.get("cmd").map(String::as_str) != Some("getStatus") {
        return Err(StatusCode::BAD_REQUEST);
    }
    let enabled = db.read().await.cache_enabled;
    Ok(if enabled { "enabled" } else { "disabled" }.to_string())
}

async fn cache_command(State(db): State<Db>, Form(input): Form<CacheForm>) -> StatusCode {
    let mut backend = db.write().await;
    match (input.cmd.as_str(), input.hugo_symbol) {
        ("reset", _) => {
            backend.cache_updates.clear();
            StatusCode::OK
        }
        ("enable", _) => {
            backend.cache_enabled = true;
            StatusCode::OK
        }
        ("disable", _) => {
            backend.cache_enabled = false;
            StatusCode::OK
        }
        ("updateGene", Some(hugo)) if !hugo.is_empty() => {
            backend.cache_updates.push(hugo);
            StatusCode::OK
        }
        _ => StatusCode::BAD_REQUEST,
    }
}

async fn main_types(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let version = params.get("version").cloned().unwrap_or_default();
    Json(json!({"version": version, "data": MAIN_TYPES}))
}

fn lookup(kind: &str, query: &str, exact_match: bool) -> Vec<Value> {
    if kind != "maintype" {
        return vec![json!({"type": kind, "code": query.to_uppercase()})];
    }
    MAIN_TYPES
        .iter()
        .filter(|main| {
            if exact_match {
                main.eq_ignore_ascii_case(query)
            } else {
                main.to_lowercase().contains(&query.to_lowercase())
            }
        })
        .map(|main| json!({"mainType": main}))
        .collect()
}

async fn search_tumor_type(
    Path((kind, query)): Path<(String, String)>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let exact_match = params.get("exactMatch").map(String::as_str) != Some("false");
    Json(json!({
        "version": params.get("version"),
        "data": lookup(&kind, &query, exact_match),
    }))
}

async fn search_tumor_types(Json(search): Json<TumorTypeSearch>) -> Json<Value> {
    let data: Vec<Vec<Value>> = search
        .queries
        .iter()
        .map(|q| lookup(&q.kind, &q.query, q.exact_match))
        .collect();
    Json(json!({"version": search.version, "data": data}))
}
