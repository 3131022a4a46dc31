//! Accessor round trips against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives every accessor over
//! real HTTP through `UreqTransport`. The server decodes what it receives
//! and echoes it back, which checks the client's encoding end-to-end.

use std::net::SocketAddr;

use oncokb_client::{
    CacheCommand, ClientConfig, HttpResponse, OncoKbClient, ParamBag, ParamValue, Source, TransportError,
    UreqTransport, UtilsKind,
};
use serde_json::Value;

fn start_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

fn client(addr: SocketAddr) -> OncoKbClient<UreqTransport> {
    let config = ClientConfig::new(
        &format!("http://{addr}{}", mock_server::API_PREFIX),
        &format!("http://{addr}{}", mock_server::CURATION_PREFIX),
        &format!("http://{addr}{}", mock_server::ONCO_TREE_PREFIX),
    )
    .unwrap();
    let transport = UreqTransport::new()
        .with_fixture_origin(&format!("http://{addr}/"))
        .unwrap();
    OncoKbClient::new(config, transport)
}

fn json(response: Result<HttpResponse, TransportError>) -> Value {
    let response = response.expect("HTTP transport error");
    assert!(response.is_success(), "status {}: {}", response.status, response.body);
    serde_json::from_str(&response.body).unwrap()
}

#[test]
fn remote_and_fixture_reads() {
    let c = client(start_server());

    assert_eq!(json(c.tumor_types(Source::Remote))[0]["source"], "remote");
    assert_eq!(json(c.tumor_types(Source::Fixture))[0]["source"], "fixture");
    assert_eq!(json(c.genes(Source::Remote))[0]["source"], "remote");
    assert_eq!(json(c.genes(Source::Fixture))[0]["source"], "fixture");
    assert_eq!(json(c.alterations(Source::Remote))[0]["source"], "remote");
    assert_eq!(json(c.oncokb_info(Source::Fixture))["version"], "fixture");
    assert_eq!(json(c.data_summary(Source::Remote))["source"], "fixture");
    assert_eq!(json(c.internal_access())["access"], true);

    assert_eq!(json(c.server_utils(UtilsKind::Hotspot, Source::Remote))[0]["source"], "remote");
    assert_eq!(json(c.server_utils(UtilsKind::AutoMutation, Source::Fixture))[0]["hugoSymbol"], "TP53");

    let xml = c.annotation(Source::Fixture, &ParamBag::new()).unwrap();
    assert!(xml.body.contains("fixture"));
}

#[test]
fn gene_status_update_then_read() {
    let c = client(start_server());

    // Step 1: nothing stored yet.
    let statuses = json(c.gene_status(Source::Remote, None));
    assert!(statuses.as_array().unwrap().is_empty());

    // Step 2: store with the default status.
    let stored = json(c.set_gene_status(Source::Remote, Some("BRAF"), None));
    assert_eq!(stored["status"], "Not ready");

    // Step 3: store an explicit status for another gene.
    json(c.set_gene_status(Source::Remote, Some("EGFR"), Some("Complete")));

    // Step 4: read one back by id.
    let statuses = json(c.gene_status(Source::Remote, Some("EGFR")));
    assert_eq!(statuses.as_array().unwrap().len(), 1);
    assert_eq!(statuses[0]["status"], "Complete");

    // Step 5: the fixture variant of an update is a plain read.
    let fixture = json(c.set_gene_status(Source::Fixture, Some("KRAS"), Some("Complete")));
    assert_eq!(fixture[0]["geneId"], "BRAF");
}

#[test]
fn annotation_params_arrive_decoded() {
    let c = client(start_server());

    let params = ParamBag::new()
        .with("hugoSymbol", "BRAF")
        .with("alteration", "V600E&x=1")
        .with("tumorType", "Lung Cancer")
        .with("consequence", "")
        .with("entrezGeneId", ParamValue::Undefined);
    let echoed = json(c.annotation(Source::Remote, &params));
    assert_eq!(echoed["hugoSymbol"], "BRAF");
    assert_eq!(echoed["alteration"], "V600E&x=1");
    assert_eq!(echoed["tumorType"], "Lung Cancer");
    assert!(echoed.get("consequence").is_none());
    assert!(echoed.get("x").is_none());

    let echoed = json(c.post_annotation(&params));
    assert_eq!(echoed["consequence"], "");
    assert!(echoed.get("entrezGeneId").is_none());
}

#[test]
fn form_posts_arrive_decoded() {
    let c = client(start_server());

    let report = serde_json::json!({"geneName": "BRAF", "alterations": ["V600E", "V600K"]});
    let echoed = json(c.generate_google_doc(&report).unwrap());
    let inner: Value = serde_json::from_str(echoed["reportParams"].as_str().unwrap()).unwrap();
    assert_eq!(inner, report);

    let mail = ParamBag::new().with("to", "curator@example.org").with("body", "a+b = c");
    let echoed = json(c.send_email(&mail));
    assert_eq!(echoed["to"], "curator@example.org");
    assert_eq!(echoed["body"], "a+b = c");

    let echoed = json(c.create_google_folder(&ParamBag::new().with("folderName", "BRAF review")));
    assert_eq!(echoed["folderName"], "BRAF review");

    let echoed = json(c.update_drive_annotation(&ParamBag::new().with("gene", "{\"name\":\"BRAF\"}")));
    assert_eq!(echoed["gene"], "{\"name\":\"BRAF\"}");
}

#[test]
fn cache_commands() {
    let c = client(start_server());

    let status = |c: &OncoKbClient<UreqTransport>| c.cache_status().unwrap().body;

    assert_eq!(status(&c), "enabled");
    assert!(c.cache(CacheCommand::Disable).unwrap().is_success());
    assert_eq!(status(&c), "disabled");
    assert!(c.cache(CacheCommand::Enable).unwrap().is_success());
    assert!(c.cache(CacheCommand::Reset).unwrap().is_success());
    assert_eq!(status(&c), "enabled");
    assert!(c.cache_update_gene("ERBB2").unwrap().is_success());

    // Non-2xx comes back as data, untouched.
    let rejected = c.cache_update_gene("").unwrap();
    assert_eq!(rejected.status, 400);
}

#[test]
fn onco_tree_lookups() {
    let c = client(start_server());

    let main_types = json(c.main_types());
    assert_eq!(main_types["version"], "oncokb");
    assert_eq!(main_types["data"].as_array().unwrap().len(), 3);

    let found = json(c.tumor_types_by_main_type("Breast Cancer").unwrap());
    assert_eq!(found["data"][0]["mainType"], "Breast Cancer");

    let fuzzy = json(c.tumor_type(Some("maintype"), Some("cancer"), Some(false)).unwrap());
    assert_eq!(fuzzy["data"].as_array().unwrap().len(), 2);

    assert!(c.tumor_type(Some("maintype"), None, None).is_none());

    let batched = json(c.tumor_types_by_main_types(&["Melanoma", "Lung Cancer"]).unwrap());
    assert_eq!(batched["version"], "oncokb");
    assert_eq!(batched["data"][0][0]["mainType"], "Melanoma");
    assert_eq!(batched["data"][1][0]["mainType"], "Lung Cancer");
}

#[test]
fn fixture_without_origin_fails_in_transport() {
    let addr = start_server();
    let config = ClientConfig::new(
        &format!("http://{addr}{}", mock_server::API_PREFIX),
        &format!("http://{addr}{}", mock_server::CURATION_PREFIX),
        &format!("http://{addr}{}", mock_server::ONCO_TREE_PREFIX),
    )
    .unwrap();
    let c = OncoKbClient::new(config, UreqTransport::new());

    let err = c.genes(Source::Fixture).unwrap_err();
    assert!(matches!(err, TransportError::RelativeTarget(path) if path == "data/gene.json"));
    assert!(c.genes(Source::Remote).is_ok());
}
