//! Boundary client tests against a local HTTP server.

use std::collections::HashSet;
use std::net::SocketAddr;
use std::time::Duration;

use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use cgmes_assembling::{BoundaryClient, BoundaryInfo, Error};

const EQBD_CONTENT: &str = "<rdf:RDF xmlns:cim=\"http://iec.ch/TC57/2013/CIM-schema-cim16#\">é</rdf:RDF>";

struct TestServer {
    base_url: String,
    _runtime: tokio::runtime::Runtime,
}

fn start_test_server(app: Router) -> TestServer {
    let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
    let listener = runtime
        .block_on(tokio::net::TcpListener::bind("127.0.0.1:0"))
        .expect("bind listener");
    let addr: SocketAddr = listener.local_addr().expect("listener addr");

    runtime.spawn(async move {
        axum::serve(listener, app).await.expect("serve test server");
    });

    TestServer {
        base_url: format!("http://{addr}/"),
        _runtime: runtime,
    }
}

async fn boundary_by_id(Path(id): Path<String>) -> impl IntoResponse {
    if id == "missing" {
        return StatusCode::NOT_FOUND.into_response();
    }
    Json(json!({
        "id": id,
        "filename": format!("{id}_EQBD.xml"),
        "boundary": EQBD_CONTENT,
    }))
    .into_response()
}

async fn last_boundaries() -> Json<serde_json::Value> {
    Json(json!([
        {"id": "eqbd-1", "filename": "20191106T0930Z__ENTSOE_EQBD_001.xml", "boundary": EQBD_CONTENT},
        {"id": "tpbd-1", "filename": "20191106T0930Z__ENTSOE_TPBD_001.xml", "boundary": "<rdf:RDF/>"},
    ]))
}

async fn tsos() -> Json<serde_json::Value> {
    Json(json!(["RTE", "ELIA", "TENNET", "RTE"]))
}

async fn business_processes() -> Json<serde_json::Value> {
    Json(json!(["1D", "2D"]))
}

fn catalog_app() -> Router {
    Router::new()
        .route("/v1/boundaries/last", get(last_boundaries))
        .route("/v1/boundaries/{id}", get(boundary_by_id))
        .route("/v1/tsos", get(tsos))
        .route("/v1/business-processes", get(business_processes))
}

fn failing_app() -> Router {
    Router::new().fallback(|| async { StatusCode::INTERNAL_SERVER_ERROR })
}

fn malformed_app() -> Router {
    Router::new().fallback(|| async { "{not json" })
}

/// A base URL nothing listens on
fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind probe");
    let addr = listener.local_addr().expect("probe addr");
    drop(listener);
    format!("http://{addr}/")
}

fn strings(values: &[&str]) -> HashSet<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[test]
fn get_boundary_decodes_content_as_utf8_bytes() {
    let server = start_test_server(catalog_app());
    let client = BoundaryClient::new(&server.base_url).expect("client");

    let boundary = client.get_boundary("eqbd-1").expect("boundary");
    assert_eq!(
        boundary,
        BoundaryInfo::new("eqbd-1", "eqbd-1_EQBD.xml", EQBD_CONTENT.as_bytes())
    );
}

#[test]
fn get_boundary_encodes_id_in_path() {
    let server = start_test_server(catalog_app());
    let client = BoundaryClient::new(&server.base_url).expect("client");

    let boundary = client.get_boundary("urn uuid/42").expect("boundary");
    assert_eq!(boundary.id, "urn uuid/42");
}

#[test]
fn get_boundary_is_absent_on_non_200() {
    let server = start_test_server(catalog_app());
    let client = BoundaryClient::new(&server.base_url).expect("client");
    assert!(client.get_boundary("missing").is_none());

    let server = start_test_server(failing_app());
    let client = BoundaryClient::new(&server.base_url).expect("client");
    assert!(client.get_boundary("eqbd-1").is_none());
}

#[test]
fn get_last_boundaries_decodes_every_entry() {
    let server = start_test_server(catalog_app());
    let client = BoundaryClient::new(&server.base_url).expect("client");

    let boundaries = client.get_last_boundaries();
    assert_eq!(boundaries.len(), 2);
    assert_eq!(boundaries[0].id, "eqbd-1");
    assert_eq!(boundaries[0].boundary, EQBD_CONTENT.as_bytes());
    assert_eq!(boundaries[1].filename, "20191106T0930Z__ENTSOE_TPBD_001.xml");
}

#[test]
fn lists_collapse_duplicates() {
    let server = start_test_server(catalog_app());
    let client = BoundaryClient::new(&server.base_url).expect("client");

    assert_eq!(client.get_tsos_list(), strings(&["RTE", "ELIA", "TENNET"]));
    assert_eq!(client.get_business_processes_list(), strings(&["1D", "2D"]));
}

#[test]
fn service_url_without_trailing_slash_is_accepted() {
    let server = start_test_server(catalog_app());
    let client = BoundaryClient::new(server.base_url.trim_end_matches('/')).expect("client");

    assert_eq!(client.get_tsos_list().len(), 3);
}

#[test]
fn server_errors_degrade_to_empty() {
    let server = start_test_server(failing_app());
    let client = BoundaryClient::new(&server.base_url).expect("client");

    assert!(client.get_last_boundaries().is_empty());
    assert!(client.get_tsos_list().is_empty());
    assert!(client.get_business_processes_list().is_empty());
}

#[test]
fn malformed_bodies_degrade_to_empty() {
    let server = start_test_server(malformed_app());
    let client = BoundaryClient::new(&server.base_url).expect("client");

    assert!(client.get_boundary("eqbd-1").is_none());
    assert!(client.get_last_boundaries().is_empty());
    assert!(client.get_tsos_list().is_empty());
}

#[test]
fn network_failures_degrade_to_empty() {
    let client = BoundaryClient::new(&closed_port_url()).expect("client");

    assert!(client.get_boundary("eqbd-1").is_none());
    assert!(client.get_last_boundaries().is_empty());
    assert!(client.get_tsos_list().is_empty());
    assert!(client.get_business_processes_list().is_empty());
}

#[test]
fn slow_server_times_out_to_absent() {
    let app = Router::new().fallback(|| async {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Json(json!(["RTE"]))
    });
    let server = start_test_server(app);
    let client =
        BoundaryClient::with_timeout(&server.base_url, Duration::from_millis(200)).expect("client");

    assert!(client.get_tsos_list().is_empty());
}

#[test]
fn invalid_service_url_fails_construction() {
    let result = BoundaryClient::new("boundary-server:5000");
    assert!(matches!(result, Err(Error::InvalidServiceUrl(_))));
}
