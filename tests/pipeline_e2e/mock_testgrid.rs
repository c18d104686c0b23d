//! Mock TestGrid server for E2E tests.
//!
//! Starts an in-process HTTP server serving the summary and test table
//! endpoints from canned responses.

use actix_web::http::StatusCode;
use actix_web::{App, HttpResponse, HttpServer, get, web};
use flake_tracker_lib::config::Config;
use flake_tracker_lib::services::TestGridClient;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Canned response for one endpoint.
#[derive(Clone)]
pub enum MockResponse {
    Json(Value),
    Status(u16),
    Raw(&'static str),
    /// Empty summary served after the given number of milliseconds
    Delayed(u64),
}

/// A table request as seen by the server, with query values decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRequest {
    pub group: String,
    pub tab: String,
    pub dashboard: String,
}

/// Shared state for the mock TestGrid.
#[derive(Default)]
pub struct MockState {
    pub summaries: HashMap<String, MockResponse>,
    pub tables: HashMap<(String, String), MockResponse>,
    pub table_requests: Vec<TableRequest>,
}

fn respond(response: Option<MockResponse>) -> HttpResponse {
    match response {
        Some(MockResponse::Json(body)) => HttpResponse::Ok().json(body),
        Some(MockResponse::Status(code)) => {
            let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            HttpResponse::build(status).body("mock error")
        }
        Some(MockResponse::Raw(body)) => HttpResponse::Ok()
            .content_type("application/json")
            .body(body),
        Some(MockResponse::Delayed(_)) => HttpResponse::Ok().json(json!({})),
        None => HttpResponse::NotFound().body("not found"),
    }
}

#[get("/{group}/summary")]
async fn summary_endpoint(
    path: web::Path<String>,
    state: web::Data<Arc<Mutex<MockState>>>,
) -> HttpResponse {
    let response = state.lock().unwrap().summaries.get(path.as_str()).cloned();
    if let Some(MockResponse::Delayed(millis)) = response {
        tokio::time::sleep(Duration::from_millis(millis)).await;
    }
    respond(response)
}

#[get("/{group}/table")]
async fn table_endpoint(
    path: web::Path<String>,
    query: web::Query<HashMap<String, String>>,
    state: web::Data<Arc<Mutex<MockState>>>,
) -> HttpResponse {
    let group = path.into_inner();
    let tab = query.get("tab").cloned().unwrap_or_default();
    let dashboard = query.get("dashboard").cloned().unwrap_or_default();

    let mut state = state.lock().unwrap();
    state.table_requests.push(TableRequest {
        group: group.clone(),
        tab: tab.clone(),
        dashboard,
    });
    respond(state.tables.get(&(group, tab)).cloned())
}

/// Mock TestGrid serving canned responses.
pub struct MockTestGrid {
    pub base_url: String,
    pub state: Arc<Mutex<MockState>>,
}

impl MockTestGrid {
    /// Start the mock on an ephemeral port.
    pub async fn start() -> Self {
        let state = Arc::new(Mutex::new(MockState::default()));

        let listener = TcpListener::bind("127.0.0.1:0").expect("failed to bind");
        let port = listener.local_addr().unwrap().port();
        let base_url = format!("http://127.0.0.1:{}", port);

        let state_data = state.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(web::Data::new(state_data.clone()))
                .service(summary_endpoint)
                .service(table_endpoint)
        })
        .workers(1)
        .listen(listener)
        .expect("failed to listen")
        .disable_signals()
        .run();

        // Fire and forget — server lives for the process lifetime
        tokio::spawn(server);

        MockTestGrid { base_url, state }
    }

    pub fn set_summary(&self, group: &str, response: MockResponse) {
        let mut state = self.state.lock().unwrap();
        state.summaries.insert(group.to_string(), response);
    }

    pub fn set_table(&self, group: &str, job: &str, response: MockResponse) {
        let mut state = self.state.lock().unwrap();
        state
            .tables
            .insert((group.to_string(), job.to_string()), response);
    }

    pub fn table_requests(&self) -> Vec<TableRequest> {
        self.state.lock().unwrap().table_requests.clone()
    }

    /// Configuration pointing at this mock with short timeouts.
    pub fn config(&self) -> Config {
        Config {
            connect_timeout: Duration::from_secs(2),
            request_timeout: Duration::from_secs(5),
            ..Config::with_base_url(&self.base_url)
        }
    }

    pub fn client(&self) -> TestGridClient {
        TestGridClient::new(&self.config()).expect("failed to build client")
    }
}

/// Summary entry as served by TestGrid.
pub fn summary_entry(status: &str) -> Value {
    json!({
        "overall_status": status,
        "alert": "",
        "last_run_timestamp": 1_600_000_000_000i64,
        "last_update_timestamp": 1_600_000_100i64,
        "latest_green": "v1.20.0-alpha.1",
        "overall_status_icon": "done",
        "status": "8 of 10 (80.0%) recent columns passed",
        "dashboard_name": "ignored-upstream-field"
    })
}

/// Summary document built from (job, status) pairs.
pub fn summary(jobs: &[(&str, &str)]) -> MockResponse {
    let body: serde_json::Map<String, Value> = jobs
        .iter()
        .map(|(job, status)| (job.to_string(), summary_entry(status)))
        .collect();
    MockResponse::Json(Value::Object(body))
}

/// Test table document listing the given test names.
pub fn table(tests: &[&str]) -> MockResponse {
    let tests: Vec<Value> = tests
        .iter()
        .map(|name| {
            json!({
                "name": name,
                "original-name": format!("{} [Original]", name),
                "alert": null,
                "linked_bugs": [],
                "messages": ["", ""],
                "short_texts": ["", "F"],
                "statuses": [{"count": 2, "value": 12}],
                "target": name,
                "user_property": null
            })
        })
        .collect();
    MockResponse::Json(json!({
        "test-group-name": "mock-test-group",
        "query": "gs://mock/logs",
        "tests": tests
    }))
}
