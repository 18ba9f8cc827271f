use std::{fmt, net::SocketAddr, path::PathBuf};

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use cucumber::{given, then, when, World as _};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;
use trips::{
    config::AppConfig,
    routes::create_router,
    services::{storage::StorageService, store::TripStore},
    state::AppState,
};

#[derive(Debug, cucumber::World, Default)]
struct AppWorld {
    app: Option<TestApp>,
    last: Option<LastResponse>,
}

#[derive(Debug)]
struct LastResponse {
    status: StatusCode,
    body: Vec<u8>,
}

impl LastResponse {
    fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body should be JSON")
    }
}

struct TestApp {
    router: Router,
    data_dir: Option<TempDir>,
}

impl fmt::Debug for TestApp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestApp").finish()
    }
}

fn test_config(data_dir: Option<PathBuf>) -> AppConfig {
    AppConfig {
        listen_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
        data_dir,
        static_dir: PathBuf::from("static"),
        seed_demo_trips: false,
    }
}

impl TestApp {
    fn in_memory() -> Self {
        let state = AppState::new(test_config(None), TripStore::in_memory(Vec::new()));
        Self {
            router: create_router(state),
            data_dir: None,
        }
    }

    async fn persistent(dir: TempDir) -> Self {
        let config = test_config(Some(dir.path().to_path_buf()));
        let storage = StorageService::new(dir.path().to_path_buf());
        let store = TripStore::persistent(storage, Vec::new())
            .await
            .expect("open snapshot");
        Self {
            router: create_router(AppState::new(config, store)),
            data_dir: Some(dir),
        }
    }
}

impl AppWorld {
    fn app(&self) -> &TestApp {
        self.app.as_ref().expect("app must be initialised first")
    }

    fn last(&self) -> &LastResponse {
        self.last.as_ref().expect("no request was sent yet")
    }

    async fn send(&mut self, method: Method, uri: &str, body: Option<Value>) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(value) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(value.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");

        let response = self
            .app()
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body")
            .to_vec();
        self.last = Some(LastResponse { status, body });
    }

    async fn create_trip(
        &mut self,
        name: &str,
        destination: &str,
        start: &str,
        end: &str,
        budget: f64,
    ) {
        let payload = json!({
            "name": name,
            "destination": destination,
            "startDate": start,
            "endDate": end,
            "budget": budget,
        });
        self.send(Method::POST, "/api/trips", Some(payload)).await;
    }
}

#[given("an empty trip tracker")]
async fn given_empty_tracker(world: &mut AppWorld) {
    world.app = Some(TestApp::in_memory());
    world.last = None;
}

#[given("a trip tracker persisting to a temporary directory")]
async fn given_persistent_tracker(world: &mut AppWorld) {
    let dir = TempDir::new().expect("temp dir");
    world.app = Some(TestApp::persistent(dir).await);
    world.last = None;
}

#[when("the tracker restarts")]
async fn when_tracker_restarts(world: &mut AppWorld) {
    let dir = world
        .app
        .take()
        .and_then(|app| app.data_dir)
        .expect("tracker must persist to restart");
    world.app = Some(TestApp::persistent(dir).await);
}

#[given(
    regex = r#"^a trip "([^"]+)" to "([^"]+)" from "([^"]+)" to "([^"]+)" with budget (\d+(?:\.\d+)?)$"#
)]
async fn given_trip(
    world: &mut AppWorld,
    name: String,
    destination: String,
    start: String,
    end: String,
    budget: f64,
) {
    world.create_trip(&name, &destination, &start, &end, budget).await;
    assert_eq!(world.last().status, StatusCode::CREATED);
}

#[when(
    regex = r#"^I create a trip "([^"]+)" to "([^"]+)" from "([^"]+)" to "([^"]+)" with budget (\d+(?:\.\d+)?)$"#
)]
async fn when_create_trip(
    world: &mut AppWorld,
    name: String,
    destination: String,
    start: String,
    end: String,
    budget: f64,
) {
    world.create_trip(&name, &destination, &start, &end, budget).await;
}

#[given(regex = r#"^trips to (.+) starting "([^"]+)"$"#)]
async fn given_trips_to(world: &mut AppWorld, destinations: String, start: String) {
    for destination in destinations.split(", ").map(|d| d.trim_matches('"')) {
        world.create_trip("Trip", destination, &start, &start, 0.0).await;
        assert_eq!(world.last().status, StatusCode::CREATED);
    }
}

#[when(regex = r#"^I create a trip from raw JSON '(.+)'$"#)]
async fn when_create_raw(world: &mut AppWorld, raw: String) {
    let payload: Value = serde_json::from_str(&raw).expect("step JSON");
    world.send(Method::POST, "/api/trips", Some(payload)).await;
}

#[when(regex = r#"^I update trip (\d+) with '(.+)'$"#)]
async fn when_update_trip(world: &mut AppWorld, id: u64, raw: String) {
    let payload: Value = serde_json::from_str(&raw).expect("step JSON");
    world
        .send(Method::PUT, &format!("/api/trips/{id}"), Some(payload))
        .await;
}

#[when(regex = r"^I delete trip (\d+)$")]
async fn when_delete_trip(world: &mut AppWorld, id: u64) {
    world
        .send(Method::DELETE, &format!("/api/trips/{id}"), None)
        .await;
}

#[when(regex = r#"^I request "([^"]+)"$"#)]
async fn when_request(world: &mut AppWorld, uri: String) {
    world.send(Method::GET, &uri, None).await;
}

#[then(regex = r"^the response status is (\d+)$")]
async fn then_status(world: &mut AppWorld, status: u16) {
    assert_eq!(world.last().status.as_u16(), status);
}

#[then(regex = r#"^the error message is "([^"]+)"$"#)]
async fn then_error_message(world: &mut AppWorld, message: String) {
    assert_eq!(world.last().json()["error"], message.as_str());
}

#[then(regex = r#"^the JSON field "([^"]+)" is (-?\d+(?:\.\d+)?)$"#)]
async fn then_number_field(world: &mut AppWorld, field: String, expected: f64) {
    let value = world.last().json();
    let actual = value[field.as_str()]
        .as_f64()
        .unwrap_or_else(|| panic!("field {field} is not a number in {value}"));
    assert_eq!(actual, expected, "field {field}");
}

#[then(regex = r#"^the JSON field "([^"]+)" is "([^"]*)"$"#)]
async fn then_string_field(world: &mut AppWorld, field: String, expected: String) {
    assert_eq!(world.last().json()[field.as_str()], expected.as_str());
}

#[then(regex = r#"^the JSON field "([^"]+)" is present$"#)]
async fn then_field_present(world: &mut AppWorld, field: String) {
    assert!(!world.last().json()[field.as_str()].is_null());
}

#[then(regex = r"^the tracker holds (\d+) trips?$")]
async fn then_tracker_holds(world: &mut AppWorld, expected: usize) {
    world.send(Method::GET, "/api/trips", None).await;
    let trips = world.last().json();
    assert_eq!(trips.as_array().map(Vec::len), Some(expected));
}

#[then(regex = r"^the destination ranking is (.+)$")]
async fn then_destination_ranking(world: &mut AppWorld, expected: String) {
    let ranking: Vec<String> = world
        .last()
        .json()
        .as_array()
        .expect("array")
        .iter()
        .map(|entry| {
            let name = entry["destination"].as_str().unwrap_or("");
            format!("{name}={}", entry["count"])
        })
        .collect();
    assert_eq!(ranking.join(", "), expected);
}

#[then(regex = r"^the monthly counts are (.+)$")]
async fn then_monthly_counts(world: &mut AppWorld, expected: String) {
    let months = world.last().json();
    let months = months.as_array().expect("array");
    assert_eq!(months.len(), 12);
    for (idx, entry) in months.iter().enumerate() {
        assert_eq!(entry["month"], idx + 1);
    }
    let counts: Vec<String> = months.iter().map(|m| m["count"].to_string()).collect();
    assert_eq!(counts.join(" "), expected);
}

#[then(regex = r"^the timeline is (.+)$")]
async fn then_timeline(world: &mut AppWorld, expected: String) {
    let points: Vec<String> = world
        .last()
        .json()
        .as_array()
        .expect("array")
        .iter()
        .map(|p| format!("{}#{}", p["date"].as_str().unwrap_or(""), p["runningCount"]))
        .collect();
    assert_eq!(points.join(", "), expected);
}

#[then(regex = r#"^calendar event (\d+) is "([^"]+)"$"#)]
async fn then_calendar_status(world: &mut AppWorld, idx: usize, status: String) {
    let events = world.last().json();
    assert_eq!(events[idx]["status"], status.as_str());
}

#[then(regex = r#"^the body contains "([^"]+)"$"#)]
async fn then_body_contains(world: &mut AppWorld, needle: String) {
    let body = String::from_utf8_lossy(&world.last().body);
    assert!(body.contains(&needle), "{needle:?} not found in {body}");
}

#[tokio::main]
async fn main() {
    AppWorld::cucumber()
        .fail_on_skipped()
        .with_default_cli()
        .run("tests/features")
        .await;
}
