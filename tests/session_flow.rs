//! End-to-end tests of the interactive session against a mocked provider.

mod helpers;

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Result;
use httptest::matchers::{contains, request, url_decoded};
use httptest::responders::status_code;
use httptest::{all_of, Expectation, Server};
use serde_json::Value;
use tempfile::TempDir;

use geolocation_tracker::output::{
    JsonFileStore, LeafletRenderer, MapRenderer, MapRequest, MarkerColor, TerminalConsole,
};
use geolocation_tracker::session::ScriptedInput;
use geolocation_tracker::Session;

use helpers::{test_client, SharedBuffer, TEST_TOKEN};

const PROVIDER_BODY: &str = r#"{"ip": "8.8.8.8", "city": "Mountain View", "loc": "37.4,-122.08"}"#;

#[derive(Clone, Default)]
struct RecordingRenderer {
    requests: Rc<RefCell<Vec<MapRequest>>>,
}

impl MapRenderer for RecordingRenderer {
    fn render(&mut self, request: &MapRequest) -> Result<PathBuf> {
        self.requests.borrow_mut().push(request.clone());
        Ok(PathBuf::from("geolocation_map.html"))
    }
}

fn expect_self_lookup(server: &Server) {
    server.expect(
        Expectation::matching(all_of![
            request::method_path("GET", "/json"),
            request::query(url_decoded(contains(("token", TEST_TOKEN)))),
        ])
        .times(1)
        .respond_with(status_code(200).body(PROVIDER_BODY)),
    );
}

fn read_saved(path: &PathBuf) -> Vec<Value> {
    let content = std::fs::read_to_string(path).expect("save file should exist");
    serde_json::Deserializer::from_str(&content)
        .into_iter::<Value>()
        .collect::<Result<_, _>>()
        .expect("save file should hold JSON objects")
}

#[tokio::test]
async fn test_locate_show_save_map_exit() {
    let server = Server::run();
    expect_self_lookup(&server);

    let dir = TempDir::new().unwrap();
    let save_path = dir.path().join("geolocation_data.json");
    let output = SharedBuffer::default();
    let renderer = RecordingRenderer::default();

    let mut session = Session::new(
        test_client(&server, 3),
        Box::new(ScriptedInput::new(["1", "3", "4", "5", "12", "green", "6"])),
        Box::new(TerminalConsole::new(output.clone())),
        Box::new(JsonFileStore::new(&save_path)),
        Box::new(renderer.clone()),
    );

    session.run().await;

    // Slot populated by choice 1
    let last = session.last().expect("last record should be set");
    assert_eq!(last.ip(), "8.8.8.8");

    // Choice 1 and choice 3 both print the details
    let text = output.contents();
    assert_eq!(text.matches("IP: 8.8.8.8").count(), 2);
    assert!(text.contains("City: Mountain View"));
    assert!(text.contains("Region: N/A"));
    assert!(text.contains("Country: N/A"));
    assert!(text.contains("Coordinates: 37.4,-122.08"));
    assert!(text.contains("Goodbye!"));

    // Choice 4 appended exactly one record
    let saved = read_saved(&save_path);
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0]["ip"], "8.8.8.8");
    assert_eq!(saved[0]["city"], "Mountain View");

    // Choice 5 forwarded coordinates and validated options
    let requests = renderer.requests.borrow();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].coordinates.latitude, 37.4);
    assert_eq!(requests[0].coordinates.longitude, -122.08);
    assert_eq!(requests[0].zoom.get(), 12);
    assert_eq!(requests[0].color, MarkerColor::Green);
    assert_eq!(
        requests[0].details.as_ref().map(|r| r.ip()),
        Some("8.8.8.8")
    );
}

#[tokio::test]
async fn test_map_options_fall_back_to_defaults() {
    let server = Server::run();
    expect_self_lookup(&server);

    let output = SharedBuffer::default();
    let renderer = RecordingRenderer::default();
    let dir = TempDir::new().unwrap();

    let mut session = Session::new(
        test_client(&server, 3),
        Box::new(ScriptedInput::new(["1", "5", "25", "pink", "6"])),
        Box::new(TerminalConsole::new(output.clone())),
        Box::new(JsonFileStore::new(dir.path().join("data.json"))),
        Box::new(renderer.clone()),
    );

    session.run().await;

    let requests = renderer.requests.borrow();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].zoom.get(), 10);
    assert_eq!(requests[0].color, MarkerColor::Blue);

    let text = output.contents();
    assert!(text.contains("Zoom level out of range. Using default (10)."));
    assert!(text.contains("Invalid color. Using default (blue)."));
}

#[tokio::test]
async fn test_saves_append_and_map_file_written() {
    let server = Server::run();
    expect_self_lookup(&server);

    let dir = TempDir::new().unwrap();
    let save_path = dir.path().join("geolocation_data.json");
    let map_path = dir.path().join("geolocation_map.html");

    let mut session = Session::new(
        test_client(&server, 3),
        Box::new(ScriptedInput::new(["1", "4", "1", "4", "5", "", "", "6"])),
        Box::new(TerminalConsole::new(SharedBuffer::default())),
        Box::new(JsonFileStore::new(&save_path)),
        Box::new(LeafletRenderer::new(&map_path)),
    );

    session.run().await;

    // The second lookup came from the cache (times(1)); both saves were appended
    assert_eq!(read_saved(&save_path).len(), 2);

    let html = std::fs::read_to_string(&map_path).expect("map file should exist");
    assert!(html.contains("setView([37.4, -122.08], 10)"));
    assert!(html.contains(r#"color: "blue""#));
    assert!(html.contains("Mountain View"));
}

#[tokio::test]
async fn test_provider_failure_does_not_end_session() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/json"))
            .times(2)
            .respond_with(status_code(502)),
    );

    let output = SharedBuffer::default();
    let dir = TempDir::new().unwrap();

    let mut session = Session::new(
        test_client(&server, 2),
        Box::new(ScriptedInput::new(["1", "3", "6"])),
        Box::new(TerminalConsole::new(output.clone())),
        Box::new(JsonFileStore::new(dir.path().join("data.json"))),
        Box::new(RecordingRenderer::default()),
    );

    session.run().await;

    assert!(session.last().is_none());
    let text = output.contents();
    assert!(text.contains("Error: HTTP error occurred: 502"));
    assert!(text.contains("No geolocation data available. Fetch data first."));
    assert!(text.contains("Goodbye!"));
}
