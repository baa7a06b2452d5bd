// Integration tests for the pick board.
//
// These exercise the library end-to-end through its public API: loading a
// roster from a file or HTTP source, driving the board with key events, and
// importing a draft table into SQLite.

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use pick_board::app;
use pick_board::board::load_failure_message;
use pick_board::db::{import_csv_to_sqlite, Database};
use pick_board::protocol::{UiUpdate, UserCommand};
use pick_board::roster::detail::{resolve_detail, ProfileOrigin};
use pick_board::roster::loader::{load_roster, LoadError, RosterSource};
use pick_board::roster::lookup::DEFAULT_PHOTO_URL;
use pick_board::roster::Roster;
use pick_board::scrape;
use pick_board::tui::input::handle_key;
use pick_board::tui::{apply_ui_update, ViewState};

// ===========================================================================
// Test helpers
// ===========================================================================

/// Fixture directory path (relative to the crate root, which is the cwd for
/// `cargo test`).
const FIXTURES: &str = "tests/fixtures";

fn fixture(name: &str) -> RosterSource {
    RosterSource::File(PathBuf::from(FIXTURES).join(name))
}

async fn load_fixture(name: &str) -> Roster {
    load_roster(&reqwest::Client::new(), &fixture(name))
        .await
        .expect("fixture should load")
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

/// Serve one canned HTTP response on a local port and return the base URL.
async fn serve_once(response: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        if let Ok((mut socket, _)) = listener.accept().await {
            let mut buf = [0u8; 2048];
            let _ = socket.read(&mut buf).await;
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });
    format!("http://{addr}")
}

fn local_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

// ===========================================================================
// Loading
// ===========================================================================

#[tokio::test]
async fn loads_fixture_in_file_order() {
    let roster = load_fixture("picks.csv").await;

    assert_eq!(
        roster.headers,
        vec!["Round", "Ovr_Pick_No", "Player", "Position", "College", "Notes"]
    );
    assert_eq!(roster.len(), 3, "blank line is skipped");

    let first = roster.get(0).unwrap();
    assert_eq!(first.get("Player"), Some("Derrick Harmon"));
    assert_eq!(first.get("Notes"), Some("Interior pass rusher"));

    let short = roster.get(1).unwrap();
    assert_eq!(short.get("College"), Some("Iowa"));
    assert_eq!(short.get("Notes"), None, "short row lacks trailing columns");
}

#[tokio::test]
async fn header_only_file_is_an_empty_roster() {
    let roster = load_fixture("header_only.csv").await;
    assert!(roster.is_empty());
    assert_eq!(roster.headers.len(), 5);
}

#[tokio::test]
async fn missing_file_is_an_io_error() {
    let err = load_roster(&reqwest::Client::new(), &fixture("does_not_exist.csv"))
        .await
        .unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }), "got {err:?}");
}

#[tokio::test]
async fn loads_roster_over_http() {
    let base = serve_once(
        "HTTP/1.1 200 OK\r\nContent-Type: text/csv\r\nContent-Length: 35\r\nConnection: close\r\n\r\nPlayer,Position\nWill Howard,QB\nX,Y\n",
    )
    .await;
    let source = RosterSource::parse(&format!("{base}/Steeler%20Picks.csv"));
    assert!(matches!(source, RosterSource::Url(_)));

    let roster = load_roster(&local_client(), &source).await.unwrap();
    assert_eq!(roster.len(), 2);
    assert_eq!(roster.get(0).unwrap().get("Player"), Some("Will Howard"));
}

#[tokio::test]
async fn http_404_is_a_status_error() {
    let base = serve_once("HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n").await;
    let source = RosterSource::parse(&format!("{base}/picks.csv"));

    let err = load_roster(&local_client(), &source).await.unwrap_err();
    match err {
        LoadError::Status { status, .. } => assert_eq!(status.as_u16(), 404),
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn http_404_reaches_the_ui_as_alert() {
    let base = serve_once("HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n").await;
    let source = RosterSource::parse(&format!("{base}/Steeler Picks.csv"));
    let (ui_tx, mut ui_rx) = mpsc::channel(4);

    app::run(local_client(), source, ui_tx).await.unwrap();

    let update = ui_rx.recv().await.unwrap();
    let mut state = ViewState::default();
    apply_ui_update(&mut state, update);
    assert_eq!(
        state.board.alert(),
        Some(load_failure_message("Steeler Picks.csv").as_str())
    );
    assert!(state.board.list_entries().is_empty());
    assert!(ui_rx.recv().await.is_none(), "exactly one update is sent");
}

// ===========================================================================
// Browsing
// ===========================================================================

#[tokio::test]
async fn browse_flow_from_list_to_dropdown() {
    let (ui_tx, mut ui_rx) = mpsc::channel(4);
    app::run(reqwest::Client::new(), fixture("picks.csv"), ui_tx)
        .await
        .unwrap();

    let mut state = ViewState::new("Steelers Draft Picks", "picks.csv");
    apply_ui_update(&mut state, ui_rx.recv().await.unwrap());
    assert_eq!(
        state.board.list_entries(),
        &["Derrick Harmon (DT)", "Kaleb Johnson (RB)", "Player 3 (CB)"]
    );
    assert_eq!(state.board.photo().unwrap().url, DEFAULT_PHOTO_URL);

    // Click the third entry
    handle_key(key(KeyCode::End), &mut state);
    handle_key(key(KeyCode::Enter), &mut state);
    let detail = state.board.detail().unwrap();
    assert_eq!(detail.name, "Unknown");
    assert_eq!(detail.college, "Central Michigan");
    assert_eq!(detail.photo.url, DEFAULT_PHOTO_URL);
    assert!(!state.board.regions().link);
    assert!(!state.board.regions().sidebar);

    // Switch to the first pick through the dropdown
    handle_key(key(KeyCode::Char('d')), &mut state);
    handle_key(key(KeyCode::Home), &mut state);
    handle_key(key(KeyCode::Down), &mut state);
    handle_key(key(KeyCode::Enter), &mut state);
    let detail = state.board.detail().unwrap();
    assert_eq!(detail.name, "Derrick Harmon");
    assert_eq!(detail.round, "1");
    assert_eq!(detail.pick, "21");
    assert_ne!(detail.photo.url, DEFAULT_PHOTO_URL);
    assert_eq!(detail.profile.as_ref().unwrap().origin, ProfileOrigin::Espn);
    assert!(state.board.regions().link);
    assert!(!state.board.regions().sidebar, "sidebar never comes back");

    assert_eq!(
        handle_key(key(KeyCode::Char('q')), &mut state),
        Some(UserCommand::Quit)
    );
}

#[tokio::test]
async fn alias_columns_resolve_details() {
    let roster = load_fixture("alias_columns.csv").await;

    let sawyer = resolve_detail(roster.get(0).unwrap());
    assert_eq!(sawyer.name, "Jack Sawyer");
    assert_eq!(sawyer.round, "4");
    assert_eq!(sawyer.pick, "123");
    assert_eq!(sawyer.position, "EDGE");
    assert_eq!(sawyer.photo.url, "https://img.example/sawyer.png");
    // Static ESPN entry wins over the record's own link
    let link = sawyer.profile.unwrap();
    assert_eq!(link.origin, ProfileOrigin::Espn);
    assert_eq!(link.label(), "View ESPN profile");

    let hopeful = resolve_detail(roster.get(1).unwrap());
    assert_eq!(hopeful.photo.url, DEFAULT_PHOTO_URL);
    let link = hopeful.profile.unwrap();
    assert_eq!(link.url, "https://example.com/hopeful");
    assert_eq!(link.label(), "View profile");
}

#[tokio::test]
async fn empty_roster_keeps_placeholder_only() {
    let mut state = ViewState::default();
    apply_ui_update(
        &mut state,
        UiUpdate::RosterLoaded(Box::new(load_fixture("header_only.csv").await)),
    );
    assert!(state.board.list_entries().is_empty());
    assert_eq!(state.board.dropdown_options().len(), 1);

    handle_key(key(KeyCode::Enter), &mut state);
    assert!(state.board.detail().is_none());
    assert!(state.board.regions().sidebar);
}

// ===========================================================================
// Import
// ===========================================================================

#[test]
fn import_draft_table_into_sqlite() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("nested").join("draft.sql");
    let csv_path = PathBuf::from(FIXTURES).join("draft_table.csv");

    let count = import_csv_to_sqlite(&csv_path, &db_path, "draft").unwrap();
    assert_eq!(count, 3);

    let db = Database::open(&db_path).unwrap();
    assert_eq!(db.row_count("draft").unwrap(), 3);
    assert_eq!(
        db.column_names("draft").unwrap(),
        vec![
            "Rnd",
            "Pick",
            "Tm",
            "Player",
            "Pos",
            "Age",
            "College/Univ",
            "Unnamed: 7",
            "Pick.1"
        ]
    );

    // Re-import replaces the table rather than appending
    let count = import_csv_to_sqlite(&csv_path, &db_path, "draft").unwrap();
    assert_eq!(count, 3);
    assert_eq!(db.row_count("draft").unwrap(), 3);
}

#[test]
fn import_rejects_unsafe_table_name() {
    let dir = tempfile::tempdir().unwrap();
    let csv_path = PathBuf::from(FIXTURES).join("draft_table.csv");
    let result = import_csv_to_sqlite(&csv_path, &dir.path().join("d.sql"), "draft; DROP");
    assert!(result.is_err());
}

// ===========================================================================
// Scrape -> import pipeline
// ===========================================================================

#[test]
fn scraped_table_imports_into_sqlite() {
    let html = std::fs::read_to_string(PathBuf::from(FIXTURES).join("draft_page.html")).unwrap();
    let table = scrape::extract_table(&html, "plainrowheaders wikitable", 0).unwrap();
    assert_eq!(table.rows.len(), 4);
    assert_eq!(table.rows[2][0], "1", "round spans three picks");
    assert_eq!(table.rows[2][3], "Derrick Harmon");

    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("data").join("2025_nfl_draft_table.csv");
    let json_path = dir.path().join("draft.json");
    scrape::write_csv(&table, &csv_path).unwrap();
    scrape::write_json(&table, &json_path).unwrap();
    assert_eq!(
        scrape::summary_line(&table, Some(&csv_path), None),
        format!("Done. Rows: 4 | Columns: 8 | Saved: CSV={} | JSON=no", csv_path.display())
    );

    let db_path = dir.path().join("draft.sql");
    let count = import_csv_to_sqlite(&csv_path, &db_path, "draft").unwrap();
    assert_eq!(count, 4);
    let db = Database::open(&db_path).unwrap();
    let columns = db.column_names("draft").unwrap();
    assert_eq!(columns[0], "Rnd.");
    assert_eq!(columns[3], "Player");
    assert_eq!(columns.len(), 8);
}
