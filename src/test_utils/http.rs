use axum_test::{TestResponse, TestServer};
use rusqlite::Connection;

use crate::{AppState, build_router};

/// Create an [AppState] backed by an in-memory database and a test server for the app's router.
#[track_caller]
pub(crate) fn get_test_server() -> (AppState, TestServer) {
    let connection = Connection::open_in_memory().expect("Could not open database in memory.");
    let state = AppState::new(connection).expect("Could not create app state.");

    let server = TestServer::new(build_router(state.clone()));

    (state, server)
}

#[track_caller]
pub(crate) fn get_header(response: &TestResponse, header_name: &str) -> String {
    let header_error_message = format!("Headers missing {header_name}");

    response
        .headers()
        .get(header_name)
        .expect(&header_error_message)
        .to_str()
        .expect("Could not convert to str")
        .to_string()
}

#[track_caller]
pub(crate) fn assert_cors_headers(response: &TestResponse) {
    assert_eq!(get_header(response, "access-control-allow-origin"), "*");
    assert_eq!(
        get_header(response, "access-control-allow-methods"),
        "GET, POST, DELETE, OPTIONS"
    );
    assert_eq!(
        get_header(response, "access-control-allow-headers"),
        "Content-Type"
    );
}
