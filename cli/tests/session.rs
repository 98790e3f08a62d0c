//! End-to-end run of the client core against the real server.
//!
//! # Design
//! Starts the server with an in-memory store on a random port, then drives
//! both `TodoClient` and `TodoApp` through the terminal client's `Transport`.
//! Validates that request building, response parsing, and local
//! reconciliation agree with what the server actually does.

use std::sync::Arc;

use todo_cli::transport::Transport;
use todo_core::{
    ApiError, HttpMethod, HttpRequest, Outcome, TodoApp, TodoClient, TodoId, TodoInput,
};
use todo_server::MemoryStore;

const MISSING_ID: &str = "000000000000000000000000";

fn execute(req: HttpRequest) -> Outcome {
    Transport::new().execute(req)
}

/// Start the server on a random port and return its base URL.
fn start_server() -> String {
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
            todo_server::run(listener, Arc::new(MemoryStore::new())).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

#[test]
fn client_crud_lifecycle() {
    let client = TodoClient::new(&start_server());

    let todos = client
        .parse_list_todos(execute(client.build_list_todos()).unwrap())
        .unwrap();
    assert!(todos.is_empty(), "expected empty list");

    let input = TodoInput::new("Buy milk", "2%");
    let req = client.build_create_todo(&input).unwrap();
    let created = client.parse_create_todo(execute(req).unwrap()).unwrap();
    assert_eq!(created.title, "Buy milk");
    assert_eq!(created.description, "2%");
    let id = created.id.clone();

    // empty description bypasses the UI guard and is accepted by the server
    let req = client
        .build_create_todo(&TodoInput::new("No description", ""))
        .unwrap();
    let bare = client.parse_create_todo(execute(req).unwrap()).unwrap();
    assert_ne!(bare.id, id);

    let req = client
        .build_update_todo(&id, &TodoInput::new("Buy oat milk", "barista"))
        .unwrap();
    let updated = client.parse_update_todo(execute(req).unwrap()).unwrap();
    assert_eq!(updated.id, id);
    assert_eq!(updated.title, "Buy oat milk");

    let req = client
        .build_update_todo(&TodoId::from(MISSING_ID), &TodoInput::new("x", "y"))
        .unwrap();
    let err = client.parse_update_todo(execute(req).unwrap()).unwrap_err();
    assert!(matches!(err, ApiError::NotFound(ref m) if m == "Todo not found"));

    let req = client
        .build_update_todo(&TodoId::from("nope"), &TodoInput::new("x", "y"))
        .unwrap();
    let err = client.parse_update_todo(execute(req).unwrap()).unwrap_err();
    assert!(matches!(err, ApiError::BadRequest(_)));

    let todos = client
        .parse_list_todos(execute(client.build_list_todos()).unwrap())
        .unwrap();
    assert_eq!(todos, vec![updated, bare.clone()]);

    client
        .parse_delete_todo(execute(client.build_delete_todo(&id)).unwrap())
        .unwrap();
    // deleting again is not checked for existence
    client
        .parse_delete_todo(execute(client.build_delete_todo(&id)).unwrap())
        .unwrap();

    let todos = client
        .parse_list_todos(execute(client.build_list_todos()).unwrap())
        .unwrap();
    assert_eq!(todos, vec![bare]);
}

#[test]
fn app_session_against_server() {
    let base_url = start_server();
    let mut app = TodoApp::new(TodoClient::new(&base_url));

    let load = app.load();
    app.apply(load.intent, execute(load.request));
    assert!(app.todos().is_empty());

    *app.draft_mut() = TodoInput::new("Walk dog", "park");
    let outbound = app.submit().unwrap();
    app.apply(outbound.intent, execute(outbound.request));
    assert_eq!(app.todos().len(), 1);
    assert_eq!(app.success().unwrap().text, "Item added successfully");
    assert!(app.error().is_none());
    let id = app.todos()[0].id.clone();

    assert!(app.begin_edit(&id));
    app.edit_draft_mut().unwrap().title = "Walk cat".into();
    let outbound = app.save_edit().unwrap();
    app.apply(outbound.intent, execute(outbound.request));
    assert!(app.editing().is_none());
    assert_eq!(app.todos()[0].title, "Walk cat");

    let outbound = app.request_delete(&id, |_| true).unwrap();
    app.apply(outbound.intent, execute(outbound.request));
    assert!(app.todos().is_empty());

    // a second session loads the server's view, which matches ours
    let mut second = TodoApp::new(TodoClient::new(&base_url));
    *second.draft_mut() = TodoInput::new("Feed fish", "flakes");
    let outbound = second.submit().unwrap();
    second.apply(outbound.intent, execute(outbound.request));

    let load = app.load();
    app.apply(load.intent, execute(load.request));
    assert_eq!(app.todos(), second.todos());
}

#[test]
fn app_reports_unreachable_server() {
    // Nothing listens on the port of a dropped listener.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let mut app = TodoApp::new(TodoClient::new(&format!("http://{addr}")));

    let load = app.load();
    app.apply(load.intent, execute(load.request));
    assert!(app.success().is_none());
    assert!(app.error().is_none());

    *app.draft_mut() = TodoInput::new("Offline", "attempt");
    let outbound = app.submit().unwrap();
    app.apply(outbound.intent, execute(outbound.request));
    assert_eq!(app.error().unwrap().text, "Unable to create Todo item");
    assert!(app.success().is_none());
    assert_eq!(app.draft(), &TodoInput::new("Offline", "attempt"));
}

#[test]
fn failed_delete_keeps_earlier_success_visible() {
    let base_url = start_server();
    let mut app = TodoApp::new(TodoClient::new(&base_url));

    *app.draft_mut() = TodoInput::new("Water plants", "balcony");
    let outbound = app.submit().unwrap();
    app.apply(outbound.intent, execute(outbound.request));
    let id = app.todos()[0].id.clone();

    // Point the delete at an id the server rejects, so it fails with 400.
    let mut outbound = app.request_delete(&id, |_| true).unwrap();
    outbound.request.path = format!("{base_url}/todos/not-an-id");
    app.apply(outbound.intent, execute(outbound.request));

    assert_eq!(app.todos().len(), 1);
    assert_eq!(app.success().unwrap().text, "Item added successfully");
    assert_eq!(app.error().unwrap().text, "Unable to delete Todo item");
}

#[test]
fn transport_returns_error_statuses_as_data() {
    let base_url = start_server();
    let response = execute(HttpRequest {
        method: HttpMethod::Delete,
        path: format!("{base_url}/todos/not-an-id"),
        headers: Vec::new(),
        body: None,
    })
    .unwrap();
    assert_eq!(response.status, 400);
    assert!(response.body.contains("Invalid todo id"));
}
