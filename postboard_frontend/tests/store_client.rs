use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use postboard_frontend::api::{PostStore, StoreClient};
use postboard_frontend::config::StoreConfig;
use postboard_frontend::error::StoreError;
use postboard_frontend::models::{NewPost, PostId, PostPatch, Principal};

const KEY: &str = "anon-test-key";

#[derive(Default)]
struct Table {
    rows: Vec<Value>,
    next_id: i64,
}

type Shared = Arc<Mutex<Table>>;

fn authorized(headers: &HeaderMap) -> bool {
    let apikey = headers.get("apikey").and_then(|v| v.to_str().ok());
    let bearer = headers.get("authorization").and_then(|v| v.to_str().ok());
    apikey == Some(KEY) && bearer == Some(format!("Bearer {KEY}").as_str())
}

fn id_filter(query: &HashMap<String, String>) -> Option<i64> {
    query.get("id")?.strip_prefix("eq.")?.parse().ok()
}

async fn select(
    State(table): State<Shared>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, "Invalid API key").into_response();
    }
    if query.get("select").map(String::as_str) != Some("*") {
        return (StatusCode::BAD_REQUEST, "select required").into_response();
    }
    let rows = table.lock().unwrap().rows.clone();
    Json(rows).into_response()
}

async fn insert(
    State(table): State<Shared>,
    headers: HeaderMap,
    Json(rows): Json<Vec<Value>>,
) -> Response {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, "Invalid API key").into_response();
    }
    let mut table = table.lock().unwrap();
    for mut row in rows {
        table.next_id += 1;
        row["id"] = json!(table.next_id);
        row["created_at"] = json!(format!("2024-05-01T12:{:02}:00+00:00", table.next_id));
        table.rows.push(row);
    }
    StatusCode::CREATED.into_response()
}

async fn update(
    State(table): State<Shared>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
    Json(patch): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, "Invalid API key").into_response();
    }
    let Some(id) = id_filter(&query) else {
        return (StatusCode::BAD_REQUEST, "id filter required").into_response();
    };
    let mut table = table.lock().unwrap();
    for row in table.rows.iter_mut().filter(|row| row["id"] == json!(id)) {
        row["content"] = patch["content"].clone();
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn remove(
    State(table): State<Shared>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, "Invalid API key").into_response();
    }
    let Some(id) = id_filter(&query) else {
        return (StatusCode::BAD_REQUEST, "id filter required").into_response();
    };
    table.lock().unwrap().rows.retain(|row| row["id"] != json!(id));
    StatusCode::NO_CONTENT.into_response()
}

/// Starts a row-store stand-in on an ephemeral port and returns its base URL.
fn spawn_stub_store() -> (String, Shared) {
    let table: Shared = Arc::default();
    let app = Router::new()
        .route("/rest/v1/posts", get(select).post(insert).patch(update).delete(remove))
        .with_state(table.clone());

    let (addr_tx, addr_rx) = mpsc::channel::<SocketAddr>();
    thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("tokio runtime");
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                .await
                .expect("bind ephemeral port");
            addr_tx
                .send(listener.local_addr().expect("local addr"))
                .expect("report address");
            axum::serve(listener, app).await.expect("serve stub store");
        });
    });
    let addr = addr_rx.recv().expect("stub store started");
    (format!("http://{addr}"), table)
}

fn client(url: &str, key: &str) -> StoreClient {
    StoreClient::new(&StoreConfig {
        url: Some(url.to_string()),
        key: Some(key.to_string()),
    })
    .expect("client")
}

fn ada() -> Principal {
    Principal {
        id: "user_ada".into(),
        username: Some("ada".into()),
        first_name: Some("Ada".into()),
        last_name: Some("Lovelace".into()),
        image_url: Some("https://img.example/ada.png".into()),
    }
}

#[test]
fn insert_then_select_returns_snapshot_columns() {
    let (url, table) = spawn_stub_store();
    let store = client(&url, KEY);

    store
        .insert(&NewPost::authored_by(&ada(), "hello"))
        .expect("insert");

    let stored = table.lock().unwrap().rows[0].clone();
    assert_eq!(stored["username"], json!("ada"));
    assert_eq!(stored["first_name"], json!("Ada"));
    assert_eq!(stored["last_name"], json!("Lovelace"));
    assert_eq!(stored["image_url"], json!("https://img.example/ada.png"));
    assert_eq!(stored["content"], json!("hello"));

    let posts = store.select_all().expect("select");
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].id, PostId::Number(1));
    assert_eq!(posts[0].author.username.as_deref(), Some("ada"));
    assert!(posts[0].created_at_utc().is_some());
}

#[test]
fn update_and_delete_target_one_row() {
    let (url, _table) = spawn_stub_store();
    let store = client(&url, KEY);
    for content in ["one", "two"] {
        store.insert(&NewPost::authored_by(&ada(), content)).expect("insert");
    }

    store
        .update(
            &PostId::Number(2),
            &PostPatch {
                content: "edited".into(),
            },
        )
        .expect("update");
    let posts = store.select_all().expect("select");
    let contents: Vec<_> = posts.iter().map(|p| p.content.as_str()).collect();
    assert_eq!(contents, vec!["one", "edited"]);

    store.delete(&PostId::Number(1)).expect("delete");
    let posts = store.select_all().expect("select");
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].id, PostId::Number(2));
    assert_eq!(posts[0].author.username.as_deref(), Some("ada"));
}

#[test]
fn rejected_key_surfaces_status_and_body() {
    let (url, _table) = spawn_stub_store();
    let store = client(&url, "wrong-key");

    match store.select_all() {
        Err(StoreError::Status { status, body }) => {
            assert_eq!(status, reqwest::StatusCode::UNAUTHORIZED);
            assert_eq!(body, "Invalid API key");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[test]
fn unreachable_store_is_an_http_error() {
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .expect("bind ephemeral port")
        .local_addr()
        .unwrap()
        .port();
    let store = client(&format!("http://127.0.0.1:{port}"), KEY);
    let err = store.select_all().unwrap_err();
    assert!(matches!(err, StoreError::Http(_)));
}
