//! ConsoleClient against an in-process backend.

use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get};
use axum::{Json, Router};
use recorder_console::api::ConsoleClient;
use recorder_console::config::ConsoleSettings;
use recorder_console::domain::{ConfigDocument, HookAction, StreamerEntity, StudioTemplate};
use recorder_console::Error;
use serde_json::{Value, json};

#[derive(Debug, Clone)]
struct Recorded {
    method: String,
    path: String,
    auth: Option<String>,
    body: Option<Value>,
}

#[derive(Default)]
struct Backend {
    requests: Mutex<Vec<Recorded>>,
}

type Shared = Arc<Backend>;

impl Backend {
    fn record(&self, method: &str, path: impl Into<String>, headers: &HeaderMap, body: Option<Value>) {
        let auth = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.requests.lock().unwrap().push(Recorded {
            method: method.to_string(),
            path: path.into(),
            auth,
            body,
        });
    }

    fn last(&self) -> Recorded {
        self.requests.lock().unwrap().last().cloned().expect("no request recorded")
    }

    fn count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

async fn get_configuration(State(backend): State<Shared>, headers: HeaderMap) -> Json<Value> {
    backend.record("GET", "/v1/configuration", &headers, None);
    Json(json!({"lines": "AUTO", "user": {"bili_cookie": "cookies.json"}}))
}

async fn put_configuration(State(backend): State<Shared>, headers: HeaderMap, Json(body): Json<Value>) -> StatusCode {
    backend.record("PUT", "/v1/configuration", &headers, Some(body));
    StatusCode::OK
}

async fn list_streamers(State(backend): State<Shared>, headers: HeaderMap) -> Json<Value> {
    backend.record("GET", "/v1/streamers", &headers, None);
    Json(json!([
        {
            "id": 1,
            "url": "https://live.bilibili.com/1",
            "remark": "bili",
            "status": "Working",
            "postprocessor": ["rm"],
            "override": {"bili_qn": 10000}
        },
        {"id": 2, "url": "https://www.douyu.com/2", "remark": "douyu", "status": "Paused"}
    ]))
}

async fn create_streamer(State(backend): State<Shared>, headers: HeaderMap, Json(body): Json<Value>) -> Json<Value> {
    backend.record("POST", "/v1/streamers", &headers, Some(body.clone()));
    let mut created = body;
    created["id"] = json!(42);
    Json(created)
}

async fn update_streamer(State(backend): State<Shared>, headers: HeaderMap, Json(body): Json<Value>) -> StatusCode {
    backend.record("PUT", "/v1/streamers", &headers, Some(body));
    StatusCode::OK
}

async fn delete_streamer(State(backend): State<Shared>, headers: HeaderMap, Path(id): Path<i64>) -> Response {
    backend.record("DELETE", format!("/v1/streamers/{id}"), &headers, None);
    if id == 500 {
        (StatusCode::INTERNAL_SERVER_ERROR, "database is locked").into_response()
    } else {
        StatusCode::OK.into_response()
    }
}

async fn list_templates(State(backend): State<Shared>, headers: HeaderMap) -> Json<Value> {
    backend.record("GET", "/v1/upload/streamers", &headers, None);
    Json(json!([{"id": 3, "template_name": "default", "tags": ["live"], "tid": 171}]))
}

async fn save_template(State(backend): State<Shared>, headers: HeaderMap, Json(body): Json<Value>) -> Json<Value> {
    backend.record("POST", "/v1/upload/streamers", &headers, Some(body.clone()));
    let mut saved = body;
    if saved.get("id").is_none() {
        saved["id"] = json!(7);
    }
    Json(saved)
}

async fn get_template(State(backend): State<Shared>, headers: HeaderMap, Path(id): Path<i64>) -> Response {
    backend.record("GET", format!("/v1/upload/streamers/{id}"), &headers, None);
    if id == 404 {
        (StatusCode::NOT_FOUND, Json(json!({"message": "template not found"}))).into_response()
    } else {
        Json(json!({"id": id, "template_name": "default", "tags": ["live"], "tid": 171})).into_response()
    }
}

async fn delete_template(State(backend): State<Shared>, headers: HeaderMap, Path(id): Path<i64>) -> StatusCode {
    backend.record("DELETE", format!("/v1/upload/streamers/{id}"), &headers, None);
    StatusCode::OK
}

async fn spawn_backend() -> (String, Shared) {
    let backend = Shared::default();
    let app = Router::new()
        .route("/v1/configuration", get(get_configuration).put(put_configuration))
        .route(
            "/v1/streamers",
            get(list_streamers).post(create_streamer).put(update_streamer),
        )
        .route("/v1/streamers/{id}", delete(delete_streamer))
        .route("/v1/upload/streamers", get(list_templates).post(save_template))
        .route("/v1/upload/streamers/{id}", get(get_template).delete(delete_template))
        .with_state(backend.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), backend)
}

fn client(base_url: &str, auth: Option<&str>) -> ConsoleClient {
    let settings = ConsoleSettings::from_lookup(|key| match key {
        "CONSOLE_API_SERVER" => Some(base_url.to_string()),
        "CONSOLE_AUTH" => auth.map(str::to_string),
        _ => None,
    })
    .unwrap();
    ConsoleClient::new(&settings)
}

#[tokio::test]
async fn configuration_round_trip() {
    let (url, backend) = spawn_backend().await;
    let client = client(&url, Some("dXNlcjpwYXNz"));

    let mut document = client.get_configuration().await.unwrap();
    assert_eq!(document.get("user.bili_cookie"), Some(&json!("cookies.json")));
    assert_eq!(backend.last().auth.as_deref(), Some("Basic dXNlcjpwYXNz"));

    document.set("user.douyin_cookie", "ttwid=1").unwrap();
    client.put_configuration(&document).await.unwrap();
    let put = backend.last();
    assert_eq!(put.method, "PUT");
    assert_eq!(
        put.body,
        Some(json!({"lines": "AUTO", "user": {"bili_cookie": "cookies.json", "douyin_cookie": "ttwid=1"}}))
    );
}

#[tokio::test]
async fn no_auth_header_without_token() {
    let (url, backend) = spawn_backend().await;
    client(&url, None).get_configuration().await.unwrap();
    assert_eq!(backend.last().auth, None);
}

#[tokio::test]
async fn list_streamers_decodes_wire_shape() {
    let (url, _backend) = spawn_backend().await;
    let streamers = client(&url, None).list_streamers().await.unwrap();
    assert_eq!(streamers.len(), 2);
    assert_eq!(streamers[0].postprocessor, Some(vec![HookAction::rm()]));
    assert_eq!(streamers[0].override_map()["bili_qn"], json!(10000));
    assert_eq!(streamers[1].status.as_ref().map(|s| s.as_str()), Some("Paused"));
}

#[tokio::test]
async fn create_streamer_sends_normalized_entity() {
    let (url, backend) = spawn_backend().await;
    let mut entity = StreamerEntity::new(" https://www.douyu.com/123 ", " douyu ");
    entity.override_config = Some(serde_json::from_value(json!({"douyu_rate": 0})).unwrap());

    let created = client(&url, None).create_streamer(&entity).await.unwrap();
    assert_eq!(created.id, Some(42));

    assert_eq!(
        backend.last().body,
        Some(json!({
            "url": "https://www.douyu.com/123",
            "remark": "douyu",
            "postprocessor": ["rm"],
            "override": {"douyu_rate": 0}
        }))
    );
}

#[tokio::test]
async fn update_streamer_strips_status() {
    let (url, backend) = spawn_backend().await;
    let client = client(&url, None);
    let streamer = client.list_streamers().await.unwrap().remove(0);
    assert!(streamer.status.is_some());

    client.update_streamer(&streamer).await.unwrap();
    let body = backend.last().body.unwrap();
    assert!(body.get("status").is_none());
    assert_eq!(body["id"], json!(1));
    assert_eq!(body["override"], json!({"bili_qn": 10000}));
}

#[tokio::test]
async fn invalid_entities_never_reach_backend() {
    let (url, backend) = spawn_backend().await;
    let client = client(&url, None);

    let err = client
        .create_streamer(&StreamerEntity::new("", "remark"))
        .await
        .unwrap_err();
    assert_eq!(err.field_errors().unwrap()[0].field, "url");

    let err = client
        .update_streamer(&StreamerEntity::new("https://www.huya.com/1", "huya"))
        .await
        .unwrap_err();
    assert_eq!(err.field_errors().unwrap()[0].field, "id");

    let err = client
        .create_template(&StudioTemplate::new("", "cookies.json", 171))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));

    assert_eq!(backend.count(), 0);
}

#[tokio::test]
async fn delete_uses_id_suffix() {
    let (url, backend) = spawn_backend().await;
    let client = client(&url, None);

    client.delete_streamer(5).await.unwrap();
    assert_eq!(backend.last().path, "/v1/streamers/5");

    client.delete_template(3).await.unwrap();
    let last = backend.last();
    assert_eq!(last.method, "DELETE");
    assert_eq!(last.path, "/v1/upload/streamers/3");
}

#[tokio::test]
async fn templates_crud() {
    let (url, backend) = spawn_backend().await;
    let client = client(&url, None);

    let templates = client.list_templates().await.unwrap();
    assert_eq!(templates[0].template_name, "default");

    let fetched = client.get_template(3).await.unwrap();
    assert_eq!(fetched.id, Some(3));

    let template = StudioTemplate {
        tags: vec!["live".into()],
        ..StudioTemplate::new("replays", "cookies.json", 171)
    };
    let created = client.create_template(&template).await.unwrap();
    assert_eq!(created.id, Some(7));

    let mut updated = created.clone();
    updated.title = "new title".into();
    client.update_template(&updated).await.unwrap();
    let last = backend.last();
    assert_eq!(last.method, "POST");
    assert_eq!(last.body.unwrap()["id"], json!(7));
}

#[tokio::test]
async fn backend_errors_carry_message() {
    let (url, _backend) = spawn_backend().await;
    let client = client(&url, None);

    match client.get_template(404).await.unwrap_err() {
        Error::Api { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "template not found");
        }
        other => panic!("unexpected error {other:?}"),
    }

    match client.delete_streamer(500).await.unwrap_err() {
        Error::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "database is locked");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[tokio::test]
async fn put_configuration_accepts_empty_document() {
    let (url, backend) = spawn_backend().await;
    client(&url, None)
        .put_configuration(&ConfigDocument::new())
        .await
        .unwrap();
    assert_eq!(backend.last().body, Some(json!({})));
}
