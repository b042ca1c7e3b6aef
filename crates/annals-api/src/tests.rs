use std::sync::Arc;

use annals_core::{
  bootstrap::{PageConfig, bootstrap},
  event::NewEvent,
  setting::Settings,
  store::RecordStore,
  topic::TopicContent,
};
use annals_store_sqlite::SqliteStore;
use annals_sync::{GistClient, RemoteConfig};
use axum::{
  Router,
  body::Body,
  http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use tower::ServiceExt as _;

use super::*;

/// Nothing listens on port 1, so any remote call fails fast.
const UNREACHABLE: &str = "http://127.0.0.1:1";

async fn make_state() -> (AppState<SqliteStore>, tempfile::TempDir) {
  let store = SqliteStore::open_in_memory().await.unwrap();
  let config = PageConfig::default();
  bootstrap(&store, &config).await.unwrap();
  let remote = GistClient::new(&RemoteConfig { api_base: UNREACHABLE.into() }).unwrap();
  let dir = tempfile::tempdir().unwrap();
  let state = AppState::new(Arc::new(store), config, remote, dir.path().to_path_buf());
  (state, dir)
}

async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
  let builder = Request::builder().method(method).uri(uri);
  let req = match body {
    Some(b) => builder
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from(b.to_string()))
      .unwrap(),
    None => builder.body(Body::empty()).unwrap(),
  };
  let resp = app.oneshot(req).await.unwrap();
  let status = resp.status();
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
  (status, value)
}

// ── Events ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_event_returns_201_and_normalises_date() {
  let (state, _dir) = make_state().await;
  let (status, body) = send(
    router(state),
    "POST",
    "/events",
    Some(json!({ "date": "2024-03-05", "description": "meeting", "fileLink": ["", "https://a"] })),
  )
  .await;

  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(body["date"], "05-03-2024");
  assert_eq!(body["fileLink"], json!(["https://a"]));
  assert!(body["id"].is_i64());
}

#[tokio::test]
async fn create_event_without_description_is_422() {
  let (state, _dir) = make_state().await;
  let (status, body) =
    send(router(state), "POST", "/events", Some(json!({ "date": "05-03-2024" }))).await;
  assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
  assert!(body["error"].as_str().unwrap().contains("description"));
}

#[tokio::test]
async fn list_events_sorted_by_date_by_default() {
  let (state, _dir) = make_state().await;
  for date in ["06-03-2024", "04-03-2024", "05-03-2024"] {
    state.store.add_event(NewEvent::new(date, date)).await.unwrap();
  }

  let (_, body) = send(router(state.clone()), "GET", "/events", None).await;
  let dates: Vec<&str> = body.as_array().unwrap().iter().map(|e| e["date"].as_str().unwrap()).collect();
  assert_eq!(dates, ["04-03-2024", "05-03-2024", "06-03-2024"]);

  let (_, body) = send(router(state), "GET", "/events?sort=store", None).await;
  assert_eq!(body[0]["date"], "06-03-2024");
}

#[tokio::test]
async fn get_unknown_event_is_404() {
  let (state, _dir) = make_state().await;
  let (status, _) = send(router(state), "GET", "/events/42", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_event_id_is_400_with_json_error() {
  let (state, _dir) = make_state().await;
  let (status, body) = send(router(state.clone()), "GET", "/events/abc", None).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(body["error"].as_str().unwrap().contains("abc"));

  let (status, body) =
    send(router(state), "PUT", "/events/1.5", Some(json!({ "description": "x" }))).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(body["error"].is_string());
}

#[tokio::test]
async fn empty_list_survives_unreachable_remote() {
  let (state, _dir) = make_state().await;
  Settings::new(state.store.as_ref()).set_credentials("t", "abc").await.unwrap();

  let (status, body) = send(router(state), "GET", "/events", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body, json!([]));
}

#[tokio::test]
async fn update_event_keeps_date() {
  let (state, _dir) = make_state().await;
  let event = state.store.add_event(NewEvent::new("05-03-2024", "old")).await.unwrap();

  let (status, body) = send(
    router(state.clone()),
    "PUT",
    &format!("/events/{}", event.id),
    Some(json!({ "date": "01-01-1999", "description": "new", "tag": "قوي" })),
  )
  .await;

  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["date"], "05-03-2024");
  let stored = state.store.get_event(event.id).await.unwrap().unwrap();
  assert_eq!(stored.description, "new");
  assert_eq!(stored.tag, "قوي");
}

#[tokio::test]
async fn import_then_export_events() {
  let (state, _dir) = make_state().await;
  let payload = json!([
    { "date": "05-03-2024", "description": "a", "fileLink": "https://x" },
    { "date": "04-03-2024", "description": "b" }
  ]);

  let (status, body) = send(router(state.clone()), "PUT", "/events", Some(payload)).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["imported"], 2);

  let (status, body) = send(router(state), "GET", "/events/export", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body[0]["fileLink"], json!(["https://x"]));
  assert!(body[0].get("id").is_none());
}

#[tokio::test]
async fn export_of_empty_collection_is_422() {
  let (state, _dir) = make_state().await;
  let (status, _) = send(router(state), "GET", "/events/export", None).await;
  assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn event_by_normalised_date() {
  let (state, _dir) = make_state().await;
  let event = state.store.add_event(NewEvent::new("12-6-2023", "x")).await.unwrap();

  let (status, body) =
    send(router(state), "GET", "/events/by-date?date=12/06/2023", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["id"], event.id.0);
}

// ── Topics ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn topics_list_comes_from_seeded_settings() {
  let (state, _dir) = make_state().await;
  let (_, body) = send(router(state), "GET", "/topics", None).await;
  assert_eq!(body.as_array().unwrap().len(), 3);
  assert_eq!(body[0]["id"], "1");
}

#[tokio::test]
async fn unknown_topic_reads_as_empty() {
  let (state, _dir) = make_state().await;
  let (status, body) = send(router(state), "GET", "/topics/nope", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body, json!({ "id": "nope", "content": "" }));
}

#[tokio::test]
async fn saved_topic_mentions_resolve_to_events() {
  let (state, _dir) = make_state().await;
  let event = state.store.add_event(NewEvent::new("12-6-2023", "x")).await.unwrap();

  let (status, _) = send(
    router(state.clone()),
    "PUT",
    "/topics/1",
    Some(json!({ "content": "see 12-06-2023 and 01-01-1900" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);

  let (_, body) = send(router(state), "GET", "/topics/1/mentions", None).await;
  assert_eq!(body[0]["text"], "12-06-2023");
  assert_eq!(body[0]["event_id"], event.id.0);
  assert_eq!(body[1]["event_id"], Value::Null);
}

#[tokio::test]
async fn import_topic_contents_replaces_all() {
  let (state, _dir) = make_state().await;
  let payload = json!([{ "id": "9", "content": "only" }]);
  let (status, body) = send(router(state.clone()), "PUT", "/topics/contents", Some(payload)).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["imported"], 1);
  let contents = state.store.list_topic_contents().await.unwrap();
  assert_eq!(contents, vec![TopicContent::new("9", "only")]);
}

// ── Settings ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn settings_roundtrip_and_unknown_key() {
  let (state, _dir) = make_state().await;

  let (status, _) = send(router(state.clone()), "PUT", "/settings/tags", Some(json!([]))).await;
  assert_eq!(status, StatusCode::NO_CONTENT);
  let (_, body) = send(router(state.clone()), "GET", "/settings/tags", None).await;
  assert_eq!(body, json!([]));

  let (status, _) = send(router(state), "GET", "/settings/colour", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn put_setting_with_wrong_shape_is_422() {
  let (state, _dir) = make_state().await;
  let (status, _) =
    send(router(state), "PUT", "/settings/condemnations", Some(json!("flat"))).await;
  assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn add_duplicate_tag_is_409() {
  let (state, _dir) = make_state().await;
  let (status, body) =
    send(router(state.clone()), "POST", "/settings/tags/items", Some(json!({ "value": "جديد" })))
      .await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(body.as_array().unwrap().last().unwrap(), "جديد");

  let (status, _) =
    send(router(state), "POST", "/settings/tags/items", Some(json!({ "value": "جديد" }))).await;
  assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn add_topic_item_returns_descriptor() {
  let (state, _dir) = make_state().await;
  let (status, body) = send(
    router(state.clone()),
    "POST",
    "/settings/topicsList/items",
    Some(json!({ "value": "وثائق" })),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(body["name"], "وثائق");

  let topics = Settings::new(state.store.as_ref()).topics().await.unwrap();
  assert_eq!(topics.len(), 4);
}

#[tokio::test]
async fn remove_item_out_of_range_is_404() {
  let (state, _dir) = make_state().await;
  let (status, body) = send(router(state.clone()), "DELETE", "/settings/tags/items/0", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body.as_array().unwrap().len(), 4);

  let (status, _) = send(router(state), "DELETE", "/settings/tags/items/99", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_item_index_is_400_with_json_error() {
  let (state, _dir) = make_state().await;
  let (status, body) = send(router(state), "DELETE", "/settings/tags/items/x", None).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(body["error"].as_str().unwrap().contains("index"));
}

// ── Search and session ──────────────────────────────────────────────────────

#[tokio::test]
async fn search_is_remembered_in_session() {
  let (state, _dir) = make_state().await;
  state.store.add_event(NewEvent::new("05-03-2024", "اجتماع المدرسة")).await.unwrap();
  state.store.add_event(NewEvent::new("06-03-2024", "زيارة")).await.unwrap();

  let (_, body) = send(router(state.clone()), "GET", "/search?q=%D8%A7%D9%84%D9%85%D8%AF%D8%B1%D8%B3%D9%87", None).await;
  assert_eq!(body.as_array().unwrap().len(), 1);

  let (_, session) = send(router(state), "GET", "/session", None).await;
  assert_eq!(session["search"]["text"], "المدرسه");
}

#[tokio::test]
async fn session_put_replaces_state() {
  let (state, _dir) = make_state().await;
  let (status, _) = send(
    router(state.clone()),
    "PUT",
    "/session",
    Some(json!({ "selected_topic_id": "2", "topic_scroll_top": 40 })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);

  let (_, session) = send(router(state), "GET", "/session", None).await;
  assert_eq!(session["selected_topic_id"], "2");
  assert_eq!(session["search"]["text"], "");
}

// ── Sync ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn pull_without_gist_id_is_422() {
  let (state, _dir) = make_state().await;
  let (status, _) = send(router(state), "POST", "/sync/events/pull", None).await;
  assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn pull_from_unreachable_remote_is_502() {
  let (state, _dir) = make_state().await;
  Settings::new(state.store.as_ref()).set_credentials("t", "abc").await.unwrap();
  let (status, _) = send(router(state), "POST", "/sync/topics/pull", None).await;
  assert_eq!(status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn push_without_token_saves_locally() {
  let (state, dir) = make_state().await;
  state.store.add_event(NewEvent::new("05-03-2024", "x")).await.unwrap();

  let (status, body) = send(router(state), "POST", "/sync/events/push", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["status"], "saved_locally");
  assert_eq!(body["reason"]["kind"], "missing_token");
  assert!(dir.path().join("events.json").exists());
}

#[tokio::test]
async fn unknown_collection_is_404() {
  let (state, _dir) = make_state().await;
  let (status, _) = send(router(state), "POST", "/sync/people/push", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}
