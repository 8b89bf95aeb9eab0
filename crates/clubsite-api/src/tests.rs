//! Router tests driven in process with `oneshot`.

use std::sync::{Arc, Mutex};

use argon2::{Argon2, PasswordHasher, password_hash::SaltString};
use axum::{
  body::Body,
  http::{Request, StatusCode, header},
  response::Response,
};
use base64::{Engine as _, engine::general_purpose::STANDARD as B64};
use chrono::{Duration, Utc};
use clubsite_core::{
  relation::RecordKind,
  store::RecordStore,
  task::{Task, TaskQueue},
};
use clubsite_store_sqlite::SqliteStore;
use rand_core::OsRng;
use serde_json::{Value, json};
use tower::ServiceExt as _;

use crate::{AppState, auth::AuthConfig, router};

// ─── Harness ─────────────────────────────────────────────────────────────────

/// Keeps sent tasks instead of running them.
#[derive(Default)]
struct RecordingQueue(Mutex<Vec<Task>>);

impl TaskQueue for RecordingQueue {
  fn send(&self, task: Task) { self.0.lock().unwrap().push(task); }
}

struct Harness {
  state: AppState<SqliteStore>,
  queue: Arc<RecordingQueue>,
}

impl Harness {
  async fn new() -> Self {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
      .hash_password(b"secret", &salt)
      .unwrap()
      .to_string();
    let queue = Arc::new(RecordingQueue::default());
    let state = AppState {
      store: Arc::new(store),
      auth:  Arc::new(AuthConfig::new("admin", hash).unwrap()),
      tasks: queue.clone(),
    };
    Self { state, queue }
  }

  fn tasks(&self) -> Vec<Task> { self.queue.0.lock().unwrap().clone() }

  async fn send(
    &self,
    method: &str,
    uri: &str,
    admin: bool,
    body: Option<Value>,
  ) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if admin {
      let creds = B64.encode("admin:secret");
      builder = builder.header(header::AUTHORIZATION, format!("Basic {creds}"));
    }
    let body = match body {
      Some(v) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(v.to_string())
      }
      None => Body::empty(),
    };
    router(self.state.clone())
      .oneshot(builder.body(body).unwrap())
      .await
      .unwrap()
  }

  async fn get(&self, uri: &str) -> Response { self.send("GET", uri, false, None).await }

  async fn admin(&self, method: &str, uri: &str, body: Option<Value>) -> Response {
    self.send(method, uri, true, body).await
  }
}

async fn json_body(resp: Response) -> Value {
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
    .await
    .unwrap();
  serde_json::from_slice(&bytes).unwrap()
}

fn affiliate() -> Value {
  json!({ "name": "NC State", "logo": null, "website": "https://ncsu.edu" })
}

fn event(days_from_now: i64) -> Value {
  let start = Utc::now() + Duration::days(days_from_now);
  json!({
    "type": "WS",
    "topics": ["Rust"],
    "start": start,
    "end": start + Duration::hours(2),
    "calendar_link": null,
    "meeting_link": null,
    "meeting_address": null
  })
}

fn partner_form(contacts: Value) -> Value {
  json!({
    "first_name": "Ada",
    "last_name": "Lovelace",
    "affiliation": "Analytical Engines Inc.",
    "thoughts": null,
    "commercial": true,
    "industry": "Computing",
    "min_org_size": 10,
    "max_org_size": 100,
    "funding": true,
    "initiatives": null,
    "contacts": contacts
  })
}

// ─── Auth ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn writes_require_admin() {
  let h = Harness::new().await;
  let resp = h.send("POST", "/affiliates", false, Some(affiliate())).await;
  assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
  assert!(resp.headers().contains_key(header::WWW_AUTHENTICATE));
}

#[tokio::test]
async fn contact_form_listing_requires_admin() {
  let h = Harness::new().await;
  assert_eq!(h.get("/contact/partner").await.status(), StatusCode::UNAUTHORIZED);
}

// ─── Collections ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_then_read_affiliate() {
  let h = Harness::new().await;
  let resp = h.admin("POST", "/affiliates", Some(affiliate())).await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  let created = json_body(resp).await;
  assert_eq!(created["name"], "NC State");

  let id = created["id"].as_str().unwrap();
  let resp = h.get(&format!("/affiliates/{id}")).await;
  assert_eq!(resp.status(), StatusCode::OK);

  let list = json_body(h.get("/affiliates").await).await;
  assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn invalid_record_is_400_with_message() {
  let h = Harness::new().await;
  let resp = h
    .admin(
      "POST",
      "/announcements",
      Some(json!({ "title": "Hello", "body": [] })),
    )
    .await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let body = json_body(resp).await;
  assert!(body["error"].as_str().unwrap().contains("failed JSON schema check"));
}

#[tokio::test]
async fn missing_field_is_400() {
  let h = Harness::new().await;
  let resp = h.admin("POST", "/affiliates", Some(json!({ "name": "x" }))).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn wrong_kind_is_404() {
  let h = Harness::new().await;
  let created = json_body(h.admin("POST", "/affiliates", Some(affiliate())).await).await;
  let id = created["id"].as_str().unwrap();
  assert_eq!(h.get(&format!("/projects/{id}")).await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_and_delete() {
  let h = Harness::new().await;
  let created = json_body(h.admin("POST", "/affiliates", Some(affiliate())).await).await;
  let id = created["id"].as_str().unwrap();

  let mut changed = affiliate();
  changed["name"] = json!("NCSU");
  let resp = h.admin("PUT", &format!("/affiliates/{id}"), Some(changed)).await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(json_body(resp).await["name"], "NCSU");

  let resp = h.admin("DELETE", &format!("/affiliates/{id}"), None).await;
  assert_eq!(resp.status(), StatusCode::NO_CONTENT);
  assert_eq!(h.get(&format!("/affiliates/{id}")).await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn announcements_are_newest_first() {
  let h = Harness::new().await;
  for title in ["First", "Second"] {
    let body = json!({ "title": title, "body": [{ "element": "hr" }] });
    h.admin("POST", "/announcements", Some(body)).await;
  }
  let list = json_body(h.get("/announcements").await).await;
  assert_eq!(list[0]["title"], "Second");
  assert_eq!(list[1]["title"], "First");
}

// ─── Events and tasks ────────────────────────────────────────────────────────

#[tokio::test]
async fn creating_an_event_sends_a_task() {
  let h = Harness::new().await;
  let resp = h.admin("POST", "/events", Some(event(3))).await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  assert!(matches!(h.tasks().as_slice(), [Task::EventCreated { .. }]));
}

#[tokio::test]
async fn rejected_event_sends_nothing() {
  let h = Harness::new().await;
  let mut bad = event(3);
  bad["end"] = bad["start"].clone();
  let resp = h.admin("POST", "/events", Some(bad)).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  assert!(h.tasks().is_empty());
}

#[tokio::test]
async fn rescheduling_sends_a_task_but_other_edits_do_not() {
  let h = Harness::new().await;
  let original = event(3);
  let created = json_body(h.admin("POST", "/events", Some(original.clone())).await).await;
  let uri = format!("/events/{}", created["id"].as_str().unwrap());

  let mut relinked = original.clone();
  relinked["meeting_link"] = json!("https://meet.example.com/club");
  assert_eq!(h.admin("PUT", &uri, Some(relinked)).await.status(), StatusCode::OK);
  assert_eq!(h.tasks().len(), 1);

  let resp = h.admin("PUT", &uri, Some(event(5))).await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert!(matches!(h.tasks().last(), Some(Task::EventRescheduled { .. })));
}

#[tokio::test]
async fn upcoming_filter_and_start_order() {
  let h = Harness::new().await;
  for days in [5, -5, 1] {
    h.admin("POST", "/events", Some(event(days))).await;
  }
  let all = json_body(h.get("/events").await).await;
  assert_eq!(all.as_array().unwrap().len(), 3);

  let upcoming = json_body(h.get("/events?upcoming=true").await).await;
  let upcoming = upcoming.as_array().unwrap();
  assert_eq!(upcoming.len(), 2);
  assert!(upcoming[0]["start"].as_str() < upcoming[1]["start"].as_str());
  assert_eq!(upcoming[0]["contacts"], json!([]));
}

#[tokio::test]
async fn creating_a_project_sends_a_task() {
  let h = Harness::new().await;
  let project = json!({
    "name": "Club Site",
    "authors": ["Ada"],
    "description": "Our website.",
    "image": null,
    "url": null,
    "status": "IP"
  });
  let resp = h.admin("POST", "/projects", Some(project)).await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  assert!(matches!(h.tasks().as_slice(), [Task::ProjectCreated { .. }]));
}

// ─── Contact forms ───────────────────────────────────────────────────────────

#[tokio::test]
async fn submit_form_with_contacts() {
  let h = Harness::new().await;
  let contacts = json!([
    { "type": "OT", "value": "(919)-555-0100", "preferred": true },
    { "type": "EM", "value": "ada@example.com" }
  ]);
  let resp = h.send("POST", "/contact/partner", false, Some(partner_form(contacts))).await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  let body = json_body(resp).await;
  let contacts = body["contacts"].as_array().unwrap();
  assert_eq!(contacts.len(), 2);
  assert_eq!(contacts[0]["type"], "PH");
}

#[tokio::test]
async fn bad_contact_rejects_the_whole_submission() {
  let h = Harness::new().await;
  let contacts = json!([{ "type": "EM", "value": "not-an-email" }]);
  let resp = h.send("POST", "/contact/partner", false, Some(partner_form(contacts))).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

  let forms = h.state.store.list(RecordKind::PartnerForm).await.unwrap();
  assert!(forms.is_empty());
}

#[tokio::test]
async fn inverted_org_size_is_rejected() {
  let h = Harness::new().await;
  let mut form = partner_form(json!([]));
  form["min_org_size"] = json!(1000);
  let resp = h.send("POST", "/contact/partner", false, Some(form)).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn public_cannot_mark_a_form_reviewed() {
  let h = Harness::new().await;
  let mut form = partner_form(json!([]));
  form["reviewed"] = json!(true);
  let body = json_body(h.send("POST", "/contact/partner", false, Some(form)).await).await;
  assert_eq!(body["reviewed"], false);
}

#[tokio::test]
async fn unknown_form_kind_is_rejected() {
  let h = Harness::new().await;
  let resp = h
    .send("POST", "/contact/sponsor", false, Some(partner_form(json!([]))))
    .await;
  assert!(resp.status().is_client_error());
}

#[tokio::test]
async fn comments_on_a_form() {
  let h = Harness::new().await;
  let form = json_body(
    h.send("POST", "/contact/partner", false, Some(partner_form(json!([])))).await,
  )
  .await;
  let uri = format!("/contact/partner/{}/comments", form["id"].as_str().unwrap());

  let comment = json!({ "first_name": "Grace", "last_name": "Hopper", "content": "Call back." });
  let resp = h.admin("POST", &uri, Some(comment)).await;
  assert_eq!(resp.status(), StatusCode::CREATED);

  let list = json_body(h.admin("GET", &uri, None).await).await;
  assert_eq!(list.as_array().unwrap().len(), 1);
  assert_eq!(list[0]["content"], "Call back.");
}

#[tokio::test]
async fn comment_path_must_match_the_form_kind() {
  let h = Harness::new().await;
  let form = json_body(
    h.send("POST", "/contact/partner", false, Some(partner_form(json!([])))).await,
  )
  .await;
  let uri = format!("/contact/mentor/{}/comments", form["id"].as_str().unwrap());
  assert_eq!(h.admin("GET", &uri, None).await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn contact_info_cannot_attach_to_an_affiliate() {
  let h = Harness::new().await;
  let target = json_body(h.admin("POST", "/affiliates", Some(affiliate())).await).await;
  let info = json!({
    "type": "EM",
    "preferred": false,
    "value": "club@example.com",
    "target": target["id"]
  });
  let resp = h.admin("POST", "/contact-infos", Some(info)).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn contact_info_attaches_to_an_event() {
  let h = Harness::new().await;
  let ev = json_body(h.admin("POST", "/events", Some(event(2))).await).await;
  let info = json!({
    "type": "OT",
    "value": "club@example.com",
    "target": ev["id"]
  });
  let resp = h.admin("POST", "/contact-infos", Some(info)).await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  assert_eq!(json_body(resp).await["type"], "EM");

  let uri = format!("/events/{}", ev["id"].as_str().unwrap());
  let fetched = json_body(h.get(&uri).await).await;
  assert_eq!(fetched["contacts"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn deleting_a_form_removes_its_contacts() {
  let h = Harness::new().await;
  let contacts = json!([{ "type": "EM", "value": "ada@example.com" }]);
  let form = json_body(
    h.send("POST", "/contact/partner", false, Some(partner_form(contacts))).await,
  )
  .await;
  let uri = format!("/contact/partner/{}", form["id"].as_str().unwrap());
  assert_eq!(h.admin("DELETE", &uri, None).await.status(), StatusCode::NO_CONTENT);

  let infos = h.state.store.list(RecordKind::ContactInfo).await.unwrap();
  assert!(infos.is_empty());
}
