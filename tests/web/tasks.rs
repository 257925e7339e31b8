use crate::common::*;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;
use taskboard_core::config::TaskboardConfig;
use taskboard_core::database::InMemoryStore;
use taskboard_core::models::{UserRole, UserStatus};
use taskboard_core::web::{router, AppState, CurrentUser};
use tower::ServiceExt;
use uuid::Uuid;

fn app(store: Arc<InMemoryStore>) -> Router {
    router(AppState::new(store, &TaskboardConfig::default()))
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    user: Option<CurrentUser>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header("content-type", "application/json");
    }
    let mut request = builder
        .body(body.map_or_else(Body::empty, |b| Body::from(b.to_string())))
        .unwrap();
    if let Some(user) = user {
        request.extensions_mut().insert(user);
    }

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn admin() -> CurrentUser {
    CurrentUser::new(Uuid::new_v4(), UserRole::Admin)
}

fn member() -> CurrentUser {
    CurrentUser::new(Uuid::new_v4(), UserRole::User)
}

#[tokio::test]
async fn test_admin_listing_envelope() {
    let store = Arc::new(InMemoryStore::new());
    seed_five_tasks(store.as_ref()).await;

    let (status, body) = send(
        app(store),
        Method::GET,
        "/v1/tasks?page=2&perPage=2&sort=-createdAt",
        Some(admin()),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    let titles: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|doc| doc["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["T3", "T2"]);
    assert_eq!(
        body["meta"],
        json!({
            "totalDocs": 5,
            "totalPages": 3,
            "page": 2,
            "limit": 2,
            "hasNextPage": true,
            "hasPrevPage": true,
            "nextPage": 3,
            "prevPage": 1
        })
    );
}

#[tokio::test]
async fn test_empty_listing_is_success() {
    let (status, body) = send(
        app(Arc::new(InMemoryStore::new())),
        Method::GET,
        "/v1/tasks?search=nothing",
        Some(admin()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
    assert_eq!(body["meta"]["totalDocs"], json!(0));
}

#[tokio::test]
async fn test_listing_requires_admin_and_identity() {
    let store = Arc::new(InMemoryStore::new());

    let (status, body) = send(app(store.clone()), Method::GET, "/v1/tasks", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], json!("UNAUTHORIZED"));

    let (status, body) = send(app(store), Method::GET, "/v1/tasks", Some(member()), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], json!("FORBIDDEN"));
}

#[tokio::test]
async fn test_create_then_fetch() {
    let store = Arc::new(InMemoryStore::new());
    let user = member();

    let (status, body) = send(
        app(store.clone()),
        Method::POST,
        "/v1/tasks",
        Some(user),
        Some(json!({"title": "  Project Alpha ", "description": "Kickoff notes"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("Task created successfully"));
    assert_eq!(body["data"]["title"], json!("Project Alpha"));
    assert_eq!(body["data"]["owner"], json!(user.id));
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        app(store),
        Method::GET,
        &format!("/v1/tasks/{id}"),
        Some(member()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], json!(id));
}

#[tokio::test]
async fn test_create_validation_errors() {
    let store = Arc::new(InMemoryStore::new());

    let (status, body) = send(
        app(store.clone()),
        Method::POST,
        "/v1/tasks",
        Some(member()),
        Some(json!({"title": "ab", "description": "Kickoff notes"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], json!("BAD_REQUEST"));

    let (status, _) = send(
        app(store.clone()),
        Method::POST,
        "/v1/tasks",
        Some(member()),
        Some(json!({"title": "abc", "description": "abc", "owner": Uuid::new_v4()})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(store.is_empty("tasks"));
}

#[tokio::test]
async fn test_missing_and_malformed_ids() {
    let store = Arc::new(InMemoryStore::new());

    let (status, body) = send(
        app(store.clone()),
        Method::GET,
        &format!("/v1/tasks/{}", Uuid::new_v4()),
        Some(member()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], json!("NOT_FOUND"));

    let (status, body) = send(app(store), Method::GET, "/v1/tasks/not-a-uuid", Some(member()), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], json!("INVALID_UUID"));
}

#[tokio::test]
async fn test_only_owner_may_update_or_delete() {
    let store = Arc::new(InMemoryStore::new());
    let owner = member();
    let task = TaskBuilder::new("Write docs")
        .owner(owner.id)
        .insert(store.as_ref())
        .await;
    let uri = format!("/v1/tasks/{}", task.id);

    let (status, _) = send(
        app(store.clone()),
        Method::PUT,
        &uri,
        Some(member()),
        Some(json!({"isCompleted": true})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(
        app(store.clone()),
        Method::PUT,
        &uri,
        Some(owner),
        Some(json!({"isCompleted": true})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["isCompleted"], json!(true));

    let (status, _) = send(app(store.clone()), Method::DELETE, &uri, Some(member()), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(app(store.clone()), Method::DELETE, &uri, Some(owner), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body["data"]["deletedAt"].is_null());

    let (status, _) = send(app(store), Method::DELETE, &uri, Some(owner), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_share_then_list_shared() {
    let store = Arc::new(InMemoryStore::new());
    let owner_user =
        insert_user(store.as_ref(), "owner", UserRole::User, UserStatus::Active).await;
    let reader_user =
        insert_user(store.as_ref(), "reader", UserRole::User, UserStatus::Active).await;
    let owner = CurrentUser::new(owner_user.id, UserRole::User);
    let reader = CurrentUser::new(reader_user.id, UserRole::User);
    let task = TaskBuilder::new("Write docs")
        .owner(owner.id)
        .insert(store.as_ref())
        .await;
    let share_uri = format!("/v1/tasks/{}/share", task.id);

    let (status, _) = send(app(store.clone()), Method::PUT, &share_uri, Some(reader), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(app(store.clone()), Method::PUT, &share_uri, Some(owner), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["readers"], json!([reader.id]));

    let (status, body) = send(
        app(store.clone()),
        Method::GET,
        "/v1/tasks/shared/me",
        Some(reader),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["totalDocs"], json!(1));
    assert_eq!(body["data"][0]["id"], json!(task.id));

    let (_, body) = send(app(store), Method::GET, "/v1/tasks/shared/me", Some(owner), None).await;
    assert_eq!(body["meta"]["totalDocs"], json!(0));
}

#[tokio::test]
async fn test_comment_on_task() {
    let store = Arc::new(InMemoryStore::new());
    let task = TaskBuilder::new("Write docs").insert(store.as_ref()).await;
    let uri = format!("/v1/tasks/{}/comment", task.id);

    let (status, _) = send(
        app(store.clone()),
        Method::PUT,
        &uri,
        Some(member()),
        Some(json!({"content": "x"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        app(store.clone()),
        Method::PUT,
        &uri,
        Some(member()),
        Some(json!({"content": "looks good"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("Comment created successfully"));
    assert_eq!(body["data"]["comments"].as_array().unwrap().len(), 1);
    assert_eq!(store.len("comments"), 1);
}

#[tokio::test]
async fn test_listing_store_failure_is_database_error() {
    let app = router(AppState::new(
        Arc::new(FailingStore),
        &TaskboardConfig::default(),
    ));

    let (status, body) = send(app, Method::GET, "/v1/tasks", Some(admin()), None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["code"], json!("DATABASE_ERROR"));
    assert_eq!(body["error"]["message"], json!("Database operation failed"));
    assert!(body.get("data").is_none());
}
