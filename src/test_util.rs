//! Helpers for driving the router in handler tests.

use std::sync::Arc;

use axum::{
    async_trait,
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use crate::app::build_app;
use crate::state::AppState;
use crate::uploads::classifier::Classifier;
use crate::users::repo::{RepoError, UserRepository};
use crate::users::repo_types::{NewUser, User};

pub struct TestApp {
    pub router: Router,
    pub upload_dir: TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        let upload_dir = tempfile::tempdir().expect("tempdir");
        let state = AppState::fake(upload_dir.path());
        Self {
            router: build_app(state),
            upload_dir,
        }
    }

    pub fn with_users(users: Arc<dyn UserRepository>) -> Self {
        let upload_dir = tempfile::tempdir().expect("tempdir");
        let mut state = AppState::fake(upload_dir.path());
        state.users = users;
        Self {
            router: build_app(state),
            upload_dir,
        }
    }

    pub fn with_classifier(classifier: Arc<dyn Classifier>) -> Self {
        let upload_dir = tempfile::tempdir().expect("tempdir");
        let mut state = AppState::fake(upload_dir.path());
        state.classifier = classifier;
        Self {
            router: build_app(state),
            upload_dir,
        }
    }
}

/// Repository whose every call fails like an unreachable database.
pub struct FailingUserRepo;

#[async_trait]
impl UserRepository for FailingUserRepo {
    async fn find_by_email(&self, _email: &str) -> Result<Option<User>, RepoError> {
        Err(RepoError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn insert(&self, _user: NewUser) -> Result<User, RepoError> {
        Err(RepoError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn list_all(&self) -> Result<Vec<User>, RepoError> {
        Err(RepoError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn count(&self) -> Result<i64, RepoError> {
        Err(RepoError::Database(sqlx::Error::PoolTimedOut))
    }
}

/// Repository where another request wins the insert: the lookup sees no
/// row, then the unique index rejects the insert.
pub struct LostRaceUserRepo;

#[async_trait]
impl UserRepository for LostRaceUserRepo {
    async fn find_by_email(&self, _email: &str) -> Result<Option<User>, RepoError> {
        Ok(None)
    }

    async fn insert(&self, _user: NewUser) -> Result<User, RepoError> {
        Err(RepoError::DuplicateEmail)
    }

    async fn list_all(&self) -> Result<Vec<User>, RepoError> {
        Ok(Vec::new())
    }

    async fn count(&self) -> Result<i64, RepoError> {
        Ok(0)
    }
}

/// Sends `req` and returns the status plus the body parsed as JSON
/// (`Value::Null` when the body is empty or not JSON).
pub async fn send(router: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let res = router.clone().oneshot(req).await.expect("router is infallible");
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX)
        .await
        .expect("read body");
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

pub async fn get(router: &Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::get(uri).body(Body::empty()).unwrap();
    send(router, req).await
}

pub async fn post_json(router: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    post_raw(router, uri, "application/json", body.to_string().into_bytes()).await
}

pub async fn post_raw(
    router: &Router,
    uri: &str,
    content_type: &str,
    body: Vec<u8>,
) -> (StatusCode, Value) {
    let req = Request::post(uri)
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(body))
        .unwrap();
    send(router, req).await
}

/// Single-file multipart body; returns `(content_type, body)`.
pub fn multipart_body(field: &str, file_name: &str, data: &[u8]) -> (String, Vec<u8>) {
    const BOUNDARY: &str = "har-test-boundary";
    let mut body = format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n\
         Content-Type: application/octet-stream\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    (format!("multipart/form-data; boundary={BOUNDARY}"), body)
}

/// Multipart body with one plain (non-file) field.
pub fn multipart_text_field(field: &str, value: &str) -> (String, Vec<u8>) {
    const BOUNDARY: &str = "har-test-boundary";
    let body = format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"{field}\"\r\n\r\n\
         {value}\r\n--{BOUNDARY}--\r\n"
    )
    .into_bytes();
    (format!("multipart/form-data; boundary={BOUNDARY}"), body)
}

/// A small valid PNG.
pub fn png_bytes() -> Vec<u8> {
    let img = image::RgbImage::from_pixel(4, 4, image::Rgb([200, 40, 40]));
    let mut out = std::io::Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut out, image::ImageOutputFormat::Png)
        .expect("encode png");
    out.into_inner()
}
