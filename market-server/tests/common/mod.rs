//! Shared helpers for API tests: a throwaway server state and request builders

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use http::{Request, Response, header};
use market_server::{AppState, Config, create_router};
use serde_json::Value;
use tempfile::TempDir;

pub const BOUNDARY: &str = "market-test-boundary";

pub struct TestApp {
    pub router: Router,
    pub config: Config,
    _tmp: TempDir,
}

/// Fresh database and image stores under a temp dir
pub async fn spawn_app() -> TestApp {
    let tmp = tempfile::tempdir().unwrap();
    let config = Config {
        database_path: tmp.path().join("db").join("mercari.sqlite3"),
        db_max_connections: 1,
        images_dir: tmp.path().join("images"),
        draft_images_dir: tmp.path().join("draft_images"),
        ..Config::default()
    };
    let state = AppState::new(&config).await.unwrap();
    TestApp {
        router: create_router(state),
        config,
        _tmp: tmp,
    }
}

pub enum Part<'a> {
    Text(&'a str, &'a str),
    File(&'a str, &'a str, &'a [u8]),
}

pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                        .as_bytes(),
                );
            }
            Part::File(name, filename, data) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                         Content-Type: image/jpeg\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(data);
                body.extend_from_slice(b"\r\n");
            }
        }
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn multipart_request(method: &str, uri: &str, parts: &[Part<'_>]) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap()
}

pub fn form_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
