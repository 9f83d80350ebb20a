#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, Bytes, to_bytes},
    http::{HeaderMap, Request, StatusCode},
};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE;
use tower::ServiceExt;

use qr_backend::{
    AppConfig, AppState, build_app,
    features::qrcode::MatrixEncoder,
    startup::StaticAssets,
};

pub fn assets(files: &[(&str, &str)]) -> StaticAssets {
    files
        .iter()
        .map(|(path, content)| (path.to_string(), content.as_bytes().to_vec()))
        .collect()
}

pub fn new_test_state(assets: StaticAssets) -> AppState {
    AppState::new(&AppConfig::default(), assets)
}

pub fn build_test_app() -> Router {
    build_app(new_test_state(assets(&[
        ("index.html", "<!doctype html><title>qr</title>"),
        ("style.css", "body{margin:0}"),
    ])))
}

pub fn build_app_with_encoder(encoder: Arc<dyn MatrixEncoder>) -> Router {
    build_app(new_test_state(StaticAssets::default()).with_encoder(encoder))
}

pub fn b64(text: &str) -> String {
    URL_SAFE.encode(text)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, HeaderMap, Bytes) {
    let resp = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .expect("call app");
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    (status, headers, body)
}

pub fn json(body: &Bytes) -> serde_json::Value {
    serde_json::from_slice(body).expect("parse json")
}

pub fn content_type(headers: &HeaderMap) -> &str {
    headers
        .get(axum::http::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}
