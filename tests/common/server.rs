//! Local echo server the integration tests talk to.

use axum::{
    body::Bytes,
    extract::{Multipart, Query},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use reqwest::Url;
use serde_json::{json, Value};
use std::collections::HashMap;
use tokio::net::TcpListener;

/// Bytes served by `/image.png`.
pub const IMAGE_BYTES: &[u8] = &[
    0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x48, 0x44, 0x52,
    0x00, 0xff, 0x10, 0x80, 0x7f, 0x01, 0x02, 0x03,
];

pub fn app() -> Router {
    Router::new()
        .route(
            "/test",
            get(echo_query)
                .post(echo_body)
                .put(echo_body)
                .patch(echo_body)
                .delete(echo_body)
                .options(echo_body),
        )
        .route("/test/name", get(echo_name))
        .route("/test/form", post(echo_form).put(echo_form).patch(echo_form))
        .route("/test/headers", get(echo_headers))
        .route("/image.png", get(image))
        .route("/missing", get(|| async { StatusCode::NOT_FOUND }))
}

/// Starts the server on a random port and returns its base URL.
pub async fn spawn() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app()).await });
    Url::parse(&format!("http://{addr}")).unwrap()
}

async fn echo_query(Query(query): Query<HashMap<String, String>>) -> Json<Value> {
    Json(json!({ "data": query, "message": "success" }))
}

async fn echo_name(Query(query): Query<HashMap<String, String>>) -> Json<Value> {
    Json(json!({ "name": query.get("name"), "message": "success" }))
}

async fn echo_body(body: Bytes) -> Json<Value> {
    let data: Value = serde_json::from_slice(&body).unwrap_or_else(|_| json!({}));
    Json(json!({ "data": data, "message": "success" }))
}

async fn echo_form(mut multipart: Multipart) -> Json<Value> {
    let mut name = None;
    let mut has_file = false;

    while let Some(field) = multipart.next_field().await.unwrap() {
        let field_name = field.name().map(str::to_owned);
        match field_name.as_deref() {
            Some("name") => name = Some(field.text().await.unwrap()),
            Some("image") => {
                let is_file = field.file_name().is_some();
                let content = field.bytes().await.unwrap();
                has_file = is_file && !content.is_empty();
            }
            _ => {}
        }
    }

    Json(json!({ "name": name, "hasFile": has_file }))
}

async fn echo_headers(headers: axum::http::HeaderMap) -> Json<Value> {
    let map: HashMap<String, String> = headers
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or_default().to_string()))
        .collect();
    Json(json!({ "data": map }))
}

async fn image() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "image/png")], IMAGE_BYTES)
}
