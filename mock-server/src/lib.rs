use std::{collections::BTreeMap, time::Duration};

use axum::{
    extract::Query,
    http::{HeaderMap, Method, StatusCode},
    response::{AppendHeaders, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::net::TcpListener;

/// Body returned by the fixed `/test` routes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    fn for_method(method: &Method) -> Self {
        Self {
            message: format!("{method} request successful"),
        }
    }
}

/// Body returned by `/query`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QueryEcho {
    pub message: String,
    pub query: BTreeMap<String, Vec<String>>,
}

#[derive(Deserialize)]
pub struct LargeParams {
    #[serde(default)]
    pub bytes: usize,
}

#[derive(Deserialize)]
pub struct SlowParams {
    #[serde(default)]
    pub ms: u64,
}

pub fn app() -> Router {
    Router::new()
        .route(
            "/test",
            get(fixed_response)
                .post(fixed_response)
                .put(fixed_response)
                .delete(fixed_response),
        )
        .route("/query", get(echo_query))
        .route(
            "/echo",
            get(echo_body)
                .post(echo_body)
                .put(echo_body)
                .delete(echo_body),
        )
        .route("/headers", get(echo_headers))
        .route("/multi", get(multi_header))
        .route("/slow", get(slow))
        .route("/large", get(large))
        .route("/binary", get(binary))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn fixed_response(method: Method) -> Response {
    tracing::debug!(%method, "fixed response");
    match method {
        Method::POST => (StatusCode::CREATED, Json(Message::for_method(&method))).into_response(),
        Method::DELETE => StatusCode::NO_CONTENT.into_response(),
        _ => (StatusCode::OK, Json(Message::for_method(&method))).into_response(),
    }
}

async fn echo_query(Query(pairs): Query<Vec<(String, String)>>) -> Json<QueryEcho> {
    let mut query: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (key, value) in pairs {
        query.entry(key).or_default().push(value);
    }
    Json(QueryEcho {
        message: "GET request successful".to_string(),
        query,
    })
}

async fn echo_body(method: Method, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let status = if method == Method::POST {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    (status, Json(body))
}

async fn echo_headers(headers: HeaderMap) -> Json<BTreeMap<String, Vec<String>>> {
    let mut echoed: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (name, value) in &headers {
        echoed
            .entry(name.as_str().to_string())
            .or_default()
            .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
    }
    Json(echoed)
}

async fn multi_header() -> impl IntoResponse {
    (
        AppendHeaders([("x-multi", "one"), ("x-multi", "two")]),
        Json(Message {
            message: "multi".to_string(),
        }),
    )
}

async fn slow(Query(params): Query<SlowParams>) -> Json<Message> {
    tokio::time::sleep(Duration::from_millis(params.ms)).await;
    Json(Message {
        message: format!("slept {} ms", params.ms),
    })
}

/// `bytes` ASCII `a`s as a plain-text body.
async fn large(Query(params): Query<LargeParams>) -> String {
    "a".repeat(params.bytes)
}

/// A body that is not valid UTF-8.
async fn binary() -> Vec<u8> {
    b"ok\xff".to_vec()
}
