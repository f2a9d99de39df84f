//! In-process stand-in for the three prediction services.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::extract::{RawQuery, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use name_api::{ClientConfig, Mode};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use url::form_urlencoded;

/// Entry the fake answers without a `"name"` field.
pub const NAMELESS: &str = "Nameless";
/// API key the fake rejects with 401.
pub const BAD_KEY: &str = "bad";
/// Base URL nothing listens on.
pub const UNREACHABLE: &str = "http://127.0.0.1:1/";

pub const RATE_LIMIT: usize = 1000;

type QueryLog = Arc<Mutex<Vec<String>>>;

pub struct FakeUpstream {
    pub address: String,
    queries: QueryLog,
}

impl FakeUpstream {
    pub async fn spawn() -> Self {
        let queries = QueryLog::default();
        let router = Router::new()
            .route("/age/", get(age))
            .route("/gender/", get(gender))
            .route("/nation/", get(nation))
            .with_state(queries.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = format!("http://{}", listener.local_addr().unwrap());
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self { address, queries }
    }

    pub fn config(&self, mode: Mode) -> ClientConfig {
        ClientConfig {
            mode,
            age_url: format!("{}/age/", self.address),
            gender_url: format!("{}/gender/", self.address),
            nation_url: format!("{}/nation/", self.address),
            ..ClientConfig::default()
        }
    }

    pub fn requests(&self) -> usize {
        self.queries.lock().unwrap().len()
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

async fn age(State(log): State<QueryLog>, RawQuery(query): RawQuery) -> Response {
    respond(&log, query, |name| {
        json!({"name": name, "age": name.len() * 10, "count": 100})
    })
}

async fn gender(State(log): State<QueryLog>, RawQuery(query): RawQuery) -> Response {
    respond(&log, query, |name| {
        let gender = if name.ends_with('a') { "female" } else { "male" };
        json!({"name": name, "gender": gender, "probability": 0.9, "count": 200})
    })
}

async fn nation(State(log): State<QueryLog>, RawQuery(query): RawQuery) -> Response {
    respond(&log, query, |name| {
        json!({"name": name, "country": [{"country_id": "US", "probability": 0.5}]})
    })
}

fn respond(log: &QueryLog, query: Option<String>, entry: impl Fn(&str) -> Value) -> Response {
    let query = query.unwrap_or_default();
    let served = {
        let mut log = log.lock().unwrap();
        log.push(query.clone());
        log.len()
    };
    let headers = [
        ("x-rate-limit-limit", RATE_LIMIT.to_string()),
        ("x-rate-limit-remaining", (RATE_LIMIT - served).to_string()),
        ("x-rate-limit-reset", "3600".to_string()),
    ];

    let pairs: Vec<(String, String)> = form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect();
    if pairs.iter().any(|(k, v)| k == "apikey" && v == BAD_KEY) {
        let body = json!({"error": "Invalid API key"});
        return (StatusCode::UNAUTHORIZED, headers, Json(body)).into_response();
    }
    if let Some((_, name)) = pairs.iter().find(|(k, _)| k == "name") {
        return (StatusCode::OK, headers, Json(entry(name))).into_response();
    }

    let names: Vec<&str> = pairs
        .iter()
        .filter(|(k, _)| k == "name[]")
        .map(|(_, v)| v.as_str())
        .collect();
    if names.is_empty() || names.len() > 9 {
        let body = json!({"error": "Invalid 'name' parameter"});
        return (StatusCode::UNPROCESSABLE_ENTITY, headers, Json(body)).into_response();
    }

    let body: Vec<Value> = names
        .into_iter()
        .map(|name| {
            if name == NAMELESS {
                json!({"error": "no prediction"})
            } else {
                entry(name)
            }
        })
        .collect();
    (StatusCode::OK, headers, Json(Value::Array(body))).into_response()
}
