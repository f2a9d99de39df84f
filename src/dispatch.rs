use futures::future::join_all;
use reqwest::header::HeaderMap;
use serde_json::Value;
use tracing::debug;

use crate::batch::BatchUrl;

/// What an endpoint answered to one request.
#[derive(Clone, Debug)]
pub struct RawResponse {
    pub status: u16,
    /// `None` when the body was not valid JSON.
    pub body: Option<Value>,
    pub headers: HeaderMap,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        self.status == 200
    }

    /// The `"error"` string an endpoint puts in failure bodies.
    pub fn error_message(&self) -> Option<&str> {
        self.body.as_ref()?.get("error")?.as_str()
    }

    fn from_parts(status: u16, headers: HeaderMap, bytes: &[u8]) -> Self {
        let body = match serde_json::from_slice(bytes) {
            Ok(body) => Some(body),
            Err(e) => {
                debug!(status, "response body is not JSON: {e}");
                None
            }
        };
        Self {
            status,
            body,
            headers,
        }
    }
}

pub type Settled = Result<RawResponse, reqwest::Error>;

/// Fires every request at once and waits for all of them to settle.
/// Results are returned in the order of `urls`; a failed request does not cancel the rest.
#[tracing::instrument(level = "debug", skip_all, fields(requests = urls.len()))]
pub async fn dispatch(client: &reqwest::Client, urls: &[BatchUrl]) -> Vec<Settled> {
    join_all(urls.iter().map(|batch| fetch(client, &batch.url))).await
}

pub async fn fetch(client: &reqwest::Client, url: &str) -> Settled {
    let response = client.get(url).send().await?;
    let status = response.status().as_u16();
    let headers = response.headers().clone();
    let bytes = response.bytes().await?;
    Ok(RawResponse::from_parts(status, headers, &bytes))
}

/// Blocking counterpart of [`dispatch`]; requests are issued one after another.
#[tracing::instrument(level = "debug", skip_all, fields(requests = urls.len()))]
pub fn dispatch_blocking(client: &reqwest::blocking::Client, urls: &[BatchUrl]) -> Vec<Settled> {
    urls.iter()
        .map(|batch| fetch_blocking(client, &batch.url))
        .collect()
}

pub fn fetch_blocking(client: &reqwest::blocking::Client, url: &str) -> Settled {
    let response = client.get(url).send()?;
    let status = response.status().as_u16();
    let headers = response.headers().clone();
    let bytes = response.bytes()?;
    Ok(RawResponse::from_parts(status, headers, &bytes))
}
