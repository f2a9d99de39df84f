use reqwest::header::HeaderMap;
use tracing::info;

use crate::batch::{build_urls, probe_url, BatchUrl, QueryParams};
use crate::config::{ClientConfig, ErrorPolicy};
use crate::dispatch::{dispatch, dispatch_blocking, fetch, fetch_blocking};
use crate::endpoint::EndpointTarget;
use crate::error::{NameApiError, NameApiResult};
use crate::merge::merge;
use crate::prediction::PredictionRecord;
use crate::rate_limit::{
    header_u64, RateLimit, X_RATE_LIMIT_LIMIT, X_RATE_LIMIT_REMAINING, X_RATE_LIMIT_RESET,
};

/// Name sent by the rate-limit probes.
const PROBE_NAME: &str = "Test";

#[derive(Clone, Debug)]
struct LookupPlan {
    names: Vec<String>,
    targets: Vec<EndpointTarget>,
    params: QueryParams,
    policy: ErrorPolicy,
}

impl LookupPlan {
    fn new(names: Vec<String>, config: &ClientConfig) -> NameApiResult<Self> {
        let targets = config.resolve_targets()?;
        let params = QueryParams {
            api_key: config.api_key().map(str::to_string),
            country_id: config.country_id().map(str::to_string),
        };
        let mut plan = Self {
            names: Vec::new(),
            targets,
            params,
            policy: config.error_policy(),
        };
        plan.set_names(names)?;
        Ok(plan)
    }

    fn set_names(&mut self, names: Vec<String>) -> NameApiResult<()> {
        if names.iter().any(|name| name.trim().is_empty()) {
            return Err(NameApiError::configuration("names must not be blank"));
        }
        self.names = names;
        Ok(())
    }

    fn urls(&self) -> NameApiResult<Vec<BatchUrl>> {
        if self.names.is_empty() {
            return Err(NameApiError::EmptyInput);
        }
        let urls = build_urls(&self.names, &self.targets, &self.params);
        info!(
            names = self.names.len(),
            endpoints = self.targets.len(),
            requests = urls.len(),
            "dispatching lookup"
        );
        Ok(urls)
    }

    fn probe_url(&self) -> NameApiResult<String> {
        let target = self
            .targets
            .first()
            .ok_or_else(|| NameApiError::configuration("no endpoint configured"))?;
        Ok(probe_url(target, PROBE_NAME, &self.params))
    }
}

fn collect_names<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    names.into_iter().map(Into::into).collect()
}

/// Concurrent client: every batch of a lookup is in flight at the same time.
///
/// The rate-limit probes each send one single-name request to the first
/// configured endpoint, so every call uses up one name of the quota.
#[derive(Clone, Debug)]
pub struct NameApi {
    plan: LookupPlan,
}

impl NameApi {
    pub fn new<I, S>(names: I, config: &ClientConfig) -> NameApiResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self {
            plan: LookupPlan::new(collect_names(names), config)?,
        })
    }

    pub fn names(&self) -> &[String] {
        &self.plan.names
    }

    /// Replaces the whole name list used by the next lookup.
    pub fn set_names<I, S>(&mut self, names: I) -> NameApiResult<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.plan.set_names(collect_names(names))
    }

    /// The request URLs the next lookup will send.
    pub fn urls(&self) -> NameApiResult<Vec<BatchUrl>> {
        self.plan.urls()
    }

    #[tracing::instrument(level = "info", skip(self), fields(names = self.plan.names.len()))]
    pub async fn lookup(&self) -> NameApiResult<PredictionRecord> {
        let urls = self.plan.urls()?;
        let client = reqwest::Client::builder().build()?;
        let responses = dispatch(&client, &urls).await;
        drop(client);
        merge(responses, self.plan.policy)
    }

    #[tracing::instrument(level = "info", skip(self))]
    pub async fn headers(&self) -> NameApiResult<HeaderMap> {
        let url = self.plan.probe_url()?;
        let client = reqwest::Client::builder().build()?;
        let response = fetch(&client, &url).await?;
        Ok(response.headers)
    }

    pub async fn rate_limit(&self) -> NameApiResult<RateLimit> {
        RateLimit::from_headers(&self.headers().await?)
    }

    pub async fn limit(&self) -> NameApiResult<u64> {
        header_u64(&self.headers().await?, X_RATE_LIMIT_LIMIT)
    }

    pub async fn limit_remaining(&self) -> NameApiResult<u64> {
        header_u64(&self.headers().await?, X_RATE_LIMIT_REMAINING)
    }

    pub async fn limit_reset(&self) -> NameApiResult<u64> {
        header_u64(&self.headers().await?, X_RATE_LIMIT_RESET)
    }
}

/// Blocking client. Must not be used from inside an async runtime.
#[derive(Clone, Debug)]
pub struct BlockingNameApi {
    plan: LookupPlan,
}

impl BlockingNameApi {
    pub fn new<I, S>(names: I, config: &ClientConfig) -> NameApiResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self {
            plan: LookupPlan::new(collect_names(names), config)?,
        })
    }

    pub fn names(&self) -> &[String] {
        &self.plan.names
    }

    pub fn set_names<I, S>(&mut self, names: I) -> NameApiResult<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.plan.set_names(collect_names(names))
    }

    pub fn urls(&self) -> NameApiResult<Vec<BatchUrl>> {
        self.plan.urls()
    }

    #[tracing::instrument(level = "info", skip(self), fields(names = self.plan.names.len()))]
    pub fn lookup(&self) -> NameApiResult<PredictionRecord> {
        let urls = self.plan.urls()?;
        let client = reqwest::blocking::Client::builder().build()?;
        let responses = dispatch_blocking(&client, &urls);
        drop(client);
        merge(responses, self.plan.policy)
    }

    #[tracing::instrument(level = "info", skip(self))]
    pub fn headers(&self) -> NameApiResult<HeaderMap> {
        let url = self.plan.probe_url()?;
        let client = reqwest::blocking::Client::builder().build()?;
        let response = fetch_blocking(&client, &url)?;
        Ok(response.headers)
    }

    pub fn rate_limit(&self) -> NameApiResult<RateLimit> {
        RateLimit::from_headers(&self.headers()?)
    }

    pub fn limit(&self) -> NameApiResult<u64> {
        header_u64(&self.headers()?, X_RATE_LIMIT_LIMIT)
    }

    pub fn limit_remaining(&self) -> NameApiResult<u64> {
        header_u64(&self.headers()?, X_RATE_LIMIT_REMAINING)
    }

    pub fn limit_reset(&self) -> NameApiResult<u64> {
        header_u64(&self.headers()?, X_RATE_LIMIT_RESET)
    }
}
