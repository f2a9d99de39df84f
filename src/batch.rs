use url::form_urlencoded::byte_serialize;

use crate::endpoint::{Endpoint, EndpointTarget};

/// Upper bound on names the upstream services accept in one request.
pub const MAX_PER_REQUEST: usize = 9;

/// A ready-to-send request URL for one batch of names.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchUrl {
    pub endpoint: Endpoint,
    pub url: String,
    pub names: usize,
}

/// Optional query parameters appended after the names of every batch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryParams {
    pub api_key: Option<String>,
    pub country_id: Option<String>,
}

impl QueryParams {
    pub(crate) fn suffix(&self) -> String {
        let mut suffix = String::new();
        if let Some(key) = &self.api_key {
            suffix.push_str("&apikey=");
            suffix.extend(byte_serialize(key.as_bytes()));
        }
        if let Some(country) = &self.country_id {
            suffix.push_str("&country_id=");
            suffix.extend(byte_serialize(country.as_bytes()));
        }
        suffix
    }
}

/// Builds the batch URLs for every target. Each target receives the full name
/// list, chunked in input order, so a name appears exactly once per endpoint.
pub fn build_urls<S: AsRef<str>>(
    names: &[S],
    targets: &[EndpointTarget],
    params: &QueryParams,
) -> Vec<BatchUrl> {
    let suffix = params.suffix();
    targets
        .iter()
        .flat_map(|target| {
            let suffix = &suffix;
            names.chunks(MAX_PER_REQUEST).map(move |chunk| BatchUrl {
                endpoint: target.endpoint,
                url: batch_url(&target.base_url, chunk, suffix),
                names: chunk.len(),
            })
        })
        .collect()
}

fn batch_url<S: AsRef<str>>(base_url: &str, names: &[S], suffix: &str) -> String {
    let mut url = format!("{base_url}?");
    for name in names {
        url.push_str("&name[]=");
        url.extend(byte_serialize(name.as_ref().as_bytes()));
    }
    url.push_str(suffix);
    url
}

/// URL for a single-name request, as used by the rate-limit probes.
pub(crate) fn probe_url(target: &EndpointTarget, name: &str, params: &QueryParams) -> String {
    let mut url = format!("{}?&name=", target.base_url);
    url.extend(byte_serialize(name.as_bytes()));
    url.push_str(&params.suffix());
    url
}
