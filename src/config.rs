use anyhow::Result;
use clap_serde_derive::ClapSerde;

use crate::endpoint::{Endpoint, EndpointTarget, Mode, AGIFY_URL, GENDERIZE_URL, NATIONALIZE_URL};
use crate::error::{NameApiError, NameApiResult};

/// How a lookup reacts to failed batches and malformed entries.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default)]
pub enum ErrorPolicy {
    /// Any failed batch aborts the whole lookup.
    #[default]
    Strict,
    /// Failed batches and malformed entries are skipped.
    Lenient,
}

#[derive(ClapSerde, Debug, Clone)]
pub struct ClientConfig {
    /// Which predictions to request
    #[default(Mode::All)]
    #[arg(short, long, env = "NAME_API_MODE", value_enum)]
    pub mode: Mode,

    /// ISO 3166-1 alpha-2 code to localize predictions, empty for none
    #[default(String::new())]
    #[arg(short, long, env = "NAME_API_COUNTRY_ID")]
    pub country_id: String,

    /// API key appended to every request, empty for none
    #[default(String::new())]
    #[arg(short = 'k', long, env = "NAME_API_KEY")]
    pub api_key: String,

    /// Skip failed batches and malformed entries instead of failing the lookup
    #[default(false)]
    #[arg(
        short,
        long,
        env = "NAME_API_IGNORE_ERRORS",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub ignore_errors: bool,

    /// Base URL of the age endpoint
    #[default(AGIFY_URL.to_string())]
    #[arg(long, env = "NAME_API_AGE_URL")]
    pub age_url: String,

    /// Base URL of the gender endpoint
    #[default(GENDERIZE_URL.to_string())]
    #[arg(long, env = "NAME_API_GENDER_URL")]
    pub gender_url: String,

    /// Base URL of the nationality endpoint
    #[default(NATIONALIZE_URL.to_string())]
    #[arg(long, env = "NAME_API_NATION_URL")]
    pub nation_url: String,
}

impl ClientConfig {
    pub fn from_toml(path: &str) -> Result<Self> {
        let str = std::fs::read_to_string(path)?;
        let opt: <Self as ClapSerde>::Opt = toml::from_str(&str)?;
        Ok(Self::from(opt))
    }

    pub fn error_policy(&self) -> ErrorPolicy {
        if self.ignore_errors {
            ErrorPolicy::Lenient
        } else {
            ErrorPolicy::Strict
        }
    }

    pub fn api_key(&self) -> Option<&str> {
        non_empty(&self.api_key)
    }

    pub fn country_id(&self) -> Option<&str> {
        non_empty(&self.country_id)
    }

    pub fn base_url(&self, endpoint: Endpoint) -> &str {
        match endpoint {
            Endpoint::Age => &self.age_url,
            Endpoint::Gender => &self.gender_url,
            Endpoint::Nation => &self.nation_url,
        }
    }

    /// Checks the parameters and binds the selected endpoints to their base URLs.
    pub(crate) fn resolve_targets(&self) -> NameApiResult<Vec<EndpointTarget>> {
        if let Some(country) = self.country_id() {
            if country.len() != 2 || !country.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(NameApiError::configuration(format!(
                    "country_id {country} is not an ISO 3166-1 alpha-2 code"
                )));
            }
        }

        self.mode
            .endpoints()
            .iter()
            .map(|&endpoint| {
                let base_url = self.base_url(endpoint);
                let parsed = url::Url::parse(base_url).map_err(|e| {
                    NameApiError::configuration(format!(
                        "base URL {base_url} for {endpoint} endpoint is invalid: {e}"
                    ))
                })?;
                if parsed.query().is_some() || parsed.fragment().is_some() {
                    return Err(NameApiError::configuration(format!(
                        "base URL {base_url} for {endpoint} endpoint must not carry a query or fragment"
                    )));
                }
                Ok(EndpointTarget {
                    endpoint,
                    base_url: base_url.to_string(),
                })
            })
            .collect()
    }
}

fn non_empty(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty()).then_some(value)
}
