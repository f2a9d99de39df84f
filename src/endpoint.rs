use std::fmt::Display;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub const AGIFY_URL: &str = "https://api.agify.io/";
pub const GENDERIZE_URL: &str = "https://api.genderize.io/";
pub const NATIONALIZE_URL: &str = "https://api.nationalize.io/";

/// One of the upstream prediction services.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Endpoint {
    Age,
    Gender,
    Nation,
}

impl Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Endpoint::Age => write!(f, "age"),
            Endpoint::Gender => write!(f, "gender"),
            Endpoint::Nation => write!(f, "nation"),
        }
    }
}

/// Subset of endpoints a lookup queries.
#[derive(PartialEq, Eq, Deserialize, Serialize, Clone, Copy, Debug, Default, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Age,
    Gender,
    Nation,
    #[default]
    #[serde(alias = "*")]
    All,
}

impl Mode {
    /// Endpoints queried for this mode, in the order their batches are dispatched and merged.
    pub fn endpoints(self) -> &'static [Endpoint] {
        match self {
            Mode::Age => &[Endpoint::Age],
            Mode::Gender => &[Endpoint::Gender],
            Mode::Nation => &[Endpoint::Nation],
            Mode::All => &[Endpoint::Age, Endpoint::Nation, Endpoint::Gender],
        }
    }
}

/// An endpoint bound to the base URL requests are sent to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EndpointTarget {
    pub endpoint: Endpoint,
    pub base_url: String,
}
