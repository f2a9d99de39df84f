//! Batched age, gender and nationality predictions from agify.io, genderize.io
//! and nationalize.io.
//!
//! Names are split into requests of at most [`MAX_PER_REQUEST`] per endpoint,
//! sent concurrently, and the per-name answers of every endpoint are merged into
//! one [`PredictionRecord`].

pub mod batch;
pub mod client;
pub mod config;
pub mod dispatch;
pub mod endpoint;
pub mod error;
pub mod merge;
pub mod prediction;
pub mod rate_limit;
pub mod telemetry;

pub use batch::{BatchUrl, QueryParams, MAX_PER_REQUEST};
pub use client::{BlockingNameApi, NameApi};
pub use config::{ClientConfig, ErrorPolicy};
pub use endpoint::{Endpoint, Mode};
pub use error::{NameApiError, NameApiResult};
pub use prediction::{CountryGuess, Prediction, PredictionRecord};
pub use rate_limit::RateLimit;
