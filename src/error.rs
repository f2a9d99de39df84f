use thiserror::Error;

#[derive(Debug, Error)]
pub enum NameApiError {
    /// No names were supplied, so no request was issued.
    #[error("please provide names to check, the name list is empty")]
    EmptyInput,

    /// A batch failed while the strict error policy was active.
    /// `status` is absent when the request never produced a response.
    #[error("upstream error{}: {message}", status_suffix(.status))]
    Upstream { status: Option<u16>, message: String },

    /// A probe request failed at the transport level.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A rate-limit header was missing or not an integer.
    #[error("rate-limit header {header} missing or not an integer")]
    RateLimitHeader { header: &'static str },

    /// The client was built with unusable parameters.
    #[error("invalid configuration: {message}")]
    Configuration { message: String },
}

impl NameApiError {
    pub(crate) fn upstream(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            message: message.into(),
        }
    }

    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (status {s})")).unwrap_or_default()
}

pub type NameApiResult<T, E = NameApiError> = Result<T, E>;
