use std::fmt::Display;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::config::ErrorPolicy;
use crate::dispatch::RawResponse;
use crate::error::{NameApiError, NameApiResult};
use crate::prediction::PredictionRecord;

/// Responses are consumed in dispatch order and entries in array order; when two
/// endpoints send the same field for a name, the later one wins.
pub fn merge<E: Display>(
    responses: Vec<Result<RawResponse, E>>,
    policy: ErrorPolicy,
) -> NameApiResult<PredictionRecord> {
    match policy {
        ErrorPolicy::Strict => merge_strict(responses),
        ErrorPolicy::Lenient => Ok(merge_lenient(responses)),
    }
}

fn merge_strict<E: Display>(
    responses: Vec<Result<RawResponse, E>>,
) -> NameApiResult<PredictionRecord> {
    // Check every response before merging anything, so a failure never leaves partial output.
    let mut bodies = Vec::with_capacity(responses.len());
    for response in responses {
        let response = response.map_err(|e| NameApiError::upstream(None, e.to_string()))?;
        if !response.is_success() {
            let message = response
                .error_message()
                .map(str::to_string)
                .unwrap_or_else(|| format!("request failed with status {}", response.status));
            return Err(NameApiError::upstream(Some(response.status), message));
        }
        match response.body {
            Some(Value::Array(entries)) => bodies.push(entries),
            _ => {
                return Err(NameApiError::upstream(
                    Some(response.status),
                    "response body is not an array of predictions",
                ))
            }
        }
    }

    let mut record = PredictionRecord::default();
    for entry in bodies.into_iter().flatten() {
        let (name, fields) = split_entry(entry).ok_or_else(|| {
            NameApiError::upstream(None, "prediction entry without a \"name\" field")
        })?;
        record.absorb(name, fields);
    }
    Ok(record)
}

fn merge_lenient<E: Display>(responses: Vec<Result<RawResponse, E>>) -> PredictionRecord {
    let mut record = PredictionRecord::default();
    for (index, response) in responses.into_iter().enumerate() {
        let response = match response {
            Ok(response) => response,
            Err(e) => {
                warn!(batch = index, "skipping failed batch: {e}");
                continue;
            }
        };
        if !response.is_success() {
            warn!(
                batch = index,
                status = response.status,
                "skipping batch: {}",
                response.error_message().unwrap_or("no error message")
            );
            continue;
        }
        let Some(Value::Array(entries)) = response.body else {
            warn!(batch = index, "skipping batch whose body is not an array");
            continue;
        };
        for entry in entries {
            match split_entry(entry) {
                Some((name, fields)) => record.absorb(name, fields),
                None => debug!(batch = index, "skipping entry without a name"),
            }
        }
    }
    record
}

/// Takes the `"name"` field out of an entry, returning it with the remaining fields.
fn split_entry(entry: Value) -> Option<(String, Map<String, Value>)> {
    let Value::Object(mut fields) = entry else {
        return None;
    };
    match fields.remove("name") {
        Some(Value::String(name)) => Some((name, fields)),
        _ => None,
    }
}
