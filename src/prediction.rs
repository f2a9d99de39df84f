use std::collections::btree_map;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Fields the queried endpoints returned for one name.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Prediction(Map<String, Value>);

/// A nationality guess from the nationality endpoint.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct CountryGuess {
    pub country_id: String,
    pub probability: f64,
}

impl Prediction {
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Predicted age, absent when the age endpoint was not queried or had no data.
    pub fn age(&self) -> Option<u64> {
        self.0.get("age").and_then(Value::as_u64)
    }

    /// Sample size reported by the last endpoint that sent one.
    pub fn count(&self) -> Option<u64> {
        self.0.get("count").and_then(Value::as_u64)
    }

    pub fn gender(&self) -> Option<&str> {
        self.0.get("gender").and_then(Value::as_str)
    }

    pub fn probability(&self) -> Option<f64> {
        self.0.get("probability").and_then(Value::as_f64)
    }

    /// Nationality guesses, most likely first as sent upstream. Unreadable guesses are skipped.
    pub fn countries(&self) -> Vec<CountryGuess> {
        match self.0.get("country") {
            Some(Value::Array(guesses)) => guesses
                .iter()
                .filter_map(|g| CountryGuess::deserialize(g).ok())
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Shallow union: fields already present are overwritten.
    pub(crate) fn absorb(&mut self, fields: Map<String, Value>) {
        self.0.extend(fields);
    }
}

impl From<Map<String, Value>> for Prediction {
    fn from(fields: Map<String, Value>) -> Self {
        Prediction(fields)
    }
}

/// Merged predictions keyed by name, rebuilt on every lookup.
///
/// Iteration and serialization follow name order, not the order names were looked up in.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PredictionRecord(BTreeMap<String, Prediction>);

impl PredictionRecord {
    pub fn get(&self, name: &str) -> Option<&Prediction> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Prediction> {
        self.0.iter()
    }

    pub fn into_inner(self) -> BTreeMap<String, Prediction> {
        self.0
    }

    pub(crate) fn absorb(&mut self, name: String, fields: Map<String, Value>) {
        self.0.entry(name).or_default().absorb(fields);
    }
}

impl IntoIterator for PredictionRecord {
    type Item = (String, Prediction);
    type IntoIter = btree_map::IntoIter<String, Prediction>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a PredictionRecord {
    type Item = (&'a String, &'a Prediction);
    type IntoIter = btree_map::Iter<'a, String, Prediction>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
