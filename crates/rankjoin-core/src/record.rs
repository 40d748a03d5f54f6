//! Plain key-value records.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::traits::Record;
use crate::types::{RecordId, ScoreFields};

/// A record loaded as a plain field mapping.
///
/// Score fields are inserted as ordinary keys and overwrite an existing
/// field of the same name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(pub Map<String, Value>);

impl Row {
    pub fn new() -> Self { Self::default() }

    pub fn get(&self, field: &str) -> Option<&Value> { self.0.get(field) }

    pub fn into_inner(self) -> Map<String, Value> { self.0 }
}

impl From<Map<String, Value>> for Row {
    fn from(map: Map<String, Value>) -> Self { Row(map) }
}

impl Record for Row {
    fn key(&self, field: &str) -> Option<RecordId> { self.0.get(field).and_then(RecordId::from_value) }

    fn attach_scores(&mut self, fields: ScoreFields) {
        for (name, value) in fields { self.0.insert(name, value); }
    }
}
