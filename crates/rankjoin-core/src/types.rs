//! Domain types shared by the resolver and its extension points.

use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Fields merged into a record for one ranked entry.
pub type ScoreFields = serde_json::Map<String, Value>;

/// Primary-key value used by the record store.
///
/// Integer and string identifiers are both supported. A string holding a
/// canonical decimal integer (`"42"`, not `"042"` or `"+42"`) is treated as
/// the integer it spells; use [`RecordId::canonical`] before comparing ids
/// that did not come through one of the `From` conversions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Str(String),
}

impl RecordId {
    pub fn canonical(self) -> Self {
        match self {
            RecordId::Str(s) => match canonical_int(&s) {
                Some(i) => RecordId::Int(i),
                None => RecordId::Str(s),
            },
            id => id,
        }
    }

    /// Read an identifier out of a JSON value. Only integers and strings
    /// qualify; floats, booleans, null and containers yield `None`.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_i64().map(RecordId::Int),
            Value::String(s) => Some(RecordId::from(s.as_str())),
            _ => None,
        }
    }
}

fn canonical_int(s: &str) -> Option<i64> {
    let i: i64 = s.parse().ok()?;
    (i.to_string() == s).then_some(i)
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(i) => write!(f, "{}", i),
            RecordId::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(i: i64) -> Self { RecordId::Int(i) }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self { RecordId::Str(s.to_string()).canonical() }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self { RecordId::Str(s).canonical() }
}

impl From<RecordId> for Value {
    fn from(id: RecordId) -> Self {
        match id {
            RecordId::Int(i) => Value::from(i),
            RecordId::Str(s) => Value::String(s),
        }
    }
}

/// A rank-ordered window of `external key -> score` pairs.
///
/// Behaves like an insertion-ordered map: inserting a key that is already
/// present replaces its score but keeps its original rank position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankedResult {
    entries: Vec<(String, f64)>,
    positions: HashMap<String, usize>,
}

impl RankedResult {
    pub fn new() -> Self { Self::default() }

    pub fn insert<K: Into<String>>(&mut self, key: K, score: f64) {
        let key = key.into();
        match self.positions.get(&key) {
            Some(&pos) => self.entries[pos].1 = score,
            None => {
                self.positions.insert(key.clone(), self.entries.len());
                self.entries.push((key, score));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.positions.get(key).map(|&pos| self.entries[pos].1)
    }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Entries in rank order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.entries.iter().map(|(k, s)| (k.as_str(), *s))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for RankedResult {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let mut ranked = RankedResult::new();
        for (key, score) in iter { ranked.insert(key, score); }
        ranked
    }
}

impl Serialize for RankedResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, score) in &self.entries { map.serialize_entry(key, score)?; }
        map.end()
    }
}

// Accepts either a JSON object (document order is rank order) or an array
// of `[key, score]` pairs, the shape sorted-set clients usually return.
impl<'de> Deserialize<'de> for RankedResult {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RankedVisitor;

        impl<'de> Visitor<'de> for RankedVisitor {
            type Value = RankedResult;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of key to score or a sequence of [key, score] pairs")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<RankedResult, A::Error> {
                let mut ranked = RankedResult::new();
                while let Some((key, score)) = access.next_entry::<String, f64>()? { ranked.insert(key, score); }
                Ok(ranked)
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut access: A) -> Result<RankedResult, A::Error> {
                let mut ranked = RankedResult::new();
                while let Some((key, score)) = access.next_element::<(String, f64)>()? { ranked.insert(key, score); }
                Ok(ranked)
            }
        }

        deserializer.deserialize_any(RankedVisitor)
    }
}
