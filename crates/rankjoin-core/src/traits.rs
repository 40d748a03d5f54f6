use crate::types::{RecordId, ScoreFields};
use serde_json::Value;

/// Translates an external (ranked-source) key into the record store's id.
pub trait KeyResolver {
    fn resolve_key(&self, key: &str) -> anyhow::Result<RecordId>;
}

impl<F> KeyResolver for F
where
    F: Fn(&str) -> anyhow::Result<RecordId>,
{
    fn resolve_key(&self, key: &str) -> anyhow::Result<RecordId> { self(key) }
}

/// Loads records for a batch of ids. Returning fewer records than ids is
/// fine; the missing ones are treated as not found.
pub trait ModelLoader<R> {
    fn resolve_models(&self, ids: &[RecordId]) -> anyhow::Result<Vec<R>>;
}

impl<R, F> ModelLoader<R> for F
where
    F: Fn(&[RecordId]) -> anyhow::Result<Vec<R>>,
{
    fn resolve_models(&self, ids: &[RecordId]) -> anyhow::Result<Vec<R>> { self(ids) }
}

/// Derives the fields merged into a record from its score.
///
/// `score_field` is the configured output field name.
pub trait ScoreProjection {
    fn score_fields(&self, score_field: &str, score: f64) -> ScoreFields;
}

impl<F> ScoreProjection for F
where
    F: Fn(&str, f64) -> ScoreFields,
{
    fn score_fields(&self, score_field: &str, score: f64) -> ScoreFields { self(score_field, score) }
}

/// Writes the score under the configured field name and nothing else.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultScoreFields;

impl ScoreProjection for DefaultScoreFields {
    fn score_fields(&self, score_field: &str, score: f64) -> ScoreFields {
        let mut fields = ScoreFields::new();
        fields.insert(score_field.to_string(), Value::from(score));
        fields
    }
}

/// A loaded record as seen by the merge step.
///
/// Two shapes implement this: [`Row`](crate::record::Row) for plain
/// key-value mappings, and every [`Model`] for rich objects.
pub trait Record {
    /// Identifier read from `field`, if present and usable as an id.
    fn key(&self, field: &str) -> Option<RecordId>;

    fn attach_scores(&mut self, fields: ScoreFields);
}

/// A rich domain object with named attributes and relations.
pub trait Model {
    fn attribute(&self, name: &str) -> Option<RecordId>;

    fn set_relation(&mut self, name: &str, value: Value);
}

impl<M: Model> Record for M {
    fn key(&self, field: &str) -> Option<RecordId> { self.attribute(field).map(RecordId::canonical) }

    fn attach_scores(&mut self, fields: ScoreFields) {
        for (name, value) in fields { self.set_relation(&name, value); }
    }
}
