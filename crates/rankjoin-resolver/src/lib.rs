//! Joins a score-ordered list of external keys with records loaded by their
//! own primary id, keeping rank order and attaching score fields.

use std::collections::HashMap;

use rankjoin_core::config::ResolverConfig;
use rankjoin_core::traits::{DefaultScoreFields, KeyResolver, ModelLoader, Record, ScoreProjection};
use rankjoin_core::types::{RankedResult, RecordId};
use tracing::debug;

pub mod keyed;
pub mod mapping;

pub use keyed::key_models;
pub use mapping::KeyMapping;

/// Resolves ranked keys to score-annotated records.
///
/// `K` translates keys, `L` loads records in one batch and `P` turns a score
/// into the fields merged into each record. Nothing is cached between calls,
/// so one resolver can serve concurrent `resolve` calls when its parts are
/// `Sync`.
pub struct Resolver<K, L, P = DefaultScoreFields> {
    keys: K,
    loader: L,
    projection: P,
    config: ResolverConfig,
}

impl<K, L> Resolver<K, L, DefaultScoreFields> {
    pub fn new(keys: K, loader: L) -> Self {
        Self { keys, loader, projection: DefaultScoreFields, config: ResolverConfig::default() }
    }
}

impl<K, L, P> Resolver<K, L, P> {
    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_model_key<S: Into<String>>(mut self, model_key: S) -> Self {
        self.config.model_key = model_key.into();
        self
    }

    pub fn with_score_field<S: Into<String>>(mut self, score_field: S) -> Self {
        self.config.score_field = score_field.into();
        self
    }

    pub fn with_projection<Q: ScoreProjection>(self, projection: Q) -> Resolver<K, L, Q> {
        Resolver { keys: self.keys, loader: self.loader, projection, config: self.config }
    }

    pub fn config(&self) -> &ResolverConfig { &self.config }
}

impl<K, L, P> Resolver<K, L, P>
where
    K: KeyResolver,
    P: ScoreProjection,
{
    /// Translate every ranked key without loading anything.
    pub fn map_keys(&self, ranked: &RankedResult) -> anyhow::Result<KeyMapping> { KeyMapping::build(ranked, &self.keys) }

    /// Load the records behind `ranked` and return them in rank order with
    /// score fields attached.
    ///
    /// Entries whose record was not loaded are dropped. Errors from the key
    /// resolver or loader are returned unchanged. An empty input returns
    /// immediately without calling either.
    pub fn resolve<R>(&self, ranked: &RankedResult) -> anyhow::Result<Vec<R>>
    where
        L: ModelLoader<R>,
        R: Record + Clone,
    {
        if ranked.is_empty() {
            debug!("empty ranked result, nothing to resolve");
            return Ok(Vec::new());
        }

        let mapping = self.map_keys(ranked)?;
        let models = self.loader.resolve_models(mapping.internal_ids())?;
        debug!(entries = ranked.len(), ids = mapping.internal_ids().len(), loaded = models.len(), "models loaded");
        let mut keyed = key_models(models, &self.config.model_key);

        // Entries sharing an id each get their own copy; the last one takes
        // the loaded record itself.
        let mut uses: HashMap<&RecordId, usize> = HashMap::new();
        for key in ranked.keys() {
            if let Some(id) = mapping.internal_id(key) { *uses.entry(id).or_default() += 1; }
        }

        let mut merged = Vec::with_capacity(ranked.len());
        for (key, score) in ranked.iter() {
            let Some(id) = mapping.internal_id(key) else {
                debug!(key, "no id for key, dropping");
                continue;
            };
            let Some(mut record) = take_record(&mut keyed, &mut uses, id) else {
                debug!(key, %id, "no record loaded, dropping");
                continue;
            };
            record.attach_scores(self.projection.score_fields(&self.config.score_field, score));
            merged.push(record);
        }

        debug!(resolved = merged.len(), dropped = ranked.len() - merged.len(), "ranked result resolved");
        Ok(merged)
    }
}

fn take_record<R: Clone>(keyed: &mut HashMap<RecordId, R>, uses: &mut HashMap<&RecordId, usize>, id: &RecordId) -> Option<R> {
    let left = uses.get_mut(id)?;
    *left -= 1;
    if *left == 0 { keyed.remove(id) } else { keyed.get(id).cloned() }
}
