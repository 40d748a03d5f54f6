//! Per-call translation cache between external keys and record ids.

use std::collections::HashMap;

use rankjoin_core::traits::KeyResolver;
use rankjoin_core::types::{RankedResult, RecordId};
use tracing::debug;

/// Bidirectional `external key <-> record id` mapping.
///
/// When two keys translate to the same id the reverse direction keeps the
/// later key; the forward direction still holds both.
#[derive(Debug, Clone, Default)]
pub struct KeyMapping {
    internal: HashMap<String, RecordId>,
    external: HashMap<RecordId, String>,
    order: Vec<RecordId>,
}

impl KeyMapping {
    pub fn new() -> Self { Self::default() }

    /// Translate every ranked key, in rank order. The first translation
    /// failure is returned as-is.
    pub fn build<K>(ranked: &RankedResult, resolver: &K) -> anyhow::Result<Self>
    where
        K: KeyResolver + ?Sized,
    {
        let mut mapping = Self::new();
        for key in ranked.keys() {
            let id = resolver.resolve_key(key)?;
            mapping.insert(key, id);
        }
        Ok(mapping)
    }

    pub fn insert<S: Into<String>>(&mut self, key: S, id: RecordId) {
        let key = key.into();
        let id = id.canonical();
        match self.external.get(&id) {
            None => self.order.push(id.clone()),
            Some(previous) if *previous != key => {
                debug!(%id, previous = %previous, key = %key, "two keys resolve to the same id, reverse lookup keeps the later");
            }
            Some(_) => {}
        }
        self.external.insert(id.clone(), key.clone());
        self.internal.insert(key, id);
    }

    pub fn internal_id(&self, key: &str) -> Option<&RecordId> { self.internal.get(key) }

    pub fn external_key(&self, id: &RecordId) -> Option<&str> { self.external.get(id).map(String::as_str) }

    /// Distinct ids in the order they were first produced.
    pub fn internal_ids(&self) -> &[RecordId] { &self.order }

    pub fn len(&self) -> usize { self.internal.len() }

    pub fn is_empty(&self) -> bool { self.internal.is_empty() }
}
