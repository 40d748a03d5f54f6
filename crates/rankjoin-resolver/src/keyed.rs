use std::collections::HashMap;

use rankjoin_core::traits::Record;
use rankjoin_core::types::RecordId;
use tracing::warn;

/// Index records by `model_key`. A later record with the same id replaces
/// an earlier one; records without a usable id are skipped.
pub fn key_models<R: Record>(models: Vec<R>, model_key: &str) -> HashMap<RecordId, R> {
    let mut keyed = HashMap::with_capacity(models.len());
    for (position, model) in models.into_iter().enumerate() {
        match model.key(model_key) {
            Some(id) => { keyed.insert(id, model); }
            None => warn!(position, model_key, "loaded record has no usable key, skipping"),
        }
    }
    keyed
}
