//! Ready-made key translation rules.

use crate::error::Error;
use crate::traits::KeyResolver;
use crate::types::RecordId;

/// Maps members such as `user:42` to record ids by stripping a fixed prefix.
///
/// The remainder must parse as an integer unless string ids are allowed,
/// in which case any non-empty remainder is accepted.
#[derive(Debug, Clone)]
pub struct PrefixKeyResolver {
    prefix: String,
    allow_string_ids: bool,
}

impl PrefixKeyResolver {
    pub fn new<S: Into<String>>(prefix: S) -> Self { Self { prefix: prefix.into(), allow_string_ids: false } }

    pub fn allow_string_ids(mut self, allow: bool) -> Self {
        self.allow_string_ids = allow;
        self
    }

    pub fn prefix(&self) -> &str { &self.prefix }

    fn translate(&self, key: &str) -> crate::error::Result<RecordId> {
        let rest = key
            .strip_prefix(self.prefix.as_str())
            .filter(|rest| !rest.is_empty())
            .ok_or_else(|| Error::UnresolvableKey(format!("'{}' does not match prefix '{}'", key, self.prefix)))?;
        match rest.parse::<i64>() {
            Ok(id) => Ok(RecordId::Int(id)),
            Err(_) if self.allow_string_ids => Ok(RecordId::from(rest)),
            Err(_) => Err(Error::UnresolvableKey(format!("'{}' has a non-numeric id", key))),
        }
    }
}

impl KeyResolver for PrefixKeyResolver {
    fn resolve_key(&self, key: &str) -> anyhow::Result<RecordId> { Ok(self.translate(key)?) }
}
