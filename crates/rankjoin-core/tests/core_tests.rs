use std::fs;

use figment::{providers::Serialized, Figment};
use rankjoin_core::config::{resolve_with_base, Config, ResolverConfig};
use rankjoin_core::error::Error;
use rankjoin_core::keys::PrefixKeyResolver;
use rankjoin_core::record::Row;
use rankjoin_core::traits::{DefaultScoreFields, KeyResolver, Record, ScoreProjection};
use rankjoin_core::types::{RankedResult, RecordId};
use serde_json::json;
use tempfile::TempDir;

#[test]
fn ranked_result_from_json_object_keeps_document_order() {
    let ranked: RankedResult = serde_json::from_str(r#"{"z": 3, "a": 2.5, "m": 1}"#).expect("ranked");
    let keys: Vec<&str> = ranked.keys().collect();
    assert_eq!(keys, vec!["z", "a", "m"], "rank order is document order, not sorted");
    assert_eq!(ranked.get("a"), Some(2.5));
}

#[test]
fn ranked_result_from_pairs_and_back() {
    let ranked: RankedResult = serde_json::from_str(r#"[["user:2", 9], ["user:1", 4]]"#).expect("ranked");
    assert_eq!(ranked.len(), 2);
    assert_eq!(serde_json::to_string(&ranked).expect("json"), r#"{"user:2":9.0,"user:1":4.0}"#);
}

#[test]
fn record_id_reads_json_values() {
    assert_eq!(RecordId::from_value(&json!(5)), Some(RecordId::Int(5)));
    assert_eq!(RecordId::from_value(&json!("5")), Some(RecordId::Int(5)));
    assert_eq!(RecordId::from_value(&json!("u-5")), Some(RecordId::Str("u-5".into())));
    assert_eq!(RecordId::from_value(&json!(5.5)), None);
    assert_eq!(RecordId::from_value(&json!(null)), None);
    assert_eq!(RecordId::Str("12".into()).canonical(), RecordId::Int(12));
}

#[test]
fn row_attach_overwrites_same_named_field() {
    let mut row: Row = serde_json::from_value(json!({"id": 1, "score": "old", "name": "x"})).expect("row");
    row.attach_scores(DefaultScoreFields.score_fields("score", 3.0));
    assert_eq!(row.key("id"), Some(RecordId::Int(1)));
    assert_eq!(row.into_inner(), json!({"id": 1, "score": 3.0, "name": "x"}).as_object().cloned().unwrap_or_default());
}

#[test]
fn prefix_resolver_translates_and_rejects() {
    let numeric = PrefixKeyResolver::new("user:");
    assert_eq!(numeric.resolve_key("user:17").expect("id"), RecordId::Int(17));
    for bad in ["user:", "team:17", "user:abc"] {
        let err = numeric.resolve_key(bad).expect_err(bad);
        assert!(matches!(err.downcast_ref::<Error>(), Some(Error::UnresolvableKey(_))), "{bad}");
    }

    let uuids = PrefixKeyResolver::new("doc:").allow_string_ids(true);
    assert_eq!(uuids.resolve_key("doc:9f1c").expect("id"), RecordId::Str("9f1c".into()));
    assert_eq!(uuids.prefix(), "doc:");
}

#[test]
fn config_reads_resolver_section_from_toml() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("config.toml"), "[resolver]\nmodel_key = \"uuid\"\n").unwrap();

    let config = Config::load_in(tmp.path()).expect("config");
    let resolver = config.resolver().expect("resolver section");
    assert_eq!(resolver, ResolverConfig { model_key: "uuid".into(), score_field: "score".into() });
}

#[test]
fn config_without_resolver_section_uses_defaults() {
    let tmp = TempDir::new().unwrap();
    let config = Config::load_in(tmp.path()).expect("config");
    assert_eq!(config.resolver().expect("defaults"), ResolverConfig::default());
}

#[test]
fn empty_field_names_are_rejected() {
    let bad = ResolverConfig { model_key: "id".into(), score_field: " ".into() };
    assert!(matches!(bad.validate(), Err(Error::InvalidConfig(_))));

    let figment = Figment::from(Serialized::default("resolver", ResolverConfig { model_key: String::new(), score_field: "s".into() }));
    assert!(Config::from_figment(figment).is_err());
}

#[test]
fn relative_paths_resolve_against_base() {
    let base = std::path::Path::new("/srv/data");
    assert_eq!(resolve_with_base(base, "ranked.json"), base.join("ranked.json"));
    assert_eq!(resolve_with_base(base, "/tmp/ranked.json"), std::path::PathBuf::from("/tmp/ranked.json"));
}
