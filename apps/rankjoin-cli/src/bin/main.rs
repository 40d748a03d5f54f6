use std::collections::HashSet;
use std::env;
use std::fs;
use std::path::Path;

use anyhow::Context;
use rankjoin_core::config::{expand_path, Config};
use rankjoin_core::error::Error;
use rankjoin_core::keys::PrefixKeyResolver;
use rankjoin_core::record::Row;
use rankjoin_core::traits::Record;
use rankjoin_core::types::{RankedResult, RecordId};
use rankjoin_resolver::Resolver;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_env("RANKJOIN_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(true).with_writer(std::io::stderr).init();
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    if !path.exists() {
        return Err(Error::NotFound(path.display().to_string()).into());
    }
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: {} <ranked.json> <records.json> [--prefix <prefix>] [--string-ids]", args[0]);
        eprintln!("Example: {} leaderboard.json users.json --prefix user:", args[0]);
        std::process::exit(1);
    }
    init_tracing();

    let ranked_path = expand_path(&args[1]);
    let records_path = expand_path(&args[2]);
    let mut prefix = String::new();
    let mut string_ids = false;
    let mut rest = args[3..].iter();
    while let Some(flag) = rest.next() {
        match flag.as_str() {
            "--prefix" => prefix = rest.next().cloned().context("--prefix needs a value")?,
            "--string-ids" => string_ids = true,
            other => anyhow::bail!("unknown argument '{}'", other),
        }
    }

    let settings = Config::load()?.resolver()?;
    let ranked: RankedResult = read_json(&ranked_path)?;
    let table: Vec<Row> = read_json(&records_path)?;
    info!(entries = ranked.len(), records = table.len(), model_key = %settings.model_key, "inputs loaded");

    let model_key = settings.model_key.clone();
    let loader = |ids: &[RecordId]| -> anyhow::Result<Vec<Row>> {
        let wanted: HashSet<&RecordId> = ids.iter().collect();
        Ok(table.iter().filter(|row| row.key(&model_key).is_some_and(|id| wanted.contains(&id))).cloned().collect())
    };
    let resolver = Resolver::new(PrefixKeyResolver::new(prefix).allow_string_ids(string_ids), loader).with_config(settings);

    let merged: Vec<Row> = resolver.resolve(&ranked)?;
    info!(resolved = merged.len(), dropped = ranked.len() - merged.len(), "done");
    println!("{}", serde_json::to_string_pretty(&merged)?);
    Ok(())
}
