use crate::schema::{RewardConfig, SpellCatalog, REWARD_FILE, SPELLS_FILE};
use anyhow::Context;
use serde::de::DeserializeOwned;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("spell catalog not found at {0}")]
    Missing(PathBuf),
    #[error("read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed spell catalog: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Parse a catalog source: an object mapping arbitrary keys to
/// `{ "name": ..., "description": ... }` entries.
pub fn parse_spell_catalog(raw: &str) -> Result<SpellCatalog, CatalogLoadError> {
    Ok(serde_json::from_str(raw)?)
}

pub fn load_spell_catalog(path: &Path) -> Result<SpellCatalog, CatalogLoadError> {
    let raw = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            CatalogLoadError::Missing(path.to_path_buf())
        } else {
            CatalogLoadError::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    let catalog = parse_spell_catalog(&raw)?;
    info!(entries = catalog.len(), path = %path.display(), "loaded spell catalog");
    Ok(catalog)
}

/// Catalog failures are not fatal: descriptions simply come out empty.
pub fn load_spell_catalog_or_empty(path: &Path) -> SpellCatalog {
    match load_spell_catalog(path) {
        Ok(catalog) => catalog,
        Err(err) => {
            warn!("{}; continuing with an empty spell catalog", err);
            SpellCatalog::new()
        }
    }
}

pub fn load_catalog(dir: &Path) -> SpellCatalog {
    load_spell_catalog_or_empty(&dir.join(SPELLS_FILE))
}

pub fn parse_reward_config(raw: &str) -> anyhow::Result<RewardConfig> {
    let config: RewardConfig = serde_json::from_str(raw).context("parse reward config")?;
    config.validate().context("validate reward config")?;
    Ok(config)
}

pub fn load_reward_config(dir: &Path) -> anyhow::Result<RewardConfig> {
    let path = dir.join(REWARD_FILE);
    let config: RewardConfig = load_json(&path)?;
    config
        .validate()
        .with_context(|| format!("validate {}", path.display()))?;
    Ok(config)
}

fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> anyhow::Result<T> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let value = serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(value)
}
