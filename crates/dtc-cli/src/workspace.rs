//! Configuration resolution and the mapping store shared by commands.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use dtc_core::{AppConfig, Dataset};
use dtc_map::{MappingRepository, MappingSet, MappingStore};
use dtc_model::MappingKind;

/// Loads the configuration and applies the CLI directory flags last.
pub fn resolve_config(
    config_path: Option<&Path>,
    resources: Option<PathBuf>,
    mappings: Option<PathBuf>,
) -> Result<AppConfig> {
    let mut config = AppConfig::load(config_path).context("load configuration")?;
    if let Some(dir) = resources {
        config.resource_dir = dir;
    }
    if let Some(dir) = mappings {
        config.mapping_dir = dir;
    }
    Ok(config)
}

/// Configuration plus the current mapping snapshot and its on-disk repository.
pub struct Workspace {
    config: AppConfig,
    repository: MappingRepository,
    store: MappingStore,
}

impl Workspace {
    pub fn open(config: AppConfig) -> Self {
        let repository = MappingRepository::new(&config.mapping_dir);
        let store = MappingStore::new(repository.load_all());
        Self {
            config,
            repository,
            store,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn mappings(&self) -> Arc<MappingSet> {
        self.store.snapshot()
    }

    /// Loads the dataset against the current mapping snapshot.
    pub fn load_dataset(&self) -> Dataset {
        Dataset::load(&self.config, &self.mappings())
    }

    /// Adds or replaces one entry, saves its table and swaps the snapshot.
    pub fn set_mapping(&self, kind: MappingKind, raw: &str, standard: &str) -> Result<PathBuf> {
        let mut table = self.mappings().table(kind).clone();
        if !table.insert(raw, standard) {
            anyhow::bail!("mapping values must not be blank");
        }
        let path = self
            .repository
            .save_table(&table)
            .with_context(|| format!("save {kind} mapping"))?;
        self.store.replace_table(table);
        info!(%kind, path = %path.display(), "mapping entry saved");
        Ok(path)
    }

    /// Removes one entry; returns the removed standard value when it existed.
    pub fn remove_mapping(&self, kind: MappingKind, raw: &str) -> Result<Option<String>> {
        let mut table = self.mappings().table(kind).clone();
        let Some(removed) = table.remove(raw.trim()) else {
            return Ok(None);
        };
        let path = self
            .repository
            .save_table(&table)
            .with_context(|| format!("save {kind} mapping"))?;
        self.store.replace_table(table);
        info!(%kind, path = %path.display(), "mapping entry removed");
        Ok(Some(removed))
    }
}
