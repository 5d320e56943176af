//! File-system repository for mapping tables.
//!
//! Each [`MappingKind`] is stored as a two-column CSV file in one directory.
//! The first line is a header and is discarded on load; rows with fewer than
//! two cells are ignored.

use std::fs;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, WriterBuilder};
use tracing::{debug, warn};

use dtc_model::MappingKind;

use crate::error::{MappingError, Result};
use crate::table::{MappingSet, MappingTable};

const HEADER: [&str; 2] = ["Raw", "Mapped"];

/// Directory holding one CSV file per mapping kind.
#[derive(Debug, Clone)]
pub struct MappingRepository {
    base_dir: PathBuf,
}

impl MappingRepository {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn path_for(&self, kind: MappingKind) -> PathBuf {
        self.base_dir.join(kind.file_name())
    }

    /// Loads one table. A missing file yields an empty table.
    pub fn load_table(&self, kind: MappingKind) -> Result<MappingTable> {
        let path = self.path_for(kind);
        if !path.exists() {
            debug!(kind = %kind, path = %path.display(), "mapping file not found");
            return Ok(MappingTable::new(kind));
        }
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&path)
            .map_err(|error| MappingError::csv(&path, error))?;
        let mut table = MappingTable::new(kind);
        for record in reader.records() {
            let record = record.map_err(|error| MappingError::csv(&path, error))?;
            if let (Some(raw), Some(standard)) = (record.get(0), record.get(1)) {
                table.insert(raw, standard);
            }
        }
        debug!(kind = %kind, entries = table.len(), "loaded mapping table");
        Ok(table)
    }

    /// Loads every table, degrading unreadable files to empty tables.
    pub fn load_all(&self) -> MappingSet {
        let mut set = MappingSet::new();
        for kind in MappingKind::ALL {
            match self.load_table(kind) {
                Ok(table) => set = set.with_table(table),
                Err(error) => warn!(kind = %kind, %error, "using empty mapping table"),
            }
        }
        set
    }

    /// Writes a table, replacing the previous file. Entries are sorted by key.
    pub fn save_table(&self, table: &MappingTable) -> Result<PathBuf> {
        fs::create_dir_all(&self.base_dir)
            .map_err(|error| MappingError::io(&self.base_dir, error))?;
        let path = self.path_for(table.kind());
        let mut writer = WriterBuilder::new()
            .from_path(&path)
            .map_err(|error| MappingError::csv(&path, error))?;
        writer
            .write_record(HEADER)
            .map_err(|error| MappingError::csv(&path, error))?;
        for (raw, standard) in table.iter() {
            writer
                .write_record([raw, standard])
                .map_err(|error| MappingError::csv(&path, error))?;
        }
        writer
            .flush()
            .map_err(|error| MappingError::io(&path, error))?;
        debug!(
            kind = %table.kind(),
            entries = table.len(),
            path = %path.display(),
            "saved mapping table"
        );
        Ok(path)
    }
}
