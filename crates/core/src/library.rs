//! Library file persistence.
//!
//! The catalog lives in memory; the TSV library file on disk is only
//! read or written on explicit request. Writes go through a temp file
//! in the target directory so a crash never leaves a half-written
//! library behind.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use tracing::info;

use crate::catalog::Catalog;
use crate::models::GameRecord;
use crate::tsv;

/// Location of the default library below the user's config directory.
pub const DEFAULT_LIBRARY_FILE: &str = "gamenight/library.tsv";

/// Reads and writes a catalog's TSV file at a fixed path.
#[derive(Debug, Clone)]
pub struct LibraryStore {
    path: PathBuf,
}

impl LibraryStore {
    /// Create a store for the given library file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default library file under the user's config directory.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_LIBRARY_FILE)
    }

    /// Path this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the library, or an empty catalog if the file does not exist.
    pub fn load(&self) -> Result<Catalog> {
        if !self.path.exists() {
            return Ok(Catalog::new());
        }
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        let records = tsv::parse_catalog(&text)
            .with_context(|| format!("failed to parse {}", self.path.display()))?;
        info!(games = records.len(), path = %self.path.display(), "loaded library");
        Ok(Catalog::from_records(records))
    }

    /// Write the catalog to the library file, creating directories as
    /// needed.
    pub fn save(&self, catalog: &Catalog) -> Result<()> {
        write_export(&self.path, catalog.export_snapshot())
    }
}

/// Read a TSV document for bulk import.
pub fn read_import(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Write an export snapshot to an arbitrary path, atomically.
pub fn write_export(path: impl AsRef<Path>, records: &[GameRecord]) -> Result<()> {
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)
        .with_context(|| format!("failed to create {}", parent.display()))?;

    let rendered = tsv::render_catalog(records);
    let tmp = tempfile::NamedTempFile::new_in(parent)
        .with_context(|| format!("failed to create temp file in {}", parent.display()))?;
    fs::write(tmp.path(), rendered)
        .with_context(|| format!("failed to write {}", tmp.path().display()))?;
    tmp.persist(path)
        .with_context(|| format!("failed to replace {}", path.display()))?;
    info!(games = records.len(), path = %path.display(), "wrote library");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn sample_catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog
            .add(GameRecord {
                name: "Chess".to_string(),
                min_players: 2,
                max_players: 2,
                max_duration: 30,
                last_played: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
                times_played: 5,
            })
            .unwrap();
        catalog
            .add(GameRecord {
                name: "Catan".to_string(),
                min_players: 3,
                max_players: 4,
                max_duration: 90,
                last_played: NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
                times_played: 1,
            })
            .unwrap();
        catalog
    }

    #[test]
    fn save_and_load_round_trip() -> Result<()> {
        let dir = tempdir()?;
        let store = LibraryStore::new(dir.path().join("library.tsv"));
        let catalog = sample_catalog();

        store.save(&catalog)?;
        let loaded = store.load()?;
        assert_eq!(loaded.records(), catalog.records());
        Ok(())
    }

    #[test]
    fn missing_library_loads_empty() -> Result<()> {
        let dir = tempdir()?;
        let store = LibraryStore::new(dir.path().join("nope").join("library.tsv"));
        let catalog = store.load()?;
        assert!(catalog.is_empty());
        Ok(())
    }

    #[test]
    fn export_then_import_preserves_rows() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("export.tsv");
        let catalog = sample_catalog();

        write_export(&path, catalog.export_snapshot())?;
        let text = read_import(&path)?;

        let mut other = Catalog::new();
        let added = other.import_bulk(&text).unwrap();
        assert_eq!(added, 2);
        assert_eq!(other.records(), catalog.records());
        Ok(())
    }
}
