//! The in-memory game catalog.
//!
//! An ordered collection of [`GameRecord`]s addressed by position.
//! Positions shift on delete, so callers re-fetch after any mutation.
//! Nothing here touches the disk; persistence is explicit via
//! [`crate::library`].

use chrono::{Local, NaiveDate};
use thiserror::Error;
use tracing::debug;

use crate::models::GameRecord;
use crate::tsv;

/// Errors reported by catalog mutations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// A record failed validation on add; the catalog is unchanged.
    #[error("invalid game: {0}")]
    Validation(String),
    /// Edit or delete addressed a position past the end of the catalog.
    #[error("row {position} is out of range (catalog has {len} rows)")]
    OutOfRange {
        /// Position requested by the caller.
        position: usize,
        /// Catalog length at the time of the call.
        len: usize,
    },
    /// A row of an import batch could not be parsed; nothing was applied.
    #[error("import line {line}: {message}")]
    Parse {
        /// 1-based line number in the imported document (header is line 1).
        line: usize,
        /// What went wrong with the row.
        message: String,
    },
}

/// A single-field update applied to a record in place.
///
/// Field edits intentionally skip cross-field re-validation, matching
/// the grid-editing behavior of the original tool: setting
/// `min_players` above `max_players` is accepted and simply makes the
/// record ineligible for every player count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Replace the display name.
    Name(String),
    /// Replace the smallest supported player count.
    MinPlayers(u32),
    /// Replace the largest supported player count.
    MaxPlayers(u32),
    /// Replace the longest expected playtime.
    MaxDuration(u32),
    /// Replace the last-played date.
    LastPlayed(NaiveDate),
    /// Replace the total play count.
    TimesPlayed(u32),
}

/// Ordered collection of games owned by the interactive session.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<GameRecord>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap records that have already been validated (e.g. a parsed
    /// library file).
    pub fn from_records(records: Vec<GameRecord>) -> Self {
        Self { records }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the catalog holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record at `position`, if any.
    pub fn get(&self, position: usize) -> Option<&GameRecord> {
        self.records.get(position)
    }

    /// All records in display order.
    pub fn records(&self) -> &[GameRecord] {
        &self.records
    }

    /// Validate and append a record.
    pub fn add(&mut self, record: GameRecord) -> Result<(), CatalogError> {
        validate_record(&record, Local::now().date_naive())
            .map_err(CatalogError::Validation)?;
        debug!(name = %record.name, "adding game");
        self.records.push(record);
        Ok(())
    }

    /// Update one field of the record at `position` in place.
    pub fn edit(&mut self, position: usize, value: FieldValue) -> Result<(), CatalogError> {
        let len = self.records.len();
        let record = self
            .records
            .get_mut(position)
            .ok_or(CatalogError::OutOfRange { position, len })?;
        match value {
            FieldValue::Name(name) => record.name = name,
            FieldValue::MinPlayers(min) => record.min_players = min,
            FieldValue::MaxPlayers(max) => record.max_players = max,
            FieldValue::MaxDuration(minutes) => record.max_duration = minutes,
            FieldValue::LastPlayed(date) => record.last_played = date,
            FieldValue::TimesPlayed(times) => record.times_played = times,
        }
        Ok(())
    }

    /// Remove and return the record at `position`, shifting the tail.
    pub fn delete(&mut self, position: usize) -> Result<GameRecord, CatalogError> {
        if position >= self.records.len() {
            return Err(CatalogError::OutOfRange {
                position,
                len: self.records.len(),
            });
        }
        Ok(self.records.remove(position))
    }

    /// Parse a TSV document and append every row.
    ///
    /// All-or-nothing: a single malformed row fails the whole batch and
    /// leaves the catalog untouched. Returns the number of rows added.
    pub fn import_bulk(&mut self, text: &str) -> Result<usize, CatalogError> {
        let parsed = tsv::parse_catalog(text)?;
        let added = parsed.len();
        debug!(rows = added, "importing games");
        self.records.extend(parsed);
        Ok(added)
    }

    /// Point-in-time snapshot for serialization. Read-only.
    pub fn export_snapshot(&self) -> &[GameRecord] {
        &self.records
    }
}

/// Check the numeric and date invariants a record must satisfy on add.
pub(crate) fn validate_record(record: &GameRecord, today: NaiveDate) -> Result<(), String> {
    if record.name.trim().is_empty() {
        return Err("name must not be empty".to_string());
    }
    if record.min_players == 0 || record.max_players == 0 {
        return Err("player counts must be at least 1".to_string());
    }
    if record.min_players > record.max_players {
        return Err(format!(
            "min players ({}) exceeds max players ({})",
            record.min_players, record.max_players
        ));
    }
    if record.last_played > today {
        return Err(format!(
            "last played date {} is in the future",
            record.last_played
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn game(name: &str, min: u32, max: u32, duration: u32, times: u32) -> GameRecord {
        GameRecord {
            name: name.to_string(),
            min_players: min,
            max_players: max,
            max_duration: duration,
            last_played: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            times_played: times,
        }
    }

    #[test]
    fn add_appends_in_order() {
        let mut catalog = Catalog::new();
        catalog.add(game("Chess", 2, 2, 30, 5)).unwrap();
        catalog.add(game("Catan", 3, 4, 90, 1)).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(0).unwrap().name, "Chess");
        assert_eq!(catalog.get(1).unwrap().name, "Catan");
    }

    #[test]
    fn add_rejects_inverted_player_bounds() {
        let mut catalog = Catalog::new();
        let err = catalog.add(game("Broken", 4, 2, 30, 0)).unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
        assert!(catalog.is_empty());
    }

    #[test]
    fn add_rejects_empty_name_and_zero_players() {
        let mut catalog = Catalog::new();
        assert!(catalog.add(game("  ", 1, 2, 30, 0)).is_err());
        assert!(catalog.add(game("Zero", 0, 2, 30, 0)).is_err());
        assert!(catalog.is_empty());
    }

    #[test]
    fn add_rejects_future_last_played() {
        let mut catalog = Catalog::new();
        let mut record = game("Tomorrow", 1, 2, 30, 0);
        record.last_played = Local::now().date_naive() + chrono::Duration::days(1);
        assert!(matches!(
            catalog.add(record),
            Err(CatalogError::Validation(_))
        ));
    }

    #[test]
    fn edit_updates_single_field_without_revalidation() {
        let mut catalog = Catalog::new();
        catalog.add(game("Chess", 2, 2, 30, 5)).unwrap();
        catalog.edit(0, FieldValue::TimesPlayed(6)).unwrap();
        assert_eq!(catalog.get(0).unwrap().times_played, 6);

        // Inverting the bounds through an edit is accepted; the record
        // just stops matching any player count.
        catalog.edit(0, FieldValue::MinPlayers(9)).unwrap();
        assert_eq!(catalog.get(0).unwrap().min_players, 9);
    }

    #[test]
    fn edit_out_of_range_leaves_catalog_unchanged() {
        let mut catalog = Catalog::new();
        catalog.add(game("Chess", 2, 2, 30, 5)).unwrap();
        let err = catalog
            .edit(3, FieldValue::Name("Nope".to_string()))
            .unwrap_err();
        assert_eq!(err, CatalogError::OutOfRange { position: 3, len: 1 });
        assert_eq!(catalog.get(0).unwrap().name, "Chess");
    }

    #[test]
    fn delete_shifts_subsequent_positions() {
        let mut catalog = Catalog::new();
        catalog.add(game("Chess", 2, 2, 30, 5)).unwrap();
        catalog.add(game("Catan", 3, 4, 90, 1)).unwrap();
        catalog.add(game("Azul", 2, 4, 45, 2)).unwrap();

        let removed = catalog.delete(1).unwrap();
        assert_eq!(removed.name, "Catan");
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(1).unwrap().name, "Azul");

        assert!(matches!(
            catalog.delete(5),
            Err(CatalogError::OutOfRange { position: 5, len: 2 })
        ));
    }

    #[test]
    fn import_appends_parsed_rows() {
        let mut catalog = Catalog::new();
        catalog.add(game("Chess", 2, 2, 30, 5)).unwrap();
        let text = "name\tmin_players\tmax_players\tmax_duration\tlast_played\ttimes_played\n\
                    Catan\t3\t4\t90\t2024-03-10\t1\n\
                    Azul\t2\t4\t45\t2024-04-02\t2\n";
        let added = catalog.import_bulk(text).unwrap();
        assert_eq!(added, 2);
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.get(2).unwrap().name, "Azul");
    }

    #[test]
    fn import_with_bad_row_is_atomic() {
        let mut catalog = Catalog::new();
        catalog.add(game("Chess", 2, 2, 30, 5)).unwrap();
        let text = "name\tmin_players\tmax_players\tmax_duration\tlast_played\ttimes_played\n\
                    Catan\t3\t4\t90\t2024-03-10\t1\n\
                    Azul\t2\tfour\t45\t2024-04-02\t2\n";
        let err = catalog.import_bulk(text).unwrap_err();
        assert!(matches!(err, CatalogError::Parse { line: 3, .. }));
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get(0).unwrap().name, "Chess");
    }
}
