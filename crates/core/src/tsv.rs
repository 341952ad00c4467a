//! Tab-separated catalog import/export.
//!
//! One header row naming the six record fields, one row per game, dates
//! in ISO 8601 (`YYYY-MM-DD`). Line numbers in parse errors are 1-based
//! with the header counted as line 1.

use chrono::{Local, NaiveDate};

use crate::catalog::{validate_record, CatalogError};
use crate::models::GameRecord;

/// Expected header row of an import document.
pub const HEADER: &str = "name\tmin_players\tmax_players\tmax_duration\tlast_played\ttimes_played";

/// Date format used on both import and export.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const FIELD_COUNT: usize = 6;

/// Parse a whole TSV document into records.
///
/// Fails on the first malformed row; rows that parse but violate the
/// add-time invariants fail too, so an import can never introduce a
/// record that `Catalog::add` would have rejected. Blank lines are
/// skipped.
pub fn parse_catalog(text: &str) -> Result<Vec<GameRecord>, CatalogError> {
    let today = Local::now().date_naive();
    let mut lines = text.lines().enumerate();

    let header = lines
        .next()
        .map(|(_, line)| line.trim_end())
        .ok_or_else(|| parse_error(1, "missing header row"))?;
    if header != HEADER {
        return Err(parse_error(
            1,
            "header must name the six catalog fields, tab-separated",
        ));
    }

    let mut records = Vec::new();
    for (idx, line) in lines {
        let line_no = idx + 1;
        if line.trim().is_empty() {
            continue;
        }
        let record = parse_row(line.trim_end_matches('\r'), line_no)?;
        validate_record(&record, today)
            .map_err(|message| CatalogError::Parse { line: line_no, message })?;
        records.push(record);
    }
    Ok(records)
}

/// Render records back into the import shape, header included.
pub fn render_catalog(records: &[GameRecord]) -> String {
    let mut out = String::with_capacity(HEADER.len() + 1 + records.len() * 48);
    out.push_str(HEADER);
    out.push('\n');
    for record in records {
        out.push_str(&format!(
            "{}\t{}\t{}\t{}\t{}\t{}\n",
            record.name,
            record.min_players,
            record.max_players,
            record.max_duration,
            record.last_played.format(DATE_FORMAT),
            record.times_played,
        ));
    }
    out
}

fn parse_row(line: &str, line_no: usize) -> Result<GameRecord, CatalogError> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() != FIELD_COUNT {
        return Err(parse_error(
            line_no,
            format!(
                "expected {FIELD_COUNT} tab-separated fields, found {}",
                fields.len()
            ),
        ));
    }

    Ok(GameRecord {
        name: fields[0].trim().to_string(),
        min_players: parse_count(fields[1], "min_players", line_no)?,
        max_players: parse_count(fields[2], "max_players", line_no)?,
        max_duration: parse_count(fields[3], "max_duration", line_no)?,
        last_played: parse_date(fields[4], line_no)?,
        times_played: parse_count(fields[5], "times_played", line_no)?,
    })
}

fn parse_count(raw: &str, field: &str, line_no: usize) -> Result<u32, CatalogError> {
    let trimmed = raw.trim();
    trimmed
        .parse()
        .map_err(|_| parse_error(line_no, format!("invalid {field} '{trimmed}'")))
}

fn parse_date(raw: &str, line_no: usize) -> Result<NaiveDate, CatalogError> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|_| {
        parse_error(
            line_no,
            format!("invalid date '{trimmed}', expected YYYY-MM-DD"),
        )
    })
}

fn parse_error(line: usize, message: impl Into<String>) -> CatalogError {
    CatalogError::Parse {
        line,
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_render_round_trip() {
        let text = format!(
            "{HEADER}\nChess\t2\t2\t30\t2024-05-01\t5\nCatan\t3\t4\t90\t2024-03-10\t1\n"
        );
        let records = parse_catalog(&text).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Chess");
        assert_eq!(records[1].min_players, 3);
        assert_eq!(
            records[1].last_played,
            NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
        );
        assert_eq!(render_catalog(&records), text);
    }

    #[test]
    fn blank_lines_and_crlf_are_tolerated() {
        let text = format!("{HEADER}\r\nChess\t2\t2\t30\t2024-05-01\t5\r\n\r\n");
        let records = parse_catalog(&text).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].times_played, 5);
    }

    #[test]
    fn rejects_wrong_header() {
        let err = parse_catalog("name\tplayers\nChess\t2\n").unwrap_err();
        assert!(matches!(err, CatalogError::Parse { line: 1, .. }));
    }

    #[test]
    fn rejects_short_row_with_line_number() {
        let text = format!("{HEADER}\nChess\t2\t2\n");
        let err = parse_catalog(&text).unwrap_err();
        assert!(matches!(err, CatalogError::Parse { line: 2, .. }));
    }

    #[test]
    fn rejects_bad_date_format() {
        // Standardized on ISO 8601; the original tool's locale-dependent
        // parsing is deliberately not reproduced.
        let text = format!("{HEADER}\nChess\t2\t2\t30\t05/01/2024\t5\n");
        let err = parse_catalog(&text).unwrap_err();
        assert!(matches!(err, CatalogError::Parse { line: 2, .. }));
    }

    #[test]
    fn rejects_invalid_record_values() {
        let text = format!("{HEADER}\nBroken\t4\t2\t30\t2024-05-01\t5\n");
        let err = parse_catalog(&text).unwrap_err();
        assert!(matches!(err, CatalogError::Parse { line: 2, .. }));
    }
}
