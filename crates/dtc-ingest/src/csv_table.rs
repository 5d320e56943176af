use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use dtc_normalization::{NormalizeMode, normalize};

use crate::columns::COURSE_COLUMNS;
use crate::error::{IngestError, Result};

/// A header row plus data rows, every row padded to the header width.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    /// Index of the column whose header matches `name` after normalization.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        let wanted = header_key(name);
        self.headers
            .iter()
            .position(|header| header_key(header) == wanted)
    }

    /// Cell at `row`/`column`, empty when the column is absent.
    pub fn cell(&self, row: &[String], column: Option<usize>) -> String {
        column
            .and_then(|idx| row.get(idx))
            .cloned()
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn header_key(raw: &str) -> String {
    normalize(raw, NormalizeMode::Text)
}

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Reads a CSV file whose first non-blank row is the header.
///
/// Fully blank rows are skipped and short rows are padded with empty cells.
pub fn read_csv_table(path: &Path) -> Result<CsvTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|source| csv_error(path, source))?;
    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| csv_error(path, source))?;
        let row: Vec<String> = record.iter().map(normalize_cell).collect();
        if row.iter().all(|value| value.is_empty()) {
            continue;
        }
        raw_rows.push(row);
    }
    let mut rows = raw_rows.into_iter();
    let Some(header_row) = rows.next() else {
        return Ok(CsvTable::default());
    };
    let headers: Vec<String> = header_row
        .iter()
        .map(String::as_str)
        .map(normalize_header)
        .collect();
    let rows: Vec<Vec<String>> = rows
        .map(|mut row| {
            row.resize(headers.len(), String::new());
            row
        })
        .collect();
    debug!(path = %path.display(), columns = headers.len(), rows = rows.len(), "read csv table");
    Ok(CsvTable { headers, rows })
}

fn csv_error(path: &Path, source: csv::Error) -> IngestError {
    IngestError::Csv {
        path: path.to_path_buf(),
        source,
    }
}

/// Normalizes every cell; course-title columns also lose internal whitespace.
pub fn sanitize_table(table: &mut CsvTable) {
    let modes: Vec<NormalizeMode> = table
        .headers
        .iter()
        .map(|header| {
            let key = header_key(header);
            let is_course = COURSE_COLUMNS
                .iter()
                .any(|course| header_key(course) == key);
            NormalizeMode::from_remove_spaces(is_course)
        })
        .collect();
    for row in &mut table.rows {
        for (cell, mode) in row.iter_mut().zip(&modes) {
            *cell = normalize(cell, *mode);
        }
    }
}
