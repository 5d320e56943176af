//! Typed loaders for the personnel, dealer-category and requirement tables.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use dtc_model::{DealerProfile, PersonnelRecord, RequirementRow, RequirementSource};
use dtc_normalization::{NormalizeMode, is_present, normalize, split_values};

use crate::columns;
use crate::csv_table::{CsvTable, read_csv_table, sanitize_table};
use crate::error::{IngestError, Result};

/// Requirement rows per company (sheet) name.
pub type RequirementTables = BTreeMap<String, Vec<RequirementRow>>;

fn read_sanitized(path: &Path) -> Result<CsvTable> {
    let mut table = read_csv_table(path)?;
    sanitize_table(&mut table);
    Ok(table)
}

fn require_column(table: &CsvTable, path: &Path, column: &str) -> Result<usize> {
    table
        .column_index(column)
        .ok_or_else(|| IngestError::MissingColumn {
            path: path.to_path_buf(),
            column: column.to_string(),
        })
}

/// Loads the personnel roster, one record per row.
///
/// Rows without a personnel code are dropped. Columns the analysis does not
/// interpret are kept in [`PersonnelRecord::extra`].
pub fn load_personnel(path: &Path) -> Result<Vec<PersonnelRecord>> {
    let table = read_sanitized(path)?;
    if table.headers.is_empty() {
        return Ok(Vec::new());
    }
    let code_col = require_column(&table, path, columns::PERSONNEL_CODE)?;
    let dealer_col = require_column(&table, path, columns::DEALER_NAME)?;
    let name_col = require_column(&table, path, columns::FULL_NAME)?;
    let company_col = table.column_index(columns::COMPANY);
    let main_col = table.column_index(columns::MAIN_POSITION);
    let alternate_col = table.column_index(columns::ALTERNATE_POSITIONS);
    let course_col = table.column_index(columns::PASSED_COURSE);
    let known: BTreeSet<usize> = [
        Some(code_col),
        Some(dealer_col),
        Some(name_col),
        company_col,
        main_col,
        alternate_col,
        course_col,
    ]
    .into_iter()
    .flatten()
    .collect();

    let mut records = Vec::with_capacity(table.rows.len());
    let mut skipped = 0usize;
    for row in &table.rows {
        let code = table.cell(row, Some(code_col));
        if !is_present(&code) {
            skipped += 1;
            continue;
        }
        let alternates = table.cell(row, alternate_col);
        let mut record = PersonnelRecord::new(
            code,
            table.cell(row, Some(name_col)),
            table.cell(row, Some(dealer_col)),
            table.cell(row, company_col),
        )
        .with_main_position(table.cell(row, main_col))
        .with_alternate_positions(split_values(&alternates));
        let course = table.cell(row, course_col);
        if is_present(&course) {
            record.passed_courses.insert(course);
        }
        for (idx, header) in table.headers.iter().enumerate() {
            if known.contains(&idx) {
                continue;
            }
            if let Some(value) = row.get(idx).filter(|value| is_present(value)) {
                record.extra.insert(header.clone(), value.clone());
            }
        }
        records.push(record);
    }
    if skipped > 0 {
        warn!(path = %path.display(), skipped, "personnel rows without a code were dropped");
    }
    debug!(path = %path.display(), records = records.len(), "loaded personnel");
    Ok(records)
}

/// The dealer-category table: every category label plus one profile per dealer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DealerTable {
    /// Category labels of the flag columns, in column order.
    pub categories: Vec<String>,
    pub profiles: Vec<DealerProfile>,
}

/// Loads the dealer-category table.
///
/// Column 0 is the dealer code, column 1 (when present) the dealer name, and
/// the flag columns carry one vehicle category each.
pub fn load_dealer_table(path: &Path) -> Result<DealerTable> {
    let table = read_sanitized(path)?;
    let flag_end = table.headers.len().min(columns::CATEGORY_FLAGS_END);
    let categories: Vec<(usize, String)> = (columns::CATEGORY_FLAGS_START..flag_end)
        .map(|idx| (idx, normalize(&table.headers[idx], NormalizeMode::Text)))
        .filter(|(_, label)| !label.is_empty())
        .collect();

    let mut profiles = Vec::with_capacity(table.rows.len());
    for row in &table.rows {
        let code = table.cell(row, Some(0));
        if !is_present(&code) {
            continue;
        }
        let name = table.cell(row, Some(1));
        let authorized_categories = categories
            .iter()
            .filter(|(idx, _)| {
                row.get(*idx)
                    .is_some_and(|flag| flag.trim().eq_ignore_ascii_case(columns::AUTHORIZED_FLAG))
            })
            .map(|(_, label)| label.clone())
            .collect();
        profiles.push(DealerProfile {
            dealer_code: code,
            dealer_name: is_present(&name).then_some(name),
            authorized_categories,
        });
    }
    debug!(path = %path.display(), dealers = profiles.len(), "loaded dealer profiles");
    Ok(DealerTable {
        categories: categories.into_iter().map(|(_, label)| label).collect(),
        profiles,
    })
}

/// Loads one requirement table per `*.csv` file in `dir`, keyed by file stem.
///
/// A missing directory yields no tables. A file that cannot be read or lacks a
/// required column is skipped with a warning so the other companies still load.
pub fn load_requirement_tables(dir: &Path, source: RequirementSource) -> Result<RequirementTables> {
    let mut tables = RequirementTables::new();
    if !dir.is_dir() {
        debug!(dir = %dir.display(), %source, "requirement directory not found");
        return Ok(tables);
    }
    let entries = fs::read_dir(dir).map_err(|error| IngestError::Io {
        path: dir.to_path_buf(),
        source: error,
    })?;
    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|entry| entry.path()))
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
        })
        .collect();
    paths.sort();

    for path in paths {
        let Some(company) = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .map(|stem| stem.trim().to_string())
            .filter(|stem| !stem.is_empty())
        else {
            continue;
        };
        match load_requirement_rows(&path, source) {
            Ok(rows) => {
                debug!(%source, company = %company, rows = rows.len(), "loaded requirement table");
                tables.insert(company, rows);
            }
            Err(error) => warn!(%source, company = %company, %error, "skipping requirement table"),
        }
    }
    Ok(tables)
}

fn load_requirement_rows(path: &Path, source: RequirementSource) -> Result<Vec<RequirementRow>> {
    let table = read_sanitized(path)?;
    if table.headers.is_empty() {
        return Ok(Vec::new());
    }
    let job_col = require_column(&table, path, columns::JOB_POST)?;
    let criterion_col = require_column(&table, path, columns::CRITERION)?;
    let course_col = require_column(&table, path, columns::REQUIRED_COURSE)?;
    let vehicle_col = match source {
        RequirementSource::AfterSales => table.column_index(columns::VEHICLE),
        RequirementSource::Sales => None,
    };
    let rows = table
        .rows
        .iter()
        .map(|row| {
            let vehicle = table.cell(row, vehicle_col);
            RequirementRow {
                job_post: table.cell(row, Some(job_col)),
                vehicle: is_present(&vehicle).then_some(vehicle),
                criterion: table.cell(row, Some(criterion_col)),
                course: table.cell(row, Some(course_col)),
            }
        })
        .collect();
    Ok(rows)
}
