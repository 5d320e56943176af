//! CSV writing of export rows.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use csv::WriterBuilder;
use tracing::{debug, info};

use dtc_core::TrainingAnalyzer;
use dtc_model::ExportRow;

use crate::error::{ReportError, Result};
use crate::naming::export_file_name;

/// Column headers of an export file.
pub const EXPORT_HEADERS: [&str; 8] = [
    "نمایندگی",
    "نام پرسنل",
    "سمت",
    "معیار",
    "دسته",
    "خودرو",
    "گذرانده شده",
    "دلیل",
];

/// Writes `rows` to `path`, header first.
pub fn write_export_rows(path: &Path, rows: &[ExportRow]) -> Result<()> {
    let write_error = |source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(write_error)?;
    writer.write_record(EXPORT_HEADERS).map_err(write_error)?;
    for row in rows {
        writer
            .write_record([
                row.dealer.as_str(),
                row.name.as_str(),
                row.position.as_str(),
                row.criterion.as_str(),
                row.source.label(),
                row.category.as_str(),
                row.pass_label(),
                row.reason.label(),
            ])
            .map_err(write_error)?;
    }
    writer.flush().map_err(|source| ReportError::Flush {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

/// Writes one dealer's export into `output_dir` and returns the file path.
pub fn export_dealer(
    analyzer: &TrainingAnalyzer<'_>,
    dealer_name: &str,
    output_dir: &Path,
) -> Result<PathBuf> {
    create_output_dir(output_dir)?;
    let path = output_dir.join(export_file_name(dealer_name));
    write_dealer(analyzer, dealer_name, &path)?;
    Ok(path)
}

/// Writes one file per dealer of the dataset into `output_dir`.
///
/// Dealers whose file names collide get a numeric suffix.
pub fn export_all(analyzer: &TrainingAnalyzer<'_>, output_dir: &Path) -> Result<Vec<PathBuf>> {
    create_output_dir(output_dir)?;
    let mut used = BTreeSet::new();
    let mut outputs = Vec::new();
    for dealer_name in analyzer.dataset().dealer_names() {
        let path = output_dir.join(unique_file_name(&mut used, dealer_name));
        write_dealer(analyzer, dealer_name, &path)?;
        outputs.push(path);
    }
    info!(dir = %output_dir.display(), files = outputs.len(), "export complete");
    Ok(outputs)
}

fn write_dealer(analyzer: &TrainingAnalyzer<'_>, dealer_name: &str, path: &Path) -> Result<()> {
    let rows = analyzer.dealer_export_rows(dealer_name);
    write_export_rows(path, &rows)?;
    debug!(path = %path.display(), rows = rows.len(), "wrote dealer export");
    Ok(())
}

fn create_output_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|source| ReportError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })
}

fn unique_file_name(used: &mut BTreeSet<String>, dealer_name: &str) -> String {
    let base = export_file_name(dealer_name);
    if used.insert(base.clone()) {
        return base;
    }
    let stem = base.trim_end_matches(".csv");
    let mut counter = 2usize;
    loop {
        let candidate = format!("{stem} ({counter}).csv");
        if used.insert(candidate.clone()) {
            return candidate;
        }
        counter += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colliding_names_get_suffixes() {
        let mut used = BTreeSet::new();
        assert_eq!(unique_file_name(&mut used, "الف - مرکزی"), "مرکزی.csv");
        assert_eq!(unique_file_name(&mut used, "ب - مرکزی"), "مرکزی (2).csv");
        assert_eq!(unique_file_name(&mut used, "ج - مرکزی"), "مرکزی (3).csv");
    }
}
