//! Export of dealer training analysis.
//!
//! Each dealer is written to its own CSV file, named after the dealer's sheet
//! name, with one row per (person, position, criterion).

#![deny(unsafe_code)]

mod error;
mod export;
mod naming;

pub use error::{ReportError, Result};
pub use export::{EXPORT_HEADERS, export_all, export_dealer, write_export_rows};
pub use naming::{SHEET_NAME_MAX_CHARS, export_file_name, sheet_name};
