#![deny(unsafe_code)]

pub mod columns;
pub mod csv_table;
pub mod error;
pub mod loaders;

pub use csv_table::{CsvTable, read_csv_table, sanitize_table};
pub use error::{IngestError, Result};
pub use loaders::{
    DealerTable, RequirementTables, load_dealer_table, load_personnel, load_requirement_tables,
};
