//! Canonicalization of free-text Persian spreadsheet cells.
//!
//! Every cell of every loaded table goes through [`normalize`] so that joins
//! across independently maintained spreadsheets compare like with like.

#![deny(unsafe_code)]

pub mod text;

pub use text::{
    JOINER, NormalizeMode, is_present, join_values, normalize, normalize_opt, split_values,
};
