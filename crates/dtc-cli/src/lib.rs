//! Library components of the `dtc` command-line shell.

#![deny(unsafe_code)]

pub mod logging;
pub mod render;
pub mod workspace;
