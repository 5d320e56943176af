#![deny(unsafe_code)]

pub mod error;
pub mod repository;
pub mod store;
pub mod suggest;
pub mod table;

pub use error::{MappingError, Result};
pub use repository::MappingRepository;
pub use store::MappingStore;
pub use suggest::{SUGGESTION_THRESHOLD, Suggestion, suggest_standard};
pub use table::{MappingSet, MappingTable};
