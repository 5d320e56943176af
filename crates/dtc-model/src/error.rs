use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("unknown mapping kind: {0}")]
    UnknownMappingKind(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
