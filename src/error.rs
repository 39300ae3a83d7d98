//! Error types

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ObfuscationError {
    #[error("selected variant {index} is out of range for a node with {len} messages")]
    SelectionOutOfRange { index: usize, len: usize },
    #[error("unknown obfuscation mode: {0}")]
    UnknownMode(String),
}

pub type Result<T> = std::result::Result<T, ObfuscationError>;
