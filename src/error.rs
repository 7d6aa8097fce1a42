//! Errors reported to callers of the library

use thiserror::Error;

/// Requested maze size cannot be used
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("maze size {size} is out of range, expected a number between {min} and {max}")]
    SizeOutOfRange { size: usize, min: usize, max: usize },
}
