use std::error::Error;
use std::fmt;

use crate::math::ShapeError;

/// Failures of [`crate::bank::ArrayBank`] slot operations.
#[derive(Debug)]
pub enum BankError {
    Full { capacity: usize },
    NoSlot { index: usize, len: usize },
    Record { label: String, source: ShapeError },
    InvalidCell { text: String },
}

impl fmt::Display for BankError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BankError::Full { capacity } => write!(f, "Bank is full ({} arrays)", capacity),
            BankError::NoSlot { index, len } => {
                write!(f, "No array at slot {} (bank holds {})", index, len)
            }
            BankError::Record { label, source } => {
                write!(f, "Cannot restore array '{}': {}", label, source)
            }
            BankError::InvalidCell { text } => write!(f, "Cell value is not a number: {:?}", text),
        }
    }
}

impl Error for BankError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            BankError::Record { source, .. } => Some(source),
            _ => None,
        }
    }
}
