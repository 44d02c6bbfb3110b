//! Errors raised while gathering region information.
//!
//! The introspection surface on `Address` never returns these. They surface
//! from the lower-level region map readers, which callers may use directly.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed region map on line {line}: {reason}")]
    MalformedRegionMap { line: usize, reason: String },
    #[error("Could not parse integer: {0}")]
    ParseInt(#[from] std::num::ParseIntError),
}
