use std::io;
use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced by [`crate::store::BookStore`]. A missing or corrupt
/// library file is not an error: loading falls back to an empty library.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Year must be a whole number, got {input:?}.")]
    InvalidYear {
        input: String,
        #[source]
        source: ParseIntError,
    },

    #[error("failed to read library file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write library file {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode library")]
    Encode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;
