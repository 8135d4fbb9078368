use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::{debug, warn};

use crate::error::{Result, StoreError};
use crate::models::Book;

/// Indentation used for the persisted document.
const INDENT: &[u8] = b"    ";

/// Read the library document at `path`.
///
/// A missing file is the first-run case and a document that does not parse as
/// an array of books is treated the same way: both yield an empty library.
/// Any other read failure (permissions, a directory in the way) is returned.
pub fn load_library(path: &Path) -> Result<Vec<Book>> {
    let raw = match fs::read(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "library file not found, starting empty");
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(StoreError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    match serde_json::from_slice::<Vec<Book>>(&raw) {
        Ok(books) => {
            debug!(path = %path.display(), count = books.len(), "library loaded");
            Ok(books)
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "library file unreadable, starting empty");
            Ok(Vec::new())
        }
    }
}

/// Overwrite `path` with the full library, pretty-printed. The previous
/// content is truncated before the new bytes land; there is no backup.
pub fn save_library(path: &Path, books: &[Book]) -> Result<()> {
    let mut buffer = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(INDENT));
    books.serialize(&mut serializer)?;

    fs::write(path, &buffer).map_err(|source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), count = books.len(), "library saved");
    Ok(())
}
