use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use directories::BaseDirs;

/// Environment variable that overrides the library file location.
pub const LIBRARY_FILE_ENV: &str = "LIBRARY_FILE";
/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".personal-library";
/// JSON file name stored inside the application data directory.
const LIBRARY_FILE_NAME: &str = "library.json";
/// Log file name used when the library path has no usable file name.
const LOG_FILE_NAME: &str = "library.log";
/// Extension of the log file written next to the library file.
const LOG_EXTENSION: &str = "log";

/// Where the library and its log live for this run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub library_path: PathBuf,
    pub log_path: PathBuf,
}

impl Config {
    /// Resolve paths from `LIBRARY_FILE`, falling back to the home directory.
    pub fn load() -> Result<Self> {
        let library_path = match env::var_os(LIBRARY_FILE_ENV) {
            Some(value) if !value.is_empty() => PathBuf::from(value),
            _ => default_library_path()?,
        };
        Ok(Self::with_library_path(library_path))
    }

    pub fn with_library_path(library_path: impl Into<PathBuf>) -> Self {
        let library_path = library_path.into();
        let log_path = log_path_for(&library_path);
        Self {
            library_path,
            log_path,
        }
    }
}

/// `<stem>.log` beside the library. A library that is itself named `*.log`
/// gets `<name>.log` so the two files never coincide.
fn log_path_for(library_path: &Path) -> PathBuf {
    let Some(stem) = library_path.file_stem() else {
        return library_path.with_file_name(LOG_FILE_NAME);
    };

    let mut name = OsString::from(stem);
    name.push(".");
    name.push(LOG_EXTENSION);
    let candidate = library_path.with_file_name(&name);
    if candidate != library_path {
        return candidate;
    }

    let mut name = library_path.as_os_str().to_os_string();
    name.push(".");
    name.push(LOG_EXTENSION);
    PathBuf::from(name)
}

/// Resolve the absolute path to the library file inside the user's home.
fn default_library_path() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs
        .home_dir()
        .join(DATA_DIR_NAME)
        .join(LIBRARY_FILE_NAME))
}
