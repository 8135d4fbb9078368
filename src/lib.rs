//! Core library surface for the Personal Library Manager.
//!
//! The store is usable on its own (the `bin` target is one caller); the `ui`
//! module is the terminal front-end that drives it.
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod store;
pub mod ui;

pub use config::Config;
pub use error::StoreError;
pub use logging::init_logging;

/// The domain types other layers manipulate.
pub use models::{Book, Statistics};

/// JSON-backed persistence.
pub use store::{load_library, save_library, BookStore};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
