//! Persistence layer split across logical submodules: whole-file JSON I/O and
//! the in-memory collection that writes through to it.

mod books;
mod file;

pub use books::BookStore;
pub use file::{load_library, save_library};
