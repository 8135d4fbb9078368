//! Ratatui front-end: a sidebar menu of pages on the left, the active page on
//! the right, and a footer with status text and key hints.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
