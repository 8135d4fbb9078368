//! Binary entry point: resolve paths, start logging, load the library, and
//! drive the Ratatui event loop until the user exits.
use anyhow::Context;
use personal_library_manager::{init_logging, run_app, App, BookStore, Config};
use tracing::{error, info};

/// Returning a `Result` bubbles fatal problems (an unwritable library file,
/// a missing home directory) to the terminal after the TUI has been torn down.
fn main() -> anyhow::Result<()> {
    let config = Config::load()?;
    init_logging(&config.log_path)?;
    info!(library = %config.library_path.display(), "starting");

    let store = BookStore::open(&config.library_path).context("failed to open library")?;
    let mut app = App::new(store);
    run_app(&mut app).inspect_err(|err| error!(error = %format!("{err:#}"), "session aborted"))
}
