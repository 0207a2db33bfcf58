//! Full-screen TUI for shelf.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod mutations;
pub mod overlays;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, Write, stderr};

use anyhow::Result;
pub use runtime::TuiRuntime;
use shelf_core::config::{Config, paths};
use shelf_core::{ApiClient, Session, logging};

/// Runs the interactive client until the user quits.
///
/// Logs go to a file under the shelf home since stderr belongs to the screen.
///
/// # Errors
/// Returns an error if stdout is not a terminal or terminal I/O fails.
pub async fn run_interactive(config: &Config, session: Session) -> Result<()> {
    if !std::io::stdout().is_terminal() {
        anyhow::bail!(
            "Interactive mode requires a terminal.\n\
             Use `shelf search`, `shelf saved` and friends for scripted use."
        );
    }

    let _log_guard = match logging::init_file(&paths::logs_dir(), config.log_filter.as_deref()) {
        Ok(guard) => Some(guard),
        Err(e) => {
            writeln!(stderr(), "Warning: {e:#}")?;
            None
        }
    };

    let base_url = config.base_url()?;
    tracing::info!(%base_url, authenticated = session.is_authenticated(), "starting tui");

    let mut runtime = TuiRuntime::new(session, config.ui.clone(), ApiClient::new(base_url)?)?;
    runtime.run()?;

    writeln!(stderr(), "Goodbye!")?;
    Ok(())
}
