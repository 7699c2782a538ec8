//! Interactive debounced search.
//!
//! Every line read from stdin is treated as the search box's new value and
//! fed to the controller's debounced loop; each settled query reprints the
//! matching cards. Ctrl-D ends the session; a query still waiting out the
//! debounce delay at end of input (e.g. `echo sky | cards watch`) is applied
//! before exiting.

use std::sync::Arc;

use anyhow::Result;
use card_viewer_core::source::CardSource;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::debug;

use crate::config::Config;
use crate::controller::Controller;
use crate::terminal::TerminalSurface;

pub async fn run_watch(config: &Config, source: Arc<dyn CardSource>) -> Result<()> {
    let surface = TerminalSurface::new(std::io::stdout());
    let mut controller =
        Controller::new(source, surface, config.search.debounce()).flush_on_close(true);
    if controller.start().await.is_err() {
        // The surface already printed the `Error: ...` status line.
        std::process::exit(1);
    }

    eprintln!(
        "Type to search (applied {} ms after you stop); Ctrl-D to quit.",
        config.search.debounce_ms
    );

    let (tx, rx) = mpsc::channel::<String>(64);
    let reader = tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if tx.send(line).await.is_err() {
                break;
            }
        }
        debug!("stdin closed");
    });

    controller.run(rx).await;
    reader.abort();
    Ok(())
}
