//! Interactive entry form for Book Lister
//!
//! Provides a terminal form for typing entries, locking condition and
//! location between entries, and exporting the session, using ratatui.

mod app;
mod event;
mod ui;
mod views;

use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;

use anyhow::{anyhow, Result};

use super::Output;
use crate::domain::{InventoryLedger, LedgerConfig};
use app::App;
use event::EventHandler;

/// Launch the form
pub fn run(output: &Output, config: LedgerConfig, export_dir: PathBuf) -> Result<()> {
    output.verbose_ctx("tui", "Initializing entry form");

    let mut app = App::new(InventoryLedger::new(config), export_dir);
    let mut terminal = ui::init_terminal()?;
    let events = EventHandler::new(250);

    // The terminal must be restored even if drawing panics
    let result = panic::catch_unwind(AssertUnwindSafe(|| app.run(&mut terminal, &events)));
    let restore_result = ui::restore_terminal();

    match result {
        Ok(inner_result) => {
            restore_result?;
            inner_result?;
        }
        Err(panic_payload) => {
            let _ = restore_result;
            return Err(if let Some(s) = panic_payload.downcast_ref::<&str>() {
                anyhow!("Form panicked: {}", s)
            } else if let Some(s) = panic_payload.downcast_ref::<String>() {
                anyhow!("Form panicked: {}", s)
            } else {
                anyhow!("Form panicked with unknown error")
            });
        }
    }

    let ledger = app.ledger();
    output.verbose_ctx(
        "tui",
        &format!("Session closed with {} entries", ledger.len()),
    );
    if let Some(path) = app.last_export() {
        output.success(&format!("Last export: {}", path.display()));
    } else if !ledger.is_empty() {
        output.error(&format!(
            "Session closed without export; {} entries discarded",
            ledger.len()
        ));
    }

    Ok(())
}
