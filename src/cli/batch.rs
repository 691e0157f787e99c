//! Batch entry from a file or stdin
//!
//! Each non-blank line that does not start with `#` holds
//! `isbn,condition,location,quantity`. Empty condition or location fields
//! are filled from the locks given on the command line.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;

use super::Output;
use crate::domain::{AddedEntry, Condition, InventoryLedger, LedgerConfig};

/// Options for a batch run
#[derive(Debug, Default)]
pub struct BatchOptions {
    /// Input file, or stdin when `None`
    pub input: Option<PathBuf>,
    pub lock_condition: Option<Condition>,
    pub lock_location: Option<String>,
    /// Export directory, or no export when `None`
    pub export_dir: Option<PathBuf>,
}

/// A line that could not be recorded
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Rejection {
    pub line: usize,
    pub kind: String,
    pub message: String,
}

/// Outcome of feeding every line to the ledger
#[derive(Debug, Serialize)]
pub struct BatchReport {
    pub added: Vec<AddedEntry>,
    pub rejected: Vec<Rejection>,
    pub total_quantity: u64,
    pub export: Option<PathBuf>,
}

/// Splits a line into its four raw fields
fn split_fields(line: &str) -> Option<[&str; 4]> {
    let parts: Vec<&str> = line.split(',').collect();
    match parts.len() {
        n if n > 4 => None,
        _ => {
            let field = |i: usize| parts.get(i).copied().unwrap_or("");
            Some([field(0), field(1), field(2), field(3)])
        }
    }
}

/// Feeds every line of `reader` to the ledger
pub fn record_lines<R: BufRead>(
    ledger: &mut InventoryLedger,
    reader: R,
    output: &Output,
) -> Result<(Vec<AddedEntry>, Vec<Rejection>)> {
    let mut added = Vec::new();
    let mut rejected = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.with_context(|| format!("Failed to read line {}", line_no))?;
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let Some([isbn, condition, location, quantity]) = split_fields(trimmed) else {
            rejected.push(Rejection {
                line: line_no,
                kind: "malformed_line".to_string(),
                message: "Expected isbn,condition,location,quantity".to_string(),
            });
            continue;
        };

        // Locks only fill fields the line leaves empty
        let locked_condition = ledger.locked_condition().map(|c| c.as_str());
        let condition = match (condition.trim(), locked_condition) {
            ("", Some(lock)) => lock,
            _ => condition,
        };
        let location = match (location.trim(), ledger.locked_location()) {
            ("", Some(lock)) => lock.to_string(),
            _ => location.to_string(),
        };

        match ledger.add_entry(isbn, condition, &location, quantity) {
            Ok(entry) => {
                output.verbose_ctx("batch", &format!("line {}: added {}", line_no, entry.entry.sku()));
                added.push(entry);
            }
            Err(e) => {
                output.verbose_ctx("batch", &format!("line {}: {}", line_no, e));
                rejected.push(Rejection {
                    line: line_no,
                    kind: e.kind().to_string(),
                    message: e.to_string(),
                });
            }
        }
    }

    Ok((added, rejected))
}

/// Runs a batch session and prints the report
pub fn run(output: &Output, config: LedgerConfig, options: BatchOptions) -> Result<()> {
    let mut ledger = InventoryLedger::new(config);
    ledger.set_locked_condition(options.lock_condition);
    ledger.set_locked_location(options.lock_location);

    let (added, rejected) = match &options.input {
        Some(path) => {
            output.verbose_ctx("batch", &format!("Reading {}", path.display()));
            let file = File::open(path)
                .with_context(|| format!("Failed to open input: {}", path.display()))?;
            record_lines(&mut ledger, BufReader::new(file), output)?
        }
        None => {
            output.verbose_ctx("batch", "Reading stdin");
            record_lines(&mut ledger, io::stdin().lock(), output)?
        }
    };

    let export = match &options.export_dir {
        Some(dir) => Some(ledger.export_to_file(dir)?),
        None => None,
    };

    let report = BatchReport {
        added,
        rejected,
        total_quantity: ledger.total_quantity(),
        export,
    };

    if output.is_json() {
        output.data(&report);
        return Ok(());
    }

    for entry in &report.added {
        let e = &entry.entry;
        println!(
            "added    {:<16} {:<4} {} x{}",
            e.sku(),
            e.condition(),
            e.location(),
            e.quantity()
        );
    }
    for r in &report.rejected {
        println!("rejected line {}: {} [{}]", r.line, r.message, r.kind);
    }

    println!();
    println!(
        "Added {} of {} entries ({} books)",
        report.added.len(),
        report.added.len() + report.rejected.len(),
        report.total_quantity
    );
    if let Some(path) = &report.export {
        output.success(&format!("Data exported to {}", path.display()));
    }

    Ok(())
}
