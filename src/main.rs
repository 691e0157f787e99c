//! Book Lister - book inventory entry and spreadsheet export

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = book_lister::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
