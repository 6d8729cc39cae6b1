//! `treadstock` — the tire shop storefront and back office on the command
//! line.
//!
//! Subcommands mirror the shop's pages: `browse`, `cart`, and `checkout` for
//! shoppers, `admin` and `orders` for the back office. State lives in plain
//! JSON files under the data directory, except the saved cart, which follows
//! the user to their platform data dir.

mod cli;
mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use crate::cli::Cli;

fn main() -> ExitCode {
    treadstock_observability::init();

    let cli = Cli::parse();
    let data_dir = resolve_data_dir(cli.data_dir.clone());

    match commands::dispatch(cli.command, &data_dir) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{output}");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            for cause in err.chain().skip(1) {
                eprintln!("  caused by: {cause}");
            }
            ExitCode::FAILURE
        }
    }
}

/// Data directory precedence: `--data-dir`, then `TREADSTOCK_DATA_DIR`, then
/// `./data`.
fn resolve_data_dir(flag: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = flag {
        return dir;
    }
    match std::env::var("TREADSTOCK_DATA_DIR") {
        Ok(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
        _ => {
            tracing::debug!("TREADSTOCK_DATA_DIR is not set, using ./data");
            PathBuf::from("data")
        }
    }
}
