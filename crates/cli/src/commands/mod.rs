//! Subcommand implementations over the domain and store crates.
//!
//! Each command takes its stores as trait bounds, so tests drive them with
//! the in-memory implementations and assert on the rendered text.

pub mod admin;
pub mod browse;
pub mod cart;
pub mod checkout;
pub mod orders;

use std::path::Path;

use treadstock_store::{FileCartStore, FileCatalogStore, FileOrderApi};

use crate::cli::Command;

/// Routes a parsed command to its implementation over the file-backed stores
/// rooted at `data_dir`.
pub fn dispatch(command: Command, data_dir: &Path) -> anyhow::Result<String> {
    let catalog = FileCatalogStore::in_data_dir(data_dir);
    let carts = FileCartStore::new(FileCartStore::default_user_path(data_dir));
    match command {
        Command::Browse(args) => browse::run(&catalog, &carts, &args),
        Command::Cart { action } => cart::run(&catalog, &carts, action),
        Command::Checkout(args) => {
            checkout::run(&catalog, &carts, &FileOrderApi::in_data_dir(data_dir), &args)
        }
        Command::Admin { action } => admin::run(&catalog, action),
        Command::Orders { action } => orders::run(&FileOrderApi::in_data_dir(data_dir), action),
    }
}
