//! Command-line schema for the `treadstock` binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use treadstock_core::{ItemId, OrderId};
use treadstock_orders::{OrderType, StatusFilter};

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "treadstock")]
#[command(about = "Tire shop storefront and back office")]
#[command(version)]
pub struct Cli {
    /// Directory holding inventory.json and orders.json (defaults to
    /// $TREADSTOCK_DATA_DIR, then ./data)
    #[arg(long, value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands, one per shop page.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Browse listings with the storefront filters
    Browse(BrowseArgs),
    /// Show or edit the saved cart
    Cart {
        /// Cart subcommand action.
        #[command(subcommand)]
        action: CartAction,
    },
    /// Place an order from the saved cart
    Checkout(CheckoutArgs),
    /// Edit the inventory working set
    Admin {
        /// Admin subcommand action.
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Review and work placed orders
    Orders {
        /// Orders subcommand action.
        #[command(subcommand)]
        action: OrdersAction,
    },
}

/// Storefront browse filters.
#[derive(clap::Args, Debug, Default)]
pub struct BrowseArgs {
    /// Exact size to show (e.g. 205/55R16)
    #[arg(long)]
    pub size: Option<String>,

    /// Case-insensitive search across brand, model, size, and notes
    #[arg(long, short = 'q')]
    pub query: Option<String>,

    /// Minimum tread depth in 32nds
    #[arg(long, default_value_t = 0)]
    pub min_tread: u32,

    /// Sort order: size, price, tread, or brand
    #[arg(long, default_value = "size")]
    pub sort: String,

    /// List sizes with stock counts instead of listings
    #[arg(long)]
    pub sizes: bool,
}

/// Cart subcommands. Every edit reconciles against the live catalog.
#[derive(Subcommand, Debug)]
pub enum CartAction {
    /// Show the selected lines and their totals
    Show,
    /// Step a listing's quantity, like the storefront stepper
    Add {
        /// Listing id
        id: ItemId,
        /// Signed step, e.g. 2 or -1
        #[arg(long, short = 'n', default_value_t = 1, allow_negative_numbers = true)]
        count: i64,
    },
    /// Set a listing's quantity outright (0 removes it)
    Set {
        /// Listing id
        id: ItemId,
        /// Requested quantity; clamped to the stock on hand
        #[arg(allow_negative_numbers = true)]
        quantity: f64,
    },
    /// Drop a listing from the cart
    Remove {
        /// Listing id
        id: ItemId,
    },
    /// Empty the cart
    Clear,
    /// Write the selected lines as JSON or CSV
    Export {
        /// Output format
        #[arg(long, default_value = "csv")]
        format: ExportFormat,
        /// Write here instead of stdout
        #[arg(long, short = 'o', value_name = "FILE")]
        out: Option<PathBuf>,
    },
}

/// Checkout form fields.
#[derive(clap::Args, Debug, Default)]
pub struct CheckoutArgs {
    /// Customer first name
    #[arg(long)]
    pub first_name: String,

    /// Customer last name
    #[arg(long)]
    pub last_name: String,

    /// Contact email
    #[arg(long)]
    pub email: String,

    /// Contact phone
    #[arg(long)]
    pub phone: String,

    /// pickup or delivery
    #[arg(long, default_value = "pickup")]
    pub order_type: OrderType,

    /// Delivery street address
    #[arg(long)]
    pub street: Option<String>,

    /// Delivery city
    #[arg(long)]
    pub city: Option<String>,

    /// Delivery state
    #[arg(long)]
    pub state: Option<String>,

    /// Delivery ZIP code
    #[arg(long)]
    pub zip: Option<String>,

    /// Note to the shop
    #[arg(long, default_value = "")]
    pub notes: String,
}

/// Admin subcommands. Every mutation saves the catalog right away.
#[derive(Subcommand, Debug)]
pub enum AdminAction {
    /// List the working set
    List,
    /// Add a listing under the next free id
    Add {
        /// Tire size (required, e.g. 205/55R16)
        #[arg(long)]
        size: String,
        /// Brand name
        #[arg(long, default_value = "")]
        brand: String,
        /// Model name
        #[arg(long, default_value = "")]
        model: String,
        /// Tread depth in 32nds
        #[arg(long, default_value_t = 0)]
        tread: u32,
        /// Units in stock (defaults to 1)
        #[arg(long)]
        quantity: Option<u32>,
        /// Price in dollars
        #[arg(long, default_value_t = 0.0)]
        price: f64,
        /// Free-form notes
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Patch fields on a listing
    Update {
        /// Listing id
        id: ItemId,
        /// Replacement id; ignored unless positive
        #[arg(long)]
        new_id: Option<u32>,
        /// Tire size
        #[arg(long)]
        size: Option<String>,
        /// Brand name
        #[arg(long)]
        brand: Option<String>,
        /// Model name
        #[arg(long)]
        model: Option<String>,
        /// Tread depth in 32nds
        #[arg(long)]
        tread: Option<u32>,
        /// Units in stock
        #[arg(long)]
        quantity: Option<u32>,
        /// Price in dollars
        #[arg(long)]
        price: Option<f64>,
        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,
    },
    /// Copy a listing under a fresh id
    Duplicate {
        /// Listing id
        id: ItemId,
    },
    /// Delete a listing (duplicated ids all go at once)
    Delete {
        /// Listing id
        id: ItemId,
    },
    /// Delete every listing
    Clear,
    /// Replace the working set from a .json or .csv file
    Import {
        /// File to import; the extension picks the format
        file: PathBuf,
    },
    /// Write the working set as JSON or CSV
    Export {
        /// Output format
        #[arg(long, default_value = "json")]
        format: ExportFormat,
        /// Write here instead of stdout
        #[arg(long, short = 'o', value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Print the starter CSV template
    Template,
}

/// Orders subcommands.
#[derive(Subcommand, Debug)]
pub enum OrdersAction {
    /// List orders, newest first
    List {
        /// all, pending, confirmed, ready, completed, or cancelled
        #[arg(long, default_value = "all")]
        status: StatusFilter,
        /// Keep refreshing and call out new pending orders
        #[arg(long)]
        watch: bool,
        /// Seconds between watch refreshes
        #[arg(long, default_value_t = 30)]
        interval: u64,
    },
    /// Confirm a pending order
    Confirm {
        /// Order id
        id: OrderId,
    },
    /// Mark a confirmed order ready
    Ready {
        /// Order id
        id: OrderId,
    },
    /// Complete a ready order
    Complete {
        /// Order id
        id: OrderId,
    },
    /// Put an order back to pending
    Reset {
        /// Order id
        id: OrderId,
    },
    /// Cancel an order and restore its stock
    Cancel {
        /// Order id
        id: OrderId,
    },
}

/// Output formats shared by the cart and admin exporters.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn schema_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_a_full_browse_invocation() {
        let cli = Cli::parse_from([
            "treadstock",
            "browse",
            "--size",
            "205/55R16",
            "-q",
            "michelin",
            "--min-tread",
            "6",
            "--sort",
            "price",
        ]);
        match cli.command {
            Command::Browse(args) => {
                assert_eq!(args.size.as_deref(), Some("205/55R16"));
                assert_eq!(args.query.as_deref(), Some("michelin"));
                assert_eq!(args.min_tread, 6);
                assert_eq!(args.sort, "price");
                assert!(!args.sizes);
            }
            other => panic!("Expected browse command, got {other:?}"),
        }
    }

    #[test]
    fn parses_negative_cart_steps() {
        let cli = Cli::parse_from(["treadstock", "cart", "add", "3", "-n", "-1"]);
        match cli.command {
            Command::Cart {
                action: CartAction::Add { id, count },
            } => {
                assert_eq!(id, ItemId::new(3));
                assert_eq!(count, -1);
            }
            other => panic!("Expected cart add, got {other:?}"),
        }
    }

    #[test]
    fn parses_order_status_filters() {
        let cli = Cli::parse_from(["treadstock", "orders", "list", "--status", "pending"]);
        match cli.command {
            Command::Orders {
                action: OrdersAction::List { status, watch, interval },
            } => {
                assert!(matches!(status, StatusFilter::Only(_)));
                assert!(!watch);
                assert_eq!(interval, 30);
            }
            other => panic!("Expected orders list, got {other:?}"),
        }
    }

    #[test]
    fn data_dir_is_accepted_after_the_subcommand() {
        let cli = Cli::parse_from(["treadstock", "admin", "list", "--data-dir", "/tmp/shop"]);
        assert_eq!(cli.data_dir.as_deref(), Some(std::path::Path::new("/tmp/shop")));
    }
}
