//! `treadstock-csv` — permissive CSV codec for catalog and cart files.
//!
//! This crate is purely deterministic text processing (no IO, no HTTP, no
//! storage). Parsing never fails: malformed quoting is closed best-effort,
//! and an empty result is a condition for callers to report, not a crash.

pub mod parse;
pub mod record;
pub mod write;

pub use parse::{parse, parse_rows};
pub use record::{CART_HEADER, CATALOG_HEADER, CsvRecord, Field, simplify_header};
pub use write::{TEMPLATE, serialize};
