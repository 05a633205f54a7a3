//! Directory walking logic
//!
//! The walker reads each directory once, filters and sorts its children,
//! and streams them to a `ListingOutput` in short, long or tree layout.
//! Counts per visited directory are collected into a `Report`.

mod config;
mod filter;
mod report;
mod walker;

pub use config::{DEFAULT_TREE_DEPTH, DisplayMode, RunConfig, Selection};
pub use filter::EntryFilter;
pub use report::{DirectoryReport, Report, write_summary};
pub use walker::{Line, ListingOutput, Walker};
