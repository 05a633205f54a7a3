//! colorls - ls with colors and icons
//!
//! Classifies filesystem entries into categories, picks a color and a glyph
//! for each, and lists them in short, long or tree layout.

pub mod classify;
pub mod entry;
pub mod error;
pub mod format;
pub mod output;
pub mod theme;
pub mod walk;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use classify::{Category, Classification, GlyphKey, classify};
pub use entry::Entry;
pub use error::ListError;
pub use format::human_size;
pub use output::ListingFormatter;
pub use theme::Theme;
pub use walk::{
    DEFAULT_TREE_DEPTH, DirectoryReport, DisplayMode, EntryFilter, Line, ListingOutput, Report,
    RunConfig, Selection, Walker, write_summary,
};
