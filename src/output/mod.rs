//! Listing formatting and display
//!
//! # Module Structure
//!
//! - `layout` - Row packing for short listings, tree indentation
//! - `identity` - Owner/group name resolution for long listings
//! - `listing` - Colored formatter implementing `ListingOutput`

mod identity;
mod layout;
mod listing;

pub use identity::Identities;
pub use layout::{COLUMN_BUFFER, RowLayout, TREE_BRANCH, TREE_GUIDE, max_per_row, tree_prefix};
pub use listing::{DIAGNOSTIC_PREFIX, ListingFormatter};
