//! Row packing for short listings and indentation for tree listings

/// Per-column allowance for the glyph, padding and separator.
pub const COLUMN_BUFFER: usize = 10;

/// Guide drawn once per tree level.
pub const TREE_GUIDE: &str = "   |   ";

/// Marker placed right before a tree entry.
pub const TREE_BRANCH: &str = "   \u{25ba}---";

/// Indentation for a tree entry at `depth` (root children are depth 0).
///
/// # Examples
///
/// ```
/// use colorls::output::tree_prefix;
///
/// assert_eq!(tree_prefix(0), "   ►---");
/// assert_eq!(tree_prefix(2), "   |      |      ►---");
/// ```
pub fn tree_prefix(depth: usize) -> String {
    format!("{}{}", TREE_GUIDE.repeat(depth), TREE_BRANCH)
}

/// Entries per row for a terminal `width` and the longest name in a block.
/// `None` means rows are unbounded.
pub fn max_per_row(width: Option<usize>, longest_name: Option<usize>) -> Option<usize> {
    let (width, longest) = (width?, longest_name?);
    Some((width / (longest + COLUMN_BUFFER)).max(1))
}

/// Packing state for one block of short entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowLayout {
    column_width: Option<usize>,
    max_per_row: Option<usize>,
    in_row: usize,
}

impl RowLayout {
    pub fn new(width: Option<usize>, longest_name: Option<usize>) -> Self {
        Self {
            column_width: longest_name,
            max_per_row: max_per_row(width, longest_name),
            in_row: 0,
        }
    }

    /// Width names are padded to.
    pub fn column_width(&self) -> Option<usize> {
        self.column_width
    }

    /// Count one placed entry. Returns true when the row is full and a line
    /// break is due; the next entry then starts a fresh row.
    pub fn place(&mut self) -> bool {
        self.in_row += 1;
        match self.max_per_row {
            Some(max) if self.in_row >= max => {
                self.in_row = 0;
                true
            }
            _ => false,
        }
    }

    /// True when entries were placed since the last break.
    pub fn row_open(&self) -> bool {
        self.in_row > 0
    }
}
