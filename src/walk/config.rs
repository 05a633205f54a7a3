//! Run configuration

use crate::theme::Theme;

use super::filter::EntryFilter;

/// Default depth for `--tree` given without a value.
pub const DEFAULT_TREE_DEPTH: usize = 3;

/// How each retained entry is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// Glyph and name, packed into rows.
    Short,
    /// One entry per line with permissions, owner, size and time.
    Long,
    /// Indented, expanding subdirectories up to `depth` levels.
    Tree { depth: usize },
}

/// Which retained entries get rendered. Counting ignores this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    All,
    DirsOnly,
    FilesOnly,
}

/// Settings for a whole run. Built once, then only read.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub mode: DisplayMode,
    pub selection: Selection,
    pub filter: EntryFilter,
    /// `-R`: list every subdirectory after its parent.
    pub recursive: bool,
    /// `-F`: append `/`, `@` or `*` to names.
    pub classify: bool,
    /// `-n`: print raw uid/gid.
    pub numeric_ids: bool,
    /// `-1`: end every short entry with a newline instead of a tab.
    pub one_per_line: bool,
    /// Columns available for short-mode packing, if known.
    pub terminal_width: Option<usize>,
    pub theme: Theme,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            mode: DisplayMode::Short,
            selection: Selection::All,
            filter: EntryFilter::default(),
            recursive: false,
            classify: false,
            numeric_ids: false,
            one_per_line: false,
            terminal_width: None,
            theme: Theme::default(),
        }
    }
}

impl RunConfig {
    /// Separator written after each short-mode entry.
    pub fn separator(&self) -> &'static str {
        if self.one_per_line { "\n" } else { "\t" }
    }

    /// Flat `-R` recursion applies outside tree mode only.
    pub fn flat_recursion(&self) -> bool {
        self.recursive && !matches!(self.mode, DisplayMode::Tree { .. })
    }

    /// Width used for row packing; disabled in one-per-line mode.
    pub fn packing_width(&self) -> Option<usize> {
        if self.one_per_line {
            None
        } else {
            self.terminal_width.filter(|&w| w > 0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separator_follows_one_per_line() {
        let mut config = RunConfig::default();
        assert_eq!(config.separator(), "\t");
        config.one_per_line = true;
        assert_eq!(config.separator(), "\n");
    }

    #[test]
    fn test_tree_mode_never_recurses_flat() {
        let config = RunConfig {
            recursive: true,
            mode: DisplayMode::Tree { depth: 2 },
            ..Default::default()
        };
        assert!(!config.flat_recursion());

        let config = RunConfig {
            recursive: true,
            mode: DisplayMode::Long,
            ..Default::default()
        };
        assert!(config.flat_recursion());
    }

    #[test]
    fn test_packing_width() {
        let config = RunConfig {
            terminal_width: Some(80),
            ..Default::default()
        };
        assert_eq!(config.packing_width(), Some(80));

        let config = RunConfig {
            terminal_width: Some(80),
            one_per_line: true,
            ..Default::default()
        };
        assert_eq!(config.packing_width(), None);

        let config = RunConfig {
            terminal_width: Some(0),
            ..Default::default()
        };
        assert_eq!(config.packing_width(), None);
    }
}
