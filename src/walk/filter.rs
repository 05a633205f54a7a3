//! Name-based entry filtering

use glob::Pattern;

use crate::error::ListError;

/// Filters applied to every directory's children before rendering or
/// counting.
#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    /// Keep names starting with `.`.
    pub show_hidden: bool,
    /// Drop names ending with `~`.
    pub ignore_backups: bool,
    ignore: Option<Pattern>,
}

impl EntryFilter {
    pub fn new(show_hidden: bool, ignore_backups: bool) -> Self {
        Self {
            show_hidden,
            ignore_backups,
            ignore: None,
        }
    }

    /// Exclude immediate children whose name matches a shell glob.
    pub fn with_ignore(mut self, pattern: &str) -> Result<Self, ListError> {
        let compiled = Pattern::new(pattern).map_err(|source| ListError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        self.ignore = Some(compiled);
        Ok(self)
    }

    /// True when the ignore glob matches `name`.
    pub fn is_ignored(&self, name: &str) -> bool {
        self.ignore.as_ref().is_some_and(|p| p.matches(name))
    }

    /// True when `name` survives the hidden, backup and ignore filters.
    pub fn retains(&self, name: &str) -> bool {
        if !self.show_hidden && name.starts_with('.') {
            return false;
        }
        if self.ignore_backups && name.ends_with('~') {
            return false;
        }
        !self.is_ignored(name)
    }
}
