//! Directory walker
//!
//! Lists one root at a time, depth-first and single-threaded, handing every
//! retained entry to a `ListingOutput`. Failures on individual entries or
//! directories are passed to `ListingOutput::skipped` and the walk goes on.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::classify::{Classification, classify};
use crate::entry::Entry;
use crate::error::ListError;

use super::config::{DisplayMode, RunConfig, Selection};
use super::report::Report;

/// Layout requested for a single entry line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    Short,
    Long,
    Tree { depth: usize },
}

/// Sink for listing output - receives headings and entries in display order.
pub trait ListingOutput {
    /// Heading for a directory listed on its own (roots and `-R` levels).
    fn heading(&mut self, dir: &Entry) -> io::Result<()>;

    /// Begin a block of short entries. `longest_name` is the widest retained
    /// name in the block, in characters.
    fn start_rows(&mut self, longest_name: Option<usize>) -> io::Result<()>;

    fn entry(&mut self, entry: &Entry, class: &Classification, line: Line) -> io::Result<()>;

    /// Close a block opened by `start_rows`.
    fn finish_rows(&mut self) -> io::Result<()>;

    /// An entry or directory was skipped.
    fn skipped(&mut self, error: &ListError);
}

/// Walks root paths according to a `RunConfig`.
pub struct Walker<'a> {
    config: &'a RunConfig,
}

impl<'a> Walker<'a> {
    pub fn new(config: &'a RunConfig) -> Self {
        Self { config }
    }

    /// List one root: a directory, a single file, or a glob pattern
    /// relative to the working directory.
    ///
    /// Returns `NotFound` when the root matches nothing; the caller decides
    /// whether to continue with other roots.
    pub fn walk<O: ListingOutput>(&self, root: &Path, output: &mut O) -> Result<Report, ListError> {
        let mut report = Report::new();

        match fs::symlink_metadata(root) {
            Ok(_) => {
                let entry = Entry::from_path(root)?;
                if entry.is_dir {
                    let resolved = fs::canonicalize(root).unwrap_or_else(|_| root.to_path_buf());
                    let dir = Entry::from_path(&resolved)?;
                    self.list_dir(&dir, 0, output, &mut report)?;
                } else {
                    self.list_loose(vec![entry], output, &mut report)?;
                }
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let matches = self.expand_glob(root, output);
                if matches.is_empty() {
                    return Err(ListError::NotFound(root.to_path_buf()));
                }
                self.list_loose(matches, output, &mut report)?;
            }
            Err(e) => return Err(ListError::from_io(root, e)),
        }

        Ok(report)
    }

    /// List a directory's children. Depth 0 gets a heading; deeper levels
    /// only occur inside tree mode.
    fn list_dir<O: ListingOutput>(
        &self,
        dir: &Entry,
        depth: usize,
        output: &mut O,
        report: &mut Report,
    ) -> Result<(), ListError> {
        if depth == 0 {
            output.heading(dir)?;
        }

        let Some(children) = self.read_children(&dir.path, output) else {
            return Ok(());
        };

        let file_count = children.iter().filter(|e| e.is_file).count();
        let subdir_count = children.iter().filter(|e| e.is_dir).count();
        report.record(&dir.path, file_count, subdir_count);

        let shown = self.select(&children);
        self.render(&shown, depth, output, report)?;

        if self.config.flat_recursion() {
            for sub in children.iter().filter(|e| e.is_dir && !e.is_symlink) {
                self.list_dir(sub, 0, output, report)?;
            }
        }
        Ok(())
    }

    /// List entries that are not the contents of one directory: a file root
    /// or the matches of a glob.
    fn list_loose<O: ListingOutput>(
        &self,
        mut entries: Vec<Entry>,
        output: &mut O,
        report: &mut Report,
    ) -> Result<(), ListError> {
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        let shown = self.select(&entries);
        self.render(&shown, 0, output, report)
    }

    fn render<O: ListingOutput>(
        &self,
        shown: &[&Entry],
        depth: usize,
        output: &mut O,
        report: &mut Report,
    ) -> Result<(), ListError> {
        let theme = &self.config.theme;
        match self.config.mode {
            DisplayMode::Short => {
                let longest = shown.iter().map(|e| e.name.chars().count()).max();
                output.start_rows(longest)?;
                for entry in shown {
                    output.entry(entry, &classify(entry, theme), Line::Short)?;
                }
                output.finish_rows()?;
            }
            DisplayMode::Long => {
                for entry in shown {
                    output.entry(entry, &classify(entry, theme), Line::Long)?;
                }
            }
            DisplayMode::Tree { depth: max_depth } => {
                for entry in shown {
                    output.entry(entry, &classify(entry, theme), Line::Tree { depth })?;
                    // Symlinked directories are not descended into
                    if entry.is_dir && !entry.is_symlink && depth + 1 < max_depth {
                        self.list_dir(entry, depth + 1, output, report)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn select<'e>(&self, entries: &'e [Entry]) -> Vec<&'e Entry> {
        entries
            .iter()
            .filter(|e| match self.config.selection {
                Selection::All => true,
                Selection::DirsOnly => e.is_dir,
                Selection::FilesOnly => e.is_file,
            })
            .collect()
    }

    /// Read, filter and sort a directory's children.
    /// Returns `None` when the directory itself cannot be read.
    fn read_children<O: ListingOutput>(&self, path: &Path, output: &mut O) -> Option<Vec<Entry>> {
        let read = match fs::read_dir(path) {
            Ok(r) => r,
            Err(e) => {
                output.skipped(&ListError::from_io(path, e));
                return None;
            }
        };

        let mut entries = Vec::new();
        for item in read {
            let item = match item {
                Ok(i) => i,
                Err(e) => {
                    output.skipped(&ListError::from_io(path, e));
                    continue;
                }
            };
            let name = item.file_name().to_string_lossy().to_string();
            if !self.config.filter.retains(&name) {
                continue;
            }
            match Entry::from_path(&item.path()) {
                Ok(entry) => entries.push(entry),
                Err(e) => output.skipped(&e),
            }
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Some(entries)
    }

    fn expand_glob<O: ListingOutput>(&self, pattern: &Path, output: &mut O) -> Vec<Entry> {
        let Some(text) = pattern.to_str() else {
            return Vec::new();
        };
        let Ok(paths) = glob::glob(text) else {
            return Vec::new();
        };

        let mut entries = Vec::new();
        for item in paths {
            let path: PathBuf = match item {
                Ok(p) => p,
                Err(e) => {
                    let path = e.path().to_path_buf();
                    output.skipped(&ListError::from_io(&path, e.into_error()));
                    continue;
                }
            };
            let name = crate::entry::display_name(&path);
            if !self.config.filter.retains(&name) {
                continue;
            }
            match Entry::from_path(&path) {
                Ok(entry) => entries.push(entry),
                Err(e) => output.skipped(&e),
            }
        }
        entries
    }
}
