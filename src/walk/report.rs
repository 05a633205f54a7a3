//! Per-directory file and subdirectory counts

use std::collections::HashMap;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Counts for one visited directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryReport {
    pub path: PathBuf,
    pub file_count: usize,
    pub subdir_count: usize,
}

/// Counts for every directory visited from one root, in visitation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    dirs: Vec<DirectoryReport>,
    index: HashMap<PathBuf, usize>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add counts for `path`. A path seen before accumulates into its
    /// existing record instead of replacing it.
    pub fn record(&mut self, path: &Path, file_count: usize, subdir_count: usize) {
        if let Some(&i) = self.index.get(path) {
            let existing = &mut self.dirs[i];
            existing.file_count += file_count;
            existing.subdir_count += subdir_count;
        } else {
            self.index.insert(path.to_path_buf(), self.dirs.len());
            self.dirs.push(DirectoryReport {
                path: path.to_path_buf(),
                file_count,
                subdir_count,
            });
        }
    }

    #[cfg(test)]
    pub fn get(&self, path: &Path) -> Option<&DirectoryReport> {
        self.index.get(path).map(|&i| &self.dirs[i])
    }

    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }

    /// Most recently visited first, so nested directories precede parents.
    pub fn latest_first(&self) -> impl Iterator<Item = &DirectoryReport> {
        self.dirs.iter().rev()
    }
}

/// Write the end-of-run summary for all roots. Roots that matched nothing
/// are listed after the counts.
pub fn write_summary<W: Write>(
    out: &mut W,
    reports: &[Report],
    missing: &[PathBuf],
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, " --- REPORT ---")?;
    for report in reports {
        for dir in report.latest_first() {
            writeln!(
                out,
                "{} -> files: {}, dirs: {}",
                dir.path.display(),
                dir.file_count,
                dir.subdir_count
            )?;
        }
    }
    for root in missing {
        writeln!(out, "{} -> not found", root.display())?;
    }
    Ok(())
}
