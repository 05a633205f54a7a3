//! Filesystem entry snapshots
//!
//! An `Entry` is read once, when the walker first meets a path, and is never
//! refreshed. Classification and rendering only look at the snapshot.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::error::ListError;

/// Immutable snapshot of one filesystem object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub path: PathBuf,
    pub name: String,
    pub is_dir: bool,
    pub is_file: bool,
    pub is_symlink: bool,
    pub is_mount: bool,
    pub size: u64,
    pub modified: Option<SystemTime>,
    /// Permission and type bits of the entry itself (not a link's target).
    pub mode: u32,
    pub uid: u32,
    pub gid: u32,
    pub nlink: u64,
    /// Resolved target, symlinks only.
    pub link_target: Option<PathBuf>,
}

impl Entry {
    /// Take a snapshot of `path`.
    ///
    /// Symlinks are followed for everything except `mode` and `is_symlink`;
    /// a broken link falls back to the link's own metadata.
    pub fn from_path(path: &Path) -> Result<Self, ListError> {
        let own = fs::symlink_metadata(path).map_err(|e| ListError::from_io(path, e))?;
        let is_symlink = own.file_type().is_symlink();
        let followed = if is_symlink {
            fs::metadata(path).ok()
        } else {
            None
        };
        let stat = followed.as_ref().unwrap_or(&own);

        let link_target = if is_symlink {
            fs::canonicalize(path).or_else(|_| fs::read_link(path)).ok()
        } else {
            None
        };

        let path = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
        let name = display_name(&path);
        let fields = platform::fields(&own, stat);

        Ok(Entry {
            is_dir: stat.is_dir(),
            is_file: stat.is_file(),
            is_symlink,
            is_mount: stat.is_dir() && platform::is_mount(&path, stat),
            size: stat.len(),
            modified: stat.modified().ok(),
            mode: fields.mode,
            uid: fields.uid,
            gid: fields.gid,
            nlink: fields.nlink,
            link_target,
            path,
            name,
        })
    }

    /// A regular file with any execute bit set.
    pub fn is_executable(&self) -> bool {
        self.is_file && self.mode & 0o111 != 0
    }

    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('.')
    }
}

/// Base name of a path, or the whole path when it has none (`/`).
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

struct Fields {
    mode: u32,
    uid: u32,
    gid: u32,
    nlink: u64,
}

#[cfg(unix)]
mod platform {
    use std::fs::{self, Metadata};
    use std::os::unix::fs::MetadataExt;
    use std::path::Path;

    use super::Fields;

    pub(super) fn fields(own: &Metadata, stat: &Metadata) -> Fields {
        Fields {
            mode: own.mode(),
            uid: stat.uid(),
            gid: stat.gid(),
            nlink: stat.nlink(),
        }
    }

    /// A directory is a mount point when it sits on a different device than
    /// its parent, or has no parent at all.
    pub(super) fn is_mount(path: &Path, stat: &Metadata) -> bool {
        match path.parent() {
            None => true,
            Some(parent) => fs::metadata(parent)
                .map(|p| p.dev() != stat.dev())
                .unwrap_or(false),
        }
    }
}

#[cfg(not(unix))]
mod platform {
    use std::fs::Metadata;
    use std::path::Path;

    use super::Fields;

    pub(super) fn fields(own: &Metadata, stat: &Metadata) -> Fields {
        let kind = if own.file_type().is_symlink() {
            0o120000
        } else if stat.is_dir() {
            0o040000
        } else {
            0o100000
        };
        let perms = if stat.permissions().readonly() { 0o444 } else { 0o644 };
        let exec = if stat.is_dir() { 0o111 } else { 0 };
        Fields {
            mode: kind | perms | exec,
            uid: 0,
            gid: 0,
            nlink: 1,
        }
    }

    pub(super) fn is_mount(path: &Path, _stat: &Metadata) -> bool {
        path.parent().is_none()
    }
}
