//! Staging tree traversal
//!
//! Depth-first enumeration of every regular file under the staging root,
//! exposed as an iterator of [`StagingEntry`] values so the per-file
//! decision logic stays independent of traversal mechanics.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::error::SimsyncResult;

/// A file discovered under the staging root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagingEntry {
    /// Path relative to the staging root; the join key used everywhere
    /// downstream
    pub relative: PathBuf,
    /// Absolute source location
    pub absolute: PathBuf,
    /// Last-modification timestamp of the staged file
    pub modified: SystemTime,
}

/// Iterator over the regular files beneath a staging root.
///
/// A directory's children are fully yielded before the traversal of that
/// directory is considered complete. Entries that are neither files nor
/// directories are ignored.
pub struct StagedFiles {
    root: PathBuf,
    stack: Vec<fs::ReadDir>,
}

impl StagedFiles {
    pub fn new(root: &Path) -> SimsyncResult<Self> {
        Ok(Self {
            root: root.to_path_buf(),
            stack: vec![fs::read_dir(root)?],
        })
    }

    fn entry_for(&self, path: PathBuf) -> SimsyncResult<StagingEntry> {
        let modified = fs::metadata(&path)?.modified()?;
        let relative = path
            .strip_prefix(&self.root)
            .unwrap_or(&path)
            .to_path_buf();
        Ok(StagingEntry {
            relative,
            absolute: path,
            modified,
        })
    }
}

impl Iterator for StagedFiles {
    type Item = SimsyncResult<StagingEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let reader = self.stack.last_mut()?;
            let entry = match reader.next() {
                None => {
                    self.stack.pop();
                    continue;
                }
                Some(Err(e)) => return Some(Err(e.into())),
                Some(Ok(entry)) => entry,
            };

            let file_type = match entry.file_type() {
                Ok(t) => t,
                Err(e) => return Some(Err(e.into())),
            };

            if file_type.is_dir() {
                match fs::read_dir(entry.path()) {
                    Ok(reader) => self.stack.push(reader),
                    Err(e) => return Some(Err(e.into())),
                }
            } else if file_type.is_file() {
                return Some(self.entry_for(entry.path()));
            }
        }
    }
}
