//! Backup store for files about to be overwritten
//!
//! The engine never overwrites a resource file without handing it to a
//! [`BackupStore`] first. The provided [`BackupSet`] implementation keeps a
//! timestamped directory per run and preserves each file at its path
//! relative to the watched base directory, so a prior copy of anything the
//! sync replaced can be recovered afterwards.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::error::{SimsyncError, SimsyncResult};

/// Receives files about to be overwritten and preserves a recoverable copy
pub trait BackupStore {
    /// Preserve `path` before it is overwritten. Must complete before the
    /// caller touches the file; a failure here aborts the caller's run.
    fn backup_file(&mut self, path: &Path) -> SimsyncResult<()>;
}

/// Filesystem-backed backup store with one directory per run
pub struct BackupSet {
    /// Directory the backed-up files live under (files are stored at their
    /// path relative to this base)
    base: PathBuf,
    /// Root directory holding all runs of this set
    set_root: PathBuf,
    /// Run directory, created lazily on the first backup
    run_dir: Option<PathBuf>,
}

impl BackupSet {
    /// Create a set named `label` covering files under `base`, storing runs
    /// under `~/.simsync/backups/<label>/`.
    pub fn new(label: &str, base: &Path) -> SimsyncResult<Self> {
        let home = dirs::home_dir().ok_or_else(|| SimsyncError::DirectoryNotFound {
            path: PathBuf::from("~"),
        })?;
        Ok(Self::with_root(home.join(".simsync/backups").join(label), base))
    }

    /// Create a set storing runs under an explicit root directory
    pub fn with_root(set_root: PathBuf, base: &Path) -> Self {
        Self {
            base: base.to_path_buf(),
            set_root,
            run_dir: None,
        }
    }

    /// The run directory, if any file has been backed up this run
    pub fn run_dir(&self) -> Option<&Path> {
        self.run_dir.as_deref()
    }

    fn ensure_run_dir(&mut self) -> SimsyncResult<PathBuf> {
        if let Some(dir) = &self.run_dir {
            return Ok(dir.clone());
        }

        let stamp = Local::now().format("%Y%m%d-%H%M%S").to_string();
        let mut dir = self.set_root.join(&stamp);
        // Two runs within the same second get a numeric suffix
        let mut n = 1;
        while dir.exists() {
            dir = self.set_root.join(format!("{stamp}-{n}"));
            n += 1;
        }
        fs::create_dir_all(&dir)?;
        self.run_dir = Some(dir.clone());
        Ok(dir)
    }
}

impl BackupStore for BackupSet {
    fn backup_file(&mut self, path: &Path) -> SimsyncResult<()> {
        let relative = path.strip_prefix(&self.base).unwrap_or(path);
        let run_dir = self.ensure_run_dir()?;
        let dest = run_dir.join(relative);

        let copy = |dest: &Path| -> std::io::Result<()> {
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, dest)?;
            Ok(())
        };

        copy(&dest).map_err(|source| SimsyncError::Backup {
            path: path.to_path_buf(),
            source,
        })
    }
}
