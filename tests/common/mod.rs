//! Common test utilities for simsync scenario tests.
//!
//! Provides `SyncFixture`, an isolated on-disk layout with a staging tree,
//! a canonical resource directory, and derived build-output directories.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use tempfile::TempDir;

/// Isolated directory layout for engine tests
pub struct SyncFixture {
    pub root: TempDir,
    pub staging: PathBuf,
    pub resources: PathBuf,
    pub derived: Vec<PathBuf>,
    pub backup_root: PathBuf,
}

impl SyncFixture {
    /// Layout with `derived_count` build-output mirrors
    pub fn new(derived_count: usize) -> Self {
        let root = TempDir::new().unwrap();
        let staging = root.path().join("container/Documents/_newfiles_");
        let resources = root.path().join("project/test_resources");
        let backup_root = root.path().join("backups");
        fs::create_dir_all(&staging).unwrap();
        fs::create_dir_all(&resources).unwrap();

        let derived = (0..derived_count)
            .map(|i| {
                let dir = root
                    .path()
                    .join(format!("DerivedData/Build/Products/Config{i}/test_resources"));
                fs::create_dir_all(&dir).unwrap();
                dir
            })
            .collect();

        Self {
            root,
            staging,
            resources,
            derived,
            backup_root,
        }
    }

    /// Write a file under the staging tree
    pub fn stage(&self, relative: &str, content: &str) -> PathBuf {
        write_file(&self.staging.join(relative), content)
    }

    /// Write a file under the canonical resource tree
    pub fn commit(&self, relative: &str, content: &str) -> PathBuf {
        write_file(&self.resources.join(relative), content)
    }

    pub fn resource(&self, relative: &str) -> PathBuf {
        self.resources.join(relative)
    }
}

pub fn write_file(path: &Path, content: &str) -> PathBuf {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
    path.to_path_buf()
}

/// Shift a file's mtime by `seconds` relative to now (negative = past)
pub fn age_file(path: &Path, seconds: i64) {
    let time = if seconds < 0 {
        SystemTime::now() - Duration::from_secs(seconds.unsigned_abs())
    } else {
        SystemTime::now() + Duration::from_secs(seconds as u64)
    };
    let file = fs::OpenOptions::new().write(true).open(path).unwrap();
    file.set_modified(time).unwrap();
}
