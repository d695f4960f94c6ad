//! Resource synchronization engine
//!
//! The core control loop: walk the staging tree, classify each file against
//! the canonical resource directory, back up anything about to be replaced,
//! copy accepted files into the canonical tree, fan them out to every
//! derived directory, and delete the staging tree once the whole pass has
//! succeeded.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::backup::BackupStore;
use crate::error::SimsyncResult;
use crate::events::{EventSink, SyncEvent};
use crate::sync::walk::StagedFiles;
use crate::sync::{SyncOptions, SyncOutcome};

/// Per-file freshness classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncDecision {
    /// No existing resource file at the target path
    Create,
    /// Existing file is strictly older than the staged file
    Replace,
    /// Existing file is at least as new; leave it alone
    Skip,
}

/// Classify a staged file against the corresponding resource file.
///
/// Equal timestamps are a `Skip`: ties favor the already-committed file.
pub fn decide(staged: SystemTime, existing: Option<SystemTime>) -> SyncDecision {
    match existing {
        None => SyncDecision::Create,
        Some(current) if current < staged => SyncDecision::Replace,
        Some(_) => SyncDecision::Skip,
    }
}

/// Synchronization engine, stateless across runs.
///
/// All directories are injected; the engine never probes for locations.
pub struct SyncEngine<'a> {
    backup: &'a mut dyn BackupStore,
    events: &'a dyn EventSink,
    options: SyncOptions,
}

impl<'a> SyncEngine<'a> {
    pub fn new(
        backup: &'a mut dyn BackupStore,
        events: &'a dyn EventSink,
        options: SyncOptions,
    ) -> Self {
        Self {
            backup,
            events,
            options,
        }
    }

    /// Run one synchronization pass.
    ///
    /// An absent `staging_root` is the steady state between runs and yields
    /// an unmodified outcome. Any filesystem failure aborts the pass and
    /// leaves the staging tree intact so a re-run can reprocess it.
    pub fn synchronize(
        &mut self,
        staging_root: &Path,
        resource_root: &Path,
        derived_targets: &[PathBuf],
    ) -> SimsyncResult<SyncOutcome> {
        let mut outcome = SyncOutcome::default();

        if !staging_root.is_dir() {
            return Ok(outcome);
        }

        self.events.on_event(SyncEvent::Started {
            staging_root: staging_root.to_path_buf(),
        });

        for entry in StagedFiles::new(staging_root)? {
            let entry = entry?;
            let target = resource_root.join(&entry.relative);

            let decision = decide(entry.modified, target_mtime(&target)?);
            match decision {
                SyncDecision::Skip => {
                    self.events.on_event(SyncEvent::FileSkipped {
                        path: entry.relative.clone(),
                    });
                    continue;
                }
                SyncDecision::Replace => {
                    if !self.options.dry_run {
                        self.backup.backup_file(&target)?;
                        self.events.on_event(SyncEvent::FileBackedUp {
                            path: target.clone(),
                        });
                    }
                }
                SyncDecision::Create => {}
            }

            if !self.options.dry_run {
                copy_file(&entry.absolute, &target)?;
            }
            outcome.files_written += 1;
            outcome.modified = true;
            self.events.on_event(SyncEvent::FileWritten {
                path: entry.relative.clone(),
                created: decision == SyncDecision::Create,
            });

            for derived in derived_targets {
                let dest = derived.join(&entry.relative);
                if !self.options.dry_run {
                    copy_file(&entry.absolute, &dest)?;
                }
                self.events.on_event(SyncEvent::FannedOut {
                    path: entry.relative.clone(),
                    target: dest,
                });
            }
        }

        // Commit point: the staging input is consumed only after every file
        // has been processed without error.
        if !self.options.dry_run {
            fs::remove_dir_all(staging_root)?;
            self.events.on_event(SyncEvent::StagingCleared {
                staging_root: staging_root.to_path_buf(),
            });
        }

        self.events.on_event(SyncEvent::Completed {
            files_written: outcome.files_written,
            modified: outcome.modified,
        });
        Ok(outcome)
    }
}

/// Modification time of the target path, or `None` if nothing is there
fn target_mtime(path: &Path) -> SimsyncResult<Option<SystemTime>> {
    match fs::metadata(path) {
        Ok(meta) => Ok(Some(meta.modified()?)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Copy `source` to `dest` through a temp file in the destination directory,
/// so an interrupted copy never leaves a half-written resource file. The
/// copy's mtime becomes "now", marking when the resource was accepted.
fn copy_file(source: &Path, dest: &Path) -> SimsyncResult<()> {
    let parent = dest.parent().unwrap_or(Path::new("."));
    fs::create_dir_all(parent)?;

    let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
    let mut reader = fs::File::open(source)?;
    io::copy(&mut reader, tmp.as_file_mut())?;
    tmp.persist(dest).map_err(|e| e.error)?;
    Ok(())
}
