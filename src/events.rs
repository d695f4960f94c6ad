//! Sync run events
//!
//! The engine never prints. It reports progress through an [`EventSink`] so
//! callers choose how a run is rendered: verbose console lines, an NDJSON
//! stream for CI, or nothing at all.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Event emitted during a sync run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    /// A staging tree was found and the run started
    Started { staging_root: PathBuf },

    /// Resource file written (`created` distinguishes Create from Replace)
    FileWritten { path: PathBuf, created: bool },

    /// Staged file skipped: the committed copy is at least as new
    FileSkipped { path: PathBuf },

    /// Existing resource file preserved before replacement
    FileBackedUp { path: PathBuf },

    /// Canonical copy propagated to a derived directory
    FannedOut { path: PathBuf, target: PathBuf },

    /// Staging tree deleted after a fully successful pass
    StagingCleared { staging_root: PathBuf },

    /// Run finished
    Completed { files_written: usize, modified: bool },
}

/// Trait for receiving sync events
///
/// Implementations:
/// - [`ConsoleSink`]: per-file line output for --verbose
/// - [`JsonSink`]: NDJSON event stream for CI
/// - [`NoopSink`]: silent operation
pub trait EventSink {
    /// Handle a sync event
    fn on_event(&self, event: SyncEvent);
}

/// No-op event sink for silent operation
pub struct NoopSink;

impl EventSink for NoopSink {
    fn on_event(&self, _event: SyncEvent) {
        // Do nothing
    }
}

/// Event sink that prints one line per event to a writer
pub struct ConsoleSink {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleSink {
    /// Console sink writing to stdout
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout())
    }

    /// Console sink writing to a custom writer (for testing)
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn line(&self, text: String) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{text}");
        }
    }
}

impl EventSink for ConsoleSink {
    fn on_event(&self, event: SyncEvent) {
        match event {
            SyncEvent::Started { staging_root } => {
                self.line(format!(
                    "Updating new resource files from: {}",
                    staging_root.display()
                ));
            }
            SyncEvent::FileWritten { path, created } => {
                let marker = if created { 'A' } else { 'W' };
                self.line(format!("{marker} {}", path.display()));
            }
            SyncEvent::FileSkipped { path } => {
                self.line(format!(". {}", path.display()));
            }
            SyncEvent::FileBackedUp { path } => {
                self.line(format!("  backed up {}", path.display()));
            }
            SyncEvent::FannedOut { path, target } => {
                self.line(format!("  {} ==> {}", path.display(), target.display()));
            }
            SyncEvent::StagingCleared { staging_root } => {
                self.line(format!("Cleared staging: {}", staging_root.display()));
            }
            SyncEvent::Completed { .. } => {}
        }
    }
}

/// Event sink that outputs NDJSON events
pub struct JsonSink {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonSink {
    /// JSON sink writing to stdout
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout())
    }

    /// JSON sink writing to a custom writer (for testing)
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{event}");
            let _ = writer.flush();
        }
    }
}

fn display(path: &Path) -> String {
    path.display().to_string()
}

impl EventSink for JsonSink {
    fn on_event(&self, event: SyncEvent) {
        let json = match event {
            SyncEvent::Started { staging_root } => serde_json::json!({
                "event": "start",
                "staging_root": display(&staging_root),
            }),
            SyncEvent::FileWritten { path, created } => serde_json::json!({
                "event": "file_written",
                "path": display(&path),
                "created": created,
            }),
            SyncEvent::FileSkipped { path } => serde_json::json!({
                "event": "file_skipped",
                "path": display(&path),
            }),
            SyncEvent::FileBackedUp { path } => serde_json::json!({
                "event": "file_backed_up",
                "path": display(&path),
            }),
            SyncEvent::FannedOut { path, target } => serde_json::json!({
                "event": "fanned_out",
                "path": display(&path),
                "target": display(&target),
            }),
            SyncEvent::StagingCleared { staging_root } => serde_json::json!({
                "event": "staging_cleared",
                "staging_root": display(&staging_root),
            }),
            SyncEvent::Completed {
                files_written,
                modified,
            } => serde_json::json!({
                "event": "completed",
                "files_written": files_written,
                "modified": modified,
            }),
        };
        self.write_event(json);
    }
}
