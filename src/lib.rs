//! simsync - simulator resource synchronization tool
//!
//! simsync persists files created by an iOS app running inside the
//! simulator back into the corresponding Xcode project directory, then
//! re-distributes each accepted file to every derived build-output
//! directory that mirrors the project's resource tree.

pub mod backup;
pub mod config;
pub mod error;
pub mod events;
pub mod paths;
pub mod project_info;
pub mod sync;
pub mod xcodebuild;

// Re-exports for convenience
pub use backup::{BackupSet, BackupStore};
pub use config::{Config, ConfigWarning};
pub use error::{SimsyncError, SimsyncResult};
pub use events::{ConsoleSink, EventSink, JsonSink, NoopSink, SyncEvent};
pub use paths::ResolvedPaths;
pub use project_info::{parse, BuildReport};
pub use sync::{decide, SyncDecision, SyncEngine, SyncOptions, SyncOutcome};
