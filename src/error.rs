//! Error types for simsync
//!
//! Uses `thiserror` for library errors; the binary maps each variant to a
//! distinguishing exit code.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for simsync operations
pub type SimsyncResult<T> = Result<T, SimsyncError>;

/// Main error type for simsync operations
#[derive(Error, Debug)]
pub enum SimsyncError {
    /// No .xcodeproj entry found walking up from the start path
    #[error("no Xcode project found within {path}")]
    ProjectNotFound { path: PathBuf },

    /// More than one .xcodeproj entry in the same directory
    #[error("multiple Xcode projects found within {path}")]
    MultipleProjects { path: PathBuf },

    /// Required directory missing
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Neither --simulator nor the config file named the simulator
    /// application-data directory
    #[error("no simulator directory specified; pass --simulator or set simulator_dir in config")]
    SimulatorNotSpecified,

    /// Exactly one match was required, zero or several were found
    #[error("expected exactly one {what} under {path}, found {count}")]
    AmbiguousMatch {
        what: &'static str,
        path: PathBuf,
        count: usize,
    },

    /// Build report listed no targets
    #[error("project {project} has no targets")]
    NoTargets { project: PathBuf },

    /// Config file did not parse
    #[error("invalid config {path}: {message}")]
    InvalidConfig { path: PathBuf, message: String },

    /// xcodebuild exited unsuccessfully
    #[error("xcodebuild -list failed for {project}: {detail}")]
    BuildTool { project: PathBuf, detail: String },

    /// Build-info text did not conform to the expected report grammar.
    /// Carries the offending line and the full report text for diagnostics.
    #[error("problem parsing build info at line: {line}")]
    Parse { line: String, report: String },

    /// Backup of a file about to be overwritten failed; the overwrite was
    /// not performed.
    #[error("backup of {path} failed: {source}")]
    Backup {
        path: PathBuf,
        source: std::io::Error,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SimsyncError {
    /// Process exit code for this failure: 2 for configuration problems,
    /// 3 for build-info parse problems, 1 for everything else.
    pub fn exit_code(&self) -> i32 {
        match self {
            SimsyncError::ProjectNotFound { .. }
            | SimsyncError::MultipleProjects { .. }
            | SimsyncError::DirectoryNotFound { .. }
            | SimsyncError::SimulatorNotSpecified
            | SimsyncError::AmbiguousMatch { .. }
            | SimsyncError::NoTargets { .. }
            | SimsyncError::InvalidConfig { .. } => 2,
            SimsyncError::Parse { .. } => 3,
            SimsyncError::BuildTool { .. }
            | SimsyncError::Backup { .. }
            | SimsyncError::Io(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_error_display_project_not_found() {
        let err = SimsyncError::ProjectNotFound {
            path: PathBuf::from("/work/app"),
        };
        assert_eq!(err.to_string(), "no Xcode project found within /work/app");
    }

    #[test]
    fn test_error_display_ambiguous_match() {
        let err = SimsyncError::AmbiguousMatch {
            what: "application directory",
            path: PathBuf::from("/sim/Application"),
            count: 2,
        };
        assert_eq!(
            err.to_string(),
            "expected exactly one application directory under /sim/Application, found 2"
        );
    }

    #[test]
    fn test_parse_error_names_offending_line() {
        let err = SimsyncError::Parse {
            line: "Bogus:".to_string(),
            report: "Information about project\nBogus:\n".to_string(),
        };
        assert!(err.to_string().contains("Bogus:"));
    }

    #[test]
    fn test_exit_codes_distinguish_failure_classes() {
        let config = SimsyncError::ProjectNotFound {
            path: PathBuf::from("/x"),
        };
        let parse = SimsyncError::Parse {
            line: String::new(),
            report: String::new(),
        };
        let io = SimsyncError::Io(std::io::Error::other("boom"));

        assert_eq!(config.exit_code(), 2);
        assert_eq!(parse.exit_code(), 3);
        assert_eq!(io.exit_code(), 1);
    }
}
