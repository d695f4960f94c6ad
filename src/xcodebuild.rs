//! Thin wrapper around the `xcodebuild` command-line tool

use std::path::Path;
use std::process::Command;

use crate::error::{SimsyncError, SimsyncResult};
use crate::project_info::{self, BuildReport};

/// Run `xcodebuild -project <dir> -list` and return its raw stdout
pub fn query_project_info(project: &Path) -> SimsyncResult<String> {
    let output = Command::new("xcodebuild")
        .arg("-project")
        .arg(project)
        .arg("-list")
        .output()
        .map_err(|e| SimsyncError::BuildTool {
            project: project.to_path_buf(),
            detail: format!("failed to run xcodebuild: {e}"),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(SimsyncError::BuildTool {
            project: project.to_path_buf(),
            detail: format!(
                "exit code {:?}: {}",
                output.status.code(),
                stderr.trim()
            ),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Query and parse the build report for a project
pub fn load_build_report(project: &Path) -> SimsyncResult<BuildReport> {
    let text = query_project_info(project)?;
    project_info::parse(&text)
}

/// Resolve the build target name used to identify the installed application:
/// the first target listed in the report.
pub fn resolve_target(project: &Path, report: &BuildReport) -> SimsyncResult<String> {
    report
        .first_target()
        .map(str::to_string)
        .ok_or_else(|| SimsyncError::NoTargets {
            project: project.to_path_buf(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_resolve_target_takes_first() {
        let report = BuildReport {
            targets: vec!["Main".to_string(), "MainTests".to_string()],
            ..Default::default()
        };
        let target = resolve_target(Path::new("/p/App.xcodeproj"), &report).unwrap();
        assert_eq!(target, "Main");
    }

    #[test]
    fn test_resolve_target_empty_report_is_error() {
        let err = resolve_target(Path::new("/p/App.xcodeproj"), &BuildReport::default())
            .unwrap_err();
        assert!(matches!(
            err,
            SimsyncError::NoTargets { project } if project == PathBuf::from("/p/App.xcodeproj")
        ));
    }
}
