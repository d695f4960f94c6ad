//! Info command handler
//!
//! Prints the parsed build report for a project: targets, build
//! configurations, and schemes as xcodebuild lists them.

use std::path::Path;

use anyhow::Result;

use simsync::project_info::BuildReport;
use simsync::{paths, xcodebuild};

/// Execute the info command
pub fn cmd_info(project: Option<&Path>, json: bool) -> Result<()> {
    let project_dir = paths::find_project(project)?;
    let report = xcodebuild::load_build_report(&project_dir)?;

    if json {
        println!(
            "{}",
            serde_json::json!({
                "project": project_dir.display().to_string(),
                "targets": report.targets,
                "build_configurations": report.build_configurations,
                "schemes": report.schemes,
            })
        );
    } else {
        print!("{}", render_report(&project_dir, &report));
    }
    Ok(())
}

fn render_report(project_dir: &Path, report: &BuildReport) -> String {
    let mut out = format!("Project: {}\n", project_dir.display());
    for (title, entries) in [
        ("Targets", &report.targets),
        ("Build Configurations", &report.build_configurations),
        ("Schemes", &report.schemes),
    ] {
        out.push_str(&format!("{title}:\n"));
        if entries.is_empty() {
            out.push_str("  (none)\n");
        }
        for entry in entries {
            out.push_str(&format!("  {entry}\n"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_report_lists_sections_in_order() {
        let report = BuildReport {
            targets: vec!["App".to_string()],
            build_configurations: vec!["Debug".to_string(), "Release".to_string()],
            schemes: vec![],
        };
        let out = render_report(Path::new("/w/App.xcodeproj"), &report);

        insta::assert_snapshot!(out, @r"
        Project: /w/App.xcodeproj
        Targets:
          App
        Build Configurations:
          Debug
          Release
        Schemes:
          (none)
        ");
    }
}
