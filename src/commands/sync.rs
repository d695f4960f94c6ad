//! Sync command handler
//!
//! Resolves every directory the run needs, then hands them to the engine.

use std::path::Path;

use anyhow::Result;
use is_terminal::IsTerminal;

use simsync::backup::BackupSet;
use simsync::config::{Config, ConfigWarning};
use simsync::error::SimsyncError;
use simsync::events::{ConsoleSink, EventSink, JsonSink, NoopSink};
use simsync::paths::{self, ResolvedPaths};
use simsync::sync::{SyncEngine, SyncOptions, SyncOutcome};
use simsync::xcodebuild;

/// Execute the sync command
pub fn cmd_sync(
    project: Option<&Path>,
    simulator: Option<&Path>,
    dry_run: bool,
    verbose: bool,
    json: bool,
) -> Result<()> {
    let project_dir = paths::find_project(project)?;

    let (config, warnings) = Config::load(project_dir.parent())?;
    if !json {
        print_config_warnings(&warnings);
    }
    let verbose = verbose || config.verbose;

    let report = xcodebuild::load_build_report(&project_dir)?;
    let target = xcodebuild::resolve_target(&project_dir, &report)?;

    let simulator_dir = simulator
        .map(Path::to_path_buf)
        .or_else(|| config.simulator_dir.clone())
        .ok_or(SimsyncError::SimulatorNotSpecified)?;
    let derived_data_root = match &config.derived_data_dir {
        Some(dir) => dir.clone(),
        None => paths::default_derived_data_root()?,
    };

    let resolved = ResolvedPaths::resolve(
        project_dir,
        &simulator_dir,
        &target,
        &config.resource_dir,
        &derived_data_root,
    )?;

    let sink: Box<dyn EventSink> = if json {
        Box::new(JsonSink::stdout())
    } else if verbose {
        Box::new(ConsoleSink::stdout())
    } else {
        Box::new(NoopSink)
    };

    let mut backup = BackupSet::new("simsync", &resolved.resource_root)?;
    let mut engine = SyncEngine::new(&mut backup, sink.as_ref(), SyncOptions { dry_run });
    let outcome = engine.synchronize(
        &resolved.staging_root,
        &resolved.resource_root,
        &resolved.derived_targets,
    )?;

    if !json {
        println!("{}", render_summary(&resolved, &outcome, dry_run));
    }
    Ok(())
}

fn print_config_warnings(warnings: &[ConfigWarning]) {
    for w in warnings {
        eprintln!("warning: unknown config key '{}'", w.key);
    }
}

/// One-line human-readable result
fn render_summary(resolved: &ResolvedPaths, outcome: &SyncOutcome, dry_run: bool) -> String {
    let glyph = if std::io::stdout().is_terminal() {
        "✓ "
    } else {
        ""
    };
    let prefix = if dry_run { "(dry run) " } else { "" };
    if outcome.is_noop() {
        format!("{glyph}{prefix}nothing staged; {} unchanged", resolved.project_name)
    } else {
        format!(
            "{glyph}{prefix}{} file(s) accepted into {}",
            outcome.files_written,
            resolved.resource_root.display()
        )
    }
}
