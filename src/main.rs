//! simsync CLI - simulator resource synchronization tool
//!
//! Usage: simsync <COMMAND>
//!
//! Commands:
//!   sync  Persist files created in the simulator back into the project
//!   info  Show the project's targets, build configurations, and schemes

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use simsync::error::SimsyncError;

mod commands;

/// simsync - persists files created by an app running in the iOS simulator
/// to the corresponding Xcode project directory
#[derive(Parser, Debug)]
#[command(name = "simsync")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output NDJSON events for CI
    #[arg(long, default_value = "false")]
    json: bool,

    /// Per-file line output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Persist staged files from the simulator into the project, then
    /// mirror them into the derived build-output directories
    Sync {
        /// Project directory or .xcodeproj bundle (found by walking up
        /// from the current directory when omitted)
        #[arg(short, long)]
        project: Option<PathBuf>,

        /// Simulator application-data directory
        /// (.../data/Containers/Data/Application)
        #[arg(short, long)]
        simulator: Option<PathBuf>,

        /// Dry run - report decisions without changing anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Show the project's targets, build configurations, and schemes
    Info {
        /// Project directory or .xcodeproj bundle
        #[arg(short, long)]
        project: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Sync {
            ref project,
            ref simulator,
            dry_run,
        } => commands::cmd_sync(
            project.as_deref(),
            simulator.as_deref(),
            dry_run,
            cli.verbose,
            cli.json,
        ),
        Commands::Info { ref project } => commands::cmd_info(project.as_deref(), cli.json),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            let code = err
                .downcast_ref::<SimsyncError>()
                .map(SimsyncError::exit_code)
                .unwrap_or(1);
            ExitCode::from(code as u8)
        }
    }
}
