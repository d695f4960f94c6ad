//! Directory location for a sync run
//!
//! Everything the engine needs on disk is resolved here, once, up front:
//! the Xcode project directory, the canonical resource directory next to it,
//! the app's data container inside the simulator, the staging subdirectory
//! within that container, and the derived build-output directories that
//! mirror the resource tree. The resolved set is passed to the engine as
//! plain values so the engine itself never probes for locations.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{SimsyncError, SimsyncResult};

/// Extension that marks an Xcode project bundle
const PROJECT_EXTENSION: &str = "xcodeproj";

/// Per-app metadata file inside each simulator app container
const CONTAINER_METADATA_FILE: &str = ".com.apple.mobile_container_manager.metadata.plist";

/// Staging subdirectory the running app writes new files into
const STAGING_SUBDIR: &str = "Documents/_newfiles_";

/// All directories a sync run reads from or writes to, resolved once
#[derive(Debug, Clone)]
pub struct ResolvedPaths {
    /// The .xcodeproj bundle directory
    pub project_dir: PathBuf,
    /// Project name (bundle file stem)
    pub project_name: String,
    /// Canonical resource directory next to the project
    pub resource_root: PathBuf,
    /// The app's "new files" staging directory; may not exist
    pub staging_root: PathBuf,
    /// Build-output directories mirroring the resource tree
    pub derived_targets: Vec<PathBuf>,
}

impl ResolvedPaths {
    /// Resolve every directory a run needs, given the already-located
    /// project bundle and the build target name that identifies the
    /// installed app.
    pub fn resolve(
        project_dir: PathBuf,
        simulator_dir: &Path,
        target: &str,
        resource_dir_name: &str,
        derived_data_root: &Path,
    ) -> SimsyncResult<Self> {
        let name = project_name(&project_dir);
        let resource_root = resource_root(&project_dir, resource_dir_name);
        let application_dir = application_directory(simulator_dir, target)?;
        let staging_root = staging_root(&application_dir);
        let derived_targets = derived_targets(derived_data_root, &name, resource_dir_name)?;

        Ok(Self {
            project_dir,
            project_name: name,
            resource_root,
            staging_root,
            derived_targets,
        })
    }
}

/// Find the Xcode project directory, walking up from `start`
/// (or the current directory) until a directory containing exactly one
/// `.xcodeproj` entry is found.
pub fn find_project(start: Option<&Path>) -> SimsyncResult<PathBuf> {
    let start = match start {
        Some(p) => p.to_path_buf(),
        None => std::env::current_dir()?,
    };

    // An explicit .xcodeproj path is taken as-is
    if start.extension().is_some_and(|e| e == PROJECT_EXTENSION) {
        if !start.is_dir() {
            return Err(SimsyncError::ProjectNotFound { path: start });
        }
        return Ok(start);
    }

    let mut dir = start.clone();
    loop {
        if !dir.is_dir() {
            break;
        }
        let mut projects = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|e| e == PROJECT_EXTENSION) {
                projects.push(path);
            }
        }
        match projects.len() {
            0 => {}
            1 => return Ok(projects.remove(0)),
            _ => return Err(SimsyncError::MultipleProjects { path: dir }),
        }
        match dir.parent() {
            Some(parent) if parent != dir => dir = parent.to_path_buf(),
            _ => break,
        }
    }

    Err(SimsyncError::ProjectNotFound { path: start })
}

/// Project name derived from the .xcodeproj bundle name
pub fn project_name(project_dir: &Path) -> String {
    project_dir
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Canonical resource directory: sibling of the project bundle
pub fn resource_root(project_dir: &Path, resource_dir_name: &str) -> PathBuf {
    let parent = project_dir.parent().unwrap_or(Path::new("."));
    parent.join(resource_dir_name)
}

/// Locate the app's data container under the simulator's Application
/// directory by matching the container metadata identifier against the build
/// target name. Exactly one container must match.
///
/// Container identifiers use dashes where target names use underscores, so
/// the search string is the target name with underscores replaced.
pub fn application_directory(simulator_dir: &Path, target: &str) -> SimsyncResult<PathBuf> {
    if !simulator_dir.is_dir() {
        return Err(SimsyncError::DirectoryNotFound {
            path: simulator_dir.to_path_buf(),
        });
    }

    let search = target.replace('_', "-");

    let mut containers: Vec<PathBuf> = Vec::new();
    for entry in fs::read_dir(simulator_dir)? {
        let path = entry?.path();
        if path.is_dir() {
            containers.push(path);
        }
    }
    containers.sort();

    let mut matches = Vec::new();
    for container in containers {
        let meta_file = container.join(CONTAINER_METADATA_FILE);
        if !meta_file.exists() {
            continue;
        }
        // The identifier is embedded as plain ASCII in both the XML and the
        // binary plist encoding, so a byte scan is sufficient here.
        let meta = fs::read(&meta_file)?;
        if String::from_utf8_lossy(&meta).contains(&search) {
            matches.push(container);
        }
    }

    if matches.len() != 1 {
        return Err(SimsyncError::AmbiguousMatch {
            what: "application directory",
            path: simulator_dir.to_path_buf(),
            count: matches.len(),
        });
    }
    Ok(matches.remove(0))
}

/// The staging directory the running app writes new files into
pub fn staging_root(application_dir: &Path) -> PathBuf {
    application_dir.join(STAGING_SUBDIR)
}

/// Default DerivedData root under the user's home directory
pub fn default_derived_data_root() -> SimsyncResult<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| SimsyncError::DirectoryNotFound {
        path: PathBuf::from("~"),
    })?;
    Ok(home.join("Library/Developer/Xcode/DerivedData"))
}

/// Find the build-output directories that mirror the resource tree: under
/// the project's DerivedData entry, every directory named like the resource
/// directory inside `Build/Products`.
pub fn derived_targets(
    derived_data_root: &Path,
    project: &str,
    resource_dir_name: &str,
) -> SimsyncResult<Vec<PathBuf>> {
    if !derived_data_root.is_dir() {
        return Err(SimsyncError::DirectoryNotFound {
            path: derived_data_root.to_path_buf(),
        });
    }

    // DerivedData entries are named "<Project>-<hash>"; exactly one must
    // belong to this project.
    let mut candidates = Vec::new();
    for entry in fs::read_dir(derived_data_root)? {
        let path = entry?.path();
        let name = path.file_name().map(|n| n.to_string_lossy().into_owned());
        if path.is_dir() && name.is_some_and(|n| n.starts_with(project)) {
            candidates.push(path);
        }
    }
    if candidates.len() != 1 {
        return Err(SimsyncError::AmbiguousMatch {
            what: "derived data project directory",
            path: derived_data_root.to_path_buf(),
            count: candidates.len(),
        });
    }

    let products = candidates.remove(0).join("Build/Products");
    if !products.is_dir() {
        return Err(SimsyncError::DirectoryNotFound { path: products });
    }

    let mut results = Vec::new();
    collect_resource_dirs(&products, resource_dir_name, &mut results)?;
    results.sort();
    Ok(results)
}

fn collect_resource_dirs(
    dir: &Path,
    resource_dir_name: &str,
    results: &mut Vec<PathBuf>,
) -> SimsyncResult<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_dir() {
            continue;
        }
        if path.file_name().is_some_and(|n| n == resource_dir_name) {
            results.push(path);
        } else {
            collect_resource_dirs(&path, resource_dir_name, results)?;
        }
    }
    Ok(())
}
