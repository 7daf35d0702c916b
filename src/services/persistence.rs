//! Persistence service: project files on disk.
//!
//! DESIGN
//! ======
//! A project file is the JSON snapshot produced by the canvas codec. Loads
//! go through the codec's validation, so a malformed or inconsistent file
//! never reaches the controller. Saves write a sibling temp file and rename
//! it over the target; an interrupted save leaves the previous file intact.

use std::path::{Path, PathBuf};

use canvas::doc::Project;
use canvas::snapshot::{self, SnapshotError};
use tracing::{debug, info};

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    /// Refused to overwrite an existing project file.
    #[error("{0} already exists")]
    Exists(PathBuf),
}

impl PersistenceError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io { path: path.to_path_buf(), source }
    }
}

/// Download name for a project bundle: whitespace runs become `_`.
#[must_use]
pub fn bundle_file_name(project_name: &str) -> String {
    let mut out = String::with_capacity(project_name.len() + 12);
    let mut in_space = false;
    for ch in project_name.chars() {
        if ch.is_whitespace() {
            if !in_space {
                out.push('_');
            }
            in_space = true;
        } else {
            out.push(ch);
            in_space = false;
        }
    }
    out.push_str("_bundle.json");
    out
}

/// Read a project file as text.
///
/// # Errors
///
/// Returns [`PersistenceError::Io`] if the file cannot be read.
pub async fn read_text(path: &Path) -> Result<String, PersistenceError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| PersistenceError::io(path, e))?;
    debug!(path = %path.display(), bytes = text.len(), "persistence: read");
    Ok(text)
}

/// Load and validate a project file.
///
/// # Errors
///
/// Returns [`PersistenceError`] if the file cannot be read or is not a valid project.
pub async fn load_project(path: &Path) -> Result<Project, PersistenceError> {
    let text = read_text(path).await?;
    Ok(snapshot::from_json(&text)?)
}

/// Write a project file, replacing any previous version atomically.
///
/// # Errors
///
/// Returns [`PersistenceError`] if encoding or any filesystem step fails.
pub async fn save_project(path: &Path, project: &Project) -> Result<(), PersistenceError> {
    let text = snapshot::to_json(project)?;
    let tmp = temp_path(path);
    tokio::fs::write(&tmp, text.as_bytes())
        .await
        .map_err(|e| PersistenceError::io(&tmp, e))?;
    tokio::fs::rename(&tmp, path)
        .await
        .map_err(|e| PersistenceError::io(path, e))?;
    info!(path = %path.display(), pages = project.pages.len(), "persistence: saved");
    Ok(())
}

/// Write a new project file, refusing to replace an existing one.
///
/// # Errors
///
/// Returns [`PersistenceError::Exists`] if `path` already exists.
pub async fn create_project(path: &Path, project: &Project) -> Result<(), PersistenceError> {
    let exists = tokio::fs::try_exists(path)
        .await
        .map_err(|e| PersistenceError::io(path, e))?;
    if exists {
        return Err(PersistenceError::Exists(path.to_path_buf()));
    }
    save_project(path, project).await
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(std::ffi::OsStr::to_os_string)
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
#[path = "persistence_test.rs"]
mod tests;
