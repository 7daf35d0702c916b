//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is one open project file: the controller holding the loaded
//! snapshot, the path it came from, and the image gateway when one is
//! configured. Commands mutate the controller and call [`AppState::save`]
//! once at the end, so a failing command never writes a partial result.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use canvas::doc::Project;
use canvas::engine::{Action, EngineCore};
use tracing::{debug, info};

use crate::gateway::ImageGateway;
use crate::services::persistence::{self, PersistenceError};

pub struct AppState {
    pub engine: EngineCore,
    pub path: PathBuf,
    pub gateway: Option<Arc<dyn ImageGateway>>,
}

impl AppState {
    #[must_use]
    pub fn new(project: Project, path: PathBuf, gateway: Option<Arc<dyn ImageGateway>>) -> Self {
        Self { engine: EngineCore::new(project), path, gateway }
    }

    /// Open a project file. The controller starts with nothing selected.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] if the file cannot be read or is not a valid project.
    pub async fn open(path: &Path, gateway: Option<Arc<dyn ImageGateway>>) -> Result<Self, PersistenceError> {
        let text = persistence::read_text(path).await?;
        let mut engine = EngineCore::default();
        let actions = engine.load_snapshot(&text)?;
        log_actions(&actions);
        info!(path = %path.display(), name = %engine.project.name, "project opened");
        Ok(Self { engine, path: path.to_path_buf(), gateway })
    }

    /// Write the current snapshot back to the file it came from.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] if encoding or writing fails.
    pub async fn save(&self) -> Result<(), PersistenceError> {
        persistence::save_project(&self.path, &self.engine.project).await
    }
}

/// Trace controller notifications.
pub fn log_actions(actions: &[Action]) {
    for action in actions {
        debug!(?action, "engine action");
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
