//! Builder for creating and configuring Coordinator instances.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tokio::task;

use super::Coordinator;
use crate::{
    agent::{AgentClassifier, KeywordClassifier},
    db::Database,
    error::{CoachError, Result},
    generate::{HeuristicGenerator, StepGenerator},
};

const DEFAULT_GENERATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Builder for creating and configuring Coordinator instances.
pub struct CoordinatorBuilder {
    database_path: Option<PathBuf>,
    classifier: Option<Arc<dyn AgentClassifier>>,
    generator: Option<Arc<dyn StepGenerator>>,
    generation_timeout: Duration,
}

impl CoordinatorBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            database_path: None,
            classifier: None,
            generator: None,
            generation_timeout: DEFAULT_GENERATION_TIMEOUT,
        }
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/stride/stride.db` or `~/.local/share/stride/stride.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Sets the agent classifier. Defaults to the deterministic
    /// [`KeywordClassifier`] stand-in.
    pub fn with_classifier(mut self, classifier: Arc<dyn AgentClassifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    /// Sets the step generator. Defaults to the deterministic
    /// [`HeuristicGenerator`] stand-in.
    pub fn with_generator(mut self, generator: Arc<dyn StepGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Bounds how long a single generative producer call may take before the
    /// turn degrades to the unmodified-plan-plus-note outcome.
    pub fn with_generation_timeout(mut self, timeout: Duration) -> Self {
        self.generation_timeout = timeout;
        self
    }

    /// Builds the configured coordinator instance.
    ///
    /// # Errors
    ///
    /// Returns `CoachError::FileSystem` if the database path is invalid,
    /// `CoachError::Database` if database initialization fails.
    pub async fn build(self) -> Result<Coordinator> {
        let db_path = if let Some(path) = self.database_path {
            path
        } else {
            Self::default_database_path()?
        };

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| CoachError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || {
            let _db = Database::new(&db_path_clone)?;
            Ok::<(), CoachError>(())
        })
        .await
        .map_err(|e| CoachError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        Ok(Coordinator::new(
            db_path,
            self.classifier
                .unwrap_or_else(|| Arc::new(KeywordClassifier)),
            self.generator
                .unwrap_or_else(|| Arc::new(HeuristicGenerator)),
            self.generation_timeout,
        ))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("stride")
            .place_data_file("stride.db")
            .map_err(|e| CoachError::XdgDirectory(e.to_string()))
    }
}

impl Default for CoordinatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
