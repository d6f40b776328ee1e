//! Durable storage for the trained model: one versioned JSON artifact at a
//! well-known path, overwritten wholesale on each retrain.
//!
//! Reads degrade rather than fail: a missing, unreadable, or
//! wrong-version artifact is reported as "no model" so categorization
//! stays available. Writes do fail loudly, since silently dropping a
//! freshly trained model would be invisible to the operator.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::model::SoftmaxClassifier;
use crate::vectorizer::CharGramVectorizer;

/// Bumped whenever the artifact layout changes; older blobs are ignored
pub const ARTIFACT_VERSION: u32 = 1;

const ARTIFACT_FILE: &str = "category_model.json";

/// The persisted form of a trained model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,
    pub trained_at_utc: DateTime<Utc>,
    pub sample_count: usize,
    /// Category labels in sorted order; class indices refer into this list
    pub labels: Vec<String>,
    pub vectorizer: CharGramVectorizer,
    pub classifier: SoftmaxClassifier,
}

/// Filesystem-backed artifact store
#[derive(Debug, Clone)]
pub struct ModelStore {
    path: PathBuf,
}

impl ModelStore {
    /// Store rooted at `dir`; the artifact lives at `dir/category_model.json`
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(ARTIFACT_FILE),
        }
    }

    /// Default store under `~/.tally`
    pub fn default_location() -> Result<Self> {
        let home = std::env::var("HOME").context("HOME is not set")?;
        Ok(Self::new(PathBuf::from(home).join(".tally")))
    }

    /// Artifact path on disk
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist the artifact, overwriting any prior one
    pub fn save(&self, artifact: &ModelArtifact) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create {}", parent.display()))?;
        }
        let json = serde_json::to_string(artifact)?;
        fs::write(&self.path, json)
            .with_context(|| format!("write {}", self.path.display()))?;
        Ok(())
    }

    /// Load the artifact, or None when no usable model exists.
    /// Read and parse failures are logged and treated as "never trained".
    pub fn load(&self) -> Option<ModelArtifact> {
        if !self.path.exists() {
            return None;
        }
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(path = %self.path.display(), %err, "model artifact unreadable, treating as untrained");
                return None;
            }
        };
        let artifact: ModelArtifact = match serde_json::from_str(&raw) {
            Ok(artifact) => artifact,
            Err(err) => {
                warn!(path = %self.path.display(), %err, "model artifact corrupt, treating as untrained");
                return None;
            }
        };
        if artifact.format_version != ARTIFACT_VERSION {
            warn!(
                found = artifact.format_version,
                expected = ARTIFACT_VERSION,
                "model artifact version mismatch, treating as untrained"
            );
            return None;
        }
        Some(artifact)
    }
}
