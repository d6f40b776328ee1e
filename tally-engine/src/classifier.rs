//! The trainable merchant-name classifier: train/predict lifecycle over a
//! persisted model artifact with a single-slot in-process cache.
//!
//! Expected negative outcomes (too little data, no model on disk) are
//! values, not errors. Only a storage write failure during training
//! surfaces as `Err`.

use anyhow::Result;
use chrono::Utc;
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::info;

use tally_core::normalize_merchant;

use crate::model::SoftmaxClassifier;
use crate::store::{ARTIFACT_VERSION, ModelArtifact, ModelStore};
use crate::vectorizer::CharGramVectorizer;

/// Minimum labeled samples before training is attempted
pub const MIN_TRAINING_SAMPLES: usize = 20;

/// One labeled merchant name, sourced from historical receipts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingSample {
    pub merchant: String,
    pub category: String,
}

impl TrainingSample {
    pub fn new(merchant: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            merchant: merchant.into(),
            category: category.into(),
        }
    }
}

/// What a training pass did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrainOutcome {
    /// Model fitted, persisted, and cached
    Trained {
        sample_count: usize,
        /// Distinct labels seen, sorted
        categories: Vec<String>,
    },
    /// Training declined; the previous model (if any) is untouched
    Skipped { reason: String },
}

impl TrainOutcome {
    pub fn is_trained(&self) -> bool {
        matches!(self, TrainOutcome::Trained { .. })
    }
}

/// A classifier verdict for one merchant name
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub category: String,
    /// Probability of the winning category, in [0, 1]
    pub confidence: f64,
}

/// Trainable classifier backed by a [`ModelStore`] and a single-slot cache.
/// Cheap to share behind an `Arc`; all methods take `&self`.
#[derive(Debug)]
pub struct Classifier {
    store: ModelStore,
    cache: Mutex<Option<Arc<ModelArtifact>>>,
}

fn lock_cache(
    cache: &Mutex<Option<Arc<ModelArtifact>>>,
) -> MutexGuard<'_, Option<Arc<ModelArtifact>>> {
    // a poisoned cache slot still holds either None or a fully built model
    cache.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Classifier {
    pub fn new(store: ModelStore) -> Self {
        Self {
            store,
            cache: Mutex::new(None),
        }
    }

    /// Fit the vectorizer + softmax pipeline on the samples, persist the
    /// artifact (overwriting any prior one), and swap it into the cache.
    ///
    /// Declines softly with [`TrainOutcome::Skipped`] when fewer than
    /// [`MIN_TRAINING_SAMPLES`] samples or fewer than 2 distinct labels
    /// are supplied. Only a storage write failure is an `Err`.
    pub fn train(&self, samples: &[TrainingSample]) -> Result<TrainOutcome> {
        if samples.len() < MIN_TRAINING_SAMPLES {
            return Ok(TrainOutcome::Skipped {
                reason: format!(
                    "Insufficient data: {} samples, need {}",
                    samples.len(),
                    MIN_TRAINING_SAMPLES
                ),
            });
        }

        let names: Vec<String> = samples
            .iter()
            .map(|s| normalize_merchant(&s.merchant))
            .collect();

        let labels: Vec<String> = samples
            .iter()
            .map(|s| s.category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        if labels.len() < 2 {
            return Ok(TrainOutcome::Skipped {
                reason: format!("Need at least 2 categories, found {}", labels.len()),
            });
        }

        let label_index: HashMap<&str, usize> = labels
            .iter()
            .enumerate()
            .map(|(idx, label)| (label.as_str(), idx))
            .collect();
        let targets: Vec<usize> = samples
            .iter()
            .map(|s| label_index[s.category.as_str()])
            .collect();

        let vectorizer = CharGramVectorizer::fit(&names);
        let features: Vec<Vec<f64>> = names.iter().map(|n| vectorizer.transform(n)).collect();
        let classifier = SoftmaxClassifier::fit(&features, &targets, labels.len());

        let artifact = ModelArtifact {
            format_version: ARTIFACT_VERSION,
            trained_at_utc: Utc::now(),
            sample_count: samples.len(),
            labels: labels.clone(),
            vectorizer,
            classifier,
        };
        self.store.save(&artifact)?;
        *lock_cache(&self.cache) = Some(Arc::new(artifact));

        info!(
            samples = samples.len(),
            categories = labels.len(),
            "category model trained"
        );

        Ok(TrainOutcome::Trained {
            sample_count: samples.len(),
            categories: labels,
        })
    }

    /// Predict a category for a merchant name.
    ///
    /// Returns `None` for a blank name or when no usable model exists
    /// (never trained, or the artifact is missing/unreadable). On a cold
    /// cache the persisted artifact is loaded lazily. The winning label is
    /// the one with maximum probability; an exact tie resolves to the
    /// earliest label in the sorted trained label list.
    pub fn predict(&self, name: &str) -> Option<Prediction> {
        let cleaned = normalize_merchant(name);
        if cleaned.is_empty() {
            return None;
        }

        let model = self.cached_or_load()?;
        let probs = model
            .classifier
            .predict_proba(&model.vectorizer.transform(&cleaned));

        let mut best = 0;
        for (idx, prob) in probs.iter().enumerate().skip(1) {
            if *prob > probs[best] {
                best = idx;
            }
        }

        Some(Prediction {
            category: model.labels[best].clone(),
            confidence: probs[best],
        })
    }

    /// Clear the cache slot only; the persisted artifact is untouched.
    /// The next `predict` reloads from storage.
    pub fn invalidate(&self) {
        *lock_cache(&self.cache) = None;
    }

    /// Administrative retrain: train, then drop the cached instance so the
    /// next prediction reloads the freshly persisted artifact.
    pub fn retrain(&self, samples: &[TrainingSample]) -> Result<TrainOutcome> {
        let outcome = self.train(samples)?;
        if outcome.is_trained() {
            self.invalidate();
        }
        Ok(outcome)
    }

    /// Peek at the persisted artifact without touching the cache
    pub fn stored_artifact(&self) -> Option<ModelArtifact> {
        self.store.load()
    }

    fn cached_or_load(&self) -> Option<Arc<ModelArtifact>> {
        let mut slot = lock_cache(&self.cache);
        if let Some(model) = slot.as_ref() {
            return Some(Arc::clone(model));
        }
        let model = Arc::new(self.store.load()?);
        *slot = Some(Arc::clone(&model));
        Some(model)
    }
}
