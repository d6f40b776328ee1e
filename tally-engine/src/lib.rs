//! tally-engine: Trainable merchant-name classifier and the categorization
//! cascade that combines it with the curated rule tables in tally-core.

pub mod categorize;
pub mod classifier;
pub mod model;
pub mod store;
pub mod vectorizer;

pub use categorize::{
    CONFIDENCE_THRESHOLD, Categorizer, CategoryPredictor, DECISIVE_SCORE, DEFAULT_CATEGORY,
};
pub use classifier::{Classifier, Prediction, TrainOutcome, TrainingSample};
pub use model::SoftmaxClassifier;
pub use store::{ModelArtifact, ModelStore};
pub use vectorizer::CharGramVectorizer;
