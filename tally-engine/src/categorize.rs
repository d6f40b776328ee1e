//! The categorization cascade: curated merchant rules, then keyword
//! signals, then the trained classifier, then a guaranteed fallback.
//!
//! Rules are cheap, auditable, and authoritative when they fire; the
//! classifier only gets the ambiguous middle band. A weak-but-nonzero
//! keyword signal still outranks an unconfident model, because the keyword
//! lists are curated and model quality drifts with its training data.

use tally_core::{Source, Verdict, best_signal, lookup_merchant};

use crate::classifier::{Classifier, Prediction};

/// Keyword score at which the classifier is not consulted:
/// one strong keyword, or three moderate ones
pub const DECISIVE_SCORE: i32 = 3;
/// Minimum classifier confidence for an ML verdict
pub const CONFIDENCE_THRESHOLD: f64 = 0.6;
/// System-wide terminal fallback category
pub const DEFAULT_CATEGORY: &str = "Shopping";

/// The classifier seam of the cascade. The real [`Classifier`] implements
/// this; tests substitute stubs to pin each tier down.
pub trait CategoryPredictor {
    fn predict(&self, name: &str) -> Option<Prediction>;
}

impl CategoryPredictor for Classifier {
    fn predict(&self, name: &str) -> Option<Prediction> {
        Classifier::predict(self, name)
    }
}

impl<P: CategoryPredictor + ?Sized> CategoryPredictor for &P {
    fn predict(&self, name: &str) -> Option<Prediction> {
        (**self).predict(name)
    }
}

/// Orchestrates the cascade over a predictor. This is the only entry point
/// the rest of the system calls for category assignment.
#[derive(Debug)]
pub struct Categorizer<P> {
    predictor: P,
}

impl<P: CategoryPredictor> Categorizer<P> {
    pub fn new(predictor: P) -> Self {
        Self { predictor }
    }

    /// Assign a category to a merchant name. Never fails: the cascade
    /// terminates in the default category when nothing else fires.
    ///
    /// Tier order: merchant rule, decisive keyword score (>= 3), confident
    /// classifier prediction (>= 0.6), weak keyword score (> 0), default.
    pub fn categorize(&self, name: &str) -> Verdict {
        if let Some(category) = lookup_merchant(name) {
            return Verdict::new(category, Source::MerchantRule);
        }

        let (best_category, best_score) = best_signal(name);
        if best_score >= DECISIVE_SCORE {
            return Verdict::new(best_category, Source::KeywordRule);
        }

        if let Some(prediction) = self.predictor.predict(name) {
            if prediction.confidence >= CONFIDENCE_THRESHOLD {
                return Verdict::new(prediction.category, Source::Ml);
            }
        }

        if best_score > 0 {
            return Verdict::new(best_category, Source::KeywordRule);
        }

        Verdict::new(DEFAULT_CATEGORY, Source::Default)
    }

    /// Access the underlying predictor (e.g. for admin retrain calls)
    pub fn predictor(&self) -> &P {
        &self.predictor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Stub returning a fixed prediction
    struct Fixed(Option<Prediction>);

    impl CategoryPredictor for Fixed {
        fn predict(&self, _name: &str) -> Option<Prediction> {
            self.0.clone()
        }
    }

    /// Stub that fails the test if the cascade consults it
    struct MustNotBeCalled;

    impl CategoryPredictor for MustNotBeCalled {
        fn predict(&self, name: &str) -> Option<Prediction> {
            panic!("classifier consulted for {name:?}");
        }
    }

    fn confident(category: &str, confidence: f64) -> Fixed {
        Fixed(Some(Prediction {
            category: category.to_string(),
            confidence,
        }))
    }

    #[test]
    fn test_merchant_rule_wins_without_classifier() {
        let categorizer = Categorizer::new(MustNotBeCalled);
        let verdict = categorizer.categorize("Trader Joe's Market");
        assert_eq!(verdict, Verdict::new("Food & Drink", Source::MerchantRule));
    }

    #[test]
    fn test_decisive_keyword_skips_classifier() {
        let categorizer = Categorizer::new(MustNotBeCalled);
        let verdict = categorizer.categorize("Downtown Restaurant and Bakery");
        assert_eq!(verdict, Verdict::new("Food & Drink", Source::KeywordRule));
    }

    #[test]
    fn test_weak_keyword_defers_to_confident_ml() {
        let categorizer = Categorizer::new(confident("Health", 0.85));
        let verdict = categorizer.categorize("Green Yoga Place");
        assert_eq!(verdict, Verdict::new("Health", Source::Ml));
    }

    #[test]
    fn test_unconfident_ml_falls_back_to_weak_keyword() {
        let categorizer = Categorizer::new(confident("Health", 0.3));
        let verdict = categorizer.categorize("Green Yoga Place");
        assert_eq!(verdict, Verdict::new("Health", Source::KeywordRule));
    }

    #[test]
    fn test_confident_ml_without_keyword_signal() {
        let categorizer = Categorizer::new(confident("Travel", 0.78));
        let verdict = categorizer.categorize("XYZZY Corp 12345");
        assert_eq!(verdict, Verdict::new("Travel", Source::Ml));
    }

    #[test]
    fn test_nothing_fires_defaults_to_shopping() {
        let categorizer = Categorizer::new(Fixed(None));
        let verdict = categorizer.categorize("XYZZY Corp 12345");
        assert_eq!(verdict, Verdict::new(DEFAULT_CATEGORY, Source::Default));
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let categorizer = Categorizer::new(confident("Travel", CONFIDENCE_THRESHOLD));
        let verdict = categorizer.categorize("XYZZY Corp 12345");
        assert_eq!(verdict.source, Source::Ml);
    }

    #[test]
    fn test_blank_name_defaults() {
        let categorizer = Categorizer::new(Fixed(None));
        assert_eq!(
            categorizer.categorize(""),
            Verdict::new(DEFAULT_CATEGORY, Source::Default)
        );
        assert_eq!(
            categorizer.categorize("   "),
            Verdict::new(DEFAULT_CATEGORY, Source::Default)
        );
    }
}
