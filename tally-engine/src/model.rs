//! Multinomial logistic regression trained by full-batch gradient descent.
//!
//! Deterministic by construction: weights start at zero, the epoch count is
//! fixed, and samples are never shuffled, so the same training set always
//! produces the same model.

use serde::{Deserialize, Serialize};

/// Full-batch passes over the training set
const EPOCHS: usize = 300;
/// Gradient descent step size
const LEARNING_RATE: f64 = 0.5;
/// L2 regularization strength
const L2_PENALTY: f64 = 1e-4;

/// Trained multinomial logistic regression model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoftmaxClassifier {
    /// One weight row per class, one column per feature
    weights: Vec<Vec<f64>>,
    /// One intercept per class
    bias: Vec<f64>,
}

fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let total: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}

impl SoftmaxClassifier {
    /// Fit on dense feature rows and class indices in `0..n_classes`
    pub fn fit(features: &[Vec<f64>], labels: &[usize], n_classes: usize) -> Self {
        let n_samples = features.len();
        let n_features = features.first().map(|row| row.len()).unwrap_or(0);

        let mut weights = vec![vec![0.0; n_features]; n_classes];
        let mut bias = vec![0.0; n_classes];

        for _ in 0..EPOCHS {
            let mut grad_w = vec![vec![0.0; n_features]; n_classes];
            let mut grad_b = vec![0.0; n_classes];

            for (row, &label) in features.iter().zip(labels) {
                let scores: Vec<f64> = (0..n_classes)
                    .map(|c| {
                        bias[c]
                            + weights[c]
                                .iter()
                                .zip(row)
                                .map(|(w, x)| w * x)
                                .sum::<f64>()
                    })
                    .collect();
                let probs = softmax(&scores);

                for c in 0..n_classes {
                    let error = probs[c] - if c == label { 1.0 } else { 0.0 };
                    grad_b[c] += error;
                    for (g, x) in grad_w[c].iter_mut().zip(row) {
                        *g += error * x;
                    }
                }
            }

            let scale = LEARNING_RATE / n_samples as f64;
            for c in 0..n_classes {
                bias[c] -= scale * grad_b[c];
                for (w, g) in weights[c].iter_mut().zip(&grad_w[c]) {
                    *w -= scale * g + LEARNING_RATE * L2_PENALTY * *w;
                }
            }
        }

        Self { weights, bias }
    }

    /// Probability distribution over the classes for one feature row
    pub fn predict_proba(&self, features: &[f64]) -> Vec<f64> {
        let scores: Vec<f64> = self
            .weights
            .iter()
            .zip(&self.bias)
            .map(|(row, b)| {
                b + row
                    .iter()
                    .zip(features)
                    .map(|(w, x)| w * x)
                    .sum::<f64>()
            })
            .collect();
        softmax(&scores)
    }

    /// Number of classes this model was fitted on
    pub fn n_classes(&self) -> usize {
        self.weights.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy_training_set() -> (Vec<Vec<f64>>, Vec<usize>) {
        // class 0 lives on the first axis, class 1 on the second
        let features = vec![
            vec![1.0, 0.0, 0.0],
            vec![0.9, 0.1, 0.0],
            vec![0.0, 1.0, 0.0],
            vec![0.1, 0.9, 0.0],
        ];
        let labels = vec![0, 0, 1, 1];
        (features, labels)
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let (features, labels) = toy_training_set();
        let model = SoftmaxClassifier::fit(&features, &labels, 2);
        let probs = model.predict_proba(&[0.5, 0.5, 0.0]);
        assert_eq!(probs.len(), 2);
        let total: f64 = probs.iter().sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_separable_classes_learned() {
        let (features, labels) = toy_training_set();
        let model = SoftmaxClassifier::fit(&features, &labels, 2);
        let probs_a = model.predict_proba(&[1.0, 0.0, 0.0]);
        let probs_b = model.predict_proba(&[0.0, 1.0, 0.0]);
        assert!(probs_a[0] > 0.8, "class 0 confidence: {}", probs_a[0]);
        assert!(probs_b[1] > 0.8, "class 1 confidence: {}", probs_b[1]);
    }

    #[test]
    fn test_fit_is_deterministic() {
        let (features, labels) = toy_training_set();
        let a = SoftmaxClassifier::fit(&features, &labels, 2);
        let b = SoftmaxClassifier::fit(&features, &labels, 2);
        assert_eq!(a.predict_proba(&[0.3, 0.7, 0.0]), b.predict_proba(&[0.3, 0.7, 0.0]));
    }

    #[test]
    fn test_uninformative_input_stays_uncertain() {
        let (features, labels) = toy_training_set();
        let model = SoftmaxClassifier::fit(&features, &labels, 2);
        // third axis never separates the classes
        let probs = model.predict_proba(&[0.0, 0.0, 1.0]);
        assert!(probs[0] < 0.7 && probs[1] < 0.7, "probs: {probs:?}");
    }
}
