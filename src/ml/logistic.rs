//! L2-regularized logistic regression.
//!
//! Minimizes `0.5 * ||w||² + C * Σ logloss(y_i, w·x_i + b)` by full-batch
//! gradient descent with Armijo backtracking, starting from zero weights.
//! The intercept is not regularized. The positive class is
//! [`Label::Real`], so `sigmoid(w·x + b)` is the probability of real.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{PeltaError, Result};
use crate::ml::config::LogisticConfig;
use crate::ml::types::Label;

const ARMIJO_FACTOR: f64 = 1e-4;
const MIN_STEP: f64 = 1e-12;

/// Binary logistic regression classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    config: LogisticConfig,
    weights: Vec<f64>,
    intercept: f64,
    /// Iterations run by the last fit.
    n_iter: usize,
    converged: bool,
    fitted: bool,
}

impl LogisticRegression {
    /// Create an unfitted classifier.
    pub fn new(config: LogisticConfig) -> Self {
        Self {
            config,
            weights: Vec::new(),
            intercept: 0.0,
            n_iter: 0,
            converged: false,
            fitted: false,
        }
    }

    /// Fit the model. Every feature vector must have the same dimension.
    pub fn fit(&mut self, features: &[Vec<f64>], labels: &[Label]) -> Result<()> {
        if features.is_empty() {
            return Err(PeltaError::data("Cannot fit a classifier without examples"));
        }
        if features.len() != labels.len() {
            return Err(PeltaError::data(format!(
                "Got {} feature vectors but {} labels",
                features.len(),
                labels.len()
            )));
        }
        let dim = features[0].len();
        if features.iter().any(|x| x.len() != dim) {
            return Err(PeltaError::data("Feature vectors have inconsistent dimensions"));
        }

        let targets: Vec<f64> = labels.iter().map(|&l| f64::from(l.as_binary())).collect();
        let c = self.config.c;

        let mut weights = vec![0.0; dim];
        let mut intercept = 0.0;
        let mut loss = objective(features, &targets, &weights, intercept, c);
        let mut step = 1.0;
        let mut converged = false;
        let mut iterations = 0;

        while iterations < self.config.max_iter {
            let (grad_w, grad_b) = gradient(features, &targets, &weights, intercept, c);
            let grad_inf = grad_w
                .iter()
                .fold(grad_b.abs(), |acc, g| acc.max(g.abs()));
            if grad_inf <= self.config.tolerance {
                converged = true;
                break;
            }
            iterations += 1;

            let grad_sq = grad_w.iter().map(|g| g * g).sum::<f64>() + grad_b * grad_b;
            let mut accepted = false;
            while step >= MIN_STEP {
                let candidate_w: Vec<f64> = weights
                    .iter()
                    .zip(&grad_w)
                    .map(|(w, g)| w - step * g)
                    .collect();
                let candidate_b = intercept - step * grad_b;
                let candidate_loss = objective(features, &targets, &candidate_w, candidate_b, c);

                if candidate_loss <= loss - ARMIJO_FACTOR * step * grad_sq {
                    weights = candidate_w;
                    intercept = candidate_b;
                    loss = candidate_loss;
                    accepted = true;
                    break;
                }
                step *= 0.5;
            }

            if !accepted {
                // Line search stalled; the iterate is as good as float precision allows.
                converged = true;
                break;
            }
            step = (step * 2.0).min(1e3);
        }

        if converged {
            debug!("Logistic regression converged after {iterations} iterations, loss {loss:.6}");
        } else {
            warn!(
                "Logistic regression did not converge within {} iterations (loss {loss:.6})",
                self.config.max_iter
            );
        }

        self.weights = weights;
        self.intercept = intercept;
        self.n_iter = iterations;
        self.converged = converged;
        self.fitted = true;

        Ok(())
    }

    /// Raw decision value `w·x + b`.
    pub fn decision_function(&self, features: &[f64]) -> Result<f64> {
        if !self.fitted {
            return Err(PeltaError::not_fitted(
                "LogisticRegression used before fit",
            ));
        }
        if features.len() != self.weights.len() {
            return Err(PeltaError::data(format!(
                "Expected {} features, got {}",
                self.weights.len(),
                features.len()
            )));
        }
        Ok(dot(&self.weights, features) + self.intercept)
    }

    /// Class probabilities as `(probability_fake, probability_real)`.
    pub fn predict_proba(&self, features: &[f64]) -> Result<(f64, f64)> {
        let probability_real = sigmoid(self.decision_function(features)?);
        Ok((1.0 - probability_real, probability_real))
    }

    /// Most likely label; ties go to [`Label::Fake`].
    pub fn predict(&self, features: &[f64]) -> Result<Label> {
        let (probability_fake, probability_real) = self.predict_proba(features)?;
        Ok(if probability_fake >= probability_real {
            Label::Fake
        } else {
            Label::Real
        })
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    pub fn n_iter(&self) -> usize {
        self.n_iter
    }

    pub fn converged(&self) -> bool {
        self.converged
    }

    pub fn is_fitted(&self) -> bool {
        self.fitted
    }

    pub fn config(&self) -> &LogisticConfig {
        &self.config
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

/// `ln(1 + e^z)` without overflow.
fn softplus(z: f64) -> f64 {
    if z > 0.0 {
        z + (-z).exp().ln_1p()
    } else {
        z.exp().ln_1p()
    }
}

fn objective(features: &[Vec<f64>], targets: &[f64], weights: &[f64], intercept: f64, c: f64) -> f64 {
    let penalty = 0.5 * dot(weights, weights);
    let data_loss: f64 = features
        .iter()
        .zip(targets)
        .map(|(x, &y)| {
            let z = dot(weights, x) + intercept;
            softplus(z) - y * z
        })
        .sum();
    penalty + c * data_loss
}

fn gradient(
    features: &[Vec<f64>],
    targets: &[f64],
    weights: &[f64],
    intercept: f64,
    c: f64,
) -> (Vec<f64>, f64) {
    let mut grad_w = weights.to_vec();
    let mut grad_b = 0.0;
    for (x, &y) in features.iter().zip(targets) {
        let residual = c * (sigmoid(dot(weights, x) + intercept) - y);
        grad_b += residual;
        for (g, xi) in grad_w.iter_mut().zip(x) {
            *g += residual * xi;
        }
    }
    (grad_w, grad_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn separable() -> (Vec<Vec<f64>>, Vec<Label>) {
        let features = vec![
            vec![1.0, 0.0],
            vec![0.9, 0.1],
            vec![0.8, 0.0],
            vec![0.0, 1.0],
            vec![0.1, 0.9],
            vec![0.0, 0.8],
        ];
        let labels = vec![
            Label::Fake,
            Label::Fake,
            Label::Fake,
            Label::Real,
            Label::Real,
            Label::Real,
        ];
        (features, labels)
    }

    #[test]
    fn test_predict_before_fit() {
        let model = LogisticRegression::new(LogisticConfig::default());
        assert!(matches!(
            model.predict_proba(&[1.0, 0.0]),
            Err(PeltaError::NotFitted(_))
        ));
    }

    #[test]
    fn test_fit_separable_data() {
        let (features, labels) = separable();
        let mut model = LogisticRegression::new(LogisticConfig::default());
        model.fit(&features, &labels).unwrap();

        assert!(model.is_fitted());
        assert!(model.converged());
        for (x, label) in features.iter().zip(&labels) {
            assert_eq!(model.predict(x).unwrap(), *label);
        }

        let (p_fake, p_real) = model.predict_proba(&[1.0, 0.0]).unwrap();
        assert!(p_fake > 0.5);
        assert!((p_fake + p_real - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_regularization_shrinks_weights() {
        let (features, labels) = separable();
        let mut strong = LogisticRegression::new(LogisticConfig {
            c: 0.01,
            ..LogisticConfig::default()
        });
        let mut weak = LogisticRegression::new(LogisticConfig::default());
        strong.fit(&features, &labels).unwrap();
        weak.fit(&features, &labels).unwrap();

        let norm = |m: &LogisticRegression| dot(m.weights(), m.weights());
        assert!(norm(&strong) < norm(&weak));
    }

    #[test]
    fn test_fit_is_deterministic() {
        let (features, labels) = separable();
        let mut a = LogisticRegression::new(LogisticConfig::default());
        let mut b = LogisticRegression::new(LogisticConfig::default());
        a.fit(&features, &labels).unwrap();
        b.fit(&features, &labels).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_dimensional_features() {
        let features = vec![vec![], vec![], vec![]];
        let labels = vec![Label::Fake, Label::Real, Label::Real];
        let mut model = LogisticRegression::new(LogisticConfig::default());
        model.fit(&features, &labels).unwrap();

        // Only the intercept is learned, leaning towards the majority class.
        let (p_fake, p_real) = model.predict_proba(&[]).unwrap();
        assert!(p_real > p_fake);
    }

    #[test]
    fn test_invalid_inputs() {
        let mut model = LogisticRegression::new(LogisticConfig::default());
        assert!(matches!(model.fit(&[], &[]), Err(PeltaError::Data(_))));
        assert!(model.fit(&[vec![1.0]], &[]).is_err());
        assert!(model
            .fit(&[vec![1.0], vec![1.0, 2.0]], &[Label::Fake, Label::Real])
            .is_err());

        let (features, labels) = separable();
        model.fit(&features, &labels).unwrap();
        assert!(matches!(model.predict_proba(&[1.0]), Err(PeltaError::Data(_))));
    }

    #[test]
    fn test_numerically_stable_helpers() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-15);
        assert!(sigmoid(-1000.0) >= 0.0);
        assert!(sigmoid(1000.0) <= 1.0);
        assert!(softplus(1000.0).is_finite());
        assert!((softplus(0.0) - 2f64.ln()).abs() < 1e-15);
    }
}
