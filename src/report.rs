//! Human and JSON summaries of a finished training run.

use crate::backend::Backend;
use crate::dataset::TrueParams;
use crate::trainer::LinearRegressionGD;
use serde::Serialize;
use std::fmt;

const RULE_WIDTH: usize = 70;

/// Scalar results of a run, with errors against the generating line when it
/// is known (synthetic data).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TrainingReport {
    pub n_samples: usize,
    pub noise_std: Option<f64>,
    pub learning_rate: f64,
    /// Length of the cost history.
    pub iterations: usize,
    pub final_cost: Option<f64>,
    pub theta_0: f64,
    pub theta_1: f64,
    pub true_intercept: Option<f64>,
    pub true_slope: Option<f64>,
    pub intercept_error: Option<f64>,
    pub slope_error: Option<f64>,
    /// Text returned by the explanation service, if one was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl TrainingReport {
    pub fn new<B: Backend>(
        model: &LinearRegressionGD<B>,
        n_samples: usize,
        truth: Option<&TrueParams>,
    ) -> Self {
        let theta_0 = model.theta_0();
        let theta_1 = model.theta_1();
        Self {
            n_samples,
            noise_std: truth.map(|t| t.noise_std),
            learning_rate: model.learning_rate(),
            iterations: model.cost_history().len(),
            final_cost: model.cost_history().last().copied(),
            theta_0,
            theta_1,
            true_intercept: truth.map(|t| t.intercept),
            true_slope: truth.map(|t| t.slope),
            intercept_error: truth.map(|t| (theta_0 - t.intercept).abs()),
            slope_error: truth.map(|t| (theta_1 - t.slope).abs()),
            explanation: None,
        }
    }

    pub fn with_explanation(mut self, text: impl Into<String>) -> Self {
        self.explanation = Some(text.into());
        self
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for TrainingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(f, "Results:")?;
        writeln!(
            f,
            "  Learned parameters: θ₀ = {:.4}, θ₁ = {:.4}",
            self.theta_0, self.theta_1
        )?;
        if let (Some(b), Some(w)) = (self.true_intercept, self.true_slope) {
            writeln!(f, "  True parameters:    θ₀ = {:.4}, θ₁ = {:.4}", b, w)?;
        }
        if let (Some(e0), Some(e1)) = (self.intercept_error, self.slope_error) {
            writeln!(f, "  Error in θ₀: {:.4}", e0)?;
            writeln!(f, "  Error in θ₁: {:.4}", e1)?;
        }
        if let Some(text) = &self.explanation {
            writeln!(f)?;
            writeln!(f, "Explanation:")?;
            writeln!(f, "{}", text.trim_end())?;
        }

        writeln!(f)?;
        writeln!(f, "{rule}")?;
        writeln!(f, "SUMMARY")?;
        writeln!(f, "{rule}")?;
        match self.noise_std {
            Some(sigma) => writeln!(
                f,
                "* Dataset: {} samples with Gaussian noise (σ = {})",
                self.n_samples, sigma
            )?,
            None => writeln!(f, "* Dataset: {} samples", self.n_samples)?,
        }
        writeln!(
            f,
            "* Algorithm: Gradient descent with α = {}, {} iterations",
            self.learning_rate, self.iterations
        )?;
        match self.final_cost {
            Some(cost) => writeln!(f, "* Convergence: Final cost = {:.4}", cost)?,
            None => writeln!(f, "* Convergence: not trained")?,
        }
        if self.explanation.is_some() {
            writeln!(f, "* Algorithm explained by the remote service")?;
        }
        write!(f, "{rule}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trained() -> LinearRegressionGD {
        let mut model = LinearRegressionGD::new(0.1, 1).unwrap();
        model.fit(&[1.0, 2.0], &[3.0, 5.0]).unwrap();
        model
    }

    #[test]
    fn test_report_with_truth() {
        let truth = TrueParams {
            slope: 1.0,
            intercept: 0.5,
            noise_std: 2.0,
        };
        let report = TrainingReport::new(&trained(), 2, Some(&truth));
        assert_eq!(report.iterations, 1);
        assert_eq!(report.final_cost, Some(8.5));
        assert!((report.intercept_error.unwrap() - 0.1).abs() < 1e-12);
        assert!((report.slope_error.unwrap() - 0.35).abs() < 1e-12);

        let text = report.to_string();
        assert!(text.contains("Learned parameters: θ₀ = 0.4000, θ₁ = 0.6500"));
        assert!(text.contains("True parameters:    θ₀ = 0.5000, θ₁ = 1.0000"));
        assert!(text.contains("Gaussian noise (σ = 2)"));
        assert!(text.contains("α = 0.1, 1 iterations"));
        assert!(text.contains("Final cost = 8.5000"));
    }

    #[test]
    fn test_report_without_truth() {
        let report = TrainingReport::new(&trained(), 2, None);
        assert!(report.true_slope.is_none());
        let text = report.to_string();
        assert!(!text.contains("True parameters"));
        assert!(text.contains("* Dataset: 2 samples\n"));
    }

    #[test]
    fn test_report_before_fit() {
        let report = TrainingReport::new(&LinearRegressionGD::default(), 0, None);
        assert_eq!(report.final_cost, None);
        assert!(report.to_string().contains("not trained"));
    }

    #[test]
    fn test_explanation_precedes_summary() {
        let report = TrainingReport::new(&trained(), 2, None)
            .with_explanation("Batch gradient descent.\n");
        let text = report.to_string();
        let explanation = text.find("Explanation:\nBatch gradient descent.\n").unwrap();
        let summary = text.find("SUMMARY").unwrap();
        assert!(explanation < summary);
        assert!(text.contains("* Algorithm explained by the remote service"));

        let plain = TrainingReport::new(&trained(), 2, None).to_string();
        assert!(!plain.contains("Explanation"));
        assert!(!plain.contains("explained"));
    }

    #[test]
    fn test_to_json() {
        let report = TrainingReport::new(&trained(), 2, None);
        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(value["iterations"], 1);
        assert_eq!(value["final_cost"], 8.5);
        assert!(value["true_slope"].is_null());
        assert!(value.get("explanation").is_none());

        let explained = report.with_explanation("why").to_json().unwrap();
        assert!(explained.contains("\"explanation\": \"why\""));
    }
}
