use crate::model::Result;

/// Scoring parameters. Passed explicitly into the analysis so alternate
/// parameter sets (or the dashboard's noisy-file toggle) can re-run the
/// pipeline without touching globals.
#[derive(Debug, Clone)]
pub struct ScoreConfig {
    pub shipping_weight: f64,
    pub review_weight: f64,
    pub complexity_churn_coeff: f64,
    pub discussion_coeff: f64,
    pub review_comment_coeff: f64,
    pub core_multiplier_boost: f64,
    pub consistency_boost: f64,
    pub core_coverage_threshold: f64,
    pub min_weighted_touches: f64,
    pub consistency_weeks: u32,
    pub noisy_file_patterns: Vec<String>,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            shipping_weight: 0.65,
            review_weight: 0.35,
            complexity_churn_coeff: 0.6,
            discussion_coeff: 0.3,
            review_comment_coeff: 0.05,
            core_multiplier_boost: 0.3,
            consistency_boost: 0.2,
            core_coverage_threshold: 0.80,
            min_weighted_touches: 1.0,
            consistency_weeks: 12,
            noisy_file_patterns: [
                "pnpm-lock.yaml",
                "yarn.lock",
                "package-lock.json",
                "*.snap",
                "*.generated.*",
                "*.min.js",
                "*.min.css",
                "dist/*",
                "build/*",
                "*.map",
                "__generated__/*",
            ]
            .iter()
            .map(|p| p.to_string())
            .collect(),
        }
    }
}

// Validate
impl ScoreConfig {
    /// Checked once at startup. Scoring itself never validates.
    pub fn validate(&self) -> Result<()> {
        let weights = [
            ("shipping_weight", self.shipping_weight),
            ("review_weight", self.review_weight),
            ("complexity_churn_coeff", self.complexity_churn_coeff),
            ("discussion_coeff", self.discussion_coeff),
            ("review_comment_coeff", self.review_comment_coeff),
            ("core_multiplier_boost", self.core_multiplier_boost),
            ("consistency_boost", self.consistency_boost),
            ("min_weighted_touches", self.min_weighted_touches),
        ];
        for (name, value) in weights {
            if value < 0.0 {
                return Err(format!("Negative '{}': {}", name, value).into());
            }
        }
        if self.core_coverage_threshold <= 0.0 || self.core_coverage_threshold > 1.0 {
            return Err(format!(
                "'core_coverage_threshold' out of (0, 1]: {}",
                self.core_coverage_threshold
            )
            .into());
        }
        if self.consistency_weeks == 0 {
            return Err("'consistency_weeks' must be at least 1".into());
        }
        Ok(())
    }
}
