use crate::model::{PullRequest, ScoreConfig};
use chrono::{DateTime, FixedOffset};

/// Snapshot handed to the scoring run: the normalized PRs, the parameter
/// set, and the processing time the consistency window is measured from.
#[derive(Debug, Clone)]
pub struct ImpactAnalysis {
    pub prs: Vec<PullRequest>,
    pub config: ScoreConfig,
    pub now: DateTime<FixedOffset>,
}

impl ImpactAnalysis {
    pub fn new(prs: Vec<PullRequest>, config: ScoreConfig, now: DateTime<FixedOffset>) -> Self {
        Self { prs, config, now }
    }
}

/// One of an engineer's highlighted contributions.
#[derive(Debug, Clone, PartialEq)]
pub struct TopPullRequest {
    pub number: u64,
    pub title: String,
    pub url: String,
    pub shipping: f64,
    pub complexity: f64,
    pub discussion: f64,
}

/// Final computed impact for one engineer. Built once per scoring run,
/// already rounded for presentation (2 decimals for scores, 3 for ratios
/// and multipliers).
#[derive(Debug, Clone, PartialEq)]
pub struct EngineerScore {
    pub login: String,
    pub final_impact: f64,
    pub total_shipping: f64,
    pub total_reviews: f64,
    pub base_impact: f64,
    pub core_touch_ratio: f64,
    pub core_multiplier: f64,
    pub active_weeks: usize,
    pub consistency_bonus: f64,
    pub pr_count: usize,
    pub review_count: usize,
    pub top_prs: Vec<TopPullRequest>,
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub(crate) fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_helpers() {
        assert_eq!(round2(1.005_1), 1.01);
        assert_eq!(round2(2.0), 2.0);
        assert_eq!(round3(0.123_4), 0.123);
        assert_eq!(round3(0.123_6), 0.124);
    }
}
