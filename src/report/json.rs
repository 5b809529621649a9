use crate::analyze::{EngineerScore, TopPullRequest};
use crate::model::Result;
use chrono::{DateTime, FixedOffset};
use serde_json::{json, to_string_pretty, Value};
use std::fs;

/// Audit record written next to the scores: which dump they came from,
/// when, and how much went in and out.
#[derive(Debug, Clone)]
pub struct RunMetadata {
    pub raw_file: String,
    pub computed_at: DateTime<FixedOffset>,
    pub pr_count: usize,
    pub engineer_count: usize,
}

impl RunMetadata {
    pub fn new(
        raw_file: impl ToString,
        computed_at: DateTime<FixedOffset>,
        pr_count: usize,
        engineer_count: usize,
    ) -> Self {
        Self {
            raw_file: raw_file.to_string(),
            computed_at,
            pr_count,
            engineer_count,
        }
    }
}

pub fn write_scores(
    path: &str,
    scores: &[EngineerScore],
    metadata: &RunMetadata,
) -> Result<()> {
    let document = json!({
        "_metadata": {
            "raw_file": metadata.raw_file,
            "computed_at": metadata.computed_at.to_rfc3339(),
            "pr_count": metadata.pr_count,
            "engineer_count": metadata.engineer_count,
        },
        "scores": scores.iter().map(score_to_value).collect::<Vec<Value>>(),
    });
    fs::write(path, to_string_pretty(&document)?)?;
    Ok(())
}

fn score_to_value(score: &EngineerScore) -> Value {
    json!({
        "login": score.login,
        "final_impact": score.final_impact,
        "total_shipping": score.total_shipping,
        "total_reviews": score.total_reviews,
        "base_impact": score.base_impact,
        "core_touch_ratio": score.core_touch_ratio,
        "core_multiplier": score.core_multiplier,
        "active_weeks": score.active_weeks,
        "consistency_bonus": score.consistency_bonus,
        "pr_count": score.pr_count,
        "review_count": score.review_count,
        "top_prs": score.top_prs.iter().map(top_pr_to_value).collect::<Vec<Value>>(),
    })
}

fn top_pr_to_value(pr: &TopPullRequest) -> Value {
    json!({
        "number": pr.number,
        "title": pr.title,
        "url": pr.url,
        "pr_shipping": pr.shipping,
        "complexity": pr.complexity,
        "discussion": pr.discussion,
    })
}
