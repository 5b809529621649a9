use crate::model::{PullRequest, ScoreConfig};
use indexmap::{IndexMap, IndexSet};
use itertools::Itertools;

/// Per-directory churn of one PR, scaled so it sums to the PR-level total
/// when the file list covers less churn than the PR reports (truncated
/// lists). PRs with no usable file data yield an empty map and are
/// skipped by the callers, not treated as zero.
pub fn scaled_dir_churn(pr: &PullRequest) -> IndexMap<String, f64> {
    if pr.files.is_empty() {
        return IndexMap::new();
    }

    let mut raw_churn: IndexMap<String, u64> = IndexMap::new();
    for file in &pr.files {
        *raw_churn.entry(file.directory().to_string()).or_insert(0) += file.churn();
    }

    let file_level_total: u64 = raw_churn.values().sum();
    if file_level_total == 0 {
        return IndexMap::new();
    }

    let pr_level_total = pr.additions + pr.deletions;
    let scale = if pr_level_total > file_level_total {
        pr_level_total as f64 / file_level_total as f64
    } else {
        1.0
    };

    raw_churn
        .into_iter()
        .map(|(dir, churn)| (dir, churn as f64 * scale))
        .collect()
}

/// Greedy coverage selection of the top-level directories that make up
/// the "core" of the codebase: directories are taken in descending score
/// order until they cover `core_coverage_threshold` of the total score.
/// `dir_score = sum(ln1p(scaled churn per PR))`. The sort is stable, so
/// equal scores keep discovery order and the result is deterministic on
/// identical input.
pub fn compute_core_dirs(prs: &[PullRequest], config: &ScoreConfig) -> IndexSet<String> {
    let mut dir_score: IndexMap<String, f64> = IndexMap::new();
    for pr in prs {
        for (dir, churn) in scaled_dir_churn(pr) {
            *dir_score.entry(dir).or_insert(0.0) += churn.ln_1p();
        }
    }

    let total: f64 = dir_score.values().sum();
    if total <= 0.0 {
        return IndexSet::new();
    }

    let mut core = IndexSet::new();
    let mut cumulative = 0.0;
    for (dir, score) in dir_score
        .into_iter()
        .sorted_by(|(_, a), (_, b)| b.total_cmp(a))
    {
        cumulative += score;
        core.insert(dir);
        if cumulative / total >= config.core_coverage_threshold {
            break;
        }
    }
    core
}

/// Share of an engineer's weighted directory touches that land in core
/// directories. Forced to 0.0 when the total weighted touches fall below
/// `min_weighted_touches`: a single tiny PR must not produce an extreme
/// ratio from a near-empty denominator.
pub fn core_touch_ratio(
    authored: &[&PullRequest],
    core_dirs: &IndexSet<String>,
    config: &ScoreConfig,
) -> f64 {
    let mut total_weight = 0.0;
    let mut core_weight = 0.0;

    for pr in authored {
        for (dir, churn) in scaled_dir_churn(pr) {
            let weight = churn.ln_1p();
            total_weight += weight;
            if core_dirs.contains(&dir) {
                core_weight += weight;
            }
        }
    }

    if total_weight < config.min_weighted_touches {
        return 0.0;
    }
    core_weight / total_weight
}
