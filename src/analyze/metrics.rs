use crate::model::{PullRequest, ScoreConfig};

// Pure per-PR metric functions. All logarithms are ln(1 + x) so
// zero-valued inputs stay finite and the long right tail of PR size and
// comment distributions is compressed.

/// `ln1p(changed_files_count) + churn_coeff * ln1p(additions + deletions)`.
///
/// Always uses PR-level totals. The file list may be truncated for large
/// PRs, so its length or summed churn would systematically undercount.
pub fn complexity(pr: &PullRequest, config: &ScoreConfig) -> f64 {
    (pr.changed_files_count as f64).ln_1p()
        + config.complexity_churn_coeff * ((pr.additions + pr.deletions) as f64).ln_1p()
}

/// `discussion_coeff * ln1p(comments_total + review_threads_total)`.
pub fn discussion(pr: &PullRequest, config: &ScoreConfig) -> f64 {
    config.discussion_coeff * ((pr.comments_total + pr.review_threads_total) as f64).ln_1p()
}

/// Shipping score of one PR.
pub fn shipping(pr: &PullRequest, config: &ScoreConfig) -> f64 {
    complexity(pr, config) + discussion(pr, config)
}

/// `complexity(pr) * (1 + comment_coeff * ln1p(reviewer_comment_count))`.
///
/// Reviewing a more complex PR always scores more; more comments add an
/// uncapped but diminishing multiplicative bonus.
pub fn review_points(pr: &PullRequest, reviewer_comment_count: u64, config: &ScoreConfig) -> f64 {
    complexity(pr, config)
        * (1.0 + config.review_comment_coeff * (reviewer_comment_count as f64).ln_1p())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FileChange;
    use chrono::Utc;

    fn make_pr(
        changed_files_count: u64,
        additions: u64,
        deletions: u64,
        comments: u64,
        review_threads: u64,
        files: Vec<FileChange>,
    ) -> PullRequest {
        let now = Utc::now().fixed_offset();
        PullRequest {
            id: "n1".to_string(),
            number: 1,
            title: "PR #1".to_string(),
            url: String::new(),
            author_login: "alice".to_string(),
            merged_at: now,
            created_at: now,
            changed_files_count,
            additions,
            deletions,
            comments_total: comments,
            review_threads_total: review_threads,
            reviews: vec![],
            files,
        }
    }

    #[test]
    fn shipping_is_complexity_plus_discussion() {
        let config = ScoreConfig::default();
        let pr = make_pr(1, 100, 50, 5, 3, vec![]);
        let expected = (1.0f64).ln_1p() + 0.6 * (150.0f64).ln_1p();
        assert!((complexity(&pr, &config) - expected).abs() < 1e-9);
        assert!((discussion(&pr, &config) - 0.3 * (8.0f64).ln_1p()).abs() < 1e-9);
        assert_eq!(
            shipping(&pr, &config),
            complexity(&pr, &config) + discussion(&pr, &config)
        );
    }

    #[test]
    fn complexity_ignores_the_file_list() {
        let config = ScoreConfig::default();
        let truncated = make_pr(50, 5000, 2000, 0, 0, vec![FileChange::new("a.py", 10, 5)]);
        let complete = make_pr(
            50,
            5000,
            2000,
            0,
            0,
            vec![
                FileChange::new("a.py", 3000, 1000),
                FileChange::new("b.py", 2000, 1000),
            ],
        );
        assert_eq!(complexity(&truncated, &config), complexity(&complete, &config));

        let expected = (50.0f64).ln_1p() + 0.6 * (7000.0f64).ln_1p();
        assert!((complexity(&truncated, &config) - expected).abs() < 1e-9);
    }

    #[test]
    fn review_points_without_comments_equals_complexity() {
        let config = ScoreConfig::default();
        let pr = make_pr(2, 50, 50, 0, 0, vec![]);
        assert!((review_points(&pr, 0, &config) - complexity(&pr, &config)).abs() < 1e-9);
    }

    #[test]
    fn review_points_grow_with_comments() {
        let config = ScoreConfig::default();
        let pr = make_pr(2, 50, 50, 0, 0, vec![]);
        let expected = complexity(&pr, &config) * (1.0 + 0.05 * (10.0f64).ln_1p());
        assert!((review_points(&pr, 10, &config) - expected).abs() < 1e-9);
        assert!(review_points(&pr, 10, &config) > review_points(&pr, 1, &config));
    }

    #[test]
    fn zero_valued_inputs_stay_finite() {
        let config = ScoreConfig::default();
        let pr = make_pr(0, 0, 0, 0, 0, vec![]);
        assert_eq!(complexity(&pr, &config), 0.0);
        assert_eq!(discussion(&pr, &config), 0.0);
        assert_eq!(shipping(&pr, &config), 0.0);
    }
}
