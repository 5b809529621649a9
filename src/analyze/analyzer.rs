use crate::analyze::core_dirs::{compute_core_dirs, core_touch_ratio};
use crate::analyze::metrics::{complexity, discussion, review_points, shipping};
use crate::analyze::model::{round2, round3, EngineerScore, ImpactAnalysis, TopPullRequest};
use crate::model::{PullRequest, Review};
use chrono::{Datelike, Duration};
use indexmap::{IndexMap, IndexSet};
use itertools::Itertools;

pub trait Analyzer {
    fn score_engineers(&self) -> Vec<EngineerScore>;
}

impl Analyzer for ImpactAnalysis {
    /// One-shot pure transformation of the PR snapshot into ranked
    /// scores. Self-reviews never count; engineers with no positive
    /// shipping are excluded entirely, reviews or not.
    fn score_engineers(&self) -> Vec<EngineerScore> {
        let mut prs_by_author: IndexMap<&str, Vec<&PullRequest>> = IndexMap::new();
        let mut reviews_by_reviewer: IndexMap<&str, Vec<(&PullRequest, &Review)>> =
            IndexMap::new();

        for pr in &self.prs {
            prs_by_author
                .entry(pr.author_login.as_str())
                .or_default()
                .push(pr);
            for review in &pr.reviews {
                if review.author_login != pr.author_login {
                    reviews_by_reviewer
                        .entry(review.author_login.as_str())
                        .or_default()
                        .push((pr, review));
                }
            }
        }

        let core_dirs = compute_core_dirs(&self.prs, &self.config);

        let mut logins: IndexSet<&str> = prs_by_author.keys().copied().collect();
        logins.extend(reviews_by_reviewer.keys().copied());

        let mut scores = Vec::new();
        for login in logins {
            let authored = prs_by_author.get(login).map(Vec::as_slice).unwrap_or(&[]);
            let reviewed = reviews_by_reviewer
                .get(login)
                .map(Vec::as_slice)
                .unwrap_or(&[]);

            let total_shipping: f64 = authored.iter().map(|pr| shipping(pr, &self.config)).sum();
            if total_shipping <= 0.0 {
                continue;
            }
            let total_reviews: f64 = reviewed
                .iter()
                .map(|(pr, review)| review_points(pr, review.comment_count, &self.config))
                .sum();
            let base_impact = self.config.shipping_weight * total_shipping
                + self.config.review_weight * total_reviews;

            let ratio = core_touch_ratio(authored, &core_dirs, &self.config);
            let core_multiplier = 1.0 + self.config.core_multiplier_boost * ratio;

            let active_weeks = self.active_weeks(authored, reviewed);
            let consistency_bonus = 1.0
                + self.config.consistency_boost
                    * (active_weeks as f64 / self.config.consistency_weeks as f64);

            let final_impact = base_impact * core_multiplier * consistency_bonus;

            let top_prs = authored
                .iter()
                .sorted_by(|a, b| {
                    shipping(b, &self.config).total_cmp(&shipping(a, &self.config))
                })
                .take(3)
                .map(|pr| TopPullRequest {
                    number: pr.number,
                    title: pr.title.clone(),
                    url: pr.url.clone(),
                    shipping: round2(shipping(pr, &self.config)),
                    complexity: round2(complexity(pr, &self.config)),
                    discussion: round2(discussion(pr, &self.config)),
                })
                .collect();

            scores.push(EngineerScore {
                login: login.to_string(),
                final_impact: round2(final_impact),
                total_shipping: round2(total_shipping),
                total_reviews: round2(total_reviews),
                base_impact: round2(base_impact),
                core_touch_ratio: round3(ratio),
                core_multiplier: round3(core_multiplier),
                active_weeks,
                consistency_bonus: round3(consistency_bonus),
                pr_count: authored.len(),
                review_count: reviewed.len(),
                top_prs,
            });
        }

        scores.sort_by(|a, b| {
            b.final_impact
                .total_cmp(&a.final_impact)
                .then_with(|| a.login.cmp(&b.login))
        });
        scores
    }
}

trait ImpactAnalysisExtension {
    fn active_weeks(
        &self,
        authored: &[&PullRequest],
        reviewed: &[(&PullRequest, &Review)],
    ) -> usize;
}

impl ImpactAnalysisExtension for ImpactAnalysis {
    /// Distinct ISO weeks (year-aware, so year boundaries never double
    /// count) with a merged PR or a submitted non-self review, within the
    /// trailing consistency window measured from the processing time.
    fn active_weeks(
        &self,
        authored: &[&PullRequest],
        reviewed: &[(&PullRequest, &Review)],
    ) -> usize {
        let cutoff = self.now - Duration::weeks(self.config.consistency_weeks as i64);
        let mut weeks: IndexSet<(i32, u32)> = IndexSet::new();

        for pr in authored {
            if pr.merged_at >= cutoff {
                let week = pr.merged_at.iso_week();
                weeks.insert((week.year(), week.week()));
            }
        }
        for (_, review) in reviewed {
            if review.submitted_at >= cutoff {
                let week = review.submitted_at.iso_week();
                weeks.insert((week.year(), week.week()));
            }
        }
        // An N-week window can straddle N+1 partial ISO weeks; the cap
        // keeps the consistency bonus inside its documented range.
        weeks.len().min(self.config.consistency_weeks as usize)
    }
}
