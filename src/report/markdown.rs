use crate::analyze::EngineerScore;
use crate::model::Result;
use markdown_builder::Markdown;
use markdown_table::{Heading, HeadingAlignment, MarkdownTable};
use std::fs;

const HIGHLIGHTED_ENGINEERS: usize = 10;

pub trait MarkdownReport {
    fn report_create(&self, path: &str) -> Result<()>;
}

impl MarkdownReport for Vec<EngineerScore> {
    fn report_create(&self, path: &str) -> Result<()> {
        let mut doc = Markdown::new();

        doc.header1("Engineer Impact");
        doc.add_ranking(self);

        for score in self.iter().take(HIGHLIGHTED_ENGINEERS) {
            if score.top_prs.is_empty() {
                continue;
            }
            doc.add_highlights(score);
        }

        fs::write(path, doc.render())?;
        Ok(())
    }
}

trait MarkdownExt {
    fn add_ranking(&mut self, scores: &[EngineerScore]);
    fn add_highlights(&mut self, score: &EngineerScore);
}

impl MarkdownExt for Markdown {
    fn add_ranking(&mut self, scores: &[EngineerScore]) {
        let header = [
            "#",
            "Engineer",
            "Impact",
            "Shipping",
            "Reviews",
            "Base",
            "Core ratio",
            "Weeks",
            "PRs",
            "Reviews done",
        ]
        .iter()
        .map(|h| Heading::new(h.to_string(), Some(HeadingAlignment::Center)))
        .collect::<Vec<_>>();

        let table = scores
            .iter()
            .enumerate()
            .map(|(index, score)| {
                vec![
                    format!("{}", index + 1),
                    format!("**{}**", score.login),
                    format!("{:.2}", score.final_impact),
                    format!("{:.2}", score.total_shipping),
                    format!("{:.2}", score.total_reviews),
                    format!("{:.2}", score.base_impact),
                    format!("{:.3}", score.core_touch_ratio),
                    format!("{}", score.active_weeks),
                    format!("{}", score.pr_count),
                    format!("{}", score.review_count),
                ]
            })
            .collect::<Vec<_>>();

        let mut md_table = MarkdownTable::new(table);
        md_table.with_headings(header);

        self.paragraph(md_table.as_markdown().unwrap());
    }

    fn add_highlights(&mut self, score: &EngineerScore) {
        self.header2(format!("Top contributions: {}", score.login));
        for pr in &score.top_prs {
            self.paragraph(format!(
                "[#{number}]({url}) {title}: shipping {shipping:.2} \
                 (complexity {complexity:.2}, discussion {discussion:.2})",
                number = pr.number,
                url = pr.url,
                title = pr.title,
                shipping = pr.shipping,
                complexity = pr.complexity,
                discussion = pr.discussion,
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::TopPullRequest;

    fn sample_scores() -> Vec<EngineerScore> {
        vec![EngineerScore {
            login: "alice".to_string(),
            final_impact: 12.34,
            total_shipping: 10.0,
            total_reviews: 5.0,
            base_impact: 8.25,
            core_touch_ratio: 0.5,
            core_multiplier: 1.15,
            active_weeks: 6,
            consistency_bonus: 1.1,
            pr_count: 3,
            review_count: 2,
            top_prs: vec![TopPullRequest {
                number: 7,
                title: "Add handler".to_string(),
                url: "https://example.com/pull/7".to_string(),
                shipping: 5.8,
                complexity: 5.22,
                discussion: 0.58,
            }],
        }]
    }

    #[test]
    fn report_renders_ranking_and_highlights() {
        let mut doc = Markdown::new();
        doc.header1("Engineer Impact");
        doc.add_ranking(&sample_scores());
        doc.add_highlights(&sample_scores()[0]);
        let rendered = doc.render();

        assert!(rendered.contains("Engineer Impact"));
        assert!(rendered.contains("**alice**"));
        assert!(rendered.contains("12.34"));
        assert!(rendered.contains("Top contributions: alice"));
        assert!(rendered.contains("[#7](https://example.com/pull/7)"));
    }
}
