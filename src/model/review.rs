use chrono::{DateTime, FixedOffset};
use indexmap::IndexMap;
use serde_json::Value;

#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq)]
pub enum ReviewState {
    Approved,
    ChangesRequested,
    Commented,
    Dismissed,
    Unknown,
}

impl ReviewState {
    pub fn parse(state: &str) -> Self {
        match state {
            "APPROVED" => Self::Approved,
            "CHANGES_REQUESTED" => Self::ChangesRequested,
            "COMMENTED" => Self::Commented,
            "DISMISSED" => Self::Dismissed,
            _ => Self::Unknown,
        }
    }
}

/// One reviewer's logical review on a pull request. Raw review events are
/// collapsed per reviewer before this type leaves the parsing boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub author_login: String,
    pub state: ReviewState,
    pub submitted_at: DateTime<FixedOffset>,
    pub comment_count: u64,
}

// Create
impl Review {
    pub fn new(
        author_login: impl ToString,
        state: ReviewState,
        submitted_at: DateTime<FixedOffset>,
        comment_count: u64,
    ) -> Self {
        Self {
            author_login: author_login.to_string(),
            state,
            submitted_at,
            comment_count,
        }
    }
}

// Parser
impl Review {
    /// Missing author falls back to "ghost", missing comment counts to 0,
    /// missing timestamps to the processing time. Never fails.
    pub fn from_raw(raw: &Value, now: &DateTime<FixedOffset>) -> Self {
        let submitted_at = raw["submittedAt"]
            .as_str()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .unwrap_or(*now);
        Self::new(
            raw["author"]["login"].as_str().unwrap_or("ghost"),
            ReviewState::parse(raw["state"].as_str().unwrap_or_default()),
            submitted_at,
            raw["comments"]["totalCount"].as_u64().unwrap_or(0),
        )
    }
}

// Dedup
impl Review {
    /// Collapse multiple events by the same author into one review: the
    /// latest event gives the state and timestamp (only the final verdict
    /// counts), comment counts are summed across all of that author's
    /// events (all feedback volume counts).
    pub fn dedupe(reviews: Vec<Review>) -> Vec<Review> {
        let mut by_author: IndexMap<String, Vec<Review>> = IndexMap::new();
        for review in reviews {
            by_author
                .entry(review.author_login.clone())
                .or_default()
                .push(review);
        }

        let mut deduped = Vec::with_capacity(by_author.len());
        for (_, mut events) in by_author {
            events.sort_by_key(|r| r.submitted_at);
            let total_comments = events.iter().map(|r| r.comment_count).sum();
            let Some(mut latest) = events.pop() else {
                continue;
            };
            latest.comment_count = total_comments;
            deduped.push(latest);
        }
        deduped
    }
}
