use crate::model::{FileChange, NoisyPathFilter, Result, Review};
use chrono::{DateTime, FixedOffset};
use serde_json::{from_str, Value};
use std::fs;

/// One merged pull request in canonical form. PR-level totals are
/// authoritative for complexity; the file list may be truncated by the
/// upstream API and is only trusted for directory attribution.
#[derive(Debug, Clone, PartialEq)]
pub struct PullRequest {
    pub id: String,
    pub number: u64,
    pub title: String,
    pub url: String,
    pub author_login: String,
    pub merged_at: DateTime<FixedOffset>,
    pub created_at: DateTime<FixedOffset>,
    pub changed_files_count: u64,
    pub additions: u64,
    pub deletions: u64,
    pub comments_total: u64,
    pub review_threads_total: u64,
    pub reviews: Vec<Review>,
    pub files: Vec<FileChange>,
}

// Create
impl PullRequest {
    /// Read a raw dump (JSON array of PR records) and normalize it.
    pub fn from_dump(
        path: &str,
        filter: Option<&NoisyPathFilter>,
        now: &DateTime<FixedOffset>,
    ) -> Result<Vec<Self>> {
        let json_str = fs::read_to_string(path)?;
        Self::parse(&json_str, filter, now)
    }
}

// Parser
impl PullRequest {
    pub fn parse(
        json_str: &str,
        filter: Option<&NoisyPathFilter>,
        now: &DateTime<FixedOffset>,
    ) -> Result<Vec<Self>> {
        let records: Vec<Value> = from_str(json_str)?;
        Ok(records
            .iter()
            .map(|raw| Self::from_raw(raw, filter, now))
            .collect())
    }

    /// Normalize one raw record. Partial data never fails: missing author
    /// becomes "ghost", missing numerics 0, missing timestamps `now`.
    /// Reviews are deduplicated per reviewer and noisy file entries are
    /// dropped here, before any aggregation sees them.
    pub fn from_raw(
        raw: &Value,
        filter: Option<&NoisyPathFilter>,
        now: &DateTime<FixedOffset>,
    ) -> Self {
        let raw_reviews = raw["reviews"]["nodes"]
            .as_array()
            .map(|nodes| nodes.iter().map(|r| Review::from_raw(r, now)).collect())
            .unwrap_or_default();

        let files = raw["_files"]
            .as_array()
            .map(|entries| {
                entries
                    .iter()
                    .map(FileChange::from_raw)
                    .filter(|f| filter.map_or(true, |noise| !noise.is_noisy(&f.path)))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            id: raw["id"].as_str().unwrap_or_default().to_string(),
            number: raw["number"].as_u64().unwrap_or(0),
            title: raw["title"].as_str().unwrap_or_default().to_string(),
            url: raw["url"].as_str().unwrap_or_default().to_string(),
            author_login: raw["author"]["login"].as_str().unwrap_or("ghost").to_string(),
            merged_at: parse_datetime(&raw["mergedAt"], now),
            created_at: parse_datetime(&raw["createdAt"], now),
            changed_files_count: raw["changedFiles"].as_u64().unwrap_or(0),
            additions: raw["additions"].as_u64().unwrap_or(0),
            deletions: raw["deletions"].as_u64().unwrap_or(0),
            comments_total: raw["comments"]["totalCount"].as_u64().unwrap_or(0),
            review_threads_total: raw["reviewThreads"]["totalCount"].as_u64().unwrap_or(0),
            reviews: Review::dedupe(raw_reviews),
            files,
        }
    }
}

fn parse_datetime(value: &Value, now: &DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    value
        .as_str()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .unwrap_or(*now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ReviewState, ScoreConfig};
    use chrono::Utc;
    use serde_json::json;

    fn now() -> DateTime<FixedOffset> {
        Utc::now().fixed_offset()
    }

    fn raw_record() -> Value {
        json!({
            "id": "n1",
            "number": 7,
            "title": "Add handler",
            "url": "https://example.com/pull/7",
            "author": { "login": "alice" },
            "mergedAt": "2026-08-01T12:00:00+00:00",
            "createdAt": "2026-07-31T12:00:00+00:00",
            "changedFiles": 3,
            "additions": 120,
            "deletions": 30,
            "comments": { "totalCount": 4 },
            "reviewThreads": { "totalCount": 2 },
            "reviews": { "nodes": [
                {
                    "author": { "login": "bob" },
                    "state": "COMMENTED",
                    "submittedAt": "2026-08-01T09:00:00+00:00",
                    "comments": { "totalCount": 3 }
                },
                {
                    "author": { "login": "bob" },
                    "state": "APPROVED",
                    "submittedAt": "2026-08-01T11:00:00+00:00",
                    "comments": { "totalCount": 1 }
                }
            ]},
            "_files": [
                { "path": "src/api/handler.ts", "additions": 100, "deletions": 20 },
                { "path": "pnpm-lock.yaml", "additions": 20, "deletions": 10 }
            ]
        })
    }

    #[test]
    fn from_raw_normalizes_and_dedupes() {
        let at = now();
        let pr = PullRequest::from_raw(&raw_record(), None, &at);
        assert_eq!(pr.author_login, "alice");
        assert_eq!(pr.changed_files_count, 3);
        assert_eq!(pr.comments_total, 4);
        assert_eq!(pr.files.len(), 2);
        assert_eq!(pr.reviews.len(), 1);
        assert_eq!(pr.reviews[0].state, ReviewState::Approved);
        assert_eq!(pr.reviews[0].comment_count, 4);
    }

    #[test]
    fn noisy_filter_applies_at_parse_time() {
        let at = now();
        let filter =
            NoisyPathFilter::new(&ScoreConfig::default().noisy_file_patterns).unwrap();
        let pr = PullRequest::from_raw(&raw_record(), Some(&filter), &at);
        assert_eq!(pr.files.len(), 1);
        assert_eq!(pr.files[0].path, "src/api/handler.ts");
    }

    #[test]
    fn missing_fields_default_instead_of_failing() {
        let at = now();
        let pr = PullRequest::from_raw(&json!({}), None, &at);
        assert_eq!(pr.author_login, "ghost");
        assert_eq!(pr.number, 0);
        assert_eq!(pr.additions, 0);
        assert_eq!(pr.merged_at, at);
        assert!(pr.reviews.is_empty());
        assert!(pr.files.is_empty());
    }

    #[test]
    fn parse_reads_a_json_array() {
        let at = now();
        let prs =
            PullRequest::parse(&json!([raw_record(), {}]).to_string(), None, &at).unwrap();
        assert_eq!(prs.len(), 2);
        assert_eq!(prs[0].number, 7);
        assert_eq!(prs[1].author_login, "ghost");
    }
}
