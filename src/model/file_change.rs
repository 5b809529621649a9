use serde_json::Value;

/// One file touched in a pull request.
#[derive(Debug, Clone, Eq, Hash, PartialEq)]
pub struct FileChange {
    pub path: String,
    pub additions: u64,
    pub deletions: u64,
}

// Create
impl FileChange {
    pub fn new(path: impl ToString, additions: u64, deletions: u64) -> Self {
        Self {
            path: path.to_string(),
            additions,
            deletions,
        }
    }
}

// Parser
impl FileChange {
    /// Raw file entries carry `path`, `additions`, `deletions`.
    /// Missing fields default rather than fail.
    pub fn from_raw(raw: &Value) -> Self {
        Self::new(
            raw["path"].as_str().unwrap_or_default(),
            raw["additions"].as_u64().unwrap_or(0),
            raw["deletions"].as_u64().unwrap_or(0),
        )
    }
}

// Derived
impl FileChange {
    pub fn churn(&self) -> u64 {
        self.additions + self.deletions
    }

    /// Top-level path segment; root-level files map to ".".
    pub fn directory(&self) -> &str {
        match self.path.split_once('/') {
            Some((dir, _)) => dir,
            None => ".",
        }
    }
}
