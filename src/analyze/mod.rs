mod analyzer;
mod core_dirs;
mod metrics;
mod model;

pub use analyzer::Analyzer;
pub use model::{EngineerScore, ImpactAnalysis, TopPullRequest};
