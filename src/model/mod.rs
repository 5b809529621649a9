mod config;
mod file_change;
mod noise;
mod pull_request;
mod result;
mod review;

pub use config::ScoreConfig;
pub use file_change::FileChange;
pub use noise::NoisyPathFilter;
pub use pull_request::PullRequest;
pub use result::Result;
pub use review::{Review, ReviewState};
