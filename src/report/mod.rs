mod json;
mod markdown;

pub use json::{write_scores, RunMetadata};
pub use markdown::MarkdownReport;
