use crate::model::Result;
use globset::{Glob, GlobSet, GlobSetBuilder};

/// Glob matcher for lockfiles, generated bundles, build output, source
/// maps and snapshots that would distort directory-touch statistics.
#[derive(Debug)]
pub struct NoisyPathFilter {
    globs: GlobSet,
}

// Create
impl NoisyPathFilter {
    pub fn new(patterns: &[String]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            builder.add(Glob::new(pattern)?);
        }
        Ok(Self {
            globs: builder.build()?,
        })
    }
}

// Match
impl NoisyPathFilter {
    /// A path is noisy when the full path or the base filename matches
    /// any configured pattern.
    pub fn is_noisy(&self, path: &str) -> bool {
        let basename = path.rsplit('/').next().unwrap_or(path);
        self.globs.is_match(path) || self.globs.is_match(basename)
    }
}
