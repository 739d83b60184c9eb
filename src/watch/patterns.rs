// src/watch/patterns.rs

use std::fmt;

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::config::model::ConfigFile;
use crate::tasks::Category;

/// Compiled watch/exclude glob patterns for a single asset category.
///
/// The patterns are relative to the project root; the watcher passes
/// relative paths (e.g. `"src/scss/main.scss"`) into `matches`.
#[derive(Clone)]
pub struct CategoryWatchProfile {
    category: Category,
    watch_set: GlobSet,
    exclude_set: Option<GlobSet>,
}

impl fmt::Debug for CategoryWatchProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CategoryWatchProfile")
            .field("category", &self.category)
            .finish_non_exhaustive()
    }
}

impl CategoryWatchProfile {
    pub fn category(&self) -> Category {
        self.category
    }

    /// Returns true if this category is interested in the given path
    /// (relative to the project root).
    pub fn matches(&self, rel_path: &str) -> bool {
        if !self.watch_set.is_match(rel_path) {
            return false;
        }
        if let Some(exclude) = &self.exclude_set {
            if exclude.is_match(rel_path) {
                return false;
            }
        }
        true
    }
}

/// Build a compiled watch profile for every category in the registry.
pub fn build_category_profiles(cfg: &ConfigFile) -> Result<Vec<CategoryWatchProfile>> {
    let mut profiles = Vec::with_capacity(Category::ALL.len());

    for category in Category::ALL {
        let watch_set = build_globset(&cfg.watch_for(category))
            .with_context(|| format!("building watch globset for category {category}"))?;

        let exclude = cfg.exclude_for(category);
        let exclude_set = if exclude.is_empty() {
            None
        } else {
            Some(
                build_globset(exclude).with_context(|| {
                    format!("building exclude globset for category {category}")
                })?,
            )
        };

        profiles.push(CategoryWatchProfile {
            category,
            watch_set,
            exclude_set,
        });
    }

    Ok(profiles)
}

/// Build a GlobSet from simple string patterns.
pub(crate) fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        let glob = Glob::new(pat)
            .with_context(|| format!("invalid glob pattern: {pat}"))?;
        builder.add(glob);
    }
    Ok(builder.build()?)
}
