// src/tasks/mod.rs

//! Transform tasks.
//!
//! Each task reads the files matching its category's globs, applies a fixed
//! sequence of profile-gated sub-steps and writes under the category's
//! destination directory. Tasks keep no state across invocations;
//! re-running with identical inputs and profile rewrites identical bytes.
//!
//! Per-source-file failures in the style and script tasks are fail-soft:
//! logged, the item skipped, the task keeps going. Filesystem failures
//! (clean, copy, write) propagate.

pub mod clean;
pub mod copy;
pub mod script;
pub mod style;
pub mod template;

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::model::ConfigFile;
use crate::profile::BuildProfile;
use crate::watch::patterns::build_globset;

/// The five asset categories. Each owns a disjoint slice of the output
/// tree (validated at config load), so tasks run concurrently without
/// coordination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Style,
    Script,
    Template,
    Font,
    Assets,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Style,
        Category::Script,
        Category::Template,
        Category::Font,
        Category::Assets,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Category::Style => "style",
            Category::Script => "script",
            Category::Template => "template",
            Category::Font => "font",
            Category::Assets => "assets",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything a task invocation needs: project root, registry, profile.
///
/// The profile travels by value here instead of living in process-wide
/// state; the release pipeline builds a context with `profile.release()`.
#[derive(Debug, Clone)]
pub struct BuildContext {
    pub root: PathBuf,
    pub config: ConfigFile,
    pub profile: BuildProfile,
}

impl BuildContext {
    pub fn new(root: impl Into<PathBuf>, config: ConfigFile, profile: BuildProfile) -> Self {
        Self {
            root: root.into(),
            config,
            profile,
        }
    }

    /// Absolute output root.
    pub fn out_root(&self) -> PathBuf {
        self.root.join(self.config.out_root())
    }

    /// Absolute destination directory for a category.
    pub fn dest_dir(&self, category: Category) -> PathBuf {
        self.root.join(self.config.dest_for(category))
    }
}

/// What a task did: files written and fail-soft items skipped.
#[derive(Debug, Clone)]
pub struct TaskReport {
    pub category: Category,
    pub written: Vec<PathBuf>,
    pub skipped: usize,
}

impl TaskReport {
    fn new(category: Category) -> Self {
        Self {
            category,
            written: Vec::new(),
            skipped: 0,
        }
    }
}

/// Run one category's transform task.
pub async fn run(ctx: &BuildContext, category: Category) -> Result<TaskReport> {
    debug!(%category, mode = ctx.profile.mode_name(), "running transform task");
    match category {
        Category::Style => style::run(ctx).await,
        Category::Script => script::run(ctx).await,
        Category::Template => template::run(ctx).await,
        Category::Font => copy::fonts(ctx).await,
        Category::Assets => copy::assets(ctx).await,
    }
}

/// Enumerate files under the project root matching `patterns`, minus
/// `exclude`, as sorted root-relative paths.
///
/// The output directory is never descended into, and neither are hidden
/// directories, so build outputs cannot feed back into a task's inputs.
pub(crate) fn collect_matches(
    ctx: &BuildContext,
    patterns: &[String],
    exclude: &[String],
) -> Result<Vec<PathBuf>> {
    if patterns.is_empty() {
        return Ok(Vec::new());
    }

    let include = build_globset(patterns)?;
    let exclude_set = if exclude.is_empty() {
        None
    } else {
        Some(build_globset(exclude)?)
    };

    let out_root = ctx.out_root();
    let mut matches: Vec<PathBuf> = Vec::new();

    let walker = WalkDir::new(&ctx.root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| {
            if entry.depth() == 0 {
                return true;
            }
            if !entry.file_type().is_dir() {
                return true;
            }
            if entry.path() == out_root {
                return false;
            }
            !entry
                .file_name()
                .to_string_lossy()
                .starts_with('.')
        });

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(error = %err, "skipping unreadable directory entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(rel) = entry.path().strip_prefix(&ctx.root) else {
            continue;
        };
        let rel_str = rel.to_string_lossy().replace('\\', "/");
        if !include.is_match(&rel_str) {
            continue;
        }
        if let Some(ref ex) = exclude_set {
            if ex.is_match(&rel_str) {
                continue;
            }
        }
        matches.push(rel.to_path_buf());
    }

    matches.sort();
    matches.dedup();
    Ok(matches)
}

/// Matched files paired with their destination-relative paths.
///
/// Mirrors the base semantics of the original pipeline's copy steps: a
/// matched file's sub-path below its pattern's literal prefix is preserved
/// under the destination (`src/assets/img/a.png` via `src/assets/**/*`
/// lands at `img/a.png`).
pub(crate) fn matches_with_rel_dest(
    ctx: &BuildContext,
    patterns: &[String],
    exclude: &[String],
) -> Result<Vec<(PathBuf, PathBuf)>> {
    let mut out = Vec::new();
    for pattern in patterns {
        let base = glob_base(pattern);
        for rel in collect_matches(ctx, std::slice::from_ref(pattern), exclude)? {
            let dest = match rel.strip_prefix(&base) {
                Ok(stripped) if !stripped.as_os_str().is_empty() => stripped.to_path_buf(),
                _ => rel
                    .file_name()
                    .map(PathBuf::from)
                    .unwrap_or_else(|| rel.clone()),
            };
            out.push((rel, dest));
        }
    }
    Ok(out)
}

/// The literal leading components of a glob, i.e. everything before the
/// first component containing a metacharacter. A fully literal pattern's
/// base is its parent directory.
pub(crate) fn glob_base(pattern: &str) -> PathBuf {
    let mut base = PathBuf::new();
    let mut saw_meta = false;
    for comp in Path::new(pattern).components() {
        let s = comp.as_os_str().to_string_lossy();
        if s.contains(['*', '?', '[', '{']) {
            saw_meta = true;
            break;
        }
        base.push(comp);
    }
    if !saw_meta {
        base.pop();
    }
    base
}

/// Version-3 source map listing the sources concatenated into `file`.
///
/// `entries` pairs each contributing root-relative path with its original
/// content. The map carries no fine-grained mappings; it exists so dev
/// tooling can show which inputs a concatenated stream came from.
pub(crate) fn source_map_json(file: &str, entries: &[(String, String)]) -> String {
    let sources: Vec<&str> = entries.iter().map(|(path, _)| path.as_str()).collect();
    let contents: Vec<&str> = entries.iter().map(|(_, text)| text.as_str()).collect();

    serde_json::json!({
        "version": 3,
        "file": file,
        "sources": sources,
        "sourcesContent": contents,
        "names": [],
        "mappings": "",
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glob_base_stops_at_first_metacharacter() {
        assert_eq!(glob_base("src/assets/**/*"), PathBuf::from("src/assets"));
        assert_eq!(glob_base("src/scss/*.scss"), PathBuf::from("src/scss"));
        assert_eq!(
            glob_base("vendor/vue.min.js"),
            PathBuf::from("vendor"),
            "literal paths use their directory as base"
        );
    }
}
