// src/config/validate.rs

use std::path::Component;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use globset::Glob;

use crate::config::model::ConfigFile;
use crate::tasks::Category;

/// Run basic semantic validation against a loaded configuration.
///
/// This checks:
/// - every source/watch/exclude pattern is a valid glob
/// - every category has at least one source pattern
/// - output sub-directories are relative and stay inside the output root
/// - the style, script and font destinations are pairwise distinct non-root
///   directories, so concatenated outputs never collide with each other or
///   with copied files (tasks may then run concurrently without
///   coordination)
pub fn validate_config(cfg: &ConfigFile) -> Result<()> {
    ensure_roots(cfg)?;
    for category in Category::ALL {
        ensure_patterns(cfg, category)?;
        ensure_dest(cfg, category)?;
    }
    ensure_dest_partitioning(cfg)?;
    Ok(())
}

fn ensure_roots(cfg: &ConfigFile) -> Result<()> {
    if cfg.project.source_root.is_empty() {
        return Err(anyhow!("[project].source_root must not be empty"));
    }
    if cfg.project.out_dir.is_empty() {
        return Err(anyhow!("[project].out_dir must not be empty"));
    }
    if cfg.project.out_dir == cfg.project.source_root {
        return Err(anyhow!(
            "[project].out_dir must differ from source_root (got {:?} for both)",
            cfg.project.out_dir
        ));
    }
    if cfg.style.file_name.is_empty() || cfg.script.file_name.is_empty() {
        return Err(anyhow!("style/script file_name must not be empty"));
    }
    Ok(())
}

fn ensure_patterns(cfg: &ConfigFile, category: Category) -> Result<()> {
    let sources = cfg.sources_for(category);
    if sources.is_empty() {
        return Err(anyhow!(
            "[{category}] must have at least one source pattern"
        ));
    }

    let watch = cfg.watch_for(category);
    let all = sources
        .iter()
        .chain(watch.iter())
        .chain(cfg.exclude_for(category).iter());

    for pat in all {
        Glob::new(pat)
            .with_context(|| format!("invalid glob pattern in [{category}]: {pat}"))?;
    }
    Ok(())
}

fn ensure_dest(cfg: &ConfigFile, category: Category) -> Result<()> {
    let dest = cfg.dest_for(category);
    if dest.is_absolute() {
        return Err(anyhow!(
            "[{category}] destination must be relative (got {:?})",
            dest
        ));
    }
    if escapes_root(&dest) {
        return Err(anyhow!(
            "[{category}] destination escapes the output root: {:?}",
            dest
        ));
    }
    Ok(())
}

/// Destination partitioning: the three categories that own an output file
/// set (rather than mirroring source sub-paths) must write to distinct
/// sub-directories of the output root.
fn ensure_dest_partitioning(cfg: &ConfigFile) -> Result<()> {
    let named = [
        (Category::Style, &cfg.style.out_dir),
        (Category::Script, &cfg.script.out_dir),
        (Category::Font, &cfg.font.out_dir),
    ];

    for (category, dir) in &named {
        if dir.is_empty() {
            return Err(anyhow!(
                "[{category}] out_dir must be a sub-directory of the output root"
            ));
        }
    }

    for i in 0..named.len() {
        for j in (i + 1)..named.len() {
            if named[i].1 == named[j].1 {
                return Err(anyhow!(
                    "[{}] and [{}] share the output directory {:?}; destinations must be disjoint",
                    named[i].0,
                    named[j].0,
                    named[i].1
                ));
            }
        }
    }

    Ok(())
}

fn escapes_root(path: &Path) -> bool {
    path.components()
        .any(|c| matches!(c, Component::ParentDir))
}
