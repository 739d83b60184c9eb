// src/tasks/copy.rs

//! The two verbatim-copy categories: fonts and generic assets.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::debug;

use crate::tasks::{matches_with_rel_dest, BuildContext, Category, TaskReport};

/// Copy the configured vendor font set plus the font glob into the font
/// destination.
pub async fn fonts(ctx: &BuildContext) -> Result<TaskReport> {
    copy_category(
        ctx,
        Category::Font,
        &ctx.config.font.vendor,
        &ctx.config.font.sources,
        &ctx.config.font.exclude,
    )
    .await
}

/// Copy the asset glob verbatim, preserving relative sub-paths.
pub async fn assets(ctx: &BuildContext) -> Result<TaskReport> {
    copy_category(
        ctx,
        Category::Assets,
        &[],
        &ctx.config.assets.sources,
        &ctx.config.assets.exclude,
    )
    .await
}

async fn copy_category(
    ctx: &BuildContext,
    category: Category,
    vendor: &[String],
    sources: &[String],
    exclude: &[String],
) -> Result<TaskReport> {
    let mut entries = matches_with_rel_dest(ctx, vendor, &[])?;
    entries.extend(matches_with_rel_dest(ctx, sources, exclude)?);

    // Last match wins on a shared destination path; BTreeMap keeps the
    // copy order deterministic.
    let mut by_dest: BTreeMap<PathBuf, PathBuf> = BTreeMap::new();
    for (src, dest) in entries {
        by_dest.insert(dest, src);
    }

    let dest_root = ctx.dest_dir(category);
    let mut report = TaskReport::new(category);

    for (dest_rel, src_rel) in by_dest {
        let src = ctx.root.join(&src_rel);
        let target = dest_root.join(&dest_rel);

        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("creating destination directory {:?}", parent))?;
        }

        tokio::fs::copy(&src, &target)
            .await
            .with_context(|| format!("copying {:?} to {:?}", src, target))?;

        debug!(category = %category, src = ?src_rel, dest = ?target, "copied");
        report.written.push(target);
    }

    Ok(report)
}
