// src/pipeline.rs

//! Named pipeline compositions over the transform tasks.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use tracing::debug;

use crate::tasks::{self, BuildContext, Category, TaskReport};

/// Run all five transform tasks concurrently and wait for every one of
/// them. No ordering is needed between the tasks because their
/// destinations are disjoint.
///
/// Failures are aggregated: each category runs to its own conclusion and
/// the returned error names every category that failed.
pub async fn build(ctx: &Arc<BuildContext>) -> Result<Vec<TaskReport>> {
    let mut handles = Vec::with_capacity(Category::ALL.len());
    for category in Category::ALL {
        let ctx = Arc::clone(ctx);
        let handle = tokio::spawn(async move { tasks::run(&ctx, category).await });
        handles.push((category, handle));
    }

    let mut reports = Vec::new();
    let mut failures: Vec<String> = Vec::new();

    for (category, handle) in handles {
        match handle.await {
            Ok(Ok(report)) => reports.push(report),
            Ok(Err(err)) => failures.push(format!("{category}: {err:#}")),
            Err(err) => failures.push(format!("{category}: task panicked: {err}")),
        }
    }

    if failures.is_empty() {
        debug!(tasks = reports.len(), "build finished");
        Ok(reports)
    } else {
        Err(anyhow!(
            "{} task(s) failed: {}",
            failures.len(),
            failures.join("; ")
        ))
    }
}

/// Clean, then run every task strictly in sequence: font, assets, script,
/// style, template.
///
/// The caller provides a context whose profile already has `release` set.
/// The sequencing matters only because clean must finish before any task
/// writes into the output root it just deleted; the task order itself
/// mirrors the dev pipeline's registry order.
pub async fn release(ctx: &BuildContext) -> Result<Vec<TaskReport>> {
    tasks::clean::run(ctx).await?;

    let order = [
        Category::Font,
        Category::Assets,
        Category::Script,
        Category::Style,
        Category::Template,
    ];

    let mut reports = Vec::with_capacity(order.len());
    for category in order {
        reports.push(tasks::run(ctx, category).await?);
    }

    Ok(reports)
}
