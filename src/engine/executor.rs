// src/engine/executor.rs

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{error, info};

use crate::engine::runtime::{RuntimeEvent, TaskOutcome};
use crate::tasks::{self, BuildContext, Category};

/// A task invocation the runtime wants executed now.
#[derive(Debug, Clone, Copy)]
pub struct BuildJob {
    pub category: Category,
}

/// Spawn the background executor loop.
///
/// The returned `mpsc::Sender<BuildJob>` is what the runtime uses as
/// `exec_tx`. Each job runs its transform task in its own tokio task, so
/// different categories rebuild in parallel; the runtime's state machine
/// guarantees at most one in-flight invocation per category.
pub fn spawn_executor(
    ctx: Arc<BuildContext>,
    runtime_tx: mpsc::Sender<RuntimeEvent>,
) -> mpsc::Sender<BuildJob> {
    let (tx, mut rx) = mpsc::channel::<BuildJob>(32);

    tokio::spawn(async move {
        info!("executor loop started");
        while let Some(job) = rx.recv().await {
            let ctx = Arc::clone(&ctx);
            let runtime_tx = runtime_tx.clone();
            tokio::spawn(async move {
                run_job(job, ctx, runtime_tx).await;
            });
        }
        info!("executor loop finished (channel closed)");
    });

    tx
}

/// Run a single transform task and report its outcome to the runtime.
///
/// Task errors never escape here: a failed invocation in watch mode is
/// logged and reported as a failed outcome so the watch loop survives.
async fn run_job(job: BuildJob, ctx: Arc<BuildContext>, runtime_tx: mpsc::Sender<RuntimeEvent>) {
    let category = job.category;
    info!(%category, "rebuilding");

    let outcome = match tasks::run(&ctx, category).await {
        Ok(report) => {
            info!(
                %category,
                written = report.written.len(),
                skipped = report.skipped,
                "rebuild finished"
            );
            TaskOutcome::Success
        }
        Err(err) => {
            error!(%category, error = %format!("{err:#}"), "rebuild failed");
            TaskOutcome::Failed
        }
    };

    let _ = runtime_tx
        .send(RuntimeEvent::TaskFinished { category, outcome })
        .await;
}
