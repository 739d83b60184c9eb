// src/engine/runtime.rs

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::engine::executor::BuildJob;
use crate::engine::state::CategoryStates;
use crate::serve::reload::{ReloadHub, ReloadMessage};
use crate::tasks::Category;

/// Result of a transform task invocation in watch mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome {
    Success,
    Failed,
}

/// Events sent into the runtime from the watcher, the executor, or
/// external signals.
///
/// - the watcher sends `Changed`
/// - the executor sends `TaskFinished`
/// - Ctrl-C handling sends `ShutdownRequested`
#[derive(Debug, Clone)]
pub enum RuntimeEvent {
    Changed { category: Category, path: String },
    TaskFinished { category: Category, outcome: TaskOutcome },
    ShutdownRequested,
}

/// The watch-mode orchestration runtime.
///
/// Responsibilities:
/// - Consume `RuntimeEvent`s from the watcher/executor/ctrl-c.
/// - Coalesce change bursts through the per-category state machine.
/// - Dispatch `BuildJob`s to the executor.
/// - Broadcast a reload after each invocation.
pub struct Runtime {
    states: CategoryStates,

    /// Unified event stream from all producers.
    events_rx: mpsc::Receiver<RuntimeEvent>,

    /// Channel to the executor: one message per task invocation.
    exec_tx: mpsc::Sender<BuildJob>,

    hub: ReloadHub,
}

impl Runtime {
    pub fn new(
        events_rx: mpsc::Receiver<RuntimeEvent>,
        exec_tx: mpsc::Sender<BuildJob>,
        hub: ReloadHub,
    ) -> Self {
        Self {
            states: CategoryStates::new(),
            events_rx,
            exec_tx,
            hub,
        }
    }

    /// Main event loop. Runs until shutdown is requested or every producer
    /// has hung up.
    pub async fn run(mut self) -> Result<()> {
        info!("watch runtime started");

        while let Some(event) = self.events_rx.recv().await {
            debug!(?event, "runtime received event");

            let keep_running = match event {
                RuntimeEvent::Changed { category, path } => {
                    self.handle_change(category, path).await?
                }
                RuntimeEvent::TaskFinished { category, outcome } => {
                    self.handle_finished(category, outcome).await?
                }
                RuntimeEvent::ShutdownRequested => {
                    info!("shutdown requested, stopping runtime");
                    false
                }
            };

            if !keep_running {
                break;
            }
        }

        info!("watch runtime exiting");
        Ok(())
    }

    async fn handle_change(&mut self, category: Category, path: String) -> Result<bool> {
        info!(%category, path = %path, "file changed");

        if self.states.on_change(category) {
            self.dispatch(category).await?;
        }

        Ok(true)
    }

    async fn handle_finished(&mut self, category: Category, outcome: TaskOutcome) -> Result<bool> {
        if outcome == TaskOutcome::Failed {
            debug!(%category, "task failed; category returns to idle after reload");
        }

        // Reload unconditionally: even a failed pass may have rewritten
        // part of the output, and the browser should reflect it.
        self.hub.broadcast(ReloadMessage::Reload {
            category: category.name().to_string(),
        });

        if self.states.on_finished(category) {
            debug!(%category, "running queued follow-up pass");
            self.dispatch(category).await?;
        }

        Ok(true)
    }

    async fn dispatch(&mut self, category: Category) -> Result<()> {
        if let Err(err) = self.exec_tx.send(BuildJob { category }).await {
            error!(error = %err, "failed to send job to executor");
            // If the executor channel is closed, there's not much we can
            // do. Bubble up so higher layers can decide what to do.
            return Err(err.into());
        }
        Ok(())
    }
}
