// src/tasks/clean.rs

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::tasks::BuildContext;

/// Delete the output root and everything beneath it.
///
/// A missing output root is a successful no-op; anything else propagates.
pub async fn run(ctx: &BuildContext) -> Result<()> {
    let out_root = ctx.out_root();

    match tokio::fs::remove_dir_all(&out_root).await {
        Ok(()) => {
            info!(path = ?out_root, "output directory removed");
            Ok(())
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = ?out_root, "output directory already absent");
            Ok(())
        }
        Err(err) => {
            Err(err).with_context(|| format!("removing output directory {:?}", out_root))
        }
    }
}
