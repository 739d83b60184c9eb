// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod logging;
pub mod pipeline;
pub mod profile;
pub mod serve;
pub mod tasks;
pub mod watch;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{error, info};

use crate::cli::{CliArgs, Command};
use crate::config::loader::load_or_default;
use crate::config::model::ConfigFile;
use crate::engine::{spawn_executor, Runtime, RuntimeEvent};
use crate::profile::BuildProfile;
use crate::serve::{serve, ReloadHub, ServerConfig};
use crate::tasks::{BuildContext, Category, TaskReport};
use crate::watch::{build_category_profiles, spawn_watcher};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - the per-command pipeline composition
/// - for `dev`: executor / watcher / dev server / Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let config_path = PathBuf::from(&args.config);
    let cfg = load_or_default(&config_path)?;
    let root = config_root_dir(&config_path);
    let profile = BuildProfile::from_config(&cfg.build);

    let command = args.command.unwrap_or(Command::Dev);

    if args.dry_run {
        print_dry_run(&cfg, profile, command);
        return Ok(());
    }

    match command {
        Command::Clean => {
            let ctx = BuildContext::new(root, cfg, profile);
            tasks::clean::run(&ctx).await
        }
        Command::Build => {
            let ctx = Arc::new(BuildContext::new(root, cfg, profile));
            let reports = pipeline::build(&ctx).await?;
            summarize(&reports);
            Ok(())
        }
        Command::Release => {
            let ctx = BuildContext::new(root, cfg, profile.release());
            let reports = pipeline::release(&ctx).await?;
            summarize(&reports);
            Ok(())
        }
        Command::Dev => run_dev(root, cfg, profile).await,
        Command::Style => run_single(root, cfg, profile, Category::Style).await,
        Command::Script => run_single(root, cfg, profile, Category::Script).await,
        Command::Template => run_single(root, cfg, profile, Category::Template).await,
        Command::Font => run_single(root, cfg, profile, Category::Font).await,
        Command::Assets => run_single(root, cfg, profile, Category::Assets).await,
    }
}

/// Run one named transform task and exit.
async fn run_single(
    root: PathBuf,
    cfg: ConfigFile,
    profile: BuildProfile,
    category: Category,
) -> Result<()> {
    let ctx = BuildContext::new(root, cfg, profile);
    let report = tasks::run(&ctx, category).await?;
    summarize(std::slice::from_ref(&report));
    Ok(())
}

/// Build once, then serve the output with live reload and rebuild on file
/// changes. Long-running; exits on Ctrl-C.
async fn run_dev(root: PathBuf, cfg: ConfigFile, profile: BuildProfile) -> Result<()> {
    let ctx = Arc::new(BuildContext::new(root.clone(), cfg, profile));

    // Initial build. Serving starts even when a task fails; the failure
    // shows up in the log the same way a broken watched rebuild would.
    match pipeline::build(&ctx).await {
        Ok(reports) => summarize(&reports),
        Err(err) => error!(error = %format!("{err:#}"), "initial build failed"),
    }

    let hub = ReloadHub::new();

    // Runtime event channel.
    let (rt_tx, rt_rx) = mpsc::channel::<RuntimeEvent>(64);

    // In-process task executor.
    let exec_tx = spawn_executor(Arc::clone(&ctx), rt_tx.clone());

    // File watcher.
    let profiles = build_category_profiles(&ctx.config)?;
    let _watcher_handle = spawn_watcher(root, profiles, rt_tx.clone())?;

    // Dev server.
    let server_config = ServerConfig {
        host: ctx.config.serve.host.clone(),
        port: ctx.config.serve.port,
        root: ctx.out_root(),
    };
    {
        let hub = hub.clone();
        tokio::spawn(async move {
            if let Err(err) = serve(server_config, hub).await {
                error!(error = %format!("{err:#}"), "dev server stopped");
            }
        });
    }

    // Ctrl-C → graceful shutdown.
    {
        let tx = rt_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            let _ = tx.send(RuntimeEvent::ShutdownRequested).await;
        });
    }

    Runtime::new(rt_rx, exec_tx, hub).run().await
}

/// Figure out a sensible project root.
/// Currently: directory containing the config file, or `.`.
fn config_root_dir(config_path: &Path) -> PathBuf {
    config_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

fn summarize(reports: &[TaskReport]) {
    for report in reports {
        info!(
            category = %report.category,
            written = report.written.len(),
            skipped = report.skipped,
            "task finished"
        );
    }
}

/// Simple dry-run output: print the resolved registry and profile.
fn print_dry_run(cfg: &ConfigFile, profile: BuildProfile, command: Command) {
    println!("sitebake dry-run ({command:?})");
    println!("  mode = {}", profile.mode_name());
    println!("  source_root = {}", cfg.project.source_root);
    println!("  out_dir = {}", cfg.project.out_dir);
    println!();

    println!("categories:");
    for category in Category::ALL {
        println!("  - {category}");
        println!("      sources: {:?}", cfg.sources_for(category));
        println!("      watch: {:?}", cfg.watch_for(category));
        let exclude = cfg.exclude_for(category);
        if !exclude.is_empty() {
            println!("      exclude: {:?}", exclude);
        }
        println!("      dest: {:?}", cfg.dest_for(category));
    }

    println!();
    println!(
        "serve: http://{}:{} over {:?}",
        cfg.serve.host,
        cfg.serve.port,
        cfg.out_root()
    );
}
