use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use anyhow::Context;
use clap::Parser;
use log::{error, info};
use sweepcore::prelude::*;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;

use indicator::ConsoleIndicator;
use workflow::config::ScanConfig;
use workflow::runner::Runner;

mod frontend;
mod indicator;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Band sweep and ping-detection driver")]
struct Args {
    /// Load a scan config from YAML
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, default_value_t = 2048)]
    fft_size: usize,
    #[arg(long, default_value_t = 3.0)]
    dwell_secs: f64,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match args.config {
        Some(path) => ScanConfig::load(path)?,
        None => ScanConfig::from_args(args.fft_size, args.dwell_secs),
    };
    info!(
        "starting wideband monitor from {:.1} to {:.1} MHz",
        config.start_hz / 1e6,
        config.end_hz / 1e6
    );

    let stop = Arc::new(AtomicBool::new(false));
    spawn_interrupt_watcher(stop.clone());

    let (events, queue) = event_queue(DEFAULT_QUEUE_DEPTH);
    let indicator = thread::spawn(move || {
        let mut sink = ConsoleIndicator::new();
        run_indicator(queue, &mut sink);
    });

    let runner = Runner::new(config);
    let outcome = runner.run(events, &stop);

    // The reporter's sender is gone once the sweep returns, so the
    // indicator drains the queue and exits on its own.
    if indicator.join().is_err() {
        error!("indicator task panicked");
    }

    let snapshot = outcome.context("running sweep")?;
    info!(
        "sweep finished: {} blocks, {} detections, {} skipped, {} errors",
        snapshot.blocks, snapshot.detections, snapshot.skipped, snapshot.errors
    );
    Ok(())
}

/// Waits for Ctrl+C on its own thread and flips the shared stop flag; the
/// acquisition loop notices it at the next block boundary.
fn spawn_interrupt_watcher(stop: Arc<AtomicBool>) {
    thread::spawn(move || {
        let runtime = match TokioBuilder::new_current_thread().enable_all().build() {
            Ok(runtime) => runtime,
            Err(err) => {
                error!("building signal runtime: {}", err);
                return;
            }
        };
        runtime.block_on(async {
            if signal::ctrl_c().await.is_ok() {
                info!("interrupt received, stopping after the current block");
                stop.store(true, Ordering::Relaxed);
            }
        });
    });
}
