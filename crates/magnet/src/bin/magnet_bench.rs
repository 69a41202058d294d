//! # MAGNET Headless Benchmark
//!
//! Runs a scripted session against the counting backend and logs frame
//! timings. No window, no GPU.
//!
//! ```bash
//! # Default settings
//! cargo run --release --bin magnet_bench
//!
//! # From a config file
//! cargo run --release --bin magnet_bench -- demo.toml
//! ```

use std::process::ExitCode;

use magnet::rendering::HeadlessBackend;
use magnet::{DemoConfig, FrameLoop, HostResult, ScriptedInput};
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;

fn load_config() -> HostResult<DemoConfig> {
    match std::env::args().nth(1) {
        Some(path) => DemoConfig::load(path),
        None => Ok(DemoConfig::default()),
    }
}

fn run(config: &DemoConfig) -> HostResult<()> {
    let input = ScriptedInput::new(config.script);
    let mut frame_loop = FrameLoop::new(config, input, HeadlessBackend::new())?;

    info!(
        frames = config.frames,
        capacity = frame_loop.simulation().capacity(),
        workers = frame_loop.simulation().worker_count(),
        strategy = ?config.render.strategy,
        "starting headless run"
    );

    let summary = frame_loop
        .run(config.frames, config.fixed_delta_time)
        .clone();
    let backend = frame_loop.backend();

    info!(
        frames = summary.frames,
        avg_frame_ms = summary.avg_frame_ms(),
        avg_simulate_ms = summary.avg_simulate_ms(),
        min_frame_ms = summary.min_frame_us as f64 / 1000.0,
        max_frame_ms = summary.max_frame_us as f64 / 1000.0,
        over_budget = summary.frames_over_budget,
        "timing"
    );
    info!(
        spawned = summary.spawned,
        collected = summary.collected,
        peak_active = summary.peak_active,
        hud = frame_loop.hud_label(),
        draw_calls = backend.draw_calls(),
        instances = backend.instances(),
        mib_uploaded = backend.bytes_uploaded() as f64 / (1024.0 * 1024.0),
        "items"
    );
    Ok(())
}

fn main() -> ExitCode {
    let config = match load_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("magnet_bench: {err}");
            return ExitCode::FAILURE;
        }
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.tracing_level())
        .finish();
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("magnet_bench: failed to install logger: {err}");
    }

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "run failed");
            ExitCode::FAILURE
        }
    }
}
