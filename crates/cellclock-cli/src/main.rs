//! Terminal driver: seeds a world, pulls frames and paces their display.

mod engine;
mod render;
mod seed;
mod telemetry;

use anyhow::{Context, Result};
use cellclock_core::SimulationConfig;
use std::path::PathBuf;
use tokio::signal;
use tokio::time::{interval, Duration};
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    telemetry::init_telemetry()?;

    let config = load_config()?;
    info!(
        engine = ?config.engine,
        width = config.world.width,
        depth = config.world.depth,
        "Starting cellclock"
    );

    let genesis = seed::genesis(&config.world, &config.seed)?;
    let mut engine = engine::Engine::from_config(&config, &genesis)?;
    let mut renderer = render::Renderer::new(config.render.clone(), std::io::stdout().lock());

    let mut pacing = interval(Duration::from_millis(config.render.frame_delay_ms.max(1)));
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    let mut shown: u64 = 0;
    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            _ = pacing.tick() => {
                let Some(frame) = engine.next_frame() else {
                    error!("Engine stopped producing frames");
                    break;
                };
                renderer.render(&frame)?;
                shown += 1;

                if config.render.max_frames.is_some_and(|max| shown >= max) {
                    break;
                }
            }
        }
    }

    info!(frames = shown, "Shutting down");
    Ok(())
}

/// First argument or `CELLCLOCK_CONFIG`, otherwise defaults.
fn load_config() -> Result<SimulationConfig> {
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("CELLCLOCK_CONFIG").ok())
        .map(PathBuf::from);

    match path {
        Some(path) => SimulationConfig::from_json_file(&path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => {
            let config = SimulationConfig::default();
            config.validate()?;
            Ok(config)
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
