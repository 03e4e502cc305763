//! PC Stats - console front end
//!
//! Prints a block of readings every time the sampler publishes.
//! Press Ctrl+C to stop.

use pcstats_lib::core::Config;
use pcstats_lib::display::{self, ConsoleSurface};
use pcstats_lib::elevation::{self, Elevation};
use pcstats_lib::hardware::{self, Computer};
use pcstats_lib::i18n::I18n;
use pcstats_lib::sampler::{Sampler, Shutdown};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting PC Stats console v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config, using defaults: {}", e);
        Config::default()
    });

    if elevation::ensure_elevated(config.general.run_as_admin) == Elevation::Relaunched {
        return Ok(());
    }

    let i18n = I18n::new(&config.general.language);
    let provider = Computer::open(&config.sensors);

    let mut sampler = Sampler::new(Box::new(provider), hardware::default_instrumentation());
    let snapshots = sampler.subscribe();
    sampler.start()?;

    let mut surface = ConsoleSurface::stdout();
    tokio::select! {
        _ = display::drive(snapshots, &i18n, &mut surface) => {
            log::warn!("Sampler stopped publishing");
        }
        signal = tokio::signal::ctrl_c() => {
            if let Err(e) = signal {
                log::error!("Failed to listen for Ctrl+C: {}", e);
            }
        }
    }

    if sampler.shutdown().await? == Shutdown::TimedOut {
        log::warn!("Exited while a sensor read was still in progress");
    }

    Ok(())
}
