use std::time::Duration;

use linecast::color;
use linecast::config::{self, CliAction, Config};
use linecast::{Engine, Error, HeadlessPresenter, Rasterizer, RunStats};
use log::{info, warn};

/// Pacing for the headless presenter when vsync is on (~60Hz)
const HEADLESS_FRAME_INTERVAL: Duration = Duration::from_micros(16_667);

fn run_headless(engine: Engine, config: &Config) -> Result<RunStats, Error> {
    let interval = if config.vsync {
        HEADLESS_FRAME_INTERVAL
    } else {
        Duration::ZERO
    };
    if config.max_frames.is_none() {
        warn!("Headless run without --frames will only stop when killed");
    }
    info!("Presenting headless");
    let mut presenter = HeadlessPresenter::new(config.max_frames, interval);
    engine.run(&mut presenter)
}

#[cfg(feature = "window")]
fn run_windowed(engine: Engine, config: &Config) -> Result<RunStats, Error> {
    use linecast::display::{Display, RenderTarget, WindowPresenter};

    let (display, texture_creator) =
        Display::with_options(&config.title, config.width, config.height, config.vsync)?;
    let target = RenderTarget::with_size(&texture_creator, config.width, config.height)?;
    info!(
        "Window open: {}x{}, vsync {}",
        display.width(),
        display.height(),
        if config.vsync { "on" } else { "off" }
    );
    let mut presenter = WindowPresenter::new(display, target);
    engine.run(&mut presenter)
}

#[cfg(not(feature = "window"))]
fn run_windowed(engine: Engine, config: &Config) -> Result<RunStats, Error> {
    warn!("Built without the `window` feature, falling back to headless");
    run_headless(engine, config)
}

fn main() -> Result<(), Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    let config = match Config::from_args(std::env::args().skip(1))? {
        CliAction::Run(config) => config,
        CliAction::Help => {
            config::print_help();
            return Ok(());
        },
    };

    info!("=== linecast ===");
    info!(
        "Resolution: {}x{}, clear color {}, pass {:?}",
        config.width,
        config.height,
        color::to_hex(config.clear_color),
        config.pass
    );

    let rasterizer = Rasterizer::new(config.width, config.height, config.clear_color)?;
    let engine =
        Engine::new(rasterizer, config.pass.build()).with_shutdown_poll(config.shutdown_poll());

    let stats = if config.headless {
        run_headless(engine, &config)?
    } else {
        run_windowed(engine, &config)?
    };

    info!(
        "Done: {} frames rendered, {} presented",
        stats.frames_rendered, stats.frames_presented
    );
    Ok(())
}
