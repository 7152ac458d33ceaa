mod renderer;

use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use gridscroll_core::{ButtonGrid, ButtonTemplate, LayoutMetrics, Padding, ScrollConfig, Size, Spacing};

/// Keyboard-navigable button grid that scrolls to follow focus.
#[derive(Debug, Parser)]
#[command(name = "gridscroll", version)]
struct Args {
    /// Buttons inserted at startup.
    #[arg(short, long, default_value_t = 40)]
    buttons: usize,

    /// Buttons per row.
    #[arg(short, long, default_value_t = 4)]
    columns: usize,

    /// Slides per second (overrides the config file).
    #[arg(short, long, env = "GRIDSCROLL_SCROLL_SPEED")]
    scroll_speed: Option<f64>,

    /// JSON scroll config, e.g. `{ "scroll_speed": 2.0, "retrigger": "drop" }`.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write logs here (RUST_LOG filters, default `debug`).
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(path: Option<&PathBuf>) -> Result<()> {
    // The terminal UI owns stdout/stderr, so logs only go to a file.
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

/// Apply the CLI override and keep the speed non-negative, so every slide
/// has a finite, positive duration.
fn apply_scroll_speed(config: &mut ScrollConfig, cli_speed: Option<f64>) {
    if let Some(speed) = cli_speed {
        config.scroll_speed = speed;
    }
    if config.scroll_speed.is_nan() || config.scroll_speed < 0.0 {
        log::warn!("scroll speed {} is invalid, using 0", config.scroll_speed);
        config.scroll_speed = 0.0;
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_ref())?;

    let mut config = match &args.config {
        Some(path) => ScrollConfig::load(path)?,
        None => ScrollConfig::default(),
    };
    apply_scroll_speed(&mut config, args.scroll_speed);

    // One world unit is one terminal cell.
    let metrics = LayoutMetrics {
        cell_size: Size::new(14.0, 3.0),
        spacing: Spacing::new(1.0, 1.0),
        padding: Padding::uniform(1.0),
        columns: args.columns.max(1),
    };
    let mut grid = ButtonGrid::new(ButtonTemplate::default(), metrics)?;
    grid.insert_multiple_buttons(args.buttons)?;
    log::info!(
        "starting with {} buttons in {} columns, scroll speed {}",
        grid.count(),
        grid.columns(),
        config.scroll_speed
    );

    renderer::render_tui(grid, config)
}
