// main.rs - Interactive Game of Life window on a wrapping grid

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use conway::{Controller, Settings, Ticker};
use eframe::egui;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod ui;

#[derive(Parser, Debug)]
#[command(name = "conway_ui")]
#[command(version)]
#[command(about = "Conway's Game of Life on a wrapping grid", long_about = None)]
struct Cli {
    /// Config file (default: <config dir>/conway/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Canvas width in pixels
    #[arg(long)]
    width: Option<usize>,

    /// Canvas height in pixels
    #[arg(long)]
    height: Option<usize>,

    /// Cell size in pixels
    #[arg(short = 's', long)]
    cell_size: Option<usize>,

    /// Milliseconds between generations
    #[arg(short, long)]
    period_ms: Option<u64>,

    /// Stop a run after this many generations
    #[arg(short, long)]
    generations: Option<u64>,

    /// Pattern to start with (Glider, Blinker, Toad, Beacon, Pulsar, R-pentomino, Gosper Glider Gun)
    #[arg(short = 'P', long)]
    pattern: Option<String>,
}

impl Cli {
    /// Command-line values win over the config file
    fn apply(self, mut settings: Settings) -> Settings {
        if let Some(width) = self.width {
            settings.canvas_width = width;
        }
        if let Some(height) = self.height {
            settings.canvas_height = height;
        }
        if let Some(cell_size) = self.cell_size {
            settings.cell_size = cell_size;
        }
        if let Some(period_ms) = self.period_ms {
            settings.period_ms = period_ms;
        }
        if let Some(generations) = self.generations {
            settings.generation_limit = generations;
        }
        if self.pattern.is_some() {
            settings.pattern = self.pattern;
        }
        settings
    }
}

/// Window state: the session controller plus the timer driving it
pub struct LifeApp {
    controller: Controller,
    ticker: Ticker,
    selected_pattern: usize,
    // Keeps the ticker's task alive
    _runtime: tokio::runtime::Runtime,
}

impl LifeApp {
    fn new(cc: &eframe::CreationContext<'_>, controller: Controller, runtime: tokio::runtime::Runtime) -> Self {
        let ctx = cc.egui_ctx.clone();
        let ticker = Ticker::new(runtime.handle().clone(), move || ctx.request_repaint());
        Self { controller, ticker, selected_pattern: 0, _runtime: runtime }
    }

    /// Hand queued timer ticks to the controller and cancel the timer once
    /// a run ends
    fn pump(&mut self) {
        let ticks = self.ticker.drain();
        if let Some(outcome) = self.controller.run_ticks(ticks) {
            self.ticker.apply(outcome.schedule());
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref()).context("loading settings")?;
    let source = cli.config.clone().unwrap_or_else(Settings::config_path);
    info!(config = %source.display(), "loaded settings");
    let settings = cli.apply(settings);
    let controller = Controller::new(&settings).context("invalid settings")?;
    let runtime = tokio::runtime::Runtime::new().context("starting timer runtime")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([settings.canvas_width as f32 + 40.0, settings.canvas_height as f32 + 180.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Conway's Game of Life",
        options,
        Box::new(move |cc| Box::new(LifeApp::new(cc, controller, runtime))),
    )
    .map_err(|err| anyhow::anyhow!("window failed: {err}"))
}
