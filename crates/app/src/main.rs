use std::path::{Path, PathBuf};

use chrono::Datelike;
use clap::{Parser, Subcommand};
use portfolio_core::{content, AppConfig, Page, PageRenderer, ThemeMode};
use tracing_subscriber::EnvFilter;

const SETTLE_FRAME_MS: f64 = 16.0;
const MAX_SETTLE_FRAMES: usize = 10_000;

fn main() -> portfolio_core::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            config,
            theme,
            settle,
            year,
            output,
        } => run_render(config.as_deref(), theme, settle, year, &output),
        Commands::Simulate {
            config,
            scroll_step,
            frame_ms,
            frames,
            toggle_theme,
        } => run_simulate(config.as_deref(), scroll_step, frame_ms, frames, toggle_theme),
        Commands::Content => run_content(),
    }
}

fn load_config(path: Option<&Path>, theme: Option<ThemeMode>) -> portfolio_core::Result<AppConfig> {
    let mut config = match path {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if let Some(theme) = theme {
        config.theme = theme;
    }
    Ok(config)
}

fn run_render(
    config: Option<&Path>,
    theme: Option<ThemeMode>,
    settle: bool,
    year: Option<i32>,
    output: &Path,
) -> portfolio_core::Result<()> {
    let config = load_config(config, theme)?;
    tracing::info!(theme = %config.theme, settle, ?output, "rendering page");

    let mut page = Page::mount(config)?;
    if settle {
        let step = page.config().viewport.height / 2.0;
        let revealed = page.scroll_through(step);
        let frames = page.run_until_settled(SETTLE_FRAME_MS, MAX_SETTLE_FRAMES);
        tracing::info!(revealed = revealed.len(), frames, "animations settled");
        page.scroll_to(0.0);
    }

    let year = year.unwrap_or_else(|| chrono::Local::now().year());
    PageRenderer::new(year).write_to(&page.snapshot(), output)?;
    page.unmount();
    Ok(())
}

fn run_simulate(
    config: Option<&Path>,
    scroll_step: f64,
    frame_ms: f64,
    frames: usize,
    toggle_theme: bool,
) -> portfolio_core::Result<()> {
    let config = load_config(config, None)?;
    let mut page = Page::mount(config)?;
    let scroll_step = scroll_step.max(1.0);
    tracing::info!(scroll_step, frame_ms, frames, "starting simulation");

    loop {
        let target = page.scroll_y() + scroll_step;
        for section in page.scroll_to(target) {
            tracing::info!(
                section = section.anchor(),
                scroll_y = page.scroll_y(),
                at_ms = page.now(),
                "section revealed"
            );
        }
        for _ in 0..frames {
            page.advance(frame_ms);
        }
        tracing::debug!(
            scroll_y = page.scroll_y(),
            pending_frames = page.pending_frames(),
            counters = ?page.counter_values(),
            "step complete"
        );
        if page.scroll_y() >= page.max_scroll() {
            break;
        }
    }

    let settled_after = page.run_until_settled(frame_ms, MAX_SETTLE_FRAMES);
    tracing::info!(frames = settled_after, "page settled");

    if toggle_theme {
        page.toggle_theme();
    }

    println!("{}", serde_json::to_string_pretty(&page.snapshot())?);
    page.unmount();
    Ok(())
}

fn run_content() -> portfolio_core::Result<()> {
    println!("{}", serde_json::to_string_pretty(&content::bundle())?);
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Scroll-animated portfolio page engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render the page to a standalone HTML document.
    Render {
        /// JSON configuration file.
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Colour scheme to render (`light` or `dark`).
        #[arg(short, long)]
        theme: Option<ThemeMode>,
        /// Scroll through the page and finish every animation first.
        #[arg(long)]
        settle: bool,
        /// Year printed in the footer; defaults to the current year.
        #[arg(long)]
        year: Option<i32>,
        /// Output path for the generated document.
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Scroll through the page step by step and print the final snapshot.
    Simulate {
        /// JSON configuration file.
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Pixels scrolled per step.
        #[arg(long, default_value_t = 200.0)]
        scroll_step: f64,
        /// Simulated frame length in milliseconds.
        #[arg(long, default_value_t = 16.0)]
        frame_ms: f64,
        /// Frames run after each scroll step.
        #[arg(long, default_value_t = 10)]
        frames: usize,
        /// Flip the theme before printing the snapshot.
        #[arg(long)]
        toggle_theme: bool,
    },
    /// Print the page content as JSON.
    Content,
}
