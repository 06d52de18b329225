use anyhow::{anyhow, Result};
use ayat_core::{Config, Resolver, VerseSlot, ViewState};
use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use tracing::error;

mod app;
mod handler;
mod logging;
mod tui;
mod ui;

use app::{App, Settings};
use tui::{EventHandler, Tui, TICK_RATE};

#[derive(Parser)]
#[command(name = "ayat", version)]
#[command(about = "Look up Quran verses from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verse source: remote or local
    #[arg(long, global = true)]
    source: Option<String>,

    /// Directory holding surahs.json and quran/{n}.json
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Base URL of the verse API
    #[arg(long, global = true)]
    api_base_url: Option<String>,

    /// Config file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log file (defaults to the user cache directory)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// View shown at startup
    #[arg(long, default_value = "home")]
    view: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a single verse with its commentary
    Lookup {
        /// Chapter number
        chapter: u16,
        /// Verse number within the chapter
        verse: u16,
    },
    /// List the chapters known to the configured source
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_path = match &cli.log_file {
        Some(path) => path.clone(),
        None => logging::default_log_path()?,
    };
    logging::init(&log_path)?;

    let config = load_config(&cli)?;
    let settings = Settings {
        source: config.build_source()?,
        clamp: config.clamp()?,
        narrow_width: config.narrow_width(),
    };

    match cli.command {
        Some(Commands::Lookup { chapter, verse }) => print_verse(settings, chapter, verse).await,
        Some(Commands::List) => list_chapters(settings).await,
        None => run_tui(settings, &cli.view).await,
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    // Command-line flags win over the config file
    if let Some(source) = &cli.source {
        config.source = Some(source.clone());
    }
    if let Some(dir) = &cli.data_dir {
        config.data_dir = Some(dir.to_string_lossy().to_string());
    }
    if let Some(url) = &cli.api_base_url {
        config.api_base_url = Some(url.clone());
    }

    Ok(config)
}

async fn run_tui(settings: Settings, start_view: &str) -> Result<()> {
    let mut app = App::new(settings).await?;
    app.navigate_named(start_view);

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let mut events = EventHandler::new(TICK_RATE);

    let result = run_loop(&mut terminal, &mut app, &mut events).await;

    tui::restore()?;
    if let Err(e) = &result {
        error!(error = %e, "event loop failed");
    }
    result
}

async fn run_loop(terminal: &mut Tui, app: &mut App, events: &mut EventHandler) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;

        match events.next().await {
            Some(event) => handler::handle_event(app, event)?,
            None => break,
        }

        app.poll_lookups().await;
    }
    Ok(())
}

async fn print_verse(settings: Settings, chapter: u16, verse: u16) -> Result<()> {
    let mut view = ViewState::new();
    let mut resolver = Resolver::new(settings.source);
    resolver.resolve(&mut view, Some(chapter), Some(verse)).await;

    let failed = match view.verse() {
        VerseSlot::Text(text) => {
            println!("\n{}", text.bold());
            println!("{}", view.reference().yellow());
            false
        }
        VerseSlot::Notice(notice) => {
            println!("\n{}", notice.red());
            true
        }
        VerseSlot::Empty | VerseSlot::Loading => true,
    };

    if let Some(commentary) = view.commentary() {
        println!("\n{}", "=".repeat(50).dimmed());
        println!("{}", commentary.fragment);
        println!("\n{}", commentary.disclaimer.yellow());
    }

    if failed {
        return Err(anyhow!("verse {}:{} could not be shown", chapter, verse));
    }
    Ok(())
}

async fn list_chapters(settings: Settings) -> Result<()> {
    let catalog = settings.source.fetch_chapter_list().await?;

    println!(
        "\n{} ({})",
        "Chapters".bold().blue(),
        settings.source.kind().display_name()
    );
    println!("{}", "=".repeat(40).dimmed());

    for chapter in catalog.chapters() {
        println!(
            "  {} {}",
            chapter.option_label(),
            format!("({})", chapter.verse_count).dimmed()
        );
    }

    Ok(())
}
