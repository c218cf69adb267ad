//! portfolio-feeds — fills a portfolio page from its repository and
//! newsletter feeds.
//!
//! ## Architecture overview
//!
//! ```text
//! ┌──────────┐  FetchMsg  ┌──────────┐  draw()  ┌──────────┐
//! │ fetch.rs │ ─────────► │  app.rs  │ ───────► │  ui.rs   │
//! │ (thread) │  (channel) │ (state)  │          │ (render) │
//! └──────────┘            └──────────┘          └──────────┘
//!      │                       ▲
//!      ▼                       │ handle_key_event()
//! ┌──────────┐            ┌──────────┐
//! │ source/  │            │ input.rs │
//! └──────────┘            └──────────┘
//! ```
//!
//! * **`source/`** — the HTTP transport seam, the repository listing and the
//!   newsletter feed with its relay fallback chain.
//! * **`fetch`** — runs both pipelines once, in the background, and catches
//!   their errors.
//! * **`page/`** — the rendering target: project slots, writing cards, HTML.
//! * **`app`** / **`ui`** / **`input`** — the terminal preview.
//! * **`theme`**, **`gallery`**, **`contact`** — the page's small widgets.
//! * **`main`** — wires everything together: parse args, load config, set up
//!   logging and the terminal, and run the event loop.

mod app;
mod config;
mod contact;
mod error;
mod fetch;
mod gallery;
mod input;
mod page;
mod source;
mod theme;
mod ui;

use std::fs::{self, File};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app::App;
use config::Config;
use contact::ContactForm;
use fetch::Pipelines;
use gallery::Lightbox;
use page::Page;
use source::ReqwestTransport;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// TOML configuration file (default: ./portfolio.toml if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Preview the page in the terminal while the feeds load (default).
    Preview,
    /// Load both feeds once and print the page sections as HTML.
    Render,
    /// Validate a contact form submission.
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        message: String,
    },
}

// ---------------------------------------------------------------------------
// RAII terminal guard — idiomatic cleanup even on panic
// ---------------------------------------------------------------------------

/// Manages terminal raw-mode and alternate-screen lifetime via [`Drop`].
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalGuard {
    fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Install a panic hook that restores the terminal before printing the
/// panic message.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(info);
    }));
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// The preview owns the terminal, so its logs go to a file in the cache
/// directory; every other command logs to stderr.
fn init_tracing(to_file: bool) {
    let writer = if to_file {
        match open_log_file() {
            Ok(file) => BoxMakeWriter::new(Mutex::new(file)),
            Err(_) => BoxMakeWriter::new(io::sink),
        }
    } else {
        BoxMakeWriter::new(io::stderr)
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,portfolio_feeds=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(!to_file),
        )
        .init();
}

fn open_log_file() -> io::Result<File> {
    let dir = dirs_next::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("portfolio-feeds");
    fs::create_dir_all(&dir)?;
    File::create(dir.join("portfolio-feeds.log"))
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Preview);
    init_tracing(matches!(command, Command::Preview));

    let config = Config::load(cli.config.as_deref())?;

    match command {
        Command::Preview => preview(&config)?,
        Command::Render => render(&config)?,
        Command::Contact {
            name,
            email,
            message,
        } => {
            let form = ContactForm {
                name,
                email,
                message,
            };
            println!("{}", form.outcome_message());
            if let Err(e) = form.validate() {
                tracing::debug!(error = %e, "contact form rejected");
                return Ok(ExitCode::FAILURE);
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn pipelines(config: &Config) -> Result<Pipelines> {
    Ok(Pipelines {
        repositories: config.repository_source(),
        newsletter: config.newsletter_source(),
        transport: Arc::new(ReqwestTransport::new(USER_AGENT)?),
    })
}

/// Wait for both pipelines, then print the filled sections.
fn render(config: &Config) -> Result<()> {
    let mut page = Page::new(&config.owner_name, &config.projects);
    // The channel closes once both pipelines have reported.
    for msg in pipelines(config)?.spawn() {
        msg.apply(&mut page);
    }
    print!("{}", page::html::render_page(&page));
    Ok(())
}

fn preview(config: &Config) -> Result<()> {
    install_panic_hook();

    // -- start both pipelines (once; no polling) -----------------------------
    let rx = pipelines(config)?.spawn();

    // -- terminal setup (RAII — Drop restores on exit or panic) --------------
    let mut guard = TerminalGuard::new()?;
    let mut app = App::new(
        Page::new(&config.owner_name, &config.projects),
        config.theme_store(),
        Lightbox::new(config.photos.clone()),
    );

    // -- main event loop -----------------------------------------------------
    // Runs at ~10 fps (100 ms tick).  Each iteration:
    //   1. Apply any pipeline results that have arrived.
    //   2. Render the UI.
    //   3. Poll for keyboard input (non-blocking, up to tick_rate).
    let tick_rate = Duration::from_millis(100);

    loop {
        while let Ok(msg) = rx.try_recv() {
            app.handle_fetch(msg);
        }

        guard.terminal.draw(|f| ui::draw(&mut app, f))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                input::handle_key_event(&mut app, key);
            }
        }

        if app.quit {
            break;
        }
    }

    // `guard` is dropped here, restoring the terminal.
    Ok(())
}
