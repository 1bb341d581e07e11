//! itch-slideshow — cycle through the games on an itch.io page in the terminal.
//!
//! ## Architecture overview
//!
//! ```text
//! ┌───────────┐  Loaded    ┌──────────┐ render() ┌──────────┐  draw()  ┌──────────┐
//! │ loader.rs │ ─────────► │  app.rs  │ ───────► │ view.rs  │ ───────► │  ui.rs   │
//! │ (threads) │ (channel)  │ (state)  │          │ (slots)  │          │ (render) │
//! └───────────┘            └──────────┘          └──────────┘          └──────────┘
//!       ▲ request()             ▲
//!       │                       │ handle_event()
//!  ┌───────────┐          ┌──────────┐
//!  │ source/   │          │ input.rs │ ── prompt.rs
//!  └───────────┘          └──────────┘
//! ```
//!
//! * **`source/`** — the proxy → scrape → fallback strategy chain.
//! * **`loader`** — runs the chain on a background thread per load.
//! * **`app`** — the slideshow controller: slides, index, auto-advance timer.
//! * **`view`** — the render targets the controller writes slides into.
//! * **`ui`** — pure drawing: reads `App` state and draws widgets.
//! * **`input`** / **`prompt`** — map key, mouse and focus events to `App` actions.
//! * **`config`** — command-line and environment settings.
//! * **`main`** — wires everything together and runs the event loop.

mod app;
mod config;
mod input;
mod loader;
mod prompt;
mod source;
mod ui;
mod view;

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{
        self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::EnvFilter;

use app::App;
use config::Config;
use source::{ReqwestClient, SlideSource};

// ---------------------------------------------------------------------------
// RAII terminal guard — idiomatic cleanup even on panic
// ---------------------------------------------------------------------------

/// Manages raw mode, the alternate screen, mouse capture and focus reporting
/// via [`Drop`].
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalGuard {
    fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture, EnableFocusChange)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            DisableFocusChange,
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        let _ = self.terminal.show_cursor();
    }
}

/// Restore the terminal before printing a panic message.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(
            io::stdout(),
            DisableFocusChange,
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        original_hook(info);
    }));
}

/// Send tracing output to `path`; stdout belongs to the UI.
///
/// `RUST_LOG` overrides the default `info` filter.
fn init_tracing(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let config = Config::parse();
    init_tracing(&config.log_file)?;
    install_panic_hook();

    // -- configure the slide source ------------------------------------------
    let client = ReqwestClient::new().context("building HTTP client")?;
    let source = SlideSource::standard(config.proxy.clone(), Arc::new(client));
    let (loader, rx) = loader::channel(source);

    let mut app = App::new(config.source_url(), config.interval());
    tracing::info!(source = %app.state.source_url, proxy = ?config.proxy, "starting");
    app.load(None);

    // -- terminal setup (RAII — Drop restores on exit or panic) --------------
    let mut guard = TerminalGuard::new()?;

    // -- main event loop -----------------------------------------------------
    // Runs at ~10 fps (100 ms tick).  Each iteration:
    //   1. Apply finished loads and dispatch requested ones.
    //   2. Advance the slideshow if its timer is due.
    //   3. Render the UI.
    //   4. Poll for keyboard / mouse / focus input (non-blocking, up to tick_rate).
    let tick_rate = Duration::from_millis(100);

    loop {
        // 1. Loads
        while let Ok(loaded) = rx.try_recv() {
            app.apply_loaded(loaded, Instant::now());
        }
        if let Some(url) = app.take_pending_load() {
            loader.request(url);
        }

        // 2. Timer
        app.tick(Instant::now());

        // 3. Render
        guard.terminal.draw(|f| ui::draw(&mut app, f))?;

        // 4. Handle input
        if event::poll(tick_rate)? {
            input::handle_event(&mut app, event::read()?, Instant::now());
        }

        if app.quit {
            break;
        }
    }

    tracing::info!("exiting");
    // `guard` is dropped here, restoring the terminal.
    Ok(())
}
