//! Terminal demo for the card carousel.
//!
//! Drag a card sideways with the mouse: past half its width (or with a quick
//! flick) it slides away and the next card takes its place; otherwise it
//! snaps back.  Left alone, each deck advances on its own every few seconds.

use std::fs::File;
use std::io::{self, stderr};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, widgets::Paragraph, Terminal};
use tokio::time::MissedTickBehavior;

use card_carousel::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    state::AppState,
};
use card_carousel::config::{DeckSpec, Settings};
use card_carousel::ui::{carousel_widget::CarouselWidget, theme::Theme};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Swipeable card carousel in the terminal")]
struct Cli {
    /// Deck to show, as `NAMES[:WIDTHxHEIGHT]` (e.g. `red,orange:280x60`).
    /// Repeat for more decks.
    #[arg(long = "deck", value_name = "DECK")]
    decks: Vec<DeckSpec>,

    /// Inactivity window before a deck advances on its own.
    #[arg(long)]
    auto_advance_ms: Option<u64>,

    /// Release speed (px/ms) that flips to the next card.
    #[arg(long)]
    flip_velocity: Option<f64>,

    /// Fraction of the card width a slow drag must cover to commit.
    #[arg(long)]
    commit_fraction: Option<f64>,

    /// Length of the settle animation.
    #[arg(long)]
    animation_ms: Option<u64>,

    /// Write tracing output to this file instead of stderr.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Save the effective settings to the config file and exit.
    #[arg(long)]
    write_config: bool,
}

impl Cli {
    fn settings(&self) -> Settings {
        let mut settings = Settings::load();
        if let Some(v) = self.auto_advance_ms {
            settings.auto_advance_ms = v;
        }
        if let Some(v) = self.flip_velocity {
            settings.flip_velocity = v;
        }
        if let Some(v) = self.commit_fraction {
            settings.commit_fraction = v;
        }
        if let Some(v) = self.animation_ms {
            settings.animation_ms = v;
        }
        settings.clamp();
        settings
    }
}

fn init_tracing(log_file: Option<&PathBuf>) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env();
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr) // never pollute stdout
                .init();
        }
    }
    Ok(())
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_ref())?;

    let settings = cli.settings();
    if cli.write_config {
        let path = settings.save()?;
        println!("wrote {}", path.display());
        return Ok(());
    }

    let decks = if cli.decks.is_empty() {
        DeckSpec::defaults()
    } else {
        cli.decks.clone()
    };
    let frame_interval = settings.frame_interval();
    let mut state = AppState::new(&decks, settings, Instant::now())?;

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(
        stderr_handle,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange
    )?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    // ── event sources ─────────────────────────────────────────
    let mut events = spawn_event_reader(frame_interval);
    let mut frames = tokio::time::interval(frame_interval);
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

    // ── event loop ────────────────────────────────────────────
    let result: Result<()> = loop {
        if let Err(e) = terminal.draw(|frame| {
            state.terminal_area = frame.area();
            let layout = state.layout();

            for (deck, area) in state.decks.iter().zip(&layout.deck_areas) {
                let widget = CarouselWidget::new(deck.view(), state.settings.cell_width_px);
                frame.render_widget(widget, *area);
            }

            let status_text = state
                .status_message
                .as_deref()
                .unwrap_or("drag or flick a card | click to select | q: quit");
            let status = Paragraph::new(status_text).style(Theme::status_bar_style());
            frame.render_widget(status, layout.status_area);
        }) {
            break Err(e.into());
        }

        tokio::select! {
            biased;

            Some(event) = events.recv() => {
                match event {
                    AppEvent::Key(k) => handler::handle_key(&mut state, k),
                    AppEvent::Mouse(m, at) => handler::handle_mouse(&mut state, m, at),
                    AppEvent::FocusLost(at) => handler::handle_focus_lost(&mut state, at),
                    AppEvent::Resize(w, h) => {
                        state.terminal_area.width = w;
                        state.terminal_area.height = h;
                    }
                }
            }

            _ = frames.tick() => {
                handler::handle_frame(&mut state, Instant::now());
            }
        }

        if state.should_quit {
            break Ok(());
        }
    };

    // ── teardown ──────────────────────────────────────────────
    handler::shutdown(&mut state);
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableFocusChange
    )?;
    terminal.show_cursor()?;

    result
}
