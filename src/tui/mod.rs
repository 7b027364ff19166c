//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw to avoid unnecessary work:
//!
//! - **Busy** (a request in flight): draws every ~80ms so the spinner
//!   animates smoothly.
//! - **Idle**: sleeps up to 250ms, only redraws on events or resize.
//!
//! ## Request lifecycle
//!
//! Each backend request is a `tokio::spawn`ed task holding a clone of the
//! shared service and a `std::sync::mpsc` sender. The task sends exactly one
//! resolution `Action` back to the loop, which feeds it through
//! `core::action::update`. The reducer's `Idle` gate (not this module)
//! guarantees no duplicate request is ever spawned.

mod component;
pub mod components;
mod event;
mod ui;

use std::io::stdout;
use std::sync::{Arc, mpsc};

use crossterm::cursor::{SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use log::{debug, info, warn};

use crate::backend::{DilemmaService, HttpBackend};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{AnalysisViewState, InputBox, InputEvent};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub input_box: InputBox,
    pub analysis: AnalysisViewState,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            input_box: InputBox::new(),
            analysis: AnalysisViewState::new(),
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,                        // Show cursor for input editing
            SetCursorStyle::SteadyBlock, // Non-blinking: avoids blink timer reset from continuous redraws
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, DisableBracketedPaste);
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let service: Arc<dyn DilemmaService> =
        Arc::new(HttpBackend::new(config.base_url.clone(), config.timeout));
    let mut app = App::new(service, config.base_url);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background request tasks
    let (tx, rx) = mpsc::channel();

    // One-shot startup read of the backend status message
    spawn_status_fetch(&app, tx.clone());

    // Animation timer
    let start_time = std::time::Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        let busy = app.is_busy();
        if busy {
            needs_redraw = true;
        }

        // Only draw when something changed
        if needs_redraw {
            let elapsed = start_time.elapsed().as_secs_f32();
            let spinner_frame = (elapsed * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short when the spinner animates, long when idle
        let timeout = if busy {
            std::time::Duration::from_millis(80)
        } else {
            std::time::Duration::from_millis(250)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            // Resize just needs a redraw (already flagged above)
            if matches!(event, TuiEvent::Resize) {
                continue;
            }

            if matches!(event, TuiEvent::Quit) {
                if update(&mut app, Action::Quit) == Effect::Quit {
                    should_quit = true;
                }
                continue;
            }

            if matches!(event, TuiEvent::Generate) {
                if update(&mut app, Action::GenerateRequested) == Effect::SpawnGenerate {
                    spawn_generate(&app, tx.clone());
                }
                continue;
            }

            // Scroll events always go to the analysis view
            if matches!(
                event,
                TuiEvent::ScrollUp
                    | TuiEvent::ScrollDown
                    | TuiEvent::ScrollPageUp
                    | TuiEvent::ScrollPageDown
            ) {
                tui.analysis.handle_event(&event);
                continue;
            }

            // InputBox handles everything else
            if let Some(input_event) = tui.input_box.handle_event(&event) {
                match input_event {
                    InputEvent::Submit(override_text) => {
                        let effect = update(&mut app, Action::AnalyzeRequested { override_text });
                        if let Effect::SpawnAnalyze(dilemma) = effect {
                            tui.analysis.scroll_to_top();
                            spawn_analyze(&app, dilemma, tx.clone());
                        }
                    }
                    InputEvent::ContentChanged => {}
                }
            }
        }

        if should_quit {
            break;
        }

        // Handle resolutions from background request tasks
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            update(&mut app, action);
        }
    }

    ratatui::restore();
    Ok(())
}

/// Startup status read. Failures are logged and swallowed: the message is
/// decorative and the rest of the UI works without it.
fn spawn_status_fetch(app: &App, tx: mpsc::Sender<Action>) {
    let service = app.service.clone();
    tokio::spawn(async move {
        match service.fetch_status().await {
            Ok(message) => {
                if tx.send(Action::StatusResolved(message)).is_err() {
                    warn!("Failed to send status message: receiver dropped");
                }
            }
            Err(e) => warn!("Status fetch failed (ignored): {}", e),
        }
    });
}

fn spawn_generate(app: &App, tx: mpsc::Sender<Action>) {
    info!("Spawning dilemma generation request");
    let service = app.service.clone();
    tokio::spawn(async move {
        let result = service.generate_dilemma().await;
        if tx.send(Action::GenerateResolved(result)).is_err() {
            warn!("Failed to send generation result: receiver dropped");
        }
    });
}

fn spawn_analyze(app: &App, dilemma: String, tx: mpsc::Sender<Action>) {
    info!("Spawning comparative analysis request");
    let service = app.service.clone();
    tokio::spawn(async move {
        let result = service.analyze_comparative(&dilemma).await;
        if tx.send(Action::AnalyzeResolved(result)).is_err() {
            warn!("Failed to send analysis result: receiver dropped");
        }
    });
}
