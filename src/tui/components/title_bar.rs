//! # TitleBar Component
//!
//! Top status line: app name, backend address, the startup status message,
//! and a spinner while a request is in flight.
//!
//! Purely presentational — all fields are props from the parent, so the
//! component is trivial to test by rendering into a `TestBackend` buffer.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;

use crate::tui::component::Component;

/// Braille spinner cycle shown while a request is in flight.
const SPINNER_FRAMES: [&str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];

pub struct TitleBar {
    /// Backend base URL (from config)
    pub base_url: String,
    /// Status message fetched at startup (empty until it arrives)
    pub status_message: String,
    /// Spinner frame index while busy, None when idle
    pub spinner_frame: Option<usize>,
}

impl TitleBar {
    pub fn new(base_url: String, status_message: String, spinner_frame: Option<usize>) -> Self {
        Self {
            base_url,
            status_message,
            spinner_frame,
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut title_text = format!("Quandary ({})", self.base_url);
        if !self.status_message.is_empty() {
            title_text.push_str(&format!(" | {}", self.status_message));
        }
        if let Some(frame_index) = self.spinner_frame {
            let spinner = SPINNER_FRAMES[frame_index % SPINNER_FRAMES.len()];
            title_text.push_str(&format!(" | {} working…", spinner));
        }

        frame.render_widget(Span::raw(title_text), area);
    }
}
