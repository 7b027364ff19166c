//! # AnalysisView Component
//!
//! Scrollable region showing the comparative analysis: one bordered block
//! per ethical framework, title = framework name, body = analysis text, in
//! the mapping's iteration order. When no result exists, the region renders
//! nothing; a fresh result always replaces the previous blocks wholesale.
//!
//! The analysis lifecycle's inline error (including the empty-input
//! validation error) renders at the top of the region.

use std::collections::BTreeMap;

use ratatui::Frame;
use ratatui::layout::{Position as LayoutPosition, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Padding, Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::state::RequestPhase;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

/// Persistent presentation state: scroll position survives re-renders.
#[derive(Default)]
pub struct AnalysisViewState {
    pub scroll_state: ScrollViewState,
}

impl AnalysisViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset scroll to the top (called when a new result replaces the old).
    pub fn scroll_to_top(&mut self) {
        self.scroll_state
            .set_offset(LayoutPosition { x: 0, y: 0 });
    }
}

impl EventHandler for AnalysisViewState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                Some(())
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                Some(())
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                Some(())
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                Some(())
            }
            _ => None,
        }
    }
}

/// Transient component: built fresh each frame from core state.
pub struct AnalysisView<'a> {
    pub analyses: Option<&'a BTreeMap<String, String>>,
    pub phase: &'a RequestPhase,
    pub state: &'a mut AnalysisViewState,
}

impl<'a> AnalysisView<'a> {
    pub fn new(
        analyses: Option<&'a BTreeMap<String, String>>,
        phase: &'a RequestPhase,
        state: &'a mut AnalysisViewState,
    ) -> Self {
        Self {
            analyses,
            phase,
            state,
        }
    }

    /// Predicted height of one framework block, borders included.
    ///
    /// Uses `textwrap` with options matching Ratatui's `Paragraph` wrapping
    /// so the scroll canvas height maps 1:1 onto rendered rows.
    fn block_height(text: &str, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            return 1;
        }
        let content = text.trim();
        if content.is_empty() {
            return VERTICAL_OVERHEAD;
        }
        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);
        (textwrap::wrap(content, options).len() as u16).max(1) + VERTICAL_OVERHEAD
    }

    /// One-line banner above the blocks: the inline error, or a progress
    /// note while the request is in flight. None when idle and clean.
    fn status_line(&self) -> Option<Span<'static>> {
        match self.phase {
            RequestPhase::Errored(msg) => Some(Span::styled(
                format!("Error: {msg}"),
                Style::default().fg(Color::Red),
            )),
            RequestPhase::Loading => Some(Span::styled(
                "Analyzing…",
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )),
            RequestPhase::Idle => None,
        }
    }
}

impl<'a> Component for AnalysisView<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut blocks_area = area;

        if let Some(banner) = self.status_line() {
            let [banner_area, rest] = ratatui::layout::Layout::vertical([
                ratatui::layout::Constraint::Length(1),
                ratatui::layout::Constraint::Min(0),
            ])
            .areas(area);
            frame.render_widget(banner, banner_area);
            blocks_area = rest;
        }

        // Rendering contract: no result → nothing in this region.
        let Some(analyses) = self.analyses else {
            return;
        };
        if blocks_area.height == 0 {
            return;
        }

        // Reserve one column for the scrollbar, like the conversation view.
        let content_width = blocks_area.width.saturating_sub(1);
        let heights: Vec<u16> = analyses
            .values()
            .map(|text| Self::block_height(text, content_width))
            .collect();
        let total_height: u16 = heights.iter().sum();

        // Clamp so a shrunk result can't leave the view scrolled past the end.
        let max_offset = total_height.saturating_sub(blocks_area.height);
        if self.state.scroll_state.offset().y > max_offset {
            self.state.scroll_state.set_offset(LayoutPosition {
                x: 0,
                y: max_offset,
            });
        }

        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset: u16 = 0;
        for ((framework, text), height) in analyses.iter().zip(&heights) {
            let block_rect = Rect::new(0, y_offset, content_width, *height);
            let paragraph = Paragraph::new(text.trim())
                .block(
                    Block::bordered()
                        .border_type(ratatui::widgets::BorderType::Rounded)
                        .title(framework.as_str())
                        .border_style(Style::default().fg(Color::Magenta))
                        .padding(Padding::horizontal(CONTENT_PAD_H)),
                )
                .wrap(Wrap { trim: true });
            scroll_view.render_widget(paragraph, block_rect);
            y_offset += height;
        }

        frame.render_stateful_widget(scroll_view, blocks_area, &mut self.state.scroll_state);
    }
}
