//! # DilemmaPanel Component
//!
//! Shows the currently active dilemma, or a placeholder prompting the user
//! to generate one. The generation lifecycle's inline error renders here,
//! directly beneath the control that triggered it.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};

use crate::core::state::RequestPhase;
use crate::tui::component::Component;

/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;
/// Total horizontal space consumed by borders (1 left + 1 right).
const HORIZONTAL_OVERHEAD: u16 = 2;
/// Cap on the panel height so long dilemmas don't crowd out the analysis.
pub const MAX_PANEL_HEIGHT: u16 = 10;

const PLACEHOLDER: &str = "Press Ctrl+G to generate a new dilemma.";

/// Stateless: props come from core state each frame.
pub struct DilemmaPanel<'a> {
    pub dilemma: &'a str,
    pub phase: &'a RequestPhase,
}

impl<'a> DilemmaPanel<'a> {
    pub fn new(dilemma: &'a str, phase: &'a RequestPhase) -> Self {
        Self { dilemma, phase }
    }

    fn body_text(&self) -> &str {
        match self.phase {
            RequestPhase::Loading => "Generating…",
            _ if self.dilemma.trim().is_empty() => PLACEHOLDER,
            _ => self.dilemma,
        }
    }

    /// Predicted height including borders and the optional error line,
    /// clamped to [`MAX_PANEL_HEIGHT`]. Uses `textwrap` with options that
    /// match Ratatui's `Paragraph` wrapping so the layout never truncates
    /// a panel it believed would fit.
    pub fn calculate_height(&self, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            return 1;
        }

        let options = || {
            textwrap::Options::new(content_width as usize)
                .break_words(true)
                .word_separator(textwrap::WordSeparator::AsciiSpace)
        };

        let body = self.body_text().trim();
        let mut lines = textwrap::wrap(body, options()).len().max(1) as u16;
        if let Some(error) = self.phase.error() {
            lines += textwrap::wrap(&format!("Error: {error}"), options()).len() as u16;
        }
        (lines + VERTICAL_OVERHEAD).min(MAX_PANEL_HEIGHT)
    }
}

impl<'a> Component for DilemmaPanel<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let body = self.body_text().trim();
        let body_style = match self.phase {
            RequestPhase::Loading => Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
            _ if self.dilemma.trim().is_empty() => Style::default().fg(Color::DarkGray),
            _ => Style::default().fg(Color::Cyan),
        };

        let mut lines: Vec<Line> = body
            .lines()
            .map(|l| Line::from(Span::styled(l.to_string(), body_style)))
            .collect();
        if let Some(error) = self.phase.error() {
            lines.push(Line::from(Span::styled(
                format!("Error: {error}"),
                Style::default().fg(Color::Red),
            )));
        }

        let paragraph = Paragraph::new(lines)
            .block(
                Block::bordered()
                    .border_type(ratatui::widgets::BorderType::Rounded)
                    .title("dilemma"),
            )
            .wrap(Wrap { trim: true });

        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_to_text(panel: &mut DilemmaPanel, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                panel.render(f, f.area());
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_placeholder_when_empty() {
        let phase = RequestPhase::Idle;
        let mut panel = DilemmaPanel::new("", &phase);
        let text = render_to_text(&mut panel, 60, 5);
        assert!(text.contains("Ctrl+G"));
    }

    #[test]
    fn test_shows_dilemma_text() {
        let phase = RequestPhase::Idle;
        let mut panel = DilemmaPanel::new("Steal the medicine?", &phase);
        let text = render_to_text(&mut panel, 60, 5);
        assert!(text.contains("Steal the medicine?"));
        assert!(!text.contains("Ctrl+G"));
    }

    #[test]
    fn test_loading_replaces_body() {
        let phase = RequestPhase::Loading;
        let mut panel = DilemmaPanel::new("", &phase);
        let text = render_to_text(&mut panel, 60, 5);
        assert!(text.contains("Generating"));
    }

    #[test]
    fn test_error_renders_inline() {
        let phase = RequestPhase::Errored("boom".to_string());
        let mut panel = DilemmaPanel::new("", &phase);
        let text = render_to_text(&mut panel, 60, 6);
        assert!(text.contains("Error: boom"));
    }

    #[test]
    fn test_calculate_height_single_line() {
        let phase = RequestPhase::Idle;
        let panel = DilemmaPanel::new("short", &phase);
        // 1 content line + 2 borders
        assert_eq!(panel.calculate_height(60), 3);
    }

    #[test]
    fn test_calculate_height_counts_error_line() {
        let phase = RequestPhase::Errored("boom".to_string());
        let panel = DilemmaPanel::new("short", &phase);
        // 1 content line + 1 error line + 2 borders
        assert_eq!(panel.calculate_height(60), 4);
    }

    #[test]
    fn test_calculate_height_clamps_long_content() {
        let phase = RequestPhase::Idle;
        let long = "word ".repeat(200);
        let panel = DilemmaPanel::new(&long, &phase);
        assert_eq!(panel.calculate_height(20), MAX_PANEL_HEIGHT);
    }

    #[test]
    fn test_calculate_height_zero_width() {
        let phase = RequestPhase::Idle;
        let panel = DilemmaPanel::new("text", &phase);
        assert_eq!(panel.calculate_height(0), 1);
    }
}
