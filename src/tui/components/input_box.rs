//! # InputBox Component
//!
//! The custom-dilemma override field.
//!
//! ## Responsibilities
//!
//! - Capture text input (chars, paste, backspace/delete, cursor movement)
//! - Emit `Submit` on Enter with a copy of the buffer
//!
//! ## State Management
//!
//! The buffer is internal presentation state. Unlike a chat input it is NOT
//! cleared on submit: the override stays visible and keeps taking precedence
//! over the generated dilemma until the user edits it, matching the
//! override semantics of the analyze operation. The parent receives the
//! buffer text inside the `Submit` event and never reads it directly.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::widgets::{Block, Paragraph, Wrap};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;
/// Total horizontal space consumed by borders (1 left + 1 right).
const HORIZONTAL_OVERHEAD: u16 = 2;
/// Cap on visible content lines before the box stops growing.
const MAX_VISIBLE_LINES: u16 = 4;

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// User submitted (Enter pressed). Carries the current buffer; the
    /// buffer itself is left untouched.
    Submit(String),
    /// Text content changed (optional, if parent needs to know)
    ContentChanged,
}

pub struct InputBox {
    /// Text buffer (internal state)
    pub buffer: String,
    /// Cursor position as a byte offset into `buffer`
    cursor_pos: usize,
}

impl Default for InputBox {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBox {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            cursor_pos: 0,
        }
    }

    /// Required height for the current buffer, clamped to the viewport cap.
    pub fn calculate_height(&self, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            return 1 + VERTICAL_OVERHEAD;
        }
        let lines = wrapped_lines(&self.buffer, content_width).len().max(1) as u16;
        lines.min(MAX_VISIBLE_LINES) + VERTICAL_OVERHEAD
    }

    /// Screen position of the cursor inside `area`, derived by wrapping the
    /// text before the cursor with the same options the renderer uses.
    fn cursor_screen_pos(&self, area: Rect) -> (u16, u16) {
        let content_width = area.width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            return (area.x + 1, area.y + 1);
        }
        let before = &self.buffer[..self.cursor_pos];
        let lines = wrapped_lines(before, content_width);
        let (row, col) = match lines.last() {
            Some(last) => (lines.len() as u16 - 1, last.chars().count() as u16),
            None => (0, 0),
        };
        let row = row.min(MAX_VISIBLE_LINES - 1);
        let col = col.min(content_width);
        (area.x + 1 + col, area.y + 1 + row)
    }
}

fn wrapped_lines(text: &str, width: u16) -> Vec<std::borrow::Cow<'_, str>> {
    let options = textwrap::Options::new(width as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace);
    textwrap::wrap(text, options)
}

fn prev_char_boundary(s: &str, pos: usize) -> usize {
    let mut p = pos.saturating_sub(1);
    while p > 0 && !s.is_char_boundary(p) {
        p -= 1;
    }
    p
}

fn next_char_boundary(s: &str, pos: usize) -> usize {
    let mut p = (pos + 1).min(s.len());
    while p < s.len() && !s.is_char_boundary(p) {
        p += 1;
    }
    p
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(ratatui::widgets::BorderType::Rounded)
            .title("Or, enter your own dilemma (Enter analyzes)");

        let input = Paragraph::new(self.buffer.as_str())
            .block(block)
            .style(ratatui::style::Style::default().fg(ratatui::style::Color::Green))
            .wrap(Wrap { trim: false });

        frame.render_widget(input, area);
        frame.set_cursor_position(self.cursor_screen_pos(area));
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor_pos, *c);
                self.cursor_pos += c.len_utf8();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                self.buffer.insert_str(self.cursor_pos, text);
                self.cursor_pos += text.len();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace => {
                if self.cursor_pos > 0 {
                    let prev = prev_char_boundary(&self.buffer, self.cursor_pos);
                    self.buffer.drain(prev..self.cursor_pos);
                    self.cursor_pos = prev;
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::Delete => {
                if self.cursor_pos < self.buffer.len() {
                    let next = next_char_boundary(&self.buffer, self.cursor_pos);
                    self.buffer.drain(self.cursor_pos..next);
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::CursorLeft => {
                if self.cursor_pos > 0 {
                    self.cursor_pos = prev_char_boundary(&self.buffer, self.cursor_pos);
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::CursorRight => {
                if self.cursor_pos < self.buffer.len() {
                    self.cursor_pos = next_char_boundary(&self.buffer, self.cursor_pos);
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::CursorHome => (self.cursor_pos != 0).then(|| {
                self.cursor_pos = 0;
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorEnd => (self.cursor_pos != self.buffer.len()).then(|| {
                self.cursor_pos = self.buffer.len();
                InputEvent::ContentChanged
            }),
            // Enter always submits: an empty buffer means "analyze the
            // generated dilemma", and an empty effective text is the
            // reducer's validation case, not ours.
            TuiEvent::Submit => Some(InputEvent::Submit(self.buffer.clone())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_input_box_new() {
        let input = InputBox::new();
        assert!(input.buffer.is_empty());
        assert_eq!(input.cursor_pos, 0);
    }

    #[test]
    fn test_handle_input() {
        let mut input = InputBox::new();

        let res = input.handle_event(&TuiEvent::InputChar('a'));
        assert_eq!(res, Some(InputEvent::ContentChanged));
        assert_eq!(input.buffer, "a");

        let res = input.handle_event(&TuiEvent::InputChar('b'));
        assert_eq!(res, Some(InputEvent::ContentChanged));
        assert_eq!(input.buffer, "ab");

        let res = input.handle_event(&TuiEvent::Backspace);
        assert_eq!(res, Some(InputEvent::ContentChanged));
        assert_eq!(input.buffer, "a");
    }

    #[test]
    fn test_submit_keeps_buffer() {
        let mut input = InputBox::new();
        input.buffer = "custom X".to_string();
        input.cursor_pos = input.buffer.len();

        let res = input.handle_event(&TuiEvent::Submit);
        assert_eq!(res, Some(InputEvent::Submit("custom X".to_string())));
        // The override persists across submits.
        assert_eq!(input.buffer, "custom X");
    }

    #[test]
    fn test_submit_empty_buffer_still_emits() {
        let mut input = InputBox::new();
        let res = input.handle_event(&TuiEvent::Submit);
        assert_eq!(res, Some(InputEvent::Submit(String::new())));
    }

    #[test]
    fn test_cursor_movement_and_mid_buffer_edit() {
        let mut input = InputBox::new();
        for c in "abc".chars() {
            input.handle_event(&TuiEvent::InputChar(c));
        }
        input.handle_event(&TuiEvent::CursorLeft);
        input.handle_event(&TuiEvent::CursorLeft);
        input.handle_event(&TuiEvent::InputChar('X'));
        assert_eq!(input.buffer, "aXbc");

        input.handle_event(&TuiEvent::CursorHome);
        input.handle_event(&TuiEvent::Delete);
        assert_eq!(input.buffer, "Xbc");

        input.handle_event(&TuiEvent::CursorEnd);
        input.handle_event(&TuiEvent::Backspace);
        assert_eq!(input.buffer, "Xb");
    }

    #[test]
    fn test_multibyte_boundary_handling() {
        let mut input = InputBox::new();
        input.handle_event(&TuiEvent::InputChar('é'));
        input.handle_event(&TuiEvent::InputChar('x'));
        input.handle_event(&TuiEvent::CursorLeft);
        input.handle_event(&TuiEvent::CursorLeft);
        assert_eq!(input.cursor_pos, 0);
        input.handle_event(&TuiEvent::Delete);
        assert_eq!(input.buffer, "x");
    }

    #[test]
    fn test_calculate_height_grows_then_caps() {
        let mut input = InputBox::new();
        assert_eq!(input.calculate_height(20), 1 + VERTICAL_OVERHEAD);

        input.buffer = "word ".repeat(50);
        assert_eq!(
            input.calculate_height(20),
            MAX_VISIBLE_LINES + VERTICAL_OVERHEAD
        );
    }

    #[test]
    fn test_render_shows_buffer() {
        let backend = TestBackend::new(50, 3);
        let mut terminal = Terminal::new(backend).unwrap();

        let mut input = InputBox::new();
        input.buffer = "my dilemma".to_string();

        terminal
            .draw(|f| {
                input.render(f, f.area());
            })
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("my dilemma"));
    }
}
