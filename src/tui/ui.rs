use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::Span;

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{AnalysisView, DilemmaPanel, TitleBar};

const KEY_HINTS: &str = "Ctrl+G generate · Enter analyze · ↑/↓ scroll · Esc quit";

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};

    let width = frame.area().width;
    let mut dilemma_panel = DilemmaPanel::new(&app.dilemma, &app.generation);
    let layout = Layout::vertical([
        Length(1),
        Length(dilemma_panel.calculate_height(width)),
        Length(tui.input_box.calculate_height(width)),
        Min(0),
        Length(1),
    ]);
    let [title_area, dilemma_area, input_area, analysis_area, footer_area] =
        layout.areas(frame.area());

    let spinner = app.is_busy().then_some(spinner_frame);
    TitleBar::new(app.base_url.clone(), app.status_message.clone(), spinner)
        .render(frame, title_area);

    dilemma_panel.render(frame, dilemma_area);

    AnalysisView::new(app.analyses.as_ref(), &app.analysis, &mut tui.analysis)
        .render(frame, analysis_area);

    frame.render_widget(
        Span::styled(KEY_HINTS, Style::default().fg(Color::DarkGray)),
        footer_area,
    );

    // Last so the terminal cursor lands in the input box.
    tui.input_box.render(frame, input_area);
}
