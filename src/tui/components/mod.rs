//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! Two patterns, mirroring the two kinds of view state:
//!
//! **Stateless (props-based)** — created fresh each frame from core state:
//! - `TitleBar`: status line with backend address and loading spinner
//! - `DilemmaPanel`: the current dilemma text plus its generation error
//!
//! **Stateful (event-driven)** — hold presentation state and emit events:
//! - `InputBox`: the custom-dilemma override buffer
//! - `AnalysisView`: scrollable per-framework analysis blocks
//!
//! Components receive external data as props, never by reaching into global
//! state, which keeps dependencies explicit and each file testable on its
//! own with `TestBackend`.

pub mod analysis_view;
pub mod dilemma_panel;
pub mod input_box;
pub mod title_bar;

pub use analysis_view::{AnalysisView, AnalysisViewState};
pub use dilemma_panel::DilemmaPanel;
pub use input_box::{InputBox, InputEvent};
pub use title_bar::TitleBar;
