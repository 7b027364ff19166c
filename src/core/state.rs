//! # Application State
//!
//! Core business state for Quandary. This module contains domain state only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── service: Arc<dyn DilemmaService>   // HTTP backend
//! ├── status_message: String             // startup message from /api/test
//! ├── dilemma: String                    // current dilemma text
//! ├── generation: RequestPhase           // dilemma request lifecycle
//! ├── analyses: Option<BTreeMap>         // framework → analysis text
//! └── analysis: RequestPhase             // analysis request lifecycle
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::backend::DilemmaService;

/// Lifecycle of one independent request kind.
///
/// Exactly one request of each kind may be in flight: a trigger action is
/// rejected by the reducer whenever its lifecycle is `Loading`, so duplicate
/// requests cannot race regardless of how the trigger was delivered.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestPhase {
    #[default]
    Idle,
    Loading,
    /// Failed with a human-readable message. Sticky until the next trigger.
    Errored(String),
}

impl RequestPhase {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestPhase::Loading)
    }

    /// The error message, if this lifecycle ended in failure.
    pub fn error(&self) -> Option<&str> {
        match self {
            RequestPhase::Errored(msg) => Some(msg.as_str()),
            _ => None,
        }
    }
}

pub struct App {
    pub service: Arc<dyn DilemmaService>,
    /// Backend base address, displayed in the title bar.
    pub base_url: String,
    /// Status message fetched once at startup (empty until it arrives).
    pub status_message: String,
    /// Currently active dilemma text, replaced wholesale on each successful
    /// generation. Empty = nothing generated yet (or cleared by a trigger).
    pub dilemma: String,
    pub generation: RequestPhase,
    /// Result of the last comparative analysis. `None` = nothing to render.
    pub analyses: Option<BTreeMap<String, String>>,
    pub analysis: RequestPhase,
}

impl App {
    pub fn new(service: Arc<dyn DilemmaService>, base_url: String) -> Self {
        Self {
            service,
            base_url,
            status_message: String::new(),
            dilemma: String::new(),
            generation: RequestPhase::Idle,
            analyses: None,
            analysis: RequestPhase::Idle,
        }
    }

    /// True while either lifecycle has a request in flight.
    pub fn is_busy(&self) -> bool {
        self.generation.is_loading() || self.analysis.is_loading()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.base_url, "http://127.0.0.1:5000");
        assert!(app.status_message.is_empty());
        assert!(app.dilemma.is_empty());
        assert_eq!(app.generation, RequestPhase::Idle);
        assert_eq!(app.analysis, RequestPhase::Idle);
        assert!(app.analyses.is_none());
        assert!(!app.is_busy());
    }

    #[test]
    fn test_request_phase_helpers() {
        assert!(RequestPhase::Loading.is_loading());
        assert!(!RequestPhase::Idle.is_loading());
        assert_eq!(RequestPhase::Errored("boom".to_string()).error(), Some("boom"));
        assert_eq!(RequestPhase::Idle.error(), None);
    }
}
