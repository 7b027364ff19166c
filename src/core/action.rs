//! # Actions
//!
//! Everything that can happen in Quandary becomes an `Action`.
//! User hits Ctrl+G? That's `Action::GenerateRequested`.
//! The backend responds? That's `Action::GenerateResolved(result)`.
//!
//! The `update()` function takes the current state and an action and applies
//! the transition. No side effects here. I/O happens in the TUI layer, which
//! spawns requests in response to the returned `Effect`.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! This makes the whole request lifecycle testable without a terminal or a
//! network: feed actions, assert on state and effects.

use std::collections::BTreeMap;

use crate::backend::BackendError;
use crate::core::state::{App, RequestPhase};

/// Message shown when analyze is invoked with no text at all.
pub const EMPTY_DILEMMA_ERROR: &str = "Please generate or enter a dilemma first.";

#[derive(Debug)]
pub enum Action {
    /// The startup status fetch succeeded. Failures never reach the reducer:
    /// the spawning task logs them and drops them (non-fatal by design).
    StatusResolved(String),
    /// User asked for a new dilemma.
    GenerateRequested,
    GenerateResolved(Result<String, BackendError>),
    /// User asked for a comparative analysis. `override_text` is whatever is
    /// in the custom-dilemma input; it takes precedence over the generated
    /// dilemma when non-blank.
    AnalyzeRequested { override_text: String },
    AnalyzeResolved(Result<BTreeMap<String, String>, BackendError>),
    Quit,
}

/// What the event loop must do after a state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    SpawnGenerate,
    /// Spawn an analysis request for the effective dilemma text.
    SpawnAnalyze(String),
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::StatusResolved(message) => {
            app.status_message = message;
            Effect::None
        }

        Action::GenerateRequested => {
            if app.generation.is_loading() {
                // A generation is already in flight. Rejecting here (rather
                // than relying on the UI to suppress the trigger) removes the
                // duplicate-request race entirely.
                log::debug!("Generate rejected: request already in flight");
                return Effect::None;
            }
            app.generation = RequestPhase::Loading;
            app.dilemma.clear();
            Effect::SpawnGenerate
        }

        Action::GenerateResolved(result) => {
            // The phase leaves Loading in both branches, unconditionally.
            match result {
                Ok(dilemma) => {
                    app.dilemma = dilemma;
                    app.generation = RequestPhase::Idle;
                }
                Err(e) => {
                    log::warn!("Dilemma generation failed: {}", e);
                    app.generation = RequestPhase::Errored(e.user_message());
                }
            }
            Effect::None
        }

        Action::AnalyzeRequested { override_text } => {
            if app.analysis.is_loading() {
                log::debug!("Analyze rejected: request already in flight");
                return Effect::None;
            }
            // Trimmed override wins over the generated dilemma.
            let trimmed = override_text.trim();
            let effective = if trimmed.is_empty() {
                app.dilemma.clone()
            } else {
                trimmed.to_string()
            };
            if effective.is_empty() {
                // Client-side validation: no request is issued. The previous
                // result (if any) stays on screen.
                app.analysis = RequestPhase::Errored(EMPTY_DILEMMA_ERROR.to_string());
                return Effect::None;
            }
            app.analysis = RequestPhase::Loading;
            app.analyses = None;
            Effect::SpawnAnalyze(effective)
        }

        Action::AnalyzeResolved(result) => {
            match result {
                Ok(analyses) => {
                    app.analyses = Some(analyses);
                    app.analysis = RequestPhase::Idle;
                }
                Err(e) => {
                    log::warn!("Comparative analysis failed: {}", e);
                    app.analysis = RequestPhase::Errored(e.user_message());
                }
            }
            Effect::None
        }

        Action::Quit => Effect::Quit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;

    fn analyses_of(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_status_resolved_updates_message() {
        let mut app = test_app();
        let effect = update(&mut app, Action::StatusResolved("hello".to_string()));
        assert_eq!(effect, Effect::None);
        assert_eq!(app.status_message, "hello");
    }

    #[test]
    fn test_generate_request_enters_loading_and_clears_dilemma() {
        let mut app = test_app();
        app.dilemma = "old dilemma".to_string();
        app.generation = RequestPhase::Errored("stale".to_string());

        let effect = update(&mut app, Action::GenerateRequested);

        assert_eq!(effect, Effect::SpawnGenerate);
        assert!(app.generation.is_loading());
        assert!(app.dilemma.is_empty());
        assert_eq!(app.generation.error(), None);
    }

    #[test]
    fn test_generate_rejected_while_loading() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::GenerateRequested), Effect::SpawnGenerate);
        // Second trigger before the first resolves is rejected outright.
        assert_eq!(update(&mut app, Action::GenerateRequested), Effect::None);
        assert!(app.generation.is_loading());
    }

    #[test]
    fn test_generate_success_stores_dilemma_and_returns_to_idle() {
        let mut app = test_app();
        update(&mut app, Action::GenerateRequested);
        update(&mut app, Action::GenerateResolved(Ok("D".to_string())));
        assert_eq!(app.dilemma, "D");
        assert_eq!(app.generation, RequestPhase::Idle);
    }

    #[test]
    fn test_generate_error_surfaces_server_message() {
        let mut app = test_app();
        update(&mut app, Action::GenerateRequested);
        update(
            &mut app,
            Action::GenerateResolved(Err(BackendError::Api {
                status: 500,
                message: "boom".to_string(),
            })),
        );
        assert_eq!(app.generation.error(), Some("boom"));
        assert!(!app.generation.is_loading());
        assert!(app.dilemma.is_empty());
    }

    #[test]
    fn test_generate_logical_error_takes_same_path_as_http_error() {
        let mut app = test_app();
        update(&mut app, Action::GenerateRequested);
        update(
            &mut app,
            Action::GenerateResolved(Err(BackendError::Logical("logical fail".to_string()))),
        );
        assert_eq!(app.generation.error(), Some("logical fail"));
        assert!(!app.generation.is_loading());
    }

    #[test]
    fn test_analyze_empty_input_errors_without_request() {
        let mut app = test_app();
        let effect = update(
            &mut app,
            Action::AnalyzeRequested {
                override_text: String::new(),
            },
        );
        assert_eq!(effect, Effect::None);
        assert_eq!(app.analysis.error(), Some(EMPTY_DILEMMA_ERROR));
    }

    #[test]
    fn test_analyze_whitespace_override_counts_as_empty() {
        let mut app = test_app();
        let effect = update(
            &mut app,
            Action::AnalyzeRequested {
                override_text: "   \n  ".to_string(),
            },
        );
        assert_eq!(effect, Effect::None);
        assert_eq!(app.analysis.error(), Some(EMPTY_DILEMMA_ERROR));
    }

    #[test]
    fn test_analyze_validation_keeps_prior_result() {
        let mut app = test_app();
        app.analyses = Some(analyses_of(&[("Utilitarianism", "u")]));
        update(
            &mut app,
            Action::AnalyzeRequested {
                override_text: String::new(),
            },
        );
        // Validation failure happens before the result is cleared.
        assert!(app.analyses.is_some());
    }

    #[test]
    fn test_analyze_override_takes_precedence_over_dilemma() {
        let mut app = test_app();
        app.dilemma = "D".to_string();
        let effect = update(
            &mut app,
            Action::AnalyzeRequested {
                override_text: "  custom X  ".to_string(),
            },
        );
        assert_eq!(effect, Effect::SpawnAnalyze("custom X".to_string()));
        assert!(app.analysis.is_loading());
        assert!(app.analyses.is_none());
    }

    #[test]
    fn test_analyze_falls_back_to_generated_dilemma() {
        let mut app = test_app();
        app.dilemma = "D".to_string();
        let effect = update(
            &mut app,
            Action::AnalyzeRequested {
                override_text: String::new(),
            },
        );
        assert_eq!(effect, Effect::SpawnAnalyze("D".to_string()));
    }

    #[test]
    fn test_analyze_rejected_while_loading() {
        let mut app = test_app();
        app.dilemma = "D".to_string();
        update(
            &mut app,
            Action::AnalyzeRequested {
                override_text: String::new(),
            },
        );
        let effect = update(
            &mut app,
            Action::AnalyzeRequested {
                override_text: String::new(),
            },
        );
        assert_eq!(effect, Effect::None);
        assert!(app.analysis.is_loading());
    }

    #[test]
    fn test_analyze_success_replaces_prior_result() {
        let mut app = test_app();
        app.dilemma = "D".to_string();

        // First round.
        update(
            &mut app,
            Action::AnalyzeRequested {
                override_text: String::new(),
            },
        );
        update(
            &mut app,
            Action::AnalyzeResolved(Ok(analyses_of(&[
                ("Utilitarianism", "first"),
                ("Deontology", "first"),
            ]))),
        );

        // Second round with the same backend response: identical result,
        // never an accumulation of stale entries.
        update(
            &mut app,
            Action::AnalyzeRequested {
                override_text: String::new(),
            },
        );
        assert!(app.analyses.is_none(), "result cleared while loading");
        update(
            &mut app,
            Action::AnalyzeResolved(Ok(analyses_of(&[
                ("Utilitarianism", "first"),
                ("Deontology", "first"),
            ]))),
        );

        let analyses = app.analyses.as_ref().unwrap();
        assert_eq!(analyses.len(), 2);
        assert_eq!(app.analysis, RequestPhase::Idle);
    }

    #[test]
    fn test_analyze_error_leaves_loading_with_message() {
        let mut app = test_app();
        app.dilemma = "D".to_string();
        update(
            &mut app,
            Action::AnalyzeRequested {
                override_text: String::new(),
            },
        );
        update(
            &mut app,
            Action::AnalyzeResolved(Err(BackendError::Api {
                status: 500,
                message: "HTTP error! status: 500".to_string(),
            })),
        );
        assert_eq!(app.analysis.error(), Some("HTTP error! status: 500"));
        assert!(app.analyses.is_none());
    }

    #[test]
    fn test_quit_returns_quit_effect() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
