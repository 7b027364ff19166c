//! Serde bodies for the dilemma backend's JSON endpoints.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// `GET /api/test` success body.
#[derive(Deserialize, Debug)]
pub struct StatusResponse {
    pub message: String,
}

/// `POST /api/dilemma` body.
///
/// The backend signals logical failure either with a non-2xx status or with
/// a 2xx body carrying `error` instead of `dilemma`, so both fields are
/// optional and the client decides which case it is looking at.
#[derive(Deserialize, Debug)]
pub struct DilemmaResponse {
    pub dilemma: Option<String>,
    pub error: Option<String>,
}

/// `POST /api/analyze/comparative` request body.
#[derive(Serialize, Debug)]
pub struct AnalyzeRequest<'a> {
    pub dilemma: &'a str,
}

/// `POST /api/analyze/comparative` success body: framework name → analysis.
#[derive(Deserialize, Debug)]
pub struct AnalyzeResponse {
    pub analyses: BTreeMap<String, String>,
}

/// Error body shared by all endpoints on failure: `{ "error": "..." }`.
#[derive(Deserialize, Debug)]
pub struct ErrorBody {
    pub error: Option<String>,
}
