//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::backend::{BackendError, DilemmaService};
use crate::core::state::App;

/// A no-op service for tests that don't need real API calls.
pub struct NoopService;

#[async_trait]
impl DilemmaService for NoopService {
    async fn fetch_status(&self) -> Result<String, BackendError> {
        Ok(String::new())
    }

    async fn generate_dilemma(&self) -> Result<String, BackendError> {
        Ok(String::new())
    }

    async fn analyze_comparative(
        &self,
        _dilemma: &str,
    ) -> Result<BTreeMap<String, String>, BackendError> {
        Ok(BTreeMap::new())
    }
}

/// Creates a test App with a NoopService.
pub fn test_app() -> App {
    App::new(Arc::new(NoopService), "http://127.0.0.1:5000".to_string())
}
