//! HTTP implementation of [`DilemmaService`] against the Flask backend.
//!
//! All three endpoints share one configured base URL; request paths are
//! never hardcoded elsewhere.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};

use super::service::{BackendError, DilemmaService, GENERIC_SERVER_ERROR};
use super::types::{AnalyzeRequest, AnalyzeResponse, DilemmaResponse, ErrorBody, StatusResponse};

pub struct HttpBackend {
    base_url: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(base_url: String, timeout: Duration) -> Self {
        Self {
            // Normalized so path joins never produce "//api/..."
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Extracts the server-supplied `error` string from a failure body,
    /// falling back to `fallback` when the body is missing or unparseable.
    async fn error_message(response: reqwest::Response, fallback: String) -> String {
        match response.json::<ErrorBody>().await {
            Ok(ErrorBody { error: Some(msg) }) => msg,
            _ => fallback,
        }
    }
}

#[async_trait]
impl DilemmaService for HttpBackend {
    async fn fetch_status(&self) -> Result<String, BackendError> {
        let response = self
            .client
            .get(format!("{}/api/test", self.base_url))
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        let status = response.status();
        debug!("Status endpoint responded: {}", status);
        if !status.is_success() {
            let message = Self::error_message(response, GENERIC_SERVER_ERROR.to_string()).await;
            return Err(BackendError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: StatusResponse = response
            .json()
            .await
            .map_err(|e| BackendError::Parse(e.to_string()))?;
        Ok(body.message)
    }

    async fn generate_dilemma(&self) -> Result<String, BackendError> {
        info!("Requesting a new dilemma from {}", self.base_url);
        let response = self
            .client
            .post(format!("{}/api/dilemma", self.base_url))
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = Self::error_message(response, GENERIC_SERVER_ERROR.to_string()).await;
            warn!("Dilemma generation failed: HTTP {} - {}", status, message);
            return Err(BackendError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: DilemmaResponse = response
            .json()
            .await
            .map_err(|e| BackendError::Parse(e.to_string()))?;

        // A 2xx body can still carry an application-level failure.
        if let Some(error) = body.error {
            warn!("Dilemma generation returned a logical error: {}", error);
            return Err(BackendError::Logical(error));
        }

        body.dilemma
            .ok_or_else(|| BackendError::Parse("response missing dilemma field".to_string()))
    }

    async fn analyze_comparative(
        &self,
        dilemma: &str,
    ) -> Result<BTreeMap<String, String>, BackendError> {
        info!("Requesting comparative analysis ({} chars)", dilemma.len());
        let response = self
            .client
            .post(format!("{}/api/analyze/comparative", self.base_url))
            .timeout(self.timeout)
            .json(&AnalyzeRequest { dilemma })
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let fallback = format!("HTTP error! status: {}", status.as_u16());
            let message = Self::error_message(response, fallback).await;
            warn!("Comparative analysis failed: HTTP {} - {}", status, message);
            return Err(BackendError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: AnalyzeResponse = response
            .json()
            .await
            .map_err(|e| BackendError::Parse(e.to_string()))?;
        debug!("Analysis returned {} frameworks", body.analyses.len());
        Ok(body.analyses)
    }
}
