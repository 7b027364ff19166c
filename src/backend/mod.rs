pub mod http;
pub mod service;
pub mod types;

pub use http::HttpBackend;
pub use service::{BackendError, DilemmaService};
pub use types::{AnalyzeRequest, AnalyzeResponse, DilemmaResponse, ErrorBody, StatusResponse};
