pub mod provider;
pub mod http;

pub use provider::{ClassificationService, ImageAnalysisService};
pub use http::HttpBackend;
