//! Upstream client adapters

/// HTTP client speaking the provider dialects
pub mod http;

pub use http::HttpUpstreamClient;
