//! Talking to the `/analyze` backend and turning its answer into a graph.

pub mod client;
pub mod error;
pub mod normalize;
pub mod session;
pub mod wire;

pub use client::{ANALYZE_ENDPOINT, AnalyzeBackend, HttpBackend, analyze};
pub use error::FetchError;
pub use session::AnalysisSession;
