use std::future::Future;

use log::{debug, info};
use reqwest::Client;
use url::Url;

use super::error::{FetchError, Result};
use super::normalize::normalize;
use super::wire::{AnalyzeRequest, RawResponse, decode_response};
use crate::components::force_graph::GraphData;

/// Path of the analysis endpoint relative to the page origin.
pub const ANALYZE_ENDPOINT: &str = "/analyze";

/// Anything that can carry an analysis request to the backend.
pub trait AnalyzeBackend {
	fn post_analyze(&self, repo_url: &str) -> impl Future<Output = Result<RawResponse>>;
}

/// `POST`s `{"repo_url": ...}` as JSON. No retry and no timeout.
#[derive(Debug, Clone)]
pub struct HttpBackend {
	client: Client,
	endpoint: Url,
}

impl HttpBackend {
	pub fn new(endpoint: Url) -> Self {
		Self {
			client: Client::new(),
			endpoint,
		}
	}

	/// Backend for `path` on the origin the page was served from.
	pub fn for_page(path: &str) -> Result<Self> {
		let origin = web_sys::window()
			.and_then(|w| w.location().origin().ok())
			.ok_or_else(|| FetchError::Transport("no browser window".into()))?;
		Ok(Self::new(resolve_endpoint(&origin, path)?))
	}
}

impl AnalyzeBackend for HttpBackend {
	async fn post_analyze(&self, repo_url: &str) -> Result<RawResponse> {
		debug!("POST {} for {}", self.endpoint, repo_url);
		let response = self
			.client
			.post(self.endpoint.clone())
			.json(&AnalyzeRequest { repo_url })
			.send()
			.await?;
		let status = response.status().as_u16();
		let body = response.text().await?;
		Ok(RawResponse { status, body })
	}
}

pub fn resolve_endpoint(base: &str, path: &str) -> Result<Url> {
	Ok(Url::parse(base)?.join(path)?)
}

/// Trims the input; an empty URL is refused before anything is sent.
pub fn validate_repo_url(input: &str) -> Result<&str> {
	match input.trim() {
		"" => Err(FetchError::EmptyUrl),
		url => Ok(url),
	}
}

/// Runs one analysis: validate, post, decode, normalize.
pub async fn analyze<B: AnalyzeBackend>(backend: &B, input: &str) -> Result<GraphData> {
	let repo_url = validate_repo_url(input)?;
	let raw = backend.post_analyze(repo_url).await?;
	let (graph, report) = normalize(decode_response(&raw)?);
	if !report.is_clean() {
		info!("analysis of {repo_url} returned a partially malformed graph");
	}
	Ok(graph)
}
