use thiserror::Error;

/// Shown when the backend gives no reason for a failure.
pub const UNKNOWN_ERROR: &str = "unknown error";

#[derive(Error, Debug)]
pub enum FetchError {
	#[error("repository URL is empty")]
	EmptyUrl,

	#[error("invalid endpoint: {0}")]
	Endpoint(#[from] url::ParseError),

	#[error("request failed: {0}")]
	Transport(String),

	#[error("server returned {status}: {detail}")]
	Server { status: u16, detail: String },

	#[error("analysis rejected: {0}")]
	Rejected(String),

	#[error("invalid response: {0}")]
	Decode(#[from] serde_json::Error),
}

impl From<reqwest::Error> for FetchError {
	fn from(err: reqwest::Error) -> Self {
		Self::Transport(err.to_string())
	}
}

impl FetchError {
	/// Status line presented to the user.
	pub fn status_message(&self) -> String {
		match self {
			Self::EmptyUrl => "Enter a GitHub repository URL.".into(),
			Self::Endpoint(err) => format!("Request failed: {err}"),
			Self::Transport(msg) => format!("Request failed: {msg}"),
			Self::Server { detail, .. } | Self::Rejected(detail) => format!("Error: {detail}"),
			Self::Decode(err) => format!("Invalid response: {err}"),
		}
	}
}

pub type Result<T> = std::result::Result<T, FetchError>;
