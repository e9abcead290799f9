//! JSON shapes exchanged with the `/analyze` endpoint.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::error::{FetchError, Result, UNKNOWN_ERROR};
use crate::components::force_graph::{NodeId, NodeKind};

#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeRequest<'a> {
	pub repo_url: &'a str,
}

/// Node record as the backend sends it. Missing ids are left for
/// normalization to drop.
#[derive(Debug, Clone, Deserialize)]
pub struct RawNode {
	#[serde(default)]
	pub id: Option<NodeId>,
	#[serde(default)]
	pub label: Option<String>,
	#[serde(default)]
	pub fqname: Option<String>,
	#[serde(rename = "type", default, deserialize_with = "lenient_kind")]
	pub kind: NodeKind,
	#[serde(default)]
	pub file: Option<String>,
	#[serde(default)]
	pub lineno: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawEdge {
	#[serde(default)]
	pub source: Option<NodeId>,
	#[serde(default)]
	pub target: Option<NodeId>,
}

/// `null` or a non-string `type` reads as [`NodeKind::Unknown`].
fn lenient_kind<'de, D>(deserializer: D) -> std::result::Result<NodeKind, D::Error>
where
	D: Deserializer<'de>,
{
	let value = Value::deserialize(deserializer)?;
	Ok(NodeKind::deserialize(value).unwrap_or_default())
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawGraph {
	#[serde(default)]
	pub nodes: Vec<RawNode>,
	#[serde(default)]
	pub edges: Vec<RawEdge>,
}

#[derive(Debug, Deserialize)]
struct Envelope {
	ok: bool,
	#[serde(default)]
	data: Option<RawGraph>,
	#[serde(default)]
	detail: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
	#[serde(default)]
	detail: Option<Value>,
}

/// Status code and body of an HTTP response, before interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
	pub status: u16,
	pub body: String,
}

impl RawResponse {
	pub fn new(status: u16, body: impl Into<String>) -> Self {
		Self {
			status,
			body: body.into(),
		}
	}

	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}
}

fn detail_text(detail: Option<Value>) -> String {
	match detail {
		Some(Value::String(s)) if !s.is_empty() => s,
		Some(Value::Null) | None => UNKNOWN_ERROR.into(),
		Some(Value::String(_)) => UNKNOWN_ERROR.into(),
		Some(other) => other.to_string(),
	}
}

/// Interprets a response under the `{ok, data, detail}` contract.
pub fn decode_response(raw: &RawResponse) -> Result<RawGraph> {
	if !raw.is_success() {
		let detail = serde_json::from_str::<ErrorBody>(&raw.body)
			.ok()
			.and_then(|b| b.detail);
		return Err(FetchError::Server {
			status: raw.status,
			detail: detail_text(detail),
		});
	}

	let envelope: Envelope = serde_json::from_str(&raw.body)?;
	match (envelope.ok, envelope.data) {
		(true, Some(data)) => Ok(data),
		(true, None) => Ok(RawGraph::default()),
		(false, _) => Err(FetchError::Rejected(detail_text(envelope.detail))),
	}
}
