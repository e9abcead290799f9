use std::fmt;

use serde::{Deserialize, Deserializer};

/// Identifier of a code entity. The backend may send strings or integers.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub String);

impl NodeId {
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for NodeId {
	fn from(s: &str) -> Self {
		Self(s.to_owned())
	}
}

impl From<String> for NodeId {
	fn from(s: String) -> Self {
		Self(s)
	}
}

impl<'de> Deserialize<'de> for NodeId {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		#[derive(Deserialize)]
		#[serde(untagged)]
		enum Raw {
			Text(String),
			Int(i64),
		}

		Ok(match Raw::deserialize(deserializer)? {
			Raw::Text(s) => Self(s),
			Raw::Int(n) => Self(n.to_string()),
		})
	}
}

/// Kind of definition a node stands for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
	Class,
	Function,
	Method,
	#[default]
	#[serde(other)]
	Unknown,
}

impl NodeKind {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Class => "class",
			Self::Function => "function",
			Self::Method => "method",
			Self::Unknown => "unknown",
		}
	}
}

impl fmt::Display for NodeKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	pub id: NodeId,
	pub label: String,
	pub fqname: String,
	pub kind: NodeKind,
	/// `file:lineno` when the backend knows where the definition lives.
	pub location: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GraphLink {
	pub source: NodeId,
	pub target: NodeId,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub links: Vec<GraphLink>,
}

impl GraphData {
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn node_id_accepts_strings_and_integers() {
		let ids: Vec<NodeId> = serde_json::from_str(r#"["a", 7]"#).unwrap();
		assert_eq!(ids, vec![NodeId::from("a"), NodeId::from("7")]);
	}

	#[test]
	fn unknown_kind_falls_back() {
		let kinds: Vec<NodeKind> =
			serde_json::from_str(r#"["class", "function", "method", "module"]"#).unwrap();
		assert_eq!(
			kinds,
			vec![
				NodeKind::Class,
				NodeKind::Function,
				NodeKind::Method,
				NodeKind::Unknown
			]
		);
	}
}
