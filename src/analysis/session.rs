use log::{error, info};

use super::client::validate_repo_url;
use super::error::Result;
use crate::components::force_graph::GraphData;

pub const IDLE_STATUS: &str = "Paste a public GitHub repository URL and press Analyze.";
pub const LOADING_STATUS: &str = "Cloning and analyzing repository...";

/// Page-level state of the analysis workflow.
///
/// Requests are neither de-duplicated nor cancelled, so when two analyses
/// overlap, whichever resolves last decides the graph on screen.
#[derive(Debug, Clone)]
pub struct AnalysisSession {
	status: String,
	pending: usize,
	graph: Option<GraphData>,
	revision: u64,
}

impl Default for AnalysisSession {
	fn default() -> Self {
		Self {
			status: IDLE_STATUS.into(),
			pending: 0,
			graph: None,
			revision: 0,
		}
	}
}

impl AnalysisSession {
	/// Starts a request for `input`, or reports why none was started.
	pub fn begin(&mut self, input: &str) -> Option<String> {
		match validate_repo_url(input) {
			Ok(url) => {
				self.pending += 1;
				self.status = LOADING_STATUS.into();
				info!("analyzing {url}");
				Some(url.to_owned())
			}
			Err(err) => {
				self.status = err.status_message();
				None
			}
		}
	}

	/// Applies a finished request. Returns whether a new graph was installed.
	pub fn finish(&mut self, result: Result<GraphData>) -> bool {
		self.pending = self.pending.saturating_sub(1);
		match result {
			Ok(graph) => {
				self.status = format!("Nodes: {}, edges: {}", graph.nodes.len(), graph.links.len());
				self.graph = Some(graph);
				self.revision += 1;
				true
			}
			Err(err) => {
				error!("analysis failed: {err}");
				self.status = err.status_message();
				false
			}
		}
	}

	pub fn status(&self) -> &str {
		&self.status
	}

	/// True while any request is in flight; the trigger stays disabled.
	pub fn is_loading(&self) -> bool {
		self.pending > 0
	}

	pub fn graph(&self) -> Option<&GraphData> {
		self.graph.as_ref()
	}

	/// Bumped on every installed graph, including a repeat of the same repository.
	pub fn revision(&self) -> u64 {
		self.revision
	}
}

#[cfg(test)]
mod tests {
	use futures::executor::block_on;

	use super::*;
	use crate::analysis::client::analyze;
	use crate::analysis::client::tests::{StubBackend, TWO_NODES};
	use crate::analysis::error::FetchError;
	use crate::components::force_graph::{GraphNode, NodeKind};

	fn graph_of(ids: &[&str]) -> GraphData {
		GraphData {
			nodes: ids
				.iter()
				.map(|id| GraphNode {
					id: (*id).into(),
					label: (*id).into(),
					fqname: (*id).into(),
					kind: NodeKind::Function,
					location: None,
				})
				.collect(),
			links: vec![],
		}
	}

	#[test]
	fn empty_input_is_reported_inline() {
		let mut session = AnalysisSession::default();
		assert_eq!(session.begin("   "), None);
		assert_eq!(session.status(), "Enter a GitHub repository URL.");
		assert!(!session.is_loading());
	}

	#[test]
	fn loading_spans_the_request() {
		let mut session = AnalysisSession::default();
		let url = session.begin(" https://github.com/o/r ").unwrap();
		assert_eq!(url, "https://github.com/o/r");
		assert!(session.is_loading());
		assert_eq!(session.status(), LOADING_STATUS);

		assert!(session.finish(Ok(graph_of(&["a", "b"]))));
		assert!(!session.is_loading());
		assert_eq!(session.status(), "Nodes: 2, edges: 0");
		assert_eq!(session.revision(), 1);
	}

	#[test]
	fn failure_keeps_the_previous_graph() {
		let mut session = AnalysisSession::default();
		session.begin("https://github.com/o/r");
		session.finish(Ok(graph_of(&["a"])));
		let before = session.graph().cloned();

		session.begin("https://github.com/o/other");
		assert!(!session.finish(Err(FetchError::Transport("network down".into()))));
		assert_eq!(session.graph().cloned(), before);
		assert_eq!(session.revision(), 1);
		assert_eq!(session.status(), "Request failed: network down");
		assert!(!session.is_loading());
	}

	#[test]
	fn last_resolved_response_wins() {
		let mut session = AnalysisSession::default();
		session.begin("https://github.com/o/first");
		session.begin("https://github.com/o/second");
		assert!(session.is_loading());

		// second request resolves first, the first one lands afterwards
		session.finish(Ok(graph_of(&["second"])));
		assert!(session.is_loading());
		session.finish(Ok(graph_of(&["first"])));

		assert!(!session.is_loading());
		assert_eq!(session.graph(), Some(&graph_of(&["first"])));
		assert_eq!(session.revision(), 2);
	}

	#[test]
	fn same_graph_twice_still_bumps_revision() {
		let mut session = AnalysisSession::default();
		for _ in 0..2 {
			session.begin("https://github.com/o/r");
			session.finish(Ok(graph_of(&["a"])));
		}
		assert_eq!(session.revision(), 2);
	}

	#[test]
	fn end_to_end_with_backend() {
		let backend = StubBackend::replying(200, TWO_NODES);
		let mut session = AnalysisSession::default();
		let url = session.begin("https://github.com/o/r").unwrap();
		let result = block_on(analyze(&backend, &url));
		assert!(session.finish(result));
		assert_eq!(session.status(), "Nodes: 2, edges: 1");
		assert_eq!(backend.calls.borrow().len(), 1);
	}
}
