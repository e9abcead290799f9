use std::collections::HashSet;

use log::{info, warn};

use super::wire::RawGraph;
use crate::components::force_graph::{GraphData, GraphLink, GraphNode, NodeId};

/// What normalization had to discard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizeReport {
	pub duplicate_nodes: Vec<NodeId>,
	pub dangling_links: Vec<(NodeId, NodeId)>,
	/// Nodes without an id.
	pub malformed_nodes: usize,
	/// Links missing an endpoint.
	pub malformed_links: usize,
}

impl NormalizeReport {
	pub fn is_clean(&self) -> bool {
		self.duplicate_nodes.is_empty()
			&& self.dangling_links.is_empty()
			&& self.malformed_nodes == 0
			&& self.malformed_links == 0
	}
}

/// Maps backend records to render-ready ones, dropping what cannot be drawn.
pub fn normalize(raw: RawGraph) -> (GraphData, NormalizeReport) {
	let mut report = NormalizeReport::default();
	let mut seen: HashSet<NodeId> = HashSet::with_capacity(raw.nodes.len());
	let mut nodes = Vec::with_capacity(raw.nodes.len());

	for node in raw.nodes {
		let Some(id) = node.id else {
			warn!(
				"dropping node without id (label {:?})",
				node.label.as_deref().unwrap_or_default()
			);
			report.malformed_nodes += 1;
			continue;
		};
		if !seen.insert(id.clone()) {
			warn!("dropping duplicate node {id}");
			report.duplicate_nodes.push(id);
			continue;
		}
		let label = node
			.label
			.filter(|l| !l.is_empty())
			.unwrap_or_else(|| id.to_string());
		let fqname = node
			.fqname
			.filter(|f| !f.is_empty())
			.unwrap_or_else(|| label.clone());
		let location = node.file.map(|file| match node.lineno {
			Some(line) => format!("{file}:{line}"),
			None => file,
		});
		nodes.push(GraphNode {
			id,
			label,
			fqname,
			kind: node.kind,
			location,
		});
	}

	let mut links = Vec::with_capacity(raw.edges.len());
	for edge in raw.edges {
		let (Some(source), Some(target)) = (edge.source, edge.target) else {
			warn!("dropping link with a missing endpoint");
			report.malformed_links += 1;
			continue;
		};
		if seen.contains(&source) && seen.contains(&target) {
			links.push(GraphLink { source, target });
		} else {
			warn!("dropping dangling link {source} -> {target}");
			report.dangling_links.push((source, target));
		}
	}

	info!(
		"normalized graph: {} nodes, {} links ({} duplicates, {} dangling, {} malformed dropped)",
		nodes.len(),
		links.len(),
		report.duplicate_nodes.len(),
		report.dangling_links.len(),
		report.malformed_nodes + report.malformed_links
	);
	(GraphData { nodes, links }, report)
}
