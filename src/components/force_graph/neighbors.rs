use std::collections::{HashMap, HashSet};

use super::types::{GraphData, NodeId};

/// Adjacency index used for hover highlighting only.
#[derive(Clone, Debug, Default)]
pub struct NeighborMap {
	adjacent: HashMap<NodeId, HashSet<NodeId>>,
}

impl NeighborMap {
	pub fn build(data: &GraphData) -> Self {
		let mut adjacent: HashMap<NodeId, HashSet<NodeId>> = data
			.nodes
			.iter()
			.map(|n| (n.id.clone(), HashSet::new()))
			.collect();

		for link in &data.links {
			// Links to unknown ids are ignored here; the normalizer already warned.
			if !adjacent.contains_key(&link.source) || !adjacent.contains_key(&link.target) {
				continue;
			}
			if let Some(set) = adjacent.get_mut(&link.source) {
				set.insert(link.target.clone());
			}
			if let Some(set) = adjacent.get_mut(&link.target) {
				set.insert(link.source.clone());
			}
		}

		Self { adjacent }
	}

	pub fn neighbors(&self, id: &NodeId) -> Option<&HashSet<NodeId>> {
		self.adjacent.get(id)
	}

	pub fn are_adjacent(&self, a: &NodeId, b: &NodeId) -> bool {
		self.adjacent.get(a).is_some_and(|set| set.contains(b))
	}

	pub fn len(&self) -> usize {
		self.adjacent.len()
	}

	pub fn is_empty(&self) -> bool {
		self.adjacent.is_empty()
	}
}
