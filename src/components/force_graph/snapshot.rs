//! Validated, index-resolved view of the input graph.
//!
//! A [`GraphSnapshot`] is built once per load. Node ids are mapped to stable
//! arena indices, and every link is resolved to a pair of indices. Links that
//! reference unknown ids never reach the simulation.

use std::collections::{HashMap, HashSet};

use log::warn;

use super::types::{EdgeKind, GraphData, GraphNode};

/// A link with both endpoints resolved to node indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SnapshotLink {
	pub source: usize,
	pub target: usize,
	pub kind: EdgeKind,
}

impl SnapshotLink {
	/// Whether `idx` is either endpoint of this link.
	pub fn touches(&self, idx: usize) -> bool {
		self.source == idx || self.target == idx
	}
}

/// Immutable node and link set handed to the layout engine.
#[derive(Clone, Debug, Default)]
pub struct GraphSnapshot {
	nodes: Vec<GraphNode>,
	links: Vec<SnapshotLink>,
	index: HashMap<String, usize>,
	dropped_links: usize,
	dropped_nodes: usize,
}

impl GraphSnapshot {
	pub fn new(data: &GraphData) -> Self {
		let mut nodes = Vec::with_capacity(data.nodes.len());
		let mut index = HashMap::with_capacity(data.nodes.len());
		let mut dropped_nodes = 0;

		for node in &data.nodes {
			if index.contains_key(&node.id) {
				dropped_nodes += 1;
				continue;
			}
			index.insert(node.id.clone(), nodes.len());
			nodes.push(node.clone());
		}

		let mut links = Vec::with_capacity(data.links.len());
		let mut dropped_links = 0;

		for link in &data.links {
			match (index.get(&link.source), index.get(&link.target)) {
				(Some(&source), Some(&target)) => links.push(SnapshotLink {
					source,
					target,
					kind: link.kind,
				}),
				_ => dropped_links += 1,
			}
		}

		if dropped_nodes > 0 {
			warn!("citation-graph: dropped {dropped_nodes} nodes with duplicate ids");
		}
		if dropped_links > 0 {
			warn!("citation-graph: dropped {dropped_links} links referencing unknown nodes");
		}

		Self {
			nodes,
			links,
			index,
			dropped_links,
			dropped_nodes,
		}
	}

	pub fn nodes(&self) -> &[GraphNode] {
		&self.nodes
	}

	pub fn links(&self) -> &[SnapshotLink] {
		&self.links
	}

	pub fn node(&self, idx: usize) -> Option<&GraphNode> {
		self.nodes.get(idx)
	}

	pub fn index_of(&self, id: &str) -> Option<usize> {
		self.index.get(id).copied()
	}

	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Links discarded because an endpoint id was not in the node set.
	pub fn dropped_links(&self) -> usize {
		self.dropped_links
	}

	/// Nodes discarded because their id was already taken.
	pub fn dropped_nodes(&self) -> usize {
		self.dropped_nodes
	}

	/// Nodes adjacent to `idx` through any link, in either direction.
	/// Scans every link once.
	pub fn neighbors(&self, idx: usize) -> HashSet<usize> {
		let mut neighbors = HashSet::new();
		for link in &self.links {
			if link.source == idx {
				neighbors.insert(link.target);
			}
			if link.target == idx {
				neighbors.insert(link.source);
			}
		}
		neighbors
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::fixtures;
	use crate::components::force_graph::types::{Classification, GraphLink};

	#[test]
	fn drops_links_to_unknown_nodes() {
		let mut data = fixtures::chain();
		data.links.push(GraphLink::new("a", "ghost", EdgeKind::Cites));
		data.links.push(GraphLink::new("ghost", "c", EdgeKind::Cites));

		let snapshot = GraphSnapshot::new(&data);
		assert_eq!(snapshot.links().len(), 2);
		assert_eq!(snapshot.dropped_links(), 2);
		for link in snapshot.links() {
			assert!(link.source < snapshot.len());
			assert!(link.target < snapshot.len());
		}
	}

	#[test]
	fn every_link_endpoint_exists_after_construction() {
		let mut data = fixtures::citation_tree();
		data.links.push(GraphLink::new("seed-0", "missing", EdgeKind::Cites));

		let snapshot = GraphSnapshot::new(&data);
		for link in snapshot.links() {
			assert!(snapshot.node(link.source).is_some());
			assert!(snapshot.node(link.target).is_some());
		}
		assert_eq!(snapshot.links().len(), 30);
	}

	#[test]
	fn first_duplicate_node_wins() {
		let mut data = fixtures::chain();
		data.nodes
			.push(GraphNode::new("a", Classification::Peripheral, "Impostor"));

		let snapshot = GraphSnapshot::new(&data);
		assert_eq!(snapshot.len(), 3);
		assert_eq!(snapshot.dropped_nodes(), 1);
		let a = snapshot.index_of("a").unwrap();
		assert_eq!(snapshot.nodes()[a].title, "A");
	}

	#[test]
	fn neighbors_cover_both_directions() {
		let snapshot = GraphSnapshot::new(&fixtures::chain());
		let b = snapshot.index_of("b").unwrap();
		let neighbors = snapshot.neighbors(b);
		assert_eq!(neighbors.len(), 2);
		assert!(neighbors.contains(&snapshot.index_of("a").unwrap()));
		assert!(neighbors.contains(&snapshot.index_of("c").unwrap()));
	}

	#[test]
	fn self_loops_are_kept() {
		let mut data = fixtures::chain();
		data.links.push(GraphLink::new("c", "c", EdgeKind::Cites));

		let snapshot = GraphSnapshot::new(&data);
		let c = snapshot.index_of("c").unwrap();
		assert_eq!(snapshot.links().len(), 3);
		assert!(snapshot.neighbors(c).contains(&c));
	}

	#[test]
	fn empty_input() {
		let snapshot = GraphSnapshot::new(&GraphData::default());
		assert!(snapshot.is_empty());
		assert!(snapshot.links().is_empty());
		assert!(snapshot.neighbors(0).is_empty());
	}
}
