//! Shared test graphs.

use super::types::{Classification, EdgeKind, GraphData, GraphLink, GraphNode};

/// One seed, five expanded papers, twenty references (four per expanded
/// paper) and five cross-citations between references: 30 edges.
pub fn citation_tree() -> GraphData {
	let mut nodes = vec![GraphNode::new("seed-0", Classification::Seed, "Seed paper")];
	let mut links = Vec::new();

	for i in 0..5 {
		let lnp = format!("lnp-{i}");
		nodes.push(GraphNode::new(&lnp, Classification::Lnp, "Expanded paper"));
		links.push(GraphLink::new("seed-0", &lnp, EdgeKind::ExpandsTo));

		for j in 0..4 {
			let peripheral = format!("peripheral-{lnp}-{j}");
			nodes.push(GraphNode::new(
				&peripheral,
				Classification::Peripheral,
				"Cited work",
			));
			links.push(GraphLink::new(&lnp, &peripheral, EdgeKind::Cites));
		}
	}

	for i in 0..5 {
		links.push(GraphLink::new(
			format!("peripheral-lnp-{i}-0"),
			format!("peripheral-lnp-{}-1", (i + 1) % 5),
			EdgeKind::Cites,
		));
	}

	GraphData { nodes, links }
}

/// Three papers in a chain: `a -> b -> c`.
pub fn chain() -> GraphData {
	GraphData {
		nodes: vec![
			GraphNode::new("a", Classification::Seed, "A"),
			GraphNode::new("b", Classification::Lnp, "B"),
			GraphNode::new("c", Classification::Peripheral, "C"),
		],
		links: vec![
			GraphLink::new("a", "b", EdgeKind::ExpandsTo),
			GraphLink::new("b", "c", EdgeKind::Cites),
		],
	}
}
