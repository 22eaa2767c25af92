//! Graph data structures for input to the citation graph component.

use serde::Deserialize;

/// Coarse category of a paper. Drives node color and radius.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
	/// The paper the crawl started from.
	Seed,
	/// A paper reached by expanding the seed.
	Lnp,
	/// A reference cited by an expanded paper.
	Peripheral,
	#[default]
	Unclassified,
}

impl Classification {
	/// Render radius in world units. Also the base of the collision radius.
	pub const fn radius(self) -> f64 {
		match self {
			Classification::Seed => 16.0,
			Classification::Lnp => 10.0,
			Classification::Peripheral | Classification::Unclassified => 7.0,
		}
	}

	pub const fn as_str(self) -> &'static str {
		match self {
			Classification::Seed => "seed",
			Classification::Lnp => "lnp",
			Classification::Peripheral => "peripheral",
			Classification::Unclassified => "unclassified",
		}
	}
}

/// How a paper entered the graph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
	Seed,
	Expanded,
	#[default]
	Reference,
}

impl NodeKind {
	pub const fn as_str(self) -> &'static str {
		match self {
			NodeKind::Seed => "seed",
			NodeKind::Expanded => "expanded",
			NodeKind::Reference => "reference",
		}
	}
}

/// Edge type tag. Controls edge color and width.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
	#[default]
	Cites,
	ExpandsTo,
}

/// A paper in the citation graph.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GraphNode {
	/// Unique identifier for this node. Used to reference nodes in links.
	pub id: String,
	#[serde(rename = "type", default)]
	pub kind: NodeKind,
	#[serde(default)]
	pub classification: Classification,
	#[serde(default)]
	pub title: String,
	pub year: Option<i32>,
	#[serde(default)]
	pub authors: Vec<String>,
	pub doi: Option<String>,
	/// Crawl depth from the seed paper.
	#[serde(rename = "depth_level")]
	pub depth: Option<u32>,
}

/// Number of title characters kept in a canvas label.
const LABEL_TITLE_CHARS: usize = 20;

impl GraphNode {
	/// Creates a node with no metadata beyond its title.
	pub fn new(id: impl Into<String>, classification: Classification, title: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			kind: NodeKind::default(),
			classification,
			title: title.into(),
			year: None,
			authors: Vec::new(),
			doi: None,
			depth: None,
		}
	}

	/// Short label drawn next to the node, e.g. `"Lipid Nanoparticles ... (2019)"`.
	pub fn label(&self) -> String {
		let head: String = self.title.chars().take(LABEL_TITLE_CHARS).collect();
		match self.year {
			Some(year) => format!("{head}... ({year})"),
			None => format!("{head}..."),
		}
	}
}

/// A directed edge between two papers.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GraphLink {
	/// Source node ID.
	pub source: String,
	/// Target node ID.
	pub target: String,
	#[serde(rename = "type", default)]
	pub kind: EdgeKind,
}

impl GraphLink {
	pub fn new(source: impl Into<String>, target: impl Into<String>, kind: EdgeKind) -> Self {
		Self {
			source: source.into(),
			target: target.into(),
			kind,
		}
	}
}

/// Complete graph data: nodes and links.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	#[serde(alias = "edges")]
	pub links: Vec<GraphLink>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn radius_table() {
		assert_eq!(Classification::Seed.radius(), 16.0);
		assert_eq!(Classification::Lnp.radius(), 10.0);
		assert_eq!(Classification::Peripheral.radius(), 7.0);
		assert_eq!(Classification::Unclassified.radius(), 7.0);
	}

	#[test]
	fn label_truncates_title_and_appends_year() {
		let mut node = GraphNode::new(
			"p1",
			Classification::Lnp,
			"Lipid Nanoparticles for mRNA Delivery",
		);
		node.year = Some(2019);
		assert_eq!(node.label(), "Lipid Nanoparticles ... (2019)");

		node.year = None;
		node.title = "Short".into();
		assert_eq!(node.label(), "Short...");
	}

	#[test]
	fn deserializes_crawler_document_shape() {
		let json = r#"{
			"nodes": [
				{ "id": "seed-0", "type": "seed", "classification": "seed",
				  "title": "Foundational", "year": 2018, "authors": ["Cullis, P. R."],
				  "doi": "10.1038/nature12345", "depth_level": 0 },
				{ "id": "lnp-0", "type": "expanded", "classification": "lnp", "title": "Expansion" },
				{ "id": "x" }
			],
			"edges": [
				{ "source": "seed-0", "target": "lnp-0", "type": "expands_to" },
				{ "source": "lnp-0", "target": "x" }
			]
		}"#;

		let data: GraphData = serde_json::from_str(json).unwrap();
		assert_eq!(data.nodes.len(), 3);
		assert_eq!(data.nodes[0].kind, NodeKind::Seed);
		assert_eq!(data.nodes[0].depth, Some(0));
		assert_eq!(data.nodes[0].authors, vec!["Cullis, P. R.".to_string()]);
		assert_eq!(data.nodes[2].classification, Classification::Unclassified);
		assert_eq!(data.nodes[2].kind, NodeKind::Reference);
		assert_eq!(data.links[0].kind, EdgeKind::ExpandsTo);
		assert_eq!(data.links[1].kind, EdgeKind::Cites);
	}
}
