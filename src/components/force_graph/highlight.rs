//! Highlight transitions driven by the selection.
//!
//! Each node and edge has a target visual derived from its [`NodeRole`]. On
//! every selection change the currently displayed values become the start of
//! a fixed-duration eased tween towards the new targets, so a change arriving
//! mid-transition continues from where the previous one left off.
//!
//! Label visibility is not tweened; it switches with the selection.

use super::selection::{NodeRole, Selection};
use super::snapshot::GraphSnapshot;
use super::theme::{Color, Theme};

/// Opacities, stroke styles and timing for the highlight states.
#[derive(Clone, Debug)]
pub struct HighlightConfig {
	/// Opacity of nodes and edges outside the selection's neighborhood.
	pub dim_opacity: f64,
	pub edge_opacity: f64,
	pub edge_active_opacity: f64,
	pub stroke: Color,
	pub stroke_width: f64,
	pub selected_stroke: Color,
	pub neighbor_stroke: Color,
	pub emphasized_width: f64,
	/// Tween length in seconds.
	pub duration: f64,
}

impl HighlightConfig {
	pub fn from_theme(theme: &Theme) -> Self {
		Self {
			dim_opacity: 0.1,
			edge_opacity: 0.6,
			edge_active_opacity: 1.0,
			stroke: theme.stroke.default,
			stroke_width: theme.stroke.width,
			selected_stroke: theme.stroke.selected,
			neighbor_stroke: theme.stroke.neighbor,
			emphasized_width: theme.stroke.emphasized_width,
			duration: 0.2,
		}
	}

	fn node_target(&self, role: NodeRole) -> NodeVisual {
		match role {
			NodeRole::Idle => NodeVisual {
				opacity: 1.0,
				stroke: self.stroke,
				stroke_width: self.stroke_width,
			},
			NodeRole::Selected => NodeVisual {
				opacity: 1.0,
				stroke: self.selected_stroke,
				stroke_width: self.emphasized_width,
			},
			NodeRole::Neighbor => NodeVisual {
				opacity: 1.0,
				stroke: self.neighbor_stroke,
				stroke_width: self.emphasized_width,
			},
			NodeRole::Dimmed => NodeVisual {
				opacity: self.dim_opacity,
				stroke: self.stroke,
				stroke_width: self.stroke_width,
			},
		}
	}
}

impl Default for HighlightConfig {
	fn default() -> Self {
		Self::from_theme(&Theme::default())
	}
}

/// Displayed style of one node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeVisual {
	pub opacity: f64,
	pub stroke: Color,
	pub stroke_width: f64,
}

impl NodeVisual {
	fn lerp(self, to: NodeVisual, t: f64) -> Self {
		Self {
			opacity: self.opacity + (to.opacity - self.opacity) * t,
			stroke: self.stroke.lerp(to.stroke, t),
			stroke_width: self.stroke_width + (to.stroke_width - self.stroke_width) * t,
		}
	}
}

/// Attempt to smooth values that would otherwise cause abrupt visual changes.
fn smooth_step(t: f64) -> f64 {
	t * t * (3.0 - 2.0 * t)
}

#[derive(Clone, Debug)]
pub struct HighlightState {
	config: HighlightConfig,
	node_from: Vec<NodeVisual>,
	node_to: Vec<NodeVisual>,
	nodes: Vec<NodeVisual>,
	edge_from: Vec<f64>,
	edge_to: Vec<f64>,
	edges: Vec<f64>,
	labels: Vec<bool>,
	/// Linear tween progress in [0, 1]; 1 means at rest.
	progress: f64,
}

impl HighlightState {
	/// Starts at rest in the no-selection state.
	pub fn new(snapshot: &GraphSnapshot, config: HighlightConfig) -> Self {
		let idle = config.node_target(NodeRole::Idle);
		let nodes = vec![idle; snapshot.len()];
		let edges = vec![config.edge_opacity; snapshot.links().len()];
		Self {
			node_from: nodes.clone(),
			node_to: nodes.clone(),
			nodes,
			edge_from: edges.clone(),
			edge_to: edges.clone(),
			edges,
			labels: vec![false; snapshot.len()],
			progress: 1.0,
			config,
		}
	}

	pub fn config(&self) -> &HighlightConfig {
		&self.config
	}

	/// Retargets every node and edge for `selection` and restarts the tween
	/// from the currently displayed values.
	pub fn transition(&mut self, selection: &Selection, snapshot: &GraphSnapshot) {
		self.node_from.clone_from(&self.nodes);
		self.edge_from.clone_from(&self.edges);

		for (idx, target) in self.node_to.iter_mut().enumerate() {
			let role = selection.role(idx);
			*target = self.config.node_target(role);
			self.labels[idx] = matches!(role, NodeRole::Selected | NodeRole::Neighbor);
		}

		for (target, link) in self.edge_to.iter_mut().zip(snapshot.links()) {
			*target = if !selection.is_active() {
				self.config.edge_opacity
			} else if selection.touches(link) {
				self.config.edge_active_opacity
			} else {
				self.config.dim_opacity
			};
		}

		self.progress = 0.0;
		if self.config.duration <= 0.0 {
			self.finish();
		}
	}

	/// Advances the tween by `dt` seconds.
	pub fn tick(&mut self, dt: f64) {
		if !self.is_animating() {
			return;
		}
		self.progress = (self.progress + dt / self.config.duration).min(1.0);
		if self.progress >= 1.0 {
			self.finish();
			return;
		}

		let t = smooth_step(self.progress);
		for ((current, from), to) in self.nodes.iter_mut().zip(&self.node_from).zip(&self.node_to) {
			*current = from.lerp(*to, t);
		}
		for ((current, from), to) in self.edges.iter_mut().zip(&self.edge_from).zip(&self.edge_to) {
			*current = from + (to - from) * t;
		}
	}

	fn finish(&mut self) {
		self.progress = 1.0;
		self.nodes.clone_from(&self.node_to);
		self.edges.clone_from(&self.edge_to);
	}

	pub fn is_animating(&self) -> bool {
		self.progress < 1.0
	}

	pub fn node(&self, idx: usize) -> Option<NodeVisual> {
		self.nodes.get(idx).copied()
	}

	pub fn edge_opacity(&self, idx: usize) -> f64 {
		self.edges.get(idx).copied().unwrap_or(self.config.edge_opacity)
	}

	/// Whether the selection reveals this node's label (hover is separate).
	pub fn label_visible(&self, idx: usize) -> bool {
		self.labels.get(idx).copied().unwrap_or(false)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::fixtures;
	use crate::components::force_graph::selection::SelectionEvent;

	fn settle(highlight: &mut HighlightState) {
		for _ in 0..100 {
			highlight.tick(0.016);
		}
		assert!(!highlight.is_animating());
	}

	#[test]
	fn non_neighbors_reach_dim_opacity() {
		let snapshot = GraphSnapshot::new(&fixtures::citation_tree());
		let mut selection = Selection::default();
		let mut highlight = HighlightState::new(&snapshot, HighlightConfig::default());
		let seed = snapshot.index_of("seed-0").unwrap();

		selection.apply(SelectionEvent::Toggle(seed), &snapshot);
		highlight.transition(&selection, &snapshot);
		settle(&mut highlight);

		let config = HighlightConfig::default();
		for idx in 0..snapshot.len() {
			let visual = highlight.node(idx).unwrap();
			match selection.role(idx) {
				NodeRole::Dimmed => {
					assert_eq!(visual.opacity, config.dim_opacity);
					assert!(!highlight.label_visible(idx));
				}
				NodeRole::Selected => {
					assert_eq!(visual.stroke, config.selected_stroke);
					assert_eq!(visual.stroke_width, config.emphasized_width);
					assert!(highlight.label_visible(idx));
				}
				NodeRole::Neighbor => {
					assert_eq!(visual.opacity, 1.0);
					assert_eq!(visual.stroke, config.neighbor_stroke);
					assert!(highlight.label_visible(idx));
				}
				NodeRole::Idle => unreachable!(),
			}
		}

		for (idx, link) in snapshot.links().iter().enumerate() {
			let expected = if link.touches(seed) {
				config.edge_active_opacity
			} else {
				config.dim_opacity
			};
			assert_eq!(highlight.edge_opacity(idx), expected);
		}
	}

	#[test]
	fn transition_is_gradual() {
		let snapshot = GraphSnapshot::new(&fixtures::chain());
		let mut selection = Selection::default();
		let mut highlight = HighlightState::new(&snapshot, HighlightConfig::default());

		selection.apply(SelectionEvent::Toggle(0), &snapshot);
		highlight.transition(&selection, &snapshot);
		assert!(highlight.is_animating());
		assert_eq!(highlight.node(2).unwrap().opacity, 1.0);

		highlight.tick(0.1);
		let midway = highlight.node(2).unwrap().opacity;
		assert!(midway < 1.0 && midway > 0.1, "opacity {midway}");
	}

	#[test]
	fn retarget_mid_transition_starts_from_displayed_value() {
		let snapshot = GraphSnapshot::new(&fixtures::chain());
		let mut selection = Selection::default();
		let mut highlight = HighlightState::new(&snapshot, HighlightConfig::default());

		selection.apply(SelectionEvent::Toggle(0), &snapshot);
		highlight.transition(&selection, &snapshot);
		highlight.tick(0.1);
		let displayed = highlight.node(2).unwrap().opacity;

		selection.apply(SelectionEvent::Clear, &snapshot);
		highlight.transition(&selection, &snapshot);
		assert_eq!(highlight.node(2).unwrap().opacity, displayed);

		settle(&mut highlight);
		assert_eq!(highlight.node(2).unwrap().opacity, 1.0);
		assert!(!highlight.label_visible(0));
		assert_eq!(highlight.edge_opacity(0), 0.6);
	}

	#[test]
	fn zero_duration_applies_immediately() {
		let snapshot = GraphSnapshot::new(&fixtures::chain());
		let mut selection = Selection::default();
		let config = HighlightConfig {
			duration: 0.0,
			..HighlightConfig::default()
		};
		let mut highlight = HighlightState::new(&snapshot, config);

		selection.apply(SelectionEvent::Toggle(0), &snapshot);
		highlight.transition(&selection, &snapshot);
		assert!(!highlight.is_animating());
		assert_eq!(highlight.node(2).unwrap().opacity, 0.1);
	}
}
