//! Graph simulation state and interaction dispatch.
//!
//! Combines the layout simulation with the view transform, gesture tracking
//! and the selection/highlight state machine. Everything here is plain data:
//! pointer input goes in through [`ForceGraphState::handle`], selection
//! changes come out as [`SelectionChanged`], and the renderer reads the rest.

use log::{debug, info};

use super::highlight::{HighlightConfig, HighlightState};
use super::interaction::{GestureTracker, Intent, PointerInput};
use super::scale::{ScaleConfig, ScaledValues};
use super::selection::{Selection, SelectionEvent};
use super::simulation::{Simulation, SimulationParameters};
use super::snapshot::GraphSnapshot;
use super::theme::Theme;
use super::transform::{ViewTransform, ZoomExtent};
use super::types::GraphData;

/// Emitted whenever the selected node changes. Carries the new node id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectionChanged(pub Option<String>);

/// In-progress node drag, in graph coordinates.
#[derive(Clone, Copy, Debug)]
struct DragOrigin {
	node: usize,
	x: f64,
	y: f64,
}

/// Core graph state for one snapshot.
///
/// Created when a snapshot is loaded, then mutated each frame by the
/// animation loop. Replacing the snapshot means building a new state.
pub struct ForceGraphState {
	pub snapshot: GraphSnapshot,
	pub simulation: Simulation,
	pub transform: ViewTransform,
	pub zoom_extent: ZoomExtent,
	pub selection: Selection,
	pub highlight: HighlightState,
	/// Node under the idle pointer; its label is shown regardless of selection.
	pub hovered: Option<usize>,
	pub width: f64,
	pub height: f64,
	gesture: GestureTracker,
	drag: Option<DragOrigin>,
	pan_origin: (f64, f64),
}

impl ForceGraphState {
	pub fn new(data: &GraphData, width: f64, height: f64, theme: &Theme) -> Self {
		Self::with_parameters(data, width, height, theme, SimulationParameters::default())
	}

	pub fn with_parameters(
		data: &GraphData,
		width: f64,
		height: f64,
		theme: &Theme,
		params: SimulationParameters,
	) -> Self {
		let snapshot = GraphSnapshot::new(data);
		let simulation = Simulation::new(&snapshot, (width / 2.0, height / 2.0), params);
		let highlight = HighlightState::new(&snapshot, HighlightConfig::from_theme(theme));

		info!(
			"citation-graph: snapshot with {} nodes, {} links",
			snapshot.len(),
			snapshot.links().len()
		);

		Self {
			snapshot,
			simulation,
			transform: ViewTransform::default(),
			zoom_extent: ZoomExtent::default(),
			selection: Selection::default(),
			highlight,
			hovered: None,
			width,
			height,
			gesture: GestureTracker::default(),
			drag: None,
			pan_origin: (0.0, 0.0),
		}
	}

	pub fn node_at_position(&self, sx: f64, sy: f64, config: &ScaleConfig) -> Option<usize> {
		let (gx, gy) = self.transform.screen_to_graph(sx, sy);
		let scale = ScaledValues::new(config, self.transform.k);
		self.simulation.node_at(gx, gy, scale.hit_radius)
	}

	/// Node currently being dragged, drawn above all others.
	pub fn dragged(&self) -> Option<usize> {
		self.drag.map(|d| d.node)
	}

	/// Node indices in paint order: snapshot order, dragged node last.
	pub fn draw_order(&self) -> impl Iterator<Item = usize> + Clone + '_ {
		let dragged = self.dragged();
		(0..self.snapshot.len())
			.filter(move |&idx| Some(idx) != dragged)
			.chain(dragged)
	}

	pub fn is_panning(&self) -> bool {
		self.gesture.is_panning()
	}

	pub fn selected_id(&self) -> Option<String> {
		self.selection
			.selected()
			.and_then(|idx| self.snapshot.node(idx))
			.map(|node| node.id.clone())
	}

	/// Dispatches one pointer input. Returns a change event when the
	/// selection moved.
	pub fn handle(&mut self, input: PointerInput, config: &ScaleConfig) -> Option<SelectionChanged> {
		let hit = input
			.position()
			.and_then(|(x, y)| self.node_at_position(x, y, config));

		match self.gesture.on_input(input, hit)? {
			Intent::Hover(node) => {
				self.hovered = node;
				None
			}
			Intent::DragStart { node } => {
				let (x, y) = self.simulation.position(node)?;
				self.drag = Some(DragOrigin { node, x, y });
				self.hovered = None;
				let target = self.simulation.params().drag_alpha_target;
				self.simulation.set_alpha_target(target);
				self.simulation.pin(node, x, y);
				None
			}
			Intent::DragMove { node, dx, dy } => {
				let origin = self.drag.filter(|d| d.node == node)?;
				let k = self.transform.k;
				self.simulation.pin(node, origin.x + dx / k, origin.y + dy / k);
				None
			}
			Intent::DragEnd { node, click } => {
				self.drag = None;
				self.simulation.set_alpha_target(0.0);
				self.simulation.unpin(node);
				if click {
					self.select(SelectionEvent::Toggle(node))
				} else {
					None
				}
			}
			Intent::PanStart => {
				self.pan_origin = (self.transform.x, self.transform.y);
				None
			}
			Intent::PanMove { dx, dy } => {
				self.transform.x = self.pan_origin.0 + dx;
				self.transform.y = self.pan_origin.1 + dy;
				None
			}
			Intent::PanEnd { click } => {
				if click {
					self.select(SelectionEvent::Clear)
				} else {
					None
				}
			}
			Intent::Zoom { x, y, factor } => {
				self.transform.zoom_by(factor, x, y, &self.zoom_extent);
				None
			}
		}
	}

	/// Applies a selection event and starts the highlight transition.
	pub fn select(&mut self, event: SelectionEvent) -> Option<SelectionChanged> {
		if !self.selection.apply(event, &self.snapshot) {
			return None;
		}
		self.highlight.transition(&self.selection, &self.snapshot);
		let id = self.selected_id();
		debug!("citation-graph: selection -> {:?}", id);
		Some(SelectionChanged(id))
	}

	/// Sets the zoom factor directly, anchored at the viewport center.
	pub fn zoom_to(&mut self, k: f64) {
		let (cx, cy) = (self.width / 2.0, self.height / 2.0);
		self.transform.scale_to(k, cx, cy, &self.zoom_extent);
	}

	pub fn tick(&mut self, dt: f32) {
		self.simulation.step();
		self.highlight.tick(dt as f64);
	}

	/// Moves the layout center to the middle of the new viewport and wakes
	/// the simulation so a settled layout follows it.
	pub fn resize(&mut self, width: f64, height: f64) {
		if (width, height) == (self.width, self.height) {
			return;
		}
		self.width = width;
		self.height = height;
		self.simulation.set_center(width / 2.0, height / 2.0);
		let alpha = self.simulation.params().reheat_alpha;
		self.simulation.reheat(alpha);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::fixtures;
	use crate::components::force_graph::selection::NodeRole;

	fn state_for(data: &GraphData) -> ForceGraphState {
		ForceGraphState::new(data, 800.0, 600.0, &Theme::default())
	}

	fn screen_pos(state: &ForceGraphState, idx: usize) -> (f64, f64) {
		let (x, y) = state.simulation.position(idx).unwrap();
		state.transform.graph_to_screen(x, y)
	}

	fn click(state: &mut ForceGraphState, x: f64, y: f64) -> Option<SelectionChanged> {
		let config = ScaleConfig::default();
		state.handle(PointerInput::Down { x, y }, &config);
		state.handle(PointerInput::Up { x, y }, &config)
	}

	fn settle(state: &mut ForceGraphState) {
		for _ in 0..400 {
			state.tick(0.016);
		}
	}

	#[test]
	fn clicking_a_node_twice_toggles_selection() {
		let mut state = state_for(&fixtures::citation_tree());
		settle(&mut state);
		let seed = state.snapshot.index_of("seed-0").unwrap();
		let (x, y) = screen_pos(&state, seed);

		assert_eq!(
			click(&mut state, x, y),
			Some(SelectionChanged(Some("seed-0".into())))
		);
		assert_eq!(click(&mut state, x, y), Some(SelectionChanged(None)));
		assert!(!state.selection.is_active());
	}

	#[test]
	fn seed_selection_dims_everything_but_its_children() {
		let mut state = state_for(&fixtures::citation_tree());
		settle(&mut state);
		let seed = state.snapshot.index_of("seed-0").unwrap();
		let (x, y) = screen_pos(&state, seed);
		click(&mut state, x, y);
		settle(&mut state);

		let dim = state.highlight.config().dim_opacity;
		let mut bright = 0;
		for (idx, node) in state.snapshot.nodes().iter().enumerate() {
			let opacity = state.highlight.node(idx).unwrap().opacity;
			match state.selection.role(idx) {
				NodeRole::Neighbor => {
					assert_eq!(node.id.split('-').next(), Some("lnp"));
					bright += 1;
				}
				NodeRole::Dimmed => assert_eq!(opacity, dim),
				NodeRole::Selected => assert_eq!(opacity, 1.0),
				NodeRole::Idle => unreachable!(),
			}
		}
		assert_eq!(bright, 5);
	}

	#[test]
	fn drag_moves_pin_and_suppresses_click() {
		let mut state = state_for(&fixtures::chain());
		settle(&mut state);
		let config = ScaleConfig::default();
		state.zoom_to(2.0);
		let (x, y) = screen_pos(&state, 0);
		let origin = state.simulation.position(0).unwrap();

		state.handle(PointerInput::Down { x, y }, &config);
		assert_eq!(state.dragged(), Some(0));
		assert_eq!(state.simulation.alpha_target(), 0.3);

		state.handle(PointerInput::Move { x: x + 40.0, y: y + 20.0 }, &config);
		let pinned = state.simulation.bodies()[0].pinned.unwrap();
		assert!((pinned.0 - (origin.0 + 20.0)).abs() < 1e-9);
		assert!((pinned.1 - (origin.1 + 10.0)).abs() < 1e-9);

		let change = state.handle(PointerInput::Up { x: x + 40.0, y: y + 20.0 }, &config);
		assert_eq!(change, None);
		assert_eq!(state.dragged(), None);
		assert!(state.simulation.bodies()[0].pinned.is_none());
		assert_eq!(state.simulation.alpha_target(), 0.0);
		assert!(!state.selection.is_active());
	}

	#[test]
	fn released_node_drifts_from_drop_point() {
		let mut state = state_for(&fixtures::chain());
		let config = ScaleConfig::default();
		for _ in 0..20 {
			state.tick(0.016);
		}
		let (x, y) = screen_pos(&state, 2);
		state.handle(PointerInput::Down { x, y }, &config);
		state.handle(PointerInput::Move { x: x + 300.0, y: y + 300.0 }, &config);
		state.tick(0.016);
		let dropped = state.simulation.position(2).unwrap();
		state.handle(PointerInput::Up { x: x + 300.0, y: y + 300.0 }, &config);

		for _ in 0..30 {
			state.tick(0.016);
		}
		assert_ne!(state.simulation.position(2).unwrap(), dropped);
	}

	#[test]
	fn background_click_clears_but_pan_does_not() {
		let mut state = state_for(&fixtures::chain());
		settle(&mut state);
		let config = ScaleConfig::default();
		let (x, y) = screen_pos(&state, 1);
		click(&mut state, x, y);
		assert!(state.selection.is_active());

		state.handle(PointerInput::Down { x: 2.0, y: 2.0 }, &config);
		state.handle(PointerInput::Move { x: 52.0, y: 32.0 }, &config);
		assert!(state.is_panning());
		assert_eq!(state.handle(PointerInput::Up { x: 52.0, y: 32.0 }, &config), None);
		assert_eq!((state.transform.x, state.transform.y), (50.0, 30.0));
		assert!(state.selection.is_active());

		assert_eq!(click(&mut state, 1.0, 1.0), Some(SelectionChanged(None)));
		assert_eq!(click(&mut state, 1.0, 1.0), None);
	}

	#[test]
	fn pan_and_zoom_leave_simulation_untouched() {
		let mut state = state_for(&fixtures::chain());
		settle(&mut state);
		let config = ScaleConfig::default();
		let before: Vec<_> = state.simulation.bodies().to_vec();

		for _ in 0..50 {
			state.handle(
				PointerInput::Wheel {
					x: 100.0,
					y: 100.0,
					delta_y: -1.0,
				},
				&config,
			);
		}
		assert_eq!(state.transform.k, 4.0);
		state.handle(PointerInput::Down { x: 1.0, y: 1.0 }, &config);
		state.handle(PointerInput::Move { x: 90.0, y: 1.0 }, &config);
		state.handle(PointerInput::Up { x: 90.0, y: 1.0 }, &config);

		assert_eq!(state.simulation.bodies(), before.as_slice());
	}

	#[test]
	fn zoom_requests_are_clamped() {
		let mut state = state_for(&fixtures::chain());
		state.zoom_to(10.0);
		assert_eq!(state.transform.k, 4.0);
		state.zoom_to(0.01);
		assert_eq!(state.transform.k, 0.1);
	}

	#[test]
	fn hover_tracks_idle_pointer() {
		let mut state = state_for(&fixtures::chain());
		settle(&mut state);
		let config = ScaleConfig::default();
		let (x, y) = screen_pos(&state, 2);

		state.handle(PointerInput::Move { x, y }, &config);
		assert_eq!(state.hovered, Some(2));
		state.handle(PointerInput::Leave, &config);
		assert_eq!(state.hovered, None);
	}

	#[test]
	fn empty_snapshot_is_an_idle_scene() {
		let mut state = state_for(&GraphData::default());
		let config = ScaleConfig::default();
		for _ in 0..10 {
			state.tick(0.016);
		}
		assert_eq!(click(&mut state, 400.0, 300.0), None);
		assert_eq!(
			state.handle(
				PointerInput::Wheel {
					x: 0.0,
					y: 0.0,
					delta_y: 1.0
				},
				&config
			),
			None
		);
		assert_eq!(state.selected_id(), None);
		assert!(state.snapshot.is_empty());
	}

	#[test]
	fn resize_recenters_layout() {
		let mut state = state_for(&fixtures::chain());
		state.resize(1200.0, 900.0);
		settle(&mut state);

		let n = state.simulation.bodies().len() as f64;
		let mean_x = state.simulation.bodies().iter().map(|b| b.x).sum::<f64>() / n;
		assert!((mean_x - 600.0).abs() < 1.0);
	}

	#[test]
	fn resize_after_settling_moves_layout_to_new_center() {
		let mut state = state_for(&fixtures::citation_tree());
		settle(&mut state);
		assert!(state.simulation.is_settled());

		state.resize(1600.0, 1200.0);
		assert!(!state.simulation.is_settled());
		settle(&mut state);

		let n = state.simulation.bodies().len() as f64;
		let mean_x = state.simulation.bodies().iter().map(|b| b.x).sum::<f64>() / n;
		let mean_y = state.simulation.bodies().iter().map(|b| b.y).sum::<f64>() / n;
		assert!((mean_x - 800.0).abs() < 1.0, "mean x {mean_x}");
		assert!((mean_y - 600.0).abs() < 1.0, "mean y {mean_y}");
	}

	#[test]
	fn same_size_resize_leaves_settled_layout_alone() {
		let mut state = state_for(&fixtures::chain());
		settle(&mut state);
		state.resize(800.0, 600.0);
		assert!(state.simulation.is_settled());
	}

	#[test]
	fn dragged_node_is_painted_last() {
		let mut state = state_for(&fixtures::chain());
		settle(&mut state);
		let config = ScaleConfig::default();
		assert_eq!(state.draw_order().collect::<Vec<_>>(), vec![0, 1, 2]);

		let (x, y) = screen_pos(&state, 0);
		state.handle(PointerInput::Down { x, y }, &config);
		state.handle(PointerInput::Move { x: x + 30.0, y }, &config);
		assert_eq!(state.draw_order().collect::<Vec<_>>(), vec![1, 2, 0]);

		state.handle(PointerInput::Up { x: x + 30.0, y }, &config);
		assert_eq!(state.draw_order().collect::<Vec<_>>(), vec![0, 1, 2]);
	}

	#[test]
	fn hover_returns_after_click_release() {
		let mut state = state_for(&fixtures::chain());
		settle(&mut state);
		let config = ScaleConfig::default();
		let (x, y) = screen_pos(&state, 2);

		state.handle(PointerInput::Move { x, y }, &config);
		click(&mut state, x, y);
		assert_eq!(state.hovered, None);
		state.handle(PointerInput::Move { x, y }, &config);
		assert_eq!(state.hovered, Some(2));
	}

	#[test]
	fn wheel_during_drag_keeps_zoom_and_pin() {
		let mut state = state_for(&fixtures::chain());
		settle(&mut state);
		let config = ScaleConfig::default();
		let (x, y) = screen_pos(&state, 1);

		state.handle(PointerInput::Down { x, y }, &config);
		state.handle(PointerInput::Move { x: x + 20.0, y }, &config);
		let pinned = state.simulation.bodies()[1].pinned;
		state.handle(
			PointerInput::Wheel {
				x: 10.0,
				y: 10.0,
				delta_y: -1.0,
			},
			&config,
		);
		assert_eq!(state.transform.k, 1.0);
		assert_eq!(state.simulation.bodies()[1].pinned, pinned);

		state.handle(PointerInput::Move { x: x + 40.0, y }, &config);
		let (px, _) = state.simulation.bodies()[1].pinned.unwrap();
		assert!((px - (pinned.unwrap().0 + 20.0)).abs() < 1e-9);
	}
}
