//! Force-directed layout simulation.
//!
//! Wraps the `force_graph` spring/charge integrator with the passes it does
//! not provide: centering on the viewport, collision between node discs, and
//! an energy value `alpha` that cools the layout down until it settles.
//!
//! Each tick advances the integrator by `time_step * alpha` seconds, so the
//! motion fades out as alpha decays towards `alpha_target`. Once both fall
//! below `alpha_min` the simulation is settled and [`Simulation::step`] stops
//! doing work until a drag or a resize raises the energy again.
//!
//! Positions are mirrored into a flat arena of [`Body`] records indexed by
//! snapshot node index. The arena is refreshed once per tick after every pass
//! has run, so a reader between ticks always sees a complete position set.

use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData};

use super::snapshot::GraphSnapshot;

/// Tunable physics constants.
#[derive(Clone, Debug)]
pub struct SimulationParameters {
	/// Repulsion between every pair of nodes.
	pub force_charge: f32,
	/// Spring stiffness along links.
	pub force_spring: f32,
	/// Upper bound on any single force.
	pub force_max: f32,
	pub node_speed: f32,
	/// Velocity retained per integrator update.
	pub damping_factor: f32,
	pub node_mass: f32,
	/// Integrator time per tick at full energy, in seconds.
	pub time_step: f32,
	/// Fraction of the mean-position offset removed per tick.
	pub center_strength: f64,
	/// Extra clearance added to each node's render radius for collision.
	pub collision_margin: f64,
	pub alpha_min: f64,
	pub alpha_decay: f64,
	/// Energy level held while a node is being dragged.
	pub drag_alpha_target: f64,
	/// Energy restored when the viewport center moves.
	pub reheat_alpha: f64,
}

impl Default for SimulationParameters {
	fn default() -> Self {
		let alpha_min = 0.001;
		Self {
			force_charge: 250.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.5,
			node_mass: 10.0,
			time_step: 0.03,
			center_strength: 0.2,
			collision_margin: 4.0,
			alpha_min,
			// Reaches alpha_min from 1.0 in 300 ticks.
			alpha_decay: 1.0 - alpha_min.powf(1.0 / 300.0),
			drag_alpha_target: 0.3,
			reheat_alpha: 0.3,
		}
	}
}

impl SimulationParameters {
	fn forces(&self) -> force_graph::SimulationParameters {
		force_graph::SimulationParameters {
			force_charge: self.force_charge,
			force_spring: self.force_spring,
			force_max: self.force_max,
			node_speed: self.node_speed,
			damping_factor: self.damping_factor,
		}
	}
}

/// Per-node data carried through the integrator.
#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	/// Snapshot node index.
	pub index: usize,
}

/// Layout state of one node.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Body {
	pub x: f64,
	pub y: f64,
	/// Fixed position overriding the simulated one (set while dragged).
	pub pinned: Option<(f64, f64)>,
	/// Render radius; the collision radius adds the configured margin.
	pub radius: f64,
}

/// One running layout for one graph snapshot.
pub struct Simulation {
	graph: ForceGraph<NodeInfo, ()>,
	/// Integrator handle of each snapshot node, by snapshot index.
	handles: Vec<DefaultNodeIdx>,
	bodies: Vec<Body>,
	params: SimulationParameters,
	alpha: f64,
	alpha_target: f64,
	center: (f64, f64),
	jiggle_state: u32,
}

impl Simulation {
	/// Lays the snapshot's nodes out on a phyllotaxis spiral around `center`.
	pub fn new(snapshot: &GraphSnapshot, center: (f64, f64), params: SimulationParameters) -> Self {
		let mut graph = ForceGraph::new(params.forces());
		let initial_angle = PI * (3.0 - 5f64.sqrt());

		let mut handles = Vec::with_capacity(snapshot.len());
		let mut bodies = Vec::with_capacity(snapshot.len());
		for (i, node) in snapshot.nodes().iter().enumerate() {
			let radius = 10.0 * (0.5 + i as f64).sqrt();
			let angle = i as f64 * initial_angle;
			let (x, y) = (center.0 + radius * angle.cos(), center.1 + radius * angle.sin());

			handles.push(graph.add_node(NodeData {
				x: x as f32,
				y: y as f32,
				mass: params.node_mass,
				is_anchor: false,
				user_data: NodeInfo { index: i },
			}));
			bodies.push(Body {
				x,
				y,
				pinned: None,
				radius: node.classification.radius(),
			});
		}

		// Self-loops would pull a node towards itself.
		for link in snapshot.links().iter().filter(|l| l.source != l.target) {
			graph.add_edge(handles[link.source], handles[link.target], EdgeData::default());
		}

		Self {
			graph,
			handles,
			bodies,
			params,
			alpha: 1.0,
			alpha_target: 0.0,
			center,
			jiggle_state: 1,
		}
	}

	pub fn bodies(&self) -> &[Body] {
		&self.bodies
	}

	pub fn position(&self, idx: usize) -> Option<(f64, f64)> {
		self.bodies.get(idx).map(|b| (b.x, b.y))
	}

	pub fn params(&self) -> &SimulationParameters {
		&self.params
	}

	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	pub fn alpha_target(&self) -> f64 {
		self.alpha_target
	}

	/// Sets the energy level alpha decays towards. A target above `alpha_min`
	/// keeps (or brings) the simulation out of the settled state.
	pub fn set_alpha_target(&mut self, target: f64) {
		self.alpha_target = target;
	}

	/// Raises alpha to at least `alpha`, waking a settled simulation.
	pub fn reheat(&mut self, alpha: f64) {
		self.alpha = self.alpha.max(alpha);
	}

	pub fn set_center(&mut self, x: f64, y: f64) {
		self.center = (x, y);
	}

	pub fn is_settled(&self) -> bool {
		self.alpha < self.params.alpha_min && self.alpha_target < self.params.alpha_min
	}

	/// Fixes a body at `(x, y)` until [`Simulation::unpin`] is called.
	pub fn pin(&mut self, idx: usize, x: f64, y: f64) {
		let Some(body) = self.bodies.get_mut(idx) else {
			return;
		};
		body.pinned = Some((x, y));
		body.x = x;
		body.y = y;

		let handle = self.handles[idx];
		self.graph.visit_nodes_mut(|node| {
			if node.index() == handle {
				node.data.x = x as f32;
				node.data.y = y as f32;
				node.data.is_anchor = true;
			}
		});
	}

	/// Returns a body to simulation control.
	pub fn unpin(&mut self, idx: usize) {
		let Some(body) = self.bodies.get_mut(idx) else {
			return;
		};
		body.pinned = None;

		let handle = self.handles[idx];
		self.graph.visit_nodes_mut(|node| {
			if node.index() == handle {
				node.data.is_anchor = false;
			}
		});
	}

	/// Topmost body whose disc contains the point. `min_radius` widens the
	/// hit area of small nodes.
	pub fn node_at(&self, x: f64, y: f64, min_radius: f64) -> Option<usize> {
		self.bodies.iter().enumerate().rev().find_map(|(idx, body)| {
			let (dx, dy) = (body.x - x, body.y - y);
			let hit_radius = body.radius.max(min_radius);
			(dx * dx + dy * dy <= hit_radius * hit_radius).then_some(idx)
		})
	}

	/// Advances one tick unless settled. Returns whether a tick ran.
	pub fn step(&mut self) -> bool {
		if self.is_settled() {
			return false;
		}
		self.tick();
		true
	}

	/// Advances the simulation by exactly one tick.
	pub fn tick(&mut self) {
		self.alpha += (self.alpha_target - self.alpha) * self.params.alpha_decay;

		self.graph.update(self.params.time_step * self.alpha as f32);
		self.read_positions();
		self.apply_center();
		self.apply_collision();
		self.write_positions();
	}

	fn read_positions(&mut self) {
		let bodies = &mut self.bodies;
		self.graph.visit_nodes(|node| {
			if let Some(body) = bodies.get_mut(node.data.user_data.index) {
				match body.pinned {
					Some((x, y)) => {
						body.x = x;
						body.y = y;
					}
					None => {
						body.x = node.x() as f64;
						body.y = node.y() as f64;
					}
				}
			}
		});
	}

	fn write_positions(&mut self) {
		let bodies = &self.bodies;
		self.graph.visit_nodes_mut(|node| {
			if let Some(body) = bodies.get(node.data.user_data.index) {
				node.data.x = body.x as f32;
				node.data.y = body.y as f32;
			}
		});
	}

	fn apply_center(&mut self) {
		if self.bodies.is_empty() {
			return;
		}
		let n = self.bodies.len() as f64;
		let (sx, sy) = self
			.bodies
			.iter()
			.fold((0.0, 0.0), |(sx, sy), b| (sx + b.x, sy + b.y));
		let strength = self.params.center_strength;
		let (dx, dy) = (
			(sx / n - self.center.0) * strength,
			(sy / n - self.center.1) * strength,
		);
		for body in self.bodies.iter_mut().filter(|b| b.pinned.is_none()) {
			body.x -= dx;
			body.y -= dy;
		}
	}

	/// Pushes every overlapping pair apart along the line between them,
	/// split by squared radius. Pinned bodies never move.
	fn apply_collision(&mut self) {
		let margin = self.params.collision_margin;
		let n = self.bodies.len();

		for i in 0..n {
			for j in (i + 1)..n {
				let (a, b) = (self.bodies[i], self.bodies[j]);
				let (ra, rb) = (a.radius + margin, b.radius + margin);
				let r = ra + rb;
				let mut x = a.x - b.x;
				let mut y = a.y - b.y;
				if x * x + y * y >= r * r {
					continue;
				}
				if x == 0.0 {
					x = jiggle(&mut self.jiggle_state);
				}
				if y == 0.0 {
					y = jiggle(&mut self.jiggle_state);
				}
				let l = (x * x + y * y).sqrt();
				let overlap = (r - l) / l;

				let share = match (a.pinned.is_some(), b.pinned.is_some()) {
					(true, true) => continue,
					(true, false) => 0.0,
					(false, true) => 1.0,
					(false, false) => (rb * rb) / (ra * ra + rb * rb),
				};
				let a = &mut self.bodies[i];
				a.x += x * overlap * share;
				a.y += y * overlap * share;
				let b = &mut self.bodies[j];
				b.x -= x * overlap * (1.0 - share);
				b.y -= y * overlap * (1.0 - share);
			}
		}
	}
}

/// Tiny deterministic offset used to separate coincident points.
fn jiggle(state: &mut u32) -> f64 {
	*state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
	(*state as f64 / 4_294_967_296.0 - 0.5) * 1e-6
}
