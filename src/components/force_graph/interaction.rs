//! Pointer gesture tracking.
//!
//! Raw pointer input (already hit-tested against the graph) is turned into
//! [`Intent`]s: drag, pan, click, hover and zoom. A press that stays within
//! [`CLICK_DISTANCE`] pixels of where it started is a click; anything further
//! is a drag or pan and produces no click. A press on a node captures the
//! pointer for a drag, so it never pans, and wheel input is ignored until it
//! is released.

/// Maximum pointer travel, in screen pixels, for a press to count as a click.
pub const CLICK_DISTANCE: f64 = 3.0;

/// Wheel zoom step per notch.
const ZOOM_IN: f64 = 1.1;
const ZOOM_OUT: f64 = 0.9;

/// Pointer input in canvas pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerInput {
	Down { x: f64, y: f64 },
	Move { x: f64, y: f64 },
	Up { x: f64, y: f64 },
	/// Pointer left the canvas; ends any gesture without a click.
	Leave,
	Wheel { x: f64, y: f64, delta_y: f64 },
}

impl PointerInput {
	/// Screen position, for inputs that have one worth hit-testing.
	pub fn position(&self) -> Option<(f64, f64)> {
		match *self {
			PointerInput::Down { x, y } | PointerInput::Move { x, y } | PointerInput::Up { x, y } => {
				Some((x, y))
			}
			PointerInput::Leave | PointerInput::Wheel { .. } => None,
		}
	}
}

/// What a pointer input means for the graph.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Intent {
	/// The node under an idle pointer changed.
	Hover(Option<usize>),
	DragStart { node: usize },
	/// Total screen-space offset since the press.
	DragMove { node: usize, dx: f64, dy: f64 },
	/// `click` is set when the press never travelled past the click distance.
	DragEnd { node: usize, click: bool },
	PanStart,
	/// Total screen-space offset since the press.
	PanMove { dx: f64, dy: f64 },
	PanEnd { click: bool },
	Zoom { x: f64, y: f64, factor: f64 },
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
enum Gesture {
	#[default]
	Idle,
	Node {
		node: usize,
		start: (f64, f64),
		moved: bool,
	},
	Background {
		start: (f64, f64),
		moved: bool,
	},
}

/// Tracks one pointer's gesture across down/move/up.
#[derive(Clone, Debug, Default)]
pub struct GestureTracker {
	gesture: Gesture,
	hovered: Option<usize>,
}

impl GestureTracker {
	/// Feeds one input. `hit` is the node under the pointer, if any.
	pub fn on_input(&mut self, input: PointerInput, hit: Option<usize>) -> Option<Intent> {
		match (input, self.gesture) {
			(PointerInput::Wheel { .. }, Gesture::Node { .. }) => None,
			(PointerInput::Wheel { x, y, delta_y }, _) => Some(Intent::Zoom {
				x,
				y,
				factor: if delta_y > 0.0 { ZOOM_OUT } else { ZOOM_IN },
			}),

			(PointerInput::Down { x, y }, _) => match hit {
				Some(node) => {
					self.gesture = Gesture::Node {
						node,
						start: (x, y),
						moved: false,
					};
					Some(Intent::DragStart { node })
				}
				None => {
					self.gesture = Gesture::Background {
						start: (x, y),
						moved: false,
					};
					Some(Intent::PanStart)
				}
			},

			(PointerInput::Move { x, y }, Gesture::Node { node, start, moved }) => {
				let (dx, dy) = (x - start.0, y - start.1);
				self.gesture = Gesture::Node {
					node,
					start,
					moved: moved || beyond_click_distance(dx, dy),
				};
				Some(Intent::DragMove { node, dx, dy })
			}
			(PointerInput::Move { x, y }, Gesture::Background { start, moved }) => {
				let (dx, dy) = (x - start.0, y - start.1);
				self.gesture = Gesture::Background {
					start,
					moved: moved || beyond_click_distance(dx, dy),
				};
				Some(Intent::PanMove { dx, dy })
			}
			(PointerInput::Move { .. }, Gesture::Idle) => {
				if self.hovered == hit {
					return None;
				}
				self.hovered = hit;
				Some(Intent::Hover(hit))
			}

			// Hover is re-reported on the next idle move.
			(PointerInput::Up { x, y }, Gesture::Node { node, start, moved }) => {
				self.gesture = Gesture::Idle;
				self.hovered = None;
				let moved = moved || beyond_click_distance(x - start.0, y - start.1);
				Some(Intent::DragEnd { node, click: !moved })
			}
			(PointerInput::Up { x, y }, Gesture::Background { start, moved }) => {
				self.gesture = Gesture::Idle;
				self.hovered = None;
				let moved = moved || beyond_click_distance(x - start.0, y - start.1);
				Some(Intent::PanEnd { click: !moved })
			}
			(PointerInput::Up { .. }, Gesture::Idle) => None,

			(PointerInput::Leave, gesture) => {
				self.gesture = Gesture::Idle;
				match gesture {
					Gesture::Node { node, .. } => Some(Intent::DragEnd { node, click: false }),
					Gesture::Background { .. } => Some(Intent::PanEnd { click: false }),
					Gesture::Idle => self.hovered.take().map(|_| Intent::Hover(None)),
				}
			}
		}
	}

	pub fn is_dragging(&self) -> bool {
		matches!(self.gesture, Gesture::Node { .. })
	}

	pub fn is_panning(&self) -> bool {
		matches!(self.gesture, Gesture::Background { .. })
	}
}

fn beyond_click_distance(dx: f64, dy: f64) -> bool {
	dx * dx + dy * dy > CLICK_DISTANCE * CLICK_DISTANCE
}
