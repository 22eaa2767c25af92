//! Selection state machine.
//!
//! At most one node is selected. Selecting a node also records its neighbor
//! set, so the highlight pass never rescans links per frame.

use std::collections::HashSet;

use super::snapshot::{GraphSnapshot, SnapshotLink};

/// Messages that drive the selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionEvent {
	/// Click on a node: select it, or deselect it if already selected.
	Toggle(usize),
	/// Click on empty canvas, or an external reset.
	Clear,
}

/// How a node relates to the current selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeRole {
	/// Nothing is selected.
	Idle,
	Selected,
	Neighbor,
	/// Something else is selected and this node is not adjacent to it.
	Dimmed,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum Selection {
	#[default]
	None,
	Active {
		node: usize,
		neighbors: HashSet<usize>,
	},
}

impl Selection {
	/// Applies an event. Returns `true` if the selection changed.
	pub fn apply(&mut self, event: SelectionEvent, snapshot: &GraphSnapshot) -> bool {
		let next = match event {
			SelectionEvent::Clear => Selection::None,
			SelectionEvent::Toggle(idx) if idx >= snapshot.len() => return false,
			SelectionEvent::Toggle(idx) if self.selected() == Some(idx) => Selection::None,
			SelectionEvent::Toggle(idx) => Selection::Active {
				node: idx,
				neighbors: snapshot.neighbors(idx),
			},
		};

		if *self == next {
			return false;
		}
		*self = next;
		true
	}

	pub fn selected(&self) -> Option<usize> {
		match self {
			Selection::None => None,
			Selection::Active { node, .. } => Some(*node),
		}
	}

	pub fn is_active(&self) -> bool {
		matches!(self, Selection::Active { .. })
	}

	pub fn role(&self, idx: usize) -> NodeRole {
		match self {
			Selection::None => NodeRole::Idle,
			Selection::Active { node, .. } if *node == idx => NodeRole::Selected,
			Selection::Active { neighbors, .. } if neighbors.contains(&idx) => NodeRole::Neighbor,
			Selection::Active { .. } => NodeRole::Dimmed,
		}
	}

	/// Whether a link has the selected node as an endpoint.
	pub fn touches(&self, link: &SnapshotLink) -> bool {
		self.selected().is_some_and(|node| link.touches(node))
	}
}
