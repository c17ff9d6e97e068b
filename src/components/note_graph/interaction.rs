//! Pointer input normalization, hit testing, and drag/hover tracking.

use serde::Deserialize;

use super::simulation::GraphNode;
use crate::types::NoteId;

/// Which kind of device produced a pointer event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerKind {
	/// Mouse or other cursor device; can hover.
	Mouse,
	/// Finger on a touch screen.
	Touch,
}

/// A pointer position relative to the canvas, normalized from mouse and touch
/// events at the DOM boundary.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
	/// Originating device.
	pub kind: PointerKind,
	/// Canvas-relative horizontal position.
	pub x: f64,
	/// Canvas-relative vertical position.
	pub y: f64,
}

impl PointerEvent {
	/// A mouse event at canvas coordinates.
	pub fn mouse(x: f64, y: f64) -> Self {
		Self {
			kind: PointerKind::Mouse,
			x,
			y,
		}
	}

	/// A touch event at canvas coordinates.
	pub fn touch(x: f64, y: f64) -> Self {
		Self {
			kind: PointerKind::Touch,
			x,
			y,
		}
	}
}

/// Hit-test tolerances.
///
/// Fingers are less precise than a cursor, so touches get a larger radius.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct InteractionConfig {
	/// Pick-up distance for the mouse.
	pub mouse_hit_radius: f64,
	/// Pick-up distance for touches.
	pub touch_hit_radius: f64,
}

impl Default for InteractionConfig {
	fn default() -> Self {
		Self {
			mouse_hit_radius: 20.0,
			touch_hit_radius: 30.0,
		}
	}
}

impl InteractionConfig {
	/// Pick-up distance for events of `kind`.
	pub fn hit_radius(&self, kind: PointerKind) -> f64 {
		match kind {
			PointerKind::Mouse => self.mouse_hit_radius,
			PointerKind::Touch => self.touch_hit_radius,
		}
	}
}

/// Index of the topmost node within `radius` of `(x, y)`.
///
/// Nodes are drawn in slice order, so the search runs back to front.
pub fn hit_test(nodes: &[GraphNode], x: f64, y: f64, radius: f64) -> Option<usize> {
	let radius_sq = radius * radius;
	nodes.iter().rposition(|node| {
		let (dx, dy) = (node.x - x, node.y - y);
		dx * dx + dy * dy < radius_sq
	})
}

/// Drag and hover state of one graph session.
#[derive(Clone, Debug, Default)]
pub struct Interaction {
	/// Node currently held by the pointer.
	pub dragging: Option<NoteId>,
	/// Node under the mouse cursor, when not dragging.
	pub hovered: Option<NoteId>,
	/// Set by a drag release so the click the browser dispatches right after
	/// it is not treated as a fresh selection.
	pub(crate) swallow_click: bool,
}

impl Interaction {
	/// Forgets any drag or hover on ids that no longer exist.
	pub fn retain(&mut self, exists: impl Fn(&str) -> bool) {
		if self.dragging.as_deref().is_some_and(|id| !exists(id)) {
			self.dragging = None;
		}
		if self.hovered.as_deref().is_some_and(|id| !exists(id)) {
			self.hovered = None;
		}
	}
}
