//! Graph session state and interaction handling.
//!
//! [`NoteGraphState`] is the single mutable structure shared by the animation
//! loop and the pointer handlers. The host drives it through commands
//! (`set_notes`, `select`, `resize`) and reads back the selection and counts;
//! it never touches node kinematics directly.

use std::collections::HashSet;

use log::debug;

use super::interaction::{Interaction, InteractionConfig, PointerEvent, PointerKind, hit_test};
use super::simulation::{Simulation, SimulationConfig, Viewport};
use super::theme::NodeTier;
use crate::types::{Note, NoteId, NoteLink};

/// Displayed node and edge totals, reported to the host after every change.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GraphCounts {
	/// Notes laid out in the session.
	pub nodes: usize,
	/// Drawable links between them.
	pub edges: usize,
}

/// Core graph state combining the physics simulation with selection, drag and
/// hover tracking.
///
/// Created once when the canvas mounts, then mutated each frame by `tick` and
/// between frames by the pointer handlers.
pub struct NoteGraphState {
	/// Node layout and links.
	pub simulation: Simulation,
	pub(crate) interaction: Interaction,
	hit: InteractionConfig,
	selected: Option<NoteId>,
	/// Neighbors of `selected`.
	connected: HashSet<NoteId>,
}

impl NoteGraphState {
	/// A session over a `width` by `height` canvas with no notes yet.
	pub fn new(
		simulation: SimulationConfig,
		hit: InteractionConfig,
		width: f64,
		height: f64,
	) -> Self {
		Self::from_simulation(Simulation::new(simulation, Viewport::new(width, height)), hit)
	}

	/// Wraps an existing simulation, e.g. a seeded one.
	pub fn from_simulation(simulation: Simulation, hit: InteractionConfig) -> Self {
		Self {
			simulation,
			interaction: Interaction::default(),
			hit,
			selected: None,
			connected: HashSet::new(),
		}
	}

	/// Replaces the displayed notes and links, keeping surviving nodes' state.
	pub fn set_notes(&mut self, notes: &[Note], links: &[NoteLink]) {
		self.simulation.reconcile(notes, links);
		let sim = &self.simulation;
		self.interaction.retain(|id| sim.index_of(id).is_some());
		self.refresh_connected();
		debug!(
			"note-graph: reconciled {} nodes, {} edges",
			self.node_count(),
			self.edge_count()
		);
	}

	/// Host command: mark a note as selected (or clear the selection).
	pub fn select(&mut self, id: Option<NoteId>) {
		if self.selected == id {
			return;
		}
		self.selected = id;
		self.refresh_connected();
	}

	/// Id of the selected note.
	pub fn selected(&self) -> Option<&str> {
		self.selected.as_deref()
	}

	fn refresh_connected(&mut self) {
		self.connected.clear();
		let Some(selected) = self.selected.as_deref() else {
			return;
		};
		self.connected.extend(
			self.simulation
				.links()
				.iter()
				.filter_map(|link| link.other(selected))
				.map(str::to_string),
		);
	}

	/// Host command: the canvas was resized.
	pub fn resize(&mut self, width: f64, height: f64) {
		let viewport = Viewport::new(width, height);
		if viewport == self.simulation.viewport() {
			return;
		}
		debug!("note-graph: resize to {width}x{height}");
		self.simulation.resize(viewport);
	}

	/// Advances the simulation by one frame, holding the dragged node.
	pub fn tick(&mut self) {
		let pinned = self
			.interaction
			.dragging
			.as_deref()
			.and_then(|id| self.simulation.index_of(id));
		self.simulation.step(pinned);
	}

	/// Number of displayed notes.
	pub fn node_count(&self) -> usize {
		self.simulation.node_count()
	}

	/// Number of displayed links.
	pub fn edge_count(&self) -> usize {
		self.simulation.edge_count()
	}

	/// Both totals at once.
	pub fn counts(&self) -> GraphCounts {
		GraphCounts {
			nodes: self.node_count(),
			edges: self.edge_count(),
		}
	}

	/// How prominently the node with `id` is drawn.
	pub(crate) fn tier(&self, id: &str) -> NodeTier {
		if self.selected.as_deref() == Some(id) {
			NodeTier::Selected
		} else if self.interaction.hovered.as_deref() == Some(id) {
			NodeTier::Hovered
		} else if self.connected.contains(id) {
			NodeTier::Connected
		} else {
			NodeTier::Default
		}
	}

	/// Whether an edge between `a` and `b` touches the selected node.
	pub(crate) fn is_emphasized(&self, a: &str, b: &str) -> bool {
		self.selected
			.as_deref()
			.is_some_and(|selected| selected == a || selected == b)
	}

	fn node_at(&self, ev: &PointerEvent) -> Option<usize> {
		hit_test(
			self.simulation.nodes(),
			ev.x,
			ev.y,
			self.hit.hit_radius(ev.kind),
		)
	}

	fn id_at(&self, ev: &PointerEvent) -> Option<NoteId> {
		self.node_at(ev)
			.map(|i| self.simulation.nodes()[i].id.clone())
	}

	/// Starts dragging the node under the pointer, if any.
	pub fn pointer_down(&mut self, ev: PointerEvent) {
		self.interaction.swallow_click = false;
		let Some(idx) = self.node_at(&ev) else {
			return;
		};
		let node = &self.simulation.nodes()[idx];
		let (id, x, y) = (node.id.clone(), node.x, node.y);
		self.simulation.place(idx, x, y);
		self.interaction.dragging = Some(id);
	}

	/// Moves the dragged node to the pointer, or updates mouse hover.
	pub fn pointer_move(&mut self, ev: PointerEvent) {
		if let Some(id) = self.interaction.dragging.as_deref() {
			if let Some(idx) = self.simulation.index_of(id) {
				self.simulation.place(idx, ev.x, ev.y);
			}
			return;
		}
		if ev.kind == PointerKind::Mouse {
			self.interaction.hovered = self.id_at(&ev);
		}
	}

	/// Ends a drag. Releasing over the same node that was picked up selects it.
	///
	/// The click the browser dispatches after any drag is swallowed, so a drag
	/// dropped onto another node never selects that node.
	pub fn pointer_up(&mut self, ev: PointerEvent) -> Option<NoteId> {
		let dragged = self.interaction.dragging.take()?;
		self.interaction.swallow_click = true;
		(self.id_at(&ev).as_ref() == Some(&dragged)).then_some(dragged)
	}

	/// A click that did not end a drag.
	pub fn click(&mut self, ev: PointerEvent) -> Option<NoteId> {
		if std::mem::take(&mut self.interaction.swallow_click) {
			return None;
		}
		self.id_at(&ev)
	}

	/// The pointer left the canvas: drop any drag and hover.
	pub fn pointer_leave(&mut self) {
		self.interaction.dragging = None;
		self.interaction.hovered = None;
		self.interaction.swallow_click = false;
	}
}
