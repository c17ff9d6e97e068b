//! Force-directed layout of note nodes.
//!
//! Each call to [`Simulation::step`] advances one animation frame: pairwise
//! inverse-square repulsion, spring attraction along links, weak gravity
//! towards the viewport center, then damped integration and a boundary clamp.
//! The step is frame-paced rather than time-based. The layout is a visual
//! approximation that settles but never terminates.

use std::collections::HashMap;
use std::f64::consts::TAU;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;

use crate::types::{Note, NoteId, NoteLink};

/// Distances below this are treated as this, so coincident nodes stay finite.
const MIN_DISTANCE: f64 = 1.0;

/// Physics tuning.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
	/// Inverse-square repulsion numerator.
	pub repulsion: f64,
	/// Link length at which the spring force vanishes.
	pub spring_length: f64,
	/// Spring stiffness.
	pub spring_strength: f64,
	/// Pull towards the viewport center, proportional to displacement.
	pub gravity: f64,
	/// Velocity multiplier applied every step.
	pub damping: f64,
	/// Inset from the viewport edges that nodes are clamped to.
	pub padding: f64,
	/// Radius of the initial layout circle as a fraction of `min(width, height)`.
	pub layout_radius: f64,
	/// Span of the random offset added to initial positions.
	pub jitter: f64,
}

impl Default for SimulationConfig {
	fn default() -> Self {
		Self {
			repulsion: 2000.0,
			spring_length: 120.0,
			spring_strength: 0.02,
			gravity: 0.001,
			damping: 0.9,
			padding: 40.0,
			layout_radius: 0.35,
			jitter: 50.0,
		}
	}
}

/// Drawing surface size in device-independent pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
	/// Horizontal extent.
	pub width: f64,
	/// Vertical extent.
	pub height: f64,
}

impl Viewport {
	/// Negative sizes are treated as zero.
	pub fn new(width: f64, height: f64) -> Self {
		Self {
			width: width.max(0.0),
			height: height.max(0.0),
		}
	}

	/// Midpoint, the target of the gravity force.
	pub fn center(&self) -> (f64, f64) {
		(self.width / 2.0, self.height / 2.0)
	}

	/// Clamps a point into `[padding, dimension - padding]` on both axes.
	pub fn clamp(&self, x: f64, y: f64, padding: f64) -> (f64, f64) {
		(
			clamp_axis(x, self.width, padding),
			clamp_axis(y, self.height, padding),
		)
	}
}

/// An axis too short for its padding collapses to its midpoint.
fn clamp_axis(value: f64, length: f64, padding: f64) -> f64 {
	let mid = length / 2.0;
	let (lo, hi) = (padding.min(mid), (length - padding).max(mid));
	value.clamp(lo, hi)
}

/// Kinematic state of one note within a session.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	/// Id of the note this node stands for.
	pub id: NoteId,
	/// The note's title at the last reconcile.
	pub label: String,
	/// Horizontal position.
	pub x: f64,
	/// Vertical position.
	pub y: f64,
	/// Horizontal velocity per frame.
	pub vx: f64,
	/// Vertical velocity per frame.
	pub vy: f64,
}

/// Node positions and velocities plus the links between them.
pub struct Simulation {
	config: SimulationConfig,
	viewport: Viewport,
	nodes: Vec<GraphNode>,
	index: HashMap<NoteId, usize>,
	links: Vec<NoteLink>,
	/// `links` resolved to node indices; links with a missing endpoint are absent.
	edges: Vec<(usize, usize)>,
	rng: StdRng,
}

impl Simulation {
	/// An empty layout over `viewport` with entropy-seeded placement.
	pub fn new(config: SimulationConfig, viewport: Viewport) -> Self {
		Self::with_rng(config, viewport, StdRng::from_entropy())
	}

	/// Like [`Simulation::new`] with reproducible placement jitter.
	pub fn with_seed(config: SimulationConfig, viewport: Viewport, seed: u64) -> Self {
		Self::with_rng(config, viewport, StdRng::seed_from_u64(seed))
	}

	fn with_rng(config: SimulationConfig, viewport: Viewport, rng: StdRng) -> Self {
		Self {
			config,
			viewport,
			nodes: Vec::new(),
			index: HashMap::new(),
			links: Vec::new(),
			edges: Vec::new(),
			rng,
		}
	}

	/// Physics tuning in use.
	pub fn config(&self) -> &SimulationConfig {
		&self.config
	}

	/// Current bounds.
	pub fn viewport(&self) -> Viewport {
		self.viewport
	}

	/// Nodes in note order, which is also draw order.
	pub fn nodes(&self) -> &[GraphNode] {
		&self.nodes
	}

	/// Node of the note with `id`.
	pub fn node(&self, id: &str) -> Option<&GraphNode> {
		self.index_of(id).map(|i| &self.nodes[i])
	}

	/// Position of the note with `id` in [`Simulation::nodes`].
	pub fn index_of(&self, id: &str) -> Option<usize> {
		self.index.get(id).copied()
	}

	/// Links as last handed to [`Simulation::reconcile`].
	pub fn links(&self) -> &[NoteLink] {
		&self.links
	}

	/// Node pairs of every drawable link.
	pub fn edges(&self) -> impl Iterator<Item = (&GraphNode, &GraphNode)> + '_ {
		self.edges.iter().map(|&(a, b)| (&self.nodes[a], &self.nodes[b]))
	}

	/// Number of nodes.
	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	/// Number of links whose endpoints are both laid out.
	pub fn edge_count(&self) -> usize {
		self.edges.len()
	}

	/// Whether there is nothing to lay out.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Rebuilds the node set from `notes`, keeping the state of surviving ids.
	///
	/// New notes start on a circle around the viewport center with a little
	/// jitter and no velocity. Notes that disappeared are dropped.
	pub fn reconcile(&mut self, notes: &[Note], links: &[NoteLink]) {
		let mut previous: HashMap<NoteId, GraphNode> = self
			.nodes
			.drain(..)
			.map(|node| (node.id.clone(), node))
			.collect();

		let (cx, cy) = self.viewport.center();
		let radius = self.viewport.width.min(self.viewport.height) * self.config.layout_radius;
		let count = notes.len().max(1) as f64;

		self.index.clear();
		for (i, note) in notes.iter().enumerate() {
			if self.index.contains_key(&note.id) {
				continue;
			}
			let node = match previous.remove(&note.id) {
				Some(mut existing) => {
					existing.label = note.title.clone();
					existing
				}
				None => {
					let angle = i as f64 / count * TAU;
					let x = cx + angle.cos() * radius + self.jitter();
					let y = cy + angle.sin() * radius + self.jitter();
					let (x, y) = self.viewport.clamp(x, y, self.config.padding);
					GraphNode {
						id: note.id.clone(),
						label: note.title.clone(),
						x,
						y,
						vx: 0.0,
						vy: 0.0,
					}
				}
			};
			self.index.insert(node.id.clone(), self.nodes.len());
			self.nodes.push(node);
		}

		self.links = links.to_vec();
		self.resolve_edges();
	}

	fn jitter(&mut self) -> f64 {
		let span = self.config.jitter;
		if span > 0.0 {
			self.rng.gen_range(-span / 2.0..span / 2.0)
		} else {
			0.0
		}
	}

	fn resolve_edges(&mut self) {
		self.edges = self
			.links
			.iter()
			.filter_map(|link| {
				let a = self.index_of(&link.source)?;
				let b = self.index_of(&link.target)?;
				(a != b).then_some((a, b))
			})
			.collect();
	}

	/// Adopts new bounds and pulls every node inside them.
	///
	/// Positions are otherwise untouched; only nodes created later use the new
	/// center and radius.
	pub fn resize(&mut self, viewport: Viewport) {
		self.viewport = viewport;
		let padding = self.config.padding;
		for node in &mut self.nodes {
			(node.x, node.y) = viewport.clamp(node.x, node.y, padding);
		}
	}

	/// Moves a node to an exact position and stops it.
	pub fn place(&mut self, index: usize, x: f64, y: f64) {
		if let Some(node) = self.nodes.get_mut(index) {
			node.x = x;
			node.y = y;
			node.vx = 0.0;
			node.vy = 0.0;
		}
	}

	/// Advances the layout by one frame.
	///
	/// The `pinned` node is held in place: it still pushes and pulls the
	/// others but receives no forces and is not integrated.
	pub fn step(&mut self, pinned: Option<usize>) {
		if self.nodes.is_empty() {
			return;
		}
		let cfg = &self.config;
		let nodes = &mut self.nodes;
		let free = |i: usize| pinned != Some(i);

		for i in 0..nodes.len() {
			for j in (i + 1)..nodes.len() {
				let (dx, dy) = (nodes[j].x - nodes[i].x, nodes[j].y - nodes[i].y);
				let raw = (dx * dx + dy * dy).sqrt();
				let (ux, uy) = if raw > 0.0 { (dx / raw, dy / raw) } else { (1.0, 0.0) };
				let distance = raw.max(MIN_DISTANCE);
				let force = cfg.repulsion / (distance * distance);
				let (fx, fy) = (ux * force, uy * force);

				if free(i) {
					nodes[i].vx -= fx;
					nodes[i].vy -= fy;
				}
				if free(j) {
					nodes[j].vx += fx;
					nodes[j].vy += fy;
				}
			}
		}

		for &(a, b) in &self.edges {
			let (dx, dy) = (nodes[b].x - nodes[a].x, nodes[b].y - nodes[a].y);
			let raw = (dx * dx + dy * dy).sqrt();
			if raw == 0.0 {
				continue;
			}
			let force = (raw.max(MIN_DISTANCE) - cfg.spring_length) * cfg.spring_strength;
			let (fx, fy) = (dx / raw * force, dy / raw * force);

			if free(a) {
				nodes[a].vx += fx;
				nodes[a].vy += fy;
			}
			if free(b) {
				nodes[b].vx -= fx;
				nodes[b].vy -= fy;
			}
		}

		let (cx, cy) = self.viewport.center();
		for (i, node) in nodes.iter_mut().enumerate() {
			if !free(i) {
				continue;
			}
			node.vx = (node.vx + (cx - node.x) * cfg.gravity) * cfg.damping;
			node.vy = (node.vy + (cy - node.y) * cfg.gravity) * cfg.damping;
			node.x += node.vx;
			node.y += node.vy;
			(node.x, node.y) = self.viewport.clamp(node.x, node.y, cfg.padding);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sim(width: f64, height: f64) -> Simulation {
		Simulation::with_seed(SimulationConfig::default(), Viewport::new(width, height), 7)
	}

	fn notes(ids: &[&str]) -> Vec<Note> {
		ids.iter().map(|id| Note::new(*id, id.to_uppercase(), "")).collect()
	}

	fn link(a: &str, b: &str) -> NoteLink {
		NoteLink {
			source: a.into(),
			target: b.into(),
		}
	}

	fn distance(a: &GraphNode, b: &GraphNode) -> f64 {
		((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
	}

	#[test]
	fn new_nodes_start_on_circle_at_rest() {
		let mut s = sim(800.0, 600.0);
		s.reconcile(&notes(&["a", "b", "c", "d"]), &[]);
		let radius = 600.0 * 0.35;
		for node in s.nodes() {
			let d = ((node.x - 400.0).powi(2) + (node.y - 300.0).powi(2)).sqrt();
			assert!((d - radius).abs() <= 25.0 * std::f64::consts::SQRT_2 + 1e-9, "d = {d}");
			assert_eq!((node.vx, node.vy), (0.0, 0.0));
		}
	}

	#[test]
	fn same_seed_gives_same_layout() {
		let mut a = sim(800.0, 600.0);
		let mut b = sim(800.0, 600.0);
		a.reconcile(&notes(&["a", "b", "c"]), &[]);
		b.reconcile(&notes(&["a", "b", "c"]), &[]);
		assert_eq!(a.nodes(), b.nodes());
	}

	#[test]
	fn reconcile_preserves_existing_state() {
		let mut s = sim(800.0, 600.0);
		s.reconcile(&notes(&["a", "b"]), &[link("a", "b")]);
		for _ in 0..10 {
			s.step(None);
		}
		let before: Vec<GraphNode> = s.nodes().to_vec();

		s.reconcile(&notes(&["a", "b", "c"]), &[link("a", "b")]);
		assert_eq!(s.node_count(), 3);
		assert_eq!(s.node("a"), Some(&before[0]));
		assert_eq!(s.node("b"), Some(&before[1]));
	}

	#[test]
	fn reconcile_drops_removed_nodes_and_their_edges() {
		let mut s = sim(800.0, 600.0);
		s.reconcile(&notes(&["a", "b", "c"]), &[link("a", "b"), link("b", "c")]);
		assert_eq!(s.edge_count(), 2);

		s.reconcile(&notes(&["a", "c"]), &[link("a", "b"), link("b", "c")]);
		assert_eq!(s.node_count(), 2);
		assert!(s.node("b").is_none());
		assert_eq!(s.edge_count(), 0);
		assert_eq!(s.index_of("c"), Some(1));
	}

	#[test]
	fn reconcile_refreshes_labels() {
		let mut s = sim(800.0, 600.0);
		s.reconcile(&[Note::new("a", "Old", "")], &[]);
		s.reconcile(&[Note::new("a", "New", "")], &[]);
		assert_eq!(s.node("a").map(|n| n.label.as_str()), Some("New"));
	}

	#[test]
	fn repulsion_pushes_unlinked_nodes_apart() {
		let mut s = sim(800.0, 600.0);
		s.reconcile(&notes(&["a", "b"]), &[]);
		s.place(0, 395.0, 300.0);
		s.place(1, 405.0, 300.0);

		let mut last = distance(&s.nodes()[0], &s.nodes()[1]);
		for _ in 0..10 {
			s.step(None);
			let d = distance(&s.nodes()[0], &s.nodes()[1]);
			assert!(d >= last, "{d} < {last}");
			last = d;
		}
		assert!(last > 10.0);
	}

	#[test]
	fn coincident_nodes_separate_without_blowing_up() {
		let mut s = sim(800.0, 600.0);
		s.reconcile(&notes(&["a", "b"]), &[link("a", "b")]);
		s.place(0, 400.0, 300.0);
		s.place(1, 400.0, 300.0);
		s.step(None);
		let (a, b) = (&s.nodes()[0], &s.nodes()[1]);
		assert!(a.x.is_finite() && a.y.is_finite() && b.x.is_finite() && b.y.is_finite());
		assert!(distance(a, b) > 0.0);
	}

	#[test]
	fn linked_pair_settles_near_rest_length() {
		let mut s = sim(800.0, 600.0);
		s.reconcile(&notes(&["a", "b"]), &[link("a", "b")]);
		s.place(0, 100.0, 300.0);
		s.place(1, 700.0, 300.0);

		for _ in 0..2000 {
			s.step(None);
			for node in s.nodes() {
				assert!((40.0..=760.0).contains(&node.x));
				assert!((40.0..=560.0).contains(&node.y));
			}
		}
		let d = distance(&s.nodes()[0], &s.nodes()[1]);
		assert!((d - 120.0).abs() < 15.0, "settled at {d}");
	}

	#[test]
	fn pinned_node_stays_put_but_still_repels() {
		let mut s = sim(800.0, 600.0);
		s.reconcile(&notes(&["a", "b"]), &[]);
		s.place(0, 400.0, 300.0);
		s.place(1, 410.0, 300.0);

		s.step(Some(0));
		let (a, b) = (&s.nodes()[0], &s.nodes()[1]);
		assert_eq!((a.x, a.y, a.vx, a.vy), (400.0, 300.0, 0.0, 0.0));
		assert!(b.x > 410.0);
	}

	#[test]
	fn nodes_are_clamped_inside_padding() {
		let mut s = sim(200.0, 200.0);
		s.reconcile(&notes(&["a"]), &[]);
		s.place(0, 500.0, -50.0);
		s.step(None);
		let a = &s.nodes()[0];
		assert_eq!((a.x, a.y), (160.0, 40.0));
	}

	#[test]
	fn resize_keeps_positions_and_clamps_to_new_bounds() {
		let mut s = sim(800.0, 600.0);
		s.reconcile(&notes(&["a", "b"]), &[]);
		s.place(0, 100.0, 100.0);
		s.place(1, 700.0, 500.0);

		s.resize(Viewport::new(400.0, 300.0));
		assert_eq!((s.nodes()[0].x, s.nodes()[0].y), (100.0, 100.0));
		assert_eq!((s.nodes()[1].x, s.nodes()[1].y), (360.0, 260.0));
	}

	#[test]
	fn tiny_viewport_collapses_to_midpoint() {
		let mut s = sim(50.0, 30.0);
		s.reconcile(&notes(&["a", "b"]), &[]);
		for _ in 0..5 {
			s.step(None);
		}
		for node in s.nodes() {
			assert_eq!((node.x, node.y), (25.0, 15.0));
		}
	}

	#[test]
	fn stepping_empty_simulation_is_a_no_op() {
		let mut s = sim(800.0, 600.0);
		s.step(None);
		assert!(s.is_empty());
		assert_eq!(s.edge_count(), 0);
	}
}
