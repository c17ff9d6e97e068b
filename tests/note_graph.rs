// Integration tests reuse lib deps, silence noisy lint.
#![allow(unused_crate_dependencies)]

use note_graph::components::note_graph::{
	InteractionConfig, PointerEvent, Simulation, SimulationConfig, Viewport,
};
use note_graph::{
	GraphConfig, GraphCounts, Note, NoteGraphState, TitleIndex, build_graph, links_within,
};

fn welcome_notes() -> Vec<Note> {
	vec![
		Note::new("w", "Welcome", "Start with [[Ideas]] and the [[reading list]]."),
		Note::new("i", "Ideas", "Back to [[welcome]]. Also [[Someday]]."),
		Note::new("r", "Reading List", "[[Ideas]] [[Ideas]] [[Reading List]]"),
		Note::new("e", "Empty", ""),
	]
}

fn session(notes: &[Note]) -> NoteGraphState {
	let sim = Simulation::with_seed(
		SimulationConfig::default(),
		Viewport::new(900.0, 700.0),
		11,
	);
	let mut state = NoteGraphState::from_simulation(sim, InteractionConfig::default());
	state.set_notes(notes, &build_graph(notes));
	state
}

#[test]
fn graph_of_welcome_notes() {
	let notes = welcome_notes();
	let links = build_graph(&notes);

	let mut pairs: Vec<(&str, &str)> = links.iter().map(|l| l.canonical()).collect();
	pairs.sort();
	assert_eq!(pairs, vec![("i", "r"), ("i", "w"), ("r", "w")]);

	let index = TitleIndex::new(&notes);
	assert!(index.resolve("someday").is_none());
	assert_eq!(index.resolve("READING list").map(|n| n.id.as_str()), Some("r"));
}

#[test]
fn session_counts_follow_filtering() {
	let notes = welcome_notes();
	let links = build_graph(&notes);
	let mut state = session(&notes);
	assert_eq!(state.counts(), GraphCounts { nodes: 4, edges: 3 });

	let visible: Vec<Note> = notes.iter().filter(|n| n.matches_query("idea")).cloned().collect();
	state.set_notes(&visible, &links_within(&links, &visible));
	// "Ideas" by title, "Welcome" and "Reading List" by content.
	assert_eq!(state.counts(), GraphCounts { nodes: 3, edges: 3 });

	// A link to a note outside the filter is not drawn or counted.
	state.set_notes(&visible[..2], &links);
	assert_eq!(state.counts(), GraphCounts { nodes: 2, edges: 1 });
}

#[test]
fn simulated_session_stays_in_bounds_and_finite() {
	let notes = welcome_notes();
	let mut state = session(&notes);
	for _ in 0..600 {
		state.tick();
	}
	for node in state.simulation.nodes() {
		assert!(node.x.is_finite() && node.y.is_finite());
		assert!((40.0..=860.0).contains(&node.x), "{node:?}");
		assert!((40.0..=660.0).contains(&node.y), "{node:?}");
	}
}

#[test]
fn drag_release_then_resize_keeps_layout() {
	let notes = welcome_notes();
	let mut state = session(&notes);
	for _ in 0..30 {
		state.tick();
	}

	let (x, y) = {
		let node = state.simulation.node("e").expect("node exists");
		(node.x, node.y)
	};
	state.pointer_down(PointerEvent::mouse(x, y));
	state.pointer_move(PointerEvent::mouse(450.0, 350.0));
	state.tick();
	assert_eq!(state.pointer_up(PointerEvent::mouse(450.0, 350.0)), Some("e".to_string()));
	assert_eq!(state.click(PointerEvent::mouse(450.0, 350.0)), None);

	let before: Vec<(f64, f64)> = state.simulation.nodes().iter().map(|n| (n.x, n.y)).collect();
	state.resize(1200.0, 900.0);
	let after: Vec<(f64, f64)> = state.simulation.nodes().iter().map(|n| (n.x, n.y)).collect();
	assert_eq!(before, after);
}

#[test]
fn default_config_round_trips_through_json() {
	let config = GraphConfig::from_json("{}").expect("empty object is a full config");
	assert_eq!(config, GraphConfig::default());
}
