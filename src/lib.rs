//! note-graph: linked notes with an interactive force-directed graph view.
//!
//! Notes reference each other with `[[title]]` markers. This crate derives the
//! undirected link graph from note bodies and renders it as a live,
//! draggable force-directed layout in a WASM canvas component.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

#[cfg(target_arch = "wasm32")]
use getrandom as _;

pub mod components;
pub mod config;
pub mod error;
pub mod links;
pub mod types;

pub use components::note_graph::{GraphCounts, NoteGraphCanvas, NoteGraphState};
pub use config::GraphConfig;
pub use error::{ConfigError, GraphError};
pub use links::{TitleIndex, build_graph, extract_references, links_within};
pub use types::{Note, NoteId, NoteLink};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("note-graph: logging initialized");
}

/// Text content of the `<script>` element with the given id.
fn script_text(id: &str) -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id(id)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// Load notes from a script element with id="notes-data".
/// Expected format: JSON array of `{ id, title, content }`.
fn load_notes() -> Option<Vec<Note>> {
	let json_text = script_text("notes-data")?;
	match serde_json::from_str::<Vec<Note>>(&json_text) {
		Ok(notes) => {
			info!("note-graph: loaded {} notes", notes.len());
			Some(notes)
		}
		Err(e) => {
			warn!("note-graph: failed to parse notes: {}", e);
			None
		}
	}
}

/// Load tuning from an optional script element with id="graph-config".
fn load_config() -> GraphConfig {
	let Some(json_text) = script_text("graph-config") else {
		return GraphConfig::default();
	};
	GraphConfig::from_json(&json_text).unwrap_or_else(|e| {
		warn!("note-graph: {e}; using default configuration");
		GraphConfig::default()
	})
}

fn new_note_id() -> NoteId {
	format!("{:016x}", rand::random::<u64>())
}

/// Main application component.
///
/// Loads notes from the DOM, filters them by a search query and shows the
/// matching notes and their connections as a graph. Selecting a node shows
/// the note's references; following a reference to a missing note creates it.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let notes = RwSignal::new(load_notes().unwrap_or_default());
	let query = RwSignal::new(String::new());
	let selected = RwSignal::new(None::<NoteId>);
	let counts = RwSignal::new(GraphCounts::default());
	let config = load_config();

	let all_links = Memo::new(move |_| build_graph(&notes.get()));
	let visible = Memo::new(move |_| {
		let query = query.get();
		notes
			.get()
			.into_iter()
			.filter(|n| n.matches_query(&query))
			.collect::<Vec<_>>()
	});
	let visible_links = Memo::new(move |_| links_within(&all_links.get(), &visible.get()));
	let selected_note = Memo::new(move |_| {
		let id = selected.get()?;
		notes.get().into_iter().find(|n| n.id == id)
	});

	let navigate = Callback::new(move |title: String| {
		let existing = notes.with(|all| TitleIndex::new(all).resolve(&title).map(|n| n.id.clone()));
		let id = existing.unwrap_or_else(|| {
			let note = Note::new(new_note_id(), title.trim(), format!("# {}\n\n", title.trim()));
			let id = note.id.clone();
			info!("note-graph: created note for unresolved reference");
			notes.update(|all| all.push(note));
			id
		});
		selected.set(Some(id));
	});

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Note Graph" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-graph">
			<NoteGraphCanvas
				notes=visible
				links=visible_links
				selected=selected
				on_select=move |id: NoteId| selected.set(Some(id))
				on_counts=move |c: GraphCounts| counts.set(c)
				config=config
			/>
			<div class="graph-overlay">
				<input
					type="search"
					placeholder="Search notes"
					prop:value=move || query.get()
					on:input=move |ev| query.set(event_target_value(&ev))
				/>
				<p class="subtitle">
					{move || {
						let GraphCounts { nodes, edges } = counts.get();
						format!("{nodes} notes • {edges} connections")
					}}
				</p>
				{move || {
					selected_note
						.get()
						.map(|note| {
							let references: Vec<String> = extract_references(&note.content)
								.into_iter()
								.map(str::to_string)
								.collect();
							view! {
								<div class="selected-note">
									<h2>{note.title}</h2>
									<ul>
										{references
											.into_iter()
											.map(|title| {
												let target = title.clone();
												view! {
													<li>
														<a
															href="#"
															on:click=move |ev| {
																ev.prevent_default();
																navigate.run(target.clone());
															}
														>
															{title}
														</a>
													</li>
												}
											})
											.collect_view()}
									</ul>
								</div>
							}
						})
				}}
			</div>
		</div>
	}
}
