//! Force-directed note graph visualization.
//!
//! Renders linked notes on an HTML canvas with:
//! - Inverse-square repulsion, spring links and center gravity, stepped once per frame
//! - Identity-preserving node reconciliation when notes or the viewport change
//! - Mouse and touch dragging, mouse hover, and click/drag-release selection
//! - A cancelable animation loop scoped to the component's lifetime
//!
//! # Example
//!
//! ```ignore
//! use note_graph::{NoteGraphCanvas, Note, build_graph};
//!
//! let notes = RwSignal::new(vec![
//!     Note::new("a", "Ideas", "see [[Reading list]]"),
//!     Note::new("b", "Reading list", ""),
//! ]);
//! let links = Memo::new(move |_| build_graph(&notes.get()));
//! let selected = RwSignal::new(None);
//!
//! view! {
//!     <NoteGraphCanvas
//!         notes=notes
//!         links=links
//!         selected=selected
//!         on_select=move |id| selected.set(Some(id))
//!     />
//! }
//! ```

mod component;
mod interaction;
mod render;
mod scheduler;
mod simulation;
mod state;
mod theme;

pub use component::NoteGraphCanvas;
pub use interaction::{InteractionConfig, PointerEvent, PointerKind};
pub use simulation::{GraphNode, Simulation, SimulationConfig, Viewport};
pub use state::{GraphCounts, NoteGraphState};
pub use theme::ThemeName;
