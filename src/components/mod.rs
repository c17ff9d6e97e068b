//! UI components.

pub mod note_graph;
