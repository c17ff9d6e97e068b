//! Note and link data structures shared by the graph builder and the canvas.

use serde::{Deserialize, Serialize};

/// Opaque note identifier, stable for the note's lifetime.
pub type NoteId = String;

/// A note as handed over by the host application.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Note {
	/// Unique identifier. Used to reference notes in links.
	pub id: NoteId,
	/// Display title. Also the key that `[[title]]` references resolve against.
	pub title: String,
	/// Free text body, possibly containing `[[title]]` references.
	#[serde(default)]
	pub content: String,
}

impl Note {
	/// A note with the given id, title and body.
	pub fn new(id: impl Into<NoteId>, title: impl Into<String>, content: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			title: title.into(),
			content: content.into(),
		}
	}

	/// Case-insensitive substring match on title or content.
	/// An empty (or all-whitespace) query matches every note.
	pub fn matches_query(&self, query: &str) -> bool {
		let query = query.trim().to_lowercase();
		if query.is_empty() {
			return true;
		}
		self.title.to_lowercase().contains(&query) || self.content.to_lowercase().contains(&query)
	}
}

/// An undirected connection between two notes.
///
/// `source` is the note whose body first referenced `target`; the pair is
/// otherwise unordered.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct NoteLink {
	/// Referencing note.
	pub source: NoteId,
	/// Referenced note.
	pub target: NoteId,
}

impl NoteLink {
	/// The pair sorted into canonical order, used as the deduplication key.
	pub fn canonical(&self) -> (&str, &str) {
		if self.source <= self.target {
			(self.source.as_str(), self.target.as_str())
		} else {
			(self.target.as_str(), self.source.as_str())
		}
	}

	/// The endpoint opposite to `id`, if `id` is an endpoint.
	pub fn other(&self, id: &str) -> Option<&str> {
		if self.source == id {
			Some(self.target.as_str())
		} else if self.target == id {
			Some(self.source.as_str())
		} else {
			None
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_query_matches_everything() {
		let note = Note::new("a", "Groceries", "");
		assert!(note.matches_query(""));
		assert!(note.matches_query("   "));
	}

	#[test]
	fn query_matches_title_or_content_ignoring_case() {
		let note = Note::new("a", "Groceries", "Buy MILK and eggs");
		assert!(note.matches_query("grocer"));
		assert!(note.matches_query("milk"));
		assert!(!note.matches_query("bread"));
	}

	#[test]
	fn canonical_pair_ignores_orientation() {
		let ab = NoteLink {
			source: "a".into(),
			target: "b".into(),
		};
		let ba = NoteLink {
			source: "b".into(),
			target: "a".into(),
		};
		assert_eq!(ab.canonical(), ba.canonical());
		assert_eq!(ab.other("a"), Some("b"));
		assert_eq!(ba.other("a"), Some("b"));
		assert_eq!(ab.other("c"), None);
	}
}
