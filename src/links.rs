//! `[[title]]` reference extraction and link graph derivation.
//!
//! References resolve against note titles after trimming and lowercasing.
//! The resulting edge set is undirected and deduplicated: a pair of notes is
//! connected at most once, whichever side referenced the other and however
//! many times.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;

use crate::types::{Note, NoteLink};

static REFERENCE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"\[\[([^\]]+)\]\]").expect("reference pattern is valid"));

/// Returns every `[[title]]` reference in `text`, left to right.
///
/// Duplicates are kept. Empty markers (`[[]]`) and unclosed `[[` are plain text.
pub fn extract_references(text: &str) -> Vec<&str> {
	REFERENCE
		.captures_iter(text)
		.filter_map(|caps| caps.get(1))
		.map(|m| m.as_str())
		.collect()
}

/// Matching key for titles and references.
pub fn normalize_title(title: &str) -> String {
	title.trim().to_lowercase()
}

/// Normalized title to note lookup, built once per graph rebuild.
///
/// When several notes share a title the first one in collection order wins.
pub struct TitleIndex<'a> {
	by_title: HashMap<String, &'a Note>,
}

impl<'a> TitleIndex<'a> {
	/// Indexes `notes` by normalized title.
	pub fn new(notes: &'a [Note]) -> Self {
		let mut by_title = HashMap::with_capacity(notes.len());
		for note in notes {
			by_title.entry(normalize_title(&note.title)).or_insert(note);
		}
		Self { by_title }
	}

	/// Finds the note a reference points at.
	pub fn resolve(&self, title: &str) -> Option<&'a Note> {
		self.by_title.get(&normalize_title(title)).copied()
	}
}

/// Derives the deduplicated, undirected link set of a note collection.
///
/// Unresolved references and self references contribute nothing. Links come
/// back in first-discovered order, so equal input gives equal output.
pub fn build_graph(notes: &[Note]) -> Vec<NoteLink> {
	let index = TitleIndex::new(notes);
	let mut seen: HashSet<(String, String)> = HashSet::new();
	let mut links = Vec::new();

	for note in notes {
		for reference in extract_references(&note.content) {
			let Some(target) = index.resolve(reference) else {
				continue;
			};
			if target.id == note.id {
				continue;
			}
			let link = NoteLink {
				source: note.id.clone(),
				target: target.id.clone(),
			};
			let (a, b) = link.canonical();
			if seen.insert((a.to_string(), b.to_string())) {
				links.push(link);
			}
		}
	}

	links
}

/// Keeps only links whose endpoints are both in `notes`.
pub fn links_within(links: &[NoteLink], notes: &[Note]) -> Vec<NoteLink> {
	let ids: HashSet<&str> = notes.iter().map(|n| n.id.as_str()).collect();
	links
		.iter()
		.filter(|l| ids.contains(l.source.as_str()) && ids.contains(l.target.as_str()))
		.cloned()
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn note(id: &str, title: &str, content: &str) -> Note {
		Note::new(id, title, content)
	}

	#[test]
	fn extracts_references_in_order() {
		assert_eq!(extract_references("[[A]] and [[B]]"), vec!["A", "B"]);
	}

	#[test]
	fn keeps_duplicate_references() {
		assert_eq!(extract_references("[[A]] [[A]]"), vec!["A", "A"]);
	}

	#[test]
	fn plain_text_has_no_references() {
		assert!(extract_references("no links here").is_empty());
		assert!(extract_references("").is_empty());
	}

	#[test]
	fn adjacent_references_are_separate() {
		assert_eq!(extract_references("[[A]][[B]]"), vec!["A", "B"]);
	}

	#[test]
	fn malformed_markers_are_plain_text() {
		assert!(extract_references("[[unclosed").is_empty());
		assert!(extract_references("[[]]").is_empty());
		assert_eq!(extract_references("[[open [[Closed]]"), vec!["open [[Closed"]);
		assert_eq!(extract_references("[[a]b]] then [[c]]"), vec!["c"]);
	}

	#[test]
	fn resolves_titles_trimmed_and_case_insensitive() {
		let notes = vec![note("1", "  Rust Notes ", "")];
		let index = TitleIndex::new(&notes);
		assert_eq!(index.resolve("rust notes").map(|n| n.id.as_str()), Some("1"));
		assert_eq!(index.resolve(" RUST NOTES").map(|n| n.id.as_str()), Some("1"));
		assert!(index.resolve("rust").is_none());
	}

	#[test]
	fn duplicate_titles_resolve_to_first_note() {
		let notes = vec![note("1", "Same", ""), note("2", "same", "")];
		let index = TitleIndex::new(&notes);
		assert_eq!(index.resolve("SAME").map(|n| n.id.as_str()), Some("1"));
	}

	#[test]
	fn one_way_reference_gives_one_edge() {
		let notes = vec![note("x", "X", "see [[Y]]"), note("y", "Y", "")];
		let links = build_graph(&notes);
		assert_eq!(
			links,
			vec![NoteLink {
				source: "x".into(),
				target: "y".into()
			}]
		);
	}

	#[test]
	fn mutual_and_repeated_references_dedupe() {
		let notes = vec![
			note("x", "X", "[[Y]] [[y]] [[ Y ]]"),
			note("y", "Y", "back to [[X]]"),
		];
		let links = build_graph(&notes);
		assert_eq!(links.len(), 1);
		assert_eq!(links[0].canonical(), ("x", "y"));
	}

	#[test]
	fn self_and_unresolved_references_are_ignored() {
		let notes = vec![note("x", "X", "[[X]] [[Nowhere]]")];
		assert!(build_graph(&notes).is_empty());
	}

	#[test]
	fn build_is_deterministic() {
		let notes = vec![
			note("a", "A", "[[B]] [[C]]"),
			note("b", "B", "[[C]]"),
			note("c", "C", "[[A]]"),
		];
		let first = build_graph(&notes);
		assert_eq!(first, build_graph(&notes));
		let pairs: Vec<_> = first.iter().map(|l| (l.source.as_str(), l.target.as_str())).collect();
		assert_eq!(pairs, vec![("a", "b"), ("a", "c"), ("b", "c")]);
	}

	#[test]
	fn links_within_drops_hidden_endpoints() {
		let notes = vec![
			note("a", "A", "[[B]] [[C]]"),
			note("b", "B", ""),
			note("c", "C", ""),
		];
		let links = build_graph(&notes);
		let visible = links_within(&links, &notes[..2]);
		assert_eq!(visible.len(), 1);
		assert_eq!(visible[0].target, "b");
	}
}
