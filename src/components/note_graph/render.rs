//! Canvas rendering for the note graph.
//!
//! Passes, back to front:
//! 1. Background fill (or the empty-graph placeholder)
//! 2. Edges, emphasized where they touch the selected note
//! 3. Nodes styled by tier, then labels with a translucent backdrop

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::simulation::GraphNode;
use super::state::NoteGraphState;
use super::theme::{NodeTier, Theme};

/// Text shown when there is nothing to lay out.
pub const PLACEHOLDER: &str = "Create a note to see the graph";

const ELLIPSIS: &str = "...";
const LABEL_PADDING: f64 = 3.0;
const LABEL_HEIGHT: f64 = 14.0;

/// Cuts a title to `max_chars` characters, marking the cut with an ellipsis.
pub fn truncate_label(title: &str, max_chars: usize) -> String {
	match title.char_indices().nth(max_chars) {
		Some((cut, _)) => format!("{}{ELLIPSIS}", &title[..cut]),
		None => title.to_string(),
	}
}

/// Renders the complete graph to the canvas.
pub fn render(state: &NoteGraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let viewport = state.simulation.viewport();
	ctx.clear_rect(0.0, 0.0, viewport.width, viewport.height);
	ctx.set_fill_style_str(&theme.background.to_css());
	ctx.fill_rect(0.0, 0.0, viewport.width, viewport.height);

	if state.simulation.is_empty() {
		draw_placeholder(state, ctx, theme);
		return;
	}

	draw_edges(state, ctx, theme);

	for node in state.simulation.nodes() {
		let tier = state.tier(&node.id);
		draw_node(ctx, node, tier, theme);
		draw_label(ctx, node, tier, theme);
	}
}

fn draw_placeholder(state: &NoteGraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let (cx, cy) = state.simulation.viewport().center();
	ctx.set_fill_style_str(&theme.placeholder.to_css());
	ctx.set_font(&theme.label.font);
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	let _ = ctx.fill_text(PLACEHOLDER, cx, cy);
}

fn draw_edges(state: &NoteGraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let edge = &theme.edge;
	for (a, b) in state.simulation.edges() {
		let (color, width) = if state.is_emphasized(&a.id, &b.id) {
			(edge.emphasis_color, edge.emphasis_width)
		} else {
			(edge.color, edge.width)
		};
		ctx.set_stroke_style_str(&color.to_css());
		ctx.set_line_width(width);
		ctx.begin_path();
		ctx.move_to(a.x, a.y);
		ctx.line_to(b.x, b.y);
		ctx.stroke();
	}
}

fn draw_node(ctx: &CanvasRenderingContext2d, node: &GraphNode, tier: NodeTier, theme: &Theme) {
	let style = theme.tier(tier);

	ctx.begin_path();
	let _ = ctx.arc(node.x, node.y, style.radius, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(&style.fill.to_css());
	ctx.fill();

	if let Some(ring) = style.ring {
		ctx.set_stroke_style_str(&ring.to_css());
		ctx.set_line_width(2.0);
		ctx.stroke();
	}
}

fn draw_label(ctx: &CanvasRenderingContext2d, node: &GraphNode, tier: NodeTier, theme: &Theme) {
	let label_style = &theme.label;
	let label = truncate_label(&node.label, label_style.max_chars);
	if label.is_empty() {
		return;
	}

	let font = if tier == NodeTier::Selected {
		&label_style.selected_font
	} else {
		&label_style.font
	};
	ctx.set_font(font);
	ctx.set_text_align("center");
	ctx.set_text_baseline("top");

	let top = node.y + theme.tier(tier).radius + label_style.offset;
	let width = ctx
		.measure_text(&label)
		.map(|m| m.width())
		.unwrap_or(label.chars().count() as f64 * 6.0);

	ctx.set_fill_style_str(&label_style.backdrop.to_css());
	ctx.fill_rect(
		node.x - width / 2.0 - LABEL_PADDING,
		top - LABEL_PADDING / 2.0,
		width + LABEL_PADDING * 2.0,
		LABEL_HEIGHT + LABEL_PADDING,
	);

	ctx.set_fill_style_str(&label_style.color.to_css());
	let _ = ctx.fill_text(&label, node.x, top);
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn short_titles_are_untouched() {
		assert_eq!(truncate_label("Groceries", 20), "Groceries");
		assert_eq!(truncate_label("", 20), "");
		assert_eq!(truncate_label("exactly-twenty-chars", 20), "exactly-twenty-chars");
	}

	#[test]
	fn long_titles_get_ellipsis() {
		assert_eq!(
			truncate_label("A rather long note title indeed", 20),
			"A rather long note t..."
		);
	}

	#[test]
	fn truncation_respects_char_boundaries() {
		assert_eq!(truncate_label("ééééé", 3), "ééé...");
		assert_eq!(truncate_label("Bem-vindo ao MindFlow", 9), "Bem-vindo...");
	}
}
