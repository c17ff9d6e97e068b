//! Leptos component wrapping the note graph canvas.
//!
//! The component creates a canvas sized to its parent element and wires up
//! mouse and touch handlers for hovering, dragging, and selecting notes. One
//! graph session (animation task plus window resize listener) is started when
//! the canvas mounts and torn down when the component is cleaned up.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{error, info};
use send_wrapper::SendWrapper;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, TouchEvent};

use super::interaction::PointerEvent;
use super::render;
use super::scheduler::{AnimationTask, WindowListener};
use super::state::{GraphCounts, NoteGraphState};
use super::theme::Theme;
use crate::config::GraphConfig;
use crate::error::GraphError;
use crate::types::{Note, NoteId, NoteLink};

const FALLBACK_WIDTH: f64 = 600.0;
const FALLBACK_HEIGHT: f64 = 400.0;

/// Bundles the session state with what is needed to draw it.
struct GraphContext {
	state: NoteGraphState,
	theme: Theme,
	ctx: CanvasRenderingContext2d,
}

type SharedContext = Rc<RefCell<Option<GraphContext>>>;

/// Browser resources owned by one graph session.
struct Session {
	animation: AnimationTask,
	resize: WindowListener,
}

impl Session {
	fn teardown(self) {
		self.animation.cancel();
		self.resize.detach();
		info!("note-graph: session ended");
	}
}

/// Renders the note graph on a canvas element.
///
/// `notes` and `links` are the notes and connections to display; `selected`
/// is the host's current selection. Clicking a node, or releasing a drag over
/// the node that was picked up, reports its id through `on_select`.
/// `on_counts` receives the session's node and edge totals whenever the
/// displayed graph changes.
#[component]
pub fn NoteGraphCanvas(
	#[prop(into)] notes: Signal<Vec<Note>>,
	#[prop(into)] links: Signal<Vec<NoteLink>>,
	#[prop(into)] selected: Signal<Option<NoteId>>,
	#[prop(into)] on_select: Callback<NoteId>,
	#[prop(optional, into)] on_counts: Option<Callback<GraphCounts>>,
	#[prop(optional)] config: GraphConfig,
) -> impl IntoView {
	let report = move |counts: GraphCounts| {
		if let Some(cb) = on_counts {
			cb.run(counts);
		}
	};

	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: SharedContext = Rc::new(RefCell::new(None));
	let session: Rc<RefCell<Option<Session>>> = Rc::new(RefCell::new(None));

	let (context_init, session_init) = (context.clone(), session.clone());
	Effect::new(move |_| {
		if session_init.borrow().is_some() {
			return;
		}
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let started = start_session(
			canvas.into(),
			context_init.clone(),
			&notes.get_untracked(),
			&links.get_untracked(),
			selected.get_untracked(),
			&config,
		);
		match started {
			Ok((s, counts)) => {
				*session_init.borrow_mut() = Some(s);
				report(counts);
			}
			Err(err) => error!("note-graph: failed to start session: {err}"),
		}
	});

	let context_sync = context.clone();
	Effect::new(move |_| {
		let (notes, links) = (notes.get(), links.get());
		let counts = context_sync.borrow_mut().as_mut().map(|c| {
			c.state.set_notes(&notes, &links);
			c.state.counts()
		});
		if let Some(counts) = counts {
			report(counts);
		}
	});

	let context_sel = context.clone();
	Effect::new(move |_| {
		let id = selected.get();
		if let Some(ref mut c) = *context_sel.borrow_mut() {
			c.state.select(id);
		}
	});

	let session_cleanup = SendWrapper::new(session);
	on_cleanup(move || {
		if let Some(s) = session_cleanup.borrow_mut().take() {
			s.teardown();
		}
	});

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some(pointer) = mouse_pointer(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut c) = *context_md.borrow_mut() {
			c.state.pointer_down(pointer);
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(pointer) = mouse_pointer(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut c) = *context_mm.borrow_mut() {
			c.state.pointer_move(pointer);
		}
	};

	let context_mu = context.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let Some(pointer) = mouse_pointer(canvas_ref, &ev) else {
			return;
		};
		let picked = context_mu
			.borrow_mut()
			.as_mut()
			.and_then(|c| c.state.pointer_up(pointer));
		if let Some(id) = picked {
			on_select.run(id);
		}
	};

	let context_ck = context.clone();
	let on_click = move |ev: MouseEvent| {
		let Some(pointer) = mouse_pointer(canvas_ref, &ev) else {
			return;
		};
		let picked = context_ck
			.borrow_mut()
			.as_mut()
			.and_then(|c| c.state.click(pointer));
		if let Some(id) = picked {
			on_select.run(id);
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			c.state.pointer_leave();
		}
	};

	let context_ts = context.clone();
	let on_touchstart = move |ev: TouchEvent| {
		ev.prevent_default();
		let Some(pointer) = touch_pointer(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut c) = *context_ts.borrow_mut() {
			c.state.pointer_down(pointer);
		}
	};

	let context_tm = context.clone();
	let on_touchmove = move |ev: TouchEvent| {
		ev.prevent_default();
		let Some(pointer) = touch_pointer(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut c) = *context_tm.borrow_mut() {
			c.state.pointer_move(pointer);
		}
	};

	let context_te = context.clone();
	let on_touchend = move |ev: TouchEvent| {
		ev.prevent_default();
		let Some(pointer) = touch_pointer(canvas_ref, &ev) else {
			return;
		};
		let picked = context_te
			.borrow_mut()
			.as_mut()
			.and_then(|c| c.state.pointer_up(pointer));
		if let Some(id) = picked {
			on_select.run(id);
		}
	};

	let context_tc = context;
	let on_touchcancel = move |_: TouchEvent| {
		if let Some(ref mut c) = *context_tc.borrow_mut() {
			c.state.pointer_leave();
		}
	};

	view! {
		<div class="note-graph" style="width: 100%; height: 100%; min-height: 300px;">
			<canvas
				node_ref=canvas_ref
				class="note-graph-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:click=on_click
				on:mouseleave=on_mouseleave
				on:touchstart=on_touchstart
				on:touchmove=on_touchmove
				on:touchend=on_touchend
				on:touchcancel=on_touchcancel
				style="display: block; cursor: pointer; touch-action: none;"
			/>
		</div>
	}
}

/// Creates the session state, starts the animation loop and listens for resizes.
fn start_session(
	canvas: HtmlCanvasElement,
	context: SharedContext,
	notes: &[Note],
	links: &[NoteLink],
	selected: Option<NoteId>,
	config: &GraphConfig,
) -> Result<(Session, GraphCounts), GraphError> {
	let window = web_sys::window().ok_or(GraphError::NoWindow)?;

	let (w, h) = container_size(&canvas);
	canvas.set_width(w as u32);
	canvas.set_height(h as u32);

	let ctx: CanvasRenderingContext2d = canvas
		.get_context("2d")?
		.ok_or(GraphError::NoContext)?
		.dyn_into()
		.map_err(|_| GraphError::NoContext)?;

	let mut state = NoteGraphState::new(
		config.simulation.clone(),
		config.interaction.clone(),
		w,
		h,
	);
	state.set_notes(notes, links);
	state.select(selected);
	let counts = state.counts();
	info!(
		"note-graph: session started with {} notes, {} links ({w}x{h})",
		counts.nodes, counts.edges
	);

	*context.borrow_mut() = Some(GraphContext {
		state,
		theme: Theme::from(config.theme),
		ctx,
	});

	let context_resize = context.clone();
	let resize = WindowListener::attach(window.clone(), "resize", move || {
		let (nw, nh) = container_size(&canvas);
		canvas.set_width(nw as u32);
		canvas.set_height(nh as u32);
		if let Some(ref mut c) = *context_resize.borrow_mut() {
			c.state.resize(nw, nh);
		}
	})?;

	let animation = AnimationTask::start(window, move || {
		if let Some(ref mut c) = *context.borrow_mut() {
			c.state.tick();
			render::render(&c.state, &c.ctx, &c.theme);
		}
	});
	let animation = match animation {
		Ok(animation) => animation,
		Err(err) => {
			resize.detach();
			return Err(err);
		}
	};

	Ok((Session { animation, resize }, counts))
}

/// Size of the canvas' parent, or a fallback while it has no layout yet.
fn container_size(canvas: &HtmlCanvasElement) -> (f64, f64) {
	canvas
		.parent_element()
		.map(|p| (p.client_width() as f64, p.client_height() as f64))
		.filter(|&(w, h)| w > 0.0 && h > 0.0)
		.unwrap_or((FALLBACK_WIDTH, FALLBACK_HEIGHT))
}

fn canvas_point(
	canvas_ref: NodeRef<leptos::html::Canvas>,
	client_x: i32,
	client_y: i32,
) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get_untracked()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((client_x as f64 - rect.left(), client_y as f64 - rect.top()))
}

fn mouse_pointer(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<PointerEvent> {
	let (x, y) = canvas_point(canvas_ref, ev.client_x(), ev.client_y())?;
	Some(PointerEvent::mouse(x, y))
}

/// Uses the first active touch, or the first lifted one on `touchend`.
fn touch_pointer(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &TouchEvent) -> Option<PointerEvent> {
	let touch = ev.touches().get(0).or_else(|| ev.changed_touches().get(0))?;
	let (x, y) = canvas_point(canvas_ref, touch.client_x(), touch.client_y())?;
	Some(PointerEvent::touch(x, y))
}
