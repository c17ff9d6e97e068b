//! Cancelable animation loop and scoped window listeners.
//!
//! A graph session owns exactly one [`AnimationTask`] and one resize
//! [`WindowListener`]; both are released together when the session ends.
//! Cancellation is checked at the top of every frame, so once
//! [`CancelToken::cancel`] returns no frame body runs again.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::Window;

use crate::error::GraphError;

/// Shared one-way cancellation flag.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn cancel(&self) {
		self.0.set(true);
	}

	pub fn is_cancelled(&self) -> bool {
		self.0.get()
	}
}

/// Frame bookkeeping independent of the browser scheduler.
#[derive(Debug, Default)]
pub struct FrameLoop {
	token: CancelToken,
}

impl FrameLoop {
	pub fn new(token: CancelToken) -> Self {
		Self { token }
	}

	/// Runs one frame unless cancelled. Returns whether to schedule another.
	pub fn run_frame(&mut self, body: impl FnOnce()) -> bool {
		if self.token.is_cancelled() {
			return false;
		}
		body();
		!self.token.is_cancelled()
	}
}

type FrameClosure = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// A repeating `requestAnimationFrame` task.
pub struct AnimationTask {
	token: CancelToken,
	frame_id: Rc<Cell<Option<i32>>>,
	callback: FrameClosure,
	window: Window,
}

impl AnimationTask {
	/// Schedules `body` once per animation frame until cancelled.
	pub fn start(window: Window, mut body: impl FnMut() + 'static) -> Result<Self, GraphError> {
		let token = CancelToken::new();
		let frame_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
		let callback: FrameClosure = Rc::new(RefCell::new(None));

		let mut frames = FrameLoop::new(token.clone());
		let (frame_id_inner, callback_inner, window_inner) =
			(frame_id.clone(), callback.clone(), window.clone());
		*callback.borrow_mut() = Some(Closure::new(move || {
			frame_id_inner.set(None);
			if !frames.run_frame(&mut body) {
				return;
			}
			if let Some(ref cb) = *callback_inner.borrow() {
				frame_id_inner.set(
					window_inner
						.request_animation_frame(cb.as_ref().unchecked_ref())
						.ok(),
				);
			}
		}));

		let first = match *callback.borrow() {
			Some(ref cb) => window.request_animation_frame(cb.as_ref().unchecked_ref())?,
			None => return Err(GraphError::Js("animation callback missing".into())),
		};
		frame_id.set(Some(first));

		Ok(Self {
			token,
			frame_id,
			callback,
			window,
		})
	}

	/// Stops the loop: no further frame body runs after this returns.
	pub fn cancel(&self) {
		self.token.cancel();
		if let Some(id) = self.frame_id.take() {
			let _ = self.window.cancel_animation_frame(id);
		}
		// Breaks the closure's reference cycle with itself.
		if let Ok(mut slot) = self.callback.try_borrow_mut() {
			slot.take();
		}
	}
}

/// An event listener on the window, removed by [`WindowListener::detach`].
pub struct WindowListener {
	window: Window,
	event: &'static str,
	callback: Closure<dyn FnMut()>,
}

impl WindowListener {
	pub fn attach(
		window: Window,
		event: &'static str,
		f: impl FnMut() + 'static,
	) -> Result<Self, GraphError> {
		let callback = Closure::<dyn FnMut()>::new(f);
		window.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
		Ok(Self {
			window,
			event,
			callback,
		})
	}

	pub fn detach(&self) {
		let _ = self
			.window
			.remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
	}
}
