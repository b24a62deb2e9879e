use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::Window;

type FrameCallback = Closure<dyn FnMut()>;

/// Calls `on_frame` once per animation frame while it returns `true`.
///
/// A loop that has gone idle is picked up again with [`FrameLoop::resume`].
/// Dropping the loop cancels any pending frame.
pub struct FrameLoop {
	window: Window,
	handle: Rc<Cell<Option<i32>>>,
	callback: Rc<RefCell<Option<FrameCallback>>>,
}

fn schedule(window: &Window, cb: &FrameCallback, handle: &Cell<Option<i32>>) {
	match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
		Ok(id) => handle.set(Some(id)),
		Err(err) => warn!("Animation frame request failed: {err:?}"),
	}
}

impl FrameLoop {
	pub fn start(mut on_frame: impl FnMut() -> bool + 'static) -> Result<Self, JsValue> {
		let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
		let handle = Rc::new(Cell::new(None));
		let callback: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));

		// the closure only holds a weak handle to itself so dropping the loop frees it
		let (handle_inner, callback_inner) = (handle.clone(), Rc::downgrade(&callback));
		let closure: FrameCallback = Closure::new(move || {
			handle_inner.set(None);
			if !on_frame() {
				return;
			}

			let (Some(callback), Some(window)) = (callback_inner.upgrade(), web_sys::window())
			else {
				return;
			};
			if let Some(ref cb) = *callback.borrow() {
				schedule(&window, cb, &handle_inner);
			}
		});

		handle.set(Some(
			window.request_animation_frame(closure.as_ref().unchecked_ref())?,
		));
		*callback.borrow_mut() = Some(closure);

		Ok(Self {
			window,
			handle,
			callback,
		})
	}

	pub fn is_idle(&self) -> bool {
		self.handle.get().is_none()
	}

	/// Schedules the next frame if the loop has stopped.
	pub fn resume(&self) {
		if !self.is_idle() {
			return;
		}
		if let Some(ref cb) = *self.callback.borrow() {
			schedule(&self.window, cb, &self.handle);
		}
	}
}

impl Drop for FrameLoop {
	fn drop(&mut self) {
		if let Some(id) = self.handle.take() {
			let _ = self.window.cancel_animation_frame(id);
		}
		self.callback.borrow_mut().take();
	}
}
