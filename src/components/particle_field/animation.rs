//! `requestAnimationFrame` driver for a [`ParticleField`].
//!
//! The frame callback re-registers itself only while the field reports
//! [`FrameStatus::Continue`], so stopping the field (explicitly or because the
//! canvas went away) ends the loop at the next repaint.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::warn;
use wasm_bindgen::prelude::*;

use super::state::{FrameStatus, ParticleField};
use super::surface::CanvasSurface;
use super::types::{FieldConfig, FieldInput};

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Handle to a running field. Cheap to clone; all clones drive the same loop.
#[derive(Clone)]
pub struct AnimationLoop {
	field: Rc<RefCell<ParticleField>>,
	surface: Rc<RefCell<CanvasSurface>>,
	frame_id: Rc<Cell<Option<i32>>>,
	callback: FrameCallback,
}

fn request_frame(cb: &Closure<dyn FnMut()>) -> Option<i32> {
	let window = web_sys::window()?;
	match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
		Ok(id) => Some(id),
		Err(e) => {
			warn!("particle-field: requestAnimationFrame failed: {:?}", e);
			None
		}
	}
}

impl AnimationLoop {
	/// Start animating `field` on `surface` from the next repaint.
	pub fn start(surface: CanvasSurface, field: ParticleField) -> Self {
		let anim = Self {
			field: Rc::new(RefCell::new(field)),
			surface: Rc::new(RefCell::new(surface)),
			frame_id: Rc::new(Cell::new(None)),
			callback: Rc::new(RefCell::new(None)),
		};

		let (field, surface, frame_id, callback) = (
			anim.field.clone(),
			anim.surface.clone(),
			anim.frame_id.clone(),
			anim.callback.clone(),
		);
		*anim.callback.borrow_mut() = Some(Closure::new(move || {
			frame_id.set(None);
			let status = field.borrow_mut().frame(&mut *surface.borrow_mut());
			if status != FrameStatus::Continue {
				return;
			}
			if let Some(ref cb) = *callback.borrow() {
				let id = request_frame(cb);
				if id.is_none() {
					field.borrow_mut().stop();
				}
				frame_id.set(id);
			}
		}));

		if let Some(ref cb) = *anim.callback.borrow() {
			anim.frame_id.set(request_frame(cb));
		}
		anim
	}

	/// Run `f` against the field between frames.
	pub fn with_field<T>(&self, f: impl FnOnce(&mut ParticleField) -> T) -> T {
		f(&mut *self.field.borrow_mut())
	}

	pub fn update_config(&self, config: FieldConfig) {
		self.with_field(|field| field.update_config(config));
	}

	pub fn set_pointer(&self, x: f64, y: f64) {
		self.with_field(|field| field.set_pointer(x, y));
	}

	pub fn clear_pointer(&self) {
		self.with_field(ParticleField::clear_pointer);
	}

	/// Resize both the canvas backing store and the field bounds.
	pub fn resize(&self, width: f64, height: f64) {
		if !self.is_running() {
			return;
		}
		self.surface.borrow().set_size(width, height);
		self.with_field(|field| field.resize(width, height));
	}

	pub fn add_particle_at(&self, x: f64, y: f64) {
		self.with_field(|field| field.add_particle_at(x, y));
	}

	pub fn handle_input(&self, input: FieldInput, time_ms: f64) {
		self.with_field(|field| field.handle_input(input, time_ms));
	}

	/// Whether a frame callback is still registered and holding the field.
	pub fn is_scheduled(&self) -> bool {
		self.callback.borrow().is_some()
	}

	pub fn is_running(&self) -> bool {
		self.field.borrow().is_running()
	}

	/// Stop the field and cancel the pending frame. Safe to call repeatedly.
	pub fn stop(&self) {
		self.with_field(ParticleField::stop);
		if let Some(id) = self.frame_id.take() {
			if let Some(window) = web_sys::window() {
				let _ = window.cancel_animation_frame(id);
			}
		}
		// Break the callback's reference to itself now that nothing is queued.
		self.callback.borrow_mut().take();
	}
}
