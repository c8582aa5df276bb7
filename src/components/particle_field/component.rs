//! Leptos component wrapping the particle field canvas.
//!
//! The component creates a canvas, starts an [`AnimationLoop`] on it once it is
//! mounted, and forwards resizes, pointer movement, clicks and taps to the
//! loop. Changes to the `config` signal are applied before the next frame.
//! Unmounting stops the loop and unregisters every listener.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::warn;
use send_wrapper::SendWrapper;
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlCanvasElement, MouseEvent, ResizeObserver, TouchEvent, Window};

use super::animation::AnimationLoop;
use super::state::ParticleField;
use super::surface::CanvasSurface;
use super::types::{FieldConfig, FieldInput};

const FALLBACK_WIDTH: f64 = 800.0;
const FALLBACK_HEIGHT: f64 = 600.0;

/// Pick one canvas dimension: an explicit size wins, then a non-empty
/// measurement, then the fallback.
fn resolve_extent(explicit: Option<f64>, measured: Option<f64>, fallback: f64) -> f64 {
	explicit
		.or(measured.filter(|v| *v > 0.0))
		.unwrap_or(fallback)
}

fn viewport_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

fn parent_size(canvas: &HtmlCanvasElement, width: Option<f64>, height: Option<f64>) -> (f64, f64) {
	let parent = canvas.parent_element();
	(
		resolve_extent(
			width,
			parent.as_ref().map(|p| p.client_width() as f64),
			FALLBACK_WIDTH,
		),
		resolve_extent(
			height,
			parent.as_ref().map(|p| p.client_height() as f64),
			FALLBACK_HEIGHT,
		),
	)
}

/// Convert client coordinates into canvas-local pixels.
fn local_point(canvas: Option<HtmlCanvasElement>, client_x: i32, client_y: i32) -> Option<(f64, f64)> {
	let rect = canvas?.get_bounding_client_rect();
	Some((
		client_x as f64 - rect.left(),
		client_y as f64 - rect.top(),
	))
}

fn first_touch(ev: &TouchEvent) -> Option<(i32, i32)> {
	let touch = ev.touches().get(0)?;
	Some((touch.client_x(), touch.client_y()))
}

/// Browser-side resources owned by one mounted canvas.
#[derive(Default)]
struct Binding {
	anim: Option<AnimationLoop>,
	/// Shared by the window `resize` listener and the parent `ResizeObserver`.
	resize_cb: Option<Closure<dyn FnMut()>>,
	observer: Option<ResizeObserver>,
}

impl Binding {
	fn teardown(&mut self) {
		if let Some(anim) = self.anim.take() {
			anim.stop();
		}
		if let Some(observer) = self.observer.take() {
			observer.disconnect();
		}
		if let Some(cb) = self.resize_cb.take() {
			if let Some(window) = web_sys::window() {
				let _ = window
					.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}
	}
}

/// Renders an animated particle field on a canvas element.
///
/// With `fullscreen = true` (the default) the canvas is fixed behind the page
/// and follows the window size. Otherwise it follows its parent's size, unless
/// explicit `width`/`height` pin it.
#[component]
pub fn ParticleFieldCanvas(
	#[prop(into)] config: Signal<FieldConfig>,
	#[prop(default = true)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let binding: Rc<RefCell<Binding>> = Rc::new(RefCell::new(Binding::default()));
	let binding_init = binding.clone();

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if binding_init.borrow().anim.is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			warn!("particle-field: no window, not starting");
			return;
		};

		let (w, h) = if fullscreen {
			viewport_size(&window).unwrap_or((FALLBACK_WIDTH, FALLBACK_HEIGHT))
		} else {
			parent_size(&canvas, width, height)
		};

		let surface = match CanvasSurface::new(canvas.clone()) {
			Ok(surface) => surface,
			Err(e) => {
				warn!("particle-field: cannot draw on canvas: {}", e);
				return;
			}
		};
		surface.set_size(w, h);

		let handle = AnimationLoop::start(surface, ParticleField::new(w, h, config.get_untracked()));
		let mut b = binding_init.borrow_mut();

		if fullscreen {
			let handle_resize = handle.clone();
			let cb = Closure::<dyn FnMut()>::new(move || {
				let Some((nw, nh)) = web_sys::window().as_ref().and_then(viewport_size) else {
					return;
				};
				handle_resize.resize(nw, nh);
			});
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			b.resize_cb = Some(cb);
		} else if width.is_none() || height.is_none() {
			let parent: Option<Element> = canvas.parent_element();
			let handle_resize = handle.clone();
			let canvas_resize = canvas.clone();
			let cb = Closure::<dyn FnMut()>::new(move || {
				let (nw, nh) = parent_size(&canvas_resize, width, height);
				handle_resize.resize(nw, nh);
			});
			match (parent, ResizeObserver::new(cb.as_ref().unchecked_ref())) {
				(Some(parent), Ok(observer)) => {
					observer.observe(&parent);
					b.observer = Some(observer);
				}
				(_, Err(e)) => warn!("particle-field: ResizeObserver unavailable: {:?}", e),
				(None, Ok(_)) => {}
			}
			b.resize_cb = Some(cb);
		}

		b.anim = Some(handle);
	});

	let binding_cleanup = SendWrapper::new(binding.clone());
	on_cleanup(move || {
		binding_cleanup.borrow_mut().teardown();
	});

	let binding_cfg = binding.clone();
	Effect::new(move |_| {
		let next = config.get();
		if let Some(ref a) = binding_cfg.borrow().anim {
			a.update_config(next);
		}
	});

	let send = {
		let binding = binding.clone();
		move |input: FieldInput, time_ms: f64| {
			if let Some(ref a) = binding.borrow().anim {
				a.handle_input(input, time_ms);
			}
		}
	};

	let send_mm = send.clone();
	let on_mousemove = move |ev: MouseEvent| {
		if let Some((x, y)) = local_point(canvas_ref.get_untracked(), ev.client_x(), ev.client_y()) {
			send_mm(FieldInput::PointerMove { x, y }, ev.time_stamp());
		}
	};

	let send_ml = send.clone();
	let on_mouseleave = move |ev: MouseEvent| {
		send_ml(FieldInput::PointerLeave, ev.time_stamp());
	};

	let send_click = send.clone();
	let on_click = move |ev: MouseEvent| {
		if let Some((x, y)) = local_point(canvas_ref.get_untracked(), ev.client_x(), ev.client_y()) {
			send_click(FieldInput::Click { x, y }, ev.time_stamp());
		}
	};

	// Touch handlers cancel the default action so the browser does not also
	// synthesize mouse events (and a second spawn) for the same tap.
	let send_ts = send.clone();
	let on_touchstart = move |ev: TouchEvent| {
		ev.prevent_default();
		let point = first_touch(&ev)
			.and_then(|(cx, cy)| local_point(canvas_ref.get_untracked(), cx, cy));
		if let Some((x, y)) = point {
			send_ts(FieldInput::TouchStart { x, y }, ev.time_stamp());
		}
	};

	let send_tm = send.clone();
	let on_touchmove = move |ev: TouchEvent| {
		ev.prevent_default();
		let point = first_touch(&ev)
			.and_then(|(cx, cy)| local_point(canvas_ref.get_untracked(), cx, cy));
		if let Some((x, y)) = point {
			send_tm(FieldInput::TouchMove { x, y }, ev.time_stamp());
		}
	};

	let send_te = send;
	let on_touchend = move |ev: TouchEvent| {
		send_te(FieldInput::TouchEnd, ev.time_stamp());
	};

	let style = if fullscreen {
		"display: block; position: fixed; top: 0; left: 0; z-index: 0; touch-action: none;"
	} else {
		"display: block; touch-action: none;"
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="particle-field-canvas"
			on:mousemove=on_mousemove
			on:mouseleave=on_mouseleave
			on:click=on_click
			on:touchstart=on_touchstart
			on:touchmove=on_touchmove
			on:touchend=on_touchend
			style=style
		/>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn explicit_size_wins() {
		assert_eq!(resolve_extent(Some(320.0), Some(1024.0), FALLBACK_WIDTH), 320.0);
	}

	#[test]
	fn measured_size_follows_parent() {
		assert_eq!(resolve_extent(None, Some(640.0), FALLBACK_WIDTH), 640.0);
		assert_eq!(resolve_extent(None, Some(480.0), FALLBACK_HEIGHT), 480.0);
	}

	#[test]
	fn empty_or_missing_parent_falls_back() {
		assert_eq!(resolve_extent(None, Some(0.0), FALLBACK_HEIGHT), FALLBACK_HEIGHT);
		assert_eq!(resolve_extent(None, None, FALLBACK_WIDTH), FALLBACK_WIDTH);
	}
}
