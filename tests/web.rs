//! Browser tests for the animation loop. Run with `wasm-pack test --headless --firefox`.

#![cfg(target_arch = "wasm32")]

use particle_field::components::particle_field::{AnimationLoop, CanvasSurface, ParticleField};
use particle_field::FieldConfig;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlCanvasElement;

wasm_bindgen_test_configure!(run_in_browser);

fn attached_canvas() -> HtmlCanvasElement {
	let document = web_sys::window().unwrap().document().unwrap();
	let canvas: HtmlCanvasElement = document
		.create_element("canvas")
		.unwrap()
		.dyn_into()
		.unwrap();
	document.body().unwrap().append_child(&canvas).unwrap();
	canvas
}

fn start(canvas: HtmlCanvasElement) -> AnimationLoop {
	let surface = CanvasSurface::new(canvas).unwrap();
	surface.set_size(200.0, 100.0);
	AnimationLoop::start(surface, ParticleField::new(200.0, 100.0, FieldConfig::default()))
}

#[wasm_bindgen_test]
fn stop_releases_the_frame_callback() {
	let anim = start(attached_canvas());
	assert!(anim.is_running());
	assert!(anim.is_scheduled());

	anim.stop();
	assert!(!anim.is_running());
	assert!(!anim.is_scheduled());

	anim.stop();
	assert!(!anim.is_running());
}

#[wasm_bindgen_test]
fn feeds_after_stop_change_nothing() {
	let anim = start(attached_canvas());
	anim.stop();
	let before = anim.with_field(|f| f.particles().len());
	anim.add_particle_at(10.0, 10.0);
	anim.resize(50.0, 50.0);
	assert_eq!(anim.with_field(|f| f.particles().len()), before);
	assert_eq!(anim.with_field(|f| f.particles().width()), 200.0);
}

#[wasm_bindgen_test]
fn detached_canvas_reports_detached() {
	use particle_field::components::particle_field::{DrawSurface, SurfaceError};

	let canvas = attached_canvas();
	let mut surface = CanvasSurface::new(canvas.clone()).unwrap();
	assert!(surface.clear().is_ok());
	canvas.remove();
	assert_eq!(surface.clear(), Err(SurfaceError::Detached));
}
