//! Particle field state and the single-frame update.
//!
//! [`ParticleField`] owns everything one animated background needs: the
//! particle set, pointer, configuration and a running flag. Nothing else
//! mutates it; the animation loop calls [`ParticleField::frame`] once per
//! repaint and input handlers call the setters between frames.

use log::{debug, info, warn};

use super::params::FieldParams;
use super::particles::ParticleSystem;
use super::render;
use super::surface::DrawSurface;
use super::types::{FieldConfig, FieldInput, Pointer};

/// Mouse events arriving this soon (ms) after a touch are the browser's
/// emulation of that touch and are dropped.
const EMULATED_MOUSE_WINDOW_MS: f64 = 800.0;

/// Result of one [`ParticleField::frame`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameStatus {
	/// Frame drawn; schedule another.
	Continue,
	/// The field is stopped; do not schedule again.
	Stopped,
}

/// One running particle field.
pub struct ParticleField {
	system: ParticleSystem,
	config: FieldConfig,
	pointer: Option<Pointer>,
	running: bool,
	frames: u64,
	/// Event timestamp (ms) of the most recent touch input.
	last_touch: Option<f64>,
}

impl ParticleField {
	pub fn new(width: f64, height: f64, config: FieldConfig) -> Self {
		let system = ParticleSystem::new(config.particle_count, width, height, FieldParams::default());
		Self::from_system(system, config)
	}

	/// Deterministic field for reproducible layouts and tests.
	pub fn with_seed(width: f64, height: f64, config: FieldConfig, params: FieldParams, seed: u64) -> Self {
		let system = ParticleSystem::with_seed(config.particle_count, width, height, params, seed);
		Self::from_system(system, config)
	}

	fn from_system(system: ParticleSystem, config: FieldConfig) -> Self {
		info!(
			"particle-field: {} particles on {}x{}",
			system.len(),
			system.width(),
			system.height()
		);
		Self {
			system,
			config,
			pointer: None,
			running: true,
			frames: 0,
			last_touch: None,
		}
	}

	pub fn particles(&self) -> &ParticleSystem {
		&self.system
	}

	pub fn config(&self) -> &FieldConfig {
		&self.config
	}

	pub fn pointer(&self) -> Option<Pointer> {
		self.pointer
	}

	pub fn is_running(&self) -> bool {
		self.running
	}

	/// Number of frames drawn so far.
	pub fn frames(&self) -> u64 {
		self.frames
	}

	/// Apply a new count and colors. Takes effect on the next frame.
	pub fn update_config(&mut self, config: FieldConfig) {
		if !self.running {
			return;
		}
		if config.particle_count != self.system.len() {
			debug!(
				"particle-field: {} -> {} particles",
				self.system.len(),
				config.particle_count
			);
		}
		self.system.reconfigure(config.particle_count);
		self.config = config;
	}

	pub fn set_pointer(&mut self, x: f64, y: f64) {
		if self.running {
			self.pointer = Some(Pointer { x, y });
		}
	}

	pub fn clear_pointer(&mut self) {
		self.pointer = None;
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		if !self.running {
			return;
		}
		debug!("particle-field: resize to {}x{}", width, height);
		self.system.resize(width, height);
	}

	pub fn add_particle_at(&mut self, x: f64, y: f64) {
		if self.running {
			self.system.spawn_at(x, y);
		}
	}

	/// Route one page input event, timestamped in milliseconds.
	///
	/// A tap spawns exactly one particle: the compatibility `mousemove` and
	/// `click` a browser synthesizes after a touch are ignored.
	pub fn handle_input(&mut self, input: FieldInput, time_ms: f64) {
		let emulated = self
			.last_touch
			.is_some_and(|t| (time_ms - t).abs() < EMULATED_MOUSE_WINDOW_MS);
		match input {
			FieldInput::PointerMove { x, y } if !emulated => self.set_pointer(x, y),
			FieldInput::Click { x, y } if !emulated => self.add_particle_at(x, y),
			FieldInput::PointerMove { .. } | FieldInput::Click { .. } => {}
			FieldInput::PointerLeave => self.clear_pointer(),
			FieldInput::TouchStart { x, y } => {
				self.last_touch = Some(time_ms);
				self.add_particle_at(x, y);
				self.set_pointer(x, y);
			}
			FieldInput::TouchMove { x, y } => {
				self.last_touch = Some(time_ms);
				self.set_pointer(x, y);
			}
			FieldInput::TouchEnd => {
				self.last_touch = Some(time_ms);
				self.clear_pointer();
			}
		}
	}

	/// Stop animating. Idempotent; later frames draw and mutate nothing.
	pub fn stop(&mut self) {
		if self.running {
			info!("particle-field: stopped after {} frames", self.frames);
			self.running = false;
		}
	}

	/// Run one animation tick: clear, advance, draw.
	///
	/// A surface failure stops the field instead of propagating, so a canvas
	/// torn down mid-run just ends the animation.
	pub fn frame<S: DrawSurface + ?Sized>(&mut self, surface: &mut S) -> FrameStatus {
		if !self.running {
			return FrameStatus::Stopped;
		}

		if let Err(e) = surface.clear() {
			warn!("particle-field: surface unavailable, stopping: {}", e);
			self.stop();
			return FrameStatus::Stopped;
		}

		self.system.step(self.pointer);

		if let Err(e) = render::render(&self.system, self.pointer, &self.config, surface) {
			warn!("particle-field: draw failed, stopping: {}", e);
			self.stop();
			return FrameStatus::Stopped;
		}

		self.frames += 1;
		FrameStatus::Continue
	}
}
