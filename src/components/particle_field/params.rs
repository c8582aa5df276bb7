//! Tuning constants for the particle field physics and connection pass.
//!
//! These are the values the field treats as fixed for its lifetime. Runtime
//! configuration (count and colors) lives in [`FieldConfig`](super::FieldConfig)
//! instead, since it can change between frames.

/// Physics and drawing constants for a [`ParticleField`](super::ParticleField).
#[derive(Clone, Debug, PartialEq)]
pub struct FieldParams {
	/// Velocity components are drawn uniformly from `[-max_speed, max_speed)`,
	/// in pixels per frame.
	pub max_speed: f64,
	/// Smallest particle radius in pixels.
	pub radius_min: f64,
	/// Upper bound (exclusive) of the particle radius in pixels.
	pub radius_max: f64,
	/// Distance within which the pointer pushes particles away.
	pub pointer_radius: f64,
	/// Displacement applied at zero distance from the pointer. Decays linearly
	/// to zero at `pointer_radius`.
	pub pointer_force: f64,
	/// Particle pairs closer than this are joined by a line.
	pub connection_distance: f64,
	/// Particles closer than this to the pointer are joined to it by a line.
	pub pointer_link_distance: f64,
	/// How many click-spawned particles may exist above the configured count.
	pub spawn_overflow: usize,
	/// Stroke width for every connection line.
	pub line_width: f64,
}

impl Default for FieldParams {
	fn default() -> Self {
		Self {
			max_speed: 1.5,
			radius_min: 1.0,
			radius_max: 4.0,
			pointer_radius: 150.0,
			pointer_force: 5.0,
			connection_distance: 150.0,
			pointer_link_distance: 120.0,
			spawn_overflow: 20,
			line_width: 1.0,
		}
	}
}

impl FieldParams {
	/// Opacity of a line spanning `distance`, fading linearly from 1 at zero
	/// to 0 at `threshold`. Returns `None` at or beyond the threshold.
	pub fn fade(distance: f64, threshold: f64) -> Option<f64> {
		if distance < threshold {
			Some(1.0 - distance / threshold)
		} else {
			None
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn fade_is_linear_inside_threshold() {
		assert_eq!(FieldParams::fade(0.0, 150.0), Some(1.0));
		let mid = FieldParams::fade(75.0, 150.0).unwrap();
		assert!((mid - 0.5).abs() < 1e-12);
	}

	#[test]
	fn fade_excludes_threshold_and_beyond() {
		assert_eq!(FieldParams::fade(150.0, 150.0), None);
		assert_eq!(FieldParams::fade(400.0, 150.0), None);
	}

	#[test]
	fn fade_with_zero_threshold_never_draws() {
		assert_eq!(FieldParams::fade(0.0, 0.0), None);
	}
}
