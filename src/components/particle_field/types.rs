//! Configuration and input data for the particle field.

use serde::{Deserialize, Serialize};

use super::theme::Color;

/// Runtime configuration, reapplied whenever it changes.
///
/// Read from JSON with camelCase keys:
///
/// ```json
/// { "particleCount": 80, "particleColor": "rgba(255, 255, 255, 0.8)", "lineColor": "rgba(255, 255, 255, 0.4)" }
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldConfig {
	/// Number of ambient particles. Zero is valid and draws nothing.
	pub particle_count: usize,
	/// Fill color shared by every particle.
	pub particle_color: Color,
	/// Stroke color for connection lines, before per-line opacity.
	pub line_color: Color,
}

impl Default for FieldConfig {
	fn default() -> Self {
		Self {
			particle_count: 80,
			particle_color: Color::rgba(255, 255, 255, 0.8),
			line_color: Color::rgba(255, 255, 255, 0.4),
		}
	}
}

/// Pointer position in canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pointer {
	pub x: f64,
	pub y: f64,
}

impl Pointer {
	pub fn distance_to(&self, x: f64, y: f64) -> f64 {
		(self.x - x).hypot(self.y - y)
	}
}

/// Pointer, mouse and touch input forwarded from the page, in canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FieldInput {
	PointerMove { x: f64, y: f64 },
	PointerLeave,
	Click { x: f64, y: f64 },
	TouchStart { x: f64, y: f64 },
	TouchMove { x: f64, y: f64 },
	TouchEnd,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn config_reads_camel_case_json() {
		let config: FieldConfig = serde_json::from_str(
			r##"{ "particleCount": 12, "particleColor": "#fff", "lineColor": "rgba(0, 0, 0, 0.25)" }"##,
		)
		.unwrap();
		assert_eq!(config.particle_count, 12);
		assert_eq!(config.particle_color, Color::rgb(255, 255, 255));
		assert_eq!(config.line_color, Color::rgba(0, 0, 0, 0.25));
	}

	#[test]
	fn missing_fields_use_defaults() {
		let config: FieldConfig = serde_json::from_str(r#"{ "particleCount": 0 }"#).unwrap();
		assert_eq!(config.particle_count, 0);
		assert_eq!(config.particle_color, FieldConfig::default().particle_color);
		assert_eq!(config.line_color, FieldConfig::default().line_color);
	}

	#[test]
	fn bad_color_fails_the_document() {
		let err = serde_json::from_str::<FieldConfig>(r#"{ "lineColor": "blue-ish" }"#);
		assert!(err.is_err());
	}

	#[test]
	fn pointer_distance() {
		let p = Pointer { x: 3.0, y: 0.0 };
		assert_eq!(p.distance_to(0.0, 4.0), 5.0);
	}
}
