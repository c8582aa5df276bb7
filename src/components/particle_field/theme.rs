//! Colors and light/dark theming for the particle field.
//!
//! Configuration documents carry colors as CSS text, so [`Color`] parses the
//! handful of forms the field accepts and formats itself back for the canvas.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::types::FieldConfig;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

/// Failure to read a CSS color string.
#[derive(Debug, Error, PartialEq)]
pub enum ColorParseError {
	#[error("unsupported color syntax: {0:?}")]
	Unsupported(String),
	#[error("invalid hex color: {0:?}")]
	InvalidHex(String),
	#[error("expected {expected} channels, found {found}")]
	ChannelCount { expected: usize, found: usize },
	#[error("invalid color channel: {0:?}")]
	InvalidChannel(String),
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}

	fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
		let invalid = || ColorParseError::InvalidHex(hex.to_string());
		if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
			return Err(invalid());
		}
		let expanded: String = match hex.len() {
			3 => hex.chars().flat_map(|c| [c, c]).collect(),
			6 => hex.to_string(),
			_ => return Err(invalid()),
		};
		let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).map_err(|_| invalid());
		Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
	}

	fn from_channels(body: &str, with_alpha: bool) -> Result<Self, ColorParseError> {
		let parts: Vec<&str> = body.split(',').map(str::trim).collect();
		let expected = if with_alpha { 4 } else { 3 };
		if parts.len() != expected {
			return Err(ColorParseError::ChannelCount {
				expected,
				found: parts.len(),
			});
		}
		let channel = |s: &str| {
			s.parse::<u8>()
				.map_err(|_| ColorParseError::InvalidChannel(s.to_string()))
		};
		let a = if with_alpha {
			let a: f64 = parts[3]
				.parse()
				.map_err(|_| ColorParseError::InvalidChannel(parts[3].to_string()))?;
			if !a.is_finite() {
				return Err(ColorParseError::InvalidChannel(parts[3].to_string()));
			}
			a.clamp(0.0, 1.0)
		} else {
			1.0
		};
		Ok(Self::rgba(
			channel(parts[0])?,
			channel(parts[1])?,
			channel(parts[2])?,
			a,
		))
	}
}

impl FromStr for Color {
	type Err = ColorParseError;

	/// Accepts `#rgb`, `#rrggbb`, `rgb(r, g, b)` and `rgba(r, g, b, a)`.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let s = s.trim();
		if let Some(hex) = s.strip_prefix('#') {
			return Self::from_hex(hex);
		}
		let lower = s.to_ascii_lowercase();
		if let Some(body) = lower
			.strip_prefix("rgba(")
			.and_then(|rest| rest.strip_suffix(')'))
		{
			return Self::from_channels(body, true);
		}
		if let Some(body) = lower
			.strip_prefix("rgb(")
			.and_then(|rest| rest.strip_suffix(')'))
		{
			return Self::from_channels(body, false);
		}
		Err(ColorParseError::Unsupported(s.to_string()))
	}
}

impl TryFrom<String> for Color {
	type Error = ColorParseError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}

impl From<Color> for String {
	fn from(color: Color) -> Self {
		color.to_css()
	}
}

impl fmt::Display for Color {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.to_css())
	}
}

/// Which of the two page themes is active.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
	#[default]
	Light,
	Dark,
}

impl ThemeMode {
	pub fn toggle(self) -> Self {
		match self {
			ThemeMode::Light => ThemeMode::Dark,
			ThemeMode::Dark => ThemeMode::Light,
		}
	}

	pub fn theme(self) -> Theme {
		match self {
			ThemeMode::Light => Theme::light(),
			ThemeMode::Dark => Theme::dark(),
		}
	}
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	pub name: &'static str,
	/// Page background behind the canvas
	pub background: Color,
	/// Fill for every particle
	pub particle: Color,
	/// Base stroke for connection lines; opacity is applied per line
	pub line: Color,
}

impl Theme {
	/// Dark particles on a pale page.
	pub fn light() -> Self {
		Self {
			name: "light",
			background: Color::rgb(247, 247, 247),
			particle: Color::rgb(68, 68, 68),
			line: Color::rgb(80, 80, 80),
		}
	}

	/// Light particles on a near-black page.
	pub fn dark() -> Self {
		Self {
			name: "dark",
			background: Color::rgb(30, 30, 30),
			particle: Color::rgb(204, 204, 204),
			line: Color::rgb(200, 200, 200),
		}
	}

	/// Recolor `config` without touching its particle count.
	pub fn apply(&self, config: &mut FieldConfig) {
		config.particle_color = self.particle;
		config.line_color = self.line;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_short_and_long_hex() {
		assert_eq!("#ccc".parse::<Color>(), Ok(Color::rgb(204, 204, 204)));
		assert_eq!("#667eea".parse::<Color>(), Ok(Color::rgb(102, 126, 234)));
	}

	#[test]
	fn parses_rgb_and_rgba_with_spacing() {
		assert_eq!("rgb(80,80,80)".parse::<Color>(), Ok(Color::rgb(80, 80, 80)));
		assert_eq!(
			" RGBA(255, 255, 255, 0.4) ".parse::<Color>(),
			Ok(Color::rgba(255, 255, 255, 0.4))
		);
	}

	#[test]
	fn alpha_is_clamped() {
		let c: Color = "rgba(1, 2, 3, 7)".parse().unwrap();
		assert_eq!(c.a, 1.0);
	}

	#[test]
	fn rejects_malformed_colors() {
		assert_eq!(
			"#12345".parse::<Color>(),
			Err(ColorParseError::InvalidHex("12345".into()))
		);
		assert_eq!(
			"rgb(1, 2)".parse::<Color>(),
			Err(ColorParseError::ChannelCount {
				expected: 3,
				found: 2
			})
		);
		assert_eq!(
			"rgb(1, 2, 300)".parse::<Color>(),
			Err(ColorParseError::InvalidChannel("300".into()))
		);
		assert!(matches!(
			"hotpink".parse::<Color>(),
			Err(ColorParseError::Unsupported(_))
		));
	}

	#[test]
	fn css_output_reads_back() {
		let c = Color::rgba(10, 20, 30, 0.5);
		assert_eq!(c.to_css(), "rgba(10, 20, 30, 0.5)");
		assert_eq!(c.to_css().parse::<Color>(), Ok(c));
		assert_eq!(Color::rgb(255, 0, 16).to_css(), "#ff0010");
	}

	#[test]
	fn serde_uses_css_strings() {
		let c: Color = serde_json::from_str("\"#444\"").unwrap();
		assert_eq!(c, Color::rgb(68, 68, 68));
		assert_eq!(serde_json::to_string(&c).unwrap(), "\"#444444\"");
		assert!(serde_json::from_str::<Color>("\"nope\"").is_err());
	}

	#[test]
	fn each_mode_names_the_other_theme_for_switching() {
		assert_eq!(ThemeMode::Light.toggle().theme().name, "dark");
		assert_eq!(ThemeMode::Dark.toggle().theme().name, "light");
	}

	#[test]
	fn theme_apply_keeps_count() {
		let mut config = FieldConfig {
			particle_count: 42,
			..FieldConfig::default()
		};
		Theme::dark().apply(&mut config);
		assert_eq!(config.particle_count, 42);
		assert_eq!(config.particle_color, Theme::dark().particle);
		assert_eq!(config.line_color, Theme::dark().line);
	}

	#[test]
	fn mode_toggles_and_serializes_lowercase() {
		assert_eq!(ThemeMode::Light.toggle(), ThemeMode::Dark);
		assert_eq!(ThemeMode::Dark.toggle().toggle(), ThemeMode::Dark);
		assert_eq!(serde_json::to_string(&ThemeMode::Dark).unwrap(), "\"dark\"");
		assert_eq!(ThemeMode::Dark.theme().name, "dark");
	}
}
