//! Drawing surface abstraction.
//!
//! The field only ever clears, fills circles and strokes lines, so that is all
//! [`DrawSurface`] asks for. [`CanvasSurface`] implements it on an HTML canvas.

use std::f64::consts::PI;

use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::theme::Color;

/// Why a drawing call could not be carried out.
#[derive(Debug, Error, PartialEq)]
pub enum SurfaceError {
	#[error("canvas is no longer attached to the document")]
	Detached,
	#[error("2d rendering context unavailable")]
	Context,
	#[error("canvas call failed: {0}")]
	Js(String),
}

impl From<JsValue> for SurfaceError {
	fn from(value: JsValue) -> Self {
		let message = value
			.dyn_ref::<js_sys::Error>()
			.map(|e| String::from(e.message()))
			.or_else(|| value.as_string())
			.unwrap_or_else(|| format!("{value:?}"));
		SurfaceError::Js(message)
	}
}

/// The minimal drawing capability the particle field needs.
pub trait DrawSurface {
	/// Erase the whole surface.
	fn clear(&mut self) -> Result<(), SurfaceError>;

	/// Fill a circle of radius `r` centered on `(x, y)`.
	fn draw_circle(&mut self, x: f64, y: f64, r: f64, color: &Color) -> Result<(), SurfaceError>;

	/// Stroke a straight line at `opacity` times the color's own alpha.
	fn draw_line(
		&mut self,
		from: (f64, f64),
		to: (f64, f64),
		color: &Color,
		opacity: f64,
		width: f64,
	) -> Result<(), SurfaceError>;
}

/// [`DrawSurface`] backed by a `<canvas>` element's 2d context.
pub struct CanvasSurface {
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
	pub fn new(canvas: HtmlCanvasElement) -> Result<Self, SurfaceError> {
		let ctx = canvas
			.get_context("2d")?
			.ok_or(SurfaceError::Context)?
			.dyn_into::<CanvasRenderingContext2d>()
			.map_err(|_| SurfaceError::Context)?;
		Ok(Self { canvas, ctx })
	}

	/// Set the backing store size in pixels.
	pub fn set_size(&self, width: f64, height: f64) {
		self.canvas.set_width(width.max(0.0) as u32);
		self.canvas.set_height(height.max(0.0) as u32);
	}
}

impl DrawSurface for CanvasSurface {
	fn clear(&mut self) -> Result<(), SurfaceError> {
		if !self.canvas.is_connected() {
			return Err(SurfaceError::Detached);
		}
		self.ctx.clear_rect(
			0.0,
			0.0,
			self.canvas.width() as f64,
			self.canvas.height() as f64,
		);
		Ok(())
	}

	fn draw_circle(&mut self, x: f64, y: f64, r: f64, color: &Color) -> Result<(), SurfaceError> {
		self.ctx.set_fill_style_str(&color.to_css());
		self.ctx.begin_path();
		self.ctx.arc(x, y, r, 0.0, PI * 2.0)?;
		self.ctx.fill();
		Ok(())
	}

	fn draw_line(
		&mut self,
		from: (f64, f64),
		to: (f64, f64),
		color: &Color,
		opacity: f64,
		width: f64,
	) -> Result<(), SurfaceError> {
		self.ctx.set_stroke_style_str(&color.to_css());
		self.ctx.set_global_alpha(opacity.clamp(0.0, 1.0));
		self.ctx.set_line_width(width);
		self.ctx.begin_path();
		self.ctx.move_to(from.0, from.1);
		self.ctx.line_to(to.0, to.1);
		self.ctx.stroke();
		self.ctx.set_global_alpha(1.0);
		Ok(())
	}
}

#[cfg(test)]
pub(crate) mod testing {
	//! In-memory surface that records every call.

	use super::*;

	#[derive(Clone, Debug, PartialEq)]
	pub enum DrawCall {
		Clear,
		Circle {
			x: f64,
			y: f64,
			r: f64,
			color: Color,
		},
		Line {
			from: (f64, f64),
			to: (f64, f64),
			color: Color,
			opacity: f64,
		},
	}

	#[derive(Default)]
	pub struct RecordingSurface {
		pub calls: Vec<DrawCall>,
		/// When set, every call fails as if the canvas had been removed.
		pub detached: bool,
	}

	impl RecordingSurface {
		pub fn circles(&self) -> usize {
			self.calls
				.iter()
				.filter(|c| matches!(c, DrawCall::Circle { .. }))
				.count()
		}

		pub fn lines(&self) -> impl Iterator<Item = &DrawCall> {
			self.calls
				.iter()
				.filter(|c| matches!(c, DrawCall::Line { .. }))
		}
	}

	impl DrawSurface for RecordingSurface {
		fn clear(&mut self) -> Result<(), SurfaceError> {
			if self.detached {
				return Err(SurfaceError::Detached);
			}
			self.calls.push(DrawCall::Clear);
			Ok(())
		}

		fn draw_circle(&mut self, x: f64, y: f64, r: f64, color: &Color) -> Result<(), SurfaceError> {
			if self.detached {
				return Err(SurfaceError::Detached);
			}
			self.calls.push(DrawCall::Circle {
				x,
				y,
				r,
				color: *color,
			});
			Ok(())
		}

		fn draw_line(
			&mut self,
			from: (f64, f64),
			to: (f64, f64),
			color: &Color,
			opacity: f64,
			_width: f64,
		) -> Result<(), SurfaceError> {
			if self.detached {
				return Err(SurfaceError::Detached);
			}
			self.calls.push(DrawCall::Line {
				from,
				to,
				color: *color,
				opacity,
			});
			Ok(())
		}
	}
}
