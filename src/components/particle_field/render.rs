//! Draw pass for the particle field.
//!
//! Rendering runs in three passes so lines sit consistently over or under
//! particles regardless of their order in the set:
//! 1. Particles as filled circles
//! 2. Particle-to-particle connections
//! 3. Particle-to-pointer links

use super::particles::{Link, ParticleSystem};
use super::surface::{DrawSurface, SurfaceError};
use super::types::{FieldConfig, Pointer};

/// Draws the current particle state. Does not clear the surface first.
pub fn render<S: DrawSurface + ?Sized>(
	system: &ParticleSystem,
	pointer: Option<Pointer>,
	config: &FieldConfig,
	surface: &mut S,
) -> Result<(), SurfaceError> {
	for p in system.iter() {
		surface.draw_circle(p.x, p.y, p.radius, &config.particle_color)?;
	}

	draw_links(surface, &system.connections(), config, system.params().line_width)?;

	if let Some(pointer) = pointer {
		draw_links(
			surface,
			&system.pointer_links(pointer),
			config,
			system.params().line_width,
		)?;
	}

	Ok(())
}

fn draw_links<S: DrawSurface + ?Sized>(
	surface: &mut S,
	links: &[Link],
	config: &FieldConfig,
	width: f64,
) -> Result<(), SurfaceError> {
	for link in links {
		surface.draw_line(link.from, link.to, &config.line_color, link.opacity, width)?;
	}
	Ok(())
}
