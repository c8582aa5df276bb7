//! Animated particle field background.
//!
//! Renders drifting particles on an HTML canvas with:
//! - Edge reflection and pointer repulsion
//! - Fading lines between nearby particles and to the pointer
//! - Click/tap spawning with a bounded overflow
//! - Live reconfiguration of count and colors
//!
//! The physics and draw pass run against the [`DrawSurface`] trait, so a
//! [`ParticleField`] can be stepped frame by frame without a browser.
//!
//! # Example
//!
//! ```ignore
//! use particle_field::{FieldConfig, ParticleFieldCanvas};
//!
//! let config = RwSignal::new(FieldConfig::default());
//! view! { <ParticleFieldCanvas config=config fullscreen=true /> }
//! ```

mod animation;
mod component;
pub mod params;
mod particles;
mod render;
mod state;
pub mod surface;
pub mod theme;
mod types;

pub use animation::AnimationLoop;
pub use component::ParticleFieldCanvas;
pub use params::FieldParams;
pub use particles::{Link, Particle, ParticleSystem};
pub use state::{FrameStatus, ParticleField};
pub use surface::{CanvasSurface, DrawSurface, SurfaceError};
pub use theme::{Color, ColorParseError, Theme, ThemeMode};
pub use types::{FieldConfig, FieldInput, Pointer};
