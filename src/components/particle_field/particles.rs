//! Particle set and per-frame physics.
//!
//! Particles drift at constant velocity, bounce off the surface edges, get
//! pushed away from the pointer, and are joined by fading lines when close.
//! Clicks spawn extra particles that live in their own FIFO so the set stays
//! bounded at `particle_count + spawn_overflow`.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::params::FieldParams;
use super::types::Pointer;

/// A single drifting particle.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	pub x: f64,
	pub y: f64,
	/// Velocity in pixels per frame
	pub vx: f64,
	pub vy: f64,
	pub radius: f64,
}

impl Particle {
	/// Advance by one frame of velocity and reflect off the `[0, width] x [0, height]` box.
	///
	/// A velocity component is inverted only when the particle is past a bound
	/// and still heading outward, so a particle that overshoots flips exactly
	/// once and one that starts outside (after a shrink) drifts back in.
	pub fn advance(&mut self, width: f64, height: f64) {
		self.x += self.vx;
		self.y += self.vy;

		if (self.x > width && self.vx > 0.0) || (self.x < 0.0 && self.vx < 0.0) {
			self.vx = -self.vx;
		}
		if (self.y > height && self.vy > 0.0) || (self.y < 0.0 && self.vy < 0.0) {
			self.vy = -self.vy;
		}
	}

	/// Push the particle directly away from `pointer`, strongest at zero
	/// distance and fading to nothing at `pointer_radius`.
	pub fn repel(&mut self, pointer: Pointer, params: &FieldParams) {
		let (dx, dy) = (pointer.x - self.x, pointer.y - self.y);
		let distance = dx.hypot(dy);
		if distance >= params.pointer_radius {
			return;
		}

		let angle = dy.atan2(dx);
		let force = (params.pointer_radius - distance) / params.pointer_radius;
		self.x -= angle.cos() * force * params.pointer_force;
		self.y -= angle.sin() * force * params.pointer_force;
	}

	pub fn distance_to(&self, other: &Particle) -> f64 {
		(self.x - other.x).hypot(self.y - other.y)
	}
}

/// A line to draw between two points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
	pub from: (f64, f64),
	pub to: (f64, f64),
	pub opacity: f64,
}

impl Link {
	/// Link two particles if they are closer than `threshold`.
	///
	/// Symmetric: `between(a, b)` and `between(b, a)` have the same opacity.
	pub fn between(a: &Particle, b: &Particle, threshold: f64) -> Option<Self> {
		FieldParams::fade(a.distance_to(b), threshold).map(|opacity| Self {
			from: (a.x, a.y),
			to: (b.x, b.y),
			opacity,
		})
	}
}

/// Draw from `[lo, hi)`, or `lo` when the range is empty.
fn spread(rng: &mut StdRng, lo: f64, hi: f64) -> f64 {
	if hi > lo { rng.gen_range(lo..hi) } else { lo }
}

/// Owns every particle of one field.
pub struct ParticleSystem {
	/// Particles created from the configured count, in creation order.
	ambient: Vec<Particle>,
	/// Click-spawned particles, oldest at the front.
	spawned: VecDeque<Particle>,
	/// Configured particle count the spawn cap is measured against.
	target: usize,
	width: f64,
	height: f64,
	params: FieldParams,
	rng: StdRng,
}

impl ParticleSystem {
	/// Create `count` particles spread uniformly over the surface.
	pub fn new(count: usize, width: f64, height: f64, params: FieldParams) -> Self {
		Self::from_rng(count, width, height, params, StdRng::from_entropy())
	}

	/// Like [`ParticleSystem::new`] with a fixed seed, for reproducible layouts.
	pub fn with_seed(count: usize, width: f64, height: f64, params: FieldParams, seed: u64) -> Self {
		Self::from_rng(count, width, height, params, StdRng::seed_from_u64(seed))
	}

	fn from_rng(count: usize, width: f64, height: f64, params: FieldParams, rng: StdRng) -> Self {
		let mut system = Self {
			ambient: Vec::with_capacity(count),
			spawned: VecDeque::new(),
			target: count,
			width,
			height,
			params,
			rng,
		};
		system.reconfigure(count);
		system
	}

	fn random_particle(&mut self, x: f64, y: f64) -> Particle {
		let speed = self.params.max_speed;
		Particle {
			x,
			y,
			vx: spread(&mut self.rng, -speed, speed),
			vy: spread(&mut self.rng, -speed, speed),
			radius: spread(&mut self.rng, self.params.radius_min, self.params.radius_max),
		}
	}

	pub fn len(&self) -> usize {
		self.ambient.len() + self.spawned.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Ambient particles first, then spawned ones from oldest to newest.
	pub fn iter(&self) -> impl Iterator<Item = &Particle> {
		self.ambient.iter().chain(self.spawned.iter())
	}

	pub fn params(&self) -> &FieldParams {
		&self.params
	}

	pub fn width(&self) -> f64 {
		self.width
	}

	pub fn height(&self) -> f64 {
		self.height
	}

	/// Advance every particle one frame, then apply pointer repulsion.
	pub fn step(&mut self, pointer: Option<Pointer>) {
		let (width, height) = (self.width, self.height);
		let params = &self.params;
		for p in self.ambient.iter_mut().chain(self.spawned.iter_mut()) {
			p.advance(width, height);
			if let Some(pointer) = pointer {
				p.repel(pointer, params);
			}
		}
	}

	/// Grow or shrink the set to exactly `count` particles.
	///
	/// Growth appends freshly randomized ambient particles. Shrinking drops
	/// the newest spawned particles first, then ambient ones from the end.
	pub fn reconfigure(&mut self, count: usize) {
		self.target = count;
		while self.len() < count {
			let x = spread(&mut self.rng, 0.0, self.width);
			let y = spread(&mut self.rng, 0.0, self.height);
			let particle = self.random_particle(x, y);
			self.ambient.push(particle);
		}
		while self.len() > count {
			if self.spawned.pop_back().is_none() {
				self.ambient.pop();
			}
		}
	}

	/// Update the bounds. Positions are left alone; anything now outside
	/// returns through the reflection rule.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	/// Spawn a particle at `(x, y)`, evicting the oldest spawned particle once
	/// the set exceeds the configured count plus `spawn_overflow`.
	pub fn spawn_at(&mut self, x: f64, y: f64) {
		let particle = self.random_particle(x, y);
		self.spawned.push_back(particle);

		let cap = self.target + self.params.spawn_overflow;
		while self.len() > cap {
			if self.spawned.pop_front().is_none() {
				break;
			}
		}
	}

	/// Every unordered particle pair closer than `connection_distance`.
	///
	/// Quadratic in the particle count; fine for the tens to low hundreds this
	/// field is meant for.
	pub fn connections(&self) -> Vec<Link> {
		let threshold = self.params.connection_distance;
		let points: Vec<&Particle> = self.iter().collect();
		let mut links = Vec::new();
		for (i, a) in points.iter().enumerate() {
			for b in &points[i + 1..] {
				if let Some(link) = Link::between(a, b, threshold) {
					links.push(link);
				}
			}
		}
		links
	}

	/// Lines from each particle near the pointer to the pointer itself.
	pub fn pointer_links(&self, pointer: Pointer) -> Vec<Link> {
		let threshold = self.params.pointer_link_distance;
		self.iter()
			.filter_map(|p| {
				FieldParams::fade(pointer.distance_to(p.x, p.y), threshold).map(|opacity| Link {
					from: (p.x, p.y),
					to: (pointer.x, pointer.y),
					opacity,
				})
			})
			.collect()
	}
}
