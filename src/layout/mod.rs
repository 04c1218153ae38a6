//! Dual-position layouts, generated once per population
//!
//! Every element gets a scatter endpoint (inside a sphere) and a tree
//! endpoint (on a cone). Nothing here changes after generation.

mod ornaments;
mod particles;

use rand::Rng;
use serde::{Deserialize, Serialize};

pub use ornaments::{OrnamentElement, OrnamentPopulation};
pub use particles::{ParticleElement, ParticlePopulation, PARTICLE_ATTRIBUTE_STRIDE};

/// How a population reaches the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPath {
    /// Point sprites; the vertex shader interpolates from static attributes
    Particle,
    /// Instanced meshes; one host-computed matrix per element per frame
    Instanced,
}

/// Mesh drawn for every instance of an ornament layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrnamentShape {
    Box,
    Sphere,
    Star,
}

/// Geometry of both endpoint distributions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TreeShape {
    /// Cone height; the cone spans `[-height/2, height/2]` on Y
    pub height: f32,
    /// Cone radius at its base
    pub base_radius: f32,
    /// Radius of the scatter sphere
    pub scatter_radius: f32,
}

impl Default for TreeShape {
    fn default() -> Self {
        Self {
            height: 14.0,
            base_radius: 5.5,
            scatter_radius: 15.0,
        }
    }
}

/// Half-open `[min, max)` range for per-element sizes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeRange {
    pub min: f32,
    pub max: f32,
}

impl SizeRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        self.min + rng.gen::<f32>() * (self.max - self.min)
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }
}
