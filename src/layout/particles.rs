use rand::Rng;
use crate::math::Vec3;
use crate::sampling::{sample_cone_surface, sample_sphere_volume};
use super::{SizeRange, TreeShape};

/// Floats per particle in the interleaved attribute buffer:
/// scatter(3) + tree(3) + size(1) + random phase(1)
pub const PARTICLE_ATTRIBUTE_STRIDE: usize = 8;

/// A single particle's static data, copied out of the population
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleElement {
    pub id: usize,
    pub scatter: Vec3,
    pub tree: Vec3,
    pub size: f32,
    pub phase: f32,
}

/// Particle population stored as parallel arrays, ready for GPU upload
#[derive(Debug, Clone)]
pub struct ParticlePopulation {
    scatter: Vec<Vec3>,
    tree: Vec<Vec3>,
    sizes: Vec<f32>,
    phases: Vec<f32>,
}

impl ParticlePopulation {
    pub fn generate<R: Rng + ?Sized>(
        rng: &mut R,
        count: usize,
        shape: &TreeShape,
        sizes: &SizeRange,
    ) -> Self {
        let mut population = Self {
            scatter: Vec::with_capacity(count),
            tree: Vec::with_capacity(count),
            sizes: Vec::with_capacity(count),
            phases: Vec::with_capacity(count),
        };

        for _ in 0..count {
            population.scatter.push(sample_sphere_volume(rng, shape.scatter_radius));
            population.tree.push(sample_cone_surface(rng, shape.height, shape.base_radius));
            population.sizes.push(sizes.sample(rng));
            population.phases.push(rng.gen::<f32>());
        }

        population
    }

    pub fn len(&self) -> usize {
        self.scatter.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scatter.is_empty()
    }

    pub fn scatter_positions(&self) -> &[Vec3] {
        &self.scatter
    }

    pub fn tree_positions(&self) -> &[Vec3] {
        &self.tree
    }

    pub fn sizes(&self) -> &[f32] {
        &self.sizes
    }

    pub fn phases(&self) -> &[f32] {
        &self.phases
    }

    pub fn get(&self, id: usize) -> Option<ParticleElement> {
        Some(ParticleElement {
            id,
            scatter: *self.scatter.get(id)?,
            tree: self.tree[id],
            size: self.sizes[id],
            phase: self.phases[id],
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = ParticleElement> + '_ {
        (0..self.len()).filter_map(move |id| self.get(id))
    }

    /// Interleaved attribute data for GPU upload.
    /// Layout: scatter(3) + tree(3) + size(1) + random(1) = 8 floats per particle
    pub fn attribute_data(&self) -> Vec<f32> {
        let mut data = Vec::with_capacity(self.len() * PARTICLE_ATTRIBUTE_STRIDE);

        for p in self.iter() {
            data.extend_from_slice(&p.scatter.to_array());
            data.extend_from_slice(&p.tree.to_array());
            data.push(p.size);
            data.push(p.phase);
        }

        data
    }
}
