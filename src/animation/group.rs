//! Independently paced animation groups
//!
//! A group owns one population, one progress controller, and the output
//! buffers its motion pass writes. Groups share nothing mutable.

use crate::layout::{OrnamentPopulation, OrnamentShape, ParticlePopulation, RenderPath};
use crate::math::Mat4;
use crate::mode::TreeMode;
use super::motion::{self, FoliagePalette, MotionParams, ParticleSample};
use super::progress::{ApproachRate, ProgressController};

/// Common interface for every group in the scene
pub trait AnimationGroup {
    fn name(&self) -> &str;

    fn render_path(&self) -> RenderPath;

    /// Number of elements; fixed after generation
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Progress after the most recent tick
    fn progress(&self) -> f32;

    /// Advance progress toward the mode, then run this group's motion pass
    /// against the just-updated progress.
    fn tick(&mut self, mode: TreeMode, time: f32, motion: &MotionParams);
}

/// The foliage particle cloud. Its per-vertex work runs in the vertex
/// shader, so a tick only advances progress.
#[derive(Debug, Clone)]
pub struct FoliageGroup {
    name: String,
    population: ParticlePopulation,
    controller: ProgressController,
}

impl FoliageGroup {
    pub fn new(name: impl Into<String>, population: ParticlePopulation, rate: ApproachRate) -> Self {
        Self {
            name: name.into(),
            population,
            controller: ProgressController::new(rate),
        }
    }

    pub fn population(&self) -> &ParticlePopulation {
        &self.population
    }

    /// Host-side evaluation of the same motion the shader performs
    pub fn sample_into(
        &self,
        time: f32,
        motion: &MotionParams,
        palette: &FoliagePalette,
        out: &mut [ParticleSample],
    ) {
        motion::evaluate_particles(
            &self.population,
            self.controller.progress(),
            time,
            &motion.particle,
            palette,
            out,
        );
    }
}

impl AnimationGroup for FoliageGroup {
    fn name(&self) -> &str {
        &self.name
    }

    fn render_path(&self) -> RenderPath {
        RenderPath::Particle
    }

    fn len(&self) -> usize {
        self.population.len()
    }

    fn progress(&self) -> f32 {
        self.controller.progress()
    }

    fn tick(&mut self, mode: TreeMode, _time: f32, _motion: &MotionParams) {
        self.controller.update(mode);
    }
}

/// One instanced ornament layer with double-buffered instance matrices.
///
/// The motion pass writes the back buffer, then the buffers swap, so
/// `matrices()` always returns a completed frame.
#[derive(Debug, Clone)]
pub struct OrnamentGroup {
    name: String,
    shape: OrnamentShape,
    population: OrnamentPopulation,
    controller: ProgressController,
    scale_factor: f32,
    front: Vec<Mat4>,
    back: Vec<Mat4>,
}

impl OrnamentGroup {
    pub fn new(
        name: impl Into<String>,
        shape: OrnamentShape,
        population: OrnamentPopulation,
        rate: ApproachRate,
        scale_factor: f32,
    ) -> Self {
        let count = population.len();
        Self {
            name: name.into(),
            shape,
            population,
            controller: ProgressController::new(rate),
            scale_factor,
            front: vec![Mat4::identity(); count],
            back: vec![Mat4::identity(); count],
        }
    }

    pub fn shape(&self) -> OrnamentShape {
        self.shape
    }

    pub fn scale_factor(&self) -> f32 {
        self.scale_factor
    }

    pub fn population(&self) -> &OrnamentPopulation {
        &self.population
    }

    /// Instance matrices of the last completed frame
    pub fn matrices(&self) -> &[Mat4] {
        &self.front
    }

    /// Flatten the front buffer into `out` for upload (16 floats per instance)
    pub fn write_matrix_data(&self, out: &mut Vec<f32>) {
        out.clear();
        out.reserve(self.front.len() * 16);
        for m in &self.front {
            out.extend_from_slice(m.as_slice());
        }
    }
}

impl AnimationGroup for OrnamentGroup {
    fn name(&self) -> &str {
        &self.name
    }

    fn render_path(&self) -> RenderPath {
        RenderPath::Instanced
    }

    fn len(&self) -> usize {
        self.population.len()
    }

    fn progress(&self) -> f32 {
        self.controller.progress()
    }

    fn tick(&mut self, mode: TreeMode, time: f32, motion: &MotionParams) {
        let progress = self.controller.update(mode);
        motion::evaluate_ornaments(
            &self.population,
            progress,
            time,
            self.scale_factor,
            &motion.ornament,
            &mut self.back,
        );
        std::mem::swap(&mut self.front, &mut self.back);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{SizeRange, TreeShape};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn baubles() -> OrnamentGroup {
        let population = OrnamentPopulation::generate(
            &mut StdRng::seed_from_u64(30),
            120,
            &TreeShape::default(),
            &SizeRange::new(0.2, 0.5),
            0.5,
        );
        OrnamentGroup::new("baubles", OrnamentShape::Sphere, population, ApproachRate::new(0.04).unwrap(), 0.8)
    }

    #[test]
    fn test_tick_reads_updated_progress() {
        let mut group = baubles();
        let motion = MotionParams::default();
        group.tick(TreeMode::TreeShape, 1.0, &motion);

        // One tick at rate 0.04 from zero
        let progress = group.progress();
        assert!((progress - 0.04).abs() < 1e-6);

        let mut expected = vec![Mat4::identity(); group.len()];
        motion::evaluate_ornaments(group.population(), progress, 1.0, 0.8, &motion.ornament, &mut expected);
        assert_eq!(group.matrices(), expected.as_slice());
    }

    #[test]
    fn test_front_buffer_holds_last_frame() {
        let mut group = baubles();
        let motion = MotionParams::default();
        group.tick(TreeMode::TreeShape, 0.0, &motion);
        let first = group.matrices().to_vec();
        group.tick(TreeMode::TreeShape, 0.5, &motion);
        assert_ne!(group.matrices(), first.as_slice());
        assert_eq!(group.matrices().len(), 120);
    }

    #[test]
    fn test_matrix_data_layout() {
        let mut group = baubles();
        group.tick(TreeMode::Scattered, 2.0, &MotionParams::default());
        let mut data = Vec::new();
        group.write_matrix_data(&mut data);
        assert_eq!(data.len(), 120 * 16);
        assert_eq!(&data[16..32], group.matrices()[1].as_slice());
    }

    #[test]
    fn test_foliage_tick_only_moves_progress() {
        let shape = TreeShape {
            height: 16.0,
            base_radius: 6.0,
            scatter_radius: 20.0,
        };
        let population = ParticlePopulation::generate(&mut StdRng::seed_from_u64(31), 100, &shape, &SizeRange::new(0.5, 1.0));
        let mut group = FoliageGroup::new("foliage", population, ApproachRate::new(0.03).unwrap());
        assert_eq!(group.render_path(), RenderPath::Particle);

        group.tick(TreeMode::TreeShape, 0.0, &MotionParams::default());
        assert!((group.progress() - 0.03).abs() < 1e-6);
        group.tick(TreeMode::Scattered, 0.0, &MotionParams::default());
        assert!(group.progress() < 0.03);
    }

    #[test]
    fn test_groups_as_trait_objects() {
        let group = baubles();
        let groups: Vec<&dyn AnimationGroup> = vec![&group];
        assert_eq!(groups[0].name(), "baubles");
        assert_eq!(groups[0].render_path(), RenderPath::Instanced);
        assert!(!groups[0].is_empty());
    }
}
