//! The animated scene: one mode signal driving every group

use rand::Rng;
use crate::animation::{
    AnimationGroup, ApproachRate, FoliageGroup, FoliagePalette, MotionParams, OrnamentGroup,
};
use crate::config::SceneConfig;
use crate::error::ConfigError;
use crate::layout::{OrnamentPopulation, ParticlePopulation};
use crate::math::{Mat4, Vec3};
use crate::mode::{ModeSignal, TreeMode};

/// Foliage cloud plus ornament layers, all chasing the same mode
#[derive(Debug)]
pub struct TreeScene {
    mode: ModeSignal,
    foliage: FoliageGroup,
    ornaments: Vec<OrnamentGroup>,
    motion: MotionParams,
    palette: FoliagePalette,
    offset: Vec3,
    time: f32,
}

impl TreeScene {
    /// Validate the configuration and generate every population.
    ///
    /// Variates are drawn from `rng` in group order: foliage first, then
    /// each ornament layer as listed.
    pub fn new<R: Rng + ?Sized>(config: &SceneConfig, rng: &mut R) -> Result<Self, ConfigError> {
        config.validate().map_err(|e| {
            log::warn!("Rejected scene config: {}", e);
            e
        })?;

        let f = &config.foliage;
        let population = ParticlePopulation::generate(rng, f.count, &f.shape, &f.sizes);
        let foliage = FoliageGroup::new(f.name.clone(), population, approach_rate(&f.name, f.rate)?);
        log::info!("Generated {} particles for '{}'", foliage.len(), f.name);

        let mut ornaments = Vec::with_capacity(config.ornaments.len());
        for layer in &config.ornaments {
            let population = OrnamentPopulation::generate(
                rng,
                layer.count,
                &layer.geometry,
                &layer.scales,
                layer.jitter,
            );
            let group = OrnamentGroup::new(
                layer.name.clone(),
                layer.shape,
                population,
                approach_rate(&layer.name, layer.rate)?,
                layer.scale_factor,
            );
            log::info!("Generated {} {:?} ornaments for '{}'", group.len(), layer.shape, layer.name);
            ornaments.push(group);
        }

        Ok(Self {
            mode: ModeSignal::new(config.initial_mode),
            foliage,
            ornaments,
            motion: config.motion.clone(),
            palette: config.palette,
            offset: config.scene_offset,
            time: 0.0,
        })
    }

    pub fn mode(&self) -> TreeMode {
        self.mode.get()
    }

    /// Shared handle for writers outside the frame loop
    pub fn mode_signal(&self) -> &ModeSignal {
        &self.mode
    }

    pub fn set_mode(&self, mode: TreeMode) {
        if self.mode.get() != mode {
            log::info!("Mode -> {}", mode.label());
        }
        self.mode.set(mode);
    }

    pub fn toggle_mode(&self) -> TreeMode {
        let mode = self.mode.toggle();
        log::info!("Mode -> {}", mode.label());
        mode
    }

    /// Advance every group one frame. `time` is elapsed seconds.
    ///
    /// The mode is read once, so all groups see the same target this frame.
    pub fn tick(&mut self, time: f32) {
        let mode = self.mode.get();
        self.time = time;
        self.foliage.tick(mode, time, &self.motion);
        for group in &mut self.ornaments {
            group.tick(mode, time, &self.motion);
        }
        log::trace!("tick t={:.3} foliage={:.4}", time, self.foliage.progress());
    }

    /// Time passed to the most recent tick
    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn foliage(&self) -> &FoliageGroup {
        &self.foliage
    }

    pub fn ornaments(&self) -> &[OrnamentGroup] {
        &self.ornaments
    }

    pub fn ornament(&self, name: &str) -> Option<&OrnamentGroup> {
        self.ornaments.iter().find(|g| g.name() == name)
    }

    /// Every group, foliage first
    pub fn groups(&self) -> impl Iterator<Item = &dyn AnimationGroup> {
        std::iter::once(&self.foliage as &dyn AnimationGroup)
            .chain(self.ornaments.iter().map(|g| g as &dyn AnimationGroup))
    }

    pub fn progress_of(&self, name: &str) -> Option<f32> {
        self.groups().find(|g| g.name() == name).map(|g| g.progress())
    }

    /// True once every group is within `epsilon` of the current target
    pub fn is_settled(&self, epsilon: f32) -> bool {
        let target = self.mode.get().target();
        self.groups().all(|g| (g.progress() - target).abs() <= epsilon)
    }

    pub fn motion(&self) -> &MotionParams {
        &self.motion
    }

    pub fn palette(&self) -> &FoliagePalette {
        &self.palette
    }

    /// Model matrix placing the tree in the world
    pub fn world_matrix(&self) -> Mat4 {
        Mat4::translation(self.offset.x, self.offset.y, self.offset.z)
    }
}

fn approach_rate(group: &str, rate: f32) -> Result<ApproachRate, ConfigError> {
    ApproachRate::new(rate).ok_or_else(|| ConfigError::InvalidRate {
        group: group.to_string(),
        rate,
    })
}
