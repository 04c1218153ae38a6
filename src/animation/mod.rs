//! Per-frame animation for the dual-state scene
//!
//! Progress controllers chase the mode target, easing shapes the progress,
//! and the motion pass turns eased progress plus time into positions,
//! colours and instance matrices.

mod easing;
mod group;
mod motion;
mod progress;

pub use easing::smoothstep;
pub use group::{AnimationGroup, FoliageGroup, OrnamentGroup};
pub use motion::{
    eased_progress, evaluate_ornaments, evaluate_particles, ornament_transform, particle_alpha,
    particle_color, particle_float_bound, particle_float_offset, particle_sample, point_size, Blend,
    FoliagePalette, MotionParams, OrnamentMotion, ParticleMotion, ParticleSample,
};
pub use progress::{ApproachRate, ProgressController};
