//! Per-frame interpolation and secondary motion
//!
//! The host-side reference for everything the foliage vertex shader does,
//! and the only implementation for the instanced ornament layers. Every
//! function is a pure function of progress, time, and an element's fixed
//! attributes, so a frame can be recomputed from scratch at any time.

use serde::{Deserialize, Serialize};
use crate::layout::{OrnamentElement, OrnamentPopulation, ParticleElement, ParticlePopulation};
use crate::math::{lerp, Mat4, Vec3};
use super::easing::smoothstep;

/// A value that blends from its scattered setting to its assembled setting
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Blend {
    pub scattered: f32,
    pub assembled: f32,
}

impl Blend {
    pub const fn new(scattered: f32, assembled: f32) -> Self {
        Self { scattered, assembled }
    }

    /// Value at an eased progress
    pub fn at(&self, eased: f32) -> f32 {
        lerp(self.scattered, self.assembled, eased)
    }

    fn max_abs(&self) -> f32 {
        self.scattered.abs().max(self.assembled.abs())
    }
}

/// Tuning for the foliage particles. Aesthetic defaults, not contracts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleMotion {
    /// Base floating offset per axis
    pub float_amplitude: f32,
    /// Heavy drifting when scattered, a faint shiver when assembled
    pub float_intensity: Blend,
    pub float_speed: Blend,
    /// Per-axis frequency multipliers (x, y, z)
    pub axis_frequency: [f32; 3],
    /// Per-axis multipliers on the element's random phase (x, y, z)
    pub axis_phase: [f32; 3],
    /// Dust-like fade when scattered
    pub alpha: Blend,
    /// `gl_PointSize = size * size_attenuation / depth`
    pub size_attenuation: f32,
    /// Height gradient spans `[-height_offset, span - height_offset]`
    pub height_offset: f32,
    pub height_span: f32,
    /// Share of gold contributed by height and by the pulse
    pub height_gold: f32,
    pub pulse_gold: f32,
    pub pulse_phase: f32,
}

impl Default for ParticleMotion {
    fn default() -> Self {
        Self {
            float_amplitude: 0.2,
            float_intensity: Blend::new(1.0, 0.1),
            float_speed: Blend::new(0.5, 2.0),
            axis_frequency: [1.0, 0.8, 1.2],
            axis_phase: [10.0, 20.0, 30.0],
            alpha: Blend::new(0.6, 1.0),
            size_attenuation: 300.0,
            height_offset: 7.0,
            height_span: 14.0,
            height_gold: 0.3,
            pulse_gold: 0.2,
            pulse_phase: 10.0,
        }
    }
}

/// Tuning for the instanced ornament layers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrnamentMotion {
    /// Vertical bob amplitude
    pub float_amplitude: Blend,
    pub bob_speed: f32,
    pub yaw_wobble_speed: f32,
    /// Yaw wobble as a fraction of the bob amplitude
    pub yaw_wobble_factor: f32,
}

impl Default for OrnamentMotion {
    fn default() -> Self {
        Self {
            float_amplitude: Blend::new(1.5, 0.05),
            bob_speed: 0.5,
            yaw_wobble_speed: 0.2,
            yaw_wobble_factor: 0.1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionParams {
    pub particle: ParticleMotion,
    pub ornament: OrnamentMotion,
}

/// Foliage colours, linear RGB
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FoliagePalette {
    pub emerald: Vec3,
    pub gold: Vec3,
}

impl Default for FoliagePalette {
    fn default() -> Self {
        Self {
            emerald: Vec3::new(0.0, 0.25, 0.15),
            gold: Vec3::new(1.0, 0.84, 0.0),
        }
    }
}

/// Fully evaluated particle for one frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ParticleSample {
    pub position: Vec3,
    pub color: Vec3,
    pub alpha: f32,
}

/// Clamp raw progress into `[0, 1]` and ease it
pub fn eased_progress(progress: f32) -> f32 {
    smoothstep(progress)
}

/// Sinusoidal drift of one particle, deterministic in time and phase
pub fn particle_float_offset(m: &ParticleMotion, eased: f32, time: f32, phase: f32) -> Vec3 {
    let speed = m.float_speed.at(eased);
    let amplitude = m.float_amplitude * m.float_intensity.at(eased);
    let arg = |axis: usize| time * speed * m.axis_frequency[axis] + phase * m.axis_phase[axis];

    Vec3::new(
        arg(0).sin() * amplitude,
        arg(1).cos() * amplitude,
        arg(2).sin() * amplitude,
    )
}

/// Largest per-axis drift a particle can show at any progress
pub fn particle_float_bound(m: &ParticleMotion) -> f32 {
    m.float_amplitude.abs() * m.float_intensity.max_abs()
}

/// Emerald at the base, golder toward the tips, with a slow shimmer
pub fn particle_color(
    m: &ParticleMotion,
    palette: &FoliagePalette,
    height: f32,
    time: f32,
    phase: f32,
) -> Vec3 {
    let height_mix = ((height + m.height_offset) / m.height_span).clamp(0.0, 1.0);
    let pulse = 0.5 + 0.5 * (time + phase * m.pulse_phase).sin();
    let gold = (m.height_gold * height_mix + m.pulse_gold * pulse).clamp(0.0, 1.0);
    palette.emerald.lerp(&palette.gold, gold)
}

pub fn particle_alpha(m: &ParticleMotion, eased: f32) -> f32 {
    m.alpha.at(eased)
}

/// Screen size of a point sprite at the given view-space depth.
/// Points at or behind the camera get no size.
pub fn point_size(m: &ParticleMotion, size: f32, view_depth: f32) -> f32 {
    if view_depth <= 0.0 {
        0.0
    } else {
        size * m.size_attenuation / view_depth
    }
}

pub fn particle_sample(
    m: &ParticleMotion,
    palette: &FoliagePalette,
    particle: &ParticleElement,
    progress: f32,
    time: f32,
) -> ParticleSample {
    let eased = eased_progress(progress);
    let position = particle.scatter.lerp(&particle.tree, eased)
        + particle_float_offset(m, eased, time, particle.phase);

    ParticleSample {
        position,
        color: particle_color(m, palette, position.y, time, particle.phase),
        alpha: particle_alpha(m, eased),
    }
}

/// Host-side evaluation of a whole particle population into `out`
pub fn evaluate_particles(
    population: &ParticlePopulation,
    progress: f32,
    time: f32,
    m: &ParticleMotion,
    palette: &FoliagePalette,
    out: &mut [ParticleSample],
) {
    debug_assert_eq!(out.len(), population.len());
    for (slot, particle) in out.iter_mut().zip(population.iter()) {
        *slot = particle_sample(m, palette, &particle, progress, time);
    }
}

/// World transform of one ornament, written into `out`
pub fn ornament_transform(
    m: &OrnamentMotion,
    ornament: &OrnamentElement,
    eased: f32,
    time: f32,
    scale_factor: f32,
    out: &mut Mat4,
) {
    let amplitude = m.float_amplitude.at(eased);
    let seed = ornament.id() as f32;

    let mut position = ornament.scatter().lerp(&ornament.tree(), eased);
    position.y += (time * m.bob_speed + seed).sin() * amplitude;

    let yaw_wobble = (time * m.yaw_wobble_speed + seed).cos() * amplitude * m.yaw_wobble_factor;
    let tree_rotation = ornament.tree_rotation() + Vec3::new(0.0, yaw_wobble, 0.0);
    let rotation = ornament.scatter_rotation().lerp(&tree_rotation, eased);

    out.set_trs(position, rotation, ornament.scale() * scale_factor);
}

/// Write one matrix per ornament into the caller-owned `out` slice
pub fn evaluate_ornaments(
    population: &OrnamentPopulation,
    progress: f32,
    time: f32,
    scale_factor: f32,
    m: &OrnamentMotion,
    out: &mut [Mat4],
) {
    debug_assert_eq!(out.len(), population.len());
    let eased = eased_progress(progress);
    for (slot, ornament) in out.iter_mut().zip(population.elements()) {
        ornament_transform(m, ornament, eased, time, scale_factor, slot);
    }
}
