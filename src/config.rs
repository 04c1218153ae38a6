//! Scene configuration loaded from YAML
//!
//! Every field has a default, so an empty document describes the full
//! scene: a foliage cloud plus gift, bauble and light layers.

use std::collections::HashSet;
use serde::{Deserialize, Serialize};
use crate::animation::{ApproachRate, FoliagePalette, MotionParams};
use crate::error::ConfigError;
use crate::layout::{OrnamentShape, SizeRange, TreeShape};
use crate::math::Vec3;
use crate::mode::TreeMode;

/// Top-level scene description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub initial_mode: TreeMode,
    /// World-space offset applied to the whole tree
    pub scene_offset: Vec3,
    pub foliage: FoliageConfig,
    pub ornaments: Vec<OrnamentConfig>,
    pub motion: MotionParams,
    pub palette: FoliagePalette,
    pub camera: CameraConfig,
    pub lighting: LightingConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            initial_mode: TreeMode::TreeShape,
            scene_offset: Vec3::new(0.0, -5.0, 0.0),
            foliage: FoliageConfig::default(),
            ornaments: default_ornaments(),
            motion: MotionParams::default(),
            palette: FoliagePalette::default(),
            camera: CameraConfig::default(),
            lighting: LightingConfig::default(),
        }
    }
}

/// The particle cloud
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FoliageConfig {
    pub name: String,
    pub count: usize,
    pub shape: TreeShape,
    pub sizes: SizeRange,
    pub rate: f32,
}

impl Default for FoliageConfig {
    fn default() -> Self {
        Self {
            name: "foliage".to_string(),
            count: 15_000,
            shape: TreeShape {
                height: 16.0,
                base_radius: 6.0,
                scatter_radius: 20.0,
            },
            sizes: SizeRange::new(0.5, 1.0),
            rate: 0.03,
        }
    }
}

/// One instanced ornament layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrnamentConfig {
    pub name: String,
    #[serde(rename = "type")]
    pub shape: OrnamentShape,
    pub count: usize,
    pub rate: f32,
    pub scale_factor: f32,
    #[serde(default)]
    pub geometry: TreeShape,
    #[serde(default = "default_ornament_scales")]
    pub scales: SizeRange,
    #[serde(default = "default_jitter")]
    pub jitter: f32,
    #[serde(default)]
    pub finish: Finish,
}

/// Surface look of an ornament layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Finish {
    pub color: Vec3,
    pub metalness: f32,
    pub roughness: f32,
    /// Drawn at full colour, ignoring lights
    pub unlit: bool,
}

impl Default for Finish {
    fn default() -> Self {
        Self {
            color: Vec3::ONE,
            metalness: 0.0,
            roughness: 0.5,
            unlit: false,
        }
    }
}

/// Perspective camera and orbit limits
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov: f32,
    pub position: Vec3,
    pub target: Vec3,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Largest polar angle from the up axis, in radians
    pub max_polar_angle: f32,
    /// Auto-rotation while scattered; one full turn takes `60 / speed` seconds
    pub auto_rotate_speed: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov: 50.0,
            position: Vec3::new(0.0, 5.0, 25.0),
            target: Vec3::ZERO,
            min_distance: 10.0,
            max_distance: 40.0,
            max_polar_angle: std::f32::consts::FRAC_PI_2 + 0.2,
            auto_rotate_speed: 0.5,
        }
    }
}

/// Ambient fill plus two point lights
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    pub ambient: Vec3,
    pub key_position: Vec3,
    pub key_color: Vec3,
    pub fill_position: Vec3,
    pub fill_color: Vec3,
    pub background: Vec3,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            ambient: Vec3::new(0.0, 0.034, 0.019),
            key_position: Vec3::new(10.0, 20.0, 10.0),
            key_color: Vec3::new(0.88, 0.75, 0.72),
            fill_position: Vec3::new(-10.0, 10.0, -10.0),
            fill_color: Vec3::new(0.13, 0.25, 0.4),
            background: Vec3::ZERO,
        }
    }
}

fn default_ornament_scales() -> SizeRange {
    SizeRange::new(0.2, 0.5)
}

fn default_jitter() -> f32 {
    0.5
}

fn default_ornaments() -> Vec<OrnamentConfig> {
    let layer = |name: &str, shape, count, rate, scale_factor, finish| OrnamentConfig {
        name: name.to_string(),
        shape,
        count,
        rate,
        scale_factor,
        geometry: TreeShape::default(),
        scales: default_ornament_scales(),
        jitter: default_jitter(),
        finish,
    };

    vec![
        // Heavy gifts settle last
        layer("gifts", OrnamentShape::Box, 50, 0.02, 1.5, Finish {
            color: Vec3::new(0.54, 0.04, 0.04),
            metalness: 0.4,
            roughness: 0.3,
            unlit: false,
        }),
        layer("baubles", OrnamentShape::Sphere, 120, 0.04, 0.8, Finish {
            color: Vec3::new(1.0, 0.84, 0.0),
            metalness: 1.0,
            roughness: 0.1,
            unlit: false,
        }),
        layer("lights", OrnamentShape::Star, 200, 0.04, 0.3, Finish {
            color: Vec3::new(1.0, 0.98, 0.89),
            metalness: 0.0,
            roughness: 1.0,
            unlit: true,
        }),
    ]
}

impl SceneConfig {
    /// Parse and validate a YAML document
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: SceneConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Reject anything the generators or controllers cannot honour.
    /// Values are never clamped into range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let foliage = &self.foliage;
        check_count(&foliage.name, foliage.count)?;
        check_shape(&foliage.name, &foliage.shape)?;
        check_range(&foliage.name, "size", &foliage.sizes)?;
        check_rate(&foliage.name, foliage.rate)?;

        let mut names = HashSet::new();
        names.insert(foliage.name.as_str());

        for layer in &self.ornaments {
            if !names.insert(layer.name.as_str()) {
                return Err(ConfigError::DuplicateGroup(layer.name.clone()));
            }
            check_count(&layer.name, layer.count)?;
            check_shape(&layer.name, &layer.geometry)?;
            check_range(&layer.name, "scale", &layer.scales)?;
            check_rate(&layer.name, layer.rate)?;
            check_positive(&layer.name, "scale_factor", layer.scale_factor)?;
            if layer.jitter.is_nan() || layer.jitter < 0.0 {
                return Err(ConfigError::NegativeJitter {
                    group: layer.name.clone(),
                    value: layer.jitter,
                });
            }
        }

        let motion = &self.motion.particle;
        check_positive("motion", "height_span", motion.height_span)?;
        check_positive("motion", "size_attenuation", motion.size_attenuation)?;

        let camera = &self.camera;
        check_positive("camera", "fov", camera.fov)?;
        check_positive("camera", "min_distance", camera.min_distance)?;
        if camera.min_distance > camera.max_distance {
            return Err(ConfigError::InvalidRange {
                group: "camera".to_string(),
                field: "distance",
                min: camera.min_distance,
                max: camera.max_distance,
            });
        }

        Ok(())
    }

    /// Group names in scene order, foliage first
    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.foliage.name.as_str())
            .chain(self.ornaments.iter().map(|o| o.name.as_str()))
    }
}

fn check_count(group: &str, count: usize) -> Result<(), ConfigError> {
    if count == 0 {
        return Err(ConfigError::InvalidCount {
            group: group.to_string(),
        });
    }
    Ok(())
}

fn check_positive(group: &str, field: &'static str, value: f32) -> Result<(), ConfigError> {
    // Written so NaN fails too
    if !(value > 0.0 && value.is_finite()) {
        return Err(ConfigError::NonPositive {
            group: group.to_string(),
            field,
            value,
        });
    }
    Ok(())
}

fn check_shape(group: &str, shape: &TreeShape) -> Result<(), ConfigError> {
    check_positive(group, "height", shape.height)?;
    check_positive(group, "base_radius", shape.base_radius)?;
    check_positive(group, "scatter_radius", shape.scatter_radius)
}

fn check_range(group: &str, field: &'static str, range: &SizeRange) -> Result<(), ConfigError> {
    check_positive(group, field, range.min)?;
    check_positive(group, field, range.max)?;
    if range.min > range.max {
        return Err(ConfigError::InvalidRange {
            group: group.to_string(),
            field,
            min: range.min,
            max: range.max,
        });
    }
    Ok(())
}

fn check_rate(group: &str, rate: f32) -> Result<(), ConfigError> {
    ApproachRate::new(rate).map(|_| ()).ok_or(ConfigError::InvalidRate {
        group: group.to_string(),
        rate,
    })
}
