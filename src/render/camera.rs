//! Orbiting perspective camera

use std::f32::consts::{FRAC_PI_2, TAU};
use crate::config::CameraConfig;
use crate::math::{Mat4, Vec3};

const ORBIT_SENSITIVITY: f32 = 0.01;
const ZOOM_SENSITIVITY: f32 = 0.5;
const NEAR: f32 = 0.1;
const FAR: f32 = 200.0;

/// Camera on a sphere around a target, driven by elevation and azimuth angles
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    target: Vec3,
    distance: f32,
    /// Angle above the horizontal plane
    elevation: f32,
    /// Angle around the vertical axis, 0 looks down -Z
    azimuth: f32,
    fov: f32,
    min_distance: f32,
    max_distance: f32,
    min_elevation: f32,
    max_elevation: f32,
    auto_rotate_speed: f32,
}

impl OrbitCamera {
    pub fn new(config: &CameraConfig) -> Self {
        let offset = config.position - config.target;
        let distance = offset.length().clamp(config.min_distance, config.max_distance);
        let elevation = if offset.length() > 0.0 {
            (offset.y / offset.length()).clamp(-1.0, 1.0).asin()
        } else {
            0.0
        };

        let mut camera = Self {
            target: config.target,
            distance,
            elevation,
            azimuth: crate::math::safe_atan2(offset.x, offset.z),
            fov: config.fov.to_radians(),
            min_distance: config.min_distance,
            max_distance: config.max_distance,
            // A polar cap measured from +Y becomes a floor on elevation
            min_elevation: FRAC_PI_2 - config.max_polar_angle,
            max_elevation: FRAC_PI_2 - 0.1,
            auto_rotate_speed: config.auto_rotate_speed,
        };
        camera.elevation = camera.elevation.clamp(camera.min_elevation, camera.max_elevation);
        camera
    }

    /// Drag by screen pixels
    pub fn orbit(&mut self, delta_x: f32, delta_y: f32) {
        self.azimuth += delta_x * ORBIT_SENSITIVITY;
        self.elevation = (self.elevation + delta_y * ORBIT_SENSITIVITY)
            .clamp(self.min_elevation, self.max_elevation);
    }

    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance + delta * ZOOM_SENSITIVITY)
            .clamp(self.min_distance, self.max_distance);
    }

    /// Advance auto-rotation by `dt` seconds
    pub fn auto_rotate(&mut self, dt: f32) {
        self.azimuth += TAU / 60.0 * self.auto_rotate_speed * dt;
    }

    pub fn position(&self) -> Vec3 {
        let (sin_x, cos_x) = self.elevation.sin_cos();
        let (sin_y, cos_y) = self.azimuth.sin_cos();
        self.target + Vec3::new(
            self.distance * cos_x * sin_y,
            self.distance * sin_x,
            self.distance * cos_x * cos_y,
        )
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at(self.position(), self.target, Vec3::UP)
    }

    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective(self.fov, aspect, NEAR, FAR)
    }
}
