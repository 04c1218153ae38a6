pub mod vec3;
pub mod matrix;

pub use vec3::Vec3;
pub use matrix::Mat4;

/// Scalar linear interpolation
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// `atan2` that yields 0 for the degenerate (0, 0) direction
pub fn safe_atan2(y: f32, x: f32) -> f32 {
    if y == 0.0 && x == 0.0 {
        0.0
    } else {
        y.atan2(x)
    }
}
