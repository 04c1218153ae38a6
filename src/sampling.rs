//! Random point sampling for the two endpoint layouts
//!
//! The scatter state fills a sphere by volume; the tree state lies on the
//! lateral surface of a cone that narrows to a point at the top.

use std::f32::consts::{PI, TAU};
use rand::Rng;
use crate::math::Vec3;

/// Point distributed uniformly by volume inside a sphere centred at the origin.
///
/// Draws three variates in order: azimuth, polar cosine, radius. The radius
/// variate goes through a cube root so points do not cluster at the centre.
pub fn sample_sphere_volume<R: Rng + ?Sized>(rng: &mut R, radius: f32) -> Vec3 {
    let u: f32 = rng.gen();
    let v: f32 = rng.gen();
    let theta = TAU * u;
    let phi = (2.0 * v - 1.0).clamp(-1.0, 1.0).acos();
    let r = rng.gen::<f32>().cbrt() * radius;

    let (sin_phi, cos_phi) = phi.sin_cos();
    Vec3::new(
        r * sin_phi * theta.cos(),
        r * sin_phi * theta.sin(),
        r * cos_phi,
    )
}

/// Point on the lateral surface of a cone standing on the XZ plane.
///
/// `y` spans `[-height/2, height/2]`; the radius at that height is
/// `base_radius * (0.5 - y/height)`, zero at the apex and `base_radius` at the base.
pub fn sample_cone_surface<R: Rng + ?Sized>(rng: &mut R, height: f32, base_radius: f32) -> Vec3 {
    let y = rng.gen::<f32>() * height - height / 2.0;
    let radius = base_radius * cone_radius_factor(y, height);
    let angle = rng.gen::<f32>() * PI * 2.0;

    Vec3::new(angle.cos() * radius, y, angle.sin() * radius)
}

/// Normalized cone radius at height `y`: 0 at the apex, 1 at the base.
/// A zero-height cone collapses to its mid radius.
pub fn cone_radius_factor(y: f32, height: f32) -> f32 {
    if height == 0.0 {
        0.5
    } else {
        0.5 - y / height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Mock source whose every `gen::<f32>()` is exactly 0.5
    fn halves() -> StepRng {
        StepRng::new(0x8000_0000, 0)
    }

    #[test]
    fn test_mock_source_yields_half() {
        let mut rng = halves();
        for _ in 0..4 {
            assert_eq!(rng.gen::<f32>(), 0.5);
        }
    }

    #[test]
    fn test_sphere_closed_form_at_half() {
        // u = v = w = 0.5 => theta = pi, phi = pi/2, r = cbrt(0.5) * R
        let p = sample_sphere_volume(&mut halves(), 10.0);
        let r = 0.5f32.cbrt() * 10.0;
        assert!((p.x + r).abs() < 1e-4, "x = {}", p.x);
        assert!(p.y.abs() < 1e-4, "y = {}", p.y);
        assert!(p.z.abs() < 1e-4, "z = {}", p.z);
    }

    #[test]
    fn test_cone_closed_form_at_half() {
        // y = 0, radius = R/2, angle = pi
        let p = sample_cone_surface(&mut halves(), 16.0, 6.0);
        assert!((p.x + 3.0).abs() < 1e-4);
        assert!(p.y.abs() < 1e-6);
        assert!(p.z.abs() < 1e-4);
    }

    #[test]
    fn test_sphere_stays_inside_radius() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..5000 {
            let p = sample_sphere_volume(&mut rng, 20.0);
            assert!(p.length() <= 20.0 + 1e-3);
        }
    }

    #[test]
    fn test_sphere_volume_uniformity() {
        // distance^3 / R^3 should be uniform on [0, 1]: check decile occupancy
        let mut rng = StdRng::seed_from_u64(2024);
        let n = 20_000;
        let radius = 15.0f32;
        let mut bins = [0usize; 10];
        let mut sum = 0.0f64;

        for _ in 0..n {
            let d = sample_sphere_volume(&mut rng, radius).length() / radius;
            let cubed = (d * d * d).min(0.999_999);
            sum += cubed as f64;
            bins[(cubed * 10.0) as usize] += 1;
        }

        let expected = n as f64 / 10.0;
        for (i, &count) in bins.iter().enumerate() {
            let deviation = (count as f64 - expected).abs() / expected;
            assert!(deviation < 0.1, "decile {} holds {} samples", i, count);
        }
        assert!((sum / n as f64 - 0.5).abs() < 0.02);
    }

    #[test]
    fn test_naive_radius_would_fail_uniformity() {
        // Sanity check of the test itself: uniform radius puts far too much
        // mass in the lowest decile of distance^3.
        let mut rng = StdRng::seed_from_u64(3);
        let n = 10_000;
        let low = (0..n)
            .filter(|_| {
                let d: f32 = rng.gen();
                d * d * d < 0.1
            })
            .count();
        assert!(low as f64 > n as f64 * 0.3);
    }

    #[test]
    fn test_cone_surface_bound() {
        let mut rng = StdRng::seed_from_u64(11);
        let (h, r) = (14.0f32, 5.5f32);
        for _ in 0..10_000 {
            let p = sample_cone_surface(&mut rng, h, r);
            assert!(p.y >= -h / 2.0 && p.y <= h / 2.0);
            let expected = r * (0.5 - p.y / h);
            assert!((p.horizontal_length() - expected).abs() < 1e-3);
        }
    }

    #[test]
    fn test_cone_apex_and_base_radius() {
        assert_eq!(cone_radius_factor(8.0, 16.0), 0.0);
        assert_eq!(cone_radius_factor(-8.0, 16.0), 1.0);
    }

    #[test]
    fn test_zero_height_cone_is_finite() {
        let mut rng = StdRng::seed_from_u64(5);
        let p = sample_cone_surface(&mut rng, 0.0, 4.0);
        assert!(p.is_finite());
        assert_eq!(p.y, 0.0);
        assert!((p.horizontal_length() - 2.0).abs() < 1e-4);
    }
}
