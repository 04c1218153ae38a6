//! Easing applied to group progress before interpolation

/// Hermite smoothstep `t²(3 − 2t)`: zero slope at both ends, so a target
/// flip never shows up as a velocity jump. Input is clamped to `[0, 1]`.
pub fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smoothstep_endpoints() {
        assert_eq!(smoothstep(0.0), 0.0);
        assert_eq!(smoothstep(1.0), 1.0);
        assert_eq!(smoothstep(0.5), 0.5);
    }

    #[test]
    fn test_smoothstep_monotonic() {
        let mut prev = 0.0;
        for i in 0..=1000 {
            let v = smoothstep(i as f32 / 1000.0);
            assert!(v >= prev, "smoothstep decreased at step {}", i);
            prev = v;
        }
    }

    #[test]
    fn test_smoothstep_flat_at_ends() {
        let h = 1e-3;
        assert!(smoothstep(h) / h < 0.01);
        assert!((1.0 - smoothstep(1.0 - h)) / h < 0.01);
    }

    #[test]
    fn test_smoothstep_clamps_input() {
        assert_eq!(smoothstep(-0.5), 0.0);
        assert_eq!(smoothstep(1.5), 1.0);
        assert_eq!(smoothstep(f32::INFINITY), 1.0);
    }

    #[test]
    fn test_smoothstep_symmetric() {
        let v1 = smoothstep(0.25);
        let v2 = smoothstep(0.75);
        assert!((v1 + v2 - 1.0).abs() < 1e-6);
    }
}
