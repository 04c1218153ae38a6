use std::f32::consts::PI;
use rand::Rng;
use crate::math::{safe_atan2, Vec3};
use crate::sampling::{sample_cone_surface, sample_sphere_volume};
use super::{SizeRange, TreeShape};

/// One instanced ornament (gift box, bauble, light)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrnamentElement {
    id: usize,
    scatter: Vec3,
    tree: Vec3,
    scatter_rotation: Vec3,
    tree_rotation: Vec3,
    scale: f32,
    phase: f32,
}

impl OrnamentElement {
    fn generate<R: Rng + ?Sized>(
        rng: &mut R,
        id: usize,
        shape: &TreeShape,
        scales: &SizeRange,
        jitter: f32,
    ) -> Self {
        let scatter = sample_sphere_volume(rng, shape.scatter_radius);
        let mut tree = sample_cone_surface(rng, shape.height, shape.base_radius);

        // Keep ornaments off the idealized surface
        tree.x += (rng.gen::<f32>() - 0.5) * jitter;
        tree.z += (rng.gen::<f32>() - 0.5) * jitter;

        // Tumbling debris when scattered, facing away from the trunk when assembled
        let scatter_rotation = Vec3::new(rng.gen::<f32>() * PI, rng.gen::<f32>() * PI, 0.0);
        let tree_rotation = Vec3::new(0.0, safe_atan2(tree.x, tree.z), 0.0);

        Self {
            id,
            scatter,
            tree,
            scatter_rotation,
            tree_rotation,
            scale: scales.sample(rng),
            phase: rng.gen(),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn scatter(&self) -> Vec3 {
        self.scatter
    }

    pub fn tree(&self) -> Vec3 {
        self.tree
    }

    pub fn scatter_rotation(&self) -> Vec3 {
        self.scatter_rotation
    }

    pub fn tree_rotation(&self) -> Vec3 {
        self.tree_rotation
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }
}

/// Fixed set of ornaments for one instanced layer
#[derive(Debug, Clone)]
pub struct OrnamentPopulation {
    elements: Vec<OrnamentElement>,
}

impl OrnamentPopulation {
    pub fn generate<R: Rng + ?Sized>(
        rng: &mut R,
        count: usize,
        shape: &TreeShape,
        scales: &SizeRange,
        jitter: f32,
    ) -> Self {
        let elements = (0..count)
            .map(|id| OrnamentElement::generate(rng, id, shape, scales, jitter))
            .collect();
        Self { elements }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, id: usize) -> Option<&OrnamentElement> {
        self.elements.get(id)
    }

    pub fn elements(&self) -> &[OrnamentElement] {
        &self.elements
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const SCALES: SizeRange = SizeRange::new(0.2, 0.5);

    #[test]
    fn test_ids_are_indices() {
        let mut rng = StdRng::seed_from_u64(4);
        let pop = OrnamentPopulation::generate(&mut rng, 120, &TreeShape::default(), &SCALES, 0.5);
        assert_eq!(pop.len(), 120);
        for (i, e) in pop.elements().iter().enumerate() {
            assert_eq!(e.id(), i);
        }
    }

    #[test]
    fn test_tree_yaw_faces_outward() {
        let mut rng = StdRng::seed_from_u64(5);
        let pop = OrnamentPopulation::generate(&mut rng, 200, &TreeShape::default(), &SCALES, 0.5);

        for e in pop.elements() {
            let r = e.tree_rotation();
            assert_eq!(r.x, 0.0);
            assert_eq!(r.z, 0.0);
            // Local +Z after the yaw points along the horizontal position
            let facing = Vec3::new(r.y.sin(), 0.0, r.y.cos());
            let outward = Vec3::new(e.tree().x, 0.0, e.tree().z);
            if outward.length() > 1e-3 {
                assert!(facing.dot(&outward.normalize()) > 0.999);
            }
        }
    }

    #[test]
    fn test_jitter_bounded_and_horizontal() {
        let shape = TreeShape::default();
        let mut rng = StdRng::seed_from_u64(6);
        let pop = OrnamentPopulation::generate(&mut rng, 500, &shape, &SCALES, 0.5);

        for e in pop.elements() {
            let t = e.tree();
            assert!(t.y.abs() <= shape.height / 2.0);
            let ideal = shape.base_radius * (0.5 - t.y / shape.height);
            // Each horizontal axis moves by at most jitter/2
            let max_shift = (2.0f32).sqrt() * 0.25;
            assert!((t.horizontal_length() - ideal).abs() <= max_shift + 1e-3);
        }
    }

    #[test]
    fn test_zero_jitter_matches_cone() {
        let shape = TreeShape::default();
        let mut rng = StdRng::seed_from_u64(7);
        let pop = OrnamentPopulation::generate(&mut rng, 200, &shape, &SCALES, 0.0);
        for e in pop.elements() {
            let t = e.tree();
            let ideal = shape.base_radius * (0.5 - t.y / shape.height);
            assert!((t.horizontal_length() - ideal).abs() < 1e-3);
        }
    }

    #[test]
    fn test_scatter_rotation_range_and_scale() {
        let mut rng = StdRng::seed_from_u64(8);
        let pop = OrnamentPopulation::generate(&mut rng, 300, &TreeShape::default(), &SCALES, 0.5);
        for e in pop.elements() {
            let r = e.scatter_rotation();
            assert!(r.x >= 0.0 && r.x <= PI);
            assert!(r.y >= 0.0 && r.y <= PI);
            assert_eq!(r.z, 0.0);
            assert!(SCALES.contains(e.scale()));
        }
    }

    #[test]
    fn test_constant_source_element() {
        // Every variate 0.5: jitter cancels, tree point is (-R/2, 0, ~0)
        let mut rng = StepRng::new(0x8000_0000, 0);
        let pop = OrnamentPopulation::generate(&mut rng, 3, &TreeShape::default(), &SCALES, 0.5);
        for e in pop.elements() {
            assert!((e.tree().x + 2.75).abs() < 1e-4);
            assert!(e.tree().y.abs() < 1e-6);
            assert!((e.scatter_rotation().x - PI / 2.0).abs() < 1e-5);
            assert!((e.scale() - 0.35).abs() < 1e-5);
            assert_eq!(e.phase(), 0.5);
        }
    }
}
