use gilded_foliage::animation::{AnimationGroup, ParticleSample};
use gilded_foliage::config::OrnamentConfig;
use gilded_foliage::layout::{OrnamentShape, SizeRange, TreeShape};
use gilded_foliage::math::Vec3;
use gilded_foliage::{ConfigError, SceneConfig, TreeMode, TreeScene};
use rand::rngs::mock::StepRng;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Every `gen::<f32>()` from this source is exactly 0.5
fn half_rng() -> StepRng {
    StepRng::new(0x8000_0000, 0)
}

fn three_baubles() -> SceneConfig {
    let mut config = SceneConfig::default();
    config.foliage.count = 3;
    config.ornaments = vec![OrnamentConfig {
        name: "baubles".to_string(),
        shape: OrnamentShape::Sphere,
        count: 3,
        rate: 0.04,
        scale_factor: 0.8,
        geometry: TreeShape::default(),
        scales: SizeRange::new(0.2, 0.5),
        jitter: 0.5,
        finish: Default::default(),
    }];
    config
}

fn assert_close(actual: Vec3, expected: Vec3, tolerance: f32) {
    assert!(
        actual.distance(&expected) <= tolerance,
        "expected {:?}, got {:?}",
        expected,
        actual
    );
}

#[test]
fn constant_source_gives_closed_form_layouts() {
    let scene = TreeScene::new(&three_baubles(), &mut half_rng()).unwrap();
    let cbrt_half = 0.5f32.cbrt();

    for particle in scene.foliage().population().iter() {
        assert_close(particle.scatter, Vec3::new(-cbrt_half * 20.0, 0.0, 0.0), 1e-4);
        assert_close(particle.tree, Vec3::new(-3.0, 0.0, 0.0), 1e-4);
        assert!((particle.size - 0.75).abs() < 1e-6);
        assert_eq!(particle.phase, 0.5);
    }

    let baubles = scene.ornament("baubles").unwrap();
    assert_eq!(baubles.len(), 3);
    for ornament in baubles.population().elements() {
        assert_close(ornament.scatter(), Vec3::new(-cbrt_half * 15.0, 0.0, 0.0), 1e-4);
        // Zero jitter at u = 0.5, so the cone point is exact
        assert_close(ornament.tree(), Vec3::new(-2.75, 0.0, 0.0), 1e-4);
        assert_close(
            ornament.scatter_rotation(),
            Vec3::new(std::f32::consts::FRAC_PI_2, std::f32::consts::FRAC_PI_2, 0.0),
            1e-5,
        );
        assert!((ornament.tree_rotation().y.abs() - std::f32::consts::FRAC_PI_2).abs() < 1e-4);
        assert!((ornament.scale() - 0.35).abs() < 1e-6);
        assert_eq!(ornament.phase(), 0.5);
    }
}

#[test]
fn two_hundred_ticks_assemble_the_tree() {
    let mut scene = TreeScene::new(&three_baubles(), &mut half_rng()).unwrap();
    assert_eq!(scene.mode(), TreeMode::TreeShape);

    let mut time = 0.0;
    for _ in 0..200 {
        time += 1.0 / 60.0;
        scene.tick(time);
    }

    let baubles = scene.ornament("baubles").unwrap();
    assert!(baubles.progress() > 0.999, "progress {}", baubles.progress());

    // Assembled bob amplitude is 0.05
    for (matrix, ornament) in baubles.matrices().iter().zip(baubles.population().elements()) {
        assert_close(matrix.translation_part(), ornament.tree(), 0.051);
    }

    let foliage = scene.foliage();
    let mut samples = vec![ParticleSample::default(); foliage.len()];
    foliage.sample_into(scene.time(), scene.motion(), scene.palette(), &mut samples);
    for (sample, particle) in samples.iter().zip(foliage.population().iter()) {
        // Lagging rate-0.03 progress plus the faint assembled shiver
        assert_close(sample.position, particle.tree, 0.1);
        assert!(sample.alpha > 0.99);
    }
}

#[test]
fn toggling_mid_flight_is_continuous() {
    let mut scene = TreeScene::new(&three_baubles(), &mut StdRng::seed_from_u64(8)).unwrap();
    let mut time = 0.0;
    let mut tick = |scene: &mut TreeScene| {
        time += 1.0 / 60.0;
        scene.tick(time);
    };

    for _ in 0..40 {
        tick(&mut scene);
    }
    let before = scene.progress_of("baubles").unwrap();
    scene.set_mode(TreeMode::Scattered);
    tick(&mut scene);
    let after = scene.progress_of("baubles").unwrap();
    assert!(after < before && before - after <= 0.04);

    for _ in 0..400 {
        tick(&mut scene);
    }
    assert!(scene.is_settled(1e-3));
    assert!(scene.groups().all(|g| g.progress() < 1e-3));
}

#[test]
fn invalid_yaml_is_rejected_before_generation() {
    let yaml = r#"
ornaments:
  - name: gifts
    type: box
    count: 0
    rate: 0.02
    scale_factor: 1.5
"#;
    let config: SceneConfig = serde_yaml::from_str(yaml).unwrap();
    let result = TreeScene::new(&config, &mut StdRng::seed_from_u64(1));
    assert!(matches!(result, Err(ConfigError::InvalidCount { .. })));

    assert!(matches!(SceneConfig::from_yaml(yaml), Err(ConfigError::InvalidCount { .. })));
}
