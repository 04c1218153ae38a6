use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;
use web_sys::{WebGl2RenderingContext, HtmlCanvasElement};

pub mod animation;
pub mod config;
pub mod error;
pub mod layout;
pub mod logging;
pub mod math;
pub mod mesh;
pub mod mode;
pub mod render;
pub mod sampling;
pub mod scene;

pub use config::SceneConfig;
pub use error::ConfigError;
pub use mode::{ModeSignal, TreeMode};
pub use scene::TreeScene;

use render::{OrbitCamera, RenderPipeline};

/// Install the panic hook and console logger
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logging::ConsoleLogger::init();
}

/// Scene plus renderer, exposed to JavaScript
#[wasm_bindgen]
pub struct GildedFoliage {
    scene: TreeScene,
    pipeline: RenderPipeline,
    camera: OrbitCamera,
    time: f32,
}

#[wasm_bindgen]
impl GildedFoliage {
    /// Create the default scene on a canvas
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement) -> Result<GildedFoliage, JsValue> {
        Self::build(canvas, SceneConfig::default())
    }

    /// Create a scene from a YAML configuration
    #[wasm_bindgen]
    pub fn with_config(canvas: HtmlCanvasElement, yaml: &str) -> Result<GildedFoliage, JsValue> {
        let config = SceneConfig::from_yaml(yaml).map_err(|e| {
            log::warn!("{}", e);
            JsValue::from_str(&e.to_string())
        })?;
        Self::build(canvas, config)
    }

    /// Advance by `dt` seconds and draw a frame
    #[wasm_bindgen]
    pub fn render(&mut self, dt: f32) {
        self.time += dt;

        if self.scene.mode() == TreeMode::Scattered {
            self.camera.auto_rotate(dt);
        }

        self.scene.tick(self.time);
        self.pipeline.update_instances(&self.scene);
        self.pipeline.render(&self.scene, &self.camera);
    }

    #[wasm_bindgen]
    pub fn resize(&mut self, width: i32, height: i32) {
        self.pipeline.resize(width, height);
    }

    /// Flip between scattered and tree shape; returns true when now assembling
    #[wasm_bindgen]
    pub fn toggle_mode(&mut self) -> bool {
        self.scene.toggle_mode() == TreeMode::TreeShape
    }

    #[wasm_bindgen]
    pub fn set_tree_shape(&mut self, tree_shape: bool) {
        let mode = if tree_shape { TreeMode::TreeShape } else { TreeMode::Scattered };
        self.scene.set_mode(mode);
    }

    #[wasm_bindgen]
    pub fn is_tree_shape(&self) -> bool {
        self.scene.mode() == TreeMode::TreeShape
    }

    /// Current progress of a named group ("foliage", "gifts", ...)
    #[wasm_bindgen]
    pub fn progress_of(&self, name: &str) -> Option<f32> {
        self.scene.progress_of(name)
    }

    #[wasm_bindgen]
    pub fn orbit(&mut self, delta_x: f32, delta_y: f32) {
        self.camera.orbit(delta_x, delta_y);
    }

    #[wasm_bindgen]
    pub fn zoom(&mut self, delta: f32) {
        self.camera.zoom(delta);
    }
}

impl GildedFoliage {
    fn build(canvas: HtmlCanvasElement, config: SceneConfig) -> Result<GildedFoliage, JsValue> {
        let width = canvas.width() as i32;
        let height = canvas.height() as i32;

        let gl = canvas
            .get_context("webgl2")?
            .ok_or("Failed to get WebGL2 context")?
            .dyn_into::<WebGl2RenderingContext>()?;

        let scene = TreeScene::new(&config, &mut StdRng::from_entropy())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let mut pipeline = RenderPipeline::new(gl, width, height, config.lighting)
            .map_err(|e| JsValue::from_str(&e))?;
        pipeline
            .upload_foliage(scene.foliage().population())
            .map_err(|e| JsValue::from_str(&e))?;
        for (index, (group, layer)) in scene.ornaments().iter().zip(&config.ornaments).enumerate() {
            pipeline
                .add_ornament_layer(index, group, layer.finish)
                .map_err(|e| JsValue::from_str(&e))?;
        }

        Ok(Self {
            scene,
            pipeline,
            camera: OrbitCamera::new(&config.camera),
            time: 0.0,
        })
    }
}
