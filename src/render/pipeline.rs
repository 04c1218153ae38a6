use web_sys::{
    WebGl2RenderingContext, WebGlBuffer, WebGlProgram, WebGlUniformLocation,
    WebGlVertexArrayObject,
};
use crate::animation::{AnimationGroup, FoliagePalette, OrnamentGroup, ParticleMotion};
use crate::config::{Finish, LightingConfig};
use crate::layout::{ParticlePopulation, PARTICLE_ATTRIBUTE_STRIDE};
use crate::mesh::{primitives, VERTEX_STRIDE};
use crate::scene::TreeScene;
use super::camera::OrbitCamera;
use super::webgl::WebGLContext;
use super::shaders::*;

/// Cached uniform locations for the foliage shader
struct FoliageUniforms {
    model: Option<WebGlUniformLocation>,
    view: Option<WebGlUniformLocation>,
    projection: Option<WebGlUniformLocation>,
    time: Option<WebGlUniformLocation>,
    progress: Option<WebGlUniformLocation>,
    float_amplitude: Option<WebGlUniformLocation>,
    float_intensity: Option<WebGlUniformLocation>,
    float_speed: Option<WebGlUniformLocation>,
    axis_frequency: Option<WebGlUniformLocation>,
    axis_phase: Option<WebGlUniformLocation>,
    alpha: Option<WebGlUniformLocation>,
    size_attenuation: Option<WebGlUniformLocation>,
    height_offset: Option<WebGlUniformLocation>,
    height_span: Option<WebGlUniformLocation>,
    height_gold: Option<WebGlUniformLocation>,
    pulse_gold: Option<WebGlUniformLocation>,
    pulse_phase: Option<WebGlUniformLocation>,
    emerald: Option<WebGlUniformLocation>,
    gold: Option<WebGlUniformLocation>,
}

/// Cached uniform locations for the ornament shader
struct OrnamentUniforms {
    model: Option<WebGlUniformLocation>,
    view: Option<WebGlUniformLocation>,
    projection: Option<WebGlUniformLocation>,
    camera_pos: Option<WebGlUniformLocation>,
    color: Option<WebGlUniformLocation>,
    metalness: Option<WebGlUniformLocation>,
    roughness: Option<WebGlUniformLocation>,
    unlit: Option<WebGlUniformLocation>,
    ambient: Option<WebGlUniformLocation>,
    key_position: Option<WebGlUniformLocation>,
    key_color: Option<WebGlUniformLocation>,
    fill_position: Option<WebGlUniformLocation>,
    fill_color: Option<WebGlUniformLocation>,
}

/// GPU state for one ornament layer
struct OrnamentBatch {
    /// Index into `TreeScene::ornaments`
    group_index: usize,
    vao: WebGlVertexArrayObject,
    instance_buffer: WebGlBuffer,
    index_count: i32,
    instance_count: i32,
    finish: Finish,
}

/// Draws the foliage cloud and every ornament layer of a `TreeScene`
pub struct RenderPipeline {
    ctx: WebGLContext,

    foliage_program: WebGlProgram,
    ornament_program: WebGlProgram,
    foliage_uniforms: FoliageUniforms,
    ornament_uniforms: OrnamentUniforms,

    // Static foliage attributes, uploaded once
    foliage_vao: Option<WebGlVertexArrayObject>,
    foliage_count: i32,

    batches: Vec<OrnamentBatch>,
    // Reused every frame for instance uploads
    instance_scratch: Vec<f32>,

    lighting: LightingConfig,
    width: i32,
    height: i32,
}

impl RenderPipeline {
    pub fn new(
        gl: WebGl2RenderingContext,
        width: i32,
        height: i32,
        lighting: LightingConfig,
    ) -> Result<Self, String> {
        let ctx = WebGLContext::new(gl);

        let foliage_program = ctx.create_program(FOLIAGE_VERTEX_SHADER, FOLIAGE_FRAGMENT_SHADER)?;
        let ornament_program = ctx.create_program(ORNAMENT_VERTEX_SHADER, ORNAMENT_FRAGMENT_SHADER)?;

        let f = |name: &str| ctx.get_uniform_location(&foliage_program, name);
        let foliage_uniforms = FoliageUniforms {
            model: f("u_model"),
            view: f("u_view"),
            projection: f("u_projection"),
            time: f("u_time"),
            progress: f("u_progress"),
            float_amplitude: f("u_float_amplitude"),
            float_intensity: f("u_float_intensity"),
            float_speed: f("u_float_speed"),
            axis_frequency: f("u_axis_frequency"),
            axis_phase: f("u_axis_phase"),
            alpha: f("u_alpha"),
            size_attenuation: f("u_size_attenuation"),
            height_offset: f("u_height_offset"),
            height_span: f("u_height_span"),
            height_gold: f("u_height_gold"),
            pulse_gold: f("u_pulse_gold"),
            pulse_phase: f("u_pulse_phase"),
            emerald: f("u_emerald"),
            gold: f("u_gold"),
        };

        let o = |name: &str| ctx.get_uniform_location(&ornament_program, name);
        let ornament_uniforms = OrnamentUniforms {
            model: o("u_model"),
            view: o("u_view"),
            projection: o("u_projection"),
            camera_pos: o("u_camera_pos"),
            color: o("u_color"),
            metalness: o("u_metalness"),
            roughness: o("u_roughness"),
            unlit: o("u_unlit"),
            ambient: o("u_ambient"),
            key_position: o("u_key_position"),
            key_color: o("u_key_color"),
            fill_position: o("u_fill_position"),
            fill_color: o("u_fill_color"),
        };

        Ok(Self {
            ctx,
            foliage_program,
            ornament_program,
            foliage_uniforms,
            ornament_uniforms,
            foliage_vao: None,
            foliage_count: 0,
            batches: Vec::new(),
            instance_scratch: Vec::new(),
            lighting,
            width,
            height,
        })
    }

    /// Upload the foliage attributes. They never change afterwards; motion
    /// comes from the `u_time` and `u_progress` uniforms.
    pub fn upload_foliage(&mut self, population: &ParticlePopulation) -> Result<(), String> {
        let gl = &self.ctx.gl;

        let vao = self.ctx.create_vao()?;
        gl.bind_vertex_array(Some(&vao));

        let data = population.attribute_data();
        let buffer = self.ctx.create_buffer_f32(&data, WebGl2RenderingContext::STATIC_DRAW)?;
        gl.bind_buffer(WebGl2RenderingContext::ARRAY_BUFFER, Some(&buffer));

        // Layout: scatter(3) + tree(3) + size(1) + phase(1)
        let stride = PARTICLE_ATTRIBUTE_STRIDE as i32;
        self.ctx.float_attrib(0, 3, stride, 0);
        self.ctx.float_attrib(1, 3, stride, 3);
        self.ctx.float_attrib(2, 1, stride, 6);
        self.ctx.float_attrib(3, 1, stride, 7);

        gl.bind_vertex_array(None);
        gl.bind_buffer(WebGl2RenderingContext::ARRAY_BUFFER, None);

        self.foliage_vao = Some(vao);
        self.foliage_count = population.len() as i32;
        Ok(())
    }

    /// Upload the mesh for one ornament layer plus its instance buffer
    pub fn add_ornament_layer(
        &mut self,
        group_index: usize,
        group: &OrnamentGroup,
        finish: Finish,
    ) -> Result<(), String> {
        let gl = &self.ctx.gl;
        let mesh = primitives::mesh_for(group.shape());

        let vao = self.ctx.create_vao()?;
        gl.bind_vertex_array(Some(&vao));

        let vertex_buffer = self.ctx.create_buffer_f32(&mesh.vertex_data(), WebGl2RenderingContext::STATIC_DRAW)?;
        self.ctx.create_index_buffer(mesh.index_data(), WebGl2RenderingContext::STATIC_DRAW)?;

        // Layout: position(3) + normal(3)
        gl.bind_buffer(WebGl2RenderingContext::ARRAY_BUFFER, Some(&vertex_buffer));
        let stride = VERTEX_STRIDE as i32;
        self.ctx.float_attrib(0, 3, stride, 0);
        self.ctx.float_attrib(1, 3, stride, 3);

        group.write_matrix_data(&mut self.instance_scratch);
        let instance_buffer = self.ctx.create_buffer_f32(&self.instance_scratch, WebGl2RenderingContext::DYNAMIC_DRAW)?;
        gl.bind_buffer(WebGl2RenderingContext::ARRAY_BUFFER, Some(&instance_buffer));
        self.ctx.instanced_mat4_attrib(2);

        gl.bind_vertex_array(None);
        gl.bind_buffer(WebGl2RenderingContext::ARRAY_BUFFER, None);

        log::debug!(
            "Uploaded '{}': {} triangles x {} instances",
            group.name(),
            mesh.triangle_count(),
            group.len()
        );

        self.batches.push(OrnamentBatch {
            group_index,
            vao,
            instance_buffer,
            index_count: mesh.index_data().len() as i32,
            instance_count: group.len() as i32,
            finish,
        });
        Ok(())
    }

    /// Copy each layer's front matrix buffer to the GPU
    pub fn update_instances(&mut self, scene: &TreeScene) {
        for batch in &self.batches {
            if let Some(group) = scene.ornaments().get(batch.group_index) {
                group.write_matrix_data(&mut self.instance_scratch);
                self.ctx.update_buffer_f32(&batch.instance_buffer, &self.instance_scratch);
            }
        }
    }

    /// Render a frame
    pub fn render(&self, scene: &TreeScene, camera: &OrbitCamera) {
        let gl = &self.ctx.gl;

        let aspect = self.width as f32 / self.height.max(1) as f32;
        let projection = camera.projection(aspect);
        let view = camera.view();
        let model = scene.world_matrix();

        let bg = self.lighting.background;
        self.ctx.viewport(0, 0, self.width, self.height);
        self.ctx.clear(bg.x, bg.y, bg.z, 1.0);

        // Opaque ornaments first so the glowing points depth-test against them
        self.ctx.enable_depth_test();
        self.ctx.disable_blending();
        if !self.batches.is_empty() {
            gl.use_program(Some(&self.ornament_program));
            let u = &self.ornament_uniforms;
            let l = &self.lighting;
            let eye = camera.position();

            self.ctx.uniform_matrix4fv(u.model.as_ref(), model.as_slice());
            self.ctx.uniform_matrix4fv(u.view.as_ref(), view.as_slice());
            self.ctx.uniform_matrix4fv(u.projection.as_ref(), projection.as_slice());
            self.ctx.uniform_3f(u.camera_pos.as_ref(), eye.x, eye.y, eye.z);
            self.ctx.uniform_3f(u.ambient.as_ref(), l.ambient.x, l.ambient.y, l.ambient.z);
            self.ctx.uniform_3f(u.key_position.as_ref(), l.key_position.x, l.key_position.y, l.key_position.z);
            self.ctx.uniform_3f(u.key_color.as_ref(), l.key_color.x, l.key_color.y, l.key_color.z);
            self.ctx.uniform_3f(u.fill_position.as_ref(), l.fill_position.x, l.fill_position.y, l.fill_position.z);
            self.ctx.uniform_3f(u.fill_color.as_ref(), l.fill_color.x, l.fill_color.y, l.fill_color.z);

            for batch in &self.batches {
                let finish = &batch.finish;
                self.ctx.uniform_3f(u.color.as_ref(), finish.color.x, finish.color.y, finish.color.z);
                self.ctx.uniform_1f(u.metalness.as_ref(), finish.metalness);
                self.ctx.uniform_1f(u.roughness.as_ref(), finish.roughness);
                self.ctx.uniform_1f(u.unlit.as_ref(), if finish.unlit { 1.0 } else { 0.0 });

                gl.bind_vertex_array(Some(&batch.vao));
                self.ctx.draw_elements_instanced(batch.index_count, batch.instance_count);
            }
        }

        if self.foliage_vao.is_some() && self.foliage_count > 0 {
            gl.use_program(Some(&self.foliage_program));
            self.ctx.enable_additive_blending();

            let u = &self.foliage_uniforms;
            self.ctx.uniform_matrix4fv(u.model.as_ref(), model.as_slice());
            self.ctx.uniform_matrix4fv(u.view.as_ref(), view.as_slice());
            self.ctx.uniform_matrix4fv(u.projection.as_ref(), projection.as_slice());
            self.ctx.uniform_1f(u.time.as_ref(), scene.time());
            self.ctx.uniform_1f(u.progress.as_ref(), scene.foliage().progress());
            self.set_particle_motion(&scene.motion().particle, scene.palette());

            gl.bind_vertex_array(self.foliage_vao.as_ref());
            gl.draw_arrays(WebGl2RenderingContext::POINTS, 0, self.foliage_count);
        }

        gl.bind_vertex_array(None);
    }

    fn set_particle_motion(&self, m: &ParticleMotion, palette: &FoliagePalette) {
        let u = &self.foliage_uniforms;
        let ctx = &self.ctx;
        ctx.uniform_1f(u.float_amplitude.as_ref(), m.float_amplitude);
        ctx.uniform_2f(u.float_intensity.as_ref(), m.float_intensity.scattered, m.float_intensity.assembled);
        ctx.uniform_2f(u.float_speed.as_ref(), m.float_speed.scattered, m.float_speed.assembled);
        let [fx, fy, fz] = m.axis_frequency;
        ctx.uniform_3f(u.axis_frequency.as_ref(), fx, fy, fz);
        let [px, py, pz] = m.axis_phase;
        ctx.uniform_3f(u.axis_phase.as_ref(), px, py, pz);
        ctx.uniform_2f(u.alpha.as_ref(), m.alpha.scattered, m.alpha.assembled);
        ctx.uniform_1f(u.size_attenuation.as_ref(), m.size_attenuation);
        ctx.uniform_1f(u.height_offset.as_ref(), m.height_offset);
        ctx.uniform_1f(u.height_span.as_ref(), m.height_span);
        ctx.uniform_1f(u.height_gold.as_ref(), m.height_gold);
        ctx.uniform_1f(u.pulse_gold.as_ref(), m.pulse_gold);
        ctx.uniform_1f(u.pulse_phase.as_ref(), m.pulse_phase);
        ctx.uniform_3f(u.emerald.as_ref(), palette.emerald.x, palette.emerald.y, palette.emerald.z);
        ctx.uniform_3f(u.gold.as_ref(), palette.gold.x, palette.gold.y, palette.gold.z);
    }

    pub fn resize(&mut self, width: i32, height: i32) {
        self.width = width;
        self.height = height;
    }
}
