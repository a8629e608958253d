use glow::HasContext;

use studyroom_gui_lib::scene3d::{SceneFrame, WorldLight};

use super::camera::OrbitCamera;
use super::mesh::{LineMeshData, MeshData};

/// Point lights beyond this count are ignored by the shader
pub const MAX_POINT_LIGHTS: usize = 8;

// ── Render parameters ────────────────────────────────────────

/// Parameters for rendering the viewport
pub struct RenderParams {
    /// Viewport rectangle [x, y, width, height] in pixels
    pub viewport: [f32; 4],
    /// Background color RGB
    pub bg_color: [u8; 3],
}

// ── GPU mesh handles ─────────────────────────────────────────

struct GpuMesh {
    vao: glow::VertexArray,
    vbo: glow::Buffer,
    ibo: glow::Buffer,
    index_count: i32,
}

struct GpuLines {
    vao: glow::VertexArray,
    vbo: glow::Buffer,
    vertex_count: i32,
}

/// Uniform values of the lit mesh program for one frame
struct LightUniforms {
    ambient: f32,
    directional: f32,
    direction: glam::Vec3,
    color: [f32; 3],
    points: Vec<WorldLight>,
}

impl LightUniforms {
    fn from_frame(frame: &SceneFrame) -> Self {
        // Item lamps come last in the frame; keep the ceiling rig and as many lamps as fit
        let points = frame.point_lights.iter().take(MAX_POINT_LIGHTS).cloned().collect();
        Self {
            ambient: frame.lighting.ambient,
            directional: frame.lighting.directional,
            direction: frame.lighting.direction,
            color: frame.lighting.color.to_unit(),
            points,
        }
    }
}

// ── Main GL renderer ─────────────────────────────────────────

pub struct GlRenderer {
    mesh_program: glow::Program,
    line_program: glow::Program,
    scene: Option<GpuMesh>,
    grid: Option<GpuLines>,
    lights: Option<LightUniforms>,
}

impl GlRenderer {
    pub fn new(gl: &glow::Context) -> Result<Self, String> {
        let mesh_program = compile_program(gl, MESH_VERT, MESH_FRAG)?;
        let line_program = compile_program(gl, LINE_VERT, LINE_FRAG)?;
        Ok(Self {
            mesh_program,
            line_program,
            scene: None,
            grid: None,
            lights: None,
        })
    }

    /// Replace the uploaded scene with this frame's geometry and lights
    pub fn sync_frame(&mut self, gl: &glow::Context, frame: &SceneFrame) {
        if let Some(old) = self.scene.take() {
            delete_mesh(gl, &old);
        }
        if let Some(old) = self.grid.take() {
            delete_lines(gl, &old);
        }

        let merged = frame.merged_mesh();
        if !merged.is_empty() {
            match upload_mesh(gl, &merged) {
                Ok(mesh) => self.scene = Some(mesh),
                Err(e) => tracing::error!("Scene upload failed: {e}"),
            }
        }
        if let Some(ref grid) = frame.grid {
            match upload_lines(gl, grid) {
                Ok(lines) => self.grid = Some(lines),
                Err(e) => tracing::error!("Grid upload failed: {e}"),
            }
        }
        self.lights = Some(LightUniforms::from_frame(frame));
    }

    /// Render the scene
    pub fn paint(&self, gl: &glow::Context, camera: &OrbitCamera, params: &RenderParams) {
        let aspect = params.viewport[2] / params.viewport[3];
        let vp = camera.view_projection(aspect);

        unsafe {
            gl.viewport(
                params.viewport[0] as i32,
                params.viewport[1] as i32,
                params.viewport[2] as i32,
                params.viewport[3] as i32,
            );
            gl.scissor(
                params.viewport[0] as i32,
                params.viewport[1] as i32,
                params.viewport[2] as i32,
                params.viewport[3] as i32,
            );
            gl.enable(glow::SCISSOR_TEST);

            gl.clear_color(
                params.bg_color[0] as f32 / 255.0,
                params.bg_color[1] as f32 / 255.0,
                params.bg_color[2] as f32 / 255.0,
                1.0,
            );
            gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);

            gl.enable(glow::DEPTH_TEST);
            gl.depth_func(glow::LESS);

            if let (Some(scene), Some(lights)) = (&self.scene, &self.lights) {
                gl.use_program(Some(self.mesh_program));
                set_uniform_mat4(gl, self.mesh_program, "u_mvp", &vp);
                set_light_uniforms(gl, self.mesh_program, lights);
                draw_mesh(gl, scene);
            }

            if let Some(ref grid) = self.grid {
                gl.enable(glow::BLEND);
                gl.blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA);
                gl.use_program(Some(self.line_program));
                set_uniform_mat4(gl, self.line_program, "u_mvp", &vp);
                draw_lines(gl, grid);
                gl.disable(glow::BLEND);
            }

            gl.disable(glow::DEPTH_TEST);
            gl.disable(glow::SCISSOR_TEST);
            gl.use_program(None);
        }
    }

    pub fn destroy(&self, gl: &glow::Context) {
        unsafe {
            gl.delete_program(self.mesh_program);
            gl.delete_program(self.line_program);
        }
        if let Some(ref scene) = self.scene {
            delete_mesh(gl, scene);
        }
        if let Some(ref grid) = self.grid {
            delete_lines(gl, grid);
        }
    }
}

// ── GPU upload ───────────────────────────────────────────────

fn upload_mesh(gl: &glow::Context, data: &MeshData) -> Result<GpuMesh, String> {
    unsafe {
        let vao = gl.create_vertex_array()?;
        gl.bind_vertex_array(Some(vao));

        let vbo = gl.create_buffer()?;
        gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
        gl.buffer_data_u8_slice(glow::ARRAY_BUFFER, cast_slice(&data.vertices), glow::STREAM_DRAW);

        let stride = 9 * 4; // 9 floats * 4 bytes
        // position: location 0
        gl.enable_vertex_attrib_array(0);
        gl.vertex_attrib_pointer_f32(0, 3, glow::FLOAT, false, stride, 0);
        // normal: location 1
        gl.enable_vertex_attrib_array(1);
        gl.vertex_attrib_pointer_f32(1, 3, glow::FLOAT, false, stride, 3 * 4);
        // color: location 2
        gl.enable_vertex_attrib_array(2);
        gl.vertex_attrib_pointer_f32(2, 3, glow::FLOAT, false, stride, 6 * 4);

        let ibo = gl.create_buffer()?;
        gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ibo));
        gl.buffer_data_u8_slice(glow::ELEMENT_ARRAY_BUFFER, cast_slice(&data.indices), glow::STREAM_DRAW);

        gl.bind_vertex_array(None);

        Ok(GpuMesh {
            vao,
            vbo,
            ibo,
            index_count: data.indices.len() as i32,
        })
    }
}

fn upload_lines(gl: &glow::Context, data: &LineMeshData) -> Result<GpuLines, String> {
    unsafe {
        let vao = gl.create_vertex_array()?;
        gl.bind_vertex_array(Some(vao));

        let vbo = gl.create_buffer()?;
        gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
        gl.buffer_data_u8_slice(glow::ARRAY_BUFFER, cast_slice(&data.vertices), glow::STATIC_DRAW);

        let stride = 7 * 4; // 7 floats * 4 bytes
        gl.enable_vertex_attrib_array(0);
        gl.vertex_attrib_pointer_f32(0, 3, glow::FLOAT, false, stride, 0);
        gl.enable_vertex_attrib_array(1);
        gl.vertex_attrib_pointer_f32(1, 4, glow::FLOAT, false, stride, 3 * 4);

        gl.bind_vertex_array(None);

        Ok(GpuLines {
            vao,
            vbo,
            vertex_count: (data.vertices.len() / 7) as i32,
        })
    }
}

fn delete_mesh(gl: &glow::Context, mesh: &GpuMesh) {
    unsafe {
        gl.delete_vertex_array(mesh.vao);
        gl.delete_buffer(mesh.vbo);
        gl.delete_buffer(mesh.ibo);
    }
}

fn delete_lines(gl: &glow::Context, lines: &GpuLines) {
    unsafe {
        gl.delete_vertex_array(lines.vao);
        gl.delete_buffer(lines.vbo);
    }
}

// ── Draw calls ───────────────────────────────────────────────

unsafe fn draw_mesh(gl: &glow::Context, mesh: &GpuMesh) {
    gl.bind_vertex_array(Some(mesh.vao));
    gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(mesh.ibo));
    gl.draw_elements(glow::TRIANGLES, mesh.index_count, glow::UNSIGNED_INT, 0);
    gl.bind_vertex_array(None);
}

unsafe fn draw_lines(gl: &glow::Context, lines: &GpuLines) {
    gl.bind_vertex_array(Some(lines.vao));
    gl.draw_arrays(glow::LINES, 0, lines.vertex_count);
    gl.bind_vertex_array(None);
}

// ── Shader compilation ───────────────────────────────────────

fn compile_program(gl: &glow::Context, vert_src: &str, frag_src: &str) -> Result<glow::Program, String> {
    unsafe {
        let program = gl.create_program()?;

        let mut shaders = Vec::with_capacity(2);
        for (kind, src) in [(glow::VERTEX_SHADER, vert_src), (glow::FRAGMENT_SHADER, frag_src)] {
            let shader = gl.create_shader(kind)?;
            gl.shader_source(shader, src);
            gl.compile_shader(shader);
            if !gl.get_shader_compile_status(shader) {
                let log = gl.get_shader_info_log(shader);
                gl.delete_shader(shader);
                gl.delete_program(program);
                return Err(format!("Shader compile error: {log}"));
            }
            gl.attach_shader(program, shader);
            shaders.push(shader);
        }

        gl.link_program(program);
        let linked = gl.get_program_link_status(program);
        for shader in shaders {
            gl.detach_shader(program, shader);
            gl.delete_shader(shader);
        }
        if !linked {
            let log = gl.get_program_info_log(program);
            gl.delete_program(program);
            return Err(format!("Program link error: {log}"));
        }

        Ok(program)
    }
}

// ── Uniform setters ──────────────────────────────────────────

fn set_uniform_mat4(gl: &glow::Context, program: glow::Program, name: &str, mat: &glam::Mat4) {
    unsafe {
        let loc = gl.get_uniform_location(program, name);
        gl.uniform_matrix_4_f32_slice(loc.as_ref(), false, &mat.to_cols_array());
    }
}

fn set_uniform_vec3(gl: &glow::Context, program: glow::Program, name: &str, v: [f32; 3]) {
    unsafe {
        let loc = gl.get_uniform_location(program, name);
        gl.uniform_3_f32(loc.as_ref(), v[0], v[1], v[2]);
    }
}

fn set_uniform_f32(gl: &glow::Context, program: glow::Program, name: &str, v: f32) {
    unsafe {
        let loc = gl.get_uniform_location(program, name);
        gl.uniform_1_f32(loc.as_ref(), v);
    }
}

fn set_light_uniforms(gl: &glow::Context, program: glow::Program, lights: &LightUniforms) {
    set_uniform_f32(gl, program, "u_ambient", lights.ambient);
    set_uniform_f32(gl, program, "u_directional", lights.directional);
    set_uniform_vec3(gl, program, "u_light_dir", lights.direction.to_array());
    set_uniform_vec3(gl, program, "u_light_color", lights.color);

    unsafe {
        let loc = gl.get_uniform_location(program, "u_point_count");
        gl.uniform_1_i32(loc.as_ref(), lights.points.len() as i32);
    }
    for (i, light) in lights.points.iter().enumerate() {
        set_uniform_vec3(gl, program, &format!("u_point_pos[{i}]"), light.position.to_array());
        set_uniform_vec3(gl, program, &format!("u_point_color[{i}]"), light.color.to_unit());
        set_uniform_f32(gl, program, &format!("u_point_intensity[{i}]"), light.intensity);
        set_uniform_f32(gl, program, &format!("u_point_range[{i}]"), light.range);
    }
}

// ── Byte cast helper ─────────────────────────────────────────

fn cast_slice<T: Copy>(slice: &[T]) -> &[u8] {
    unsafe { std::slice::from_raw_parts(slice.as_ptr() as *const u8, std::mem::size_of_val(slice)) }
}

// ── Shaders ──────────────────────────────────────────────────

const MESH_VERT: &str = r#"#version 330 core
uniform mat4 u_mvp;

layout(location = 0) in vec3 a_position;
layout(location = 1) in vec3 a_normal;
layout(location = 2) in vec3 a_color;

out vec3 v_position;
out vec3 v_normal;
out vec3 v_color;

void main() {
    gl_Position = u_mvp * vec4(a_position, 1.0);
    v_position = a_position;
    v_normal = a_normal;
    v_color = a_color;
}
"#;

const MESH_FRAG: &str = r#"#version 330 core
#define MAX_POINTS 8

uniform float u_ambient;
uniform float u_directional;
uniform vec3 u_light_dir;
uniform vec3 u_light_color;

uniform int u_point_count;
uniform vec3 u_point_pos[MAX_POINTS];
uniform vec3 u_point_color[MAX_POINTS];
uniform float u_point_intensity[MAX_POINTS];
uniform float u_point_range[MAX_POINTS];

in vec3 v_position;
in vec3 v_normal;
in vec3 v_color;

out vec4 frag_color;

void main() {
    vec3 n = normalize(v_normal);
    vec3 light = u_light_color * (u_ambient + u_directional * max(dot(n, u_light_dir), 0.0));

    for (int i = 0; i < u_point_count; ++i) {
        vec3 to_light = u_point_pos[i] - v_position;
        float dist = length(to_light);
        float falloff = clamp(1.0 - dist / u_point_range[i], 0.0, 1.0);
        float lambert = max(dot(n, to_light / max(dist, 1e-4)), 0.0);
        light += u_point_color[i] * u_point_intensity[i] * falloff * falloff * lambert;
    }

    frag_color = vec4(min(v_color * light, vec3(1.0)), 1.0);
}
"#;

const LINE_VERT: &str = r#"#version 330 core
uniform mat4 u_mvp;

layout(location = 0) in vec3 a_position;
layout(location = 1) in vec4 a_color;

out vec4 v_color;

void main() {
    gl_Position = u_mvp * vec4(a_position, 1.0);
    v_color = a_color;
}
"#;

const LINE_FRAG: &str = r#"#version 330 core
in vec4 v_color;
out vec4 frag_color;

void main() {
    frag_color = v_color;
}
"#;
