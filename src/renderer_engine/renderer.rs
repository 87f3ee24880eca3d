use anyhow::Result;
use log::{debug, info};

use crate::cstr;
use crate::renderer_engine::{
    canvas::PixelCanvas,
    r#trait::RendererEngine,
    shader::try_compile_shader_program,
    tools::{setup_opengl_debug, show_opengl_context_info},
    types::{QuadVertex, FULLSCREEN_QUAD},
};

/// Présentateur OpenGL : le canvas logiciel est envoyé dans une texture RGBA8
/// puis dessiné sur un quad plein écran.
pub struct CanvasRenderer {
    vao: u32,
    vbo_quad: u32,
    texture_id: u32,
    shader_program: u32,
    loc_canvas: i32,

    /// Taille de la texture allouée côté GPU (0 tant qu'aucune frame n'a été envoyée)
    texture_size: (u32, u32),
    viewport: (i32, i32),
    closed: bool,
}

impl CanvasRenderer {
    /// Crée le présentateur. Le contexte OpenGL doit déjà être courant
    /// (cf. `GlfwWindowEngine::init`).
    pub fn new(viewport_width: i32, viewport_height: i32, gl_debug: bool) -> Result<Self> {
        unsafe {
            show_opengl_context_info();
            if gl_debug {
                setup_opengl_debug();
            }
        }

        let (vertex_src, fragment_src) = Self::src_shaders_canvas();
        let shader_program = unsafe { try_compile_shader_program(vertex_src, fragment_src)? };
        let loc_canvas = unsafe { gl::GetUniformLocation(shader_program, cstr!("uCanvas")) };

        let (vao, vbo_quad, texture_id) = unsafe { Self::setup_gpu_resources() };

        let mut renderer = Self {
            vao,
            vbo_quad,
            texture_id,
            shader_program,
            loc_canvas,
            texture_size: (0, 0),
            viewport: (0, 0),
            closed: false,
        };
        renderer.set_viewport(viewport_width, viewport_height);

        info!("✅ Canvas renderer ready ({} x {})", viewport_width, viewport_height);
        Ok(renderer)
    }

    pub fn src_shaders_canvas() -> (&'static str, &'static str) {
        let vertex_src = r#"
        #version 330 core
        layout(location = 0) in vec2 aPos;
        layout(location = 1) in vec2 aUv;

        out vec2 vUv;

        void main() {
            vUv = aUv;
            gl_Position = vec4(aPos, 0.0, 1.0);
        }
        "#;

        let fragment_src = r#"
        #version 330 core
        in vec2 vUv;
        out vec4 FragColor;

        uniform sampler2D uCanvas;

        void main() {
            FragColor = vec4(texture(uCanvas, vUv).rgb, 1.0);
        }
        "#;
        (vertex_src, fragment_src)
    }

    unsafe fn setup_gpu_resources() -> (u32, u32, u32) {
        let (mut vao, mut vbo_quad, mut texture_id) = (0u32, 0u32, 0u32);

        // === VAO / VBO du quad ===
        gl::GenVertexArrays(1, &mut vao);
        gl::BindVertexArray(vao);

        gl::GenBuffers(1, &mut vbo_quad);
        gl::BindBuffer(gl::ARRAY_BUFFER, vbo_quad);
        let bytes: &[u8] = bytemuck::cast_slice(&FULLSCREEN_QUAD);
        gl::BufferData(
            gl::ARRAY_BUFFER,
            bytes.len() as isize,
            bytes.as_ptr() as *const _,
            gl::STATIC_DRAW,
        );
        QuadVertex::setup_vertex_attribs();
        gl::BindVertexArray(0);

        // === Texture du canvas ===
        gl::GenTextures(1, &mut texture_id);
        gl::BindTexture(gl::TEXTURE_2D, texture_id);
        gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, gl::LINEAR as i32);
        gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, gl::LINEAR as i32);
        gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_S, gl::CLAMP_TO_EDGE as i32);
        gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_T, gl::CLAMP_TO_EDGE as i32);
        gl::PixelStorei(gl::UNPACK_ALIGNMENT, 4);
        gl::BindTexture(gl::TEXTURE_2D, 0);

        (vao, vbo_quad, texture_id)
    }

    /// Envoie les pixels du canvas ; réalloue la texture si la taille a changé.
    unsafe fn upload_canvas(&mut self, canvas: &PixelCanvas) -> usize {
        let (width, height) = canvas.dimensions();
        let pixels = canvas.to_rgba8();

        gl::BindTexture(gl::TEXTURE_2D, self.texture_id);
        if self.texture_size != (width, height) {
            debug!("Reallocating canvas texture: {} x {}", width, height);
            gl::TexImage2D(
                gl::TEXTURE_2D,
                0,
                gl::RGBA8 as i32,
                width as i32,
                height as i32,
                0,
                gl::RGBA,
                gl::UNSIGNED_BYTE,
                pixels.as_ptr() as *const _,
            );
            self.texture_size = (width, height);
        } else {
            gl::TexSubImage2D(
                gl::TEXTURE_2D,
                0,
                0,
                0,
                width as i32,
                height as i32,
                gl::RGBA,
                gl::UNSIGNED_BYTE,
                pixels.as_ptr() as *const _,
            );
        }
        pixels.len()
    }
}

impl RendererEngine for CanvasRenderer {
    fn set_viewport(&mut self, width: i32, height: i32) {
        self.viewport = (width.max(0), height.max(0));
        unsafe {
            gl::Viewport(0, 0, self.viewport.0, self.viewport.1);
        }
    }

    fn present(&mut self, canvas: &PixelCanvas) -> usize {
        if self.closed {
            return 0;
        }
        unsafe {
            gl::ClearColor(0.0, 0.0, 0.0, 1.0);
            gl::Clear(gl::COLOR_BUFFER_BIT);

            let (width, height) = canvas.dimensions();
            if width == 0 || height == 0 {
                return 0;
            }

            let uploaded = self.upload_canvas(canvas);

            gl::UseProgram(self.shader_program);
            gl::ActiveTexture(gl::TEXTURE0);
            gl::BindTexture(gl::TEXTURE_2D, self.texture_id);
            gl::Uniform1i(self.loc_canvas, 0);

            gl::BindVertexArray(self.vao);
            gl::DrawArrays(gl::TRIANGLE_STRIP, 0, FULLSCREEN_QUAD.len() as i32);
            gl::BindVertexArray(0);

            uploaded
        }
    }

    fn close(&mut self) {
        if self.closed {
            return;
        }
        unsafe {
            if self.texture_id != 0 {
                gl::DeleteTextures(1, &self.texture_id);
                self.texture_id = 0;
            }
            if self.vbo_quad != 0 {
                gl::DeleteBuffers(1, &self.vbo_quad);
                self.vbo_quad = 0;
            }
            if self.vao != 0 {
                gl::DeleteVertexArrays(1, &self.vao);
                self.vao = 0;
            }
            if self.shader_program != 0 {
                gl::DeleteProgram(self.shader_program);
                self.shader_program = 0;
            }
        }
        self.closed = true;
        info!("🧹 Canvas renderer closed");
    }
}
