use bytemuck::{Pod, Zeroable};
use gl::types::*;
use memoffset::offset_of;
use std::mem;

/// Sommet du quad plein écran sur lequel est plaqué le canvas.
///
/// | Location | Type   | Champ |
/// |:--------:|:-------|:------|
/// | `0`      | `vec2` | `pos` (NDC) |
/// | `1`      | `vec2` | `uv`        |
///
/// **Stride total** : `4 × f32 = 16 octets`
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct QuadVertex {
    pub pos: [f32; 2],
    pub uv: [f32; 2],
}

/// Triangle strip couvrant tout le viewport.
///
/// La ligne 0 du canvas est en haut de l'image alors qu'OpenGL place la première
/// ligne de texture en bas : les `v` sont donc inversés.
pub const FULLSCREEN_QUAD: [QuadVertex; 4] = [
    QuadVertex {
        pos: [-1.0, -1.0],
        uv: [0.0, 1.0],
    },
    QuadVertex {
        pos: [1.0, -1.0],
        uv: [1.0, 1.0],
    },
    QuadVertex {
        pos: [-1.0, 1.0],
        uv: [0.0, 0.0],
    },
    QuadVertex {
        pos: [1.0, 1.0],
        uv: [1.0, 0.0],
    },
];

impl QuadVertex {
    /// Configure les attributs de sommets.
    ///
    /// ⚠️ Pré-requis : le VAO et le VBO doivent être liés avant l'appel.
    pub fn setup_vertex_attribs() {
        let stride = mem::size_of::<Self>() as GLsizei;

        unsafe {
            gl::VertexAttribPointer(
                0,
                2,
                gl::FLOAT,
                gl::FALSE,
                stride,
                offset_of!(Self, pos) as *const _,
            );
            gl::EnableVertexAttribArray(0);

            gl::VertexAttribPointer(
                1,
                2,
                gl::FLOAT,
                gl::FALSE,
                stride,
                offset_of!(Self, uv) as *const _,
            );
            gl::EnableVertexAttribArray(1);
        }
    }
}
