pub mod r#trait;
pub use r#trait::{CompositeMode, RendererEngine, Surface};

pub mod color;
pub use self::color::{Color, Hsla};

pub mod canvas;
pub use self::canvas::PixelCanvas;

pub mod config;
pub use self::config::RendererConfig;

pub mod renderer;
pub use self::renderer::CanvasRenderer;

pub mod shader;
pub mod tools;

pub mod types;
pub use self::types::QuadVertex;
