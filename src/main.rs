// Ici on importe depuis la crate lib complète
use anyhow::Result;
use log::info;

use fireworks_canvas::physic_engine::config::{ShowConfig, DEFAULT_SHOW_CONFIG_PATH};
use fireworks_canvas::renderer_engine::config::{RendererConfig, DEFAULT_RENDERER_CONFIG_PATH};
use fireworks_canvas::renderer_engine::CanvasRenderer;
use fireworks_canvas::utils::show_rust_core_dependencies;
use fireworks_canvas::window_engine::{GlfwWindowEngine, WindowEngine};
use fireworks_canvas::Simulator;

/// Main entry point for the Fireworks Canvas application.
fn main() -> Result<()> {
    env_logger::init();

    info!("🚀 Starting Fireworks Canvas...");

    show_rust_core_dependencies();

    let show_config = ShowConfig::from_file(DEFAULT_SHOW_CONFIG_PATH).unwrap_or_default();
    info!("Show config loaded:\n{:#?}", show_config);

    let renderer_config =
        RendererConfig::from_file(DEFAULT_RENDERER_CONFIG_PATH).unwrap_or_default();
    info!("Renderer config loaded:\n{:#?}", renderer_config);

    // 1. Init Window & Context
    let window_engine = GlfwWindowEngine::init(
        renderer_config.window_width,
        renderer_config.window_height,
        &renderer_config.title,
    )?;

    // 2. Init Renderer (now that GL context is ready)
    let (fb_width, fb_height) = window_engine.get_framebuffer_size();
    let renderer_engine = CanvasRenderer::new(fb_width, fb_height, renderer_config.gl_debug)?;

    // 3. Init Simulator
    let mut simulator =
        Simulator::new(renderer_engine, window_engine, show_config, renderer_config);

    let result = simulator.run();
    simulator.close();

    result
}
