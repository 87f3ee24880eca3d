use anyhow::{anyhow, Result};
use glfw::{Action, Context, Key, MouseButton, WindowEvent};
use log::info;

use super::r#trait::{HostEvent, HostKey, WindowEngine};

pub type WindowEvents = glfw::GlfwReceiver<(f64, glfw::WindowEvent)>;

pub struct GlfwWindowEngine {
    glfw: glfw::Glfw,
    window: glfw::PWindow,
    events: WindowEvents,
}

impl GlfwWindowEngine {
    fn map_key(key: Key) -> Option<HostKey> {
        match key {
            Key::Escape => Some(HostKey::Escape),
            Key::Equal | Key::KpAdd => Some(HostKey::IncreaseParticles),
            Key::Minus | Key::KpSubtract => Some(HostKey::DecreaseParticles),
            Key::A => Some(HostKey::ToggleAutoLaunch),
            Key::R => Some(HostKey::ReloadConfig),
            Key::P => Some(HostKey::Snapshot),
            _ => None,
        }
    }

    fn map_event(&self, event: WindowEvent) -> Option<HostEvent> {
        match event {
            WindowEvent::MouseButton(MouseButton::Button1, Action::Press, _) => {
                let (x, y) = self.window.get_cursor_pos();
                Some(HostEvent::PointerDown {
                    x: x as f32,
                    y: y as f32,
                })
            }
            WindowEvent::Size(width, height) => Some(HostEvent::Resized { width, height }),
            WindowEvent::FramebufferSize(width, height) => {
                Some(HostEvent::FramebufferResized { width, height })
            }
            WindowEvent::Key(key, _, Action::Press, _) => Self::map_key(key).map(HostEvent::Key),
            WindowEvent::Close => Some(HostEvent::CloseRequested),
            _ => None,
        }
    }
}

impl WindowEngine for GlfwWindowEngine {
    fn init(width: i32, height: i32, title: &str) -> Result<Self> {
        let mut glfw = glfw::init(glfw::fail_on_errors)
            .map_err(|_| anyhow!("Impossible d'initialiser GLFW"))?;

        glfw.window_hint(glfw::WindowHint::ContextVersionMajor(3));
        glfw.window_hint(glfw::WindowHint::ContextVersionMinor(3));
        glfw.window_hint(glfw::WindowHint::OpenGlProfile(
            glfw::OpenGlProfileHint::Core,
        ));
        glfw.window_hint(glfw::WindowHint::OpenGlForwardCompat(true));

        let (mut window, events) = glfw
            .create_window(
                width.max(1) as u32,
                height.max(1) as u32,
                title,
                glfw::WindowMode::Windowed,
            )
            .ok_or_else(|| anyhow!("Erreur création fenêtre GLFW"))?;

        window.make_current();
        window.set_key_polling(true);
        window.set_size_polling(true);
        window.set_framebuffer_size_polling(true);
        window.set_mouse_button_polling(true);
        window.set_close_polling(true);

        // load OpenGL function pointers
        gl::load_with(|s| window.get_proc_address(s) as *const _);
        glfw.set_swap_interval(glfw::SwapInterval::Sync(1));

        info!("✅ OpenGL context ready for '{}'", title);

        Ok(Self {
            glfw,
            window,
            events,
        })
    }

    fn poll_events(&mut self) -> Vec<HostEvent> {
        self.glfw.poll_events();
        let raw: Vec<_> = glfw::flush_messages(&self.events)
            .map(|(_, event)| event)
            .collect();
        raw.into_iter()
            .filter_map(|event| self.map_event(event))
            .collect()
    }

    fn swap_buffers(&mut self) {
        self.window.swap_buffers();
    }

    fn should_close(&self) -> bool {
        self.window.should_close()
    }

    fn set_should_close(&mut self, value: bool) {
        self.window.set_should_close(value);
    }

    fn get_size(&self) -> (i32, i32) {
        self.window.get_size()
    }

    fn get_framebuffer_size(&self) -> (i32, i32) {
        self.window.get_framebuffer_size()
    }
}
