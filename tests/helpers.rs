use fireworks_canvas::renderer_engine::{Color, CompositeMode, Hsla, PixelCanvas};
use fireworks_canvas::renderer_engine::{RendererEngine, Surface};
use fireworks_canvas::window_engine::{HostEvent, WindowEngine};
use glam::Vec2;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Opération de dessin enregistrée par [`RecordingSurface`].
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    SetMode(CompositeMode),
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Color,
        mode: CompositeMode,
    },
    StrokeLine {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Hsla,
        mode: CompositeMode,
    },
}

/// Surface qui ne dessine rien mais garde la trace de chaque appel.
#[allow(dead_code)]
#[derive(Debug)]
pub struct RecordingSurface {
    pub width: f32,
    pub height: f32,
    pub mode: CompositeMode,
    pub ops: Vec<DrawOp>,
}

#[allow(dead_code)]
impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            mode: CompositeMode::default(),
            ops: Vec::new(),
        }
    }

    pub fn strokes(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::StrokeLine { .. }))
            .count()
    }

    pub fn fills(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::FillRect { .. }))
            .count()
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn composite_mode(&self) -> CompositeMode {
        self.mode
    }

    fn set_composite_mode(&mut self, mode: CompositeMode) {
        self.mode = mode;
        self.ops.push(DrawOp::SetMode(mode));
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        self.ops.push(DrawOp::FillRect {
            x,
            y,
            width,
            height,
            color,
            mode: self.mode,
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Hsla) {
        self.ops.push(DrawOp::StrokeLine {
            from,
            to,
            width,
            color,
            mode: self.mode,
        });
    }
}

/// Fenêtre sans contexte graphique : rejoue des lots d'événements, un par `poll_events`.
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct ScriptedWindow {
    pub size: (i32, i32),
    pub batches: VecDeque<Vec<HostEvent>>,
    pub should_close: bool,
    pub swaps: usize,
}

#[allow(dead_code)]
impl ScriptedWindow {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            size: (width, height),
            ..Self::default()
        }
    }

    pub fn with_events(mut self, events: Vec<HostEvent>) -> Self {
        self.batches.push_back(events);
        self
    }
}

impl WindowEngine for ScriptedWindow {
    fn init(width: i32, height: i32, _title: &str) -> anyhow::Result<Self> {
        Ok(Self::new(width, height))
    }

    fn poll_events(&mut self) -> Vec<HostEvent> {
        let events = self.batches.pop_front().unwrap_or_default();
        for event in &events {
            if let HostEvent::Resized { width, height } = event {
                self.size = (*width, *height);
            }
        }
        events
    }

    fn swap_buffers(&mut self) {
        self.swaps += 1;
    }

    fn should_close(&self) -> bool {
        self.should_close
    }

    fn set_should_close(&mut self, value: bool) {
        self.should_close = value;
    }

    fn get_size(&self) -> (i32, i32) {
        self.size
    }

    fn get_framebuffer_size(&self) -> (i32, i32) {
        self.size
    }
}

/// Renderer qui journalise ses appels dans un log partagé.
#[allow(dead_code)]
pub struct LoggingRenderer {
    pub log: Rc<RefCell<Vec<String>>>,
}

#[allow(dead_code)]
impl LoggingRenderer {
    pub fn new(log: Rc<RefCell<Vec<String>>>) -> Self {
        Self { log }
    }
}

impl RendererEngine for LoggingRenderer {
    fn set_viewport(&mut self, width: i32, height: i32) {
        self.log
            .borrow_mut()
            .push(format!("renderer.set_viewport {width}x{height}"));
    }

    fn present(&mut self, canvas: &PixelCanvas) -> usize {
        let (w, h) = canvas.dimensions();
        self.log.borrow_mut().push("renderer.present".into());
        (w as usize) * (h as usize) * 4
    }

    fn close(&mut self) {
        self.log.borrow_mut().push("renderer.close".into());
    }
}
