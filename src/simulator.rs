use crate::physic_engine::config::{ShowConfig, DEFAULT_SHOW_CONFIG_PATH};
use crate::physic_engine::{FireworksShow, FrameReport};
use crate::renderer_engine::{PixelCanvas, RendererConfig, RendererEngine, Surface};
use crate::window_engine::{HostEvent, HostKey, WindowEngine};
use crate::{log_metrics_and_fps, profiler::Profiler};
use anyhow::{anyhow, Result};
use log::{debug, info, warn};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Pas d'ajustement du nombre de particules par explosion (touches `+` / `-`).
pub const PARTICLE_COUNT_STEP: i32 = 10;
pub const MIN_PARTICLE_COUNT: i32 = 20;
pub const MAX_PARTICLE_COUNT: i32 = 400;

const LOG_INTERVAL: Duration = Duration::from_secs(5);

/// Boucle hôte : événements fenêtre → spectacle → canvas → renderer.
pub struct Simulator<R, W>
where
    R: RendererEngine,
    W: WindowEngine,
{
    show: FireworksShow,
    /// `None` tant que la fenêtre n'a pas de surface utilisable (minimisée, taille nulle)
    canvas: Option<PixelCanvas>,

    renderer_engine: R,
    window_engine: W,

    show_config: ShowConfig,
    show_config_path: PathBuf,
    renderer_config: RendererConfig,

    frames: u64,
    snapshots: u32,
    last_time: Instant,

    profiler: Profiler,
    last_log: Instant,
    first_frame: bool,
    closed: bool,
}

impl<R, W> Simulator<R, W>
where
    R: RendererEngine,
    W: WindowEngine,
{
    pub fn new(
        renderer_engine: R,
        window_engine: W,
        show_config: ShowConfig,
        renderer_config: RendererConfig,
    ) -> Self {
        let (width, height) = window_engine.get_size();
        let show = FireworksShow::new(&show_config, width as f32, height as f32);
        Self::with_show(show, renderer_engine, window_engine, show_config, renderer_config)
    }

    /// Construit la boucle autour d'un spectacle existant (graine fixée, tests).
    pub fn with_show(
        show: FireworksShow,
        renderer_engine: R,
        window_engine: W,
        show_config: ShowConfig,
        renderer_config: RendererConfig,
    ) -> Self {
        let (width, height) = window_engine.get_size();
        let canvas = Self::make_canvas(width, height);

        info!("👆 Click or tap to launch a firework");

        Self {
            show,
            canvas,
            renderer_engine,
            window_engine,
            show_config,
            show_config_path: PathBuf::from(DEFAULT_SHOW_CONFIG_PATH),
            renderer_config,
            frames: 0,
            snapshots: 0,
            last_time: Instant::now(),
            profiler: Profiler::new(200),
            last_log: Instant::now(),
            first_frame: true,
            closed: false,
        }
    }

    fn make_canvas(width: i32, height: i32) -> Option<PixelCanvas> {
        (width > 0 && height > 0).then(|| PixelCanvas::new(width as u32, height as u32))
    }

    /// Fichier relu par la touche `R`.
    pub fn set_show_config_path(&mut self, path: impl Into<PathBuf>) {
        self.show_config_path = path.into();
    }

    pub fn run(&mut self) -> Result<()> {
        self.last_time = Instant::now();
        while self.step() {}
        Ok(())
    }

    /// Une itération de la boucle, avec le temps réellement écoulé.
    pub fn step(&mut self) -> bool {
        let now = Instant::now();
        let delta = now.duration_since(self.last_time);
        self.last_time = now;
        self.step_with_delta(delta)
    }

    /// Une itération de la boucle avec un pas de temps imposé.
    pub fn step_with_delta(&mut self, delta: Duration) -> bool {
        if self.closed || self.window_engine.should_close() {
            return false;
        }

        for event in self.window_engine.poll_events() {
            self.handle_event(event);
        }

        // 🔹 start global frame
        let _frame_guard = self.profiler.frame();

        let launched = self.show.advance_timers(delta);
        if launched > 0 {
            debug!("⏱️ {} auto-launch(es) this frame", launched);
        }

        let report = if self.show.frame_pending() {
            self.profiler.profile_block("show - frame tick", || {
                self.show
                    .frame_tick(self.canvas.as_mut().map(|c| c as &mut dyn Surface))
            })
        } else {
            FrameReport::default()
        };

        if let Some(canvas) = self.canvas.as_ref() {
            let bytes = self
                .profiler
                .profile_block("renderer - present", || self.renderer_engine.present(canvas));
            self.profiler.record_metric("bytes uploaded", bytes as f32);
        }

        self.window_engine.swap_buffers();
        self.frames += 1;

        self.profiler
            .record_metric("live rockets", self.show.rockets().len() as f32);
        self.profiler
            .record_metric("live particles", self.show.particles().len() as f32);
        if report.arrivals > 0 {
            self.profiler
                .record_metric("particles spawned", report.particles_spawned as f32);
        }

        if self.last_log.elapsed() >= LOG_INTERVAL {
            log_metrics_and_fps!(&self.profiler);
            self.last_log = Instant::now();
        }

        if self.first_frame {
            info!("🚀 First frame rendered");
            self.first_frame = false;
        }

        true
    }

    pub fn handle_event(&mut self, event: HostEvent) {
        match event {
            HostEvent::PointerDown { x, y } => {
                self.show.launch(Some(x), Some(y));
            }
            HostEvent::Resized { width, height } => {
                self.show.on_resize(width as f32, height as f32);
                if width <= 0 || height <= 0 {
                    self.canvas = None;
                } else if let Some(canvas) = self.canvas.as_mut() {
                    canvas.resize(width as u32, height as u32);
                } else {
                    self.canvas = Self::make_canvas(width, height);
                }
            }
            HostEvent::FramebufferResized { width, height } => {
                self.renderer_engine.set_viewport(width, height);
            }
            HostEvent::Key(key) => self.handle_key(key),
            HostEvent::CloseRequested => self.window_engine.set_should_close(true),
        }
    }

    fn handle_key(&mut self, key: HostKey) {
        match key {
            HostKey::Escape => self.window_engine.set_should_close(true),
            HostKey::IncreaseParticles => self.adjust_particle_count(PARTICLE_COUNT_STEP),
            HostKey::DecreaseParticles => self.adjust_particle_count(-PARTICLE_COUNT_STEP),
            HostKey::ToggleAutoLaunch => {
                let enabled = !self.show.auto_launch();
                self.show.set_auto_launch(enabled);
                self.show_config.auto_launch = enabled;
            }
            HostKey::ReloadConfig => self.reload_config(),
            HostKey::Snapshot => {
                if let Err(e) = self.snapshot() {
                    warn!("❌ Snapshot failed: {e}");
                }
            }
        }
    }

    fn adjust_particle_count(&mut self, delta: i32) {
        let count =
            (self.show.particle_count() + delta).clamp(MIN_PARTICLE_COUNT, MAX_PARTICLE_COUNT);
        self.show.set_particle_count(count);
        self.show_config.particle_count = count;
    }

    /// Relit la configuration du spectacle ; en cas d'erreur, garde l'actuelle.
    pub fn reload_config(&mut self) {
        let path = self.show_config_path.to_string_lossy().into_owned();
        match ShowConfig::from_file(&path) {
            Ok(config) => {
                info!("Show config reloaded from {path}:\n{:#?}", config);
                self.show.apply_config(&config);
                self.show_config = config;
            }
            Err(e) => warn!("⚠️ Could not reload show config from {path}: {e}"),
        }
    }

    /// Écrit le canvas courant dans `snapshot_dir`. Retourne le chemin du PNG.
    pub fn snapshot(&mut self) -> Result<PathBuf> {
        let canvas = self
            .canvas
            .as_ref()
            .ok_or_else(|| anyhow!("No canvas available for a snapshot"))?;

        let dir = PathBuf::from(&self.renderer_config.snapshot_dir);
        std::fs::create_dir_all(&dir)?;

        self.snapshots += 1;
        let path = dir.join(format!("fireworks_{:04}.png", self.snapshots));
        canvas.save_png(&path)?;
        Ok(path)
    }

    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.show.teardown();
        self.canvas = None;
        self.renderer_engine.close();
        self.closed = true;
        info!("👋 Simulator closed after {} frames", self.frames);
    }

    pub fn show(&self) -> &FireworksShow {
        &self.show
    }

    pub fn canvas(&self) -> Option<&PixelCanvas> {
        self.canvas.as_ref()
    }

    pub fn show_config(&self) -> &ShowConfig {
        &self.show_config
    }

    pub fn renderer(&self) -> &R {
        &self.renderer_engine
    }

    pub fn window(&self) -> &W {
        &self.window_engine
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn profiler(&self) -> &Profiler {
        &self.profiler
    }
}
