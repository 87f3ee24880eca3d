use glam::Vec2;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

use crate::physic_engine::config::ShowConfig;
use crate::physic_engine::geometry::random_in_range;
use crate::physic_engine::particle::Particle;
use crate::physic_engine::rocket::Rocket;
use crate::renderer_engine::{Color, CompositeMode, Surface};
use crate::scheduler::{AnimationFrames, IntervalTimers, TimerId};

/// Bilan d'un appel à [`FireworksShow::frame_tick`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// `false` si aucune frame n'était demandée ou si la surface était indisponible
    pub ran: bool,
    pub rockets_drawn: usize,
    pub arrivals: usize,
    pub particles_spawned: usize,
    pub particles_drawn: usize,
    pub particles_expired: usize,
}

/// Boucle de simulation : possède les fusées et particules vivantes, la taille de
/// la surface, les réglages, la demande d'animation frame et la minuterie
/// d'auto-lancement.
///
/// Création via [`FireworksShow::new`], destruction explicite via
/// [`FireworksShow::teardown`] (appelé aussi au `Drop`). Après `teardown`, plus aucune
/// frame ni minuterie ne produit d'effet.
#[derive(Debug)]
pub struct FireworksShow {
    rockets: Vec<Rocket>,
    particles: Vec<Particle>,

    width: f32,
    height: f32,

    particle_count: i32,
    auto_launch: bool,
    auto_launch_interval: Duration,
    fade_alpha: f32,

    frames: AnimationFrames,
    timers: IntervalTimers,
    auto_launch_timer: Option<TimerId>,

    rng: StdRng,
    alive: bool,
}

impl FireworksShow {
    pub fn new(config: &ShowConfig, width: f32, height: f32) -> Self {
        Self::with_rng(config, width, height, StdRng::from_os_rng())
    }

    /// Variante déterministe (tests, benchmarks).
    pub fn with_seed(config: &ShowConfig, width: f32, height: f32, seed: u64) -> Self {
        Self::with_rng(config, width, height, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: &ShowConfig, width: f32, height: f32, rng: StdRng) -> Self {
        let mut show = Self {
            rockets: Vec::new(),
            particles: Vec::new(),
            width,
            height,
            particle_count: config.particle_count,
            auto_launch: false,
            auto_launch_interval: config.auto_launch_interval(),
            fade_alpha: config.fade_alpha,
            frames: AnimationFrames::new(),
            timers: IntervalTimers::new(),
            auto_launch_timer: None,
            rng,
            alive: true,
        };

        show.frames.request_frame();
        show.set_auto_launch(config.auto_launch);

        info!(
            "🎆 Fireworks show ready ({} x {}, {} particles per burst, auto-launch: {})",
            width, height, show.particle_count, show.auto_launch
        );
        show
    }

    /// Applique une nouvelle configuration sans redémarrer le spectacle.
    pub fn apply_config(&mut self, config: &ShowConfig) {
        self.set_particle_count(config.particle_count);
        self.fade_alpha = config.fade_alpha;

        let interval = config.auto_launch_interval();
        if interval != self.auto_launch_interval {
            self.auto_launch_interval = interval;
            // la minuterie active garde l'ancienne période : on la réarme
            if let Some(id) = self.auto_launch_timer.take() {
                self.timers.clear_interval(id);
            }
        }
        self.set_auto_launch(config.auto_launch);
    }

    /// Lance une fusée depuis le bas-centre de la surface.
    ///
    /// Une coordonnée cible absente est tirée au hasard : `x` sur toute la largeur,
    /// `y` dans la moitié haute.
    pub fn launch(&mut self, target_x: Option<f32>, target_y: Option<f32>) {
        if !self.alive {
            debug!("Launch ignored: show already torn down");
            return;
        }

        let (sx, sy) = (self.width / 2.0, self.height);
        let tx = match target_x {
            Some(x) => x,
            None => random_in_range(&mut self.rng, 0.0, self.width),
        };
        let ty = match target_y {
            Some(y) => y,
            None => random_in_range(&mut self.rng, 0.0, self.height / 2.0),
        };

        self.rockets.push(Rocket::new(sx, sy, tx, ty, &mut self.rng));
        debug!(
            "🚀 Rocket launched from ({:.1}, {:.1}) to ({:.1}, {:.1})",
            sx, sy, tx, ty
        );
    }

    /// Nouvelles dimensions de la surface : seuls les prochains lancements sont concernés.
    pub fn on_resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        info!("🖥️ Surface resized: {} x {}", width, height);
    }

    pub fn set_particle_count(&mut self, count: i32) {
        if count != self.particle_count {
            info!("🎇 Particles per burst: {} -> {}", self.particle_count, count);
        }
        self.particle_count = count;
    }

    /// Active / désactive l'auto-lancement.
    ///
    /// Au plus une minuterie est armée par période d'activation, quel que soit le
    /// nombre de bascules.
    pub fn set_auto_launch(&mut self, enabled: bool) {
        let changed = enabled != self.auto_launch;
        self.auto_launch = enabled;
        if !self.alive {
            return;
        }

        match (enabled, self.auto_launch_timer) {
            (true, None) => {
                self.auto_launch_timer = Some(self.timers.set_interval(self.auto_launch_interval));
            }
            (false, Some(id)) => {
                self.timers.clear_interval(id);
                self.auto_launch_timer = None;
            }
            _ => {}
        }

        if changed {
            info!(
                "⏱️ Auto-launch {} (every {:?})",
                if enabled { "enabled" } else { "disabled" },
                self.auto_launch_interval
            );
        }
    }

    /// Déclenchement de la minuterie d'auto-lancement : une fusée vers une cible aléatoire.
    pub fn auto_launch_tick(&mut self) -> bool {
        if !self.alive || !self.auto_launch {
            return false;
        }
        self.launch(None, None);
        true
    }

    /// Fait avancer les minuteries de `dt`. Retourne le nombre d'auto-lancements.
    pub fn advance_timers(&mut self, dt: Duration) -> usize {
        if !self.alive {
            return 0;
        }
        let fired = self.timers.advance(dt);
        let mut launched = 0;
        for id in fired {
            if Some(id) == self.auto_launch_timer && self.auto_launch_tick() {
                launched += 1;
            }
        }
        launched
    }

    /// Une frame complète : fondu de la surface, fusées, particules, puis demande
    /// de la frame suivante.
    ///
    /// Sans frame demandée (ou après `teardown`) l'appel ne fait rien. Sans surface,
    /// rien n'est mis à jour mais la frame suivante est tout de même demandée.
    pub fn frame_tick(&mut self, surface: Option<&mut dyn Surface>) -> FrameReport {
        if !self.alive || self.frames.take_pending().is_none() {
            return FrameReport::default();
        }

        let report = match surface {
            Some(surface) => self.update_and_draw(surface),
            None => FrameReport::default(),
        };

        self.frames.request_frame();
        report
    }

    fn update_and_draw(&mut self, surface: &mut dyn Surface) -> FrameReport {
        let mut report = FrameReport {
            ran: true,
            ..FrameReport::default()
        };

        // 1. Assombrit l'image existante au lieu de l'effacer (traînées persistantes)
        let (width, height) = surface.size();
        surface.set_composite_mode(CompositeMode::DestinationOut);
        surface.fill_rect(0.0, 0.0, width, height, Color::new(0.0, 0.0, 0.0, self.fade_alpha));
        surface.set_composite_mode(CompositeMode::Lighter);

        let burst_size = self.particle_count.max(0) as usize;
        let Self {
            rockets,
            particles,
            rng,
            ..
        } = self;

        // 2. Fusées : dessin, puis pas de simulation ; explosion à l'arrivée
        rockets.retain_mut(|rocket| {
            rocket.render(&mut *surface);
            report.rockets_drawn += 1;

            let Some(arrival) = rocket.step() else {
                return true;
            };
            debug!(
                "💥 Explosion at ({:.1}, {:.1}) hue {:.0}: {} particles",
                arrival.target.x, arrival.target.y, arrival.hue, burst_size
            );
            particles.reserve(burst_size);
            for _ in 0..burst_size {
                particles.push(Particle::new(
                    arrival.target.x,
                    arrival.target.y,
                    arrival.hue,
                    &mut *rng,
                ));
            }
            report.arrivals += 1;
            report.particles_spawned += burst_size;
            false
        });

        // 3. Particules : dessin + pas tant qu'elles sont visibles, sinon retrait
        particles.retain_mut(|particle| {
            if particle.is_visible() {
                particle.render(&mut *surface);
                particle.step();
                report.particles_drawn += 1;
                true
            } else {
                report.particles_expired += 1;
                false
            }
        });

        report
    }

    /// Annule la frame demandée et la minuterie, vide les collections.
    pub fn teardown(&mut self) {
        if !self.alive {
            return;
        }
        if let Some(handle) = self.frames.pending() {
            self.frames.cancel_frame(handle);
        }
        if let Some(id) = self.auto_launch_timer.take() {
            self.timers.clear_interval(id);
        }
        self.timers.clear_all();
        self.rockets.clear();
        self.particles.clear();
        self.alive = false;
        info!("🛑 Fireworks show torn down");
    }

    /// Ajoute une fusée déjà construite à l'ensemble vivant.
    pub fn add_rocket(&mut self, rocket: Rocket) {
        if self.alive {
            self.rockets.push(rocket);
        }
    }

    /// Ajoute une particule déjà construite à l'ensemble vivant.
    pub fn add_particle(&mut self, particle: Particle) {
        if self.alive {
            self.particles.push(particle);
        }
    }

    pub fn rockets(&self) -> &[Rocket] {
        &self.rockets
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    /// Point de départ des fusées (bas-centre).
    pub fn launch_origin(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height)
    }

    pub fn particle_count(&self) -> i32 {
        self.particle_count
    }

    pub fn auto_launch(&self) -> bool {
        self.auto_launch
    }

    pub fn auto_launch_interval(&self) -> Duration {
        self.auto_launch_interval
    }

    pub fn fade_alpha(&self) -> f32 {
        self.fade_alpha
    }

    pub fn active_intervals(&self) -> usize {
        self.timers.active_count()
    }

    pub fn frame_pending(&self) -> bool {
        self.frames.is_pending()
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }
}

impl Drop for FireworksShow {
    fn drop(&mut self) {
        self.teardown();
    }
}
