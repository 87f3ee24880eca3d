use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

use crate::physic_engine::geometry::random_in_range;
use crate::physic_engine::trail::Trail;
use crate::renderer_engine::{Hsla, Surface};

pub const PARTICLE_TRAIL_LENGTH: usize = 5;
pub const PARTICLE_FRICTION: f32 = 0.97;
pub const PARTICLE_GRAVITY: f32 = 1.0;
pub const PARTICLE_BRIGHTNESS_FADE: f32 = 0.3;

/// Étincelle issue de l'explosion d'une fusée.
///
/// Une particule est vivante tant que `alpha > decay` : le seuil est le taux de
/// décroissance propre à la particule, pas une constante.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub trail: Trail<PARTICLE_TRAIL_LENGTH>,

    pub angle: f32,
    pub speed: f32,
    pub friction: f32,
    pub gravity: f32,

    pub hue: f32,
    pub brightness: f32,
    pub alpha: f32,
    pub decay: f32,
    pub line_width: f32,
}

impl Particle {
    pub fn new(x: f32, y: f32, hue: f32, rng: &mut impl Rng) -> Self {
        let pos = Vec2::new(x, y);
        Self {
            pos,
            trail: Trail::filled(pos),
            angle: random_in_range(rng, 0.0, TAU),
            speed: random_in_range(rng, 1.0, 12.0),
            friction: PARTICLE_FRICTION,
            gravity: PARTICLE_GRAVITY,
            hue,
            brightness: random_in_range(rng, 50.0, 80.0),
            alpha: 1.0,
            decay: random_in_range(rng, 0.015, 0.03),
            line_width: random_in_range(rng, 1.0, 3.0),
        }
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.alpha > self.decay
    }

    /// Avance la particule d'un pas (une frame).
    pub fn step(&mut self) {
        self.trail.push_front(self.pos);

        self.speed *= self.friction;
        self.pos.x += self.angle.cos() * self.speed;
        self.pos.y += self.angle.sin() * self.speed + self.gravity;

        self.alpha -= self.decay;
        if self.brightness > 0.0 {
            self.brightness -= PARTICLE_BRIGHTNESS_FADE;
        }
    }

    pub fn color(&self) -> Hsla {
        Hsla::new(self.hue, 100.0, self.brightness, self.alpha)
    }

    /// Segment entre la plus ancienne position du trail et la position courante.
    pub fn render(&self, surface: &mut dyn Surface) {
        let from = self.trail.oldest().unwrap_or(self.pos);
        surface.stroke_line(from, self.pos, self.line_width, self.color());
    }
}
