use glam::Vec2;
use rand::Rng;

use crate::physic_engine::geometry::{distance, random_in_range};
use crate::physic_engine::trail::Trail;
use crate::renderer_engine::{Hsla, Surface};

pub const ROCKET_TRAIL_LENGTH: usize = 3;
pub const ROCKET_INITIAL_SPEED: f32 = 2.0;
pub const ROCKET_ACCELERATION: f32 = 1.05;

/// Signal d'arrivée d'une fusée : son propriétaire doit la retirer et faire
/// exploser une gerbe de particules en `target` avec la teinte `hue`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arrival {
    pub target: Vec2,
    pub hue: f32,
}

/// Représentation d’une fusée, du point de départ jusqu'à sa cible
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rocket {
    /// Position courante
    pub pos: Vec2,
    pub start: Vec2,
    pub target: Vec2,

    pub distance_to_target: f32,
    /// Distance depuis le départ jusqu'à la *prochaine* position candidate
    pub distance_traveled: f32,

    pub trail: Trail<ROCKET_TRAIL_LENGTH>,

    pub angle: f32,
    pub speed: f32,
    pub acceleration: f32,

    pub hue: f32,
    pub brightness: f32,
    pub line_width: f32,
}

impl Rocket {
    pub fn new(sx: f32, sy: f32, tx: f32, ty: f32, rng: &mut impl Rng) -> Self {
        let start = Vec2::new(sx, sy);
        let target = Vec2::new(tx, ty);
        Self {
            pos: start,
            start,
            target,
            distance_to_target: distance(start, target),
            distance_traveled: 0.0,
            trail: Trail::filled(start),
            angle: (ty - sy).atan2(tx - sx),
            speed: ROCKET_INITIAL_SPEED,
            acceleration: ROCKET_ACCELERATION,
            hue: random_in_range(rng, 0.0, 360.0),
            brightness: random_in_range(rng, 50.0, 70.0),
            line_width: random_in_range(rng, 1.0, 3.0),
        }
    }

    /// Avance la fusée d'un pas.
    ///
    /// Retourne `Some(Arrival)` quand la position candidate atteint ou dépasse la
    /// cible : la fusée ne bouge alors plus (pas de dépassement) et doit être retirée.
    pub fn step(&mut self) -> Option<Arrival> {
        self.trail.push_front(self.pos);

        self.speed *= self.acceleration;
        let vel = Vec2::new(self.angle.cos(), self.angle.sin()) * self.speed;
        self.distance_traveled = distance(self.start, self.pos + vel);

        if self.distance_traveled >= self.distance_to_target {
            return Some(Arrival {
                target: self.target,
                hue: self.hue,
            });
        }

        self.pos += vel;
        None
    }

    pub fn color(&self) -> Hsla {
        Hsla::opaque(self.hue, 100.0, self.brightness)
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        let from = self.trail.oldest().unwrap_or(self.pos);
        surface.stroke_line(from, self.pos, self.line_width, self.color());
    }
}
