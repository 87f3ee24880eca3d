use glam::Vec2;
use rand::Rng;

/// Tire une valeur uniforme dans `[min, max)`.
///
/// - `min == max` retourne exactement `min` (pas de panique sur un intervalle vide).
/// - `max < min` : la valeur reste entre les deux bornes (interpolation linéaire).
pub fn random_in_range(rng: &mut impl Rng, min: f32, max: f32) -> f32 {
    if min < max {
        // l'arrondi flottant peut renvoyer `max` sur un intervalle très étroit
        let v = rng.random_range(min..max);
        if v < max {
            v
        } else {
            min
        }
    } else {
        min + rng.random::<f32>() * (max - min)
    }
}

/// Distance euclidienne entre deux points.
#[inline]
pub fn distance(p1: Vec2, p2: Vec2) -> f32 {
    let dx = p1.x - p2.x;
    let dy = p1.y - p2.y;
    (dx * dx + dy * dy).sqrt()
}
