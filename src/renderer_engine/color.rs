pub use glam::Vec4 as Color;

/// Couleur HSL + alpha, telle qu'utilisée pour les traits des fusées et particules.
///
/// - `hue` en degrés (ramenée dans [0, 360))
/// - `saturation` et `lightness` en pourcentage, bornées à [0, 100]
/// - `alpha` bornée à [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsla {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
    pub alpha: f32,
}

impl Hsla {
    pub fn new(hue: f32, saturation: f32, lightness: f32, alpha: f32) -> Self {
        Self {
            hue,
            saturation,
            lightness,
            alpha,
        }
    }

    /// Couleur opaque (`hsl(...)`)
    pub fn opaque(hue: f32, saturation: f32, lightness: f32) -> Self {
        Self::new(hue, saturation, lightness, 1.0)
    }

    /// Conversion HSL -> RGBA (non prémultiplié), composantes dans [0, 1].
    pub fn to_rgba(&self) -> Color {
        let h = self.hue.rem_euclid(360.0) / 60.0;
        let s = (self.saturation / 100.0).clamp(0.0, 1.0);
        let l = (self.lightness / 100.0).clamp(0.0, 1.0);

        let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };
        let m = l - chroma / 2.0;

        Color::new(r + m, g + m, b + m, self.alpha.clamp(0.0, 1.0))
    }
}

impl From<Hsla> for Color {
    fn from(c: Hsla) -> Self {
        c.to_rgba()
    }
}
