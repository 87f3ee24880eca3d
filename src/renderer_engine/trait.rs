use glam::Vec2;

use crate::renderer_engine::canvas::PixelCanvas;
use crate::renderer_engine::color::{Color, Hsla};

/// Mode de composition appliqué aux dessins suivants (sémantique canvas 2D,
/// couleurs prémultipliées).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompositeMode {
    /// `dst = src + dst * (1 - src.a)`
    #[default]
    SourceOver,
    /// `dst = dst * (1 - src.a)` : efface proportionnellement à l'alpha source
    DestinationOut,
    /// `dst = min(src + dst, 1)` : mélange additif ("lighter")
    Lighter,
}

/// Surface de dessin 2D consommée par la simulation.
///
/// Coordonnées en pixels, origine en haut à gauche, `y` vers le bas.
pub trait Surface {
    /// Dimensions courantes `(width, height)` en pixels.
    fn size(&self) -> (f32, f32);

    fn composite_mode(&self) -> CompositeMode;

    fn set_composite_mode(&mut self, mode: CompositeMode);

    /// Remplit un rectangle avec une couleur RGBA non prémultipliée.
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color);

    /// Trace un segment d'épaisseur `width`.
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Hsla);
}

/// Présente une image de la surface à l'écran.
pub trait RendererEngine {
    /// Ajuste la zone d'affichage (taille du framebuffer).
    fn set_viewport(&mut self, width: i32, height: i32);

    /// Affiche le canvas. Retourne le nombre d'octets transférés.
    fn present(&mut self, canvas: &PixelCanvas) -> usize;

    fn close(&mut self);
}
