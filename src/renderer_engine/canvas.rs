use anyhow::{anyhow, Result};
use glam::Vec2;
use log::info;
use std::path::Path;

use crate::renderer_engine::color::{Color, Hsla};
use crate::renderer_engine::r#trait::{CompositeMode, Surface};

/// Surface de dessin logicielle persistante.
///
/// Les pixels sont stockés en RGBA **prémultiplié** (`f32` dans [0, 1]) : l'image
/// n'est jamais effacée entre deux frames, c'est ce qui permet l'effet de traînée
/// (voir `FireworksShow::frame_tick`).
#[derive(Debug, Clone)]
pub struct PixelCanvas {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
    mode: CompositeMode,
}

impl PixelCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; (width as usize) * (height as usize)],
            mode: CompositeMode::default(),
        }
    }

    /// Redimensionne le canvas. Comme un canvas HTML, le contenu est perdu.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels = vec![Color::ZERO; (width as usize) * (height as usize)];
    }

    pub fn clear(&mut self) {
        self.pixels.fill(Color::ZERO);
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Pixel prémultiplié en `(x, y)`, `None` hors du canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get((y as usize) * (self.width as usize) + x as usize)
            .copied()
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Image RGBA8 aplatie sur fond noir (alpha opaque), prête pour l'upload GPU.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let to_u8 = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        self.pixels
            .iter()
            .flat_map(|p| [to_u8(p.x), to_u8(p.y), to_u8(p.z), u8::MAX])
            .collect()
    }

    /// Sauvegarde l'image courante en PNG.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if self.width == 0 || self.height == 0 {
            return Err(anyhow!("Cannot save an empty canvas to '{}'", path.display()));
        }
        let image = image::RgbaImage::from_raw(self.width, self.height, self.to_rgba8())
            .ok_or_else(|| anyhow!("Canvas buffer does not match its dimensions"))?;
        image.save(path)?;
        info!("📸 Snapshot saved to {}", path.display());
        Ok(())
    }

    /// Plage de pixels dont le centre tombe dans `[start, end)`.
    fn covered_span(start: f32, end: f32, limit: u32) -> (usize, usize) {
        let lo = (start - 0.5).ceil().max(0.0);
        let hi = (end - 0.5).ceil().min(limit as f32);
        if hi <= lo {
            return (0, 0);
        }
        (lo as usize, hi as usize)
    }

    #[inline(always)]
    fn blend(mode: CompositeMode, dst: &mut Color, src: Color) {
        *dst = match mode {
            CompositeMode::SourceOver => src + *dst * (1.0 - src.w),
            CompositeMode::DestinationOut => *dst * (1.0 - src.w),
            CompositeMode::Lighter => (src + *dst).min(Color::ONE),
        };
    }
}

/// Distance d'un point au segment `[a, b]`.
fn distance_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f32::EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

impl Surface for PixelCanvas {
    fn size(&self) -> (f32, f32) {
        (self.width as f32, self.height as f32)
    }

    fn composite_mode(&self) -> CompositeMode {
        self.mode
    }

    fn set_composite_mode(&mut self, mode: CompositeMode) {
        self.mode = mode;
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        let (x, width) = if width < 0.0 { (x + width, -width) } else { (x, width) };
        let (y, height) = if height < 0.0 { (y + height, -height) } else { (y, height) };

        let (x0, x1) = Self::covered_span(x, x + width, self.width);
        let (y0, y1) = Self::covered_span(y, y + height, self.height);

        let alpha = color.w.clamp(0.0, 1.0);
        let src = Color::new(color.x * alpha, color.y * alpha, color.z * alpha, alpha);
        let stride = self.width as usize;
        let mode = self.mode;

        for row in y0..y1 {
            for dst in &mut self.pixels[row * stride + x0..row * stride + x1] {
                Self::blend(mode, dst, src);
            }
        }
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Hsla) {
        if self.width == 0 || self.height == 0 || width <= 0.0 {
            return;
        }
        let half = width / 2.0;
        let min = from.min(to) - Vec2::splat(half + 1.0);
        let max = from.max(to) + Vec2::splat(half + 1.0);

        let (x0, x1) = Self::covered_span(min.x, max.x, self.width);
        let (y0, y1) = Self::covered_span(min.y, max.y, self.height);

        let rgba = color.to_rgba();
        let stride = self.width as usize;
        let mode = self.mode;

        for row in y0..y1 {
            for col in x0..x1 {
                let center = Vec2::new(col as f32 + 0.5, row as f32 + 0.5);
                // anti-aliasing : couverture linéaire sur le dernier demi-pixel
                let coverage = (half + 0.5 - distance_to_segment(center, from, to)).clamp(0.0, 1.0);
                if coverage <= 0.0 {
                    continue;
                }
                let a = rgba.w * coverage;
                let src = Color::new(rgba.x * a, rgba.y * a, rgba.z * a, a);
                Self::blend(mode, &mut self.pixels[row * stride + col], src);
            }
        }
    }
}
