//! Skia surface - pixel buffer backend

use ctx2d::{Backend, BackendError, Color, DrawMode, GraphicsState, Path, Rect, SyncedState, TextState};
use tiny_skia::{BlendMode, FillRule, Paint, PathBuilder, Pixmap, Transform};

use crate::convert::{to_skia_path, to_skia_rect, to_skia_stroke, to_skia_transform};
use crate::{SkiaError, SurfaceConfig};

/// Glyph box height, in ems
const GLYPH_HEIGHT_EM: f64 = 0.7;

/// tiny-skia backed drawing surface
pub struct SkiaSurface {
    pixmap: Option<Pixmap>,
    config: SurfaceConfig,
    /// State from the last `apply_state`
    applied: SyncedState,
    /// State from the last `apply_text_state`
    text: TextState,
}

impl SkiaSurface {
    pub fn new(config: SurfaceConfig) -> Self {
        let initial = GraphicsState::default();
        Self {
            pixmap: None,
            config,
            applied: SyncedState::capture(&initial, DrawMode::Fill),
            text: TextState::capture(&initial),
        }
    }

    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    /// Get the pixmap, if a non-empty surface is allocated
    pub fn pixmap(&self) -> Option<&Pixmap> {
        self.pixmap.as_ref()
    }

    pub fn width(&self) -> u32 {
        self.pixmap.as_ref().map_or(0, |p| p.width())
    }

    pub fn height(&self) -> u32 {
        self.pixmap.as_ref().map_or(0, |p| p.height())
    }

    /// Unpremultiplied pixel color
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let pixel = self.pixmap.as_ref()?.pixel(x, y)?.demultiply();
        Some(Color::rgba(pixel.red(), pixel.green(), pixel.blue(), pixel.alpha()))
    }

    /// Encode the surface as PNG
    pub fn encode_png(&self) -> Result<Vec<u8>, SkiaError> {
        let pixmap = self.pixmap.as_ref().ok_or(SkiaError::NoSurface)?;
        pixmap.encode_png().map_err(|e| SkiaError::Png(e.to_string()))
    }

    /// Write the surface to a PNG file
    pub fn save_png(&self, path: impl AsRef<std::path::Path>) -> Result<(), SkiaError> {
        let data = self.encode_png()?;
        std::fs::write(path, data)?;
        Ok(())
    }

    fn paint(&self) -> Paint<'static> {
        let color = self.applied.color;
        let alpha = (f64::from(color.a) * self.applied.global_alpha).round().clamp(0.0, 255.0) as u8;

        let mut paint = Paint::default();
        paint.set_color_rgba8(color.r, color.g, color.b, alpha);
        paint.anti_alias = self.config.anti_alias;
        paint
    }

    fn transform(&self) -> Transform {
        to_skia_transform(&self.applied.transform)
    }
}

impl Default for SkiaSurface {
    fn default() -> Self {
        Self::new(SurfaceConfig::default())
    }
}

impl Backend for SkiaSurface {
    fn allocate_surface(&mut self, width: u32, height: u32) -> Result<(), BackendError> {
        // On failure the previous pixmap and applied state stay in place
        let pixmap = if width == 0 || height == 0 {
            tracing::debug!("empty {}x{} surface, draws are dropped", width, height);
            None
        } else {
            let mut pixmap = Pixmap::new(width, height).ok_or(BackendError::SurfaceAllocation { width, height })?;
            let bg = self.config.background;
            if bg != Color::TRANSPARENT {
                pixmap.fill(tiny_skia::Color::from_rgba8(bg.r, bg.g, bg.b, bg.a));
            }
            Some(pixmap)
        };

        let initial = GraphicsState::default();
        self.applied = SyncedState::capture(&initial, DrawMode::Fill);
        self.text = TextState::capture(&initial);
        self.pixmap = pixmap;
        Ok(())
    }

    fn apply_state(&mut self, state: &SyncedState) {
        self.applied = state.clone();
        self.text = TextState {
            transform: state.transform,
            font_size_px: state.font_size_px,
            font_family: state.font_family.clone(),
        };
    }

    fn apply_text_state(&mut self, state: &TextState) {
        self.text = state.clone();
    }

    fn fill_path(&mut self, path: &Path) {
        let Some(skia_path) = to_skia_path(path) else {
            return;
        };
        let paint = self.paint();
        let transform = self.transform();
        if let Some(pixmap) = self.pixmap.as_mut() {
            pixmap.fill_path(&skia_path, &paint, FillRule::Winding, transform, None);
        }
    }

    fn stroke_path(&mut self, path: &Path) {
        let Some(skia_path) = to_skia_path(path) else {
            return;
        };
        let paint = self.paint();
        let stroke = to_skia_stroke(&self.applied);
        let transform = self.transform();
        if let Some(pixmap) = self.pixmap.as_mut() {
            pixmap.stroke_path(&skia_path, &paint, &stroke, transform, None);
        }
    }

    fn fill_rect(&mut self, rect: Rect) {
        let Some(rect) = to_skia_rect(rect) else {
            return;
        };
        let paint = self.paint();
        let transform = self.transform();
        if let Some(pixmap) = self.pixmap.as_mut() {
            pixmap.fill_rect(rect, &paint, transform, None);
        }
    }

    fn stroke_rect(&mut self, rect: Rect) {
        let Some(rect) = to_skia_rect(rect) else {
            return;
        };
        let path = PathBuilder::from_rect(rect);
        let paint = self.paint();
        let stroke = to_skia_stroke(&self.applied);
        let transform = self.transform();
        if let Some(pixmap) = self.pixmap.as_mut() {
            pixmap.stroke_path(&path, &paint, &stroke, transform, None);
        }
    }

    fn clear_rect(&mut self, rect: Rect) {
        let Some(rect) = to_skia_rect(rect) else {
            return;
        };
        let mut paint = Paint::default();
        paint.blend_mode = BlendMode::Clear;
        paint.anti_alias = self.config.anti_alias;
        let transform = self.transform();
        if let Some(pixmap) = self.pixmap.as_mut() {
            pixmap.fill_rect(rect, &paint, transform, None);
        }
    }

    fn draw_text(&mut self, text: &str, x: f64, y: f64) {
        let size = self.applied.font_size_px;
        let advance = size * self.config.glyph_advance_em;
        let glyph_width = advance * 0.8;
        let glyph_height = size * GLYPH_HEIGHT_EM;

        // One box per visible character, sitting on the baseline at `y`
        let mut pb = PathBuilder::new();
        for (i, ch) in text.chars().enumerate() {
            if ch.is_whitespace() {
                continue;
            }
            let left = x + i as f64 * advance;
            if let Some(rect) = to_skia_rect(Rect::new(left, y - glyph_height, glyph_width, glyph_height)) {
                pb.push_rect(rect);
            }
        }

        let Some(path) = pb.finish() else {
            return;
        };
        let paint = self.paint();
        let transform = self.transform();
        if let Some(pixmap) = self.pixmap.as_mut() {
            pixmap.fill_path(&path, &paint, FillRule::Winding, transform, None);
        }
    }

    fn measure_advance(&mut self, text: &str) -> f64 {
        text.chars().count() as f64 * self.text.font_size_px * self.config.glyph_advance_em
    }
}
