//! Text to point-cloud sampling.
//!
//! A string is drawn centered onto an offscreen luminance raster using an
//! embedded 8x8 bitmap font scaled to the requested font size, then the raster
//! is scanned on a regular grid and every lit cell becomes a 2D world point.

use crate::constants::*;
use font8x8::{UnicodeFonts, BASIC_FONTS, LATIN_FONTS};
use glam::Vec2;

const FONT_CELLS: usize = 8;

/// Grayscale offscreen surface.
#[derive(Clone, Debug)]
pub struct GlyphRaster {
    pub width: usize,
    pub height: usize,
    pixels: Vec<u8>,
}

impl GlyphRaster {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height],
        }
    }

    #[inline]
    pub fn luminance(&self, x: usize, y: usize) -> u8 {
        self.pixels.get(y * self.width + x).copied().unwrap_or(0)
    }

    pub fn lit_count(&self) -> usize {
        self.pixels.iter().filter(|&&p| p > 0).count()
    }

    fn fill_rect(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, value: u8) {
        let xs = (x0.round().max(0.0) as usize).min(self.width);
        let xe = (x1.round().max(0.0) as usize).min(self.width);
        let ys = (y0.round().max(0.0) as usize).min(self.height);
        let ye = (y1.round().max(0.0) as usize).min(self.height);
        for y in ys..ye {
            let row = y * self.width;
            self.pixels[row + xs..row + xe].fill(value);
        }
    }
}

/// Sampling parameters; defaults mirror a 1024x512 canvas scanned every 4th pixel.
#[derive(Clone, Debug)]
pub struct GlyphSampler {
    pub raster_width: usize,
    pub raster_height: usize,
    pub stride: usize,
    pub world_scale: f32,
    pub threshold: u8,
}

impl Default for GlyphSampler {
    fn default() -> Self {
        Self {
            raster_width: GLYPH_RASTER_WIDTH,
            raster_height: GLYPH_RASTER_HEIGHT,
            stride: GLYPH_SAMPLE_STRIDE,
            world_scale: GLYPH_WORLD_SCALE,
            threshold: GLYPH_LIT_THRESHOLD,
        }
    }
}

fn glyph_bitmap(c: char) -> Option<[u8; 8]> {
    BASIC_FONTS.get(c).or_else(|| LATIN_FONTS.get(c))
}

impl GlyphSampler {
    /// Upper bound on the number of points a single sample can produce.
    pub fn grid_cells(&self) -> usize {
        let stride = self.stride.max(1);
        self.raster_width.div_ceil(stride) * self.raster_height.div_ceil(stride)
    }

    /// Draw `text` centered on a fresh raster.
    ///
    /// Each character advances `GLYPH_ADVANCE_EM` of the font size. The font is
    /// shrunk when the line would not fit the raster width.
    pub fn rasterize(&self, text: &str, font_size: f32) -> GlyphRaster {
        let mut raster = GlyphRaster::new(self.raster_width, self.raster_height);
        let chars: Vec<char> = text.chars().collect();
        if chars.is_empty() || font_size.is_nan() || font_size <= 0.0 {
            return raster;
        }

        // Cells are narrower than tall so a line reads like a proportional face
        let em_cells = (chars.len() * FONT_CELLS) as f32 * GLYPH_ADVANCE_EM;
        let fit = self.raster_width as f32 / em_cells;
        let cell_h = (font_size / FONT_CELLS as f32).min(fit);
        let cell_w = cell_h * GLYPH_ADVANCE_EM;
        let advance = cell_w * FONT_CELLS as f32;
        let line_width = advance * chars.len() as f32;
        let x0 = (self.raster_width as f32 - line_width) / 2.0;
        let y0 = (self.raster_height as f32 - cell_h * FONT_CELLS as f32) / 2.0;

        for (ci, c) in chars.iter().enumerate() {
            let Some(rows) = glyph_bitmap(*c) else {
                log::debug!("[glyph] no bitmap for {:?}", c);
                continue;
            };
            let gx = x0 + ci as f32 * advance;
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..FONT_CELLS {
                    if bits & (1 << col) == 0 {
                        continue;
                    }
                    raster.fill_rect(
                        gx + col as f32 * cell_w,
                        y0 + row as f32 * cell_h,
                        gx + (col + 1) as f32 * cell_w,
                        y0 + (row + 1) as f32 * cell_h,
                        u8::MAX,
                    );
                }
            }
        }
        raster
    }

    /// Sample lit pixels of `text` into centered, Y-up world coordinates.
    ///
    /// The result is row-major. When it holds more points than `budget`, it
    /// is thinned evenly so the whole string stays covered.
    pub fn sample(&self, text: &str, budget: usize, font_size: f32) -> Vec<Vec2> {
        let raster = self.rasterize(text, font_size);
        let stride = self.stride.max(1);
        let cx = self.raster_width as f32 / 2.0;
        let cy = self.raster_height as f32 / 2.0;

        let mut points = Vec::new();
        for y in (0..raster.height).step_by(stride) {
            for x in (0..raster.width).step_by(stride) {
                if raster.luminance(x, y) > self.threshold {
                    points.push(Vec2::new(
                        (x as f32 - cx) * self.world_scale,
                        -(y as f32 - cy) * self.world_scale,
                    ));
                }
            }
        }

        if points.len() > budget {
            points = thin_evenly(&points, budget);
        }
        log::info!(
            "[glyph] sampled {} points for {:?} at {}px",
            points.len(),
            text,
            font_size
        );
        points
    }
}

fn thin_evenly(points: &[Vec2], keep: usize) -> Vec<Vec2> {
    if keep == 0 {
        return Vec::new();
    }
    (0..keep).map(|i| points[i * points.len() / keep]).collect()
}
