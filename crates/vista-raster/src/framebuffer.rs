//! A CPU pixel buffer of packed `0xAARRGGBB` pixels.

use std::path::Path;

use image::{RgbaImage, imageops};
use tracing::debug;

use crate::color::Rgb;
use crate::error::RasterError;

/// Row-major framebuffer of packed `0xAARRGGBB` pixels.
///
/// The layout matches what windowing surfaces such as `minifb` expect, so a
/// frame can be presented by handing over [`pixels`](Self::pixels) as is.
#[derive(Clone, Debug, Default)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl Framebuffer {
    /// Create an opaque black framebuffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0xFF00_0000; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [u32] {
        &mut self.pixels
    }

    /// Reallocate to a new size. Previous contents are discarded.
    pub fn resize(&mut self, width: u32, height: u32) {
        if (width, height) == (self.width, self.height) {
            return;
        }
        debug!(width, height, "framebuffer resized");
        *self = Self::new(width, height);
    }

    /// Linear index of `(x, y)`, or `None` when out of bounds.
    #[inline]
    pub fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| y as usize * self.width as usize + x as usize)
    }

    /// Packed pixel at `(x, y)`.
    pub fn get(&self, x: u32, y: u32) -> Option<u32> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Color at `(x, y)`.
    pub fn color_at(&self, x: u32, y: u32) -> Option<Rgb> {
        self.get(x, y).map(Rgb::from_argb)
    }

    /// Write one pixel. Out-of-bounds writes are ignored.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, color: Rgb) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color.to_argb();
        }
    }

    /// Fill the whole buffer with one color.
    pub fn fill(&mut self, color: Rgb) {
        self.pixels.fill(color.to_argb());
    }

    /// Fill with a vertical linear gradient from `top` (row 0) to `bottom`
    /// (last row).
    pub fn fill_vertical_gradient(&mut self, top: Rgb, bottom: Rgb) {
        let width = self.width as usize;
        if width == 0 {
            return;
        }
        let span = self.height.saturating_sub(1).max(1) as f64;
        for (y, row) in self.pixels.chunks_exact_mut(width).enumerate() {
            row.fill(top.lerp(bottom, y as f64 / span).to_argb());
        }
    }

    /// Alpha-blend `color` over the pixel at `(x, y)`. `alpha` is clamped to
    /// `[0, 1]`; out-of-bounds coordinates are ignored.
    #[inline]
    pub fn blend(&mut self, x: i64, y: i64, color: Rgb, alpha: f64) {
        if x < 0 || y < 0 {
            return;
        }
        let Some(i) = self.index(x as u32, y as u32) else {
            return;
        };
        let alpha = alpha.clamp(0.0, 1.0);
        let under = Rgb::from_argb(self.pixels[i]);
        self.pixels[i] = under.lerp(color, alpha).to_argb();
    }

    /// Alpha-blend a filled disc centred on `(cx, cy)`.
    ///
    /// A pixel is covered when its centre lies within `radius`.
    pub fn fill_disc(&mut self, cx: f64, cy: f64, radius: f64, color: Rgb, alpha: f64) {
        if !cx.is_finite() || !cy.is_finite() || radius <= 0.0 {
            return;
        }
        let r2 = radius * radius;
        let x0 = (cx - radius).floor() as i64;
        let x1 = (cx + radius).ceil() as i64;
        let y0 = (cy - radius).floor() as i64;
        let y1 = (cy + radius).ceil() as i64;
        for y in y0..=y1 {
            let dy = y as f64 + 0.5 - cy;
            for x in x0..=x1 {
                let dx = x as f64 + 0.5 - cx;
                if dx * dx + dy * dy <= r2 {
                    self.blend(x, y, color, alpha);
                }
            }
        }
    }

    /// Scale this buffer onto `target` with bilinear filtering.
    ///
    /// The softening is intentional: it hides the blockiness of a
    /// low-resolution source. Does nothing when either buffer is empty.
    pub fn upscale_into(&self, target: &mut Framebuffer) {
        if self.is_empty() || target.is_empty() {
            return;
        }
        let Some(source) = self.to_rgba_image() else {
            return;
        };
        let scaled = imageops::resize(
            &source,
            target.width,
            target.height,
            imageops::FilterType::Triangle,
        );
        for (dst, px) in target.pixels.iter_mut().zip(scaled.pixels()) {
            let [r, g, b, _] = px.0;
            *dst = 0xFF00_0000 | ((r as u32) << 16) | ((g as u32) << 8) | b as u32;
        }
    }

    /// Convert to an RGBA8 image.
    pub fn to_rgba_image(&self) -> Option<RgbaImage> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for &p in &self.pixels {
            bytes.extend_from_slice(&[(p >> 16) as u8, (p >> 8) as u8, p as u8, 0xFF]);
        }
        RgbaImage::from_raw(self.width, self.height, bytes)
    }

    /// Encode the framebuffer as a PNG at `path`.
    pub fn save_png(&self, path: &Path) -> Result<(), RasterError> {
        let empty = RasterError::EmptyFramebuffer {
            width: self.width,
            height: self.height,
        };
        if self.is_empty() {
            return Err(empty);
        }
        let image = self.to_rgba_image().ok_or(empty)?;
        image
            .save_with_format(path, image::ImageFormat::Png)
            .map_err(RasterError::ImageError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_has_correct_size() {
        let fb = Framebuffer::new(64, 32);
        assert_eq!(fb.dimensions(), (64, 32));
        assert_eq!(fb.pixels().len(), 64 * 32);
    }

    #[test]
    fn test_out_of_bounds_access_is_ignored() {
        let mut fb = Framebuffer::new(4, 4);
        fb.set(4, 0, Rgb::WHITE);
        fb.set(0, 4, Rgb::WHITE);
        fb.blend(-1, 2, Rgb::WHITE, 1.0);
        assert!(fb.pixels().iter().all(|&p| p == 0xFF00_0000));
        assert_eq!(fb.get(4, 4), None);
    }

    #[test]
    fn test_resize_discards_contents() {
        let mut fb = Framebuffer::new(2, 2);
        fb.fill(Rgb::WHITE);
        fb.resize(3, 5);
        assert_eq!(fb.pixels().len(), 15);
        assert!(fb.pixels().iter().all(|&p| p == 0xFF00_0000));
    }

    #[test]
    fn test_zero_size_framebuffer() {
        let mut fb = Framebuffer::new(0, 0);
        assert!(fb.is_empty());
        fb.fill_vertical_gradient(Rgb::BLACK, Rgb::WHITE);
        fb.fill_disc(0.0, 0.0, 2.0, Rgb::WHITE, 1.0);
    }

    #[test]
    fn test_vertical_gradient_endpoints() {
        let mut fb = Framebuffer::new(3, 11);
        let top = Rgb::new(0.0, 0.0, 100.0);
        let bottom = Rgb::new(200.0, 0.0, 0.0);
        fb.fill_vertical_gradient(top, bottom);
        assert_eq!(fb.color_at(1, 0), Some(top));
        assert_eq!(fb.color_at(1, 10), Some(bottom));
        assert_eq!(fb.color_at(0, 5), Some(Rgb::new(100.0, 0.0, 50.0)));
    }

    #[test]
    fn test_blend_half_alpha() {
        let mut fb = Framebuffer::new(1, 1);
        fb.blend(0, 0, Rgb::new(200.0, 100.0, 50.0), 0.5);
        assert_eq!(fb.color_at(0, 0), Some(Rgb::new(100.0, 50.0, 25.0)));
    }

    #[test]
    fn test_disc_covers_centre_only_for_small_radius() {
        let mut fb = Framebuffer::new(9, 9);
        fb.fill_disc(4.5, 4.5, 1.2, Rgb::WHITE, 1.0);
        assert_eq!(fb.color_at(4, 4), Some(Rgb::WHITE));
        assert_eq!(fb.color_at(3, 4), Some(Rgb::WHITE));
        assert_eq!(fb.color_at(3, 3), Some(Rgb::BLACK));
        assert_eq!(fb.color_at(0, 0), Some(Rgb::BLACK));
    }

    #[test]
    fn test_upscale_fills_target_with_uniform_source_color() {
        let mut small = Framebuffer::new(4, 3);
        small.fill(Rgb::new(40.0, 80.0, 120.0));
        let mut big = Framebuffer::new(24, 18);
        small.upscale_into(&mut big);
        assert!(big.pixels().iter().all(|&p| p == small.pixels()[0]));
    }

    #[test]
    fn test_save_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        let mut fb = Framebuffer::new(8, 8);
        fb.fill(Rgb::new(10.0, 20.0, 30.0));
        fb.save_png(&path).unwrap();
        let decoded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (8, 8));
        assert_eq!(decoded.get_pixel(3, 3).0, [10, 20, 30, 255]);
    }

    #[test]
    fn test_save_empty_png_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let fb = Framebuffer::new(0, 4);
        assert!(fb.save_png(&dir.path().join("empty.png")).is_err());
    }
}
