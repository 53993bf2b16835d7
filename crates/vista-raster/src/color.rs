//! Three-channel color value type.

/// An RGB color with channels nominally in `[0, 255]`.
///
/// Channels are kept fractional and unclamped while blending; clamping to
/// `[0, 255]` happens only when the color is packed into a framebuffer
/// pixel (see [`Rgb::to_argb`]).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::new(255.0, 255.0, 255.0);

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Channel-wise linear blend toward `other`.
    #[inline]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }

    /// Like [`lerp`](Self::lerp) but rounds every channel to a whole value,
    /// the way palette colors are quantized before they are reused.
    #[inline]
    pub fn lerp_rounded(self, other: Self, t: f64) -> Self {
        self.lerp(other, t).rounded()
    }

    /// Round each channel half away from zero.
    #[inline]
    pub fn rounded(self) -> Self {
        Self::new(self.r.round(), self.g.round(), self.b.round())
    }

    /// Multiply every channel by `k`.
    #[inline]
    pub fn scale(self, k: f64) -> Self {
        Self::new(self.r * k, self.g * k, self.b * k)
    }

    /// Clamp every channel to `[0, 255]`.
    #[inline]
    pub fn clamped(self) -> Self {
        Self::new(
            self.r.clamp(0.0, 255.0),
            self.g.clamp(0.0, 255.0),
            self.b.clamp(0.0, 255.0),
        )
    }

    /// Cap every channel at 255 without touching the lower bound.
    #[inline]
    pub fn min_255(self) -> Self {
        Self::new(self.r.min(255.0), self.g.min(255.0), self.b.min(255.0))
    }

    /// Squared Euclidean distance between two colors.
    pub fn distance_sq(self, other: Self) -> f64 {
        let (dr, dg, db) = (self.r - other.r, self.g - other.g, self.b - other.b);
        dr * dr + dg * dg + db * db
    }

    /// Pack into an opaque `0xAARRGGBB` pixel. Channels are clamped to
    /// `[0, 255]` and truncated.
    #[inline]
    pub fn to_argb(self) -> u32 {
        let c = self.clamped();
        0xFF00_0000 | ((c.r as u32) << 16) | ((c.g as u32) << 8) | (c.b as u32)
    }

    /// Unpack the color channels of a `0xAARRGGBB` pixel.
    #[inline]
    pub fn from_argb(pixel: u32) -> Self {
        Self::new(
            ((pixel >> 16) & 0xFF) as f64,
            ((pixel >> 8) & 0xFF) as f64,
            (pixel & 0xFF) as f64,
        )
    }

    /// `true` when every channel lies in `[0, 255]`.
    pub fn in_range(self) -> bool {
        [self.r, self.g, self.b]
            .iter()
            .all(|c| (0.0..=255.0).contains(c))
    }
}
