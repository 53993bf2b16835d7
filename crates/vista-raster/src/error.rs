//! Raster error types.

/// Errors raised when exporting a framebuffer.
#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    /// The framebuffer has a zero dimension and cannot be encoded.
    #[error("cannot export an empty {width}x{height} framebuffer")]
    EmptyFramebuffer { width: u32, height: u32 },

    /// Encoding or writing the image failed.
    #[error("failed to write image: {0}")]
    ImageError(#[source] image::ImageError),
}
