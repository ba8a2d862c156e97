//! Signature capture surface: input normalization, stroke smoothing, ink raster and export.

/// PNG data-URI export.
pub mod export;
/// Page integration hooks (pointer capture, scroll lock).
pub mod host;
/// Device-tagged input samples.
pub mod input;
pub(crate) mod raster;
/// Stroke buffering and smoothing.
pub mod stroke;
/// The capture surface and its capability trait.
pub mod surface;

pub use raster::ResizePolicy;
