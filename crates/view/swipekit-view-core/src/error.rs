//! Error types for view construction.

/// Construction-time misuse. Gesture handling itself never fails: unknown
/// elements, out-of-range indices, and stray events degrade to no-ops.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ViewError {
    /// The carousel needs at least one page image.
    #[error("carousel has no page images")]
    NoPages,

    /// Viewport dimensions must be positive finite numbers.
    #[error("viewport must have positive dimensions: {width}x{height}")]
    EmptyViewport { width: f64, height: f64 },
}
