//! Rendered-geometry measurement contract.

use serde::{Deserialize, Serialize};
use swipekit_transform_core::ElementId;

/// A rendered rectangle in viewport coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// Measures an element as currently rendered (transform applied). The
/// host's layout system implements this; tests use a recording fake. The
/// controller queries it at gesture start (pan bound computation) and on
/// double-tap (zoom centering).
pub trait Metrics {
    fn bounding_rect(&self, element: ElementId) -> Rect;
}
