//! Normalized gesture event contract.
//!
//! The low-level recognizer (external) reduces raw touches to these
//! events. The controller assumes nothing about pointer count or raw
//! coordinates beyond the fields here: per-dispatch drag deltas, a coarse
//! swipe direction, a pinch factor relative to gesture start, and tap
//! coordinates in viewport space.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum SwipeDirection {
    Left,
    Right,
    Up,
    Down,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GestureEvent {
    /// A finger went down; a gesture begins.
    Start,
    /// Two quick taps; coordinates of the second tap.
    DoubleTap { x: f64, y: f64 },
    /// Finger dragging; movement since the previous press-move dispatch.
    /// The controller applies each delta additively to the panned element.
    PressMove { dx: f64, dy: f64 },
    /// A fast directional release.
    Swipe {
        direction: SwipeDirection,
        dx: f64,
        dy: f64,
    },
    /// Two-finger spread/squeeze; scale relative to gesture start.
    Pinch { scale: f64 },
    /// All fingers lifted; the gesture ends.
    End,
}
