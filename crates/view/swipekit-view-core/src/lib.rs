//! Swipekit View Core
//!
//! The carousel's gesture state machine: interprets normalized touch
//! events (press-move, swipe, pinch, double-tap) into property writes and
//! tween requests against a [`swipekit_transform_core::Engine`], keeping
//! pan/zoom inside elastic boundaries and slide-to-index navigation
//! settled. Every decision is a pure function of current scale, current
//! translation, and the incoming delta — no persisted gesture history.

pub mod error;
pub mod gesture;
pub mod metrics;
pub mod view;

pub use error::ViewError;
pub use gesture::{GestureEvent, SwipeDirection};
pub use metrics::{Metrics, Rect};
pub use view::{View, ViewConfig};
