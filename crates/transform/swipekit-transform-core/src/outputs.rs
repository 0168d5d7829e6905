//! Output contracts from the engine.
//!
//! Outputs carry the property writes observed since the last tick began,
//! plus discrete lifecycle events. View controllers and hosts read them
//! for bookkeeping; the render surface has already been written by the
//! time they are visible.

use serde::{Deserialize, Serialize};

use crate::ids::{AnimId, ElementId};
use crate::props::Property;

/// One observed property write.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Change {
    pub element: ElementId,
    pub prop: Property,
    pub value: f64,
}

/// Discrete animation lifecycle signals.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum EngineEvent {
    /// The record reached its end values — either naturally at expiry or
    /// through `stop(el, true)`.
    AnimationFinished { element: ElementId, anim: AnimId },
    /// The record was cancelled mid-flight; properties froze at their last
    /// interpolated values.
    AnimationInterrupted { element: ElementId, anim: AnimId },
}

/// Accumulated changes and events. Cleared at the start of every
/// `Engine::tick`; writes and events from out-of-tick calls (`set`,
/// `stop`) accumulate until the next tick clears them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Outputs {
    #[serde(default)]
    pub changes: Vec<Change>,
    #[serde(default)]
    pub events: Vec<EngineEvent>,
}

impl Outputs {
    #[inline]
    pub fn clear(&mut self) {
        self.changes.clear();
        self.events.clear();
    }

    #[inline]
    pub fn push_change(&mut self, change: Change) {
        self.changes.push(change);
    }

    #[inline]
    pub fn push_event(&mut self, event: EngineEvent) {
        self.events.push(event);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty() && self.events.is_empty()
    }
}
