//! Reusable per-tick buffers.

use crate::ids::AnimId;
use crate::props::Property;

/// Scratch space for one element's tick pass: the writes its records
/// produced this frame, and the records that expired. Reused across
/// elements and frames to keep steady-state ticks allocation-free.
#[derive(Debug, Default)]
pub struct Scratch {
    pub(crate) writes: Vec<(Property, f64)>,
    pub(crate) finished: Vec<AnimId>,
}

impl Scratch {
    #[inline]
    pub fn begin_frame(&mut self) {
        self.writes.clear();
        self.finished.clear();
    }
}
