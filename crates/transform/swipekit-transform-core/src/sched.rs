//! Deterministic tick driver.
//!
//! Production hosts call [`crate::Engine::tick`] straight from their
//! display-synchronized callback with real timestamps. `StepScheduler` is
//! the injectable stand-in for everything else: tests, headless baking,
//! fixed-rate fallbacks — synthetic timestamps advanced one frame at a
//! time, with no threads or timers behind it.

use crate::engine::Engine;
use crate::outputs::Outputs;
use crate::surface::RenderSurface;

/// Sixty-hertz-ish fallback step, matching a 16 ms frame timer.
pub const DEFAULT_STEP_MS: f64 = 16.0;

#[derive(Debug)]
pub struct StepScheduler {
    now_ms: f64,
    step_ms: f64,
}

impl Default for StepScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_STEP_MS)
    }
}

impl StepScheduler {
    /// Start at t=0 with a fixed frame step.
    pub fn new(step_ms: f64) -> Self {
        Self::with_origin(0.0, step_ms)
    }

    /// Start at an arbitrary timestamp — engines only ever see deltas
    /// between ticks, so the origin is free.
    pub fn with_origin(start_ms: f64, step_ms: f64) -> Self {
        Self {
            now_ms: start_ms,
            step_ms,
        }
    }

    /// The timestamp the next tick will carry.
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Tick the engine at the current timestamp, then advance one step.
    /// Returns a snapshot of that tick's outputs.
    pub fn advance<S: RenderSurface>(&mut self, engine: &mut Engine<S>) -> Outputs {
        let outputs = engine.tick(self.now_ms).clone();
        self.now_ms += self.step_ms;
        outputs
    }

    /// Tick until the engine has no active animations, up to `max_ticks`.
    /// Returns the number of ticks executed.
    pub fn run_until_idle<S: RenderSurface>(
        &mut self,
        engine: &mut Engine<S>,
        max_ticks: usize,
    ) -> usize {
        let mut ticks = 0;
        while ticks < max_ticks && engine.has_active_animations() {
            self.advance(engine);
            ticks += 1;
        }
        ticks
    }
}
