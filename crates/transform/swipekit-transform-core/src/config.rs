//! Core configuration for swipekit-transform-core.

use serde::{Deserialize, Serialize};

/// Engine configuration, fixed for the lifetime of an [`crate::Engine`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Result of the host's one-time 3D transform capability probe.
    /// Selects the `matrix3d(...)` composer path; there is no runtime
    /// switching thereafter.
    pub supports_3d: bool,

    /// Decimal digits trigonometric results are rounded to before entering
    /// the basis matrix. Suppresses float jitter in the rendered string at
    /// near-axis angles.
    pub trig_digits: u32,

    /// Duration applied when an animation is requested without one.
    pub default_duration_ms: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            supports_3d: true,
            trig_digits: 15,
            default_duration_ms: 400.0,
        }
    }
}
