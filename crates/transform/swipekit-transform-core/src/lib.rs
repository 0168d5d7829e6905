//! Swipekit Transform Core (host-agnostic)
//!
//! A reactive transform engine: each watched element carries a set of
//! independently settable transform properties (translation, scale,
//! rotation, skew, origin) backed by change-detecting cells. Any changed
//! write recomposes the element's basis matrix and pushes the rendered
//! `matrix(...)`/`matrix3d(...)` string to the injected render surface.
//! A per-element tween registry advances on `Engine::tick`, so the host's
//! frame callback (or a deterministic [`StepScheduler`] in tests) owns all
//! scheduling.

pub mod cell;
pub mod config;
pub mod ease;
pub mod engine;
pub mod ids;
pub mod matrix;
pub mod outputs;
pub mod props;
pub mod sched;
pub mod scratch;
pub mod surface;

// Re-exports for consumers (view controllers, hosts, fixtures)
pub use cell::Cell;
pub use config::Config;
pub use ease::Ease;
pub use engine::{AnimateOpts, Engine};
pub use ids::{AnimId, ElementId, IdAllocator};
pub use matrix::{Affine2d, Affine3d, Matrix2d, Matrix3d};
pub use outputs::{Change, EngineEvent, Outputs};
pub use props::{OriginValue, Property, PropertyBag};
pub use sched::StepScheduler;
pub use surface::RenderSurface;
