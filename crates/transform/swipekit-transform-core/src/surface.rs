//! Render-surface contract.

use crate::ids::ElementId;

/// The rendering substrate the engine writes into. One composed transform
/// string and one origin string per watched element per recomposition;
/// the strings use the platform transform-function syntax
/// (`matrix(a,b,c,d,e,f)` or the sixteen-parameter `matrix3d(...)`, and
/// `"<x> <y> <z>"` for origins).
///
/// Hosts implement this over their DOM bridge, retained-scene node table,
/// or a recording fake in tests. The engine calls synchronously from the
/// writing thread; implementations must not block.
pub trait RenderSurface {
    fn set_transform(&mut self, element: ElementId, transform: &str);
    fn set_origin(&mut self, element: ElementId, origin: &str);
}
