//! Transform property vocabulary and per-element storage.

use crate::cell::Cell;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The animatable transform properties. `Rotate` is the 2D alias of
/// `RotateZ`; whichever is non-zero wins (see the composers).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Property {
    TranslateX,
    TranslateY,
    TranslateZ,
    ScaleX,
    ScaleY,
    ScaleZ,
    RotateX,
    RotateY,
    RotateZ,
    Rotate,
    SkewX,
    SkewY,
}

impl Property {
    pub const ALL: [Property; 12] = [
        Property::TranslateX,
        Property::TranslateY,
        Property::TranslateZ,
        Property::ScaleX,
        Property::ScaleY,
        Property::ScaleZ,
        Property::RotateX,
        Property::RotateY,
        Property::RotateZ,
        Property::Rotate,
        Property::SkewX,
        Property::SkewY,
    ];

    /// Resting value: scales sit at 1, everything else at 0.
    #[inline]
    pub fn default_value(self) -> f64 {
        match self {
            Property::ScaleX | Property::ScaleY | Property::ScaleZ => 1.0,
            _ => 0.0,
        }
    }

    /// Whether the 2D composer observes this property. Z-axis writes in 2D
    /// mode store and read back but never recompose.
    #[inline]
    pub fn observed_2d(self) -> bool {
        !matches!(
            self,
            Property::TranslateZ | Property::ScaleZ | Property::RotateX | Property::RotateY
        )
    }
}

/// One element's full cell set, at resting values until written.
#[derive(Debug)]
pub struct PropertyBag {
    cells: [Cell<f64>; 12],
}

impl Default for PropertyBag {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertyBag {
    pub fn new() -> Self {
        let mut cells = [Cell::new(0.0); 12];
        for p in Property::ALL {
            cells[p as usize] = Cell::new(p.default_value());
        }
        Self { cells }
    }

    #[inline]
    pub fn get(&self, prop: Property) -> f64 {
        self.cells[prop as usize].get()
    }

    /// Store through the cell; true iff the value changed.
    #[inline]
    pub fn set(&mut self, prop: Property, value: f64) -> bool {
        self.cells[prop as usize].set(value)
    }
}

/// A transform-origin coordinate: keyword, percentage, or pixel length.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum OriginValue {
    Center,
    Left,
    Right,
    Top,
    Bottom,
    Percent(f64),
    Px(f64),
}

impl fmt::Display for OriginValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OriginValue::Center => f.write_str("center"),
            OriginValue::Left => f.write_str("left"),
            OriginValue::Right => f.write_str("right"),
            OriginValue::Top => f.write_str("top"),
            OriginValue::Bottom => f.write_str("bottom"),
            OriginValue::Percent(v) => write!(f, "{v}%"),
            OriginValue::Px(v) => write!(f, "{v}px"),
        }
    }
}
