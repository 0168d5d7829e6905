//! Basis matrix composers.
//!
//! Each recomposition rebuilds the basis from scratch (never incrementally
//! mutated across frames, so no drift) by right-multiplying elementary
//! matrices in a fixed order:
//!
//! - 2D: translate → scale → skew → rotate
//! - 3D: translate → scale → rotateX → rotateY → rotateZ → skew
//!
//! That order is a render-parity contract, not a style choice. Elementary
//! steps whose values are all defaults are skipped; the product is
//! mathematically identical. Angles are degrees; trigonometric results are
//! rounded to a configurable number of decimal digits to keep near-axis
//! rotations from leaking float dust into the rendered string.

const DEG: f64 = std::f64::consts::PI / 180.0;

/// Round `value` to `digits` decimal digits.
#[inline]
pub(crate) fn fix(value: f64, digits: u32) -> f64 {
    let n = 10f64.powi(digits as i32);
    (value * n).round() / n
}

/// Rounded sines can leave a negative zero behind; flush it so the
/// rendered string says "0", never "-0".
#[inline]
fn fmt_component(v: f64) -> String {
    if v == 0.0 {
        "0".to_string()
    } else {
        v.to_string()
    }
}

/// The 2D property snapshot a composer consumes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Affine2d {
    pub translate_x: f64,
    pub translate_y: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    pub skew_x: f64,
    pub skew_y: f64,
    /// 2D rotation; takes precedence over `rotate_z` when non-zero.
    pub rotate: f64,
    pub rotate_z: f64,
}

impl Default for Affine2d {
    fn default() -> Self {
        Self {
            translate_x: 0.0,
            translate_y: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            skew_x: 0.0,
            skew_y: 0.0,
            rotate: 0.0,
            rotate_z: 0.0,
        }
    }
}

/// The 3D property snapshot a composer consumes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Affine3d {
    pub translate_x: f64,
    pub translate_y: f64,
    pub translate_z: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    pub scale_z: f64,
    pub rotate_x: f64,
    pub rotate_y: f64,
    pub rotate_z: f64,
    /// 2D alias; used for the z rotation when `rotate_z` is zero.
    pub rotate: f64,
    pub skew_x: f64,
    pub skew_y: f64,
}

impl Default for Affine3d {
    fn default() -> Self {
        Self {
            translate_x: 0.0,
            translate_y: 0.0,
            translate_z: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            scale_z: 1.0,
            rotate_x: 0.0,
            rotate_y: 0.0,
            rotate_z: 0.0,
            rotate: 0.0,
            skew_x: 0.0,
            skew_y: 0.0,
        }
    }
}

/// 3×3 accumulator exporting the six-parameter `matrix(...)` form.
#[derive(Debug)]
pub struct Matrix2d {
    basis: [f64; 9],
    out: [f64; 6],
}

impl Default for Matrix2d {
    fn default() -> Self {
        Self::new()
    }
}

impl Matrix2d {
    pub fn new() -> Self {
        Self {
            basis: IDENT3,
            out: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
        }
    }

    pub fn reset(&mut self) -> &mut Self {
        self.basis = IDENT3;
        self.out = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];
        self
    }

    /// basis = basis × rhs (row-major).
    fn mul(&mut self, rhs: &[f64; 9]) {
        let a = self.basis;
        let mut out = [0.0; 9];
        for r in 0..3 {
            for c in 0..3 {
                let mut acc = 0.0;
                for k in 0..3 {
                    acc += a[r * 3 + k] * rhs[k * 3 + c];
                }
                out[r * 3 + c] = acc;
            }
        }
        self.basis = out;
    }

    /// Apply the fixed 2D order. `digits` is the trig rounding precision.
    pub fn compose(&mut self, t: &Affine2d, digits: u32) -> &mut Self {
        let rotation = if t.rotate != 0.0 { t.rotate } else { t.rotate_z };
        let r = rotation * DEG;
        let cos = fix(r.cos(), digits);
        let sin = fix(r.sin(), digits);
        let tan_x = fix((t.skew_x * DEG).tan(), digits);
        let tan_y = fix((t.skew_y * DEG).tan(), digits);

        if t.translate_x != 0.0 || t.translate_y != 0.0 {
            self.mul(&[
                1.0, 0.0, t.translate_x, //
                0.0, 1.0, t.translate_y, //
                0.0, 0.0, 1.0,
            ]);
        }

        if t.scale_x != 1.0 || t.scale_y != 1.0 {
            self.mul(&[
                t.scale_x, 0.0, 0.0, //
                0.0, t.scale_y, 0.0, //
                0.0, 0.0, 1.0,
            ]);
        }

        if t.skew_x != 0.0 || t.skew_y != 0.0 {
            self.mul(&[
                1.0, tan_x, 0.0, //
                tan_y, 1.0, 0.0, //
                0.0, 0.0, 1.0,
            ]);
        }

        if rotation != 0.0 {
            self.mul(&[
                cos, -sin, 0.0, //
                sin, cos, 0.0, //
                0.0, 0.0, 1.0,
            ]);
        }

        // Column-major render order: a b c d e f
        self.out = [
            self.basis[0],
            self.basis[3],
            self.basis[1],
            self.basis[4],
            self.basis[2],
            self.basis[5],
        ];
        self
    }

    /// The flat `[a, b, c, d, e, f]` list in render order.
    pub fn components(&self) -> &[f64; 6] {
        &self.out
    }

    pub fn render(&self) -> String {
        let parts: Vec<String> = self.out.iter().map(|&v| fmt_component(v)).collect();
        format!("matrix({})", parts.join(","))
    }
}

/// 4×4 accumulator exporting the sixteen-parameter `matrix3d(...)` form.
#[derive(Debug)]
pub struct Matrix3d {
    basis: [f64; 16],
    out: [f64; 16],
}

impl Default for Matrix3d {
    fn default() -> Self {
        Self::new()
    }
}

impl Matrix3d {
    pub fn new() -> Self {
        Self {
            basis: IDENT4,
            out: IDENT4,
        }
    }

    pub fn reset(&mut self) -> &mut Self {
        self.basis = IDENT4;
        self.out = IDENT4;
        self
    }

    fn mul(&mut self, rhs: &[f64; 16]) {
        let a = self.basis;
        let mut out = [0.0; 16];
        for r in 0..4 {
            for c in 0..4 {
                let mut acc = 0.0;
                for k in 0..4 {
                    acc += a[r * 4 + k] * rhs[k * 4 + c];
                }
                out[r * 4 + c] = acc;
            }
        }
        self.basis = out;
    }

    /// Apply the fixed 3D order. `digits` is the trig rounding precision.
    pub fn compose(&mut self, t: &Affine3d, digits: u32) -> &mut Self {
        let rx = t.rotate_x * DEG;
        let cos_x = fix(rx.cos(), digits);
        let sin_x = fix(rx.sin(), digits);
        let ry = t.rotate_y * DEG;
        let cos_y = fix(ry.cos(), digits);
        let sin_y = fix(ry.sin(), digits);
        let rotation_z = if t.rotate_z != 0.0 { t.rotate_z } else { t.rotate };
        let rz = rotation_z * DEG;
        let cos_z = fix(rz.cos(), digits);
        // Negated so positive angles read as clockwise, matching the 2D form.
        let sin_z = fix((-rz).sin(), digits);
        let tan_x = fix((t.skew_x * DEG).tan(), digits);
        let tan_y = fix((t.skew_y * DEG).tan(), digits);

        if t.translate_x != 0.0 || t.translate_y != 0.0 || t.translate_z != 0.0 {
            self.mul(&[
                1.0, 0.0, 0.0, t.translate_x, //
                0.0, 1.0, 0.0, t.translate_y, //
                0.0, 0.0, 1.0, t.translate_z, //
                0.0, 0.0, 0.0, 1.0,
            ]);
        }

        if t.scale_x != 1.0 || t.scale_y != 1.0 || t.scale_z != 1.0 {
            self.mul(&[
                t.scale_x, 0.0, 0.0, 0.0, //
                0.0, t.scale_y, 0.0, 0.0, //
                0.0, 0.0, t.scale_z, 0.0, //
                0.0, 0.0, 0.0, 1.0,
            ]);
        }

        if t.rotate_x != 0.0 {
            self.mul(&[
                1.0, 0.0, 0.0, 0.0, //
                0.0, cos_x, sin_x, 0.0, //
                0.0, -sin_x, cos_x, 0.0, //
                0.0, 0.0, 0.0, 1.0,
            ]);
        }

        if t.rotate_y != 0.0 {
            self.mul(&[
                cos_y, 0.0, sin_y, 0.0, //
                0.0, 1.0, 0.0, 0.0, //
                -sin_y, 0.0, cos_y, 0.0, //
                0.0, 0.0, 0.0, 1.0,
            ]);
        }

        if rotation_z != 0.0 {
            self.mul(&[
                cos_z, sin_z, 0.0, 0.0, //
                -sin_z, cos_z, 0.0, 0.0, //
                0.0, 0.0, 1.0, 0.0, //
                0.0, 0.0, 0.0, 1.0,
            ]);
        }

        if t.skew_x != 0.0 || t.skew_y != 0.0 {
            self.mul(&[
                1.0, tan_x, 0.0, 0.0, //
                tan_y, 1.0, 0.0, 0.0, //
                0.0, 0.0, 1.0, 0.0, //
                0.0, 0.0, 0.0, 1.0,
            ]);
        }

        // Transpose into column-major render order.
        for r in 0..4 {
            for c in 0..4 {
                self.out[c * 4 + r] = self.basis[r * 4 + c];
            }
        }
        self
    }

    /// The flat sixteen-element list in render order.
    pub fn components(&self) -> &[f64; 16] {
        &self.out
    }

    pub fn render(&self) -> String {
        let parts: Vec<String> = self.out.iter().map(|&v| fmt_component(v)).collect();
        format!("matrix3d({})", parts.join(","))
    }
}

const IDENT3: [f64; 9] = [
    1.0, 0.0, 0.0, //
    0.0, 1.0, 0.0, //
    0.0, 0.0, 1.0,
];

const IDENT4: [f64; 16] = [
    1.0, 0.0, 0.0, 0.0, //
    0.0, 1.0, 0.0, 0.0, //
    0.0, 0.0, 1.0, 0.0, //
    0.0, 0.0, 0.0, 1.0,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translate_only_is_identity_plus_offsets() {
        let mut m = Matrix2d::new();
        m.reset().compose(
            &Affine2d {
                translate_x: 12.0,
                translate_y: -7.5,
                ..Affine2d::default()
            },
            15,
        );
        assert_eq!(m.components(), &[1.0, 0.0, 0.0, 1.0, 12.0, -7.5]);
    }

    #[test]
    fn defaults_compose_to_identity() {
        let mut m = Matrix2d::new();
        m.reset().compose(&Affine2d::default(), 15);
        assert_eq!(m.render(), "matrix(1,0,0,1,0,0)");

        let mut m3 = Matrix3d::new();
        m3.reset().compose(&Affine3d::default(), 15);
        assert_eq!(m3.components(), &IDENT4);
    }

    #[test]
    fn quarter_turn_rounds_clean() {
        // cos 90° is ~6.1e-17 before rounding; 15 digits flushes it to zero.
        let mut m = Matrix2d::new();
        m.reset().compose(
            &Affine2d {
                rotate: 90.0,
                ..Affine2d::default()
            },
            15,
        );
        assert_eq!(m.components(), &[0.0, 1.0, -1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn rotate_falls_back_to_rotate_z() {
        let mut a = Matrix2d::new();
        a.reset().compose(
            &Affine2d {
                rotate_z: 30.0,
                ..Affine2d::default()
            },
            15,
        );
        let mut b = Matrix2d::new();
        b.reset().compose(
            &Affine2d {
                rotate: 30.0,
                ..Affine2d::default()
            },
            15,
        );
        assert_eq!(a.components(), b.components());
    }

    #[test]
    fn scale_then_translate_order() {
        // translate applied first, scale second: offsets stay unscaled.
        let mut m = Matrix2d::new();
        m.reset().compose(
            &Affine2d {
                translate_x: 10.0,
                scale_x: 2.0,
                scale_y: 2.0,
                ..Affine2d::default()
            },
            15,
        );
        assert_eq!(m.components(), &[2.0, 0.0, 0.0, 2.0, 10.0, 0.0]);
    }

    #[test]
    fn skew_45_rounds_to_one() {
        let mut m = Matrix2d::new();
        m.reset().compose(
            &Affine2d {
                skew_x: 45.0,
                ..Affine2d::default()
            },
            15,
        );
        // c term carries tan(skewX) in render order
        assert_eq!(m.components(), &[1.0, 0.0, 1.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn translate3d_lands_in_last_column() {
        let mut m = Matrix3d::new();
        m.reset().compose(
            &Affine3d {
                translate_x: 4.0,
                translate_y: 5.0,
                translate_z: 6.0,
                ..Affine3d::default()
            },
            15,
        );
        let c = m.components();
        assert_eq!(&c[12..16], &[4.0, 5.0, 6.0, 1.0]);
        assert_eq!(c[0], 1.0);
        assert_eq!(c[5], 1.0);
        assert_eq!(c[10], 1.0);
    }

    #[test]
    fn rotate_z_3d_is_clockwise_negated() {
        let mut m = Matrix3d::new();
        m.reset().compose(
            &Affine3d {
                rotate_z: 90.0,
                ..Affine3d::default()
            },
            15,
        );
        let c = m.components();
        // b1 carries the positive sine, matching the 2D matrix(0,1,-1,0,..)
        assert_eq!(c[1], 1.0);
        assert_eq!(c[4], -1.0);
        assert_eq!(c[0], 0.0);
        assert_eq!(c[5], 0.0);
    }

    #[test]
    fn lower_precision_coarsens_rounding() {
        let mut hi = Matrix2d::new();
        hi.reset().compose(
            &Affine2d {
                rotate: 30.0,
                ..Affine2d::default()
            },
            15,
        );
        let mut lo = Matrix2d::new();
        lo.reset().compose(
            &Affine2d {
                rotate: 30.0,
                ..Affine2d::default()
            },
            2,
        );
        assert_eq!(lo.components()[1], 0.5); // sin 30° exact at 2 digits
        assert!((hi.components()[0] - lo.components()[0]).abs() < 0.01);
    }
}
