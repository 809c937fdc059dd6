//! Current transformation matrix
//!
//! Canvas-ordered affine matrix `[a b c d e f]`, mapping user space to
//! device space as `x' = a*x + c*y + e`, `y' = b*x + d*y + f`.
//!
//! Canvas transform calls compose on the right: after `scale(); translate();`
//! a user point is translated first and scaled second. [`TransformMatrix::compose`]
//! is that operation. The checked constructors return `None` for non-finite
//! arguments, which canvas calls silently ignore.

/// Affine user-to-device matrix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformMatrix {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl TransformMatrix {
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);

    /// Unchecked, in `setTransform(a, b, c, d, e, f)` argument order
    pub const fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    /// `transform`/`setTransform` arguments; `None` if any is non-finite
    pub fn from_canvas_args(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Option<Self> {
        Self::new(a, b, c, d, e, f).finite()
    }

    /// `translate(x, y)`
    pub fn translation(x: f64, y: f64) -> Option<Self> {
        Self::new(1.0, 0.0, 0.0, 1.0, x, y).finite()
    }

    /// `scale(x, y)`
    pub fn scaling(x: f64, y: f64) -> Option<Self> {
        Self::new(x, 0.0, 0.0, y, 0.0, 0.0).finite()
    }

    /// `rotate(angle)`; positive angles turn clockwise on a y-down surface
    pub fn rotation(angle: f64) -> Option<Self> {
        if !angle.is_finite() {
            return None;
        }
        let (sin, cos) = angle.sin_cos();
        Some(Self::new(cos, sin, -sin, cos, 0.0, 0.0))
    }

    /// `self ∘ incoming`: the CTM after a canvas transform call.
    ///
    /// `incoming` acts on user coordinates first, then `self`.
    pub fn compose(&self, incoming: &Self) -> Self {
        let Self { a, b, c, d, e, f } = *self;
        let m = incoming;
        Self {
            a: a * m.a + c * m.b,
            b: b * m.a + d * m.b,
            c: a * m.c + c * m.d,
            d: b * m.c + d * m.d,
            e: a * m.e + c * m.f + e,
            f: b * m.e + d * m.f + f,
        }
    }

    /// User-space point to device space
    pub fn map_point(&self, x: f64, y: f64) -> (f64, f64) {
        (self.a * x + self.c * y + self.e, self.b * x + self.d * y + self.f)
    }

    pub fn determinant(&self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    /// Device-to-user matrix; `None` when the CTM collapses the plane
    pub fn inverse(&self) -> Option<Self> {
        let det = self.determinant();
        if !det.is_finite() || det.abs() < 1e-10 {
            return None;
        }

        let Self { a, b, c, d, e, f } = *self;
        Some(Self::new(
            d / det,
            -b / det,
            -c / det,
            a / det,
            (c * f - d * e) / det,
            (b * e - a * f) / det,
        ))
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    pub fn is_finite(&self) -> bool {
        [self.a, self.b, self.c, self.d, self.e, self.f]
            .iter()
            .all(|v| v.is_finite())
    }

    fn finite(self) -> Option<Self> {
        self.is_finite().then_some(self)
    }
}

impl Default for TransformMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}
