use super::Vec2;

/// 2D affine transform, row-vector convention.
///
/// Layout as an augmented 3×3 matrix (last column fixed at `0 0 1`):
///
/// ```text
/// [ a  b  0 ]
/// [ c  d  0 ]
/// [ tx ty 1 ]
/// ```
///
/// Points transform as `p' = p · M`:
/// `x' = a·x + c·y + tx`, `y' = b·x + d·y + ty`.
///
/// Under this convention [`then`](Self::then) is post-concatenation: the
/// receiver applies first, the argument second. With +Y pointing down,
/// positive rotation angles turn clockwise on screen.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Affine {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub tx: f32,
    pub ty: f32,
}

impl Affine {
    pub const IDENTITY: Affine = Affine {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    #[inline]
    pub const fn translation(offset: Vec2) -> Self {
        Affine {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            tx: offset.x,
            ty: offset.y,
        }
    }

    #[inline]
    pub const fn scale(sx: f32, sy: f32) -> Self {
        Affine {
            a: sx,
            b: 0.0,
            c: 0.0,
            d: sy,
            tx: 0.0,
            ty: 0.0,
        }
    }

    /// Rotation about the coordinate origin, in degrees.
    #[inline]
    pub fn rotation_degrees(degrees: f32) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Affine {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            tx: 0.0,
            ty: 0.0,
        }
    }

    /// Composes `self` followed by `next` (post-concatenation).
    ///
    /// `p.transformed_by(self.then(next)) == p.transformed_by(self).transformed_by(next)`
    #[inline]
    #[must_use]
    pub fn then(self, next: Affine) -> Affine {
        Affine {
            a: self.a * next.a + self.b * next.c,
            b: self.a * next.b + self.b * next.d,
            c: self.c * next.a + self.d * next.c,
            d: self.c * next.b + self.d * next.d,
            tx: self.tx * next.a + self.ty * next.c + next.tx,
            ty: self.tx * next.b + self.ty * next.d + next.ty,
        }
    }

    #[inline]
    pub fn transform_point(self, p: Vec2) -> Vec2 {
        Vec2::new(
            self.a * p.x + self.c * p.y + self.tx,
            self.b * p.x + self.d * p.y + self.ty,
        )
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.a.is_finite()
            && self.b.is_finite()
            && self.c.is_finite()
            && self.d.is_finite()
            && self.tx.is_finite()
            && self.ty.is_finite()
    }
}

impl Default for Affine {
    fn default() -> Self {
        Self::IDENTITY
    }
}
