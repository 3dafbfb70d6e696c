use cgmath::{Angle, Deg, Matrix2, Rad, Vector2};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Point fed to the vertex stage. Only `x` and `y` are uploaded, `z` stays at
/// zero for anything built with [`Vertex::new`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Vertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vertex {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y, z: 0.0 }
    }
}

/// Homogeneous position handed to the rasterizer.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct ClipPosition {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl ClipPosition {
    pub fn magnitude_xy(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

/// How `y'` is derived from the input vertex.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Formula {
    /// `y' = x * sin + y * cos`
    #[default]
    Standard,
    /// `y' = x * sin + x * cos`, the historical variant that reuses `x`.
    /// Not a rotation: vertices with non-zero `y` lose their contribution to `y'`.
    Skewed,
}

#[derive(Debug, Error)]
pub enum RotationError {
    #[error("rotation angle must be finite, got {0}")]
    NonFiniteAngle(f64),
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RotationCoefficients {
    pub cos: f32,
    pub sin: f32,
}

impl RotationCoefficients {
    pub const IDENTITY: Self = Self { cos: 1.0, sin: 0.0 };

    pub fn try_from_degrees(angle: f64) -> Result<Self, RotationError> {
        if !angle.is_finite() {
            return Err(RotationError::NonFiniteAngle(angle));
        }

        Ok(compute_coefficients(angle))
    }

    /// Linear part of the vertex transform for `formula`.
    pub fn matrix(&self, formula: Formula) -> Matrix2<f32> {
        let (c, s) = (self.cos, self.sin);

        // column major
        match formula {
            Formula::Standard => Matrix2::new(c, s, -s, c),
            Formula::Skewed => Matrix2::new(c, s + c, -s, 0.0),
        }
    }
}

/// Cosine and sine of `angle` degrees. Any real angle is accepted, a
/// non-finite one yields NaN coefficients.
pub fn compute_coefficients(angle: f64) -> RotationCoefficients {
    let (sin, cos) = Rad::from(Deg(angle.rem_euclid(360.0))).sin_cos();

    RotationCoefficients {
        cos: cos as f32,
        sin: sin as f32,
    }
}

pub fn rotate(vertex: Vertex, coefficients: RotationCoefficients) -> ClipPosition {
    rotate_with(vertex, coefficients, Formula::Standard)
}

pub fn rotate_with(
    vertex: Vertex,
    coefficients: RotationCoefficients,
    formula: Formula,
) -> ClipPosition {
    let rotated = coefficients.matrix(formula) * Vector2::new(vertex.x, vertex.y);

    ClipPosition {
        x: rotated.x,
        y: rotated.y,
        z: vertex.z,
        w: 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TRIANGLE;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn coefficients_are_unit() {
        for angle in [-720.0, -33.3, 0.0, 12.5, 45.0, 90.0, 181.0, 359.9, 1e6] {
            let c = compute_coefficients(angle);

            assert!(close(c.cos * c.cos + c.sin * c.sin, 1.0), "angle {angle}");
        }
    }

    #[test]
    fn coefficients_at_known_angles() {
        assert_eq!(compute_coefficients(0.0), RotationCoefficients::IDENTITY);

        let c = compute_coefficients(90.0);
        assert!(close(c.cos, 0.0) && close(c.sin, 1.0));

        let c = compute_coefficients(180.0);
        assert!(close(c.cos, -1.0) && close(c.sin, 0.0));

        assert_eq!(compute_coefficients(360.0), compute_coefficients(0.0));
        assert_eq!(compute_coefficients(-90.0), compute_coefficients(270.0));
    }

    #[test]
    fn strict_rejects_non_finite() {
        assert!(RotationCoefficients::try_from_degrees(f64::NAN).is_err());
        assert!(RotationCoefficients::try_from_degrees(f64::INFINITY).is_err());
        assert!(RotationCoefficients::try_from_degrees(90.0).is_ok());
        assert!(compute_coefficients(f64::NAN).cos.is_nan());
    }

    #[test]
    fn quarter_turn_of_unit_x() {
        let unit = RotationCoefficients { cos: 0.0, sin: 1.0 };
        let p = rotate(Vertex::new(1.0, 0.0), unit);

        assert_eq!(
            p,
            ClipPosition {
                x: 0.0,
                y: 1.0,
                z: 0.0,
                w: 1.0
            }
        );
    }

    #[test]
    fn length_preserved() {
        for angle in [0.0, 17.0, 90.0, 123.4, 270.0, 999.0] {
            let p = rotate(Vertex::new(0.0, 0.5), compute_coefficients(angle));

            assert!(close(p.magnitude_xy(), 0.5), "angle {angle}");
            assert_eq!(p.w, 1.0);
        }
    }

    #[test]
    fn full_turn_is_periodic() {
        let a = compute_coefficients(90.0);
        let b = compute_coefficients(90.0 + 360.0);

        for v in TRIANGLE {
            assert_eq!(rotate(v, a), rotate(v, b));
        }
    }

    #[test]
    fn identity_keeps_vertex() {
        let vertices = [
            Vertex::new(0.25, -0.75),
            Vertex { x: -3.0, y: 2.0, z: 0.5 },
            Vertex::new(0.0, 0.0),
        ];

        for v in vertices {
            let p = rotate(v, RotationCoefficients::IDENTITY);

            assert_eq!(
                p,
                ClipPosition {
                    x: v.x,
                    y: v.y,
                    z: v.z,
                    w: 1.0
                }
            );
        }
    }

    #[test]
    fn rotation_preserves_shape() {
        let c = compute_coefficients(37.0);
        let rotated: Vec<_> = TRIANGLE.iter().map(|v| rotate(*v, c)).collect();

        for i in 0..3 {
            let (a, b) = (TRIANGLE[i], TRIANGLE[(i + 1) % 3]);
            let (ra, rb) = (rotated[i], rotated[(i + 1) % 3]);

            let before = ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt();
            let after = ((ra.x - rb.x).powi(2) + (ra.y - rb.y).powi(2)).sqrt();

            assert!(close(before, after));
        }

        assert!(close(cgmath::SquareMatrix::determinant(&c.matrix(Formula::Standard)), 1.0));
    }

    #[test]
    fn skewed_matches_standard_only_at_quarter_turn() {
        let quarter = compute_coefficients(90.0);

        for v in TRIANGLE {
            let a = rotate_with(v, quarter, Formula::Standard);
            let b = rotate_with(v, quarter, Formula::Skewed);

            assert!(close(a.x, b.x) && close(a.y, b.y));
        }

        let eighth = compute_coefficients(45.0);
        let top = TRIANGLE[0];

        let standard = rotate_with(top, eighth, Formula::Standard);
        let skewed = rotate_with(top, eighth, Formula::Skewed);

        assert!(close(standard.y, 0.5 * std::f32::consts::FRAC_1_SQRT_2));
        assert!(close(skewed.y, 0.0));
        assert!(!close(skewed.magnitude_xy(), 0.5));
    }
}
