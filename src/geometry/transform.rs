use egui::{Pos2, Vec2};

/// A 2×2 linear map stored row-major.
///
/// Constructed per transform command, applied to a batch of points, then dropped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix2 {
    pub m: [[f32; 2]; 2],
}

impl Matrix2 {
    pub const IDENTITY: Matrix2 = Matrix2 {
        m: [[1.0, 0.0], [0.0, 1.0]],
    };

    pub const fn new(m: [[f32; 2]; 2]) -> Self {
        Self { m }
    }

    /// Matrix-vector product.
    pub fn mul_vec(&self, v: Vec2) -> Vec2 {
        Vec2::new(
            self.m[0][0] * v.x + self.m[0][1] * v.y,
            self.m[1][0] * v.x + self.m[1][1] * v.y,
        )
    }

    /// Applies the map to `point` as seen from `pivot`, then translates back.
    pub fn apply_about(&self, pivot: Pos2, point: Pos2) -> Pos2 {
        pivot + self.mul_vec(point - pivot)
    }
}

impl Default for Matrix2 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Standard counter-clockwise rotation (math orientation, y up).
pub fn rotation_matrix(angle_degrees: f32) -> Matrix2 {
    // Evaluate the trig in f64 so that 360° lands on the identity within f32 precision.
    let radians = f64::from(angle_degrees).to_radians();
    let (sin, cos) = (radians.sin() as f32, radians.cos() as f32);
    Matrix2::new([[cos, -sin], [sin, cos]])
}

pub fn scale_matrix(sx: f32, sy: f32) -> Matrix2 {
    Matrix2::new([[sx, 0.0], [0.0, sy]])
}

pub fn shear_matrix(shx: f32, shy: f32) -> Matrix2 {
    Matrix2::new([[1.0, shx], [shy, 1.0]])
}

pub fn apply_transform(matrix: &Matrix2, point: Pos2) -> Pos2 {
    matrix.mul_vec(point.to_vec2()).to_pos2()
}

pub fn apply_transform_all(matrix: &Matrix2, points: &[Pos2]) -> Vec<Pos2> {
    points.iter().map(|p| apply_transform(matrix, *p)).collect()
}

/// Pivot-relative variant of [`apply_transform_all`]: shift, map, shift back.
pub fn apply_transform_about(matrix: &Matrix2, pivot: Pos2, points: &[Pos2]) -> Vec<Pos2> {
    points.iter().map(|p| matrix.apply_about(pivot, *p)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    const EPS: f32 = 1e-3;

    fn close(a: Pos2, b: Pos2) -> bool {
        (a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS
    }

    #[test]
    fn test_rotation_preserves_length() {
        let p = pos2(37.0, -12.5);
        for angle in [0.0, 13.0, 45.0, 90.0, 181.0, 270.0, -33.0, 719.0] {
            let r = apply_transform(&rotation_matrix(angle), p);
            assert!((r.to_vec2().length() - p.to_vec2().length()).abs() < EPS, "angle {angle}");
        }
    }

    #[test]
    fn test_rotation_inverse_is_identity() {
        let p = pos2(250.0, 140.0);
        for angle in [15.0, 90.0, 123.4, 300.0] {
            let there = apply_transform(&rotation_matrix(angle), p);
            let back = apply_transform(&rotation_matrix(-angle), there);
            assert!(close(back, p), "angle {angle}: {back:?}");
        }
    }

    #[test]
    fn test_full_turn_is_identity() {
        let m = rotation_matrix(360.0);
        for p in [pos2(1.0, 0.0), pos2(400.0, 300.0), pos2(-800.0, 5.0)] {
            assert!(close(apply_transform(&m, p), p));
        }
    }

    #[test]
    fn test_quarter_turn_is_counter_clockwise() {
        let r = apply_transform(&rotation_matrix(90.0), pos2(10.0, 0.0));
        assert!(close(r, pos2(0.0, 10.0)));
    }

    #[test]
    fn test_scale_and_shear() {
        assert_eq!(apply_transform(&scale_matrix(2.0, 3.0), pos2(1.0, 1.0)), pos2(2.0, 3.0));
        assert_eq!(apply_transform(&shear_matrix(1.0, 0.0), pos2(1.0, 2.0)), pos2(3.0, 2.0));
        assert_eq!(apply_transform(&shear_matrix(0.0, 0.5), pos2(2.0, 2.0)), pos2(2.0, 3.0));
    }

    #[test]
    fn test_batch_preserves_order() {
        let pts = [pos2(1.0, 0.0), pos2(2.0, 0.0), pos2(3.0, 0.0)];
        let out = apply_transform_all(&scale_matrix(2.0, 2.0), &pts);
        assert_eq!(out, vec![pos2(2.0, 0.0), pos2(4.0, 0.0), pos2(6.0, 0.0)]);
    }

    #[test]
    fn test_about_pivot_keeps_pivot_fixed() {
        let pivot = pos2(400.0, 300.0);
        let pts = [pivot, pos2(410.0, 300.0)];
        let out = apply_transform_about(&rotation_matrix(90.0), pivot, &pts);
        assert!(close(out[0], pivot));
        assert!(close(out[1], pos2(400.0, 310.0)));
    }
}
