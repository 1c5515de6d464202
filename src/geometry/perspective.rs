use egui::{Pos2, pos2};
use thiserror::Error;

/// Errors raised while preparing or running a perspective warp
#[derive(Debug, Error, Clone, PartialEq)]
pub enum WarpError {
    #[error("perspective points are degenerate (three or more are collinear)")]
    Degenerate,

    #[error("expected 4 perspective points, got {0}")]
    WrongPointCount(usize),

    #[error("warp backend failed: {0}")]
    Backend(String),
}

pub type WarpResult<T> = Result<T, WarpError>;

/// 3×3 projective map in homogeneous coordinates, row-major, `m[2][2] == 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveTransform {
    pub m: [[f32; 3]; 3],
}

impl PerspectiveTransform {
    /// Computes the projective map sending each `src[i]` onto `dst[i]`.
    pub fn from_quad(src: &[Pos2], dst: &[Pos2; 4]) -> WarpResult<Self> {
        if src.len() != 4 {
            return Err(WarpError::WrongPointCount(src.len()));
        }

        // Unknowns h0..h7 with h8 = 1:
        //   u = (h0 x + h1 y + h2) / (h6 x + h7 y + 1)
        //   v = (h3 x + h4 y + h5) / (h6 x + h7 y + 1)
        let mut a = [[0.0f64; 9]; 8];
        for (i, (s, d)) in src.iter().zip(dst.iter()).enumerate() {
            let (x, y) = (f64::from(s.x), f64::from(s.y));
            let (u, v) = (f64::from(d.x), f64::from(d.y));
            a[2 * i] = [x, y, 1.0, 0.0, 0.0, 0.0, -u * x, -u * y, u];
            a[2 * i + 1] = [0.0, 0.0, 0.0, x, y, 1.0, -v * x, -v * y, v];
        }

        let h = solve8(&mut a).ok_or(WarpError::Degenerate)?;
        Ok(Self {
            m: [
                [h[0] as f32, h[1] as f32, h[2] as f32],
                [h[3] as f32, h[4] as f32, h[5] as f32],
                [h[6] as f32, h[7] as f32, 1.0],
            ],
        })
    }

    /// Maps the four picked points onto the canvas corners in the order
    /// top-left, top-right, bottom-left, bottom-right.
    pub fn to_canvas(src: &[Pos2], width: f32, height: f32) -> WarpResult<Self> {
        let dst = [pos2(0.0, 0.0), pos2(width, 0.0), pos2(0.0, height), pos2(width, height)];
        Self::from_quad(src, &dst)
    }

    pub fn apply(&self, p: Pos2) -> Pos2 {
        let m = &self.m;
        let w = m[2][0] * p.x + m[2][1] * p.y + m[2][2];
        pos2(
            (m[0][0] * p.x + m[0][1] * p.y + m[0][2]) / w,
            (m[1][0] * p.x + m[1][1] * p.y + m[1][2]) / w,
        )
    }
}

/// Gauss-Jordan with partial pivoting on an 8×9 augmented system.
fn solve8(a: &mut [[f64; 9]; 8]) -> Option<[f64; 8]> {
    const SINGULAR: f64 = 1e-9;

    for col in 0..8 {
        let pivot_row = (col..8).max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))?;
        if a[pivot_row][col].abs() < SINGULAR {
            return None;
        }
        a.swap(col, pivot_row);

        let p = a[col][col];
        for k in col..9 {
            a[col][k] /= p;
        }
        for row in 0..8 {
            if row != col {
                let factor = a[row][col];
                if factor != 0.0 {
                    for k in col..9 {
                        a[row][k] -= factor * a[col][k];
                    }
                }
            }
        }
    }

    let mut out = [0.0; 8];
    for (i, row) in a.iter().enumerate() {
        out[i] = row[8];
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Pos2, b: Pos2) -> bool {
        (a.x - b.x).abs() < 1e-2 && (a.y - b.y).abs() < 1e-2
    }

    #[test]
    fn test_identity_quad() {
        let src = [pos2(0.0, 0.0), pos2(800.0, 0.0), pos2(0.0, 600.0), pos2(800.0, 600.0)];
        let t = PerspectiveTransform::to_canvas(&src, 800.0, 600.0).unwrap();
        assert!(close(t.apply(pos2(123.0, 456.0)), pos2(123.0, 456.0)));
    }

    #[test]
    fn test_skewed_quad_maps_onto_corners() {
        let src = [pos2(50.0, 40.0), pos2(700.0, 90.0), pos2(20.0, 560.0), pos2(760.0, 590.0)];
        let t = PerspectiveTransform::to_canvas(&src, 800.0, 600.0).unwrap();
        assert!(close(t.apply(src[0]), pos2(0.0, 0.0)));
        assert!(close(t.apply(src[1]), pos2(800.0, 0.0)));
        assert!(close(t.apply(src[2]), pos2(0.0, 600.0)));
        assert!(close(t.apply(src[3]), pos2(800.0, 600.0)));
    }

    #[test]
    fn test_collinear_points_are_rejected() {
        let src = [pos2(0.0, 0.0), pos2(10.0, 0.0), pos2(20.0, 0.0), pos2(30.0, 0.0)];
        assert_eq!(
            PerspectiveTransform::to_canvas(&src, 800.0, 600.0),
            Err(WarpError::Degenerate)
        );
    }

    #[test]
    fn test_wrong_point_count() {
        let src = [pos2(0.0, 0.0)];
        assert_eq!(
            PerspectiveTransform::to_canvas(&src, 800.0, 600.0),
            Err(WarpError::WrongPointCount(1))
        );
    }
}
