//! Plane geometry for the sketch canvas: 2×2 linear maps for rotate/scale/shear
//! and the projective map used by perspective correction.

mod perspective;
mod transform;

pub use perspective::{PerspectiveTransform, WarpError, WarpResult};
pub use transform::{
    Matrix2, apply_transform, apply_transform_about, apply_transform_all, rotation_matrix,
    scale_matrix, shear_matrix,
};

/// Shortest distance from `p` to the segment `a`–`b`.
pub fn distance_to_segment(p: egui::Pos2, a: egui::Pos2, b: egui::Pos2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_sq();
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}
