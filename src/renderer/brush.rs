use egui::{Pos2, Vec2, vec2};
use rand::Rng;

use super::{CapStyle, RenderPrimitive};
use crate::color::blend_with_white;
use crate::stroke::{BrushStyle, Stroke};

fn jitter<R: Rng + ?Sized>(rng: &mut R, spread: i32) -> Vec2 {
    vec2(
        rng.gen_range(-spread..=spread) as f32,
        rng.gen_range(-spread..=spread) as f32,
    )
}

/// Emits the primitives for one segment of `stroke` using its brush.
///
/// Jittered brushes draw several offset copies; offsets are whole units.
pub fn segment_primitives<R: Rng + ?Sized>(
    stroke: &Stroke,
    from: Pos2,
    to: Pos2,
    rng: &mut R,
) -> Vec<RenderPrimitive> {
    let color = stroke.color();
    let width = stroke.thickness();

    match stroke.brush() {
        BrushStyle::Round => {
            vec![RenderPrimitive::line(from, to, color, width, CapStyle::Round)]
        }
        BrushStyle::Marker => {
            vec![RenderPrimitive::line(from, to, color, width, CapStyle::Projecting)]
        }
        BrushStyle::Watercolor => (0..4)
            .map(|_| {
                let o = jitter(rng, 3);
                let w = width * rng.gen_range(0.3f32..1.2);
                // lower opacity pushes the wash further toward white
                let u: f32 = rng.gen_range(0.5..0.8);
                let c = blend_with_white(color, u + (1.0 - u) * (1.0 - stroke.opacity()));
                RenderPrimitive::line(from + o, to + o, c, w, CapStyle::Round)
            })
            .collect(),
        BrushStyle::Pencil => (0..2)
            .map(|_| {
                let o = jitter(rng, 1);
                RenderPrimitive::line(from + o, to + o, color, width * 0.7, CapStyle::Round)
            })
            .collect(),
        BrushStyle::Charcoal => (0..3)
            .map(|_| {
                let o = jitter(rng, 2);
                RenderPrimitive::line(from + o, to + o, color, width, CapStyle::Butt)
            })
            .collect(),
    }
}

/// All segments of a stroke, in path order. Fewer than two points emit nothing.
pub fn stroke_primitives<R: Rng + ?Sized>(stroke: &Stroke, rng: &mut R) -> Vec<RenderPrimitive> {
    stroke
        .points()
        .windows(2)
        .flat_map(|w| segment_primitives(stroke, w[0], w[1], rng))
        .collect()
}
