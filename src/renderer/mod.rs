//! Render primitives, the surface they are drawn onto, and the brush algorithms
//! that turn strokes into primitives.

mod brush;
mod display_list;

use egui::{Color32, Pos2, Rect};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fmt;

pub use brush::{segment_primitives, stroke_primitives};
pub use display_list::DisplayList;

use crate::shape::{Shape, ShapeKind};
use crate::stroke::Stroke;
use crate::text::TextItem;

/// Opaque reference to a primitive drawn on a [`RenderSurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RenderHandle(pub u64);

impl fmt::Display for RenderHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "h{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapStyle {
    Round,
    Butt,
    /// Square cap extending half a width past each endpoint.
    Projecting,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderPrimitive {
    Line {
        from: Pos2,
        to: Pos2,
        color: Color32,
        width: f32,
        cap: CapStyle,
    },
    Rectangle {
        bbox: Rect,
        color: Color32,
        width: f32,
    },
    Oval {
        bbox: Rect,
        color: Color32,
        width: f32,
    },
    /// Closed outline through `points`.
    Polygon {
        points: Vec<Pos2>,
        color: Color32,
        width: f32,
    },
    Text {
        pos: Pos2,
        text: String,
        color: Color32,
        font_size: f32,
    },
    /// Filled dot, used for perspective point markers.
    Marker {
        center: Pos2,
        radius: f32,
        color: Color32,
    },
}

impl RenderPrimitive {
    pub fn line(from: Pos2, to: Pos2, color: Color32, width: f32, cap: CapStyle) -> Self {
        Self::Line {
            from,
            to,
            color,
            width,
            cap,
        }
    }

    pub fn color(&self) -> Color32 {
        match self {
            Self::Line { color, .. }
            | Self::Rectangle { color, .. }
            | Self::Oval { color, .. }
            | Self::Polygon { color, .. }
            | Self::Text { color, .. }
            | Self::Marker { color, .. } => *color,
        }
    }
}

/// Anything primitives can be drawn onto.
pub trait RenderSurface {
    /// Draws `primitive` and returns a handle for later deletion.
    fn draw(&mut self, primitive: RenderPrimitive) -> RenderHandle;

    /// Removes a previously drawn primitive. Unknown handles are ignored.
    fn delete(&mut self, handle: RenderHandle);

    /// Removes everything.
    fn clear(&mut self);
}

/// Turns document entities into primitives on a surface.
///
/// Owns the random source used by the jittered brushes.
#[derive(Debug)]
pub struct Renderer {
    rng: StdRng,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Renderer {
    /// A fixed `seed` makes brush jitter reproducible.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    /// Draws one segment of an in-progress or finished stroke.
    pub fn draw_segment(
        &mut self,
        surface: &mut dyn RenderSurface,
        stroke: &Stroke,
        from: Pos2,
        to: Pos2,
    ) -> Vec<RenderHandle> {
        segment_primitives(stroke, from, to, &mut self.rng)
            .into_iter()
            .map(|p| surface.draw(p))
            .collect()
    }

    pub fn draw_stroke(
        &mut self,
        surface: &mut dyn RenderSurface,
        stroke: &Stroke,
    ) -> Vec<RenderHandle> {
        stroke_primitives(stroke, &mut self.rng)
            .into_iter()
            .map(|p| surface.draw(p))
            .collect()
    }

    pub fn draw_shape(&self, surface: &mut dyn RenderSurface, shape: &Shape) -> RenderHandle {
        surface.draw(shape.primitive())
    }

    pub fn draw_text(&self, surface: &mut dyn RenderSurface, text: &TextItem) -> RenderHandle {
        surface.draw(RenderPrimitive::Text {
            pos: text.pos,
            text: text.text.clone(),
            color: text.color,
            font_size: text.font_size,
        })
    }
}

/// The primitive for a shape of `kind` spanning `start`..`end`.
pub fn shape_primitive(
    kind: ShapeKind,
    start: Pos2,
    end: Pos2,
    color: Color32,
    width: f32,
) -> RenderPrimitive {
    match kind {
        ShapeKind::Rectangle => RenderPrimitive::Rectangle {
            bbox: Rect::from_two_pos(start, end),
            color,
            width,
        },
        ShapeKind::Circle => RenderPrimitive::Oval {
            bbox: Rect::from_two_pos(start, end),
            color,
            width,
        },
        ShapeKind::Line => RenderPrimitive::line(start, end, color, width, CapStyle::Butt),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id_generator::EntityId;
    use crate::stroke::BrushStyle;
    use egui::pos2;

    #[test]
    fn test_shape_primitive_per_kind() {
        let (a, b) = (pos2(30.0, 30.0), pos2(10.0, 10.0));
        let bbox = Rect::from_min_max(b, a);
        assert_eq!(
            shape_primitive(ShapeKind::Rectangle, a, b, Color32::RED, 2.0),
            RenderPrimitive::Rectangle {
                bbox,
                color: Color32::RED,
                width: 2.0,
            }
        );
        assert_eq!(
            shape_primitive(ShapeKind::Circle, a, b, Color32::RED, 2.0),
            RenderPrimitive::Oval {
                bbox,
                color: Color32::RED,
                width: 2.0,
            }
        );
        // lines keep their direction
        assert_eq!(
            shape_primitive(ShapeKind::Line, a, b, Color32::RED, 2.0),
            RenderPrimitive::line(a, b, Color32::RED, 2.0, CapStyle::Butt)
        );
    }

    #[test]
    fn test_seeded_renderers_agree() {
        let stroke = Stroke::new(
            EntityId(1),
            vec![pos2(0.0, 0.0), pos2(5.0, 5.0), pos2(9.0, 2.0)],
            Color32::BLACK,
            3.0,
            1.0,
            BrushStyle::Watercolor,
        );
        let mut first = DisplayList::new();
        let mut second = DisplayList::new();
        Renderer::new(Some(9)).draw_stroke(&mut first, &stroke);
        Renderer::new(Some(9)).draw_stroke(&mut second, &stroke);
        assert_eq!(first.primitives().collect::<Vec<_>>(), second.primitives().collect::<Vec<_>>());
        assert_eq!(first.len(), 8);
    }
}
