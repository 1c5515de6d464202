use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Shape, Stroke as EguiStroke, Vec2, vec2};

use super::{CapStyle, RenderHandle, RenderPrimitive, RenderSurface};
use crate::geometry::distance_to_segment;

/// Retained list of drawn primitives, in drawing order.
///
/// Handles are never reused within one list, including across `clear`.
#[derive(Debug, Default, Clone)]
pub struct DisplayList {
    items: Vec<(RenderHandle, RenderPrimitive)>,
    next_handle: u64,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, handle: RenderHandle) -> Option<&RenderPrimitive> {
        self.items.iter().find(|(h, _)| *h == handle).map(|(_, p)| p)
    }

    pub fn primitives(&self) -> impl Iterator<Item = &RenderPrimitive> {
        self.items.iter().map(|(_, p)| p)
    }

    /// Paints every primitive, offsetting canvas coordinates by `origin`.
    pub fn paint(&self, painter: &Painter, origin: Vec2) {
        for (_, primitive) in &self.items {
            paint_primitive(painter, primitive, origin);
        }
    }

    /// Color of the topmost primitive under `pos`, white if none.
    pub fn color_at(&self, pos: Pos2) -> Color32 {
        self.items
            .iter()
            .rev()
            .find(|(_, p)| hit(p, pos))
            .map(|(_, p)| p.color())
            .unwrap_or(Color32::WHITE)
    }
}

impl RenderSurface for DisplayList {
    fn draw(&mut self, primitive: RenderPrimitive) -> RenderHandle {
        self.next_handle += 1;
        let handle = RenderHandle(self.next_handle);
        self.items.push((handle, primitive));
        handle
    }

    fn delete(&mut self, handle: RenderHandle) {
        self.items.retain(|(h, _)| *h != handle);
    }

    fn clear(&mut self) {
        self.items.clear();
    }
}

fn outline_hit(points: &[Pos2], pos: Pos2, width: f32) -> bool {
    let reach = (width / 2.0).max(1.0);
    points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .any(|(a, b)| distance_to_segment(pos, *a, *b) <= reach)
}

fn rect_corners(r: &Rect) -> [Pos2; 4] {
    [r.left_top(), r.right_top(), r.right_bottom(), r.left_bottom()]
}

fn hit(primitive: &RenderPrimitive, pos: Pos2) -> bool {
    match primitive {
        RenderPrimitive::Line { from, to, width, .. } => {
            distance_to_segment(pos, *from, *to) <= (width / 2.0).max(1.0)
        }
        RenderPrimitive::Rectangle { bbox, width, .. } => {
            outline_hit(&rect_corners(bbox), pos, *width)
        }
        RenderPrimitive::Polygon { points, width, .. } => outline_hit(points, pos, *width),
        RenderPrimitive::Oval { bbox, width, .. } => {
            let radius = bbox.size() / 2.0;
            if radius.x <= 0.0 || radius.y <= 0.0 {
                return outline_hit(&rect_corners(bbox), pos, *width);
            }
            let d = pos - bbox.center();
            let normalized = ((d.x / radius.x).powi(2) + (d.y / radius.y).powi(2)).sqrt();
            (normalized - 1.0).abs() * radius.x.min(radius.y) <= (width / 2.0).max(1.0)
        }
        RenderPrimitive::Text { pos: anchor, text, font_size, .. } => {
            // rough extent of proportional glyphs
            let half = vec2(text.chars().count() as f32 * font_size * 0.3, font_size / 2.0);
            Rect::from_center_size(*anchor, half * 2.0).contains(pos)
        }
        RenderPrimitive::Marker { center, radius, .. } => center.distance(pos) <= *radius,
    }
}

fn paint_primitive(painter: &Painter, primitive: &RenderPrimitive, origin: Vec2) {
    match primitive {
        RenderPrimitive::Line { from, to, color, width, cap } => {
            let (mut a, mut b) = (*from + origin, *to + origin);
            let stroke = EguiStroke::new(*width, *color);
            match cap {
                CapStyle::Butt => {}
                CapStyle::Round => {
                    painter.circle_filled(a, width / 2.0, *color);
                    painter.circle_filled(b, width / 2.0, *color);
                }
                CapStyle::Projecting => {
                    let dir = (b - a).normalized();
                    if dir == Vec2::ZERO {
                        let square = Rect::from_center_size(a, Vec2::splat(*width));
                        painter.rect_filled(square, 0.0, *color);
                        return;
                    }
                    a -= dir * (width / 2.0);
                    b += dir * (width / 2.0);
                }
            }
            painter.line_segment([a, b], stroke);
        }
        RenderPrimitive::Rectangle { bbox, color, width } => {
            painter.rect_stroke(bbox.translate(origin), 0.0, EguiStroke::new(*width, *color));
        }
        RenderPrimitive::Oval { bbox, color, width } => {
            let bbox = bbox.translate(origin);
            let stroke = EguiStroke::new(*width, *color);
            painter.add(Shape::ellipse_stroke(bbox.center(), bbox.size() / 2.0, stroke));
        }
        RenderPrimitive::Polygon { points, color, width } => {
            let points = points.iter().map(|p| *p + origin).collect();
            painter.add(Shape::closed_line(points, EguiStroke::new(*width, *color)));
        }
        RenderPrimitive::Text { pos, text, color, font_size } => {
            painter.text(
                *pos + origin,
                Align2::CENTER_CENTER,
                text,
                FontId::proportional(*font_size),
                *color,
            );
        }
        RenderPrimitive::Marker { center, radius, color } => {
            painter.circle_filled(*center + origin, *radius, *color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    fn line(from: Pos2, to: Pos2, color: Color32) -> RenderPrimitive {
        RenderPrimitive::line(from, to, color, 4.0, CapStyle::Round)
    }

    #[test]
    fn test_handles_are_unique_across_clear() {
        let mut list = DisplayList::new();
        let a = list.draw(line(pos2(0.0, 0.0), pos2(1.0, 1.0), Color32::RED));
        list.clear();
        let b = list.draw(line(pos2(0.0, 0.0), pos2(1.0, 1.0), Color32::RED));
        assert_ne!(a, b);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_delete_by_handle() {
        let mut list = DisplayList::new();
        let a = list.draw(line(pos2(0.0, 0.0), pos2(1.0, 1.0), Color32::RED));
        let b = list.draw(line(pos2(0.0, 0.0), pos2(1.0, 1.0), Color32::BLUE));
        list.delete(a);
        assert!(list.get(a).is_none());
        assert!(list.get(b).is_some());
        list.delete(RenderHandle(999));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_color_at_picks_topmost() {
        let mut list = DisplayList::new();
        list.draw(line(pos2(0.0, 10.0), pos2(100.0, 10.0), Color32::RED));
        list.draw(line(pos2(50.0, 0.0), pos2(50.0, 100.0), Color32::BLUE));
        assert_eq!(list.color_at(pos2(50.0, 10.0)), Color32::BLUE);
        assert_eq!(list.color_at(pos2(20.0, 11.0)), Color32::RED);
        assert_eq!(list.color_at(pos2(20.0, 60.0)), Color32::WHITE);
    }

    #[test]
    fn test_color_at_hits_outlines_only() {
        let mut list = DisplayList::new();
        let bbox = Rect::from_min_max(pos2(10.0, 10.0), pos2(110.0, 60.0));
        list.draw(RenderPrimitive::Rectangle {
            bbox,
            color: Color32::GREEN,
            width: 2.0,
        });
        assert_eq!(list.color_at(pos2(10.0, 30.0)), Color32::GREEN);
        assert_eq!(list.color_at(pos2(60.0, 35.0)), Color32::WHITE);

        list.clear();
        list.draw(RenderPrimitive::Oval {
            bbox,
            color: Color32::GREEN,
            width: 2.0,
        });
        assert_eq!(list.color_at(pos2(110.0, 35.0)), Color32::GREEN);
        assert_eq!(list.color_at(bbox.center()), Color32::WHITE);
    }
}
