use std::fmt;

use super::{CommandContext, RestoreOptions};
use crate::geometry::Matrix2;
use crate::id_generator::EntityId;
use crate::renderer::{RenderHandle, RenderPrimitive, RenderSurface};
use crate::shape::{Shape, ShapeKind};
use crate::stroke::StrokeRef;

/// A recorded drawing action.
///
/// Shapes are referenced by their stable id; geometry and the current render
/// handle live in the shape table, so transforms never touch history.
#[derive(Clone, PartialEq)]
pub enum Command {
    AddStroke(StrokeRef),
    AddShape(EntityId),
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::AddStroke(stroke) => f
                .debug_struct("AddStroke")
                .field("id", &stroke.id())
                .field("points", &stroke.points().len())
                .finish(),
            Command::AddShape(id) => f.debug_tuple("AddShape").field(id).finish(),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::AddStroke(stroke) => write!(f, "stroke {}", stroke.id()),
            Command::AddShape(id) => write!(f, "shape {}", id),
        }
    }
}

impl Command {
    pub fn entity_id(&self) -> EntityId {
        match self {
            Command::AddStroke(stroke) => stroke.id(),
            Command::AddShape(id) => *id,
        }
    }

    /// Takes the entity off the canvas. Returns false if it was already gone,
    /// e.g. dropped by a clear.
    ///
    /// A stroke is removed from the live list by identity and the entry keeps
    /// the live (possibly transformed) copy, so redo restores what was visible.
    pub(super) fn unapply(&mut self, ctx: &mut CommandContext<'_>) -> bool {
        match self {
            Command::AddStroke(stroke) => {
                match ctx.strokes.iter().position(|s| s.id() == stroke.id()) {
                    Some(index) => {
                        *stroke = ctx.strokes.remove(index);
                        true
                    }
                    None => {
                        log::debug!("Stroke {} was not live", stroke.id());
                        false
                    }
                }
            }
            Command::AddShape(id) => {
                let Some(record) = ctx.shapes.get_mut(*id) else {
                    return false;
                };
                if let Some(handle) = record.handle.take() {
                    ctx.surface.delete(handle);
                }
                std::mem::replace(&mut record.live, false)
            }
        }
    }

    /// Puts the entity back. Shapes are re-rendered and get a new handle.
    pub(super) fn reapply(&self, ctx: &mut CommandContext<'_>) {
        match self {
            Command::AddStroke(stroke) => ctx.strokes.push(stroke.clone()),
            Command::AddShape(id) => {
                let Some(record) = ctx.shapes.get_mut(*id) else {
                    log::warn!("Shape {} missing from registry", id);
                    return;
                };
                let handle = restore_shape(&record.shape, &mut *ctx.surface, ctx.restore);
                record.handle = Some(handle);
                record.live = true;
            }
        }
    }
}

fn restore_shape(
    shape: &Shape,
    surface: &mut dyn RenderSurface,
    opts: RestoreOptions,
) -> RenderHandle {
    if shape.kind == ShapeKind::Rectangle && opts.rotate_rectangles {
        let rotation = opts.last_rotation.unwrap_or(Matrix2::IDENTITY);
        let points = shape
            .corners()
            .iter()
            .map(|c| rotation.apply_about(opts.pivot, *c))
            .collect();
        return surface.draw(RenderPrimitive::Polygon {
            points,
            color: shape.color,
            width: shape.thickness,
        });
    }
    surface.draw(shape.primitive())
}
