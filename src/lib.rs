#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod color;
pub mod command;
pub mod components;
pub mod config;
pub mod document;
pub mod error;
pub mod geometry;
pub mod id_generator;
pub mod input;
pub mod panels;
pub mod renderer;
pub mod shape;
pub mod state;
pub mod stroke;
pub mod text;
pub mod tools;

pub use app::SketchApp;
pub use command::{Command, CommandHistory, HistoryError};
pub use config::{ConfigError, SketchConfig};
pub use document::Document;
pub use error::{CaptureError, TransitionError};
pub use id_generator::EntityId;
pub use input::InputEvent;
pub use renderer::{DisplayList, RenderSurface, Renderer};
pub use shape::{Shape, ShapeKind};
pub use state::{EditorContext, EditorResponse, EditorState, Effect};
pub use stroke::{BrushStyle, Stroke};
pub use tools::{Tool, ToolSettings};
