pub mod color;
pub mod commands;
pub mod theme;
pub mod types;

pub use color::{Color, ColorParseError, Rgba};
pub use commands::{RenderCommand, TextAlign, VerticalAlign};
pub use theme::{Palette, ThemeToken};
pub use types::{Point, Rect, Viewport};
