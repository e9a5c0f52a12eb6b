use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::types::{Point, Rect};

/// A single, stateless render instruction in pixel space.
///
/// `Figure::render` emits a `Vec<RenderCommand>`; renderers consume the list
/// sequentially and each command carries all the data it needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RenderCommand {
    /// Draw a filled rectangle, optionally with a tooltip label.
    DrawRect {
        rect: Rect,
        color: Color,
        border_color: Option<Color>,
        label: Option<String>,
    },

    /// Draw a text string anchored at a position.
    ///
    /// `rotation` is in degrees, counter-clockwise, around `position`.
    DrawText {
        position: Point,
        text: String,
        color: Color,
        font_size: f64,
        align: TextAlign,
        valign: VerticalAlign,
        rotation: f64,
    },

    /// Draw a line segment.
    DrawLine {
        from: Point,
        to: Point,
        color: Color,
        width: f64,
    },

    /// Restrict subsequent drawing to a rectangular region.
    SetClip { rect: Rect },

    /// Remove the active clip region.
    ClearClip,

    /// Begin a logical group (one panel of the figure).
    BeginGroup { id: String, label: Option<String> },

    /// End the current group.
    EndGroup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerticalAlign {
    Top,
    Center,
    Bottom,
}
