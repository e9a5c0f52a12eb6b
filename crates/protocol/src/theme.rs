use serde::{Deserialize, Serialize};

use crate::color::{Color, Rgba};

/// Semantic color tokens for figure chrome, resolved by the active palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeToken {
    FigureBackground,
    PanelBackground,
    PanelBorder,
    GridLine,
    TickMark,
    TickText,
    AxisLabel,
}

/// Color cycle plus chrome colors used to resolve symbolic [`Color`]s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub name: String,
    pub cycle: Vec<Rgba>,
    pub figure_background: Rgba,
    pub panel_background: Rgba,
    pub panel_border: Rgba,
    pub grid_line: Rgba,
    pub tick_text: Rgba,
    pub axis_label: Rgba,
}

impl Palette {
    /// The ggplot look: grey panels, white grid, seven-color cycle.
    pub fn ggplot() -> Self {
        Self {
            name: "ggplot".to_string(),
            cycle: vec![
                Rgba::rgb(0xe2, 0x4a, 0x33),
                Rgba::rgb(0x34, 0x8a, 0xbd),
                Rgba::rgb(0x98, 0x8e, 0xd5),
                Rgba::rgb(0x77, 0x77, 0x77),
                Rgba::rgb(0xfb, 0xc1, 0x5e),
                Rgba::rgb(0x8e, 0xba, 0x42),
                Rgba::rgb(0xff, 0xb5, 0xb8),
            ],
            figure_background: Rgba::WHITE,
            panel_background: Rgba::rgb(0xe5, 0xe5, 0xe5),
            panel_border: Rgba::WHITE,
            grid_line: Rgba::WHITE,
            tick_text: Rgba::rgb(0x55, 0x55, 0x55),
            axis_label: Rgba::rgb(0x55, 0x55, 0x55),
        }
    }

    /// The classic ten-color cycle on white panels.
    pub fn tab10() -> Self {
        Self {
            name: "tab10".to_string(),
            cycle: vec![
                Rgba::rgb(0x1f, 0x77, 0xb4),
                Rgba::rgb(0xff, 0x7f, 0x0e),
                Rgba::rgb(0x2c, 0xa0, 0x2c),
                Rgba::rgb(0xd6, 0x27, 0x28),
                Rgba::rgb(0x94, 0x67, 0xbd),
                Rgba::rgb(0x8c, 0x56, 0x4b),
                Rgba::rgb(0xe3, 0x77, 0xc2),
                Rgba::rgb(0x7f, 0x7f, 0x7f),
                Rgba::rgb(0xbc, 0xbd, 0x22),
                Rgba::rgb(0x17, 0xbe, 0xcf),
            ],
            figure_background: Rgba::WHITE,
            panel_background: Rgba::WHITE,
            panel_border: Rgba::BLACK,
            grid_line: Rgba::rgb(0xb0, 0xb0, 0xb0),
            tick_text: Rgba::BLACK,
            axis_label: Rgba::BLACK,
        }
    }

    /// Look up a palette by name (`ggplot` or `tab10`).
    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "ggplot" => Some(Self::ggplot()),
            "tab10" => Some(Self::tab10()),
            _ => None,
        }
    }

    /// Number of slots in the color cycle.
    pub fn len(&self) -> usize {
        self.cycle.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cycle.is_empty()
    }

    /// Resolve a symbolic color. Cycle slots wrap around the palette length.
    pub fn resolve(&self, color: Color) -> Rgba {
        match color {
            Color::Rgba(rgba) => rgba,
            Color::Cycle(n) => {
                if self.cycle.is_empty() {
                    Rgba::BLACK
                } else {
                    self.cycle[usize::from(n) % self.cycle.len()]
                }
            }
            Color::Theme(token) => match token {
                ThemeToken::FigureBackground => self.figure_background,
                ThemeToken::PanelBackground => self.panel_background,
                ThemeToken::PanelBorder => self.panel_border,
                ThemeToken::GridLine => self.grid_line,
                ThemeToken::TickMark | ThemeToken::TickText => self.tick_text,
                ThemeToken::AxisLabel => self.axis_label,
            },
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::ggplot()
    }
}
