use timeline_cat_protocol::{
    Point, Rect, RenderCommand, TextAlign, ThemeToken, VerticalAlign, Viewport,
};

use super::ticks::{format_tick, nice_step, nice_ticks};
use super::{Artist, Figure, PanelId};

// Subplot placement as fractions of the canvas.
const SUBPLOT_LEFT: f64 = 0.125;
const SUBPLOT_RIGHT: f64 = 0.9;
const SUBPLOT_BOTTOM: f64 = 0.11;
const SUBPLOT_TOP: f64 = 0.88;
/// Vertical gap between panels, relative to the panel height.
const SUBPLOT_HSPACE: f64 = 0.2;

const FONT_SIZE: f64 = 10.0;
const TICK_LENGTH: f64 = 4.0;
const TICK_PAD: f64 = 3.0;
const LABEL_PAD: f64 = 6.0;
/// Rough glyph width used to keep the y label clear of tick labels.
const CHAR_WIDTH: f64 = 6.0;
const MIN_X_TICK_SPACING_PX: f64 = 60.0;

/// Maps data coordinates of one panel to pixels.
struct Transform {
    frame: Rect,
    x_lo: f64,
    x_hi: f64,
    y_lo: f64,
    y_hi: f64,
}

/// Position of `v` within `[lo, hi]` as a fraction, computed on halved values
/// so that limits near `f64::MAX` do not overflow. An empty range maps to the
/// middle.
fn fraction(v: f64, lo: f64, hi: f64) -> f64 {
    let span = hi / 2.0 - lo / 2.0;
    if span > 0.0 {
        (v / 2.0 - lo / 2.0) / span
    } else {
        0.5
    }
}

impl Transform {
    fn x(&self, x: f64) -> f64 {
        self.frame.x + fraction(x, self.x_lo, self.x_hi) * self.frame.w
    }

    /// Data y grows upwards, pixel y grows downwards.
    fn y(&self, y: f64) -> f64 {
        self.frame.bottom() - fraction(y, self.y_lo, self.y_hi) * self.frame.h
    }
}

impl Figure {
    /// Pixel frames of every panel, top to bottom.
    pub fn panel_frames(&self, viewport: &Viewport) -> Vec<Rect> {
        let n = self.axes.len();
        if n == 0 {
            return Vec::new();
        }
        let left = viewport.x + viewport.width * SUBPLOT_LEFT;
        let width = viewport.width * (SUBPLOT_RIGHT - SUBPLOT_LEFT);
        let top = viewport.y + viewport.height * (1.0 - SUBPLOT_TOP);
        let total = viewport.height * (SUBPLOT_TOP - SUBPLOT_BOTTOM);
        let height = total / (n as f64 + (n as f64 - 1.0) * SUBPLOT_HSPACE);
        let pitch = height * (1.0 + SUBPLOT_HSPACE);
        (0..n)
            .map(|i| Rect::new(left, top + i as f64 * pitch, width, height))
            .collect()
    }

    /// Render the figure into pixel-space commands for `viewport`.
    pub fn render(&self, viewport: &Viewport) -> Vec<RenderCommand> {
        let mut commands = Vec::with_capacity(
            self.axes.iter().map(|a| a.artists.len() + 32).sum::<usize>() + 1,
        );

        commands.push(RenderCommand::DrawRect {
            rect: Rect::new(viewport.x, viewport.y, viewport.width, viewport.height),
            color: ThemeToken::FigureBackground.into(),
            border_color: None,
            label: None,
        });

        for (i, frame) in self.panel_frames(viewport).into_iter().enumerate() {
            self.render_panel(PanelId(i), frame, &mut commands);
        }

        commands
    }

    fn render_panel(&self, id: PanelId, frame: Rect, commands: &mut Vec<RenderCommand>) {
        let Some(axes) = self.axes(id) else {
            return;
        };
        let (x_lo, x_hi) = self.x_limits(id);
        let (y_lo, y_hi) = self.y_limits(id);
        let tf = Transform {
            frame,
            x_lo,
            x_hi,
            y_lo,
            y_hi,
        };

        commands.push(RenderCommand::BeginGroup {
            id: format!("panel-{}", id.0),
            label: axes.ylabel.clone(),
        });

        commands.push(RenderCommand::DrawRect {
            rect: frame,
            color: ThemeToken::PanelBackground.into(),
            border_color: Some(ThemeToken::PanelBorder.into()),
            label: None,
        });

        // X grid, ticks and (optionally) labels
        let max_x_ticks = (frame.w / MIN_X_TICK_SPACING_PX).max(2.0) as usize;
        let x_step = nice_step(x_lo, x_hi, max_x_ticks);
        for t in nice_ticks(x_lo, x_hi, max_x_ticks) {
            let x = tf.x(t);
            commands.push(RenderCommand::DrawLine {
                from: Point::new(x, frame.y),
                to: Point::new(x, frame.bottom()),
                color: ThemeToken::GridLine.into(),
                width: 1.0,
            });
            commands.push(RenderCommand::DrawLine {
                from: Point::new(x, frame.bottom()),
                to: Point::new(x, frame.bottom() + TICK_LENGTH),
                color: ThemeToken::TickMark.into(),
                width: 1.0,
            });
            if axes.xticklabels_visible {
                commands.push(RenderCommand::DrawText {
                    position: Point::new(x, frame.bottom() + TICK_LENGTH + TICK_PAD),
                    text: format_tick(t, x_step),
                    color: ThemeToken::TickText.into(),
                    font_size: FONT_SIZE,
                    align: TextAlign::Center,
                    valign: VerticalAlign::Top,
                    rotation: 0.0,
                });
            }
        }

        // Y grid, ticks and labels
        let mut widest_label = 0usize;
        for (n, &t) in axes.yticks.iter().enumerate() {
            if t < y_lo || t > y_hi {
                continue;
            }
            let y = tf.y(t);
            commands.push(RenderCommand::DrawLine {
                from: Point::new(frame.x, y),
                to: Point::new(frame.right(), y),
                color: ThemeToken::GridLine.into(),
                width: 1.0,
            });
            commands.push(RenderCommand::DrawLine {
                from: Point::new(frame.x - TICK_LENGTH, y),
                to: Point::new(frame.x, y),
                color: ThemeToken::TickMark.into(),
                width: 1.0,
            });
            let text = axes
                .yticklabels
                .get(n)
                .cloned()
                .unwrap_or_else(|| format_tick(t, 1.0));
            widest_label = widest_label.max(text.chars().count());
            commands.push(RenderCommand::DrawText {
                position: Point::new(frame.x - TICK_LENGTH - TICK_PAD, y),
                text,
                color: ThemeToken::TickText.into(),
                font_size: FONT_SIZE,
                align: TextAlign::Right,
                valign: VerticalAlign::Center,
                rotation: 0.0,
            });
        }

        commands.push(RenderCommand::SetClip { rect: frame });
        for artist in &axes.artists {
            if let Some(cmd) = render_artist(artist, &tf) {
                commands.push(cmd);
            }
        }
        commands.push(RenderCommand::ClearClip);

        if let Some(ylabel) = &axes.ylabel {
            let x = frame.x
                - TICK_LENGTH
                - TICK_PAD
                - widest_label as f64 * CHAR_WIDTH
                - LABEL_PAD;
            commands.push(RenderCommand::DrawText {
                position: Point::new(x, frame.center().y),
                text: ylabel.clone(),
                color: ThemeToken::AxisLabel.into(),
                font_size: FONT_SIZE * 1.2,
                align: TextAlign::Center,
                valign: VerticalAlign::Bottom,
                rotation: 90.0,
            });
        }

        commands.push(RenderCommand::EndGroup);
    }
}

fn render_artist(artist: &Artist, tf: &Transform) -> Option<RenderCommand> {
    match artist {
        Artist::Span {
            x,
            y1,
            y2,
            color,
            label,
        } => {
            let (x0, x1) = (x[0].min(x[1]), x[0].max(x[1]));
            // Outside the visible x range
            if x1 < tf.x_lo || x0 > tf.x_hi {
                return None;
            }
            let left = tf.x(x0);
            let right = tf.x(x1);
            let top = tf.y(y1.max(*y2));
            let bottom = tf.y(y1.min(*y2));
            Some(RenderCommand::DrawRect {
                rect: Rect::new(left, top, right - left, bottom - top),
                color: *color,
                border_color: None,
                label: label.clone(),
            })
        }
        Artist::Label {
            x,
            y,
            text,
            color,
            align,
            valign,
        } => {
            if *x < tf.x_lo || *x > tf.x_hi {
                return None;
            }
            Some(RenderCommand::DrawText {
                position: Point::new(tf.x(*x), tf.y(*y)),
                text: text.clone(),
                color: *color,
                font_size: FONT_SIZE,
                align: *align,
                valign: *valign,
                rotation: 0.0,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use timeline_cat_protocol::Color;

    fn is_chrome(color: Color) -> bool {
        matches!(color, Color::Theme(_))
    }

    fn two_panel_figure() -> Figure {
        let mut fig = Figure::new(8.0, 6.0, 96.0);
        let top = fig.add_subplot(None);
        let bottom = fig.add_subplot(Some(top));
        for id in [top, bottom] {
            if let Some(axes) = fig.axes_mut(id) {
                axes.fill_between([0.0, 1.0], 0.0, 3.0, Color::Cycle(0), None);
                axes.text(
                    0.5,
                    1.5,
                    "A",
                    Color::BLACK,
                    TextAlign::Center,
                    VerticalAlign::Center,
                );
                axes.set_yticks(&[1.5]);
                axes.set_yticklabels(&["s1"]);
            }
        }
        if let Some(axes) = fig.axes_mut(top) {
            axes.set_ylabel("c1");
            axes.set_xticklabels_visible(false);
        }
        fig
    }

    #[test]
    fn panel_frames_stack_without_overlap() {
        let fig = two_panel_figure();
        let frames = fig.panel_frames(&Viewport::new(768.0, 576.0));
        assert_eq!(frames.len(), 2);
        assert!(frames[0].bottom() < frames[1].y);
        assert_eq!(frames[0].x, frames[1].x);
        assert_eq!(frames[0].w, frames[1].w);
        assert!((frames[1].bottom() - 576.0 * (1.0 - SUBPLOT_BOTTOM)).abs() < 1e-9);
    }

    #[test]
    fn one_group_per_panel() {
        let cmds = two_panel_figure().render(&Viewport::new(768.0, 576.0));
        let groups: Vec<_> = cmds
            .iter()
            .filter_map(|c| match c {
                RenderCommand::BeginGroup { id, .. } => Some(id.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(groups, vec!["panel-0", "panel-1"]);
        let ends = cmds
            .iter()
            .filter(|c| matches!(c, RenderCommand::EndGroup))
            .count();
        assert_eq!(ends, 2);
    }

    #[test]
    fn span_maps_into_its_frame() {
        let fig = two_panel_figure();
        let vp = Viewport::new(768.0, 576.0);
        let frames = fig.panel_frames(&vp);
        let cmds = fig.render(&vp);
        let spans: Vec<Rect> = cmds
            .iter()
            .filter_map(|c| match c {
                RenderCommand::DrawRect { rect, color, .. } if !is_chrome(*color) => Some(*rect),
                _ => None,
            })
            .collect();
        assert_eq!(spans.len(), 2);
        for (span, frame) in spans.iter().zip(&frames) {
            assert!(span.x > frame.x && span.right() < frame.right());
            assert!(span.y > frame.y && span.bottom() < frame.bottom());
        }
    }

    #[test]
    fn hidden_x_labels_are_not_emitted() {
        let fig = two_panel_figure();
        let vp = Viewport::new(768.0, 576.0);
        let frames = fig.panel_frames(&vp);
        let cmds = fig.render(&vp);
        let x_labels_below = |frame: &Rect| {
            cmds.iter()
                .filter(|c| {
                    matches!(c, RenderCommand::DrawText { position, valign: VerticalAlign::Top, .. }
                        if position.y > frame.bottom() && position.y < frame.bottom() + 20.0)
                })
                .count()
        };
        assert_eq!(x_labels_below(&frames[0]), 0);
        assert!(x_labels_below(&frames[1]) > 0);
    }

    #[test]
    fn ylabel_is_rotated() {
        let cmds = two_panel_figure().render(&Viewport::new(768.0, 576.0));
        assert!(cmds.iter().any(|c| matches!(
            c,
            RenderCommand::DrawText { text, rotation, .. } if text == "c1" && *rotation == 90.0
        )));
    }

    #[test]
    fn empty_figure_renders_background_only() {
        let cmds = Figure::new(8.0, 6.0, 96.0).render(&Viewport::new(768.0, 576.0));
        assert_eq!(cmds.len(), 1);
    }
}
