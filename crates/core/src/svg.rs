//! SVG renderer: converts `RenderCommand` lists into standalone SVG strings.

use std::fmt::Write;

use timeline_cat_protocol::{
    Palette, RenderCommand, TextAlign, VerticalAlign, Viewport,
};

use crate::figure::Figure;

/// Render a list of commands as an SVG document string.
///
/// `width` and `height` define the SVG viewBox dimensions; symbolic colors are
/// resolved against `palette`.
pub fn render_svg(commands: &[RenderCommand], width: f64, height: f64, palette: &Palette) -> String {
    let mut svg = String::with_capacity(commands.len() * 160);
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {width} {height}" width="{width}" height="{height}" style="font-family:system-ui,-apple-system,sans-serif">"#,
    );

    let mut clip_id = 0usize;
    let mut clip_open = false;

    for cmd in commands {
        match cmd {
            RenderCommand::DrawRect {
                rect,
                color,
                border_color,
                label,
            } => {
                let fill = palette.resolve(*color).to_hex();
                let _ = write!(
                    svg,
                    r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{fill}""#,
                    rect.x, rect.y, rect.w, rect.h,
                );
                if let Some(border) = border_color {
                    let _ = write!(svg, r#" stroke="{}""#, palette.resolve(*border).to_hex());
                }
                match label {
                    Some(label) => {
                        let _ = write!(svg, "><title>{}</title></rect>", escape_xml(label));
                    }
                    None => svg.push_str("/>"),
                }
            }
            RenderCommand::DrawLine {
                from,
                to,
                color,
                width: line_width,
            } => {
                let stroke = palette.resolve(*color).to_hex();
                let _ = write!(
                    svg,
                    r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{stroke}" stroke-width="{line_width}"/>"#,
                    from.x, from.y, to.x, to.y,
                );
            }
            RenderCommand::DrawText {
                position,
                text,
                color,
                font_size,
                align,
                valign,
                rotation,
            } => {
                let fill = palette.resolve(*color).to_hex();
                let anchor = match align {
                    TextAlign::Left => "start",
                    TextAlign::Center => "middle",
                    TextAlign::Right => "end",
                };
                let baseline = match valign {
                    VerticalAlign::Top => "hanging",
                    VerticalAlign::Center => "central",
                    VerticalAlign::Bottom => "alphabetic",
                };
                let _ = write!(
                    svg,
                    r#"<text x="{}" y="{}" fill="{fill}" font-size="{font_size}" text-anchor="{anchor}" dominant-baseline="{baseline}""#,
                    position.x, position.y,
                );
                if *rotation != 0.0 {
                    // SVG rotates clockwise
                    let _ = write!(
                        svg,
                        r#" transform="rotate({} {} {})""#,
                        -rotation, position.x, position.y
                    );
                }
                let _ = write!(svg, ">{}</text>", escape_xml(text));
            }
            RenderCommand::SetClip { rect } => {
                if clip_open {
                    svg.push_str("</g>");
                }
                clip_id += 1;
                let _ = write!(
                    svg,
                    r#"<clipPath id="clip-{clip_id}"><rect x="{}" y="{}" width="{}" height="{}"/></clipPath><g clip-path="url(#clip-{clip_id})">"#,
                    rect.x, rect.y, rect.w, rect.h,
                );
                clip_open = true;
            }
            RenderCommand::ClearClip => {
                if clip_open {
                    svg.push_str("</g>");
                    clip_open = false;
                }
            }
            RenderCommand::BeginGroup { id, label } => {
                let _ = write!(svg, r#"<g id="{}""#, escape_xml(id));
                if let Some(label) = label {
                    let _ = write!(svg, r#" aria-label="{}""#, escape_xml(label));
                }
                svg.push('>');
            }
            RenderCommand::EndGroup => {
                if clip_open {
                    svg.push_str("</g>");
                    clip_open = false;
                }
                svg.push_str("</g>");
            }
        }
    }

    if clip_open {
        svg.push_str("</g>");
    }
    svg.push_str("</svg>");
    svg
}

impl Figure {
    /// Render the whole figure as an SVG document at its native pixel size.
    pub fn to_svg(&self, palette: &Palette) -> String {
        let (width, height) = self.pixel_size();
        let commands = self.render(&Viewport::new(width, height));
        render_svg(&commands, width, height, palette)
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{ConstantColorMap, SimpleColorMap};
    use crate::model::TimeEvent;
    use crate::plot::plot_events;
    use timeline_cat_protocol::{Color, Point, Rect};

    #[test]
    fn basic_svg_output() {
        let commands = vec![RenderCommand::DrawRect {
            rect: Rect::new(10.0, 20.0, 100.0, 18.0),
            color: Color::Cycle(0),
            border_color: None,
            label: Some("main".into()),
        }];
        let svg = render_svg(&commands, 800.0, 400.0, &Palette::ggplot());
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("<title>main</title>"));
        assert!(svg.contains("#e24a33"));
    }

    #[test]
    fn escapes_xml_entities() {
        let commands = vec![RenderCommand::DrawText {
            position: Point::new(0.0, 0.0),
            text: "fn<T>(&self)".into(),
            color: Color::BLACK,
            font_size: 10.0,
            align: TextAlign::Center,
            valign: VerticalAlign::Center,
            rotation: 0.0,
        }];
        let svg = render_svg(&commands, 400.0, 100.0, &Palette::tab10());
        assert!(svg.contains("fn&lt;T&gt;(&amp;self)"));
        assert!(svg.contains(r#"text-anchor="middle""#));
        assert!(svg.contains(r#"dominant-baseline="central""#));
    }

    #[test]
    fn rotated_text_gets_transform() {
        let commands = vec![RenderCommand::DrawText {
            position: Point::new(5.0, 50.0),
            text: "cat1".into(),
            color: Color::BLACK,
            font_size: 12.0,
            align: TextAlign::Center,
            valign: VerticalAlign::Bottom,
            rotation: 90.0,
        }];
        let svg = render_svg(&commands, 100.0, 100.0, &Palette::ggplot());
        assert!(svg.contains(r#"transform="rotate(-90 5 50)""#));
    }

    #[test]
    fn clip_groups_are_balanced() {
        let commands = vec![
            RenderCommand::BeginGroup {
                id: "panel-0".into(),
                label: Some("cat1".into()),
            },
            RenderCommand::SetClip {
                rect: Rect::new(0.0, 0.0, 10.0, 10.0),
            },
            RenderCommand::DrawLine {
                from: Point::new(0.0, 0.0),
                to: Point::new(10.0, 10.0),
                color: Color::BLACK,
                width: 1.0,
            },
            RenderCommand::EndGroup,
        ];
        let svg = render_svg(&commands, 10.0, 10.0, &Palette::ggplot());
        assert_eq!(svg.matches("<g ").count(), svg.matches("</g>").count());
        assert!(svg.contains(r#"clip-path="url(#clip-1)""#));
        assert!(svg.contains(r#"aria-label="cat1""#));
    }

    #[test]
    fn extreme_event_ranges_render_finite_coordinates() {
        let ranges = [
            (0.0, f64::MAX),
            (-f64::MAX, f64::MAX),
            (1e20, 1e20),
            (f64::MAX, f64::MAX),
        ];
        for (start, end) in ranges {
            let event = TimeEvent::new(start, end, "big", "s", "c").unwrap();
            let figure = plot_events(
                &[event],
                SimpleColorMap::new(),
                ConstantColorMap(Color::BLACK),
            )
            .unwrap();
            let (lo, hi) = figure.x_limits(crate::figure::PanelId(0));
            assert!(lo.is_finite() && hi.is_finite() && lo < hi, "{start}..{end}");

            let svg = figure.to_svg(&Palette::ggplot());
            assert!(!svg.contains("NaN"), "{start}..{end}");
            assert!(!svg.contains("inf"), "{start}..{end}");
            assert!(svg.contains(">big</text>"));
        }
    }
}
