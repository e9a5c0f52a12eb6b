use std::io::stdout;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    buffer::Buffer,
    layout::Rect as Area,
    style::{Color, Style},
    widgets::Block,
};
use timeline_cat_core::Figure;
use timeline_cat_protocol::{Palette, Rect, RenderCommand, Rgba, TextAlign, VerticalAlign, Viewport};

/// Logical pixels per terminal cell. Cells are roughly twice as tall as wide.
const CELL_W: f64 = 8.0;
const CELL_H: f64 = 16.0;

fn to_color(rgba: Rgba) -> Color {
    Color::Rgb(rgba.r, rgba.g, rgba.b)
}

/// Show `figure` full-screen until `q` or `Esc` is pressed.
pub fn render_tui(figure: &Figure, palette: &Palette, title: &str) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, figure, palette, title);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result
}

fn run<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    figure: &Figure,
    palette: &Palette,
    title: &str,
) -> Result<()> {
    loop {
        terminal.draw(|frame| {
            let area = frame.area();

            let header_area = Area::new(0, 0, area.width, 1);
            let header = Block::default()
                .title(format!(" {title} | {} panels | q quit ", figure.len()))
                .style(Style::default().fg(Color::White).bg(Color::DarkGray));
            frame.render_widget(header, header_area);

            let content_area = Area::new(0, 1, area.width, area.height.saturating_sub(1));
            let viewport = Viewport::new(
                f64::from(content_area.width) * CELL_W,
                f64::from(content_area.height) * CELL_H,
            );
            let commands = figure.render(&viewport);
            paint(&commands, palette, frame.buffer_mut(), content_area);
        })?;

        if event::poll(std::time::Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
        {
            return Ok(());
        }
    }
}

/// Cell span `[start, end)` covering the logical range `[lo, hi]`; at least
/// one cell wide when the range is non-empty.
fn cells(lo: f64, hi: f64, scale: f64) -> (i32, i32) {
    let start = (lo / scale).round() as i32;
    let mut end = (hi / scale).round() as i32;
    if end <= start && hi > lo {
        end = start + 1;
    }
    (start, end)
}

/// Rasterize render commands into terminal cells inside `area`.
pub fn paint(commands: &[RenderCommand], palette: &Palette, buf: &mut Buffer, area: Area) {
    let mut clip: Option<Rect> = None;

    // Absolute buffer position of a cell, if it is inside both area and clip.
    let cell_at = |col: i32, row: i32, clip: Option<Rect>| -> Option<(u16, u16)> {
        if col < 0 || row < 0 || col >= i32::from(area.width) || row >= i32::from(area.height) {
            return None;
        }
        if let Some(c) = clip {
            let (c0, c1) = cells(c.x, c.right(), CELL_W);
            let (r0, r1) = cells(c.y, c.bottom(), CELL_H);
            if col < c0 || col >= c1 || row < r0 || row >= r1 {
                return None;
            }
        }
        Some((area.x + col as u16, area.y + row as u16))
    };

    for cmd in commands {
        match cmd {
            RenderCommand::DrawRect { rect, color, .. } => {
                let bg = to_color(palette.resolve(*color));
                let (c0, c1) = cells(rect.x, rect.right(), CELL_W);
                let (r0, r1) = cells(rect.y, rect.bottom(), CELL_H);
                for row in r0..r1 {
                    for col in c0..c1 {
                        if let Some(pos) = cell_at(col, row, clip) {
                            buf[pos].set_char(' ').set_bg(bg);
                        }
                    }
                }
            }
            RenderCommand::DrawText {
                position,
                text,
                color,
                align,
                valign,
                rotation,
                ..
            } => {
                let fg = to_color(palette.resolve(*color));
                let len = text.chars().count() as i32;
                let col = (position.x / CELL_W).floor() as i32;
                let row = (position.y / CELL_H).floor() as i32;
                if *rotation != 0.0 {
                    // Vertical text, one glyph per row, centered on the anchor row.
                    let col = match valign {
                        VerticalAlign::Bottom => col - 1,
                        VerticalAlign::Center | VerticalAlign::Top => col,
                    };
                    let top = row - len / 2;
                    for (i, ch) in text.chars().enumerate() {
                        if let Some(pos) = cell_at(col, top + i as i32, clip) {
                            buf[pos].set_char(ch).set_fg(fg);
                        }
                    }
                    continue;
                }
                let start = match align {
                    TextAlign::Left => col,
                    TextAlign::Center => col - len / 2,
                    TextAlign::Right => col - len,
                };
                let row = match valign {
                    VerticalAlign::Top => row + 1,
                    VerticalAlign::Center => row,
                    VerticalAlign::Bottom => row - 1,
                };
                for (i, ch) in text.chars().enumerate() {
                    if let Some(pos) = cell_at(start + i as i32, row, clip) {
                        buf[pos].set_char(ch).set_fg(fg);
                    }
                }
            }
            RenderCommand::DrawLine { from, to, color, .. } => {
                let fg = to_color(palette.resolve(*color));
                if (from.y - to.y).abs() < f64::EPSILON && (to.x - from.x).abs() >= CELL_W {
                    let row = (from.y / CELL_H).floor() as i32;
                    let (c0, c1) = cells(from.x.min(to.x), from.x.max(to.x), CELL_W);
                    for col in c0..c1 {
                        if let Some(pos) = cell_at(col, row, clip)
                            && buf[pos].symbol() == " "
                        {
                            buf[pos].set_char('─').set_fg(fg);
                        }
                    }
                } else if (from.x - to.x).abs() < f64::EPSILON
                    && (to.y - from.y).abs() >= CELL_H
                {
                    let col = (from.x / CELL_W).floor() as i32;
                    let (r0, r1) = cells(from.y.min(to.y), from.y.max(to.y), CELL_H);
                    for row in r0..r1 {
                        if let Some(pos) = cell_at(col, row, clip)
                            && buf[pos].symbol() == " "
                        {
                            buf[pos].set_char('│').set_fg(fg);
                        }
                    }
                }
                // Tick marks are shorter than a cell and are dropped.
            }
            RenderCommand::SetClip { rect } => clip = Some(*rect),
            RenderCommand::ClearClip => clip = None,
            RenderCommand::BeginGroup { .. } | RenderCommand::EndGroup => {}
        }
    }
}
