//! A small figure model: stacked panels holding artists in data coordinates.
//!
//! The layout engine draws onto [`Axes`]; [`Figure::render`] turns the whole
//! figure into pixel-space render commands.

mod render;
pub mod ticks;

use serde::Serialize;
use timeline_cat_protocol::{Color, TextAlign, VerticalAlign};

use crate::config::TimelineConfig;

/// Fraction of the data range added on each side when autoscaling.
pub const AUTOSCALE_MARGIN: f64 = 0.05;

/// Index of a panel within its [`Figure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PanelId(pub usize);

/// Something drawn on a panel, in data coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Artist {
    /// A filled region between `y1` and `y2` over the x interval `x`.
    Span {
        x: [f64; 2],
        y1: f64,
        y2: f64,
        color: Color,
        label: Option<String>,
    },
    /// A text label anchored at `(x, y)`.
    Label {
        x: f64,
        y: f64,
        text: String,
        color: Color,
        align: TextAlign,
        valign: VerticalAlign,
    },
}

/// Bounding box of a panel's artists.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataLimits {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl DataLimits {
    fn point(x: f64, y: f64) -> Self {
        Self {
            x_min: x,
            x_max: x,
            y_min: y,
            y_max: y,
        }
    }

    fn union(self, other: DataLimits) -> Self {
        Self {
            x_min: self.x_min.min(other.x_min),
            x_max: self.x_max.max(other.x_max),
            y_min: self.y_min.min(other.y_min),
            y_max: self.y_max.max(other.y_max),
        }
    }
}

/// One chart panel.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Axes {
    sharex: Option<PanelId>,
    artists: Vec<Artist>,
    ylabel: Option<String>,
    yticks: Vec<f64>,
    yticklabels: Vec<String>,
    xticklabels_visible: bool,
}

impl Axes {
    fn new(sharex: Option<PanelId>) -> Self {
        Self {
            sharex,
            xticklabels_visible: true,
            ..Self::default()
        }
    }

    /// Fill the region between `y1` and `y2` over `x[0]..x[1]`.
    pub fn fill_between(
        &mut self,
        x: [f64; 2],
        y1: f64,
        y2: f64,
        color: Color,
        label: Option<&str>,
    ) {
        self.artists.push(Artist::Span {
            x,
            y1,
            y2,
            color,
            label: label.map(str::to_string),
        });
    }

    pub fn text(
        &mut self,
        x: f64,
        y: f64,
        s: &str,
        color: Color,
        align: TextAlign,
        valign: VerticalAlign,
    ) {
        self.artists.push(Artist::Label {
            x,
            y,
            text: s.to_string(),
            color,
            align,
            valign,
        });
    }

    pub fn set_ylabel(&mut self, label: &str) {
        self.ylabel = Some(label.to_string());
    }

    pub fn set_yticks(&mut self, ticks: &[f64]) {
        self.yticks = ticks.to_vec();
    }

    pub fn set_yticklabels<S: AsRef<str>>(&mut self, labels: &[S]) {
        self.yticklabels = labels.iter().map(|s| s.as_ref().to_string()).collect();
    }

    pub fn set_xticklabels_visible(&mut self, visible: bool) {
        self.xticklabels_visible = visible;
    }

    pub fn sharex(&self) -> Option<PanelId> {
        self.sharex
    }

    pub fn artists(&self) -> &[Artist] {
        &self.artists
    }

    pub fn ylabel(&self) -> Option<&str> {
        self.ylabel.as_deref()
    }

    pub fn yticks(&self) -> &[f64] {
        &self.yticks
    }

    pub fn yticklabels(&self) -> &[String] {
        &self.yticklabels
    }

    pub fn xticklabels_visible(&self) -> bool {
        self.xticklabels_visible
    }

    /// Bounding box of everything drawn so far, or `None` for an empty panel.
    pub fn data_limits(&self) -> Option<DataLimits> {
        self.artists
            .iter()
            .map(|artist| match *artist {
                Artist::Span { x, y1, y2, .. } => DataLimits {
                    x_min: x[0].min(x[1]),
                    x_max: x[0].max(x[1]),
                    y_min: y1.min(y2),
                    y_max: y1.max(y2),
                },
                Artist::Label { x, y, .. } => DataLimits::point(x, y),
            })
            .reduce(DataLimits::union)
    }
}

/// A figure: a fixed-size canvas holding vertically stacked panels.
#[derive(Debug, Clone, Serialize)]
pub struct Figure {
    width_in: f64,
    height_in: f64,
    dpi: f64,
    axes: Vec<Axes>,
}

impl Figure {
    pub fn new(width_in: f64, height_in: f64, dpi: f64) -> Self {
        Self {
            width_in,
            height_in,
            dpi,
            axes: Vec::new(),
        }
    }

    pub fn from_config(config: &TimelineConfig) -> Self {
        Self::new(config.fig_width, config.fig_height, config.dpi)
    }

    /// Append a panel below the existing ones.
    ///
    /// With `sharex`, the new panel uses the x limits of that panel's group.
    pub fn add_subplot(&mut self, sharex: Option<PanelId>) -> PanelId {
        let id = PanelId(self.axes.len());
        // Share with the group root so chains collapse to one reference.
        let root = sharex.map(|p| self.share_root(p));
        self.axes.push(Axes::new(root));
        id
    }

    pub fn axes(&self, id: PanelId) -> Option<&Axes> {
        self.axes.get(id.0)
    }

    pub fn axes_mut(&mut self, id: PanelId) -> Option<&mut Axes> {
        self.axes.get_mut(id.0)
    }

    pub fn panels(&self) -> &[Axes] {
        &self.axes
    }

    pub fn len(&self) -> usize {
        self.axes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.axes.is_empty()
    }

    /// Canvas size in pixels.
    pub fn pixel_size(&self) -> (f64, f64) {
        (self.width_in * self.dpi, self.height_in * self.dpi)
    }

    fn share_root(&self, id: PanelId) -> PanelId {
        self.axes
            .get(id.0)
            .and_then(Axes::sharex)
            .unwrap_or(id)
    }

    /// Autoscaled x limits, identical for every panel of a shared-x group.
    pub fn x_limits(&self, id: PanelId) -> (f64, f64) {
        let root = self.share_root(id);
        let limits = self
            .axes
            .iter()
            .enumerate()
            .filter(|(i, _)| self.share_root(PanelId(*i)) == root)
            .filter_map(|(_, axes)| axes.data_limits())
            .reduce(DataLimits::union);
        match limits {
            Some(l) => with_margin(l.x_min, l.x_max),
            None => (0.0, 1.0),
        }
    }

    /// Autoscaled y limits covering the panel's artists and its y ticks.
    pub fn y_limits(&self, id: PanelId) -> (f64, f64) {
        let Some(axes) = self.axes.get(id.0) else {
            return (0.0, 1.0);
        };
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        if let Some(l) = axes.data_limits() {
            lo = l.y_min;
            hi = l.y_max;
        }
        for &t in &axes.yticks {
            lo = lo.min(t);
            hi = hi.max(t);
        }
        if lo.is_finite() && hi.is_finite() {
            with_margin(lo, hi)
        } else {
            (0.0, 1.0)
        }
    }
}

/// Pad `[lo, hi]` by [`AUTOSCALE_MARGIN`] of its span, staying finite.
///
/// A zero-width range is padded relative to its magnitude (at least `0.5`)
/// so that `lo < hi` survives rounding. Results saturate at `f64::MAX`.
fn with_margin(lo: f64, hi: f64) -> (f64, f64) {
    let pad = if hi > lo {
        // hi - lo itself may overflow
        hi * AUTOSCALE_MARGIN - lo * AUTOSCALE_MARGIN
    } else {
        (lo.abs() * AUTOSCALE_MARGIN).max(0.5)
    };
    ((lo - pad).max(f64::MIN), (hi + pad).min(f64::MAX))
}
