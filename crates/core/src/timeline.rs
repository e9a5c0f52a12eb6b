//! The layout engine: one panel per category, one row band per stream.

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use thiserror::Error;
use timeline_cat_protocol::{TextAlign, VerticalAlign};

use crate::color::ColorMap;
use crate::config::TimelineConfig;
use crate::figure::{Figure, PanelId};
use crate::model::TimeEvent;
use crate::model::event::mid_point;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("unknown category: {0}")]
    UnknownCategory(String),
    #[error("unknown stream: {0}")]
    UnknownStream(String),
    #[error("no panel with index {0}")]
    UnknownPanel(usize),
}

/// Vertical interval occupied by one stream, in data units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Band {
    pub low: f64,
    pub high: f64,
}

impl Band {
    pub fn midpoint(&self) -> f64 {
        mid_point(self.low, self.high)
    }

    pub fn overlaps(&self, other: &Band) -> bool {
        self.low < other.high && other.low < self.high
    }
}

/// Y-axis ticks: stream names and their band midpoints, in band order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YTicks {
    pub names: Vec<String>,
    pub ticks: Vec<f64>,
}

/// Lays out and draws a set of events onto a [`Figure`].
///
/// Categories and streams are kept in first-seen order, so panels and bands
/// come out in a deterministic order for a given event list. Both maps are
/// built by [`TimeLine::new`]; drawing happens afterwards.
#[derive(Debug, Clone)]
pub struct TimeLine {
    config: TimelineConfig,
    categories: IndexSet<String>,
    streams: IndexSet<String>,
    figure: Figure,
    category_map: IndexMap<String, PanelId>,
    stream_map: IndexMap<String, Band>,
}

impl TimeLine {
    pub fn new(events: &[TimeEvent], config: TimelineConfig) -> Self {
        let categories: IndexSet<String> =
            events.iter().map(|e| e.category().to_string()).collect();
        let streams: IndexSet<String> = events.iter().map(|e| e.stream().to_string()).collect();
        let figure = Figure::from_config(&config);

        let mut timeline = Self {
            config,
            categories,
            streams,
            figure,
            category_map: IndexMap::new(),
            stream_map: IndexMap::new(),
        };
        timeline.make_axes().make_maps();
        log::debug!(
            "timeline: {} events, {} panels, {} stream bands",
            events.len(),
            timeline.category_map.len(),
            timeline.stream_map.len()
        );
        timeline
    }

    /// Create one panel per category, each sharing x with the first.
    /// Panels are only allocated once.
    pub fn make_axes(&mut self) -> &mut Self {
        if !self.category_map.is_empty() || self.categories.is_empty() {
            return self;
        }
        let mut first = None;
        for category in &self.categories {
            let id = self.figure.add_subplot(first);
            first.get_or_insert(id);
            self.category_map.insert(category.clone(), id);
        }
        self
    }

    /// Assign band `i` = `[i * pitch, i * pitch + block_height]` to the
    /// `i`-th stream. Only computed once.
    pub fn make_maps(&mut self) -> &mut Self {
        if !self.stream_map.is_empty() {
            return self;
        }
        let pitch = self.config.pitch();
        for (i, stream) in self.streams.iter().enumerate() {
            let low = i as f64 * pitch;
            let band = Band {
                low,
                high: low + self.config.block_height,
            };
            log::debug!("stream {stream:?} -> [{}, {}]", band.low, band.high);
            self.stream_map.insert(stream.clone(), band);
        }
        self
    }

    /// The panel that draws `event`'s category.
    pub fn axes_for(&self, event: &TimeEvent) -> Result<PanelId, LayoutError> {
        self.category_map
            .get(event.category())
            .copied()
            .ok_or_else(|| LayoutError::UnknownCategory(event.category().to_string()))
    }

    /// The band of `event`'s stream.
    pub fn stream_dims_for(&self, event: &TimeEvent) -> Result<Band, LayoutError> {
        self.stream_map
            .get(event.stream())
            .copied()
            .ok_or_else(|| LayoutError::UnknownStream(event.stream().to_string()))
    }

    /// Draw `event` onto `panel`: a filled bar over its time range and
    /// stream band, plus its name centered on the bar.
    pub fn draw_event(
        &mut self,
        event: &TimeEvent,
        mut block_colors: impl ColorMap,
        mut text_colors: impl ColorMap,
        panel: PanelId,
    ) -> Result<(), LayoutError> {
        let band = self.stream_dims_for(event)?;
        let axes = self
            .figure
            .axes_mut(panel)
            .ok_or(LayoutError::UnknownPanel(panel.0))?;

        if event.duration() == 0.0 {
            log::warn!("event {:?} has zero duration", event.name());
        }
        log::trace!(
            "draw {:?} [{}, {}] on panel {} band [{}, {}]",
            event.name(),
            event.start(),
            event.end(),
            panel.0,
            band.low,
            band.high
        );

        let x = [event.start(), event.end()];
        let block = block_colors.color_for(event);
        axes.fill_between(x, band.low, band.high, block, Some(event.name()));

        let text = text_colors.color_for(event);
        axes.text(
            mid_point(x[0], x[1]),
            band.midpoint(),
            event.name(),
            text,
            TextAlign::Center,
            VerticalAlign::Center,
        );
        Ok(())
    }

    /// Stream names and band midpoints for labelling the y axis.
    pub fn get_yticks(&self) -> YTicks {
        let (names, ticks): (Vec<String>, Vec<f64>) = self
            .stream_map
            .iter()
            .map(|(name, band)| (name.clone(), band.midpoint()))
            .unzip();
        YTicks { names, ticks }
    }

    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    pub fn categories(&self) -> impl ExactSizeIterator<Item = &str> {
        self.categories.iter().map(String::as_str)
    }

    pub fn streams(&self) -> impl ExactSizeIterator<Item = &str> {
        self.streams.iter().map(String::as_str)
    }

    /// Panel of a category by name.
    pub fn panel(&self, category: &str) -> Option<PanelId> {
        self.category_map.get(category).copied()
    }

    /// Band of a stream by name.
    pub fn band(&self, stream: &str) -> Option<Band> {
        self.stream_map.get(stream).copied()
    }

    /// Category → panel pairs, in category order.
    pub fn panels(&self) -> impl ExactSizeIterator<Item = (&str, PanelId)> {
        self.category_map.iter().map(|(c, id)| (c.as_str(), *id))
    }

    /// Stream → band pairs, in stream order.
    pub fn bands(&self) -> impl ExactSizeIterator<Item = (&str, Band)> {
        self.stream_map.iter().map(|(s, band)| (s.as_str(), *band))
    }

    pub fn figure(&self) -> &Figure {
        &self.figure
    }

    pub fn figure_mut(&mut self) -> &mut Figure {
        &mut self.figure
    }

    pub fn into_figure(self) -> Figure {
        self.figure
    }
}
