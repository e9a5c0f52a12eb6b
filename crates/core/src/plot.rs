use crate::color::ColorMap;
use crate::config::TimelineConfig;
use crate::figure::Figure;
use crate::model::TimeEvent;
use crate::timeline::{LayoutError, TimeLine};

/// Draw `events` with the default layout settings.
///
/// See [`plot_events_with`].
pub fn plot_events(
    events: &[TimeEvent],
    block_colors: impl ColorMap,
    text_colors: impl ColorMap,
) -> Result<Figure, LayoutError> {
    plot_events_with(events, TimelineConfig::default(), block_colors, text_colors)
}

/// Draw every event onto its category's panel, then label each panel: the
/// category name on the y axis, stream names at their band midpoints, and x
/// tick labels only on the bottom panel.
pub fn plot_events_with(
    events: &[TimeEvent],
    config: TimelineConfig,
    mut block_colors: impl ColorMap,
    mut text_colors: impl ColorMap,
) -> Result<Figure, LayoutError> {
    let mut timeline = TimeLine::new(events, config);

    for event in events {
        let panel = timeline.axes_for(event)?;
        timeline.draw_event(event, &mut block_colors, &mut text_colors, panel)?;
    }

    let yticks = timeline.get_yticks();
    let panels: Vec<_> = timeline
        .panels()
        .map(|(category, id)| (category.to_string(), id))
        .collect();
    let last = panels.len().saturating_sub(1);
    let figure = timeline.figure_mut();
    for (i, (category, id)) in panels.iter().enumerate() {
        let axes = figure
            .axes_mut(*id)
            .ok_or(LayoutError::UnknownPanel(id.0))?;
        axes.set_ylabel(category);
        axes.set_yticks(&yticks.ticks);
        axes.set_yticklabels(&yticks.names);
        axes.set_xticklabels_visible(i == last);
    }

    Ok(timeline.into_figure())
}
