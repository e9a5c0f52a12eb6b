//! Integration test: load the demo event file, plot it, and check the figure
//! and its SVG output end to end.

use timeline_cat_core::demo::demo_events;
use timeline_cat_core::figure::Artist;
use timeline_cat_core::input::parse_events;
use timeline_cat_core::{
    ConstantColorMap, PanelId, SimpleColorMap, plot_events, plot_events_with,
};
use timeline_cat_protocol::{Color, Palette, RenderCommand, Viewport};

#[test]
fn fixture_matches_builtin_demo() {
    let input = parse_events(include_bytes!("fixtures/demo-events.json"))
        .expect("fixture should parse");
    let demo = demo_events().expect("demo events are valid");
    assert_eq!(input.events, demo);
}

#[test]
fn demo_figure_layout() {
    let input = parse_events(include_bytes!("fixtures/demo-events.json"))
        .expect("fixture should parse");
    let mut blocks = SimpleColorMap::new();
    let figure = plot_events_with(
        &input.events,
        input.config,
        &mut blocks,
        ConstantColorMap(Color::BLACK),
    )
    .expect("demo should plot");

    // Two categories, two streams, five distinct names.
    assert_eq!(figure.len(), 2);
    assert_eq!(blocks.len(), 5);

    for axes in figure.panels() {
        assert_eq!(axes.artists().len(), 10, "five bars plus five labels");
        assert_eq!(axes.yticks(), &[1.5, 6.5]);
        assert_eq!(
            axes.yticklabels(),
            &["stream1".to_string(), "stream2".to_string()]
        );
    }
    assert_eq!(figure.panels()[0].ylabel(), Some("cat1"));
    assert_eq!(figure.panels()[1].ylabel(), Some("cat2"));
    assert!(!figure.panels()[0].xticklabels_visible());
    assert!(figure.panels()[1].xticklabels_visible());

    // Same name, same color, in both panels.
    let colors = |panel: usize| -> Vec<Color> {
        figure.panels()[panel]
            .artists()
            .iter()
            .filter_map(|a| match a {
                Artist::Span { color, .. } => Some(*color),
                Artist::Label { .. } => None,
            })
            .collect()
    };
    assert_eq!(colors(0), colors(1));
    assert_eq!(
        colors(0),
        vec![
            Color::Cycle(0),
            Color::Cycle(1),
            Color::Cycle(2),
            Color::Cycle(3),
            Color::Cycle(4),
        ]
    );

    // Shared x axis.
    assert_eq!(figure.x_limits(PanelId(0)), figure.x_limits(PanelId(1)));
}

#[test]
fn labels_are_centered_on_their_bars() {
    let events = demo_events().expect("demo events are valid");
    let figure = plot_events(
        &events,
        SimpleColorMap::new(),
        ConstantColorMap(Color::BLACK),
    )
    .expect("demo should plot");

    for axes in figure.panels() {
        for pair in axes.artists().chunks(2) {
            let [
                Artist::Span { x, y1, y2, .. },
                Artist::Label { x: lx, y: ly, .. },
            ] = pair
            else {
                panic!("expected span followed by label, got {pair:?}");
            };
            assert_eq!(*lx, (x[0] + x[1]) / 2.0);
            assert_eq!(*ly, (y1 + y2) / 2.0);
        }
    }
}

#[test]
fn rendered_svg_contains_every_event() {
    let events = demo_events().expect("demo events are valid");
    let figure = plot_events(
        &events,
        SimpleColorMap::new(),
        ConstantColorMap(Color::BLACK),
    )
    .expect("demo should plot");

    let (width, height) = figure.pixel_size();
    let commands = figure.render(&Viewport::new(width, height));
    let bars = commands
        .iter()
        .filter(|c| matches!(c, RenderCommand::DrawRect { color: Color::Cycle(_), .. }))
        .count();
    assert_eq!(bars, events.len());

    let svg = figure.to_svg(&Palette::ggplot());
    assert!(svg.starts_with("<svg"));
    for name in ["name", "name2", "name3", "name4", "name5", "cat1", "cat2", "stream1"] {
        assert!(svg.contains(&format!(">{name}<")), "missing {name}");
    }
    println!("demo svg: {} bytes", svg.len());
}

#[test]
fn independent_color_sessions() {
    let events = demo_events().expect("demo events are valid");
    let mut shared = SimpleColorMap::new();
    plot_events(&events, &mut shared, ConstantColorMap(Color::BLACK)).expect("first plot");
    assert_eq!(shared.len(), 5);

    shared.reset();
    let figure = plot_events(&events[1..], &mut shared, ConstantColorMap(Color::BLACK))
        .expect("second plot");
    // After a reset, "name2" is the first name seen and gets C0 again.
    let first = figure.panels()[0].artists().first().cloned();
    assert!(matches!(first, Some(Artist::Span { color: Color::Cycle(0), .. })));
}
