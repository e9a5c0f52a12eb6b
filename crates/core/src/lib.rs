pub mod color;
pub mod config;
pub mod demo;
pub mod figure;
pub mod input;
pub mod model;
pub mod plot;
pub mod svg;
pub mod timeline;

pub use color::{ColorMap, ConstantColorMap, FnColorMap, SimpleColorMap};
pub use config::TimelineConfig;
pub use figure::{Axes, Figure, PanelId};
pub use model::{EventError, TimeEvent};
pub use plot::{plot_events, plot_events_with};
pub use timeline::{Band, LayoutError, TimeLine, YTicks};
