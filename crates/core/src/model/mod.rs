pub mod event;

pub use event::{EventError, TimeEvent};
