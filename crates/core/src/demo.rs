use crate::model::{EventError, TimeEvent};

/// `(start, end, name, stream, category)` rows of the demonstration chart:
/// the same five events repeated in two categories.
const DEMO_ROWS: &[(f64, f64, &str, &str, &str)] = &[
    (0.0, 1.0, "name", "stream1", "cat1"),
    (0.5, 1.5, "name2", "stream2", "cat1"),
    (1.2, 1.8, "name3", "stream1", "cat1"),
    (2.0, 4.0, "name4", "stream2", "cat1"),
    (2.0, 4.0, "name5", "stream1", "cat1"),
    (0.0, 1.0, "name", "stream1", "cat2"),
    (0.5, 1.5, "name2", "stream2", "cat2"),
    (1.2, 1.8, "name3", "stream1", "cat2"),
    (2.0, 4.0, "name4", "stream2", "cat2"),
    (2.0, 4.0, "name5", "stream1", "cat2"),
];

/// The built-in demonstration event set.
pub fn demo_events() -> Result<Vec<TimeEvent>, EventError> {
    DEMO_ROWS
        .iter()
        .map(|&(start, end, name, stream, category)| {
            TimeEvent::new(start, end, name, stream, category)
        })
        .collect()
}
