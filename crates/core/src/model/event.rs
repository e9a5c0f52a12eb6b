use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum EventError {
    #[error("event {name:?}: invalid time range [{start}, {end}]")]
    InvalidRange { name: String, start: f64, end: f64 },
}

/// A single named, time-bounded event.
///
/// The stream picks the row band the event is drawn in; the category picks
/// the panel. Fields are private so that `end >= start` holds for the
/// lifetime of the value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeEvent {
    start: f64,
    end: f64,
    name: String,
    stream: String,
    category: String,
}

impl TimeEvent {
    pub fn new(
        start: f64,
        end: f64,
        name: impl Into<String>,
        stream: impl Into<String>,
        category: impl Into<String>,
    ) -> Result<Self, EventError> {
        let name = name.into();
        if !start.is_finite() || !end.is_finite() || end < start {
            return Err(EventError::InvalidRange { name, start, end });
        }
        Ok(Self {
            start,
            end,
            name,
            stream: stream.into(),
            category: category.into(),
        })
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stream(&self) -> &str {
        &self.stream
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

}

/// Midpoint between two values; finite for any finite inputs.
pub fn mid_point(start: f64, end: f64) -> f64 {
    start / 2.0 + end / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_and_midpoint() {
        let ev = TimeEvent::new(0.5, 1.5, "name2", "stream2", "cat1").unwrap();
        assert_eq!(ev.name(), "name2");
        assert_eq!(ev.stream(), "stream2");
        assert_eq!(ev.category(), "cat1");
        assert_eq!(ev.duration(), 1.0);
        assert_eq!(mid_point(ev.start(), ev.end()), 1.0);
    }

    #[test]
    fn mid_point_of_huge_values_is_finite() {
        assert_eq!(mid_point(f64::MAX, f64::MAX), f64::MAX);
        assert_eq!(mid_point(-f64::MAX, f64::MAX), 0.0);
    }

    #[test]
    fn zero_length_event_is_valid() {
        assert!(TimeEvent::new(2.0, 2.0, "tick", "s", "c").is_ok());
    }

    #[test]
    fn rejects_reversed_range() {
        assert_eq!(
            TimeEvent::new(4.0, 2.0, "backwards", "s", "c"),
            Err(EventError::InvalidRange {
                name: "backwards".to_string(),
                start: 4.0,
                end: 2.0,
            })
        );
    }

    #[test]
    fn rejects_non_finite_bounds() {
        assert!(TimeEvent::new(f64::NAN, 1.0, "n", "s", "c").is_err());
        assert!(TimeEvent::new(0.0, f64::INFINITY, "n", "s", "c").is_err());
    }
}
