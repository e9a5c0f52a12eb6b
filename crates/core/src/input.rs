//! JSON event lists.
//!
//! Accepted shapes:
//!
//! ```text
//! [ {"start": 0, "end": 1, "name": "a", "stream": "s1", "category": "c1"}, ... ]
//! { "config": { "block_height": 4 }, "events": [ ... ] }
//! ```
//!
//! `stream` and `category` may also be numbers.

use serde::Deserialize;
use thiserror::Error;

use crate::config::TimelineConfig;
use crate::model::{EventError, TimeEvent};

#[derive(Debug, Error)]
pub enum InputError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("event #{index}: {source}")]
    InvalidEvent {
        index: usize,
        #[source]
        source: EventError,
    },
    #[error("no events")]
    Empty,
}

/// Events plus the layout settings they came with.
#[derive(Debug, Clone)]
pub struct TimelineInput {
    pub config: TimelineConfig,
    pub events: Vec<TimeEvent>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawInput {
    List(Vec<RawEvent>),
    Document {
        #[serde(default)]
        config: TimelineConfig,
        events: Vec<RawEvent>,
    },
}

#[derive(Deserialize)]
struct RawEvent {
    start: f64,
    end: f64,
    name: String,
    stream: Ident,
    category: Ident,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Ident {
    Text(String),
    Int(i64),
    Float(f64),
}

impl From<Ident> for String {
    fn from(ident: Ident) -> Self {
        match ident {
            Ident::Text(s) => s,
            Ident::Int(n) => n.to_string(),
            Ident::Float(x) => x.to_string(),
        }
    }
}

/// Parse a JSON event list and validate every event.
pub fn parse_events(data: &[u8]) -> Result<TimelineInput, InputError> {
    let (config, raw) = match serde_json::from_slice::<RawInput>(data)? {
        RawInput::List(events) => (TimelineConfig::default(), events),
        RawInput::Document { config, events } => (config, events),
    };
    if raw.is_empty() {
        return Err(InputError::Empty);
    }

    let events = raw
        .into_iter()
        .enumerate()
        .map(|(index, ev)| {
            TimeEvent::new(ev.start, ev.end, ev.name, ev.stream, ev.category)
                .map_err(|source| InputError::InvalidEvent { index, source })
        })
        .collect::<Result<Vec<_>, _>>()?;

    log::debug!("parsed {} events", events.len());
    Ok(TimelineInput { config, events })
}
