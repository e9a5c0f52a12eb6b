use serde::{Deserialize, Serialize};

pub const BLOCK_HEIGHT: f64 = 3.0;
pub const BLOCK_SPACING: f64 = 2.0;
/// Reserved for visual grouping of streams; not read by the layout.
pub const GROUP_SPACING: f64 = 10.0;

/// Layout and figure settings.
///
/// Deserializes from partial JSON: missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// Height of a stream band, in data units.
    pub block_height: f64,
    /// Gap between neighbouring stream bands, in data units.
    pub block_spacing: f64,
    /// Reserved, currently unused.
    pub group_spacing: f64,
    /// Figure width in inches.
    pub fig_width: f64,
    /// Figure height in inches.
    pub fig_height: f64,
    pub dpi: f64,
}

impl TimelineConfig {
    /// Distance between the low edges of consecutive bands.
    pub fn pitch(&self) -> f64 {
        self.block_height + self.block_spacing
    }
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            block_height: BLOCK_HEIGHT,
            block_spacing: BLOCK_SPACING,
            group_spacing: GROUP_SPACING,
            fig_width: 8.0,
            fig_height: 6.0,
            dpi: 96.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = TimelineConfig::default();
        assert_eq!(config.pitch(), 5.0);
        assert_eq!(config.group_spacing, 10.0);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: TimelineConfig =
            serde_json::from_str(r#"{"block_height": 4.0}"#).unwrap();
        assert_eq!(config.block_height, 4.0);
        assert_eq!(config.block_spacing, 2.0);
        assert_eq!(config.dpi, 96.0);
    }
}
