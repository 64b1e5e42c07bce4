use serde::{Deserialize, Serialize};

use crate::error::WaveformError;

/// Colours, fonts and layout metrics of the waveform view. Handed to the
/// renderer once and never changed afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveformStyle {
    /// Height of one channel band.
    pub height: f64,
    pub color: String,
    pub color_background: String,
    pub color_center_line: String,
    pub waveform_line_width: f64,
    /// Side of the square drawn on each sample when zoomed in far.
    pub marker_size: f64,

    pub ruler_height: f64,
    pub ruler_grid_width: f64,
    pub ruler_color: String,
    pub ruler_grid_color: String,
    pub ruler_font: String,
    pub ruler_label_baseline: f64,
    pub ruler_tick_top: f64,
    pub ruler_tick_bottom: f64,

    /// Band under the channels holding the region bracket and its label.
    pub info_height: f64,
    pub info_color: String,
    pub info_font: String,

    pub padding: f64,
}

impl Default for WaveformStyle {
    fn default() -> Self {
        Self {
            height: 192.0,
            color: "#03A9F4".into(),
            color_background: "#FFF".into(),
            color_center_line: "#B0BEC5".into(),
            waveform_line_width: 1.0,
            marker_size: 3.0,
            ruler_height: 32.0,
            ruler_grid_width: 1.0,
            ruler_color: "#37474F".into(),
            ruler_grid_color: "#CFD8DC".into(),
            ruler_font: "9px Arial".into(),
            ruler_label_baseline: 15.0,
            ruler_tick_top: 20.0,
            ruler_tick_bottom: 28.5,
            info_height: 16.0,
            info_color: "#1B5E20".into(),
            info_font: "9px Arial".into(),
            padding: 2.4,
        }
    }
}

impl WaveformStyle {
    /// Parse a (possibly partial) JSON style; missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, WaveformError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Vertical offset of a channel band, relative to the top of the first one.
    pub fn channel_offset(&self, channel: usize) -> f64 {
        channel as f64 * (self.height + self.padding)
    }

    /// Height of all channel bands with padding above, between and below.
    pub fn waveform_height(&self, channels: usize) -> f64 {
        channels as f64 * self.height + (channels + 1) as f64 * self.padding
    }

    /// Top of the info band.
    pub fn info_top(&self, channels: usize) -> f64 {
        self.ruler_height + self.waveform_height(channels)
    }

    pub fn canvas_height(&self, channels: usize) -> f64 {
        self.info_top(channels) + self.info_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override() {
        let style = WaveformStyle::from_json(r##"{ "height": 100, "color": "#F00" }"##).unwrap();
        assert_eq!(style.height, 100.0);
        assert_eq!(style.color, "#F00");
        assert_eq!(style.ruler_height, 32.0);
        assert_eq!(style.padding, 2.4);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(matches!(
            WaveformStyle::from_json("{ \"height\": \"tall\" }"),
            Err(WaveformError::Style(_))
        ));
    }

    #[test]
    fn test_stereo_layout() {
        let style = WaveformStyle::default();
        assert_eq!(style.channel_offset(0), 0.0);
        assert!((style.channel_offset(1) - 194.4).abs() < 1e-9);
        // ruler + two bands + three paddings + info band
        assert!((style.canvas_height(2) - (32.0 + 384.0 + 7.2 + 16.0)).abs() < 1e-9);
    }
}
