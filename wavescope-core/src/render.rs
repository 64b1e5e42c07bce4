use crate::buffer::SampleSource;
use crate::grid::first_grid_after;
use crate::reduce::{amplitude_to_y, reduce_channel, Trace};
use crate::style::WaveformStyle;
use crate::surface::DrawingSurface;
use crate::view::Region;
use crate::viewport::ViewportModel;

/// Paints one frame of the waveform view: background, time ruler, channel
/// traces, then the region overlays.
pub struct WaveformRenderer {
    style: WaveformStyle,
}

impl WaveformRenderer {
    pub fn new(style: WaveformStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &WaveformStyle {
        &self.style
    }

    /// Full pass in paint order. Nothing is drawn before a viewport exists.
    pub fn render(
        &self,
        surface: &mut dyn DrawingSurface,
        source: &dyn SampleSource,
        model: &ViewportModel,
        region: Option<Region>,
    ) {
        if model.viewport().is_none() {
            return;
        }
        let channels = source.channel_count();
        self.clear(surface, model.width(), channels);
        self.draw_ruler(surface, model);
        self.draw_waveform(surface, source, model);
        self.draw_region(surface, region, channels);
        self.draw_info(surface, region, model.pixel_per_sample(), channels);
    }

    pub fn clear(&self, surface: &mut dyn DrawingSurface, width: f64, channels: usize) {
        let s = &self.style;
        surface.set_fill_style(&s.color_background);
        surface.fill_rect(
            0.0,
            s.ruler_height,
            width,
            s.waveform_height(channels) + s.info_height,
        );
    }

    pub fn draw_ruler(&self, surface: &mut dyn DrawingSurface, model: &ViewportModel) {
        let Some(vp) = model.viewport() else { return };
        let s = &self.style;
        let pps = model.pixel_per_sample();
        let grid = model.grid_size() as usize;

        surface.set_fill_style(&s.ruler_color);
        surface.fill_rect(0.0, 0.0, model.width(), s.ruler_height);

        surface.set_stroke_style(&s.ruler_grid_color);
        surface.set_line_width(s.ruler_grid_width);
        surface.set_fill_style(&s.ruler_grid_color);
        surface.set_font(&s.ruler_font);
        surface.set_text_align("left");
        surface.begin_path();
        let mut tick = first_grid_after(vp.start, grid as u32);
        while tick < vp.end {
            let x = (tick - vp.start) as f64 * pps;
            surface.fill_text(&tick.to_string(), x, s.ruler_label_baseline);
            surface.move_to(x, s.ruler_tick_top);
            surface.line_to(x, s.ruler_tick_bottom);
            tick += grid;
        }
        surface.stroke();
    }

    pub fn draw_waveform(
        &self,
        surface: &mut dyn DrawingSurface,
        source: &dyn SampleSource,
        model: &ViewportModel,
    ) {
        let Some(vp) = model.viewport() else { return };
        let s = &self.style;
        let pps = model.pixel_per_sample();
        let mid = s.height / 2.0;

        surface.save();
        surface.translate(0.0, s.ruler_height + s.padding);

        for channel in 0..source.channel_count() {
            surface.save();
            surface.translate(0.0, s.channel_offset(channel));

            surface.begin_path();
            surface.set_stroke_style(&s.color_center_line);
            surface.set_line_width(s.waveform_line_width);
            surface.move_to(0.0, mid);
            surface.line_to(model.width(), mid);
            surface.stroke();

            surface.set_stroke_style(&s.color);
            surface.set_fill_style(&s.color);
            surface.begin_path();
            match reduce_channel(source.channel(channel), vp, pps) {
                Trace::Envelope(columns) => {
                    for col in &columns {
                        surface.move_to(col.x, amplitude_to_y(col.positive, s.height));
                        surface.line_to(col.x, mid);
                        surface.line_to(col.x, amplitude_to_y(col.negative, s.height));
                    }
                }
                Trace::Line { points, markers } => {
                    let half = s.marker_size / 2.0;
                    for (n, p) in points.iter().enumerate() {
                        let y = amplitude_to_y(p.amplitude, s.height);
                        if n == 0 {
                            surface.move_to(p.x, y);
                        } else {
                            surface.line_to(p.x, y);
                        }
                        if markers {
                            surface.fill_rect(p.x - half, y - half, s.marker_size, s.marker_size);
                        }
                    }
                }
            }
            surface.stroke();
            surface.restore();
        }

        surface.restore();
    }

    /// Outline of the selected region across all channel bands.
    pub fn draw_region(
        &self,
        surface: &mut dyn DrawingSurface,
        region: Option<Region>,
        channels: usize,
    ) {
        let Some(region) = region.filter(|r| !r.is_empty()) else { return };
        let s = &self.style;
        surface.set_stroke_style(&s.info_color);
        surface.set_line_width(1.0);
        surface.stroke_rect(
            region.start,
            s.ruler_height + 0.5,
            region.width(),
            s.waveform_height(channels) - 1.0,
        );
    }

    /// Bracket under the channels spanning the region, labelled with its
    /// length in samples.
    pub fn draw_info(
        &self,
        surface: &mut dyn DrawingSurface,
        region: Option<Region>,
        pixel_per_sample: f64,
        channels: usize,
    ) {
        let Some(region) = region.filter(|r| !r.is_empty()) else { return };
        let s = &self.style;
        let top = s.info_top(channels);
        let h = s.info_height;
        let bracket_y = top + h * 0.4;

        surface.set_stroke_style(&s.info_color);
        surface.set_fill_style(&s.info_color);
        surface.set_line_width(1.0);
        surface.begin_path();
        surface.move_to(region.start, bracket_y);
        surface.line_to(region.end, bracket_y);
        surface.stroke();
        surface.fill_rect(region.start, top + h * 0.1, 1.0, h * 0.3);
        surface.fill_rect(region.end, top + h * 0.1, 1.0, h * 0.3);

        if pixel_per_sample > 0.0 {
            let samples = (region.width() / pixel_per_sample).round() as u64;
            surface.set_font(&s.info_font);
            surface.set_text_align("center");
            surface.fill_text(&samples.to_string(), region.start + region.width() * 0.5, top + h);
        }
    }
}
