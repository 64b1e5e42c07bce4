use serde::{Deserialize, Serialize};

use crate::error::WaveformError;
use crate::grid::{grid_level, GRID_SIZES};
use crate::view::DirtyFlag;

/// Smallest window (in samples) a zoom may produce.
pub const MIN_SAMPLES_IN_VIEWPORT: usize = 128;

/// Zoom sensitivity applied to vertical drag distance.
const ZOOM_SENSITIVITY: f64 = 10.0;

/// Visible sample window `[start, end)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub start: usize,
    pub end: usize,
}

impl Viewport {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// Notifications for other views that follow this one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum WaveformEvent {
    ViewportChange { start: usize, end: usize },
}

pub type EventListener = Box<dyn FnMut(&WaveformEvent)>;

/// Owns the visible window and everything derived from it.
///
/// Invariant once a buffer is loaded:
/// `0 <= start < end <= length` and `end - start >= MIN_SAMPLES_IN_VIEWPORT`.
/// Zoom and pan saturate instead of failing: a request that would break the
/// invariant leaves the model untouched and emits nothing.
pub struct ViewportModel {
    length: usize,
    width: f64,
    viewport: Option<Viewport>,
    pixel_per_sample: f64,
    grid_level: usize,
    dirty: DirtyFlag,
    listener: Option<EventListener>,
}

impl ViewportModel {
    pub fn new(width: f64, dirty: DirtyFlag) -> Self {
        Self {
            length: 0,
            width: sanitize_width(width),
            viewport: None,
            pixel_per_sample: 0.0,
            grid_level: 0,
            dirty,
            listener: None,
        }
    }

    pub fn set_listener(&mut self, listener: impl FnMut(&WaveformEvent) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    pub fn pixel_per_sample(&self) -> f64 {
        self.pixel_per_sample
    }

    pub fn grid_level(&self) -> usize {
        self.grid_level
    }

    pub fn grid_size(&self) -> u32 {
        GRID_SIZES[self.grid_level]
    }

    /// Buffer-load path: show the whole buffer.
    pub fn set_length(&mut self, length: usize) -> Result<(), WaveformError> {
        if length <= MIN_SAMPLES_IN_VIEWPORT {
            log::warn!("Rejected buffer of {length} samples");
            return Err(WaveformError::BufferTooShort {
                length,
                min: MIN_SAMPLES_IN_VIEWPORT,
            });
        }
        self.length = length;
        self.viewport = Some(Viewport { start: 0, end: length });
        self.update_mapping();
        Ok(())
    }

    pub fn resize(&mut self, width: f64) {
        self.width = sanitize_width(width);
        log::debug!("Waveform width {} px", self.width);
        self.update_mapping();
    }

    /// Jump to an explicit window. Bounds are rounded to whole samples; a
    /// window that would break the invariant is refused.
    pub fn set_viewport(&mut self, start: f64, end: f64) -> bool {
        let (start, end) = (start.round(), end.round());
        let valid = self.viewport.is_some()
            && start.is_finite()
            && end.is_finite()
            && start >= 0.0
            && end <= self.length as f64
            && end - start >= MIN_SAMPLES_IN_VIEWPORT as f64;
        if !valid {
            log::warn!("Ignoring viewport {start}..{end} for {} samples", self.length);
            return false;
        }
        self.viewport = Some(Viewport {
            start: start as usize,
            end: end as usize,
        });
        self.update_mapping();
        true
    }

    /// Scale the window around `anchor_x` (surface pixels). Positive
    /// `delta_y` widens the window, negative narrows it; the sample under the
    /// anchor stays put.
    pub fn zoom(&mut self, delta_y: f64, anchor_x: f64) -> bool {
        let Some(vp) = self.viewport else { return false };
        if self.width <= 0.0 || self.pixel_per_sample <= 0.0 || !anchor_x.is_finite() {
            return false;
        }

        let factor = delta_y / self.pixel_per_sample / self.width * ZOOM_SENSITIVITY;
        if !factor.is_finite() {
            return false;
        }

        let start = (vp.start as f64 - (factor * anchor_x).round()).max(0.0);
        let end = (vp.end as f64 + (factor * (self.width - anchor_x)).round())
            .min(self.length as f64);

        if end - start <= MIN_SAMPLES_IN_VIEWPORT as f64 {
            log::trace!("Zoom saturated at {}..{}", vp.start, vp.end);
            return false;
        }

        let next = Viewport {
            start: start as usize,
            end: end as usize,
        };
        if next == vp {
            return false;
        }
        self.commit(next);
        true
    }

    /// Shift the window by `delta_x` surface pixels, keeping its width.
    pub fn pan(&mut self, delta_x: f64) -> bool {
        let Some(vp) = self.viewport else { return false };
        if self.pixel_per_sample <= 0.0 {
            return false;
        }

        let disp = (delta_x / self.pixel_per_sample).round();
        if !disp.is_finite() || disp == 0.0 {
            return false;
        }

        let start = vp.start as f64 + disp;
        let end = start + vp.len() as f64;
        if start < 0.0 || end >= self.length as f64 {
            log::trace!("Pan saturated at {}..{}", vp.start, vp.end);
            return false;
        }

        self.commit(Viewport {
            start: start as usize,
            end: end as usize,
        });
        true
    }

    /// Sample index under a surface x coordinate.
    pub fn sample_at(&self, x: f64) -> Option<f64> {
        let vp = self.viewport?;
        (self.pixel_per_sample > 0.0).then(|| vp.start as f64 + x / self.pixel_per_sample)
    }

    fn commit(&mut self, viewport: Viewport) {
        self.viewport = Some(viewport);
        let event = WaveformEvent::ViewportChange {
            start: viewport.start,
            end: viewport.end,
        };
        if let Some(listener) = self.listener.as_mut() {
            listener(&event);
        }
        self.update_mapping();
    }

    fn update_mapping(&mut self) {
        self.pixel_per_sample = match self.viewport {
            Some(vp) if self.width > 0.0 => self.width / vp.len() as f64,
            _ => 0.0,
        };
        self.grid_level = grid_level(self.pixel_per_sample);
        self.dirty.mark();
    }
}

fn sanitize_width(width: f64) -> f64 {
    if width.is_finite() { width.max(0.0) } else { 0.0 }
}
