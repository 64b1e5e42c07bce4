use std::cell::Cell;
use std::rc::Rc;

use crate::buffer::SampleSource;
use crate::error::WaveformError;
use crate::gesture::{GestureAction, GestureState};
use crate::render::WaveformRenderer;
use crate::style::WaveformStyle;
use crate::surface::DrawingSurface;
use crate::viewport::{ViewportModel, WaveformEvent};

/// Channel count used for layout before a buffer arrives.
const DEFAULT_LAYOUT_CHANNELS: usize = 2;

// ── Dirty flag ────────────────────────────────────────────────────────────

/// "Visual state is stale" signal shared between input handling and the
/// frame callback. Setting it twice before a redraw is the same as once.
#[derive(Clone, Debug, Default)]
pub struct DirtyFlag(Rc<Cell<bool>>);

impl DirtyFlag {
    pub fn mark(&self) {
        self.0.set(true);
    }

    pub fn is_set(&self) -> bool {
        self.0.get()
    }

    /// Check and clear in one step.
    pub fn take(&self) -> bool {
        self.0.replace(false)
    }
}

// ── Frame scheduling ──────────────────────────────────────────────────────

/// Host-side ticker. After `start`, `on_frame` runs once per host frame,
/// and keeps being re-armed whether or not anything was drawn, until `stop`.
pub trait FrameSource {
    fn start(&mut self, on_frame: Box<dyn FnMut()>);
    fn stop(&mut self);
}

// ── Region ────────────────────────────────────────────────────────────────

/// User-marked span of the current view, in surface pixels, `start <= end`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Region {
    pub start: f64,
    pub end: f64,
}

impl Region {
    pub fn width(&self) -> f64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

// ── View ──────────────────────────────────────────────────────────────────

/// Everything behind one waveform canvas: the loaded buffer, the viewport,
/// the in-progress pointer gesture and the selected region.
pub struct WaveformView {
    buffer: Option<Rc<dyn SampleSource>>,
    model: ViewportModel,
    gesture: GestureState,
    region: Option<Region>,
    renderer: WaveformRenderer,
    dirty: DirtyFlag,
}

impl WaveformView {
    pub fn new(style: WaveformStyle, width: f64) -> Self {
        let dirty = DirtyFlag::default();
        Self {
            buffer: None,
            model: ViewportModel::new(width, dirty.clone()),
            gesture: GestureState::default(),
            region: None,
            renderer: WaveformRenderer::new(style),
            dirty,
        }
    }

    /// Receive `viewport-change` notifications.
    pub fn set_listener(&mut self, listener: impl FnMut(&WaveformEvent) + 'static) {
        self.model.set_listener(listener);
    }

    /// Swap in a new buffer and show all of it. A buffer too short to hold
    /// the minimum window is refused and the current one kept.
    pub fn set_buffer(&mut self, buffer: Rc<dyn SampleSource>) -> Result<(), WaveformError> {
        if buffer.channel_count() == 0 {
            return Err(WaveformError::NoChannels);
        }
        self.model.set_length(buffer.len())?;
        log::debug!(
            "Waveform buffer: {} channel(s), {} samples",
            buffer.channel_count(),
            buffer.len()
        );
        self.buffer = Some(buffer);
        self.region = None;
        self.gesture = GestureState::default();
        Ok(())
    }

    pub fn buffer(&self) -> Option<&Rc<dyn SampleSource>> {
        self.buffer.as_ref()
    }

    pub fn model(&self) -> &ViewportModel {
        &self.model
    }

    pub fn gesture(&self) -> &GestureState {
        &self.gesture
    }

    pub fn region(&self) -> Option<Region> {
        self.region
    }

    pub fn style(&self) -> &WaveformStyle {
        self.renderer.style()
    }

    /// Handle for whoever schedules frames.
    pub fn dirty(&self) -> DirtyFlag {
        self.dirty.clone()
    }

    pub fn channel_count(&self) -> usize {
        self.buffer
            .as_ref()
            .map_or(DEFAULT_LAYOUT_CHANNELS, |b| b.channel_count())
    }

    /// Height the host should give the surface.
    pub fn canvas_height(&self) -> f64 {
        self.style().canvas_height(self.channel_count())
    }

    pub fn resize(&mut self, width: f64) {
        self.model.resize(width);
    }

    pub fn set_viewport(&mut self, start: f64, end: f64) -> bool {
        self.model.set_viewport(start, end)
    }

    pub fn zoom(&mut self, delta_y: f64, anchor_x: f64) -> bool {
        self.model.zoom(delta_y, anchor_x)
    }

    pub fn pan(&mut self, delta_x: f64) -> bool {
        self.model.pan(delta_x)
    }

    /// Mark a pixel span; the ends may come in either order. A zero-width
    /// span leaves the current region alone.
    pub fn select_region(&mut self, x1: f64, x2: f64) {
        if x1 == x2 {
            return;
        }
        self.region = Some(Region {
            start: x1.min(x2),
            end: x1.max(x2),
        });
        self.dirty.mark();
    }

    pub fn clear_region(&mut self) {
        if self.region.take().is_some() {
            self.dirty.mark();
        }
    }

    // ── Pointer input ──

    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.gesture = self.gesture.clicked(x, y);
    }

    /// Press with the selection modifier held.
    pub fn pointer_down_select(&mut self, x: f64, y: f64) {
        self.gesture = self.gesture.select_started(x, y);
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        let (next, action) = self.gesture.dragged(x, y);
        self.gesture = next;
        match action {
            Some(GestureAction::Zoom { delta_y, anchor_x }) => {
                self.model.zoom(delta_y, anchor_x);
            }
            Some(GestureAction::Pan { delta_x }) => {
                self.model.pan(delta_x);
            }
            // dragging back onto the origin drops the selection
            Some(GestureAction::Select { from, to }) if from == to => self.clear_region(),
            Some(GestureAction::Select { from, to }) => self.select_region(from, to),
            None => {}
        }
    }

    pub fn pointer_up(&mut self) {
        self.gesture = self.gesture.released();
    }

    // ── Frames ──

    /// Frame callback body. Redraws only when something changed since the
    /// last frame; returns whether it drew.
    pub fn render_frame(&mut self, surface: &mut dyn DrawingSurface) -> bool {
        if !self.dirty.take() {
            return false;
        }
        let Some(buffer) = self.buffer.as_deref() else {
            return false;
        };
        self.renderer.render(surface, buffer, &self.model, self.region);
        true
    }
}
