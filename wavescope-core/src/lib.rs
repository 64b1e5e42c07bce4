//! Core of the wavescope waveform viewer.
//!
//! Everything here is independent of the browser: viewport mapping, grid
//! selection, amplitude reduction, pointer gesture interpretation and the
//! dirty-flag gated render pass. Drawing goes through [`DrawingSurface`] so
//! the same code paints a `<canvas>` or a [`RecordingSurface`] in tests.

pub mod buffer;
pub mod error;
pub mod gesture;
pub mod grid;
pub mod reduce;
pub mod render;
pub mod style;
pub mod surface;
pub mod view;
pub mod viewport;

pub use buffer::{SampleBuffer, SampleSource};
pub use error::WaveformError;
pub use gesture::{DragMode, GestureAction, GestureMode, GestureState, Point};
pub use grid::{grid_level, grid_size, GRID_SIZES};
pub use reduce::{reduce_channel, Column, Trace, TracePoint};
pub use render::WaveformRenderer;
pub use style::WaveformStyle;
pub use surface::{DrawCommand, DrawingSurface, RecordingSurface};
pub use view::{DirtyFlag, FrameSource, Region, WaveformView};
pub use viewport::{Viewport, ViewportModel, WaveformEvent, MIN_SAMPLES_IN_VIEWPORT};
