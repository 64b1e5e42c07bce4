pub mod app;
pub mod waveform_view;
