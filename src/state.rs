use leptos::prelude::*;
use wavescope_core::{Viewport, WaveformStyle};

/// Element holding an optional JSON style override, e.g.
/// `<script id="wavescope-style" type="application/json">{"height": 120}</script>`.
const STYLE_ELEMENT_ID: &str = "wavescope-style";

#[derive(Clone, Copy)]
pub struct AppState {
    pub style: StoredValue<WaveformStyle>,
    /// Mirrors the last viewport-change event from the view.
    pub viewport: RwSignal<Option<Viewport>>,
    pub last_event: RwSignal<Option<String>>,
    pub length: RwSignal<usize>,
    pub channels: RwSignal<usize>,
    pub source_name: RwSignal<Option<String>>,
    pub loading: RwSignal<bool>,
    pub load_error: RwSignal<Option<String>>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            style: StoredValue::new(style_from_document()),
            viewport: RwSignal::new(None),
            last_event: RwSignal::new(None),
            length: RwSignal::new(0),
            channels: RwSignal::new(0),
            source_name: RwSignal::new(None),
            loading: RwSignal::new(false),
            load_error: RwSignal::new(None),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

fn style_from_document() -> WaveformStyle {
    let json = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(STYLE_ELEMENT_ID))
        .and_then(|el| el.text_content());
    let Some(json) = json else {
        return WaveformStyle::default();
    };
    match WaveformStyle::from_json(&json) {
        Ok(style) => {
            log::debug!("Loaded style override from #{}", STYLE_ELEMENT_ID);
            style
        }
        Err(e) => {
            log::warn!("Ignoring malformed style override: {}", e);
            WaveformStyle::default()
        }
    }
}
