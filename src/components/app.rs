use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlInputElement;

use crate::audio::demo::{demo_buffer, DEMO_SAMPLE_RATE};
use crate::audio::web_buffer::decode_file;
use crate::components::waveform_view::{show_buffer, WaveformCanvas};
use crate::state::AppState;

const DEMO_SECONDS: f64 = 4.0;

fn load_demo(state: &AppState) {
    match demo_buffer(DEMO_SAMPLE_RATE, DEMO_SECONDS) {
        Ok(buffer) => show_buffer(state, "demo".into(), buffer),
        Err(e) => log::error!("Demo signal failed: {}", e),
    }
}

#[component]
pub fn App() -> impl IntoView {
    let state = AppState::new();
    provide_context(state);

    // Runs after mount, once the view exists.
    Effect::new(move || load_demo(&state));

    view! {
        <div class="app">
            <Toolbar />
            <WaveformCanvas />
            <StatusLine />
        </div>
    }
}

#[component]
fn Toolbar() -> impl IntoView {
    let state = expect_context::<AppState>();

    let on_file = move |ev: web_sys::Event| {
        let Some(target) = ev.target() else { return };
        let input: HtmlInputElement = target.unchecked_into();
        let Some(file) = input.files().and_then(|list| list.get(0)) else { return };
        input.set_value("");
        state.loading.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            let name = file.name();
            match decode_file(file).await {
                Ok(buffer) => show_buffer(&state, name, buffer),
                Err(e) => {
                    log::error!("{}", e);
                    state.load_error.set(Some(e));
                }
            }
            state.loading.set(false);
        });
    };

    view! {
        <div class="toolbar">
            <span style="color: #666">"Wavescope"</span>
            <input type="file" accept="audio/*" on:change=on_file />
            <button on:click=move |_| load_demo(&state)>"Demo"</button>
            {move || state.loading.get().then(|| view! { <span>"Decoding…"</span> })}
        </div>
    }
}

#[component]
fn StatusLine() -> impl IntoView {
    let state = expect_context::<AppState>();

    let summary = move || {
        let name = state.source_name.get().unwrap_or_default();
        match state.viewport.get() {
            Some(vp) => format!(
                "{}  {} ch  {} samples  view {}..{} ({} samples)",
                name,
                state.channels.get(),
                state.length.get(),
                vp.start,
                vp.end,
                vp.len()
            ),
            None => "No buffer".to_string(),
        }
    };

    view! {
        <div class="status">
            <span>{summary}</span>
            <span class="hint">"drag up/down to zoom, sideways to pan, shift+drag to select"</span>
            {move || state.last_event.get().map(|json| view! { <code class="event">{json}</code> })}
            {move || state.load_error.get().map(|e| view! { <span class="error">{e}</span> })}
        </div>
    }
}
