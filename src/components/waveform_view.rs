use std::cell::RefCell;
use std::rc::Rc;

use leptos::ev::MouseEvent;
use leptos::prelude::*;
use wavescope_core::{
    FrameSource, SampleBuffer, SampleSource, Viewport, WaveformEvent, WaveformView,
};
use web_sys::HtmlCanvasElement;

use crate::canvas::frame_loop::AnimationFrameLoop;
use crate::canvas::surface::CanvasSurface;
use crate::state::AppState;

thread_local! {
    static VIEW: RefCell<Option<WaveformView>> = const { RefCell::new(None) };
    static FRAMES: RefCell<AnimationFrameLoop> = RefCell::new(AnimationFrameLoop::default());
}

/// Run `f` against the mounted view, if there is one.
pub fn with_view<R>(f: impl FnOnce(&mut WaveformView) -> R) -> Option<R> {
    VIEW.with(|v| v.borrow_mut().as_mut().map(f))
}

/// Hand a freshly loaded buffer to the view and mirror the outcome into app
/// state. The view keeps its previous buffer when this one is refused.
pub fn show_buffer(state: &AppState, name: String, buffer: SampleBuffer) {
    let (channels, length) = (buffer.channel_count(), buffer.len());
    match with_view(|view| view.set_buffer(Rc::new(buffer))) {
        Some(Ok(())) => {
            log::info!("Showing {}: {} ch, {} samples", name, channels, length);
            state.channels.set(channels);
            state.length.set(length);
            // loading shows everything without a viewport-change event
            state.viewport.set(Some(Viewport { start: 0, end: length }));
            state.source_name.set(Some(name));
            state.load_error.set(None);
        }
        Some(Err(e)) => {
            log::warn!("Refused {}: {}", name, e);
            state.load_error.set(Some(format!("{name}: {e}")));
        }
        None => log::error!("Waveform view is not mounted"),
    }
}

/// Match the backing store to the element's layout width and the height the
/// channel layout needs.
fn fit_canvas(canvas: &HtmlCanvasElement) {
    let width = canvas.client_width().max(0) as u32;
    with_view(|view| {
        let height = view.canvas_height().ceil() as u32;
        if canvas.width() != width {
            canvas.set_width(width);
        }
        if canvas.height() != height {
            canvas.set_height(height);
        }
        view.resize(width as f64);
    });
}

fn canvas_point(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
    let rect = canvas.get_bounding_client_rect();
    (ev.client_x() as f64 - rect.left(), ev.client_y() as f64 - rect.top())
}

#[component]
pub fn WaveformCanvas() -> impl IntoView {
    let state = expect_context::<AppState>();
    let canvas_ref = NodeRef::<leptos::html::Canvas>::new();

    VIEW.with(|v| {
        let mut view = WaveformView::new(state.style.get_value(), 0.0);
        view.set_listener(move |event| {
            match event {
                WaveformEvent::ViewportChange { start, end } => {
                    state.viewport.set(Some(Viewport { start: *start, end: *end }));
                }
            }
            match serde_json::to_string(event) {
                Ok(json) => state.last_event.set(Some(json)),
                Err(e) => log::error!("Failed to serialize event: {}", e),
            }
        });
        *v.borrow_mut() = Some(view);
    });

    // Start the frame loop once the canvas is in the DOM.
    Effect::new(move || {
        let Some(canvas_el) = canvas_ref.get() else { return };
        let canvas: &HtmlCanvasElement = canvas_el.as_ref();
        let Some(mut surface) = CanvasSurface::from_canvas(canvas) else {
            log::error!("Canvas has no 2d context");
            return;
        };
        FRAMES.with(|f| {
            f.borrow_mut().start(Box::new(move || {
                with_view(|view| view.render_frame(&mut surface));
            }))
        });
    });

    // Channel count decides the canvas height.
    Effect::new(move || {
        let _ = state.channels.get();
        let Some(canvas_el) = canvas_ref.get() else { return };
        fit_canvas(canvas_el.as_ref());
    });

    let resize = window_event_listener(leptos::ev::resize, move |_| {
        let Some(canvas_el) = canvas_ref.get_untracked() else { return };
        fit_canvas(canvas_el.as_ref());
    });

    on_cleanup(move || {
        resize.remove();
        FRAMES.with(|f| f.borrow_mut().stop());
        VIEW.with(|v| v.borrow_mut().take());
    });

    let on_mousedown = move |ev: MouseEvent| {
        ev.prevent_default();
        let Some(canvas_el) = canvas_ref.get_untracked() else { return };
        let (x, y) = canvas_point(canvas_el.as_ref(), &ev);
        with_view(|view| {
            if ev.shift_key() {
                view.pointer_down_select(x, y);
            } else {
                view.pointer_down(x, y);
            }
        });
    };

    let on_mousemove = move |ev: MouseEvent| {
        let Some(canvas_el) = canvas_ref.get_untracked() else { return };
        let (x, y) = canvas_point(canvas_el.as_ref(), &ev);
        with_view(|view| view.pointer_move(x, y));
    };

    let on_mouseup = move |_: MouseEvent| {
        with_view(|view| view.pointer_up());
    };

    // Double click drops the selection.
    let on_dblclick = move |_: MouseEvent| {
        with_view(|view| view.clear_region());
    };

    view! {
        <div class="waveform-container">
            <canvas
                node_ref=canvas_ref
                on:mousedown=on_mousedown
                on:mousemove=on_mousemove
                on:mouseup=on_mouseup
                on:mouseleave=on_mouseup
                on:dblclick=on_dblclick
                style="display: block; width: 100%; cursor: crosshair;"
            />
        </div>
    }
}
