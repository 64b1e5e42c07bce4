use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wavescope_core::FrameSource;

type FrameClosure = Closure<dyn FnMut()>;

/// `requestAnimationFrame` ticker. Each tick runs the frame callback and
/// re-arms itself unconditionally; a dirty check inside the callback keeps
/// idle frames cheap.
#[derive(Default)]
pub struct AnimationFrameLoop {
    running: Rc<Cell<bool>>,
}

fn request_frame(cb: &FrameClosure) {
    let Some(window) = web_sys::window() else {
        log::error!("No window object");
        return;
    };
    if let Err(e) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
        log::error!("requestAnimationFrame failed: {:?}", e);
    }
}

impl FrameSource for AnimationFrameLoop {
    fn start(&mut self, mut on_frame: Box<dyn FnMut()>) {
        self.stop();
        // Fresh token per start so a superseded loop winds down on its own.
        let running = Rc::new(Cell::new(true));
        self.running = running.clone();

        // The closure re-arms itself through `slot`, which keeps it alive for
        // as long as frames are requested. The first tick after `stop` empties
        // the slot; wasm-bindgen defers the free until that call returns.
        let slot: Rc<RefCell<Option<FrameClosure>>> = Rc::new(RefCell::new(None));
        let rearm = slot.clone();
        *slot.borrow_mut() = Some(Closure::<dyn FnMut()>::new(move || {
            if !running.get() {
                let stale = rearm.borrow_mut().take();
                drop(stale);
                return;
            }
            on_frame();
            if let Some(cb) = rearm.borrow().as_ref() {
                request_frame(cb);
            }
        }));

        if let Some(cb) = slot.borrow().as_ref() {
            request_frame(cb);
        };
    }

    fn stop(&mut self) {
        self.running.set(false);
    }
}
