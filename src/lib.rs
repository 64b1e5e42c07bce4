pub mod audio;
pub mod canvas;
pub mod components;
pub mod state;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Debug).ok();
    log::info!("wavescope starting");
    leptos::mount::mount_to_body(components::app::App);
}
