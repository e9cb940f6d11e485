//! Консоль реестра процессов обработки ПДн (Leptos CSR).

pub mod app;
pub mod domain;
pub mod layout;
pub mod shared;

use wasm_bindgen::prelude::wasm_bindgen;

/// Точка входа: логирование в консоль браузера, хук паники, монтирование
#[wasm_bindgen(start)]
pub fn start() {
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();
    log::debug!("Консоль реестра ПДн запущена");

    leptos::mount::mount_to_body(app::App);
}
