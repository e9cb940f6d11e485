//! Окружение страницы-хоста: сессия, настройки, адреса платформы
//!
//! Страница платформы объявляет глобальные переменные `uid`, `db`, `xsrf`
//! и, при необходимости, объект `PDN_CONSOLE_CONFIG` с настройками консоли.

use contracts::system::{ConsoleConfig, SessionContext};
use wasm_bindgen::JsValue;

/// Глобальная переменная окна как JSON; `Null`, если не объявлена
fn global_value(name: &str) -> serde_json::Value {
    let Some(window) = web_sys::window() else {
        return serde_json::Value::Null;
    };
    match js_sys::Reflect::get(&window, &JsValue::from_str(name)) {
        Ok(value) if !value.is_undefined() && !value.is_null() => {
            serde_wasm_bindgen::from_value(value).unwrap_or_else(|e| {
                log::warn!("Глобальная переменная {} не прочитана: {}", name, e);
                serde_json::Value::Null
            })
        }
        _ => serde_json::Value::Null,
    }
}

/// Контекст сессии из глобальных переменных страницы
pub fn read_session() -> SessionContext {
    SessionContext::from_globals(&global_value("uid"), &global_value("db"), &global_value("xsrf"))
}

/// Настройки консоли: значения по умолчанию, поверх них `PDN_CONSOLE_CONFIG`
pub fn read_config() -> ConsoleConfig {
    let Some(window) = web_sys::window() else {
        return ConsoleConfig::default();
    };
    let raw = match js_sys::Reflect::get(&window, &JsValue::from_str("PDN_CONSOLE_CONFIG")) {
        Ok(value) if !value.is_undefined() && !value.is_null() => value,
        _ => return ConsoleConfig::default(),
    };
    match serde_wasm_bindgen::from_value(raw) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("PDN_CONSOLE_CONFIG проигнорирован: {}", e);
            ConsoleConfig::default()
        }
    }
}

/// Полный адрес относительного пути платформы: `/<db>/<path>`
pub fn api_url(session: &SessionContext, path: &str) -> String {
    format!("{}{}", session.api_prefix(), path.trim_start_matches('/'))
}

pub fn redirect(url: &str) {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.location().set_href(url) {
            log::error!("Переход на {} не выполнен: {:?}", url, e);
        }
    }
}

/// Плавная прокрутка окна к началу страницы
pub fn scroll_to_top() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let options = web_sys::ScrollToOptions::new();
    options.set_top(0.0);
    options.set_behavior(web_sys::ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}
