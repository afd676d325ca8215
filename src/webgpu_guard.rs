//! Early WebGPU availability probe for web builds.
//!
//! Runs in `main` before any plugin is added so a browser without
//! `navigator.gpu` gets a readable error instead of a black canvas.

/// `true` when the host browser exposes `navigator.gpu`.
#[cfg(target_arch = "wasm32")]
pub fn webgpu_available() -> bool {
    let Some(win) = web_sys::window() else {
        return false;
    };
    let nav = win.navigator();
    let key = wasm_bindgen::JsValue::from_str("gpu");
    js_sys::Reflect::get(&nav, &key)
        .map(|v| !v.is_undefined())
        .unwrap_or(false)
}

/// Native builds always have a wgpu backend to fall back on.
#[cfg(not(target_arch = "wasm32"))]
pub fn webgpu_available() -> bool {
    true
}

pub const WEBGPU_REQUIRED: &str = "WebGPU (navigator.gpu) is required. Use a WebGPU-enabled browser (Chrome, Edge, Firefox Nightly w/ flag, or Safari Technology Preview).";
