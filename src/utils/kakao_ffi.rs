// ============================================================================
// KAKAO FFI - Foreign Function Interface para el SDK de Kakao Maps
// ============================================================================
// Solo bindings a `kakao.maps.*` - Sin estado, sin lógica
// ============================================================================

use js_sys::{Function, Object, Reflect};
use wasm_bindgen::prelude::*;

/// `kakao.maps.services.Status.OK`
pub const STATUS_OK: &str = "OK";

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["kakao", "maps"], js_name = LatLng)]
    #[derive(Debug, Clone)]
    pub type LatLng;

    #[wasm_bindgen(constructor, js_namespace = ["kakao", "maps"], js_class = "LatLng")]
    pub fn new(latitude: f64, longitude: f64) -> LatLng;
}

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["kakao", "maps"], js_name = Map)]
    #[derive(Debug, Clone)]
    pub type KakaoMap;

    #[wasm_bindgen(constructor, catch, js_namespace = ["kakao", "maps"], js_class = "Map")]
    pub fn new(container: &web_sys::Element, options: &JsValue) -> Result<KakaoMap, JsValue>;
}

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["kakao", "maps"], js_name = Marker)]
    #[derive(Debug, Clone)]
    pub type KakaoMarker;

    #[wasm_bindgen(constructor, catch, js_namespace = ["kakao", "maps"], js_class = "Marker")]
    pub fn new(options: &JsValue) -> Result<KakaoMarker, JsValue>;
}

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["kakao", "maps"], js_name = InfoWindow)]
    #[derive(Debug, Clone)]
    pub type KakaoInfoWindow;

    #[wasm_bindgen(constructor, catch, js_namespace = ["kakao", "maps"], js_class = "InfoWindow")]
    pub fn new(options: &JsValue) -> Result<KakaoInfoWindow, JsValue>;

    #[wasm_bindgen(method)]
    pub fn open(this: &KakaoInfoWindow, map: &KakaoMap, marker: &KakaoMarker);
}

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["kakao", "maps", "event"], js_name = addListener)]
    pub fn add_listener(target: &JsValue, event_type: &str, handler: &Function);

    #[wasm_bindgen(catch, js_namespace = ["kakao", "maps"], js_name = load)]
    pub fn load(callback: &Function) -> Result<(), JsValue>;
}

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["kakao", "maps", "services"], js_name = Geocoder)]
    #[derive(Debug, Clone)]
    pub type Geocoder;

    #[wasm_bindgen(constructor, catch, js_namespace = ["kakao", "maps", "services"], js_class = "Geocoder")]
    pub fn new() -> Result<Geocoder, JsValue>;

    /// callback(result: Array, status: string)
    #[wasm_bindgen(method, js_name = addressSearch)]
    pub fn address_search(this: &Geocoder, address: &str, callback: &Function);
}

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["kakao", "maps", "services"], js_name = Places)]
    #[derive(Debug, Clone)]
    pub type Places;

    #[wasm_bindgen(constructor, catch, js_namespace = ["kakao", "maps", "services"], js_class = "Places")]
    pub fn new() -> Result<Places, JsValue>;

    /// callback(result: Array, status: string)
    #[wasm_bindgen(method, js_name = keywordSearch)]
    pub fn keyword_search(this: &Places, keyword: &str, callback: &Function);
}

/// Helper: `window.kakao.maps.load` existe (script evaluado con autoload=false).
/// Los constructores solo aparecen después de `load(cb)`.
pub fn loader_ready() -> bool {
    web_sys::window()
        .and_then(|w| get_path(w.as_ref(), &["kakao", "maps", "load"]))
        .map(|v| v.is_function())
        .unwrap_or(false)
}

/// Helper: `window.kakao.maps` con sus constructores principales cargados
pub fn namespace_ready() -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    let Some(maps) = get_path(window.as_ref(), &["kakao", "maps"]) else {
        return false;
    };
    ["LatLng", "Map", "Marker", "InfoWindow"]
        .iter()
        .all(|name| get_path(&maps, &[*name]).map(|v| v.is_function()).unwrap_or(false))
}

/// Helper: `window.kakao.maps.services` (librería `services`)
pub fn services_ready() -> bool {
    web_sys::window()
        .and_then(|w| get_path(w.as_ref(), &["kakao", "maps", "services", "Geocoder"]))
        .map(|v| v.is_function())
        .unwrap_or(false)
}

/// Helper: construir un objeto JS `{ key: value, ... }`
pub fn js_object(entries: &[(&str, &JsValue)]) -> Result<JsValue, JsValue> {
    let object = Object::new();
    for (key, value) in entries {
        Reflect::set(&object, &JsValue::from_str(key), value)?;
    }
    Ok(object.into())
}

fn get_path(root: &JsValue, path: &[&str]) -> Option<JsValue> {
    let mut current = root.clone();
    for key in path {
        let next = Reflect::get(&current, &JsValue::from_str(key)).ok()?;
        if next.is_undefined() || next.is_null() {
            return None;
        }
        current = next;
    }
    Some(current)
}
