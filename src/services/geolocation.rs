// ============================================================================
// GEOLOCATION - navigator.geolocation.getCurrentPosition como future
// ============================================================================

use futures::channel::oneshot;
use futures::future::{FutureExt, LocalBoxFuture};
use js_sys::Reflect;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

use crate::error::MapError;
use crate::maps::Geolocator;
use crate::models::Coordinates;

#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserGeolocator;

fn number_at(value: &JsValue, key: &str) -> Option<f64> {
    Reflect::get(value, &JsValue::from_str(key)).ok()?.as_f64()
}

/// `position.coords.{latitude, longitude}`
fn position_coordinates(position: &JsValue) -> Option<Coordinates> {
    let coords = Reflect::get(position, &JsValue::from_str("coords")).ok()?;
    Some(Coordinates::new(
        number_at(&coords, "latitude")?,
        number_at(&coords, "longitude")?,
    ))
}

/// Detalle técnico de un GeolocationPositionError (`code`, `message`)
fn denied_detail(code: Option<f64>, message: Option<String>) -> String {
    match (code, message.filter(|m| !m.is_empty())) {
        (Some(code), Some(message)) => format!("code {}: {}", code, message),
        (Some(code), None) => format!("code {}", code),
        (None, Some(message)) => message,
        (None, None) => "error desconocido".to_string(),
    }
}

impl BrowserGeolocator {
    async fn locate() -> Result<Coordinates, MapError> {
        let geolocation = web_sys::window()
            .ok_or_else(|| MapError::GeolocationDenied("sin window".into()))?
            .navigator()
            .geolocation()
            .map_err(|_| MapError::GeolocationDenied("geolocalización no soportada".into()))?;

        let (tx, rx) = oneshot::channel::<Result<Coordinates, MapError>>();
        let tx = std::rc::Rc::new(std::cell::RefCell::new(Some(tx)));

        // Solo se ejecuta uno de los dos; el otro queda en el heap JS
        let on_success = {
            let tx = tx.clone();
            Closure::once_into_js(move |position: JsValue| {
                let result = position_coordinates(&position).ok_or_else(|| {
                    MapError::GeolocationDenied("posición sin coordenadas".into())
                });
                if let Some(tx) = tx.borrow_mut().take() {
                    let _ = tx.send(result);
                }
            })
        };
        let on_error = {
            let tx = tx.clone();
            Closure::once_into_js(move |error: JsValue| {
                let message = Reflect::get(&error, &JsValue::from_str("message"))
                    .ok()
                    .and_then(|m| m.as_string());
                let result = Err(MapError::GeolocationDenied(denied_detail(
                    number_at(&error, "code"),
                    message,
                )));
                if let Some(tx) = tx.borrow_mut().take() {
                    let _ = tx.send(result);
                }
            })
        };

        let _ = geolocation.get_current_position_with_error_callback(
            on_success.unchecked_ref(),
            Some(on_error.unchecked_ref()),
        );

        rx.await
            .map_err(|_| MapError::GeolocationDenied("sin respuesta".into()))?
    }
}

impl Geolocator for BrowserGeolocator {
    fn current_position(&self) -> LocalBoxFuture<'_, Result<Coordinates, MapError>> {
        Self::locate().boxed_local()
    }
}
