// ============================================================================
// KAKAO SDK - Implementación web de MapSdk sobre kakao.maps
// ============================================================================

use std::cell::RefCell;

use futures::channel::oneshot;
use futures::future::{FutureExt, LocalBoxFuture};
use serde::Deserialize;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

use super::traits::{InfoWindowMode, MapSdk, MarkerSpec};
use crate::error::{describe_js, MapError};
use crate::models::Coordinates;
use crate::utils::kakao_ffi::{
    self, Geocoder, KakaoInfoWindow, KakaoMap, KakaoMarker, LatLng, Places, STATUS_OK,
};

/// Resultado de addressSearch / keywordSearch (solo los campos que usamos)
#[derive(Debug, Clone, Deserialize)]
pub struct SearchHit {
    pub x: String,
    pub y: String,
}

/// Clasificación del `status` que devuelven los servicios de Kakao
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchStatus {
    Ok,
    ZeroResult,
    Error(String),
}

impl SearchStatus {
    pub fn from_kakao(status: &str) -> Self {
        match status {
            STATUS_OK => SearchStatus::Ok,
            "ZERO_RESULT" => SearchStatus::ZeroResult,
            other => SearchStatus::Error(other.to_string()),
        }
    }
}

/// Primer resultado con coordenadas válidas
pub fn first_hit(hits: &[SearchHit]) -> Option<Coordinates> {
    hits.iter()
        .find_map(|hit| Coordinates::from_kakao_xy(&hit.x, &hit.y))
}

/// SDK de Kakao Maps cargado en `window.kakao`
#[derive(Default)]
pub struct KakaoSdk {
    geocoder: RefCell<Option<Geocoder>>,
    places: RefCell<Option<Places>>,
}

impl KakaoSdk {
    pub fn new() -> Self {
        Self::default()
    }

    fn geocoder(&self) -> Result<Geocoder, MapError> {
        if let Some(geocoder) = self.geocoder.borrow().as_ref() {
            return Ok(geocoder.clone());
        }
        let geocoder = Geocoder::new().map_err(|e| MapError::Sdk(describe_js(&e)))?;
        *self.geocoder.borrow_mut() = Some(geocoder.clone());
        Ok(geocoder)
    }

    fn places(&self) -> Result<Places, MapError> {
        if let Some(places) = self.places.borrow().as_ref() {
            return Ok(places.clone());
        }
        let places = Places::new().map_err(|e| MapError::Sdk(describe_js(&e)))?;
        *self.places.borrow_mut() = Some(places.clone());
        Ok(places)
    }
}

/// Callback `(result, status)` de un solo uso conectado a un oneshot.
/// `once_into_js` libera el closure al ejecutarse, aunque el future ya no exista.
fn search_callback() -> (JsValue, oneshot::Receiver<(JsValue, String)>) {
    let (tx, rx) = oneshot::channel();
    let callback = Closure::once_into_js(move |result: JsValue, status: JsValue| {
        let status = status.as_string().unwrap_or_default();
        let _ = tx.send((result, status));
    });
    (callback, rx)
}

async fn await_search(
    rx: oneshot::Receiver<(JsValue, String)>,
) -> Result<Option<Coordinates>, MapError> {
    let (result, status) = rx
        .await
        .map_err(|_| MapError::Sdk("callback de búsqueda descartado".to_string()))?;

    match SearchStatus::from_kakao(&status) {
        SearchStatus::Ok => {
            let hits: Vec<SearchHit> = serde_wasm_bindgen::from_value(result)
                .map_err(|e| MapError::Sdk(format!("resultado inválido: {}", e)))?;
            Ok(first_hit(&hits))
        }
        SearchStatus::ZeroResult => Ok(None),
        SearchStatus::Error(status) => Err(MapError::Sdk(status)),
    }
}

fn lat_lng(coordinates: Coordinates) -> LatLng {
    LatLng::new(coordinates.latitude, coordinates.longitude)
}

impl MapSdk for KakaoSdk {
    type Map = KakaoMap;

    fn is_available(&self) -> bool {
        kakao_ffi::namespace_ready() && kakao_ffi::services_ready()
    }

    fn has_container(&self, container_id: &str) -> bool {
        web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(container_id))
            .is_some()
    }

    fn create_map(
        &self,
        container_id: &str,
        center: Coordinates,
        level: u32,
    ) -> Result<KakaoMap, MapError> {
        let container = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(container_id))
            .ok_or(MapError::ContainerMissing)?;

        let center: JsValue = lat_lng(center).into();
        let options = kakao_ffi::js_object(&[
            ("center", &center),
            ("level", &JsValue::from(level)),
        ])
        .map_err(|e| MapError::MapConstruction(describe_js(&e)))?;

        KakaoMap::new(&container, &options).map_err(|e| MapError::MapConstruction(describe_js(&e)))
    }

    fn place_marker(&self, map: &KakaoMap, marker: &MarkerSpec) -> Result<(), MapError> {
        let position: JsValue = lat_lng(marker.position).into();
        let map_value: &JsValue = map.as_ref();
        let marker_options = kakao_ffi::js_object(&[
            ("map", map_value),
            ("position", &position),
            ("title", &JsValue::from_str(&marker.title)),
        ])
        .map_err(|e| MapError::Sdk(describe_js(&e)))?;
        let kakao_marker = KakaoMarker::new(&marker_options).map_err(|e| MapError::Sdk(describe_js(&e)))?;

        let info_options = kakao_ffi::js_object(&[("content", &JsValue::from_str(&marker.info_html))])
            .map_err(|e| MapError::Sdk(describe_js(&e)))?;
        let info_window =
            KakaoInfoWindow::new(&info_options).map_err(|e| MapError::Sdk(describe_js(&e)))?;

        match marker.info_window {
            InfoWindowMode::Open => info_window.open(map, &kakao_marker),
            InfoWindowMode::OnClick => {
                let map = map.clone();
                let target = kakao_marker.clone();
                // El listener vive mientras viva el marcador: se deja en el heap JS
                let handler = Closure::<dyn FnMut()>::new(move || {
                    info_window.open(&map, &target);
                })
                .into_js_value();
                kakao_ffi::add_listener(kakao_marker.as_ref(), "click", handler.unchecked_ref());
            }
        }
        Ok(())
    }

    fn geocode<'a>(
        &'a self,
        address: &'a str,
    ) -> LocalBoxFuture<'a, Result<Option<Coordinates>, MapError>> {
        async move {
            let geocoder = self.geocoder()?;
            let (callback, rx) = search_callback();
            geocoder.address_search(address, callback.unchecked_ref());
            await_search(rx).await
        }
        .boxed_local()
    }

    fn keyword_search<'a>(
        &'a self,
        keyword: &'a str,
    ) -> LocalBoxFuture<'a, Result<Option<Coordinates>, MapError>> {
        async move {
            let places = self.places()?;
            let (callback, rx) = search_callback();
            places.keyword_search(keyword, callback.unchecked_ref());
            await_search(rx).await
        }
        .boxed_local()
    }
}
