// ============================================================================
// ERRORES - Taxonomía de errores del mapa de tiendas
// ============================================================================
// Cada variante visible para el usuario tiene UN mensaje fijo
// ============================================================================

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MapError {
    /// Estado HTTP no exitoso o JSON inválido al cargar la lista de tiendas
    #[error("매장 목록을 불러오지 못했습니다.")]
    ResourceLoad(String),

    #[error("지도 SDK를 불러오지 못했습니다.")]
    SdkMissing,

    #[error("지도를 표시할 영역을 찾을 수 없습니다.")]
    ContainerMissing,

    #[error("현재 위치를 가져올 수 없어 기본 위치를 표시합니다.")]
    GeolocationDenied(String),

    #[error("지도 스크립트 로드에 실패했습니다.")]
    ScriptLoad,

    #[error("지도를 생성하는 중 오류가 발생했습니다.")]
    MapConstruction(String),

    /// Fallo puntual del SDK (geocoder / places). Solo afecta a un nivel de resolución
    #[error("map SDK error: {0}")]
    Sdk(String),
}

impl MapError {
    /// Solo la geolocalización denegada permite seguir mostrando el mapa
    pub fn is_recoverable(&self) -> bool {
        matches!(self, MapError::GeolocationDenied(_))
    }

    /// Detalle técnico para los logs (el mensaje de usuario es fijo)
    pub fn detail(&self) -> Option<&str> {
        match self {
            MapError::ResourceLoad(d)
            | MapError::GeolocationDenied(d)
            | MapError::MapConstruction(d)
            | MapError::Sdk(d) => Some(d),
            _ => None,
        }
    }
}

/// Describe una excepción JS para los logs
pub fn describe_js(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            js_sys::Reflect::get(value, &JsValue::from_str("message"))
                .ok()
                .and_then(|m| m.as_string())
        })
        .unwrap_or_else(|| format!("{:?}", value))
}
