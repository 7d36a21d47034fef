// ============================================================================
// SHOP MAP - Mapa de tiendas con Kakao Maps (Yew + WASM)
// ============================================================================
// - Services: SOLO comunicación (shop_list.json, geolocalización)
// - Maps: capacidades del SDK (trait) + implementación Kakao
// - ViewModels: cadena de resolución + inicialización del mapa
// - State: MapSessionState (reducer) + RunContext por intento
// - Hooks / Components: wiring Yew
// ============================================================================

pub mod config;
pub mod error;
pub mod models;
pub mod utils;
pub mod maps;
pub mod services;
pub mod state;
pub mod viewmodels;
pub mod hooks;
pub mod components;

pub use components::App;
pub use error::MapError;
