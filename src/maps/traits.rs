use futures::future::LocalBoxFuture;

use crate::error::MapError;
use crate::models::Coordinates;

/// Cómo se muestra la ventana de información de un marcador
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoWindowMode {
    /// Abierta desde el principio (marcador de ubicación actual)
    Open,
    /// Se abre al hacer click en el marcador
    OnClick,
}

/// Marcador a colocar en el mapa
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSpec {
    pub position: Coordinates,
    pub title: String,
    /// HTML ya escapado de la ventana de información
    pub info_html: String,
    pub info_window: InfoWindowMode,
}

/// Capacidades del SDK de mapas que usa el inicializador
pub trait MapSdk {
    /// Instancia de mapa creada por el SDK
    type Map: Clone;

    /// Constructores de mapa / coordenadas disponibles
    fn is_available(&self) -> bool;

    /// Existe el contenedor DOM del mapa
    fn has_container(&self, container_id: &str) -> bool;

    fn create_map(
        &self,
        container_id: &str,
        center: Coordinates,
        level: u32,
    ) -> Result<Self::Map, MapError>;

    fn place_marker(&self, map: &Self::Map, marker: &MarkerSpec) -> Result<(), MapError>;

    /// Geocodificar una dirección. `Ok(None)` = sin resultados
    fn geocode<'a>(
        &'a self,
        address: &'a str,
    ) -> LocalBoxFuture<'a, Result<Option<Coordinates>, MapError>>;

    /// Búsqueda por palabra clave (nombre de la tienda)
    fn keyword_search<'a>(
        &'a self,
        keyword: &'a str,
    ) -> LocalBoxFuture<'a, Result<Option<Coordinates>, MapError>>;
}

/// Ubicación actual del usuario
pub trait Geolocator {
    fn current_position(&self) -> LocalBoxFuture<'_, Result<Coordinates, MapError>>;
}

/// Temporizador para espaciar las peticiones al geocoder
pub trait Timer {
    fn sleep(&self, millis: u32) -> LocalBoxFuture<'static, ()>;
}

/// Entorno donde arranca el SDK: documento, `kakao.maps.load` y temporizadores.
///
/// Los callbacks se entregan como `FnOnce` en caja; cada uno se ejecuta a lo
/// sumo una vez.
pub trait SdkHost {
    /// Ya hay un `<script>` del SDK en el documento
    fn script_present(&self) -> bool;

    /// `kakao.maps.load` disponible
    fn loader_ready(&self) -> bool;

    fn inject_script(
        &self,
        src: &str,
        on_load: Box<dyn FnOnce()>,
        on_error: Box<dyn FnOnce()>,
    ) -> Result<(), MapError>;

    /// Quitar el script inyectado (si lo hay)
    fn remove_script(&self);

    /// `kakao.maps.load(on_ready)`
    fn load(&self, on_ready: Box<dyn FnOnce()>) -> Result<(), MapError>;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>);

    /// Cancelar la tarea programada pendiente
    fn cancel_scheduled(&self);
}
