// ============================================================================
// MAP SESSION STATE - Estado que dirige el render del mapa
// ============================================================================
// loading = true al inicio → false al terminar todas las tiendas o ante un
// error fatal. El primer error gana (se fija una sola vez).
// ============================================================================

use std::rc::Rc;

use yew::Reducible;

use crate::error::MapError;
use crate::models::ShopRecord;

#[derive(Debug, Clone, PartialEq)]
pub struct SessionError {
    pub message: String,
    /// Aviso no fatal: el mapa sigue visible (ubicación por defecto)
    pub recoverable: bool,
}

impl From<&MapError> for SessionError {
    fn from(error: &MapError) -> Self {
        Self {
            message: error.to_string(),
            recoverable: error.is_recoverable(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionAction {
    ShopsLoaded(Vec<ShopRecord>),
    Failed(MapError),
    /// Todas las tiendas procesadas (o nada que procesar)
    Finished,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapSessionState {
    pub loading: bool,
    pub error: Option<SessionError>,
    pub shops: Rc<Vec<ShopRecord>>,
}

impl Default for MapSessionState {
    fn default() -> Self {
        Self {
            loading: true,
            error: None,
            shops: Rc::new(Vec::new()),
        }
    }
}

impl MapSessionState {
    pub fn apply(&self, action: SessionAction) -> Self {
        let mut next = self.clone();
        match action {
            SessionAction::ShopsLoaded(shops) => {
                // Lista vacía: no habrá SDK ni geocoding, nada que esperar
                if shops.is_empty() {
                    next.loading = false;
                }
                next.shops = Rc::new(shops);
            }
            SessionAction::Failed(error) => {
                if !error.is_recoverable() {
                    next.loading = false;
                }
                if next.error.is_none() {
                    next.error = Some(SessionError::from(&error));
                }
            }
            SessionAction::Finished => next.loading = false,
        }
        next
    }

    /// Error que reemplaza la vista del mapa
    pub fn fatal_error(&self) -> Option<&SessionError> {
        self.error.as_ref().filter(|e| !e.recoverable)
    }

    /// Aviso que se muestra encima del mapa
    pub fn notice(&self) -> Option<&SessionError> {
        self.error.as_ref().filter(|e| e.recoverable)
    }
}

impl Reducible for MapSessionState {
    type Action = SessionAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        Rc::new(self.apply(action))
    }
}
