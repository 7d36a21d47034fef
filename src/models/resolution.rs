use std::fmt;

use super::Coordinates;

/// Nivel de la cadena de resolución que encontró la tienda
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionTier {
    RawAddress,
    CleanedAddress,
    KeywordSearch,
}

impl fmt::Display for ResolutionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionTier::RawAddress => write!(f, "raw-address"),
            ResolutionTier::CleanedAddress => write!(f, "cleaned-address"),
            ResolutionTier::KeywordSearch => write!(f, "keyword-search"),
        }
    }
}

/// Resultado por tienda. No se persiste: solo sirve para poner un marcador o loguear
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResolutionOutcome {
    Resolved {
        coordinates: Coordinates,
        tier: ResolutionTier,
    },
    Failed,
}

impl ResolutionOutcome {
    pub fn is_resolved(&self) -> bool {
        matches!(self, ResolutionOutcome::Resolved { .. })
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        match self {
            ResolutionOutcome::Resolved { coordinates, .. } => Some(*coordinates),
            ResolutionOutcome::Failed => None,
        }
    }
}
