// ============================================================================
// ADDRESS - Limpieza de direcciones para el segundo intento de geocoding
// ============================================================================

use regex::Regex;

lazy_static::lazy_static! {
    static ref PAREN_GROUP: Regex = Regex::new(r"\([^()]*\)").expect("regex paréntesis");
    static ref STRAY_PAREN: Regex = Regex::new(r"[()]").expect("regex paréntesis sueltos");
    static ref WHITESPACE: Regex = Regex::new(r"\s+").expect("regex espacios");
    // "5층", "지하 1층" y todo lo que sigue
    static ref FLOOR_SUFFIX: Regex = Regex::new(r"\s*(?:지하\s*)?\d+\s*층.*$").expect("regex piso");
    // "501호" y todo lo que sigue
    static ref UNIT_SUFFIX: Regex = Regex::new(r"\s*\d+\s*호.*$").expect("regex unidad");
}

/// Normaliza una dirección para el geocoder.
///
/// Quita grupos entre paréntesis (con su contenido), colapsa espacios y
/// elimina sufijos de piso (`층`) y de unidad (`호`). Es idempotente.
pub fn clean_address(raw: &str) -> String {
    let mut address = raw.to_string();
    while PAREN_GROUP.is_match(&address) {
        address = PAREN_GROUP.replace_all(&address, " ").into_owned();
    }
    let address = STRAY_PAREN.replace_all(&address, " ");
    let address = WHITESPACE.replace_all(&address, " ");
    let address = FLOOR_SUFFIX.replace(&address, "");
    let address = UNIT_SUFFIX.replace(&address, "");
    address.trim().to_string()
}
