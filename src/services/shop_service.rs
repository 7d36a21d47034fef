// ============================================================================
// SHOP SERVICE - SOLO carga de shop_list.json (Stateless)
// ============================================================================

use gloo_net::http::Request;

use crate::error::MapError;
use crate::models::ShopRecord;

/// Descargar la lista de tiendas del recurso estático
pub async fn fetch_shop_list(url: &str) -> Result<Vec<ShopRecord>, MapError> {
    log::info!("📋 Cargando lista de tiendas: {}", url);

    let response = Request::get(url)
        .send()
        .await
        .map_err(|e| MapError::ResourceLoad(format!("Network error: {}", e)))?;

    check_status(response.ok(), response.status(), &response.status_text())?;

    let body = response
        .text()
        .await
        .map_err(|e| MapError::ResourceLoad(format!("Read error: {}", e)))?;

    let shops = parse_shop_list(&body)?;
    log::info!("✅ {} tiendas cargadas", shops.len());
    Ok(shops)
}

fn check_status(ok: bool, status: u16, status_text: &str) -> Result<(), MapError> {
    if ok {
        Ok(())
    } else {
        Err(MapError::ResourceLoad(format!("HTTP {}: {}", status, status_text)))
    }
}

pub fn parse_shop_list(body: &str) -> Result<Vec<ShopRecord>, MapError> {
    serde_json::from_str(body).map_err(|e| MapError::ResourceLoad(format!("Parse error: {}", e)))
}
