// ============================================================================
// USE SHOP LIST HOOK - Carga única de shop_list.json al montar
// ============================================================================

use yew::prelude::*;

use crate::services::fetch_shop_list;
use crate::state::SessionAction;

#[hook]
pub fn use_shop_list(url: AttrValue, dispatch: Callback<SessionAction>) {
    use_effect_with(url, move |url| {
        let url = url.clone();
        wasm_bindgen_futures::spawn_local(async move {
            match fetch_shop_list(&url).await {
                Ok(shops) => dispatch.emit(SessionAction::ShopsLoaded(shops)),
                Err(e) => {
                    log::error!("❌ Error cargando tiendas: {:?}", e);
                    dispatch.emit(SessionAction::Failed(e));
                }
            }
        });
        || ()
    });
}
