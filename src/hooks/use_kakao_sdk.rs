// ============================================================================
// USE KAKAO SDK HOOK - Bootstrap del SDK mientras haya tiendas
// ============================================================================

use std::rc::Rc;

use yew::prelude::*;

use crate::config::CONFIG;
use crate::maps::{DomSdkHost, SdkBootstrap, SdkHost};
use crate::models::ShopRecord;
use crate::state::SessionAction;

/// `true` cuando `kakao.maps.load` llamó de vuelta
#[hook]
pub fn use_kakao_sdk(
    shops: Rc<Vec<ShopRecord>>,
    api_key: AttrValue,
    dispatch: Callback<SessionAction>,
) -> bool {
    let ready = use_state(|| false);

    {
        let set_ready = {
            let ready = ready.clone();
            Callback::from(move |value: bool| ready.set(value))
        };
        use_effect_with((shops, api_key), move |(shops, api_key)| {
            // Sin tiendas no hace falta el SDK
            let bootstrap = (!shops.is_empty()).then(|| {
                let on_ready = set_ready.reform(|_| true);
                let on_error = Callback::from(move |e| dispatch.emit(SessionAction::Failed(e)));
                SdkBootstrap::start(
                    Rc::new(DomSdkHost::new()),
                    api_key,
                    &CONFIG.timing,
                    on_ready,
                    on_error,
                )
            });

            move || stop_bootstrap(bootstrap.as_ref(), &set_ready)
        });
    }

    *ready
}

/// Teardown del efecto: el próximo bootstrap vuelve a empezar desde "no listo"
fn stop_bootstrap<H: SdkHost + 'static>(
    bootstrap: Option<&SdkBootstrap<H>>,
    set_ready: &Callback<bool>,
) {
    if let Some(bootstrap) = bootstrap {
        bootstrap.cleanup();
    }
    set_ready.emit(false);
}
