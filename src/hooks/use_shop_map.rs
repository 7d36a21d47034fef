// ============================================================================
// USE SHOP MAP HOOK - Carga → SDK → inicialización del mapa
// ============================================================================

use yew::prelude::*;

use crate::config::CONFIG;
use crate::hooks::{use_kakao_sdk, use_shop_list};
use crate::maps::{GlooTimer, KakaoSdk};
use crate::services::BrowserGeolocator;
use crate::state::{Lifetime, MapSessionState, SessionAction};
use crate::viewmodels::{InitSettings, MapInitializer};

#[derive(Clone)]
pub struct UseShopMapHandle {
    pub state: UseReducerHandle<MapSessionState>,
}

#[hook]
pub fn use_shop_map(container_id: AttrValue) -> UseShopMapHandle {
    let state = use_reducer(MapSessionState::default);
    let lifetime = use_memo((), |_| Lifetime::new());

    let dispatch = {
        let dispatcher = state.dispatcher();
        Callback::from(move |action: SessionAction| dispatcher.dispatch(action))
    };

    use_shop_list(AttrValue::from(CONFIG.shop_list_url.clone()), dispatch.clone());

    let sdk_ready = use_kakao_sdk(
        state.shops.clone(),
        AttrValue::from(CONFIG.kakao_api_key.clone()),
        dispatch.clone(),
    );

    {
        let shops = state.shops.clone();
        use_effect_with((sdk_ready, shops, container_id), move |(ready, shops, container_id)| {
            // Cada intento tiene su propia generación; la anterior queda obsoleta
            let guard = (*ready && !shops.is_empty()).then(|| lifetime.begin());

            if let Some(guard) = guard {
                let shops = shops.clone();
                let mut map_config = CONFIG.map_config.clone();
                map_config.container_id = container_id.to_string();
                let settings = InitSettings {
                    map: map_config,
                    stagger_ms: CONFIG.timing.geocode_stagger_ms,
                };

                wasm_bindgen_futures::spawn_local(async move {
                    let sdk = KakaoSdk::new();
                    let geolocator = BrowserGeolocator;
                    let timer = GlooTimer;
                    let initializer = MapInitializer::new(&sdk, &geolocator, &timer, settings);

                    let report = initializer.run(&shops, &guard, &dispatch).await;
                    if report.abandoned {
                        log::info!("🛑 Inicialización abandonada (generación {})", guard.generation());
                    } else if !report.failures.is_empty() {
                        log::warn!("⚠️ {} tiendas sin ubicar", report.failures.len());
                    }
                });
            }

            move || lifetime.end()
        });
    }

    UseShopMapHandle { state }
}
