// ============================================================================
// MAP INITIALIZER - Mapa + ubicación del usuario + marcadores de tiendas
// ============================================================================
// Se ejecuta cuando el SDK avisa que está listo. Todo el estado del intento
// vive en un RunContext nuevo; cada await comprueba el RunGuard.
// ============================================================================

use std::cell::RefCell;

use futures::future::join_all;
use yew::Callback;

use crate::config::MapConfig;
use crate::error::MapError;
use crate::maps::{Geolocator, InfoWindowMode, MapSdk, MarkerSpec, Timer};
use crate::models::{Coordinates, ResolutionOutcome, ShopRecord};
use crate::state::{Recorded, RunContext, RunGuard, SessionAction};
use crate::utils::address::clean_address;
use crate::viewmodels::address_resolver::AddressResolver;
use crate::viewmodels::marker_content::{
    label_html, shop_info_html, CURRENT_LOCATION_LABEL, DEFAULT_LOCATION_LABEL,
};

#[derive(Debug, Clone, PartialEq)]
pub struct InitSettings {
    pub map: MapConfig,
    pub stagger_ms: u32,
}

/// Tienda que no se pudo ubicar con ningún nivel
#[derive(Debug, Clone, PartialEq)]
pub struct FailedShop {
    pub title: String,
    pub raw_address: String,
    pub cleaned_address: String,
}

/// Resumen del intento (para logs y tests)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InitReport {
    pub center: Option<Coordinates>,
    pub used_default_location: bool,
    pub succeeded: usize,
    pub failed: usize,
    pub failures: Vec<FailedShop>,
    pub abandoned: bool,
}

pub struct MapInitializer<'a, S: MapSdk, G: Geolocator, T: Timer> {
    sdk: &'a S,
    geolocator: &'a G,
    timer: &'a T,
    resolver: AddressResolver<S>,
    settings: InitSettings,
}

impl<'a, S, G, T> MapInitializer<'a, S, G, T>
where
    S: MapSdk + 'static,
    G: Geolocator,
    T: Timer,
{
    pub fn new(sdk: &'a S, geolocator: &'a G, timer: &'a T, settings: InitSettings) -> Self {
        Self {
            sdk,
            geolocator,
            timer,
            resolver: AddressResolver::default(),
            settings,
        }
    }
}

impl<'a, S, G, T> MapInitializer<'a, S, G, T>
where
    S: MapSdk,
    G: Geolocator,
    T: Timer,
{
    pub fn with_resolver(mut self, resolver: AddressResolver<S>) -> Self {
        self.resolver = resolver;
        self
    }

    pub async fn run(
        &self,
        shops: &[ShopRecord],
        guard: &RunGuard,
        dispatch: &Callback<SessionAction>,
    ) -> InitReport {
        let mut report = InitReport::default();
        let container_id = self.settings.map.container_id.as_str();

        if !self.sdk.is_available() {
            self.fail(guard, dispatch, MapError::SdkMissing);
            return report;
        }
        if !self.sdk.has_container(container_id) {
            self.fail(guard, dispatch, MapError::ContainerMissing);
            return report;
        }

        let position = self.geolocator.current_position().await;
        if !guard.is_active() {
            report.abandoned = true;
            return report;
        }

        let (center, level, label, notice) = match position {
            Ok(coordinates) => (coordinates, self.settings.map.user_level, CURRENT_LOCATION_LABEL, None),
            Err(e) => {
                log::warn!("📡 Geolocalización no disponible ({:?}), usando ubicación por defecto", e);
                let notice = match e {
                    MapError::GeolocationDenied(_) => e,
                    other => MapError::GeolocationDenied(other.to_string()),
                };
                let center = Coordinates::new(
                    self.settings.map.default_center_lat,
                    self.settings.map.default_center_lng,
                );
                (center, self.settings.map.default_level, DEFAULT_LOCATION_LABEL, Some(notice))
            }
        };

        let map = match self.sdk.create_map(container_id, center, level) {
            Ok(map) => map,
            Err(e) => {
                self.fail(guard, dispatch, e);
                return report;
            }
        };
        report.center = Some(center);
        log::info!("🗺️ Mapa creado en ({}, {}) nivel {}", center.latitude, center.longitude, level);

        let location_marker = MarkerSpec {
            position: center,
            title: label.to_string(),
            info_html: label_html(label),
            info_window: InfoWindowMode::Open,
        };
        if let Err(e) = self.sdk.place_marker(&map, &location_marker) {
            log::warn!("⚠️ No se pudo colocar el marcador de ubicación: {}", e);
        }

        // Sin ubicación del usuario no se resuelven tiendas
        if let Some(notice) = notice {
            report.used_default_location = true;
            dispatch.emit(SessionAction::Failed(notice));
            dispatch.emit(SessionAction::Finished);
            return report;
        }

        if shops.is_empty() {
            log::info!("📭 Sin tiendas que ubicar");
            dispatch.emit(SessionAction::Finished);
            return report;
        }

        let ctx = RunContext::new(guard.generation(), shops.len());
        let failures = RefCell::new(Vec::new());
        log::info!("🔎 Resolviendo {} tiendas (generación {})", shops.len(), ctx.generation());

        join_all(shops.iter().enumerate().map(|(index, shop)| {
            self.resolve_shop(index, shop, &map, &ctx, guard, dispatch, &failures)
        }))
        .await;

        report.succeeded = ctx.succeeded();
        report.failed = ctx.failed();
        report.failures = failures.into_inner();
        report.abandoned = !ctx.is_complete();
        log::info!(
            "🏁 Tiendas ubicadas: {} ok / {} fallidas de {}",
            report.succeeded,
            report.failed,
            ctx.expected()
        );
        report
    }

    #[allow(clippy::too_many_arguments)]
    async fn resolve_shop(
        &self,
        index: usize,
        shop: &ShopRecord,
        map: &S::Map,
        ctx: &RunContext,
        guard: &RunGuard,
        dispatch: &Callback<SessionAction>,
        failures: &RefCell<Vec<FailedShop>>,
    ) {
        let delay = u32::try_from(index)
            .unwrap_or(u32::MAX)
            .saturating_mul(self.settings.stagger_ms);
        self.timer.sleep(delay).await;
        if !guard.is_active() {
            return;
        }

        let Some(mut outcome) = self.resolver.resolve(self.sdk, shop, guard).await else {
            return;
        };
        if !guard.is_active() {
            return;
        }

        if let ResolutionOutcome::Resolved { coordinates, .. } = outcome {
            let marker = MarkerSpec {
                position: coordinates,
                title: shop.title.clone(),
                info_html: shop_info_html(shop),
                info_window: InfoWindowMode::OnClick,
            };
            if let Err(e) = self.sdk.place_marker(map, &marker) {
                log::warn!("⚠️ Marcador de {} no colocado: {}", shop.title, e);
                outcome = ResolutionOutcome::Failed;
            }
        }

        if outcome == ResolutionOutcome::Failed {
            let failed = FailedShop {
                title: shop.title.clone(),
                raw_address: shop.address.clone(),
                cleaned_address: clean_address(&shop.address),
            };
            log::warn!(
                "❌ Tienda sin ubicar: {} | original: {:?} | limpia: {:?}",
                failed.title,
                failed.raw_address,
                failed.cleaned_address
            );
            failures.borrow_mut().push(failed);
        }

        if ctx.record(index, &outcome) == Recorded::Completed {
            dispatch.emit(SessionAction::Finished);
        }
    }

    fn fail(&self, guard: &RunGuard, dispatch: &Callback<SessionAction>, error: MapError) {
        if guard.is_active() {
            log::error!("❌ Inicialización del mapa: {} ({:?})", error, error.detail());
            dispatch.emit(SessionAction::Failed(error));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::state::{Lifetime, MapSessionState};
    use crate::viewmodels::test_support::{shop, FakeGeolocator, FakeSdk, RecordingTimer};
    use futures::executor::block_on;
    use std::rc::Rc;

    const USER: Coordinates = Coordinates {
        latitude: 37.4979,
        longitude: 127.0276,
    };

    fn settings() -> InitSettings {
        let config = AppConfig::default();
        InitSettings {
            map: config.map_config,
            stagger_ms: config.timing.geocode_stagger_ms,
        }
    }

    /// Ejecuta el inicializador y pliega las acciones sobre el estado de sesión
    fn run(
        sdk: &FakeSdk,
        geo: FakeGeolocator,
        timer: &RecordingTimer,
        shops: &[ShopRecord],
        guard: &RunGuard,
    ) -> (InitReport, MapSessionState) {
        let actions = Rc::new(RefCell::new(Vec::new()));
        let dispatch = {
            let actions = actions.clone();
            Callback::from(move |action: SessionAction| actions.borrow_mut().push(action))
        };

        let initializer = MapInitializer::new(sdk, &geo, timer, settings());
        let report = block_on(initializer.run(shops, guard, &dispatch));

        let mut state =
            MapSessionState::default().apply(SessionAction::ShopsLoaded(shops.to_vec()));
        for action in actions.borrow().iter().cloned() {
            state = state.apply(action);
        }
        (report, state)
    }

    fn shop_markers(sdk: &FakeSdk) -> Vec<MarkerSpec> {
        sdk.markers()
            .into_iter()
            .filter(|m| m.info_window == InfoWindowMode::OnClick)
            .collect()
    }

    #[test]
    fn every_shop_is_counted_and_loading_clears() {
        let sdk = FakeSdk::new()
            .with_address("주소 A", 37.1, 127.1)
            .with_address("주소 B", 37.2, 127.2)
            .with_keyword("가게 D", 37.4, 127.4);
        let shops = vec![
            shop("가게 A", "주소 A"),
            shop("가게 B", "주소 B (2층)"),
            shop("가게 C", "주소 C"),
            shop("가게 D", "주소 D"),
        ];
        let timer = RecordingTimer::default();
        let guard = Lifetime::new().begin();

        let (report, state) = run(&sdk, FakeGeolocator(Ok(USER)), &timer, &shops, &guard);

        assert_eq!(report.succeeded + report.failed, shops.len());
        assert_eq!((report.succeeded, report.failed), (3, 1));
        assert!(!report.abandoned);
        assert!(!state.loading);
        assert!(state.error.is_none());
        assert_eq!(shop_markers(&sdk).len(), 3);
        assert_eq!(sdk.maps(), vec![(USER, 4)]);
    }

    #[test]
    fn user_marker_opens_info_window() {
        let sdk = FakeSdk::new();
        let timer = RecordingTimer::default();
        let guard = Lifetime::new().begin();

        run(&sdk, FakeGeolocator(Ok(USER)), &timer, &[], &guard);

        let markers = sdk.markers();
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].position, USER);
        assert_eq!(markers[0].info_window, InfoWindowMode::Open);
        assert_eq!(markers[0].title, CURRENT_LOCATION_LABEL);
    }

    #[test]
    fn empty_list_makes_no_lookups() {
        let sdk = FakeSdk::new();
        let timer = RecordingTimer::default();
        let guard = Lifetime::new().begin();

        let (report, state) = run(&sdk, FakeGeolocator(Ok(USER)), &timer, &[], &guard);

        assert!(!state.loading);
        assert!(sdk.calls().is_empty());
        assert_eq!(report.succeeded + report.failed, 0);
    }

    #[test]
    fn keyword_fallback_places_single_marker() {
        let raw = "서울시 강남구 테헤란로 123 (역삼동) 5층 501호";
        let sdk = FakeSdk::new().with_keyword("역삼 카페", 37.5001, 127.0362);
        let timer = RecordingTimer::default();
        let guard = Lifetime::new().begin();

        let (report, state) = run(
            &sdk,
            FakeGeolocator(Ok(USER)),
            &timer,
            &[shop("역삼 카페", raw)],
            &guard,
        );

        let markers = shop_markers(&sdk);
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].position, Coordinates::new(37.5001, 127.0362));
        // La ventana muestra la dirección original, no la limpia
        assert!(markers[0].info_html.contains("(역삼동) 5층 501호"));
        assert_eq!(report.succeeded, 1);
        assert!(!state.loading);
    }

    #[test]
    fn failed_shop_does_not_halt_the_rest() {
        let sdk = FakeSdk::new().with_address("주소 B", 37.2, 127.2);
        let shops = vec![shop("없는 가게", "주소 A 3층"), shop("가게 B", "주소 B")];
        let timer = RecordingTimer::default();
        let guard = Lifetime::new().begin();

        let (report, state) = run(&sdk, FakeGeolocator(Ok(USER)), &timer, &shops, &guard);

        assert_eq!(
            report.failures,
            vec![FailedShop {
                title: "없는 가게".into(),
                raw_address: "주소 A 3층".into(),
                cleaned_address: "주소 A".into(),
            }]
        );
        let markers = shop_markers(&sdk);
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].title, "가게 B");
        assert!(!markers.iter().any(|m| m.title == "없는 가게"));
        assert!(!state.loading);
    }

    #[test]
    fn resolutions_are_staggered_by_index() {
        let sdk = FakeSdk::new();
        let shops = vec![shop("a", "1"), shop("b", "2"), shop("c", "3")];
        let timer = RecordingTimer::default();
        let guard = Lifetime::new().begin();

        run(&sdk, FakeGeolocator(Ok(USER)), &timer, &shops, &guard);

        let mut sleeps = timer.sleeps.borrow().clone();
        sleeps.sort_unstable();
        assert_eq!(sleeps, vec![0, 150, 300]);
    }

    #[test]
    fn geolocation_failure_uses_default_center() {
        let sdk = FakeSdk::new().with_address("주소 A", 37.1, 127.1);
        let timer = RecordingTimer::default();
        let guard = Lifetime::new().begin();

        let (report, state) = run(
            &sdk,
            FakeGeolocator(Err(MapError::GeolocationDenied("denied".into()))),
            &timer,
            &[shop("가게 A", "주소 A")],
            &guard,
        );

        let default = Coordinates::new(37.5665, 126.9780);
        assert_eq!(report.center, Some(default));
        assert!(report.used_default_location);
        assert_eq!(sdk.maps(), vec![(default, 8)]);
        assert_eq!(sdk.markers().len(), 1);
        assert!(sdk.calls().is_empty());
        assert!(!state.loading);
        assert_eq!(
            state.notice().map(|e| e.message.clone()),
            Some(MapError::GeolocationDenied(String::new()).to_string())
        );
        assert!(state.fatal_error().is_none());
    }

    #[test]
    fn missing_sdk_is_fatal() {
        let sdk = FakeSdk::new().unavailable();
        let timer = RecordingTimer::default();
        let guard = Lifetime::new().begin();

        let (_, state) = run(&sdk, FakeGeolocator(Ok(USER)), &timer, &[shop("a", "1")], &guard);

        assert!(!state.loading);
        assert_eq!(
            state.fatal_error().map(|e| e.message.clone()),
            Some(MapError::SdkMissing.to_string())
        );
        assert!(sdk.maps().is_empty());
    }

    #[test]
    fn missing_container_is_fatal() {
        let sdk = FakeSdk::new().without_container();
        let timer = RecordingTimer::default();
        let guard = Lifetime::new().begin();

        let (_, state) = run(&sdk, FakeGeolocator(Ok(USER)), &timer, &[shop("a", "1")], &guard);

        assert!(!state.loading);
        assert_eq!(
            state.fatal_error().map(|e| e.message.clone()),
            Some(MapError::ContainerMissing.to_string())
        );
    }

    #[test]
    fn map_construction_exception_is_fatal() {
        let sdk = FakeSdk::new().failing_construction("TypeError");
        let timer = RecordingTimer::default();
        let guard = Lifetime::new().begin();

        let (report, state) =
            run(&sdk, FakeGeolocator(Ok(USER)), &timer, &[shop("a", "1")], &guard);

        assert!(report.center.is_none());
        assert!(!state.loading);
        assert!(state.fatal_error().is_some());
        assert!(sdk.calls().is_empty());
    }

    #[test]
    fn teardown_abandons_in_flight_resolutions() {
        let lifetime = Lifetime::new();
        let sdk = FakeSdk::new()
            .with_address("주소 A", 37.1, 127.1)
            .with_address("주소 B", 37.2, 127.2)
            .end_lifetime_on("주소 B", &lifetime);
        let shops = vec![shop("가게 A", "주소 A"), shop("가게 B", "주소 B")];
        let timer = RecordingTimer::default();
        let guard = lifetime.begin();

        let (report, state) = run(&sdk, FakeGeolocator(Ok(USER)), &timer, &shops, &guard);

        // "가게 B" se resolvió tras el desmontaje: sin marcador ni conteo
        assert!(report.abandoned);
        assert_eq!(report.succeeded, 1);
        assert_eq!(shop_markers(&sdk).len(), 1);
        assert!(state.loading);
    }

    #[test]
    fn stale_run_dispatches_nothing() {
        let lifetime = Lifetime::new();
        let stale = lifetime.begin();
        let _current = lifetime.begin();
        let sdk = FakeSdk::new().unavailable();
        let timer = RecordingTimer::default();

        let (_, state) = run(&sdk, FakeGeolocator(Ok(USER)), &timer, &[shop("a", "1")], &stale);

        assert!(state.error.is_none());
        assert!(state.loading);
    }

    #[test]
    fn custom_resolver_is_used() {
        use crate::viewmodels::address_resolver::{AddressResolver, RawAddress};

        let sdk = FakeSdk::new().with_keyword("가게 A", 37.1, 127.1);
        let geo = FakeGeolocator(Ok(USER));
        let timer = RecordingTimer::default();
        let guard = Lifetime::new().begin();
        let initializer = MapInitializer::new(&sdk, &geo, &timer, settings())
            .with_resolver(AddressResolver::with_strategies(vec![Box::new(RawAddress)]));

        let report = block_on(initializer.run(
            &[shop("가게 A", "주소 A")],
            &guard,
            &Callback::noop(),
        ));

        assert_eq!(report.failed, 1);
        assert_eq!(sdk.calls(), vec!["geocode:주소 A".to_string()]);
    }
}
