// ============================================================================
// ADDRESS RESOLVER - Cadena de resolución dirección → coordenadas
// ============================================================================
// Orden estricto, se detiene en el primer acierto:
//   1. dirección original  2. dirección limpia  3. búsqueda por nombre
// ============================================================================

use futures::future::LocalBoxFuture;

use crate::error::MapError;
use crate::maps::MapSdk;
use crate::models::{Coordinates, ResolutionOutcome, ResolutionTier, ShopRecord};
use crate::state::RunGuard;
use crate::utils::address::clean_address;

/// Un nivel de la cadena
pub trait ResolutionStrategy<S: MapSdk> {
    fn tier(&self) -> ResolutionTier;

    /// Texto a consultar para esta tienda
    fn query(&self, shop: &ShopRecord) -> String;

    fn lookup<'a>(
        &self,
        sdk: &'a S,
        query: &'a str,
    ) -> LocalBoxFuture<'a, Result<Option<Coordinates>, MapError>>;
}

pub struct RawAddress;
pub struct CleanedAddress;
pub struct KeywordSearch;

impl<S: MapSdk> ResolutionStrategy<S> for RawAddress {
    fn tier(&self) -> ResolutionTier {
        ResolutionTier::RawAddress
    }

    fn query(&self, shop: &ShopRecord) -> String {
        shop.address.clone()
    }

    fn lookup<'a>(
        &self,
        sdk: &'a S,
        query: &'a str,
    ) -> LocalBoxFuture<'a, Result<Option<Coordinates>, MapError>> {
        sdk.geocode(query)
    }
}

impl<S: MapSdk> ResolutionStrategy<S> for CleanedAddress {
    fn tier(&self) -> ResolutionTier {
        ResolutionTier::CleanedAddress
    }

    fn query(&self, shop: &ShopRecord) -> String {
        clean_address(&shop.address)
    }

    fn lookup<'a>(
        &self,
        sdk: &'a S,
        query: &'a str,
    ) -> LocalBoxFuture<'a, Result<Option<Coordinates>, MapError>> {
        sdk.geocode(query)
    }
}

impl<S: MapSdk> ResolutionStrategy<S> for KeywordSearch {
    fn tier(&self) -> ResolutionTier {
        ResolutionTier::KeywordSearch
    }

    fn query(&self, shop: &ShopRecord) -> String {
        shop.title.trim().to_string()
    }

    fn lookup<'a>(
        &self,
        sdk: &'a S,
        query: &'a str,
    ) -> LocalBoxFuture<'a, Result<Option<Coordinates>, MapError>> {
        sdk.keyword_search(query)
    }
}

pub struct AddressResolver<S: MapSdk> {
    strategies: Vec<Box<dyn ResolutionStrategy<S>>>,
}

impl<S: MapSdk + 'static> Default for AddressResolver<S> {
    fn default() -> Self {
        Self::with_strategies(vec![
            Box::new(RawAddress),
            Box::new(CleanedAddress),
            Box::new(KeywordSearch),
        ])
    }
}

impl<S: MapSdk> AddressResolver<S> {
    pub fn with_strategies(strategies: Vec<Box<dyn ResolutionStrategy<S>>>) -> Self {
        Self { strategies }
    }

    pub fn tiers(&self) -> Vec<ResolutionTier> {
        self.strategies.iter().map(|s| s.tier()).collect()
    }

    /// Resolver una tienda. `None` si el guard caducó a mitad de camino
    pub async fn resolve(
        &self,
        sdk: &S,
        shop: &ShopRecord,
        guard: &RunGuard,
    ) -> Option<ResolutionOutcome> {
        for strategy in &self.strategies {
            if !guard.is_active() {
                return None;
            }

            let tier = strategy.tier();
            let query = strategy.query(shop);
            if query.is_empty() {
                log::debug!("⏭️ {} [{}]: consulta vacía", shop.title, tier);
                continue;
            }

            match strategy.lookup(sdk, &query).await {
                Ok(Some(coordinates)) => {
                    log::info!(
                        "📍 {} resuelta vía {} ({}, {})",
                        shop.title,
                        tier,
                        coordinates.latitude,
                        coordinates.longitude
                    );
                    return Some(ResolutionOutcome::Resolved { coordinates, tier });
                }
                Ok(None) => log::debug!("🔍 {} [{}]: sin resultados para {:?}", shop.title, tier, query),
                Err(e) => log::warn!("⚠️ {} [{}]: {}", shop.title, tier, e),
            }
        }

        if !guard.is_active() {
            return None;
        }
        Some(ResolutionOutcome::Failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Lifetime;
    use crate::viewmodels::test_support::{shop, FakeSdk};
    use futures::executor::block_on;

    const RAW: &str = "서울시 강남구 테헤란로 123 (역삼동) 5층 501호";
    const CLEAN: &str = "서울시 강남구 테헤란로 123";

    #[test]
    fn raw_address_hit_stops_chain() {
        let sdk = FakeSdk::new().with_address(RAW, 37.50, 127.03);
        let resolver = AddressResolver::<FakeSdk>::default();
        let guard = Lifetime::new().begin();

        let outcome = block_on(resolver.resolve(&sdk, &shop("카페", RAW), &guard));
        assert_eq!(
            outcome,
            Some(ResolutionOutcome::Resolved {
                coordinates: Coordinates::new(37.50, 127.03),
                tier: ResolutionTier::RawAddress,
            })
        );
        assert_eq!(sdk.calls(), vec![format!("geocode:{}", RAW)]);
    }

    #[test]
    fn falls_back_to_cleaned_address() {
        let sdk = FakeSdk::new().with_address(CLEAN, 37.51, 127.04);
        let resolver = AddressResolver::<FakeSdk>::default();
        let guard = Lifetime::new().begin();

        let outcome = block_on(resolver.resolve(&sdk, &shop("카페", RAW), &guard)).unwrap();
        assert_eq!(
            outcome,
            ResolutionOutcome::Resolved {
                coordinates: Coordinates::new(37.51, 127.04),
                tier: ResolutionTier::CleanedAddress,
            }
        );
        assert_eq!(
            sdk.calls(),
            vec![format!("geocode:{}", RAW), format!("geocode:{}", CLEAN)]
        );
    }

    #[test]
    fn sdk_error_counts_as_miss_and_keyword_wins() {
        let sdk = FakeSdk::new()
            .with_geocode_error(RAW)
            .with_keyword("카페", 37.52, 127.05);
        let resolver = AddressResolver::<FakeSdk>::default();
        let guard = Lifetime::new().begin();

        let outcome = block_on(resolver.resolve(&sdk, &shop("카페", RAW), &guard)).unwrap();
        assert_eq!(outcome.coordinates(), Some(Coordinates::new(37.52, 127.05)));
        assert_eq!(sdk.calls().len(), 3);
        assert_eq!(sdk.calls()[2], "keyword:카페");
    }

    #[test]
    fn all_tiers_missing_is_failed() {
        let sdk = FakeSdk::new();
        let resolver = AddressResolver::<FakeSdk>::default();
        let guard = Lifetime::new().begin();

        let outcome = block_on(resolver.resolve(&sdk, &shop("없는 가게", RAW), &guard));
        assert_eq!(outcome, Some(ResolutionOutcome::Failed));
    }

    #[test]
    fn blank_title_skips_keyword_search() {
        let sdk = FakeSdk::new();
        let resolver = AddressResolver::<FakeSdk>::default();
        let guard = Lifetime::new().begin();

        let outcome = block_on(resolver.resolve(&sdk, &shop("  ", CLEAN), &guard));
        assert_eq!(outcome, Some(ResolutionOutcome::Failed));
        assert!(sdk.calls().iter().all(|c| c.starts_with("geocode:")));
    }

    #[test]
    fn custom_strategy_order() {
        let sdk = FakeSdk::new()
            .with_address(RAW, 1.0, 1.0)
            .with_keyword("카페", 2.0, 2.0);
        let resolver = AddressResolver::<FakeSdk>::with_strategies(vec![
            Box::new(KeywordSearch),
            Box::new(RawAddress),
        ]);
        assert_eq!(
            resolver.tiers(),
            vec![ResolutionTier::KeywordSearch, ResolutionTier::RawAddress]
        );
        let guard = Lifetime::new().begin();

        let outcome = block_on(resolver.resolve(&sdk, &shop("카페", RAW), &guard)).unwrap();
        assert_eq!(outcome.coordinates(), Some(Coordinates::new(2.0, 2.0)));
    }

    #[test]
    fn stale_guard_abandons() {
        let sdk = FakeSdk::new().with_address(RAW, 1.0, 1.0);
        let resolver = AddressResolver::<FakeSdk>::default();
        let lifetime = Lifetime::new();
        let guard = lifetime.begin();
        lifetime.end();

        assert_eq!(block_on(resolver.resolve(&sdk, &shop("카페", RAW), &guard)), None);
        assert!(sdk.calls().is_empty());
    }
}
