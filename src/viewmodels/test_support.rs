// Dobles en memoria del SDK, la geolocalización y el timer

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use futures::future::{self, FutureExt, LocalBoxFuture};

use crate::error::MapError;
use crate::maps::{Geolocator, MapSdk, MarkerSpec, Timer};
use crate::models::{Coordinates, ShopRecord};
use crate::state::Lifetime;

pub fn shop(title: &str, address: &str) -> ShopRecord {
    ShopRecord {
        title: title.to_string(),
        address: address.to_string(),
        telephone: "02-000-0000".to_string(),
    }
}

pub struct FakeSdk {
    available: bool,
    container: bool,
    construction_error: Option<String>,
    addresses: HashMap<String, Coordinates>,
    geocode_errors: HashSet<String>,
    keywords: HashMap<String, Coordinates>,
    end_lifetime_on: RefCell<Option<(String, Lifetime)>>,
    calls: RefCell<Vec<String>>,
    maps: RefCell<Vec<(Coordinates, u32)>>,
    markers: RefCell<Vec<MarkerSpec>>,
}

impl FakeSdk {
    pub fn new() -> Self {
        Self {
            available: true,
            container: true,
            construction_error: None,
            addresses: HashMap::new(),
            geocode_errors: HashSet::new(),
            keywords: HashMap::new(),
            end_lifetime_on: RefCell::new(None),
            calls: RefCell::new(Vec::new()),
            maps: RefCell::new(Vec::new()),
            markers: RefCell::new(Vec::new()),
        }
    }

    pub fn with_address(mut self, address: &str, lat: f64, lng: f64) -> Self {
        self.addresses.insert(address.to_string(), Coordinates::new(lat, lng));
        self
    }

    pub fn with_geocode_error(mut self, address: &str) -> Self {
        self.geocode_errors.insert(address.to_string());
        self
    }

    pub fn with_keyword(mut self, keyword: &str, lat: f64, lng: f64) -> Self {
        self.keywords.insert(keyword.to_string(), Coordinates::new(lat, lng));
        self
    }

    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }

    pub fn without_container(mut self) -> Self {
        self.container = false;
        self
    }

    pub fn failing_construction(mut self, message: &str) -> Self {
        self.construction_error = Some(message.to_string());
        self
    }

    /// Simula un desmontaje cuando se consulta `query`
    pub fn end_lifetime_on(self, query: &str, lifetime: &Lifetime) -> Self {
        *self.end_lifetime_on.borrow_mut() = Some((query.to_string(), lifetime.clone()));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn maps(&self) -> Vec<(Coordinates, u32)> {
        self.maps.borrow().clone()
    }

    pub fn markers(&self) -> Vec<MarkerSpec> {
        self.markers.borrow().clone()
    }

    fn lookup(
        &self,
        kind: &str,
        query: &str,
        table: &HashMap<String, Coordinates>,
    ) -> Result<Option<Coordinates>, MapError> {
        self.calls.borrow_mut().push(format!("{}:{}", kind, query));
        if let Some((trigger, lifetime)) = self.end_lifetime_on.borrow().as_ref() {
            if trigger == query {
                lifetime.end();
            }
        }
        if kind == "geocode" && self.geocode_errors.contains(query) {
            return Err(MapError::Sdk("ERROR".to_string()));
        }
        Ok(table.get(query).copied())
    }
}

impl MapSdk for FakeSdk {
    type Map = usize;

    fn is_available(&self) -> bool {
        self.available
    }

    fn has_container(&self, _container_id: &str) -> bool {
        self.container
    }

    fn create_map(
        &self,
        _container_id: &str,
        center: Coordinates,
        level: u32,
    ) -> Result<usize, MapError> {
        if let Some(message) = &self.construction_error {
            return Err(MapError::MapConstruction(message.clone()));
        }
        let mut maps = self.maps.borrow_mut();
        maps.push((center, level));
        Ok(maps.len() - 1)
    }

    fn place_marker(&self, _map: &usize, marker: &MarkerSpec) -> Result<(), MapError> {
        self.markers.borrow_mut().push(marker.clone());
        Ok(())
    }

    fn geocode<'a>(
        &'a self,
        address: &'a str,
    ) -> LocalBoxFuture<'a, Result<Option<Coordinates>, MapError>> {
        future::ready(self.lookup("geocode", address, &self.addresses)).boxed_local()
    }

    fn keyword_search<'a>(
        &'a self,
        keyword: &'a str,
    ) -> LocalBoxFuture<'a, Result<Option<Coordinates>, MapError>> {
        future::ready(self.lookup("keyword", keyword, &self.keywords)).boxed_local()
    }
}

pub struct FakeGeolocator(pub Result<Coordinates, MapError>);

impl Geolocator for FakeGeolocator {
    fn current_position(&self) -> LocalBoxFuture<'_, Result<Coordinates, MapError>> {
        future::ready(self.0.clone()).boxed_local()
    }
}

/// Timer instantáneo que recuerda las esperas pedidas
#[derive(Default)]
pub struct RecordingTimer {
    pub sleeps: RefCell<Vec<u32>>,
}

impl Timer for RecordingTimer {
    fn sleep(&self, millis: u32) -> LocalBoxFuture<'static, ()> {
        self.sleeps.borrow_mut().push(millis);
        future::ready(()).boxed_local()
    }
}
