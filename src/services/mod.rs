pub mod shop_service;
pub mod geolocation;

pub use shop_service::fetch_shop_list;
pub use geolocation::BrowserGeolocator;
