pub mod app;
pub mod shop_map;

pub use app::App;
pub use shop_map::ShopMap;
