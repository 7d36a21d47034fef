pub mod use_shop_list;
pub mod use_kakao_sdk;
pub mod use_shop_map;

pub use use_shop_list::use_shop_list;
pub use use_kakao_sdk::use_kakao_sdk;
pub use use_shop_map::{use_shop_map, UseShopMapHandle};
