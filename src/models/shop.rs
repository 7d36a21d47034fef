use serde::{Deserialize, Serialize};

/// Tienda tal como viene en shop_list.json
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopRecord {
    pub title: String,
    pub address: String,
    #[serde(default)]
    pub telephone: String,
}
