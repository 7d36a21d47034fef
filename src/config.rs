use crate::models::Coordinates;

/// Clave pública por defecto si KAKAO_MAP_API_KEY no está definida
const FALLBACK_KAKAO_KEY: &str = "d9a1b5e1c3f2a4b6c8d0e2f4a6b8c0d2";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub kakao_api_key: String,
    pub shop_list_url: String,
    pub enable_logging: bool,
    pub map_config: MapConfig,
    pub timing: TimingConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapConfig {
    pub container_id: String,
    /// Centro usado cuando la geolocalización falla (Ayuntamiento de Seúl)
    pub default_center_lat: f64,
    pub default_center_lng: f64,
    /// Nivel Kakao: menor = más cerca
    pub user_level: u32,
    pub default_level: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimingConfig {
    /// Separación entre tiendas (índice × stagger) para no saturar el geocoder
    pub geocode_stagger_ms: u32,
    /// Espera antes de re-comprobar un script del SDK ya presente
    pub sdk_poll_delay_ms: u32,
    /// Espera antes del reintento tras el onload del script
    pub sdk_retry_delay_ms: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            kakao_api_key: FALLBACK_KAKAO_KEY.to_string(),
            shop_list_url: "/shop_list.json".to_string(),
            enable_logging: true,
            map_config: MapConfig::default(),
            timing: TimingConfig::default(),
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            container_id: "map".to_string(),
            default_center_lat: 37.5665,
            default_center_lng: 126.9780,
            user_level: 4,
            default_level: 8,
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            geocode_stagger_ms: 150,
            sdk_poll_delay_ms: 500,
            sdk_retry_delay_ms: 100,
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            kakao_api_key: non_empty(option_env!("KAKAO_MAP_API_KEY"))
                .unwrap_or(FALLBACK_KAKAO_KEY)
                .to_string(),
            shop_list_url: option_env!("SHOP_LIST_URL")
                .unwrap_or("/shop_list.json")
                .to_string(),
            enable_logging: parse_or(option_env!("ENABLE_LOGGING"), defaults.enable_logging),
            map_config: MapConfig {
                container_id: defaults.map_config.container_id,
                default_center_lat: parse_or(
                    option_env!("DEFAULT_MAP_CENTER_LAT"),
                    defaults.map_config.default_center_lat,
                ),
                default_center_lng: parse_or(
                    option_env!("DEFAULT_MAP_CENTER_LNG"),
                    defaults.map_config.default_center_lng,
                ),
                user_level: parse_or(option_env!("USER_MAP_LEVEL"), defaults.map_config.user_level),
                default_level: parse_or(
                    option_env!("DEFAULT_MAP_LEVEL"),
                    defaults.map_config.default_level,
                ),
            },
            timing: TimingConfig {
                geocode_stagger_ms: parse_or(
                    option_env!("GEOCODE_STAGGER_MS"),
                    defaults.timing.geocode_stagger_ms,
                ),
                sdk_poll_delay_ms: parse_or(
                    option_env!("SDK_POLL_DELAY_MS"),
                    defaults.timing.sdk_poll_delay_ms,
                ),
                sdk_retry_delay_ms: parse_or(
                    option_env!("SDK_RETRY_DELAY_MS"),
                    defaults.timing.sdk_retry_delay_ms,
                ),
            },
        }
    }

    pub fn default_center(&self) -> Coordinates {
        Coordinates::new(
            self.map_config.default_center_lat,
            self.map_config.default_center_lng,
        )
    }

    /// Verifica si el modo de logging está habilitado
    pub fn is_logging_enabled(&self) -> bool {
        self.enable_logging
    }
}

fn non_empty(value: Option<&'static str>) -> Option<&'static str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_or<T: std::str::FromStr>(value: Option<&str>, default: T) -> T {
    value
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}
