use std::env;
use std::fs;
use std::path::Path;

/// Claves que `config.rs` lee con `option_env!`
const CONFIG_KEYS: &[&str] = &[
    "KAKAO_MAP_API_KEY",
    "SHOP_LIST_URL",
    "DEFAULT_MAP_CENTER_LAT",
    "DEFAULT_MAP_CENTER_LNG",
    "USER_MAP_LEVEL",
    "DEFAULT_MAP_LEVEL",
    "GEOCODE_STAGGER_MS",
    "SDK_POLL_DELAY_MS",
    "SDK_RETRY_DELAY_MS",
    "ENABLE_LOGGING",
];

fn main() {
    for key in CONFIG_KEYS {
        println!("cargo:rerun-if-env-changed={}", key);
    }

    // Pasar variables del .env al compilador (option_env! en config.rs)
    let env_file = Path::new(".env");
    if env_file.exists() {
        println!("cargo:rerun-if-changed=.env");

        if let Ok(contents) = fs::read_to_string(env_file) {
            for line in contents.lines().map(str::trim) {
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }

                let Some((key, value)) = line.split_once('=') else {
                    continue;
                };
                let key = key.trim();
                let value = value.trim().trim_matches('"');

                if !CONFIG_KEYS.contains(&key) {
                    println!("cargo:warning=.env: clave desconocida '{}', ignorada", key);
                    continue;
                }

                // La variable del entorno real tiene prioridad sobre el .env
                if env::var(key).is_err() {
                    println!("cargo:rustc-env={}={}", key, value);
                }
            }
        }
    } else {
        println!("cargo:warning=No .env file found. Using default map settings (KAKAO_MAP_API_KEY fallback).");
    }

    println!("cargo:rerun-if-changed=build.rs");
}
