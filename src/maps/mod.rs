// Módulo de mapas: capacidades abstractas + implementación web (Kakao)

pub mod traits;
pub mod kakao;
pub mod bootstrap;
pub mod timer;

pub use traits::{Geolocator, InfoWindowMode, MapSdk, MarkerSpec, SdkHost, Timer};
pub use kakao::KakaoSdk;
pub use bootstrap::{DomSdkHost, SdkBootstrap};
pub use timer::GlooTimer;
