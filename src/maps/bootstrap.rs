// ============================================================================
// SDK BOOTSTRAP - Carga única del script de Kakao Maps
// ============================================================================
// Decisión pura (BootstrapPlan) + orquestación (SdkBootstrap) sobre un SdkHost
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use yew::Callback;

use super::traits::SdkHost;
use crate::config::TimingConfig;
use crate::error::{describe_js, MapError};
use crate::utils::kakao_ffi;

pub const SDK_HOST: &str = "dapi.kakao.com";
pub const SDK_PATH: &str = "/v2/maps/sdk.js";

/// URL del script con la clave y la librería `services` (geocoder + places)
pub fn sdk_script_url(api_key: &str) -> String {
    format!(
        "https://{}{}?appkey={}&libraries=services&autoload=false",
        SDK_HOST,
        SDK_PATH,
        utf8_percent_encode(api_key, NON_ALPHANUMERIC)
    )
}

/// Qué hacer al montar, según el estado del documento
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapPlan {
    /// Script presente y `kakao.maps.load` disponible: llamarlo ya
    LoadNow,
    /// Script presente pero aún sin evaluar: re-comprobar una vez
    PollOnce,
    /// Sin script: inyectarlo
    Inject,
}

impl BootstrapPlan {
    pub fn decide(script_present: bool, loader_ready: bool) -> Self {
        match (script_present, loader_ready) {
            (true, true) => BootstrapPlan::LoadNow,
            (true, false) => BootstrapPlan::PollOnce,
            (false, _) => BootstrapPlan::Inject,
        }
    }
}

/// Después de un poll / onload: cargar, reintentar o rendirse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadinessCheck {
    Load,
    Retry,
    GiveUp,
}

impl ReadinessCheck {
    pub fn decide(loader_ready: bool, retries_left: u32) -> Self {
        if loader_ready {
            ReadinessCheck::Load
        } else if retries_left > 0 {
            ReadinessCheck::Retry
        } else {
            ReadinessCheck::GiveUp
        }
    }
}

/// Handle del bootstrap en curso. `cleanup` al desmontar
pub struct SdkBootstrap<H: SdkHost + 'static> {
    host: Rc<H>,
    active: Rc<Cell<bool>>,
    on_ready: Callback<()>,
    on_error: Callback<MapError>,
}

impl<H: SdkHost + 'static> SdkBootstrap<H> {
    pub fn start(
        host: Rc<H>,
        api_key: &str,
        timing: &TimingConfig,
        on_ready: Callback<()>,
        on_error: Callback<MapError>,
    ) -> Self {
        let bootstrap = Self {
            host,
            active: Rc::new(Cell::new(true)),
            on_ready,
            on_error,
        };

        let plan = BootstrapPlan::decide(
            bootstrap.host.script_present(),
            bootstrap.host.loader_ready(),
        );
        log::info!("🧩 SDK bootstrap: {:?}", plan);

        match plan {
            BootstrapPlan::LoadNow => bootstrap.load_sdk(),
            BootstrapPlan::PollOnce => bootstrap.schedule_check(timing.sdk_poll_delay_ms, 0),
            BootstrapPlan::Inject => bootstrap.inject(api_key, timing.sdk_retry_delay_ms),
        }
        bootstrap
    }

    fn handle(&self) -> Self {
        Self {
            host: self.host.clone(),
            active: self.active.clone(),
            on_ready: self.on_ready.clone(),
            on_error: self.on_error.clone(),
        }
    }

    fn is_active(&self) -> bool {
        self.active.get()
    }

    fn fail(&self, error: MapError) {
        if self.is_active() {
            log::error!("❌ SDK bootstrap: {}", error);
            self.on_error.emit(error);
        }
    }

    /// `kakao.maps.load(cb)` (autoload=false): cb cuando las librerías están listas
    fn load_sdk(&self) {
        if !self.is_active() {
            return;
        }
        let this = self.handle();
        let loaded = self.host.load(Box::new(move || {
            if this.is_active() {
                log::info!("✅ Kakao Maps SDK listo");
                this.on_ready.emit(());
            }
        }));
        if let Err(e) = loaded {
            self.fail(e);
        }
    }

    /// Re-comprobar `kakao.maps.load` tras `delay_ms`
    fn schedule_check(&self, delay_ms: u32, retries_left: u32) {
        let this = self.handle();
        self.host.schedule(
            delay_ms,
            Box::new(move || {
                if !this.is_active() {
                    return;
                }
                match ReadinessCheck::decide(this.host.loader_ready(), retries_left) {
                    ReadinessCheck::Load => this.load_sdk(),
                    ReadinessCheck::Retry => this.schedule_check(delay_ms, retries_left - 1),
                    ReadinessCheck::GiveUp => this.fail(MapError::SdkMissing),
                }
            }),
        );
    }

    fn inject(&self, api_key: &str, retry_delay_ms: u32) {
        let on_load = {
            let this = self.handle();
            Box::new(move || {
                if !this.is_active() {
                    return;
                }
                match ReadinessCheck::decide(this.host.loader_ready(), 1) {
                    ReadinessCheck::Load => this.load_sdk(),
                    _ => {
                        log::warn!("⏳ Script cargado pero kakao.maps.load no existe, reintentando...");
                        this.schedule_check(retry_delay_ms, 0);
                    }
                }
            })
        };
        let on_script_error = {
            let this = self.handle();
            Box::new(move || this.fail(MapError::ScriptLoad))
        };

        match self
            .host
            .inject_script(&sdk_script_url(api_key), on_load, on_script_error)
        {
            Ok(()) => log::info!("📜 Script de Kakao Maps inyectado"),
            Err(e) => self.fail(e),
        }
    }

    /// Quita el script inyectado y cancela los polls pendientes.
    /// El estado global de `window.kakao` no se descarga.
    pub fn cleanup(&self) {
        self.active.set(false);
        self.host.cancel_scheduled();
        self.host.remove_script();
    }
}

// ============================================================================
// DOM - SdkHost sobre document / window.kakao / gloo Timeout
// ============================================================================

#[derive(Default)]
pub struct DomSdkHost {
    script: RefCell<Option<web_sys::HtmlScriptElement>>,
    timeout: Rc<RefCell<Option<Timeout>>>,
}

impl DomSdkHost {
    pub fn new() -> Self {
        Self::default()
    }
}

fn find_sdk_script() -> Option<web_sys::Element> {
    let document = web_sys::window()?.document()?;
    let selector = format!("script[src*=\"{}{}\"]", SDK_HOST, SDK_PATH);
    document.query_selector(&selector).ok().flatten()
}

impl SdkHost for DomSdkHost {
    fn script_present(&self) -> bool {
        find_sdk_script().is_some()
    }

    fn loader_ready(&self) -> bool {
        kakao_ffi::loader_ready()
    }

    fn inject_script(
        &self,
        src: &str,
        on_load: Box<dyn FnOnce()>,
        on_error: Box<dyn FnOnce()>,
    ) -> Result<(), MapError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or(MapError::ScriptLoad)?;

        let script = document
            .create_element("script")
            .map_err(|e| describe_js(&e))
            .and_then(|el| {
                el.dyn_into::<web_sys::HtmlScriptElement>()
                    .map_err(|_| "no es un <script>".to_string())
            })
            .map_err(|e| {
                log::error!("❌ No se pudo crear el <script> del SDK: {}", e);
                MapError::ScriptLoad
            })?;
        script.set_src(src);
        script.set_async(true);

        // once_into_js: cada closure se libera al ejecutarse
        let on_load = Closure::once_into_js(move |_: web_sys::Event| on_load());
        let on_error = Closure::once_into_js(move |_: web_sys::Event| on_error());
        script.set_onload(Some(on_load.unchecked_ref()));
        script.set_onerror(Some(on_error.unchecked_ref()));

        document
            .head()
            .map(|head| head.append_child(&script).map(|_| ()))
            .unwrap_or_else(|| Err(JsValue::from_str("document sin <head>")))
            .map_err(|e| {
                log::error!("❌ No se pudo insertar el script del SDK: {}", describe_js(&e));
                MapError::ScriptLoad
            })?;

        *self.script.borrow_mut() = Some(script);
        Ok(())
    }

    fn remove_script(&self) {
        let script = self.script.borrow_mut().take();
        if let Some(script) = script {
            script.set_onload(None);
            script.set_onerror(None);
            script.remove();
            log::info!("🧹 Script de Kakao Maps retirado");
        }
    }

    fn load(&self, on_ready: Box<dyn FnOnce()>) -> Result<(), MapError> {
        let callback = Closure::once_into_js(move || on_ready());
        kakao_ffi::load(callback.unchecked_ref()).map_err(|e| {
            log::error!("❌ kakao.maps.load falló: {}", describe_js(&e));
            MapError::SdkMissing
        })
    }

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        let slot = self.timeout.clone();
        let timeout = Timeout::new(delay_ms, move || {
            // Ya disparado: no soltar el closure mientras se ejecuta
            if let Some(fired) = slot.borrow_mut().take() {
                let _ = fired.forget();
            }
            task();
        });
        *self.timeout.borrow_mut() = Some(timeout);
    }

    fn cancel_scheduled(&self) {
        let pending = self.timeout.borrow_mut().take();
        drop(pending);
    }
}
