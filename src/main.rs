use shop_map::config::CONFIG;
use shop_map::App;

fn main() {
    console_error_panic_hook::set_once();

    let level = if CONFIG.is_logging_enabled() {
        log::Level::Info
    } else {
        log::Level::Warn
    };
    wasm_logger::init(wasm_logger::Config::new(level));
    log::info!("🚀 Shop map starting...");

    yew::Renderer::<App>::new().render();
}
