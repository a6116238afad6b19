use wasm_bindgen::prelude::*;

use folio_ui::Settings;

use crate::config::AppConfig;
use crate::dom;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    let config = AppConfig::load_from_local_storage().unwrap_or_default();
    let settings = Settings {
        title: None,
        log_level: config.preferences.log_level.to_level_filter(),
    };
    folio_ui::init_logging(settings.log_level);
    log::info!("{} WASM starting...", config.app_name);

    if let Err(e) = dom::mount(config) {
        log::error!("Failed to bind page: {}", e);
    }
}
