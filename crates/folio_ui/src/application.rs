/// Core application trait that defines the lifecycle of a folio_ui application.
///
/// Inspired by the Elm Architecture: the application owns its state and
/// changes it only in response to messages. Rendering is left to the shell
/// that hosts the application (DOM binding, terminal preview, tests).
pub trait Application: Sized {
    /// The message type that this application handles.
    type Message: 'static;

    /// Update the application state in response to a message.
    fn update(&mut self, message: Self::Message);
}

/// Settings for hosting an application.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Title shown by shells that have one (document title, terminal banner)
    pub title: Option<String>,

    /// Maximum log level forwarded to the platform logger
    pub log_level: log::LevelFilter,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            title: None,
            log_level: log::LevelFilter::Info,
        }
    }
}

/// Install the platform logger: `env_logger` on native, the browser console on wasm.
///
/// Calling this more than once is harmless; later calls only log a debug line.
pub fn init_logging(level: log::LevelFilter) {
    #[cfg(not(target_arch = "wasm32"))]
    {
        let result = env_logger::Builder::new()
            .filter_level(level)
            .parse_default_env()
            .try_init();
        if result.is_err() {
            log::debug!("Logger already initialised");
        }
    }

    #[cfg(target_arch = "wasm32")]
    {
        let level = level.to_level().unwrap_or(log::Level::Error);
        if console_log::init_with_level(level).is_err() {
            log::debug!("Logger already initialised");
        }
    }
}
