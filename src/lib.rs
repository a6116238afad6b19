//! folio - interaction core for a portfolio page
//!
//! Project image lightbox with ticketed async loads and preloading, card
//! hover tilt, language switcher, newsletter reader, "view all" grid toggle
//! and a subscription form. The same state machine runs in the browser
//! (wasm) and behind the native terminal preview.

pub mod app;
pub mod config;
pub mod constants;
pub mod error;
pub mod gallery;
pub mod handlers;
pub mod keybindings;
pub mod message;
pub mod model;
pub mod platform;
#[cfg(not(target_arch = "wasm32"))]
pub mod preview;
pub mod ui;

pub use app::{Changes, PageData, PageHost, PortfolioApp, Services};
pub use config::AppConfig;
pub use message::Message;

// WASM entry point
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::*;
