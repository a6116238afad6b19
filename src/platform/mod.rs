//! Platform implementations of the image loader and subscription client.

#[cfg(not(target_arch = "wasm32"))]
mod native_decoder;
#[cfg(not(target_arch = "wasm32"))]
mod native_http;

#[cfg(target_arch = "wasm32")]
mod web_http;
#[cfg(target_arch = "wasm32")]
mod web_image_loader;

#[cfg(not(target_arch = "wasm32"))]
pub use native_decoder::{NativeDecoderThread, resolve_image_path};
#[cfg(not(target_arch = "wasm32"))]
pub use native_http::UreqSubscriptionClient;

#[cfg(target_arch = "wasm32")]
pub use web_http::FetchSubscriptionClient;
#[cfg(target_arch = "wasm32")]
pub use web_image_loader::WebImageLoader;
