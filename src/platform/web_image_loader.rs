//! Browser image loader (WASM only)
//!
//! Each request creates an off-screen `HtmlImageElement` and awaits its
//! `decode()` promise, so the popup only swaps its `src` once the bytes are
//! ready. Preloads use the same mechanism and keep their elements alive so
//! the browser cache holds the data.

use std::rc::Rc;

use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::HtmlImageElement;

use crate::error::LoadError;
use crate::gallery::{ImageLoader, LoadCompletion, LoadTicket, LoadedImage};

/// Preload elements retained at most; the oldest is released first.
const MAX_RETAINED_PRELOADS: usize = 32;

pub struct WebImageLoader {
    on_complete: Rc<dyn Fn(LoadCompletion)>,
    preloads: Vec<HtmlImageElement>,
}

impl WebImageLoader {
    /// `on_complete` receives every finished request, typically forwarding it
    /// to the runtime as a message.
    pub fn new(on_complete: impl Fn(LoadCompletion) + 'static) -> Self {
        Self {
            on_complete: Rc::new(on_complete),
            preloads: Vec::new(),
        }
    }
}

async fn decode(url: String) -> Result<LoadedImage, LoadError> {
    let img = HtmlImageElement::new()
        .map_err(|e| LoadError::decode(url.as_str(), format!("{:?}", e)))?;
    img.set_src(&url);
    JsFuture::from(img.decode())
        .await
        .map_err(|e| LoadError::decode(url.as_str(), format!("{:?}", e)))?;

    Ok(LoadedImage {
        width: img.natural_width(),
        height: img.natural_height(),
        url,
    })
}

impl ImageLoader for WebImageLoader {
    fn request(&mut self, ticket: LoadTicket, url: &str) {
        let on_complete = Rc::clone(&self.on_complete);
        let url = url.to_string();
        spawn_local(async move {
            let result = decode(url).await;
            on_complete(LoadCompletion { ticket, result });
        });
    }

    fn preload(&mut self, url: &str) {
        match HtmlImageElement::new() {
            Ok(img) => {
                img.set_src(url);
                if self.preloads.len() >= MAX_RETAINED_PRELOADS {
                    self.preloads.remove(0);
                }
                self.preloads.push(img);
            }
            Err(e) => log::debug!("Preload of {} failed: {:?}", url, e),
        }
    }
}
