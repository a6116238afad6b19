//! Project image gallery: the popup session, its controller, and the
//! loading/preloading machinery behind it.

mod controller;
mod loader;
mod preload;
mod session;

#[cfg(test)]
mod tests;

pub use controller::{Direction, GalleryAction, GalleryController, GalleryOptions};
pub use loader::{ImageLoader, LoadCompletion, LoadTicket, LoadedImage, StaleLoadPolicy};
pub use preload::{PreloadSet, adjacent_indices};
pub use session::GallerySession;
