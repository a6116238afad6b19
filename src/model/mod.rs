//! Data models for the portfolio page.

mod newsletter;
mod project;

#[cfg(not(target_arch = "wasm32"))]
pub use newsletter::load_newsletter_dir;
pub use newsletter::{Newsletter, parse_newsletter_list};
pub use project::{Project, ProjectAttributes, ProjectCatalog, ProjectKey, parse_image_list};
