//! folio_ui - a tiny message-driven runtime for page widgets
//!
//! Applications keep their state in one struct, receive every input as a
//! message, and are driven by a [`Runtime`] that never re-enters `update`.

mod application;
mod event;
mod runtime;

pub use application::{init_logging, Application, Settings};
pub use event::{Key, Point};
pub use runtime::{Runtime, Sender};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::application::{Application, Settings};
    pub use crate::event::{Key, Point};
    pub use crate::runtime::{Runtime, Sender};
}
