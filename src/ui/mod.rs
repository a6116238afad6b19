//! Page widgets outside the gallery popup.
//!
//! Each widget is plain state plus the operations its DOM events map to;
//! the shell owns the elements and renders from these values.

pub mod language;
pub mod newsletter;
pub mod project_grid;
pub mod subscribe;
pub mod tilt;

pub use language::{Language, LanguageSwitcher, UiTexts};
pub use newsletter::NewsletterReader;
pub use project_grid::{ProjectGrid, ToggleState, hidden_flags};
pub use subscribe::{
    SubmitDone, SubmitStatus, SubscribeRequest, SubscriptionClient, SubscriptionForm,
    interpret_response, validate,
};
pub use tilt::{CardTilt, tilt_angles};
