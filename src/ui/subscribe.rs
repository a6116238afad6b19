//! Newsletter subscription form.
//!
//! The form validates locally, hands a [`SubscribeRequest`] to a
//! [`SubscriptionClient`], and turns the outcome into a status line.

use serde::{Deserialize, Serialize};

use crate::error::SubscribeError;

pub const SUCCESS_TEXT: &str = "Thank you for subscribing!";
pub const SERVER_ERROR_TEXT: &str = "Subscription failed. Please try again.";
pub const NETWORK_ERROR_TEXT: &str = "Network error. Please try again later.";

/// JSON body posted to the subscription endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscribeRequest {
    pub name: String,
    pub email: String,
}

/// Callback receiving the outcome of one submission.
pub type SubmitDone = Box<dyn FnOnce(Result<(), SubscribeError>)>;

/// Transport for subscription requests.
///
/// Implementations call `done` exactly once, possibly before `submit` returns.
pub trait SubscriptionClient {
    fn submit(&mut self, endpoint: &str, request: SubscribeRequest, done: SubmitDone);
}

impl<C: SubscriptionClient + ?Sized> SubscriptionClient for Box<C> {
    fn submit(&mut self, endpoint: &str, request: SubscribeRequest, done: SubmitDone) {
        (**self).submit(endpoint, request, done);
    }
}

/// Check the raw field values and build the request.
pub fn validate(name: &str, email: &str) -> Result<SubscribeRequest, SubscribeError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(SubscribeError::Invalid { field: "name" });
    }

    let email = email.trim();
    let valid_email = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.contains(char::is_whitespace)
        }
        None => false,
    };
    if !valid_email {
        return Err(SubscribeError::Invalid { field: "email" });
    }

    Ok(SubscribeRequest {
        name: name.to_string(),
        email: email.to_string(),
    })
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

/// Map an HTTP status and response body to a submission outcome.
pub fn interpret_response(status: u16, body: &str) -> Result<(), SubscribeError> {
    if (200..300).contains(&status) {
        return Ok(());
    }
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error.or(b.message))
        .filter(|m| !m.trim().is_empty());
    Err(SubscribeError::Server { status, message })
}

/// Status line shown under the form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Sending,
    Succeeded(String),
    Failed(String),
}

impl SubmitStatus {
    pub fn text(&self) -> &str {
        match self {
            Self::Idle | Self::Sending => "",
            Self::Succeeded(text) | Self::Failed(text) => text,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

#[derive(Debug, Clone, Default)]
pub struct SubscriptionForm {
    name: String,
    email: String,
    status: SubmitStatus,
}

impl SubscriptionForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    pub fn status(&self) -> &SubmitStatus {
        &self.status
    }

    /// Inputs and button are disabled while a request is in flight.
    pub fn is_enabled(&self) -> bool {
        self.status != SubmitStatus::Sending
    }

    /// Validate and mark the form as sending.
    ///
    /// On a validation error the status shows it and the form stays enabled.
    pub fn begin_submit(&mut self) -> Result<SubscribeRequest, SubscribeError> {
        if !self.is_enabled() {
            return Err(SubscribeError::Busy);
        }
        match validate(&self.name, &self.email) {
            Ok(request) => {
                self.status = SubmitStatus::Sending;
                Ok(request)
            }
            Err(e) => {
                self.status = SubmitStatus::Failed(invalid_text(&e));
                Err(e)
            }
        }
    }

    /// Apply the outcome of the submission started by `begin_submit`.
    pub fn finish(&mut self, outcome: Result<(), SubscribeError>) {
        self.status = match outcome {
            Ok(()) => {
                log::info!("✉️ Subscription accepted");
                self.name.clear();
                self.email.clear();
                SubmitStatus::Succeeded(SUCCESS_TEXT.to_string())
            }
            Err(SubscribeError::Server {
                status,
                message: Some(message),
            }) => {
                log::warn!("Subscription rejected ({}): {}", status, message);
                SubmitStatus::Failed(message)
            }
            Err(SubscribeError::Server {
                status,
                message: None,
            }) => {
                log::warn!("Subscription rejected ({})", status);
                SubmitStatus::Failed(SERVER_ERROR_TEXT.to_string())
            }
            Err(e) => {
                log::error!("Subscription failed: {}", e);
                SubmitStatus::Failed(NETWORK_ERROR_TEXT.to_string())
            }
        };
    }
}

fn invalid_text(error: &SubscribeError) -> String {
    match error {
        SubscribeError::Invalid { field: "name" } => "Please enter your name.".to_string(),
        SubscribeError::Invalid { .. } => "Please enter a valid email address.".to_string(),
        other => other.to_string(),
    }
}
