//! Error types for page data, image loading and the subscription form.

use thiserror::Error;

/// Errors in externally supplied page data (project attributes, site data).
#[derive(Error, Debug)]
pub enum ProjectDataError {
    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The image list parsed but is not an array
    #[error("image list is not an array")]
    NotAList,

    /// An entry of the image list is not a string
    #[error("image list entry {index} is not a string")]
    NotAString {
        /// Position of the offending entry
        index: usize,
    },

    /// A project has no texts for the requested language (nor English)
    #[error("project {index} has no texts for language '{lang}'")]
    MissingLanguage {
        /// Position of the project in the site data
        index: usize,
        /// Requested language code
        lang: String,
    },
}

/// Errors from loading a single gallery image.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The image could not be fetched or decoded
    #[error("failed to decode {url}: {reason}")]
    Decode { url: String, reason: String },

    /// The load did not complete within the configured bound
    #[error("timed out loading {url}")]
    TimedOut { url: String },

    /// The loader cannot handle this kind of URL
    #[error("cannot load {url}: {reason}")]
    Unsupported { url: String, reason: String },
}

impl LoadError {
    /// Create a decode error.
    pub fn decode(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Decode {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// URL of the image that failed.
    pub fn url(&self) -> &str {
        match self {
            Self::Decode { url, .. } | Self::TimedOut { url } | Self::Unsupported { url, .. } => {
                url
            }
        }
    }
}

/// Errors from submitting the subscription form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubscribeError {
    /// A field failed local validation; nothing was sent
    #[error("invalid {field}")]
    Invalid { field: &'static str },

    /// A submission is already in flight
    #[error("a submission is already in progress")]
    Busy,

    /// The endpoint answered with a non-2xx status
    #[error("server returned {status}")]
    Server {
        status: u16,
        /// Error text supplied by the server, if any
        message: Option<String>,
    },

    /// The request never got a response
    #[error("network error: {0}")]
    Network(String),
}

/// Errors while binding to the page (wasm only).
#[cfg(target_arch = "wasm32")]
#[derive(Error, Debug)]
pub enum DomError {
    /// `window` or `document` is not available
    #[error("no {0} object available")]
    NoGlobal(&'static str),

    /// A JavaScript call threw
    #[error("JavaScript error: {0}")]
    Js(String),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for DomError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Js(format!("{:?}", value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_error_url() {
        let err = LoadError::decode("a.png", "bad header");
        assert_eq!(err.url(), "a.png");
        assert_eq!(err.to_string(), "failed to decode a.png: bad header");

        let err = LoadError::TimedOut {
            url: "b.png".to_string(),
        };
        assert_eq!(err.url(), "b.png");
    }

    #[test]
    fn test_subscribe_error_display() {
        let err = SubscribeError::Server {
            status: 500,
            message: Some("Invalid email".to_string()),
        };
        assert_eq!(err.to_string(), "server returned 500");
        assert_eq!(
            SubscribeError::Invalid { field: "email" }.to_string(),
            "invalid email"
        );
    }
}
