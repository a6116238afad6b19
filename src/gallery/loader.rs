//! Image loading contract between the gallery and the platform.
//!
//! A loader starts a load and returns immediately. The outcome comes back
//! later as a [`LoadCompletion`] carrying the [`LoadTicket`] of the request,
//! which is how the controller tells current results from stale ones.

use serde::{Deserialize, Serialize};

use crate::error::LoadError;

/// Tag attached to every load request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadTicket {
    /// Monotonically increasing per session
    pub seq: u64,
    /// Index into the image list the request was made for
    pub index: usize,
}

/// A successfully loaded image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedImage {
    /// Source to display (the requested URL; the platform caches the bytes)
    pub url: String,
    pub width: u32,
    pub height: u32,
}

/// Outcome of one load request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadCompletion {
    pub ticket: LoadTicket,
    pub result: Result<LoadedImage, LoadError>,
}

/// Platform image loader.
pub trait ImageLoader {
    /// Start loading `url`. The completion must be delivered asynchronously,
    /// tagged with `ticket`.
    fn request(&mut self, ticket: LoadTicket, url: &str);

    /// Warm the cache for `url`. Fire-and-forget: no completion, no retry.
    fn preload(&mut self, url: &str);
}

impl<L: ImageLoader + ?Sized> ImageLoader for Box<L> {
    fn request(&mut self, ticket: LoadTicket, url: &str) {
        (**self).request(ticket, url);
    }

    fn preload(&mut self, url: &str) {
        (**self).preload(url);
    }
}

/// What to do with a completion that is not for the latest request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum StaleLoadPolicy {
    /// Only the most recently requested load may change the display
    #[default]
    LatestRequest,
    /// Every completion for the open selection is shown, last one wins
    LastCompletion,
}

impl StaleLoadPolicy {
    pub fn name(&self) -> &'static str {
        match self {
            StaleLoadPolicy::LatestRequest => "latest-request",
            StaleLoadPolicy::LastCompletion => "last-completion",
        }
    }
}
