//! Scenario tests for the gallery controller.
//!
//! The loader double records requests and preloads; tests complete loads by
//! hand to control ordering.

mod navigation_tests;

use super::*;
use crate::error::LoadError;
use crate::model::Project;

#[derive(Debug, Default)]
pub(super) struct RecordingLoader {
    pub requests: Vec<(LoadTicket, String)>,
    pub preloads: Vec<String>,
}

impl ImageLoader for RecordingLoader {
    fn request(&mut self, ticket: LoadTicket, url: &str) {
        self.requests.push((ticket, url.to_string()));
    }

    fn preload(&mut self, url: &str) {
        self.preloads.push(url.to_string());
    }
}

pub(super) fn controller() -> GalleryController<RecordingLoader> {
    controller_with(GalleryOptions {
        placeholder: "placeholder.gif".to_string(),
        ..GalleryOptions::default()
    })
}

pub(super) fn controller_with(options: GalleryOptions) -> GalleryController<RecordingLoader> {
    GalleryController::new(RecordingLoader::default(), options)
}

pub(super) fn project(name: &str, images: &[&str]) -> Project {
    Project::new(
        name,
        &format!("{} description", name),
        images.iter().map(|s| s.to_string()).collect(),
    )
}

/// The most recent request the controller made.
pub(super) fn last_request(c: &GalleryController<RecordingLoader>) -> (LoadTicket, String) {
    c.loader()
        .requests
        .last()
        .cloned()
        .expect("no load was requested")
}

pub(super) fn success(ticket: LoadTicket, url: &str) -> LoadCompletion {
    LoadCompletion {
        ticket,
        result: Ok(LoadedImage {
            url: url.to_string(),
            width: 640,
            height: 480,
        }),
    }
}

pub(super) fn failure(ticket: LoadTicket, url: &str) -> LoadCompletion {
    LoadCompletion {
        ticket,
        result: Err(LoadError::decode(url, "corrupt data")),
    }
}

/// Complete the latest request successfully.
pub(super) fn finish_latest(c: &mut GalleryController<RecordingLoader>) {
    let (ticket, url) = last_request(c);
    assert!(c.complete_load(success(ticket, &url)));
}
