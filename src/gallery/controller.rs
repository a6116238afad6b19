//! The gallery popup controller.
//!
//! Binds project selection, image navigation and popup visibility to one
//! [`GallerySession`]. Loads are asynchronous: `load_image` only issues a
//! ticketed request, and `complete_load` decides later whether the result
//! still belongs on screen.

use std::time::Duration;

use web_time::Instant;

use super::loader::{ImageLoader, LoadCompletion, LoadTicket, StaleLoadPolicy};
use super::preload::PreloadSet;
use super::session::{GallerySession, PendingLoad};
use crate::constants::{DEFAULT_LOAD_TIMEOUT_MS, DEFAULT_PRELOAD_RADIUS, PLACEHOLDER_IMAGE};
use crate::error::LoadError;
use crate::model::Project;

/// Navigation direction through the image list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// User intents the popup reacts to, whatever input produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryAction {
    Close,
    Next,
    Previous,
}

/// Tunables for the controller.
#[derive(Debug, Clone)]
pub struct GalleryOptions {
    /// Image shown while nothing is loaded
    pub placeholder: String,
    /// Neighbours to preload on each side after a successful load
    pub preload_radius: usize,
    /// How completions for superseded requests are treated
    pub policy: StaleLoadPolicy,
    /// Give up on a load after this long; `None` waits forever
    pub load_timeout: Option<Duration>,
}

impl Default for GalleryOptions {
    fn default() -> Self {
        Self {
            placeholder: PLACEHOLDER_IMAGE.to_string(),
            preload_radius: DEFAULT_PRELOAD_RADIUS,
            policy: StaleLoadPolicy::default(),
            load_timeout: Some(Duration::from_millis(DEFAULT_LOAD_TIMEOUT_MS)),
        }
    }
}

/// Owns the gallery session and drives the platform loader.
pub struct GalleryController<L> {
    session: GallerySession,
    loader: L,
    preloads: PreloadSet,
    policy: StaleLoadPolicy,
    load_timeout: Option<Duration>,
}

impl<L: ImageLoader> GalleryController<L> {
    pub fn new(loader: L, options: GalleryOptions) -> Self {
        Self {
            session: GallerySession::new(options.placeholder),
            loader,
            preloads: PreloadSet::new(options.preload_radius),
            policy: options.policy,
            load_timeout: options.load_timeout,
        }
    }

    pub fn session(&self) -> &GallerySession {
        &self.session
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    pub fn preloads(&self) -> &PreloadSet {
        &self.preloads
    }

    /// Make `project` the only active project and show its first image.
    ///
    /// Texts update right away; the image starts as the placeholder and is
    /// replaced when the first load completes. An empty image list is fine:
    /// the popup opens with the placeholder and no navigation.
    pub fn select_project(&mut self, project: &Project) {
        let session = &mut self.session;

        if let Some(previous) = session.active.take() {
            log::debug!("🖼️ Deactivating project '{}'", previous);
        }
        session.active = Some(project.key.clone());
        session.images = project.images.clone();
        session.current_index = 0;
        session.name = project.name.clone();
        session.description = project.description.clone();
        session.external_link = project.external_link.clone();

        // Anything still in flight belongs to the previous selection.
        session.selection_seq = session.next_seq;
        session.pending = None;
        session.loading = false;
        session.show_placeholder();

        log::debug!(
            "🖼️ Selected project '{}' ({} images)",
            project.key,
            project.images.len()
        );

        self.open();
        self.load_image(0);
    }

    /// Request image `index` of the active project.
    ///
    /// Out-of-range indices are ignored; this guards calls that race with a
    /// new selection.
    pub fn load_image(&mut self, index: usize) -> Option<LoadTicket> {
        let Some(url) = self.session.images.get(index).cloned() else {
            log::debug!(
                "Ignoring load of image {} ({} images)",
                index,
                self.session.images.len()
            );
            return None;
        };

        let ticket = self.session.issue_ticket(index);
        self.session.current_index = index;
        self.session.loading = true;
        self.session.pending = Some(PendingLoad {
            ticket,
            deadline: self.load_timeout.map(|timeout| Instant::now() + timeout),
        });

        log::debug!("🖼️ Loading image {} (#{}): {}", index, ticket.seq, url);
        self.loader.request(ticket, &url);
        Some(ticket)
    }

    /// Move one image forward or back, wrapping around.
    pub fn navigate(&mut self, direction: Direction) -> Option<LoadTicket> {
        let len = self.session.images.len();
        if len <= 1 {
            return None;
        }

        let current = self.session.current_index % len;
        let next = match direction {
            Direction::Next => (current + 1) % len,
            Direction::Previous => (current + len - 1) % len,
        };
        self.load_image(next)
    }

    /// Show the popup for the active project and lock page scrolling.
    pub fn open(&mut self) -> bool {
        if self.session.active.is_none() {
            log::debug!("No active project, popup stays closed");
            return false;
        }
        self.session.visible = true;
        self.session.scroll_locked = true;
        true
    }

    /// Hide the popup, unlock scrolling and reset the image.
    ///
    /// The active project and its images stay; the next selection replaces them.
    /// Returns whether the popup was open.
    pub fn close(&mut self) -> bool {
        let was_visible = self.session.visible;
        if was_visible {
            log::debug!("🖼️ Closing popup");
        }
        self.session.visible = false;
        self.session.scroll_locked = false;
        self.session.loading = false;
        self.session.pending = None;
        self.session.show_placeholder();
        was_visible
    }

    /// Apply a keyboard or pointer intent. Navigation only works while open.
    ///
    /// Returns whether the popup changed.
    pub fn apply_action(&mut self, action: GalleryAction) -> bool {
        match action {
            GalleryAction::Close => self.close(),
            GalleryAction::Next | GalleryAction::Previous if !self.session.visible => false,
            GalleryAction::Next => self.navigate(Direction::Next).is_some(),
            GalleryAction::Previous => self.navigate(Direction::Previous).is_some(),
        }
    }

    /// Handle the outcome of a load. Returns whether it was applied.
    ///
    /// On success the image and link update and the neighbours are preloaded.
    /// On failure the current image stays. Either way `loading` clears if
    /// this was the load the session was waiting for.
    pub fn complete_load(&mut self, completion: LoadCompletion) -> bool {
        let LoadCompletion { ticket, result } = completion;

        if !self.is_applicable(ticket) {
            log::debug!(
                "Discarding stale load #{} for image {}",
                ticket.seq,
                ticket.index
            );
            return false;
        }

        if self.session.pending_ticket() == Some(ticket) {
            self.session.pending = None;
            self.session.loading = false;
        }

        match result {
            Ok(image) => {
                log::debug!(
                    "🖼️ Loaded image {} ({}x{})",
                    ticket.index,
                    image.width,
                    image.height
                );
                self.session.link_href = self
                    .session
                    .external_link
                    .clone()
                    .unwrap_or_else(|| image.url.clone());
                self.preloads.mark(&image.url);
                self.session.image_src = image.url;

                for url in self.preloads.plan(&self.session.images, ticket.index) {
                    log::debug!("🖼️ Preloading {}", url);
                    self.loader.preload(&url);
                }
            }
            Err(e) => log::warn!("Gallery image not shown: {}", e),
        }
        true
    }

    /// Give up on the pending load if its deadline has passed.
    ///
    /// Returns `true` when a load was expired. A result that still arrives
    /// later is treated as stale.
    pub fn expire_loads(&mut self, now: Instant) -> bool {
        let Some(PendingLoad {
            ticket,
            deadline: Some(deadline),
        }) = self.session.pending
        else {
            return false;
        };
        if now < deadline {
            return false;
        }

        self.session.pending = None;
        self.session.loading = false;
        let url = self
            .session
            .images
            .get(ticket.index)
            .cloned()
            .unwrap_or_default();
        log::warn!("Gallery image not shown: {}", LoadError::TimedOut { url });
        true
    }

    fn is_applicable(&self, ticket: LoadTicket) -> bool {
        if ticket.seq < self.session.selection_seq || ticket.index >= self.session.images.len()
        {
            return false;
        }
        match self.policy {
            StaleLoadPolicy::LatestRequest => self.session.pending_ticket() == Some(ticket),
            StaleLoadPolicy::LastCompletion => self.session.visible,
        }
    }
}
