//! State of the one gallery popup on the page.

use web_time::Instant;

use super::loader::LoadTicket;
use crate::model::ProjectKey;

/// The load the session is currently waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct PendingLoad {
    pub ticket: LoadTicket,
    /// When the load is given up on; `None` when timeouts are disabled
    pub deadline: Option<Instant>,
}

/// Everything the popup shows, plus the bookkeeping behind it.
///
/// Only the controller mutates a session; shells read it to render.
#[derive(Debug, Clone)]
pub struct GallerySession {
    pub(super) active: Option<ProjectKey>,
    pub(super) images: Vec<String>,
    pub(super) current_index: usize,
    pub(super) visible: bool,
    pub(super) loading: bool,

    pub(super) name: String,
    pub(super) description: String,
    pub(super) external_link: Option<String>,
    pub(super) image_src: String,
    pub(super) link_href: String,
    pub(super) scroll_locked: bool,

    pub(super) placeholder: String,
    /// Sequence number for the next ticket
    pub(super) next_seq: u64,
    /// First sequence number issued for the current selection
    pub(super) selection_seq: u64,
    pub(super) pending: Option<PendingLoad>,
}

impl GallerySession {
    pub fn new(placeholder: impl Into<String>) -> Self {
        let placeholder = placeholder.into();
        Self {
            active: None,
            images: Vec::new(),
            current_index: 0,
            visible: false,
            loading: false,
            name: String::new(),
            description: String::new(),
            external_link: None,
            image_src: placeholder.clone(),
            link_href: String::new(),
            scroll_locked: false,
            placeholder,
            next_seq: 1,
            selection_seq: 1,
            pending: None,
        }
    }

    /// Key of the active project, if any.
    pub fn active_project(&self) -> Option<&ProjectKey> {
        self.active.as_ref()
    }

    pub fn is_active(&self, key: &ProjectKey) -> bool {
        self.active.as_ref() == Some(key)
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    /// Index of the requested image. Meaningless while `images` is empty.
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Source of the image element.
    pub fn displayed_image(&self) -> &str {
        &self.image_src
    }

    /// Target of the link around the image (empty while nothing is loaded).
    pub fn link_target(&self) -> &str {
        &self.link_href
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn is_placeholder_shown(&self) -> bool {
        self.image_src == self.placeholder
    }

    /// Whether the previous/next controls are shown.
    pub fn nav_visible(&self) -> bool {
        self.images.len() > 1
    }

    /// Whether background scrolling is suppressed.
    pub fn scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    /// Ticket of the load the session waits for, if any.
    pub fn pending_ticket(&self) -> Option<LoadTicket> {
        self.pending.map(|p| p.ticket)
    }

    pub(super) fn issue_ticket(&mut self, index: usize) -> LoadTicket {
        let ticket = LoadTicket {
            seq: self.next_seq,
            index,
        };
        self.next_seq += 1;
        ticket
    }

    pub(super) fn show_placeholder(&mut self) {
        self.image_src = self.placeholder.clone();
        self.link_href.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_closed_and_empty() {
        let session = GallerySession::new("blank.gif");
        assert!(!session.is_visible());
        assert!(!session.is_loading());
        assert!(session.active_project().is_none());
        assert!(session.images().is_empty());
        assert!(!session.nav_visible());
        assert!(session.is_placeholder_shown());
        assert_eq!(session.displayed_image(), "blank.gif");
        assert_eq!(session.link_target(), "");
    }

    #[test]
    fn test_tickets_are_monotonic() {
        let mut session = GallerySession::new("");
        let a = session.issue_ticket(0);
        let b = session.issue_ticket(0);
        assert!(b.seq > a.seq);
        assert_eq!(b.index, 0);
    }
}
