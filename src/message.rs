//! Application message types for folio.
//!
//! Every page event and every asynchronous completion reaches the
//! application as a message, grouped by the widget it belongs to.

use folio_ui::{Key, Point};
use web_time::Instant;

use crate::error::SubscribeError;
use crate::gallery::LoadCompletion;
use crate::model::{ProjectAttributes, ProjectKey};

/// Messages that can be sent to update application state.
#[derive(Debug, Clone)]
pub enum Message {
    Gallery(GalleryMessage),
    Card(CardMessage),
    Language(LanguageMessage),
    Newsletter(NewsletterMessage),
    Grid(GridMessage),
    Subscription(SubscriptionMessage),
}

/// Messages for the project popup.
#[derive(Debug, Clone)]
pub enum GalleryMessage {
    /// A project element was clicked; carries its raw `data-*` attributes
    ProjectClicked(ProjectAttributes),
    /// A catalog project was chosen by key
    ProjectSelected(ProjectKey),
    NextImage,
    PrevImage,
    ClosePopup,
    /// Click on the dimmed area around the popup content
    BackgroundClicked,
    KeyPressed(Key),
    ImageLoaded(LoadCompletion),
    /// Periodic clock used to expire overdue loads
    Tick(Instant),
}

/// Element id of the popup backdrop.
pub const POPUP_BACKDROP_ID: &str = "popup";

impl GalleryMessage {
    /// Message for a click anywhere on the page.
    ///
    /// `project` holds the attributes of the project element enclosing the
    /// click target, if any. A click on the popup backdrop closes the popup;
    /// any other click is ignored.
    pub fn from_click(project: Option<ProjectAttributes>, target_id: &str) -> Option<Self> {
        match project {
            Some(attrs) => Some(GalleryMessage::ProjectClicked(attrs)),
            None if target_id == POPUP_BACKDROP_ID => Some(GalleryMessage::BackgroundClicked),
            None => None,
        }
    }
}

/// Messages for card hover tilt, by card index.
#[derive(Debug, Clone)]
pub enum CardMessage {
    Entered(usize),
    Moved {
        card: usize,
        pos: Point,
        width: f32,
        height: f32,
    },
    /// The animation frame requested for this card fired
    Frame(usize),
    Left(usize),
}

#[derive(Debug, Clone)]
pub enum LanguageMessage {
    /// Language button clicked, carries its `data-lang` code
    Select(String),
}

#[derive(Debug, Clone)]
pub enum NewsletterMessage {
    Select(String),
}

#[derive(Debug, Clone)]
pub enum GridMessage {
    ToggleViewAll,
}

/// Messages for the subscription form.
#[derive(Debug, Clone)]
pub enum SubscriptionMessage {
    NameChanged(String),
    EmailChanged(String),
    Submit,
    Finished(Result<(), SubscribeError>),
}

impl From<GalleryMessage> for Message {
    fn from(msg: GalleryMessage) -> Self {
        Message::Gallery(msg)
    }
}

impl From<CardMessage> for Message {
    fn from(msg: CardMessage) -> Self {
        Message::Card(msg)
    }
}

impl From<SubscriptionMessage> for Message {
    fn from(msg: SubscriptionMessage) -> Self {
        Message::Subscription(msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_inside_project_selects_it() {
        let attrs = ProjectAttributes {
            name: Some("Weather Bot".to_string()),
            images: Some(r#"["w1.png"]"#.to_string()),
            ..Default::default()
        };
        // The enclosing project wins even if the target has an id of its own
        match GalleryMessage::from_click(Some(attrs.clone()), "thumb-3") {
            Some(GalleryMessage::ProjectClicked(clicked)) => assert_eq!(clicked, attrs),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_click_on_backdrop_closes() {
        assert!(matches!(
            GalleryMessage::from_click(None, "popup"),
            Some(GalleryMessage::BackgroundClicked)
        ));
    }

    #[test]
    fn test_click_elsewhere_is_ignored() {
        assert!(GalleryMessage::from_click(None, "").is_none());
        assert!(GalleryMessage::from_click(None, "popup-image").is_none());
        assert!(GalleryMessage::from_click(None, "subscribe-button").is_none());
    }
}
