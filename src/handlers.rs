//! Message handlers for folio.
//!
//! Each handler processes a specific category of messages,
//! keeping the main PortfolioApp update function clean and organized.

use folio_ui::Sender;

use crate::app::PageHost;
use crate::gallery::{Direction, GalleryController, ImageLoader};
use crate::keybindings::KeyBindings;
use crate::message::{
    CardMessage, GalleryMessage, GridMessage, LanguageMessage, Message, NewsletterMessage,
    SubscriptionMessage,
};
use crate::model::{Project, ProjectCatalog};
use crate::ui::{
    CardTilt, LanguageSwitcher, NewsletterReader, ProjectGrid, SubscriptionClient,
    SubscriptionForm,
};

/// Handle popup messages. Returns whether the popup needs repainting.
pub fn handle_gallery<L: ImageLoader>(
    msg: GalleryMessage,
    gallery: &mut GalleryController<L>,
    catalog: &ProjectCatalog,
    keybindings: &KeyBindings,
) -> bool {
    match msg {
        GalleryMessage::ProjectClicked(attrs) => {
            let project = Project::from_attributes(&attrs);
            log::debug!("🖼️ Project clicked: {}", project.key);
            gallery.select_project(&project);
            true
        }
        GalleryMessage::ProjectSelected(key) => match catalog.get(&key) {
            Some(project) => {
                log::debug!("🖼️ Project selected: {}", key);
                gallery.select_project(project);
                true
            }
            None => {
                log::warn!("Unknown project '{}'", key);
                false
            }
        },
        GalleryMessage::NextImage => gallery.navigate(Direction::Next).is_some(),
        GalleryMessage::PrevImage => gallery.navigate(Direction::Previous).is_some(),
        GalleryMessage::ClosePopup | GalleryMessage::BackgroundClicked => gallery.close(),
        GalleryMessage::KeyPressed(key) => match keybindings.action_for_key(key) {
            Some(action) => {
                log::debug!("⌨️ {} -> {:?}", key.label(), action);
                gallery.apply_action(action)
            }
            None => false,
        },
        GalleryMessage::ImageLoaded(completion) => gallery.complete_load(completion),
        GalleryMessage::Tick(now) => gallery.expire_loads(now),
    }
}

/// Handle card tilt messages. Unknown card indices are ignored.
///
/// Returns the card whose style changed. Pointer moves only schedule a frame.
pub fn handle_card(
    msg: CardMessage,
    cards: &mut [CardTilt],
    host: &mut dyn PageHost,
) -> Option<usize> {
    match msg {
        CardMessage::Entered(card) => {
            cards.get_mut(card)?.enter();
            Some(card)
        }
        CardMessage::Moved {
            card,
            pos,
            width,
            height,
        } => {
            if cards.get_mut(card)?.pointer_moved(pos, width, height) {
                host.request_frame(card);
            }
            None
        }
        CardMessage::Frame(card) => cards.get_mut(card)?.frame().then_some(card),
        CardMessage::Left(card) => {
            cards.get_mut(card)?.leave();
            Some(card)
        }
    }
}

/// Handle language switch messages.
pub fn handle_language(
    msg: LanguageMessage,
    switcher: &mut LanguageSwitcher,
    host: &mut dyn PageHost,
) {
    match msg {
        LanguageMessage::Select(code) => {
            if let Some(path) = switcher.select(&code) {
                host.go_to(&path);
            }
        }
    }
}

/// Handle newsletter reader messages. Returns whether the selection moved.
pub fn handle_newsletter(msg: NewsletterMessage, reader: &mut NewsletterReader) -> bool {
    match msg {
        NewsletterMessage::Select(id) => reader.select(&id),
    }
}

/// Handle project grid messages.
pub fn handle_grid(msg: GridMessage, grid: &mut ProjectGrid) {
    match msg {
        GridMessage::ToggleViewAll => {
            grid.toggle();
        }
    }
}

/// Mutable state needed by the subscription handler.
pub struct SubscriptionState<'a> {
    pub form: &'a mut SubscriptionForm,
    pub client: &'a mut dyn SubscriptionClient,
    pub endpoint: &'a str,
    pub sender: &'a Sender<Message>,
}

/// Handle subscription form messages.
pub fn handle_subscription(msg: SubscriptionMessage, state: SubscriptionState<'_>) {
    match msg {
        SubscriptionMessage::NameChanged(name) => state.form.set_name(name),
        SubscriptionMessage::EmailChanged(email) => state.form.set_email(email),
        SubscriptionMessage::Submit => {
            let request = match state.form.begin_submit() {
                Ok(request) => request,
                Err(e) => {
                    log::debug!("✉️ Submit refused: {}", e);
                    return;
                }
            };
            log::info!("✉️ Posting subscription to {}", state.endpoint);
            let sender = state.sender.clone();
            state.client.submit(
                state.endpoint,
                request,
                Box::new(move |outcome| {
                    sender.send(Message::Subscription(SubscriptionMessage::Finished(outcome)));
                }),
            );
        }
        SubscriptionMessage::Finished(outcome) => state.form.finish(outcome),
    }
}
