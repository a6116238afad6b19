//! folio application state.
//!
//! One struct owns every widget on the page: the gallery popup, card tilts,
//! the language switcher, the newsletter reader, the project grid toggle and
//! the subscription form. Platform effects go through [`Services`].
//! Every update records which widgets it touched in [`Changes`], so a shell
//! only repaints those.

use std::cell::Cell;

use folio_ui::{Application, Sender};

use crate::config::AppConfig;
use crate::gallery::{GalleryController, ImageLoader};
use crate::handlers::{
    SubscriptionState, handle_card, handle_gallery, handle_grid, handle_language,
    handle_newsletter, handle_subscription,
};
use crate::keybindings::KeyBindings;
use crate::message::Message;
use crate::model::{Newsletter, ProjectCatalog};
use crate::ui::{
    CardTilt, Language, LanguageSwitcher, NewsletterReader, ProjectGrid, SubscriptionClient,
    SubscriptionForm,
};

/// Page-level effects that are not loads or HTTP requests.
pub trait PageHost {
    /// Ask for an animation frame for `card`; answer with `CardMessage::Frame`.
    fn request_frame(&mut self, card: usize);

    /// Navigate the browser to `path`.
    fn go_to(&mut self, path: &str);
}

/// Platform implementations the application talks to.
pub struct Services {
    pub loader: Box<dyn ImageLoader>,
    pub subscriber: Box<dyn SubscriptionClient>,
    pub host: Box<dyn PageHost>,
}

/// Content of the page the application is bound to.
#[derive(Debug, Clone, Default)]
pub struct PageData {
    pub catalog: ProjectCatalog,
    pub newsletters: Vec<Newsletter>,
    pub language: Language,
    /// Grid entries already hidden by the markup; computed from the catalog if unset
    pub hidden: Option<Vec<bool>>,
}

/// Widgets whose state changed since the shell last rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Changes {
    pub popup: bool,
    /// Card indices, in the order they changed
    pub cards: Vec<usize>,
    pub grid: bool,
    pub newsletter: bool,
    pub form: bool,
}

impl Changes {
    /// Everything on a page with `cards` cards.
    pub fn all(cards: usize) -> Self {
        Self {
            popup: true,
            cards: (0..cards).collect(),
            grid: true,
            newsletter: true,
            form: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn card(&mut self, index: usize) {
        if !self.cards.contains(&index) {
            self.cards.push(index);
        }
    }
}

pub struct PortfolioApp {
    gallery: GalleryController<Box<dyn ImageLoader>>,
    keybindings: KeyBindings,
    catalog: ProjectCatalog,
    cards: Vec<CardTilt>,
    language: LanguageSwitcher,
    newsletters: NewsletterReader,
    grid: ProjectGrid,
    form: SubscriptionForm,
    endpoint: String,
    subscriber: Box<dyn SubscriptionClient>,
    host: Box<dyn PageHost>,
    sender: Sender<Message>,
    changes: Cell<Changes>,
}

impl PortfolioApp {
    pub fn new(
        config: &AppConfig,
        page: PageData,
        services: Services,
        sender: Sender<Message>,
    ) -> Self {
        let grid = match page.hidden {
            Some(hidden) => ProjectGrid::from_hidden_flags(hidden, page.language),
            None => ProjectGrid::new(page.catalog.as_slice(), page.language),
        };
        log::info!(
            "🚀 folio started: {} projects, {} newsletters, language {}",
            page.catalog.len(),
            page.newsletters.len(),
            page.language.code()
        );

        Self {
            changes: Cell::new(Changes::all(page.catalog.len())),
            gallery: GalleryController::new(services.loader, config.gallery_options()),
            keybindings: config.keybindings.to_keybindings(),
            cards: vec![CardTilt::default(); page.catalog.len()],
            catalog: page.catalog,
            language: LanguageSwitcher::new(page.language),
            newsletters: NewsletterReader::new(page.newsletters, page.language),
            grid,
            form: SubscriptionForm::new(),
            endpoint: config.subscription.endpoint.clone(),
            subscriber: services.subscriber,
            host: services.host,
            sender,
        }
    }

    pub fn gallery(&self) -> &GalleryController<Box<dyn ImageLoader>> {
        &self.gallery
    }

    pub fn catalog(&self) -> &ProjectCatalog {
        &self.catalog
    }

    pub fn card(&self, index: usize) -> Option<&CardTilt> {
        self.cards.get(index)
    }

    pub fn language(&self) -> Language {
        self.language.current()
    }

    pub fn newsletters(&self) -> &NewsletterReader {
        &self.newsletters
    }

    pub fn grid(&self) -> &ProjectGrid {
        &self.grid
    }

    pub fn form(&self) -> &SubscriptionForm {
        &self.form
    }

    /// Take the changes recorded since the last call. A new application
    /// reports everything as changed.
    pub fn take_changes(&self) -> Changes {
        self.changes.take()
    }
}

impl Application for PortfolioApp {
    type Message = Message;

    fn update(&mut self, message: Message) {
        let changes = self.changes.get_mut();
        match message {
            Message::Gallery(msg) => {
                changes.popup |=
                    handle_gallery(msg, &mut self.gallery, &self.catalog, &self.keybindings);
            }
            Message::Card(msg) => {
                if let Some(card) = handle_card(msg, &mut self.cards, self.host.as_mut()) {
                    changes.card(card);
                }
            }
            Message::Language(msg) => handle_language(msg, &mut self.language, self.host.as_mut()),
            Message::Newsletter(msg) => {
                changes.newsletter |= handle_newsletter(msg, &mut self.newsletters);
            }
            Message::Grid(msg) => {
                handle_grid(msg, &mut self.grid);
                changes.grid = true;
            }
            Message::Subscription(msg) => {
                handle_subscription(
                    msg,
                    SubscriptionState {
                        form: &mut self.form,
                        client: self.subscriber.as_mut(),
                        endpoint: &self.endpoint,
                        sender: &self.sender,
                    },
                );
                changes.form = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use folio_ui::{Key, Point, Runtime};

    use super::*;
    use crate::error::SubscribeError;
    use crate::gallery::{LoadCompletion, LoadTicket, LoadedImage};
    use crate::message::{
        CardMessage, GalleryMessage, GridMessage, LanguageMessage, NewsletterMessage,
        SubscriptionMessage,
    };
    use crate::model::{Project, ProjectKey};
    use crate::ui::{SubmitDone, SubscribeRequest, interpret_response, subscribe};

    #[derive(Default)]
    struct Log {
        requests: Vec<(LoadTicket, String)>,
        posts: Vec<(String, SubscribeRequest)>,
        frames: Vec<usize>,
        pages: Vec<String>,
    }

    type SharedLog = Rc<RefCell<Log>>;

    struct MockLoader(SharedLog);

    impl ImageLoader for MockLoader {
        fn request(&mut self, ticket: LoadTicket, url: &str) {
            self.0.borrow_mut().requests.push((ticket, url.to_string()));
        }

        fn preload(&mut self, _url: &str) {}
    }

    /// Answers every post immediately with a canned HTTP response.
    struct MockEndpoint {
        log: SharedLog,
        status: u16,
        body: &'static str,
    }

    impl SubscriptionClient for MockEndpoint {
        fn submit(&mut self, endpoint: &str, request: SubscribeRequest, done: SubmitDone) {
            self.log
                .borrow_mut()
                .posts
                .push((endpoint.to_string(), request));
            done(interpret_response(self.status, self.body));
        }
    }

    struct MockHost(SharedLog);

    impl PageHost for MockHost {
        fn request_frame(&mut self, card: usize) {
            self.0.borrow_mut().frames.push(card);
        }

        fn go_to(&mut self, path: &str) {
            self.0.borrow_mut().pages.push(path.to_string());
        }
    }

    fn page() -> PageData {
        let projects = (1..=6)
            .map(|i| {
                Project::new(
                    &format!("P{}", i),
                    "desc",
                    vec![format!("p{}a.png", i), format!("p{}b.png", i), format!("p{}c.png", i)],
                )
                .with_category("project")
            })
            .collect();
        PageData {
            catalog: ProjectCatalog::new(projects),
            newsletters: vec![Newsletter {
                id: "001".to_string(),
                title: "Hello".to_string(),
                content: "Body".to_string(),
            }],
            language: Language::En,
            hidden: None,
        }
    }

    fn runtime_with(status: u16, body: &'static str) -> (Runtime<PortfolioApp>, SharedLog) {
        let log = SharedLog::default();
        let services_log = Rc::clone(&log);
        let runtime = Runtime::new(move |sender| {
            PortfolioApp::new(
                &AppConfig::new(),
                page(),
                Services {
                    loader: Box::new(MockLoader(Rc::clone(&services_log))),
                    subscriber: Box::new(MockEndpoint {
                        log: Rc::clone(&services_log),
                        status,
                        body,
                    }),
                    host: Box::new(MockHost(services_log)),
                },
                sender,
            )
        });
        (runtime, log)
    }

    fn runtime() -> (Runtime<PortfolioApp>, SharedLog) {
        runtime_with(200, "{}")
    }

    fn complete_latest(runtime: &Runtime<PortfolioApp>, log: &SharedLog) {
        let (ticket, url) = log.borrow().requests.last().cloned().unwrap();
        runtime.dispatch(Message::Gallery(GalleryMessage::ImageLoaded(
            LoadCompletion {
                ticket,
                result: Ok(LoadedImage {
                    url,
                    width: 10,
                    height: 10,
                }),
            },
        )));
    }

    fn fill_form(runtime: &Runtime<PortfolioApp>) {
        runtime.dispatch(SubscriptionMessage::NameChanged("Ada".to_string()).into());
        runtime.dispatch(SubscriptionMessage::EmailChanged("ada@example.com".to_string()).into());
    }

    #[test]
    fn test_arrow_right_twice_through_runtime() {
        let (runtime, log) = runtime();
        runtime.dispatch(GalleryMessage::ProjectSelected(ProjectKey::new("P2")).into());
        complete_latest(&runtime, &log);

        for _ in 0..2 {
            runtime.dispatch(GalleryMessage::KeyPressed(Key::Right).into());
            complete_latest(&runtime, &log);
        }

        runtime
            .with_app(|app| {
                let s = app.gallery().session();
                assert_eq!(s.current_index(), 2);
                assert_eq!(s.displayed_image(), "p2c.png");
            })
            .unwrap();
    }

    #[test]
    fn test_clicked_attributes_open_popup() {
        let (runtime, log) = runtime();
        let attrs = crate::model::ProjectAttributes {
            name: Some("Loose".to_string()),
            description: Some("Not in the catalog".to_string()),
            images: Some(r#"["x.png"]"#.to_string()),
            external_link_image: Some("https://x.example".to_string()),
        };
        runtime.dispatch(GalleryMessage::ProjectClicked(attrs).into());
        complete_latest(&runtime, &log);

        runtime
            .with_app(|app| {
                let s = app.gallery().session();
                assert!(s.is_visible());
                assert_eq!(s.name(), "Loose");
                assert_eq!(s.link_target(), "https://x.example");
            })
            .unwrap();

        runtime.dispatch(GalleryMessage::BackgroundClicked.into());
        runtime
            .with_app(|app| assert!(!app.gallery().session().is_visible()))
            .unwrap();
    }

    #[test]
    fn test_unknown_project_key_is_ignored() {
        let (runtime, log) = runtime();
        runtime.dispatch(GalleryMessage::ProjectSelected(ProjectKey::new("Nope")).into());
        assert!(log.borrow().requests.is_empty());
        runtime
            .with_app(|app| assert!(!app.gallery().session().is_visible()))
            .unwrap();
    }

    #[test]
    fn test_subscription_success_clears_inputs() {
        let (runtime, log) = runtime_with(200, "");
        fill_form(&runtime);
        runtime.dispatch(SubscriptionMessage::Submit.into());

        {
            let log = log.borrow();
            assert_eq!(log.posts.len(), 1);
            assert_eq!(log.posts[0].0, crate::constants::DEFAULT_SUBSCRIBE_ENDPOINT);
            assert_eq!(log.posts[0].1.email, "ada@example.com");
        }

        runtime
            .with_app(|app| {
                let form = app.form();
                assert_eq!(form.status().text(), subscribe::SUCCESS_TEXT);
                assert_eq!(form.name(), "");
                assert_eq!(form.email(), "");
                assert!(form.is_enabled());
            })
            .unwrap();
    }

    #[test]
    fn test_subscription_server_error_shows_message() {
        let (runtime, _log) = runtime_with(500, r#"{"error":"Invalid email"}"#);
        fill_form(&runtime);
        runtime.dispatch(SubscriptionMessage::Submit.into());

        runtime
            .with_app(|app| {
                let form = app.form();
                assert_eq!(form.status().text(), "Invalid email");
                assert!(form.status().is_error());
                assert!(form.is_enabled());
                assert_eq!(form.email(), "ada@example.com");
            })
            .unwrap();
    }

    #[test]
    fn test_subscription_network_error() {
        let (runtime, _log) = runtime();
        fill_form(&runtime);
        runtime.dispatch(
            SubscriptionMessage::Finished(Err(SubscribeError::Network("offline".to_string())))
                .into(),
        );
        runtime
            .with_app(|app| {
                assert_eq!(app.form().status().text(), subscribe::NETWORK_ERROR_TEXT);
                assert_eq!(app.form().name(), "Ada");
                assert!(app.form().is_enabled());
            })
            .unwrap();
    }

    #[test]
    fn test_invalid_form_is_not_posted() {
        let (runtime, log) = runtime();
        runtime.dispatch(SubscriptionMessage::NameChanged("Ada".to_string()).into());
        runtime.dispatch(SubscriptionMessage::Submit.into());
        assert!(log.borrow().posts.is_empty());
    }

    /// Collect the non-empty change sets the runtime observer sees.
    fn record_changes(runtime: &Runtime<PortfolioApp>) -> Rc<RefCell<Vec<Changes>>> {
        let initial = runtime.with_app(|app| app.take_changes()).unwrap();
        assert_eq!(initial, Changes::all(6));

        let seen: Rc<RefCell<Vec<Changes>>> = Rc::default();
        let sink = Rc::clone(&seen);
        runtime.set_observer(move |app| {
            let changes = app.take_changes();
            if !changes.is_empty() {
                sink.borrow_mut().push(changes);
            }
        });
        seen
    }

    #[test]
    fn test_pointer_moves_repaint_only_after_frame() {
        let (runtime, log) = runtime();
        let seen = record_changes(&runtime);

        runtime.dispatch(CardMessage::Entered(1).into());
        for x in [10.0, 20.0, 30.0, 40.0, 50.0] {
            runtime.dispatch(
                CardMessage::Moved {
                    card: 1,
                    pos: Point::new(x, 5.0),
                    width: 100.0,
                    height: 100.0,
                }
                .into(),
            );
        }
        // Nothing is loading, so the clock changes nothing either
        runtime.dispatch(GalleryMessage::Tick(web_time::Instant::now()).into());

        assert_eq!(log.borrow().frames, vec![1]);
        assert_eq!(
            *seen.borrow(),
            vec![Changes {
                cards: vec![1],
                ..Changes::default()
            }]
        );

        runtime.dispatch(CardMessage::Frame(1).into());
        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[1].cards, vec![1]);
        assert!(!seen[1].popup);
        assert!(!seen[1].newsletter);
    }

    #[test]
    fn test_changes_follow_the_touched_widget() {
        let (runtime, log) = runtime();
        let seen = record_changes(&runtime);

        runtime.dispatch(Message::Newsletter(NewsletterMessage::Select("999".to_string())));
        runtime.dispatch(GalleryMessage::KeyPressed(Key::Right).into());
        assert!(seen.borrow().is_empty());

        runtime.dispatch(Message::Newsletter(NewsletterMessage::Select("001".to_string())));
        runtime.dispatch(GalleryMessage::ProjectSelected(ProjectKey::new("P1")).into());
        complete_latest(&runtime, &log);

        let seen = seen.borrow();
        assert_eq!(seen.len(), 3);
        assert!(seen[0].newsletter && !seen[0].popup);
        assert!(seen[1].popup && !seen[1].newsletter);
        assert!(seen[2].popup && seen[2].cards.is_empty());
    }

    #[test]
    fn test_card_moves_request_one_frame() {
        let (runtime, log) = runtime();
        runtime.dispatch(CardMessage::Entered(1).into());
        for x in [10.0, 20.0, 30.0] {
            runtime.dispatch(
                CardMessage::Moved {
                    card: 1,
                    pos: Point::new(x, 50.0),
                    width: 100.0,
                    height: 100.0,
                }
                .into(),
            );
        }
        assert_eq!(log.borrow().frames, vec![1]);

        runtime.dispatch(CardMessage::Frame(1).into());
        runtime
            .with_app(|app| {
                let card = app.card(1).unwrap();
                assert!(card.transform().starts_with("perspective(1500px)"));
            })
            .unwrap();

        // Out-of-range cards are ignored
        runtime.dispatch(CardMessage::Entered(99).into());
    }

    #[test]
    fn test_language_switch_navigates() {
        let (runtime, log) = runtime();
        runtime.dispatch(Message::Language(LanguageMessage::Select("tr".to_string())));
        runtime.dispatch(Message::Language(LanguageMessage::Select("zz".to_string())));
        assert_eq!(log.borrow().pages, vec!["tr.html".to_string()]);
        runtime
            .with_app(|app| assert_eq!(app.language(), Language::Tr))
            .unwrap();
    }

    #[test]
    fn test_grid_and_newsletter() {
        let (runtime, _log) = runtime();
        runtime
            .with_app(|app| {
                assert!(app.grid().has_toggle());
                assert!(!app.grid().is_visible(4));
            })
            .unwrap();

        runtime.dispatch(Message::Grid(GridMessage::ToggleViewAll));
        runtime.dispatch(Message::Newsletter(NewsletterMessage::Select(
            "001".to_string(),
        )));
        runtime
            .with_app(|app| {
                assert!(app.grid().is_visible(4));
                assert!(app.newsletters().is_selected("001"));
            })
            .unwrap();
    }
}
