//! Browser shell: binds page elements to the application (WASM only).
//!
//! Listeners turn DOM events into messages; after every batch of updates the
//! runtime observer repaints the widgets the application reports as changed.
//! Optional widgets whose elements are missing are simply not wired.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlAnchorElement, HtmlButtonElement, HtmlElement,
    HtmlImageElement, HtmlInputElement, KeyboardEvent, MouseEvent, Window,
};
use web_time::Instant;

use folio_ui::{Key, Point, Runtime, Sender};

use crate::app::{PageData, PageHost, PortfolioApp, Services};
use crate::config::AppConfig;
use crate::error::DomError;
use crate::message::{
    CardMessage, GalleryMessage, GridMessage, LanguageMessage, Message, NewsletterMessage,
    POPUP_BACKDROP_ID, SubscriptionMessage,
};
use crate::model::{Project, ProjectAttributes, ProjectCatalog, parse_newsletter_list};
use crate::platform::{FetchSubscriptionClient, WebImageLoader};
use crate::ui::{Language, ToggleState};

/// Interval of the clock that expires overdue image loads.
const TICK_INTERVAL_MS: i32 = 1000;

/// Popup and widget elements, looked up once.
struct Dom {
    document: Document,
    popup: Option<Element>,
    popup_image: Option<HtmlImageElement>,
    popup_link: Option<HtmlAnchorElement>,
    popup_name: Option<Element>,
    popup_description: Option<Element>,
    next_image: Option<HtmlElement>,
    prev_image: Option<HtmlElement>,
    projects: Vec<Element>,
    cards: Vec<HtmlElement>,
    newsletter_items: Vec<Element>,
    newsletter_content: Option<Element>,
    view_all: Option<HtmlButtonElement>,
    subscribe_name: Option<HtmlInputElement>,
    subscribe_email: Option<HtmlInputElement>,
    subscribe_button: Option<HtmlButtonElement>,
    subscribe_status: Option<Element>,
}

fn by_id<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    document.get_element_by_id(id)?.dyn_into::<T>().ok()
}

fn all<T: JsCast>(document: &Document, selector: &str) -> Vec<T> {
    let Ok(list) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<T>().ok())
        .collect()
}

impl Dom {
    fn lookup(document: Document) -> Self {
        Self {
            popup: by_id(&document, POPUP_BACKDROP_ID),
            popup_image: by_id(&document, "popup-image"),
            popup_link: by_id(&document, "popup-image-link"),
            popup_name: by_id(&document, "popup-name"),
            popup_description: by_id(&document, "popup-description"),
            next_image: by_id(&document, "nextImage"),
            prev_image: by_id(&document, "prevImage"),
            projects: all(&document, ".project"),
            cards: all(&document, ".project-inner"),
            newsletter_items: all(&document, ".newsletter-list li[data-id]"),
            newsletter_content: document
                .query_selector(".newsletter-content")
                .ok()
                .flatten(),
            view_all: by_id(&document, "view-all-btn"),
            subscribe_name: by_id(&document, "subscribe-name"),
            subscribe_email: by_id(&document, "subscribe-email"),
            subscribe_button: by_id(&document, "subscribe-button"),
            subscribe_status: by_id(&document, "subscribe-status"),
            document,
        }
    }

    fn render(&self, app: &PortfolioApp) {
        let changes = app.take_changes();
        if changes.popup {
            self.render_popup(app);
        }
        for &index in &changes.cards {
            self.render_card(app, index);
        }
        if changes.grid {
            self.render_grid(app);
        }
        if changes.newsletter {
            self.render_newsletters(app);
        }
        if changes.form {
            self.render_form(app);
        }
    }

    fn render_popup(&self, app: &PortfolioApp) {
        let session = app.gallery().session();

        if let Some(popup) = &self.popup {
            let _ = popup
                .class_list()
                .toggle_with_force("show", session.is_visible());
        }
        if let Some(body) = self.document.body() {
            let overflow = if session.scroll_locked() { "hidden" } else { "auto" };
            let _ = body.style().set_property("overflow", overflow);
        }
        if let Some(image) = &self.popup_image {
            if image.get_attribute("src").as_deref() != Some(session.displayed_image()) {
                image.set_src(session.displayed_image());
            }
            let _ = image
                .class_list()
                .toggle_with_force("loading", session.is_loading());
        }
        if let Some(link) = &self.popup_link {
            link.set_href(session.link_target());
        }
        if let Some(name) = &self.popup_name {
            name.set_text_content(Some(session.name()));
        }
        if let Some(description) = &self.popup_description {
            description.set_text_content(Some(session.description()));
        }

        let display = if session.nav_visible() { "inline-block" } else { "none" };
        for nav in [&self.next_image, &self.prev_image].into_iter().flatten() {
            let _ = nav.style().set_property("display", display);
        }
    }

    fn render_card(&self, app: &PortfolioApp, index: usize) {
        let (Some(card), Some(tilt)) = (self.cards.get(index), app.card(index)) else {
            return;
        };
        let style = card.style();
        let _ = style.set_property("transition", tilt.transition());
        let _ = style.set_property("transform", tilt.transform());
    }

    fn render_grid(&self, app: &PortfolioApp) {
        let grid = app.grid();
        for (index, project) in self.projects.iter().enumerate() {
            let _ = project
                .class_list()
                .toggle_with_force("hidden-project", !grid.is_visible(index));
        }
        if let Some(button) = &self.view_all {
            let _ = button.set_attribute("data-state", grid.state().as_attr());
            button.set_text_content(Some(grid.label()));
        }
    }

    fn render_newsletters(&self, app: &PortfolioApp) {
        let reader = app.newsletters();
        for item in &self.newsletter_items {
            let id = item.get_attribute("data-id").unwrap_or_default();
            let _ = item
                .class_list()
                .toggle_with_force("active", reader.is_selected(&id));
        }
        if let Some(content) = &self.newsletter_content {
            let html = reader.content_html();
            if content.inner_html() != html {
                content.set_inner_html(&html);
            }
        }
    }

    fn render_form(&self, app: &PortfolioApp) {
        let form = app.form();
        let enabled = form.is_enabled();
        if let Some(input) = &self.subscribe_name {
            if input.value() != form.name() {
                input.set_value(form.name());
            }
            input.set_disabled(!enabled);
        }
        if let Some(input) = &self.subscribe_email {
            if input.value() != form.email() {
                input.set_value(form.email());
            }
            input.set_disabled(!enabled);
        }
        if let Some(button) = &self.subscribe_button {
            button.set_disabled(!enabled);
        }
        if let Some(status) = &self.subscribe_status {
            status.set_text_content(Some(form.status().text()));
            let _ = status
                .class_list()
                .toggle_with_force("error", form.status().is_error());
        }
    }
}

/// Animation frames and navigation through `window`.
struct DomHost {
    window: Window,
    sender: Sender<Message>,
}

impl PageHost for DomHost {
    fn request_frame(&mut self, card: usize) {
        let sender = self.sender.clone();
        let callback = Closure::once_into_js(move || {
            sender.send(Message::Card(CardMessage::Frame(card)));
        });
        if let Err(e) = self.window.request_animation_frame(callback.unchecked_ref()) {
            log::error!("requestAnimationFrame failed: {:?}", e);
        }
    }

    fn go_to(&mut self, path: &str) {
        if let Err(e) = self.window.location().set_href(path) {
            log::error!("Navigation to {} failed: {:?}", path, e);
        }
    }
}

fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), DomError>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    // Listeners live as long as the page
    closure.forget();
    Ok(())
}

fn project_attributes(element: &Element) -> ProjectAttributes {
    ProjectAttributes {
        name: element.get_attribute("data-name"),
        description: element.get_attribute("data-description"),
        images: element.get_attribute("data-images"),
        external_link_image: element.get_attribute("data-external-link-image"),
    }
}

/// Read the `newsletterData` global the page script defines, if any.
fn newsletter_json() -> Option<String> {
    let read = js_sys::Function::new_no_args(
        "return typeof newsletterData === 'undefined' ? null : JSON.stringify(newsletterData);",
    );
    read.call0(&JsValue::NULL).ok()?.as_string()
}

fn page_data(window: &Window, dom: &Dom) -> PageData {
    let path = window.location().pathname().unwrap_or_default();
    let language = Language::from_page_path(&path);
    if language.is_rtl() {
        if let Some(root) = dom.document.document_element() {
            let _ = root.set_attribute("dir", "rtl");
        }
    }

    let projects: Vec<Project> = dom
        .projects
        .iter()
        .map(|el| {
            let mut project = Project::from_attributes(&project_attributes(el));
            project.category = el.get_attribute("data-category");
            project
        })
        .collect();
    let hidden = dom
        .projects
        .iter()
        .map(|el| el.class_list().contains("hidden-project"))
        .collect();

    PageData {
        catalog: ProjectCatalog::new(projects),
        newsletters: newsletter_json()
            .map(|json| parse_newsletter_list(&json))
            .unwrap_or_default(),
        language,
        hidden: Some(hidden),
    }
}

/// Bind the application to the current document.
pub fn mount(config: AppConfig) -> Result<(), DomError> {
    let window = web_sys::window().ok_or(DomError::NoGlobal("window"))?;
    let document = window.document().ok_or(DomError::NoGlobal("document"))?;
    let dom = Dom::lookup(document.clone());
    let page = page_data(&window, &dom);

    let host_window = window.clone();
    let runtime = Runtime::new(move |sender: Sender<Message>| {
        let loaded = sender.clone();
        let services = Services {
            loader: Box::new(WebImageLoader::new(move |completion| {
                loaded.send(Message::Gallery(GalleryMessage::ImageLoaded(completion)));
            })),
            subscriber: Box::new(FetchSubscriptionClient),
            host: Box::new(DomHost {
                window: host_window,
                sender: sender.clone(),
            }),
        };
        PortfolioApp::new(&config, page, services, sender)
    });

    bind_gallery(&runtime, &document, &dom)?;
    bind_cards(&runtime, &dom)?;
    bind_widgets(&runtime, &document, &dom)?;
    bind_clock(&runtime, &window)?;

    let _ = runtime.with_app(|app| dom.render(app));
    runtime.set_observer(move |app| dom.render(app));
    log::info!("🚀 Page bound");
    Ok(())
}

fn bind_gallery(
    runtime: &Runtime<PortfolioApp>,
    document: &Document,
    dom: &Dom,
) -> Result<(), DomError> {
    // Delegated: project clicks and clicks on the popup backdrop
    let rt = runtime.clone();
    listen(document, "click", move |event| {
        let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return;
        };
        let project = target.closest(".project").ok().flatten();
        let attrs = project.as_ref().map(project_attributes);
        if let Some(message) = GalleryMessage::from_click(attrs, &target.id()) {
            rt.dispatch(Message::Gallery(message));
        }
    })?;

    let rt = runtime.clone();
    listen(document, "keydown", move |event| {
        let Some(key) = event
            .dyn_ref::<KeyboardEvent>()
            .and_then(|e| Key::from_dom_key(&e.key()))
        else {
            return;
        };
        rt.dispatch(Message::Gallery(GalleryMessage::KeyPressed(key)));
    })?;

    let buttons = [
        (dom.next_image.clone(), GalleryMessage::NextImage),
        (dom.prev_image.clone(), GalleryMessage::PrevImage),
        (by_id::<HtmlElement>(document, "closePopup"), GalleryMessage::ClosePopup),
    ];
    for (element, message) in buttons {
        let Some(element) = element else {
            continue;
        };
        let rt = runtime.clone();
        listen(&element, "click", move |_| {
            rt.dispatch(Message::Gallery(message.clone()));
        })?;
    }
    Ok(())
}

fn bind_cards(runtime: &Runtime<PortfolioApp>, dom: &Dom) -> Result<(), DomError> {
    for (index, card) in dom.cards.iter().enumerate() {
        let rt = runtime.clone();
        listen(card, "mouseenter", move |_| {
            rt.dispatch(Message::Card(CardMessage::Entered(index)));
        })?;

        let rt = runtime.clone();
        let tracked = card.clone();
        listen(card, "mousemove", move |event| {
            let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let rect = tracked.get_bounding_client_rect();
            let pos = Point::new(
                mouse.client_x() as f32 - rect.left() as f32,
                mouse.client_y() as f32 - rect.top() as f32,
            );
            rt.dispatch(Message::Card(CardMessage::Moved {
                card: index,
                pos,
                width: tracked.client_width() as f32,
                height: tracked.client_height() as f32,
            }));
        })?;

        let rt = runtime.clone();
        listen(card, "mouseleave", move |_| {
            rt.dispatch(Message::Card(CardMessage::Left(index)));
        })?;
    }
    Ok(())
}

fn bind_widgets(
    runtime: &Runtime<PortfolioApp>,
    document: &Document,
    dom: &Dom,
) -> Result<(), DomError> {
    for button in all::<Element>(document, "[data-lang]") {
        let code = button.get_attribute("data-lang").unwrap_or_default();
        let rt = runtime.clone();
        listen(&button, "click", move |event| {
            event.prevent_default();
            rt.dispatch(Message::Language(LanguageMessage::Select(code.clone())));
        })?;
    }

    for item in &dom.newsletter_items {
        let id = item.get_attribute("data-id").unwrap_or_default();
        let rt = runtime.clone();
        listen(item, "click", move |_| {
            rt.dispatch(Message::Newsletter(NewsletterMessage::Select(id.clone())));
        })?;
    }

    if let Some(button) = &dom.view_all {
        // Markup may start expanded
        let shown = button.get_attribute("data-state").as_deref().and_then(ToggleState::from_attr)
            == Some(ToggleState::Shown);
        if shown {
            runtime.dispatch(Message::Grid(GridMessage::ToggleViewAll));
        }
        let rt = runtime.clone();
        listen(button, "click", move |_| {
            rt.dispatch(Message::Grid(GridMessage::ToggleViewAll));
        })?;
    }

    let inputs = [
        (dom.subscribe_name.clone(), true),
        (dom.subscribe_email.clone(), false),
    ];
    for (input, is_name) in inputs {
        let Some(input) = input else {
            continue;
        };
        let rt = runtime.clone();
        let source = input.clone();
        listen(&input, "input", move |_| {
            let value = source.value();
            let msg = if is_name {
                SubscriptionMessage::NameChanged(value)
            } else {
                SubscriptionMessage::EmailChanged(value)
            };
            rt.dispatch(Message::Subscription(msg));
        })?;
    }

    if let Some(form) = by_id::<Element>(document, "subscribe-form") {
        let rt = runtime.clone();
        listen(&form, "submit", move |event| {
            event.prevent_default();
            rt.dispatch(Message::Subscription(SubscriptionMessage::Submit));
        })?;
    }
    Ok(())
}

fn bind_clock(runtime: &Runtime<PortfolioApp>, window: &Window) -> Result<(), DomError> {
    let rt = runtime.clone();
    let tick = Closure::<dyn FnMut()>::new(move || {
        rt.dispatch(Message::Gallery(GalleryMessage::Tick(Instant::now())));
    });
    window.set_interval_with_callback_and_timeout_and_arguments_0(
        tick.as_ref().unchecked_ref(),
        TICK_INTERVAL_MS,
    )?;
    tick.forget();
    Ok(())
}
