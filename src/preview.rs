//! Terminal preview of the page (native only).
//!
//! Drives the same application the browser runs from line commands, so
//! project data, images and the subscription endpoint can be checked
//! without a browser.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use folio_ui::{Key, Point};

use crate::app::{PageHost, PortfolioApp};
use crate::message::{
    CardMessage, GalleryMessage, GridMessage, LanguageMessage, Message, NewsletterMessage,
    SubscriptionMessage,
};

pub const HELP: &str = "\
commands:
  list                      list projects
  open <name>               open a project in the popup
  next | prev | close       popup navigation
  click-bg                  click the popup backdrop
  key <KeyName>             press a key (Escape, ArrowLeft, ArrowRight, ...)
  tilt <card> <x> <y> <w> <h>  hover a card at (x, y)
  lang <code>               switch language
  news <id>                 read a newsletter
  viewall                   toggle the project grid
  name <text> | email <text>  fill the subscription form
  subscribe                 submit the form
  status                    print the page state
  help | quit";

/// One line of preview input.
#[derive(Debug, Clone)]
pub enum Command {
    List,
    Open(String),
    Send(Vec<Message>),
    Status,
    Help,
    Quit,
}

fn gallery(msg: GalleryMessage) -> Vec<Message> {
    vec![Message::Gallery(msg)]
}

fn number(arg: Option<&str>, what: &str) -> Result<f32, String> {
    arg.ok_or_else(|| format!("missing {}", what))?
        .parse::<f32>()
        .map_err(|e| format!("bad {}: {}", what, e))
}

/// Parse a command line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();

    let command = match word {
        "list" => Command::List,
        "open" if !rest.is_empty() => Command::Open(rest.to_string()),
        "next" => Command::Send(gallery(GalleryMessage::NextImage)),
        "prev" => Command::Send(gallery(GalleryMessage::PrevImage)),
        "close" => Command::Send(gallery(GalleryMessage::ClosePopup)),
        "click-bg" => Command::Send(gallery(GalleryMessage::BackgroundClicked)),
        "key" => {
            let key = Key::from_dom_key(rest).ok_or_else(|| format!("unknown key '{}'", rest))?;
            Command::Send(gallery(GalleryMessage::KeyPressed(key)))
        }
        "tilt" => {
            let mut args = rest.split_whitespace();
            let card = args
                .next()
                .and_then(|c| c.parse::<usize>().ok())
                .ok_or("missing card index")?;
            let x = number(args.next(), "x")?;
            let y = number(args.next(), "y")?;
            let width = number(args.next(), "width")?;
            let height = number(args.next(), "height")?;
            Command::Send(vec![
                Message::Card(CardMessage::Entered(card)),
                Message::Card(CardMessage::Moved {
                    card,
                    pos: Point::new(x, y),
                    width,
                    height,
                }),
            ])
        }
        "lang" if !rest.is_empty() => Command::Send(vec![Message::Language(
            LanguageMessage::Select(rest.to_string()),
        )]),
        "news" if !rest.is_empty() => Command::Send(vec![Message::Newsletter(
            NewsletterMessage::Select(rest.to_string()),
        )]),
        "viewall" => Command::Send(vec![Message::Grid(GridMessage::ToggleViewAll)]),
        "name" => Command::Send(vec![Message::Subscription(
            SubscriptionMessage::NameChanged(rest.to_string()),
        )]),
        "email" => Command::Send(vec![Message::Subscription(
            SubscriptionMessage::EmailChanged(rest.to_string()),
        )]),
        "subscribe" => Command::Send(vec![Message::Subscription(SubscriptionMessage::Submit)]),
        "status" => Command::Status,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("unknown command '{}' (try 'help')", other)),
    };
    Ok(Some(command))
}

/// Resolve a project name to its catalog key.
pub fn open_project(app: &PortfolioApp, name: &str) -> Option<Message> {
    let project = app.catalog().find_by_name(name)?;
    Some(Message::Gallery(GalleryMessage::ProjectSelected(
        project.key.clone(),
    )))
}

/// One-line summary of the page state.
pub fn status_line(app: &PortfolioApp) -> String {
    let s = app.gallery().session();
    let popup = if s.is_visible() {
        let position = if s.images().is_empty() {
            "no images".to_string()
        } else {
            format!("{}/{}", s.current_index() + 1, s.images().len())
        };
        let image = if s.is_placeholder_shown() {
            "<placeholder>"
        } else {
            s.displayed_image()
        };
        format!(
            "popup '{}' {} {}{}",
            s.name(),
            position,
            image,
            if s.is_loading() { " (loading)" } else { "" }
        )
    } else {
        "popup closed".to_string()
    };

    let mut parts = vec![popup, format!("lang {}", app.language().code())];
    if app.grid().has_toggle() {
        parts.push(format!("grid {}", app.grid().state().as_attr()));
    }
    if let Some(n) = app.newsletters().selected() {
        parts.push(format!("newsletter '{}'", n.title));
    }
    let status = app.form().status().text();
    if !status.is_empty() {
        parts.push(format!("form: {}", status));
    }
    parts.join(" | ")
}

/// Page host for the terminal: frames are queued for the command loop,
/// navigation is reported.
#[derive(Debug, Clone, Default)]
pub struct TerminalHost {
    frames: Rc<RefCell<VecDeque<usize>>>,
}

impl TerminalHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frame messages requested since the last call.
    pub fn take_frames(&self) -> Vec<Message> {
        self.frames
            .borrow_mut()
            .drain(..)
            .map(|card| Message::Card(CardMessage::Frame(card)))
            .collect()
    }
}

impl PageHost for TerminalHost {
    fn request_frame(&mut self, card: usize) {
        self.frames.borrow_mut().push_back(card);
    }

    fn go_to(&mut self, path: &str) {
        println!("-> navigate to {}", path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert!(matches!(parse_command("   "), Ok(None)));
        assert!(matches!(
            parse_command("open Weather Bot"),
            Ok(Some(Command::Open(ref name))) if name == "Weather Bot"
        ));
        match parse_command("key ArrowRight") {
            Ok(Some(Command::Send(messages))) => assert!(matches!(
                messages.as_slice(),
                [Message::Gallery(GalleryMessage::KeyPressed(Key::Right))]
            )),
            other => panic!("unexpected: {:?}", other),
        }
        assert!(matches!(parse_command("quit"), Ok(Some(Command::Quit))));
        assert!(parse_command("key F13").is_err());
        assert!(parse_command("open").is_err());
        assert!(parse_command("dance").is_err());
    }

    #[test]
    fn test_parse_tilt() {
        match parse_command("tilt 2 10 20 100 200") {
            Ok(Some(Command::Send(messages))) => {
                assert_eq!(messages.len(), 2);
                assert!(matches!(
                    messages[1],
                    Message::Card(CardMessage::Moved { card: 2, .. })
                ));
            }
            other => panic!("unexpected: {:?}", other),
        }
        assert!(parse_command("tilt 1 10").is_err());
    }

    #[test]
    fn test_terminal_host_queues_frames() {
        let host = TerminalHost::new();
        let mut handle: Box<dyn PageHost> = Box::new(host.clone());
        handle.request_frame(3);
        handle.request_frame(4);
        assert_eq!(host.take_frames().len(), 2);
        assert!(host.take_frames().is_empty());
    }
}
