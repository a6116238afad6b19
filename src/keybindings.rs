//! Customizable keybindings for the gallery popup.
//!
//! Defaults follow the usual lightbox keys: Escape closes, the arrow keys
//! page through images. Bindings can be overridden from the config file.

use folio_ui::Key;

use crate::gallery::GalleryAction;

/// Keybinding configuration for the popup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    /// Hotkey that closes the popup
    pub close: Key,
    /// Hotkey for the next image
    pub next: Key,
    /// Hotkey for the previous image
    pub previous: Key,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            close: Key::Escape,
            next: Key::Right,
            previous: Key::Left,
        }
    }
}

impl KeyBindings {
    /// Create new keybindings with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the gallery action that corresponds to a key press, if any.
    pub fn action_for_key(&self, key: Key) -> Option<GalleryAction> {
        if key == self.close {
            Some(GalleryAction::Close)
        } else if key == self.next {
            Some(GalleryAction::Next)
        } else if key == self.previous {
            Some(GalleryAction::Previous)
        } else {
            None
        }
    }

    /// Get the hotkey for an action.
    pub fn key_for_action(&self, action: GalleryAction) -> Key {
        match action {
            GalleryAction::Close => self.close,
            GalleryAction::Next => self.next,
            GalleryAction::Previous => self.previous,
        }
    }

    /// First key bound to more than one action, with the other action's label.
    pub fn first_conflict(&self) -> Option<(Key, &'static str)> {
        [GalleryAction::Close, GalleryAction::Next, GalleryAction::Previous]
            .into_iter()
            .find_map(|action| {
                let key = self.key_for_action(action);
                self.key_conflict(key, Some(action)).map(|label| (key, label))
            })
    }

    /// Check if a key is already used by another action.
    /// Returns a description of what it's used for, if anything.
    pub fn key_conflict(&self, key: Key, exclude: Option<GalleryAction>) -> Option<&'static str> {
        [
            (GalleryAction::Close, "Close popup"),
            (GalleryAction::Next, "Next image"),
            (GalleryAction::Previous, "Previous image"),
        ]
        .into_iter()
        .find(|(action, _)| Some(*action) != exclude && self.key_for_action(*action) == key)
        .map(|(_, label)| label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let kb = KeyBindings::new();
        assert_eq!(kb.action_for_key(Key::Escape), Some(GalleryAction::Close));
        assert_eq!(kb.action_for_key(Key::Right), Some(GalleryAction::Next));
        assert_eq!(kb.action_for_key(Key::Left), Some(GalleryAction::Previous));
        assert_eq!(kb.action_for_key(Key::Enter), None);
    }

    #[test]
    fn test_custom_keys() {
        let kb = KeyBindings {
            close: Key::Char('q'),
            next: Key::Char('l'),
            previous: Key::Char('h'),
        };
        assert_eq!(kb.action_for_key(Key::Char('l')), Some(GalleryAction::Next));
        assert_eq!(kb.action_for_key(Key::Right), None);
        assert_eq!(kb.key_for_action(GalleryAction::Next), Key::Char('l'));
        assert_eq!(kb.first_conflict(), None);
    }

    #[test]
    fn test_key_conflict() {
        let kb = KeyBindings::new();
        assert_eq!(kb.key_conflict(Key::Escape, None), Some("Close popup"));
        assert_eq!(kb.key_conflict(Key::Escape, Some(GalleryAction::Close)), None);
        assert_eq!(kb.key_conflict(Key::Char('x'), None), None);

        let clash = KeyBindings {
            close: Key::Escape,
            next: Key::Left,
            previous: Key::Left,
        };
        assert_eq!(clash.first_conflict(), Some((Key::Left, "Previous image")));
    }
}
