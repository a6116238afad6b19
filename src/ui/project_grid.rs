//! "View all" toggle for the project grid.

use crate::constants::PROJECTS_VISIBLE_COUNT;
use crate::model::Project;

use super::language::Language;

/// Which grid entries start out hidden.
///
/// Only `project` entries count toward the limit; other categories always show.
pub fn hidden_flags(projects: &[Project]) -> Vec<bool> {
    let mut seen = 0;
    projects
        .iter()
        .map(|project| {
            if !project.is_grid_project() {
                return false;
            }
            seen += 1;
            seen > PROJECTS_VISIBLE_COUNT
        })
        .collect()
}

/// Toggle state, mirrored in the button's `data-state` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToggleState {
    #[default]
    Hidden,
    Shown,
}

impl ToggleState {
    pub fn as_attr(self) -> &'static str {
        match self {
            Self::Hidden => "hidden",
            Self::Shown => "shown",
        }
    }

    pub fn from_attr(attr: &str) -> Option<Self> {
        match attr {
            "hidden" => Some(Self::Hidden),
            "shown" => Some(Self::Shown),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProjectGrid {
    hidden: Vec<bool>,
    state: ToggleState,
    language: Language,
}

impl ProjectGrid {
    pub fn new(projects: &[Project], language: Language) -> Self {
        Self::from_hidden_flags(hidden_flags(projects), language)
    }

    /// Build from flags already rendered into the page.
    pub fn from_hidden_flags(hidden: Vec<bool>, language: Language) -> Self {
        Self {
            hidden,
            state: ToggleState::Hidden,
            language,
        }
    }

    /// Whether the page needs a toggle at all.
    pub fn has_toggle(&self) -> bool {
        self.hidden.iter().any(|&h| h)
    }

    pub fn state(&self) -> ToggleState {
        self.state
    }

    pub fn toggle(&mut self) -> ToggleState {
        if !self.has_toggle() {
            return self.state;
        }
        self.state = match self.state {
            ToggleState::Hidden => ToggleState::Shown,
            ToggleState::Shown => ToggleState::Hidden,
        };
        log::debug!("🔽 View-all toggled to {}", self.state.as_attr());
        self.state
    }

    pub fn is_visible(&self, index: usize) -> bool {
        self.state == ToggleState::Shown || !self.hidden.get(index).copied().unwrap_or(false)
    }

    pub fn label(&self) -> &'static str {
        let texts = self.language.texts();
        match self.state {
            ToggleState::Hidden => texts.view_all,
            ToggleState::Shown => texts.show_less,
        }
    }

    pub fn len(&self) -> usize {
        self.hidden.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hidden.is_empty()
    }
}
