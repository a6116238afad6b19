//! Page languages and their localized UI texts.

use serde::{Deserialize, Serialize};

/// A language the site is published in. Each has its own page, `<code>.html`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Tr,
    Ar,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::En, Language::Tr, Language::Ar];

    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Tr => "tr",
            Self::Ar => "ar",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(code.trim()))
    }

    /// Right-to-left script.
    pub fn is_rtl(self) -> bool {
        matches!(self, Self::Ar)
    }

    pub fn page_path(self) -> String {
        format!("{}.html", self.code())
    }

    /// Detect the language of a page from its path (`/tr.html`, `ar.html?x`).
    /// Anything unrecognised is English.
    pub fn from_page_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let file = path.rsplit('/').next().unwrap_or_default();
        file.strip_suffix(".html")
            .and_then(Self::from_code)
            .unwrap_or_default()
    }

    pub fn texts(self) -> &'static UiTexts {
        match self {
            Self::En => &EN_TEXTS,
            Self::Tr => &TR_TEXTS,
            Self::Ar => &AR_TEXTS,
        }
    }
}

/// Localized strings used by page widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiTexts {
    pub view_all: &'static str,
    pub show_less: &'static str,
    pub newsletter_title: &'static str,
    pub newsletter_prompt: &'static str,
}

static EN_TEXTS: UiTexts = UiTexts {
    view_all: "Show All Projects",
    show_less: "Show Less",
    newsletter_title: "My Newsletters",
    newsletter_prompt: "Select a newsletter from the list to read it.",
};

static TR_TEXTS: UiTexts = UiTexts {
    view_all: "Tüm Projeleri Göster",
    show_less: "Daha Az Göster",
    newsletter_title: "Bültenlerim",
    newsletter_prompt: "Okumak için listeden bir bülten seçin.",
};

static AR_TEXTS: UiTexts = UiTexts {
    view_all: "عرض كل المشاريع",
    show_less: "عرض أقل",
    newsletter_title: "نشراتي الإخبارية",
    newsletter_prompt: "اختر نشرة من القائمة لقراءتها.",
};

/// Tracks the current page language and resolves switch targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LanguageSwitcher {
    current: Language,
}

impl LanguageSwitcher {
    pub fn new(current: Language) -> Self {
        Self { current }
    }

    pub fn current(&self) -> Language {
        self.current
    }

    /// Page to navigate to for `code`, or `None` if the code is unknown.
    pub fn select(&mut self, code: &str) -> Option<String> {
        let Some(lang) = Language::from_code(code) else {
            log::warn!("Unknown language code '{}'", code);
            return None;
        };
        log::info!("🌐 Switching language {} -> {}", self.current.code(), lang.code());
        self.current = lang;
        Some(lang.page_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip() {
        for lang in Language::ALL {
            assert_eq!(Language::from_code(lang.code()), Some(lang));
        }
        assert_eq!(Language::from_code("TR"), Some(Language::Tr));
        assert_eq!(Language::from_code("de"), None);
    }

    #[test]
    fn test_only_arabic_is_rtl() {
        assert!(Language::Ar.is_rtl());
        assert!(!Language::En.is_rtl());
        assert!(!Language::Tr.is_rtl());
    }

    #[test]
    fn test_from_page_path() {
        assert_eq!(Language::from_page_path("/tr.html"), Language::Tr);
        assert_eq!(Language::from_page_path("ar.html?ref=nav#top"), Language::Ar);
        assert_eq!(Language::from_page_path("/site/en.html"), Language::En);
        assert_eq!(Language::from_page_path("/"), Language::En);
        assert_eq!(Language::from_page_path("/index.html"), Language::En);
    }

    #[test]
    fn test_texts_are_localized() {
        assert_eq!(Language::En.texts().view_all, "Show All Projects");
        assert_eq!(Language::Tr.texts().show_less, "Daha Az Göster");
        assert_eq!(Language::Ar.texts().newsletter_title, "نشراتي الإخبارية");
    }

    #[test]
    fn test_switcher_select() {
        let mut switcher = LanguageSwitcher::default();
        assert_eq!(switcher.select("ar"), Some("ar.html".to_string()));
        assert_eq!(switcher.current(), Language::Ar);

        assert_eq!(switcher.select("xx"), None);
        assert_eq!(switcher.current(), Language::Ar);
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Language::Tr).unwrap();
        assert_eq!(json, "\"tr\"");
    }
}
