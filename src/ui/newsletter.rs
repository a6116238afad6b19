//! Newsletter reader: a list of issues and the one currently displayed.

use crate::model::Newsletter;

use super::language::Language;

#[derive(Debug, Clone, Default)]
pub struct NewsletterReader {
    newsletters: Vec<Newsletter>,
    selected: Option<usize>,
    language: Language,
}

impl NewsletterReader {
    pub fn new(newsletters: Vec<Newsletter>, language: Language) -> Self {
        Self {
            newsletters,
            selected: None,
            language,
        }
    }

    pub fn newsletters(&self) -> &[Newsletter] {
        &self.newsletters
    }

    /// Whether the page has a newsletter section at all.
    pub fn is_present(&self) -> bool {
        !self.newsletters.is_empty()
    }

    pub fn title(&self) -> &'static str {
        self.language.texts().newsletter_title
    }

    /// Display the newsletter with `id`. Unknown ids leave the reader unchanged.
    pub fn select(&mut self, id: &str) -> bool {
        match self.newsletters.iter().position(|n| n.id == id) {
            Some(index) => {
                log::debug!("📰 Showing newsletter '{}'", id);
                self.selected = Some(index);
                true
            }
            None => {
                log::warn!("No newsletter with id '{}'", id);
                false
            }
        }
    }

    pub fn selected(&self) -> Option<&Newsletter> {
        self.selected.and_then(|i| self.newsletters.get(i))
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected().is_some_and(|n| n.id == id)
    }

    /// HTML for the content pane: the selected issue, or the localized prompt.
    pub fn content_html(&self) -> String {
        match self.selected() {
            Some(n) => format!("<h2>{}</h2><p>{}</p>", escape_text(&n.title), n.content),
            None => format!("<p>{}</p>", self.language.texts().newsletter_prompt),
        }
    }
}

/// Escape plain text for use inside HTML markup.
fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reader(language: Language) -> NewsletterReader {
        NewsletterReader::new(
            vec![
                Newsletter {
                    id: "001".to_string(),
                    title: "First".to_string(),
                    content: "Hello<br>there".to_string(),
                },
                Newsletter {
                    id: "002".to_string(),
                    title: "Second".to_string(),
                    content: "More".to_string(),
                },
            ],
            language,
        )
    }

    #[test]
    fn test_prompt_until_selected() {
        let r = reader(Language::Tr);
        assert!(r.selected().is_none());
        assert_eq!(
            r.content_html(),
            "<p>Okumak için listeden bir bülten seçin.</p>"
        );
    }

    #[test]
    fn test_select_moves_marker() {
        let mut r = reader(Language::En);
        assert!(r.select("001"));
        assert!(r.is_selected("001"));

        assert!(r.select("002"));
        assert!(r.is_selected("002"));
        assert!(!r.is_selected("001"));
        assert_eq!(r.content_html(), "<h2>Second</h2><p>More</p>");
    }

    #[test]
    fn test_unknown_id_is_ignored() {
        let mut r = reader(Language::En);
        r.select("001");
        assert!(!r.select("999"));
        assert!(r.is_selected("001"));
    }

    #[test]
    fn test_title_is_escaped_body_is_not() {
        let mut r = NewsletterReader::new(
            vec![Newsletter {
                id: "007".to_string(),
                title: "Tips & <tricks>".to_string(),
                content: "Line one<br>Line two".to_string(),
            }],
            Language::En,
        );
        assert!(r.select("007"));
        assert_eq!(
            r.content_html(),
            "<h2>Tips &amp; &lt;tricks&gt;</h2><p>Line one<br>Line two</p>"
        );
    }

    #[test]
    fn test_empty_reader_is_absent() {
        let r = NewsletterReader::new(Vec::new(), Language::En);
        assert!(!r.is_present());
        assert_eq!(r.title(), "My Newsletters");
    }
}
