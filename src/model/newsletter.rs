//! Newsletter entries shown by the reader.

use serde::{Deserialize, Serialize};

/// A single newsletter issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Newsletter {
    /// Stable identifier (the source file stem)
    pub id: String,
    /// Title shown in the list
    pub title: String,
    /// Body, already rendered to HTML (`<br>` line breaks)
    pub content: String,
}

impl Newsletter {
    /// Parse a plain-text newsletter: the first line is the title, the rest
    /// is the body. Returns `None` for an empty source.
    pub fn from_text(id: &str, text: &str) -> Option<Self> {
        let mut lines = text.lines();
        let title = lines.next()?.trim().to_string();
        if title.is_empty() {
            return None;
        }
        let body: Vec<&str> = lines.collect();
        let content = body.join("\n").trim().replace('\n', "<br>");

        Some(Self {
            id: id.to_string(),
            title,
            content,
        })
    }
}

/// Parse the page's embedded newsletter list. Bad data yields an empty list.
pub fn parse_newsletter_list(json: &str) -> Vec<Newsletter> {
    match serde_json::from_str::<Vec<Newsletter>>(json) {
        Ok(list) => list,
        Err(e) => {
            log::warn!("Ignoring malformed newsletter data: {}", e);
            Vec::new()
        }
    }
}

/// Load every `.txt` newsletter in `dir`, sorted by file name.
#[cfg(not(target_arch = "wasm32"))]
pub fn load_newsletter_dir(dir: &std::path::Path) -> std::io::Result<Vec<Newsletter>> {
    let mut paths: Vec<std::path::PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some("txt"))
        .collect();
    paths.sort();

    let mut newsletters = Vec::with_capacity(paths.len());
    for path in paths {
        let Some(id) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let text = std::fs::read_to_string(&path)?;
        match Newsletter::from_text(id, &text) {
            Some(newsletter) => newsletters.push(newsletter),
            None => log::warn!("Skipping empty newsletter {:?}", path),
        }
    }

    log::info!("Loaded {} newsletters from {:?}", newsletters.len(), dir);
    Ok(newsletters)
}
