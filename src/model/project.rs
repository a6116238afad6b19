//! Project data model and the parsers for the two ways projects reach us:
//! element attributes on the page, and the site data file.

use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;

use crate::error::ProjectDataError;

/// Identity of a project. The display name doubles as the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectKey(String);

impl ProjectKey {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A selectable portfolio entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    /// Key used to track the active project
    pub key: ProjectKey,
    /// Display name
    pub name: String,
    /// Description text
    pub description: String,
    /// Image URLs in display order (may be empty)
    pub images: Vec<String>,
    /// Link target that replaces the per-image link
    pub external_link: Option<String>,
    /// Grid category; only `project` entries count toward the visible limit
    pub category: Option<String>,
    /// Thumbnail shown on the card
    pub thumb: Option<String>,
}

impl Project {
    /// Create a project with the given name, description and images.
    pub fn new(name: &str, description: &str, images: Vec<String>) -> Self {
        Self {
            key: ProjectKey::new(name),
            name: name.to_string(),
            description: description.to_string(),
            images,
            external_link: None,
            category: None,
            thumb: None,
        }
    }

    /// Set the external link override.
    pub fn with_external_link(mut self, link: impl Into<String>) -> Self {
        self.external_link = Some(link.into());
        self
    }

    /// Set the grid category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Build a project from the attributes of a clicked element.
    ///
    /// A malformed image list never fails the selection: it is logged and the
    /// project is treated as having no images.
    pub fn from_attributes(attrs: &ProjectAttributes) -> Self {
        let name = attrs.name.clone().unwrap_or_default();
        let images = match attrs.images.as_deref() {
            Some(raw) => parse_image_list(raw).unwrap_or_else(|e| {
                log::warn!("Project '{}' has a malformed image list: {}", name, e);
                Vec::new()
            }),
            None => Vec::new(),
        };

        Self {
            key: ProjectKey::new(name.clone()),
            description: attrs.description.clone().unwrap_or_default(),
            images,
            external_link: non_empty(attrs.external_link_image.clone()),
            category: None,
            thumb: None,
            name,
        }
    }

    /// Whether this entry counts toward the grid's visible limit.
    pub fn is_grid_project(&self) -> bool {
        self.category.as_deref() == Some(crate::constants::PROJECT_CATEGORY)
    }
}

/// Raw attributes read from a project element (`data-*`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectAttributes {
    /// `data-name`
    pub name: Option<String>,
    /// `data-description`
    pub description: Option<String>,
    /// `data-images`, a JSON array of URL strings
    pub images: Option<String>,
    /// `data-external-link-image`
    pub external_link_image: Option<String>,
}

/// Parse a JSON image list. Anything but an array of strings is an error.
pub fn parse_image_list(raw: &str) -> Result<Vec<String>, ProjectDataError> {
    let value: serde_json::Value = serde_json::from_str(raw)?;
    let serde_json::Value::Array(entries) = value else {
        return Err(ProjectDataError::NotAList);
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| match entry {
            serde_json::Value::String(url) => Ok(url),
            _ => Err(ProjectDataError::NotAString { index }),
        })
        .collect()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Per-language texts of a site data entry.
#[derive(Debug, Clone, Deserialize)]
struct LocalizedText {
    name: String,
    #[serde(default)]
    description: String,
}

/// One entry of the site data file.
#[derive(Debug, Clone, Deserialize)]
struct SiteProject {
    #[serde(default)]
    images: Vec<String>,
    #[serde(default)]
    thumb: Option<String>,
    #[serde(default)]
    external_link_image: Option<String>,
    #[serde(default)]
    category: Option<String>,
    /// Language code -> texts, plus any other keys we don't use
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

/// Ordered collection of all projects on the page.
#[derive(Debug, Clone, Default)]
pub struct ProjectCatalog {
    projects: Vec<Project>,
}

impl ProjectCatalog {
    pub fn new(projects: Vec<Project>) -> Self {
        Self { projects }
    }

    /// Load the site data file (`projects.json`) for one language.
    ///
    /// Entries without texts for `lang` fall back to English.
    pub fn from_site_json(json: &str, lang: &str) -> Result<Self, ProjectDataError> {
        let entries: Vec<SiteProject> = serde_json::from_str(json)?;

        let projects = entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| {
                let texts = entry
                    .other
                    .get(lang)
                    .or_else(|| entry.other.get("en"))
                    .ok_or_else(|| ProjectDataError::MissingLanguage {
                        index,
                        lang: lang.to_string(),
                    })?;
                let texts: LocalizedText = serde_json::from_value(texts.clone())?;

                Ok(Project {
                    key: ProjectKey::new(texts.name.clone()),
                    name: texts.name,
                    description: texts.description,
                    images: entry.images,
                    external_link: non_empty(entry.external_link_image),
                    category: entry.category,
                    thumb: entry.thumb,
                })
            })
            .collect::<Result<Vec<_>, ProjectDataError>>()?;

        log::info!("Loaded {} projects for '{}'", projects.len(), lang);
        Ok(Self { projects })
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Project> {
        self.projects.iter()
    }

    pub fn as_slice(&self) -> &[Project] {
        &self.projects
    }

    /// Find a project by key. With duplicate names the first one wins.
    pub fn get(&self, key: &ProjectKey) -> Option<&Project> {
        self.projects.iter().find(|p| &p.key == key)
    }

    /// Find a project by name, ignoring ASCII case.
    pub fn find_by_name(&self, name: &str) -> Option<&Project> {
        self.projects
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }
}
