//! Templates registered once and handed out as independent copies.

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::core::config::GlobalSettings;
use crate::core::error::Result;
use crate::core::narrator::Narrator;

/// An object that can produce an independent copy of itself.
///
/// Copies share nothing mutable with the source: scalars are copied by value
/// and owned containers such as `Vec` are duplicated.
pub trait Prototype {
    fn clone_prototype(&self) -> Self
    where
        Self: Sized;

    /// Human-readable lines describing the object.
    fn describe(&self) -> Vec<String>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    title: String,
    content: String,
    author: String,
    created_at: DateTime<Utc>,
}

impl Document {
    pub fn new(title: &str, content: &str, author: &str) -> Self {
        Self {
            title: title.to_string(),
            content: content.to_string(),
            author: author.to_string(),
            created_at: Utc::now(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }
    pub fn content(&self) -> &str {
        &self.content
    }
    pub fn author(&self) -> &str {
        &self.author
    }
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }
    pub fn set_content(&mut self, content: &str) {
        self.content = content.to_string();
    }
    pub fn set_author(&mut self, author: &str) {
        self.author = author.to_string();
    }
}

impl Prototype for Document {
    fn clone_prototype(&self) -> Self {
        // The creation timestamp is kept, not refreshed.
        self.clone()
    }

    fn describe(&self) -> Vec<String> {
        vec![
            format!("Title: {}", self.title),
            format!("Content: {}", self.content),
            format!("Author: {}", self.author),
            format!("Created: {}", self.created_at.format("%Y-%m-%d")),
            "---".to_string(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    username: String,
    email: String,
    preferences: Vec<String>,
    last_login: DateTime<Utc>,
}

impl UserProfile {
    pub fn new(username: &str, email: &str, preferences: &[&str]) -> Self {
        Self {
            username: username.to_string(),
            email: email.to_string(),
            preferences: preferences.iter().map(|p| p.to_string()).collect(),
            last_login: Utc::now(),
        }
    }

    pub fn add_preference(&mut self, preference: &str) {
        self.preferences.push(preference.to_string());
    }

    pub fn username(&self) -> &str {
        &self.username
    }
    pub fn email(&self) -> &str {
        &self.email
    }
    pub fn preferences(&self) -> &[String] {
        &self.preferences
    }
    pub fn last_login(&self) -> DateTime<Utc> {
        self.last_login
    }
}

impl Prototype for UserProfile {
    fn clone_prototype(&self) -> Self {
        Self {
            username: self.username.clone(),
            email: self.email.clone(),
            preferences: self.preferences.to_vec(),
            last_login: self.last_login,
        }
    }

    fn describe(&self) -> Vec<String> {
        vec![
            format!("User: {}", self.username),
            format!("Email: {}", self.email),
            format!("Preferences: {}", self.preferences.join(", ")),
            format!("Last login: {}", self.last_login.format("%Y-%m-%d %H:%M:%S")),
            "---".to_string(),
        ]
    }
}

/// The kinds of template the document manager keeps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Template {
    Document(Document),
    Profile(UserProfile),
}

impl Prototype for Template {
    fn clone_prototype(&self) -> Self {
        match self {
            Template::Document(doc) => Template::Document(doc.clone_prototype()),
            Template::Profile(profile) => Template::Profile(profile.clone_prototype()),
        }
    }

    fn describe(&self) -> Vec<String> {
        match self {
            Template::Document(doc) => doc.describe(),
            Template::Profile(profile) => profile.describe(),
        }
    }
}

/// Keyed store of templates. `get_prototype` always returns a copy; the
/// stored template is never handed out.
#[derive(Debug)]
pub struct PrototypeRegistry<T: Prototype> {
    prototypes: BTreeMap<String, T>,
}

impl<T: Prototype> PrototypeRegistry<T> {
    pub fn new() -> Self {
        Self {
            prototypes: BTreeMap::new(),
        }
    }

    pub fn add_prototype(&mut self, key: &str, prototype: T) {
        debug!(key, "registering prototype");
        self.prototypes.insert(key.to_string(), prototype);
    }

    pub fn get_prototype(&self, key: &str) -> Option<T> {
        self.prototypes.get(key).map(|template| template.clone_prototype())
    }

    /// Removes a template, reporting whether one was registered.
    pub fn remove_prototype(&mut self, key: &str) -> bool {
        self.prototypes.remove(key).is_some()
    }

    pub fn list_keys(&self) -> Vec<String> {
        self.prototypes.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.prototypes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prototypes.is_empty()
    }
}

impl<T: Prototype> Default for PrototypeRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Client that creates documents and profiles from stock templates.
pub struct DocumentManager {
    registry: PrototypeRegistry<Template>,
}

impl DocumentManager {
    pub fn new() -> Self {
        let mut registry = PrototypeRegistry::new();
        registry.add_prototype(
            "blank",
            Template::Document(Document::new("New document", "", "System")),
        );
        registry.add_prototype(
            "welcome",
            Template::Document(Document::new(
                "Welcome",
                "This document was freshly created.",
                "System",
            )),
        );
        registry.add_prototype(
            "user",
            Template::Profile(UserProfile::new(
                "user",
                "user@example.com",
                &["default settings"],
            )),
        );
        Self { registry }
    }

    pub fn create_from_template(&self, key: &str) -> Option<Template> {
        let template = self.registry.get_prototype(key);
        if template.is_none() {
            warn!(key, "template not found");
        }
        template
    }

    pub fn available_templates(&self) -> Vec<String> {
        self.registry.list_keys()
    }

    pub fn create_custom_document(&self, title: &str, content: &str, author: &str) -> Document {
        Document::new(title, content, author)
    }
}

impl Default for DocumentManager {
    fn default() -> Self {
        Self::new()
    }
}

pub fn demonstrate(narrator: &mut dyn Narrator, _settings: &GlobalSettings) -> Result<()> {
    narrator.heading("🧬 Prototype");

    narrator.line("--- Direct cloning ---");
    let original = Document::new("Original", "This is the original document.", "Kim");
    narrator.lines(&original.describe());
    let mut cloned = original.clone_prototype();
    cloned.set_title("Cloned");
    cloned.set_content("This is the cloned document.");
    narrator.lines(&cloned.describe());

    narrator.line("--- Registry ---");
    let manager = DocumentManager::new();
    narrator.line(&format!(
        "Available templates: {}",
        manager.available_templates().join(", ")
    ));
    if let Some(Template::Document(mut doc)) = manager.create_from_template("blank") {
        doc.set_title("My first document");
        doc.set_content("Created from a prototype.");
        doc.set_author("me");
        narrator.lines(&doc.describe());
    }
    if let Some(welcome) = manager.create_from_template("welcome") {
        narrator.lines(&welcome.describe());
    }
    if manager.create_from_template("invoice").is_none() {
        narrator.line("Template \"invoice\" not found.");
    }

    narrator.line("--- Independent copies ---");
    let mut source = UserProfile::new("kim", "kim@example.com", &["movies"]);
    let copy = source.clone_prototype();
    source.add_preference("games");
    narrator.line(&format!("Source preferences: {:?}", source.preferences()));
    narrator.line(&format!("Copy preferences: {:?}", copy.preferences()));
    narrator.line(&format!(
        "Copies are independent: {}",
        source.preferences() != copy.preferences()
    ));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clone_preferences_are_independent() {
        let template = UserProfile::new("hong", "hong@example.com", &["reading", "travel"]);
        let mut clone = template.clone_prototype();
        clone.add_preference("music");

        assert_eq!(template.preferences(), ["reading", "travel"]);
        assert_eq!(clone.preferences(), ["reading", "travel", "music"]);

        let mut template = template;
        template.add_preference("hiking");
        assert_eq!(clone.preferences().len(), 3);
    }

    #[test]
    fn test_document_clone_copies_fields() {
        let original = Document::new("Original", "body", "Kim");
        let mut clone = original.clone_prototype();
        assert_eq!(clone, original);
        assert_eq!(clone.created_at(), original.created_at());

        clone.set_title("Changed");
        assert_eq!(original.title(), "Original");
    }

    #[test]
    fn test_registry_returns_copies_not_the_template() {
        let mut registry = PrototypeRegistry::new();
        let mut source = UserProfile::new("user", "user@example.com", &["defaults"]);
        registry.add_prototype("user", source.clone_prototype());

        // Mutating what was passed in does not reach the registered template.
        source.add_preference("late change");

        let mut first = registry.get_prototype("user").unwrap();
        first.add_preference("first only");
        let second = registry.get_prototype("user").unwrap();
        assert_eq!(second.preferences(), ["defaults"]);
    }

    #[test]
    fn test_missing_key_is_none_and_leaves_registry_alone() {
        let mut registry = PrototypeRegistry::new();
        registry.add_prototype("blank", Document::new("New", "", "System"));

        assert!(registry.get_prototype("missing-key").is_none());
        assert_eq!(registry.list_keys(), vec!["blank"]);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_remove_reports_presence() {
        let mut registry = PrototypeRegistry::new();
        registry.add_prototype("blank", Document::new("New", "", "System"));

        assert!(registry.remove_prototype("blank"));
        assert!(!registry.remove_prototype("blank"));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_document_manager_templates() {
        let manager = DocumentManager::new();
        assert_eq!(manager.available_templates(), vec!["blank", "user", "welcome"]);

        match manager.create_from_template("welcome") {
            Some(Template::Document(doc)) => assert_eq!(doc.title(), "Welcome"),
            other => panic!("expected a document, got {other:?}"),
        }
        assert!(matches!(
            manager.create_from_template("user"),
            Some(Template::Profile(_))
        ));
        assert!(manager.create_from_template("invoice").is_none());

        let custom = manager.create_custom_document("Notes", "todo", "me");
        assert_eq!(custom.author(), "me");
    }
}
