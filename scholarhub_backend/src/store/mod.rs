//! Read-only record collections shared by every page.
//!
//! A store is built once at startup (either from the built-in seed or from a
//! JSON file) and handed out as `Arc<RecordStore>`. Nothing downstream mutates
//! it; per-record UI state lives in the trackers owned by each page.

pub mod models;
mod seed;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::config::ScholarhubConfig;
use models::{
    Activity, Announcement, Article, ConversationMessage, ConversationSummary, Profile,
    Publication, SavedItem, Thread, ThreadReply,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordStore {
    pub articles: Vec<Article>,
    pub threads: Vec<Thread>,
    #[serde(default)]
    pub thread_replies: HashMap<String, Vec<ThreadReply>>,
    pub conversations: Vec<ConversationSummary>,
    #[serde(default)]
    pub transcripts: HashMap<String, Vec<ConversationMessage>>,
    pub announcements: Vec<Announcement>,
    pub profile: Profile,
    #[serde(default)]
    pub publications: Vec<Publication>,
    #[serde(default)]
    pub saved: Vec<SavedItem>,
    #[serde(default)]
    pub activity: Vec<Activity>,
    #[serde(default)]
    pub subjects: Vec<String>,
    #[serde(default)]
    pub forum_categories: Vec<String>,
    #[serde(default)]
    pub announcement_categories: Vec<String>,
}

impl RecordStore {
    /// Built-in academic seed data, with dates placed relative to `now`.
    pub fn seeded(now: DateTime<Utc>) -> Self {
        seed::build(now)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read seed file {}", path.display()))?;
        let mut store: RecordStore = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse seed file {}", path.display()))?;
        store.fill_missing_vocabularies();
        tracing::info!(
            path = %path.display(),
            articles = store.articles.len(),
            threads = store.threads.len(),
            announcements = store.announcements.len(),
            "loaded record store from file"
        );
        Ok(store)
    }

    /// Loads the store the config points at, falling back to the built-in seed.
    pub fn load(config: &ScholarhubConfig, now: DateTime<Utc>) -> Result<Self> {
        match &config.seed_path {
            Some(path) => Self::from_json_file(path),
            None => Ok(Self::seeded(now)),
        }
    }

    /// Vocabularies left out of a seed file are rebuilt from the record values,
    /// in first-seen order.
    fn fill_missing_vocabularies(&mut self) {
        if self.subjects.is_empty() {
            self.subjects = distinct(self.articles.iter().map(|a| a.subject.as_str()));
        }
        if self.forum_categories.is_empty() {
            self.forum_categories = distinct(self.threads.iter().map(|t| t.category.as_str()));
        }
        if self.announcement_categories.is_empty() {
            self.announcement_categories =
                distinct(self.announcements.iter().map(|a| a.category.as_str()));
        }
    }

    pub fn thread(&self, id: &str) -> Option<&Thread> {
        self.threads.iter().find(|thread| thread.id == id)
    }

    pub fn announcement(&self, id: &str) -> Option<&Announcement> {
        self.announcements.iter().find(|a| a.id == id)
    }

    pub fn conversation(&self, id: &str) -> Option<&ConversationSummary> {
        self.conversations.iter().find(|c| c.id == id)
    }

    pub fn replies_for(&self, thread_id: &str) -> &[ThreadReply] {
        self.thread_replies
            .get(thread_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn transcript(&self, conversation_id: &str) -> &[ConversationMessage] {
        self.transcripts
            .get(conversation_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// First article flagged for the hero banner.
    pub fn featured_article(&self) -> Option<&Article> {
        self.articles.iter().find(|article| article.is_featured)
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for value in values {
        if !seen.iter().any(|existing| existing == value) {
            seen.push(value.to_string());
        }
    }
    seen
}
