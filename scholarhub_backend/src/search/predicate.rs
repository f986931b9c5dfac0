//! Per-kind, multi-field substring matching.

use crate::store::models::{Announcement, Article, ConversationSummary, Profile, Thread};

/// A lowercase-folded, trimmed, non-empty search needle.
///
/// An empty query never reaches the predicate: [`Query::parse`] returns `None`
/// and callers keep the unfiltered collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    raw: String,
    folded: String,
}

impl Query {
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self {
            raw: trimmed.to_string(),
            folded: trimmed.to_lowercase(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn folded(&self) -> &str {
        &self.folded
    }

    fn hits(&self, field: &str) -> bool {
        field.to_lowercase().contains(&self.folded)
    }
}

/// Borrowed record tagged with its kind.
#[derive(Debug, Clone, Copy)]
pub enum RecordRef<'a> {
    Article(&'a Article),
    Thread(&'a Thread),
    Announcement(&'a Announcement),
    Profile(&'a Profile),
    Conversation(&'a ConversationSummary),
}

/// Records that expose a fixed list of searchable text fields.
pub trait Searchable {
    fn search_fields(&self) -> Vec<&str>;

    fn matches(&self, query: &Query) -> bool {
        self.search_fields().into_iter().any(|field| query.hits(field))
    }
}

impl Searchable for Article {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.title.as_str(),
            self.description.as_str(),
            self.subject.as_str(),
            self.author.as_str(),
        ]
    }
}

impl Searchable for Thread {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![
            self.title.as_str(),
            self.author.as_str(),
            self.category.as_str(),
        ];
        fields.extend(self.tags.iter().map(String::as_str));
        fields
    }
}

impl Searchable for Announcement {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.title.as_str(),
            self.content.as_str(),
            self.author.as_str(),
        ]
    }
}

impl Searchable for Profile {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.department.as_str(),
            self.role.as_str(),
        ]
    }
}

impl Searchable for ConversationSummary {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.last_message.as_str()]
    }
}

pub fn matches(record: RecordRef<'_>, query: &Query) -> bool {
    match record {
        RecordRef::Article(article) => article.matches(query),
        RecordRef::Thread(thread) => thread.matches(query),
        RecordRef::Announcement(announcement) => announcement.matches(query),
        RecordRef::Profile(profile) => profile.matches(query),
        RecordRef::Conversation(conversation) => conversation.matches(query),
    }
}

/// Keeps the records matching `query`; `None` keeps everything.
pub fn filter_records<'a, T: Searchable>(records: &'a [T], query: Option<&Query>) -> Vec<&'a T> {
    match query {
        Some(query) => records.iter().filter(|record| record.matches(query)).collect(),
        None => records.iter().collect(),
    }
}
