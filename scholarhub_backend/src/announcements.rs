use serde::Serialize;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::ScholarhubError;
use crate::search::{Query, Searchable};
use crate::store::models::Announcement;
use crate::store::RecordStore;
use crate::tracking::{AnnouncementReadTracker, ReadState};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReadFilter {
    #[default]
    All,
    Read,
    Unread,
}

impl FromStr for ReadFilter {
    type Err = ScholarhubError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_lowercase().as_str() {
            "all" => Ok(ReadFilter::All),
            "read" => Ok(ReadFilter::Read),
            "unread" => Ok(ReadFilter::Unread),
            other => Err(ScholarhubError::unknown_option("read filter", other)),
        }
    }
}

/// An announcement paired with its live read flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnouncementView<'a> {
    pub announcement: &'a Announcement,
    pub is_read: bool,
}

pub struct AnnouncementsPage {
    store: Arc<RecordStore>,
    tracker: AnnouncementReadTracker,
    query: Option<Query>,
    category: Option<String>,
    filter: ReadFilter,
}

impl AnnouncementsPage {
    pub fn new(store: Arc<RecordStore>) -> Self {
        let tracker = AnnouncementReadTracker::seeded(&store.announcements);
        Self {
            store,
            tracker,
            query: None,
            category: None,
            filter: ReadFilter::default(),
        }
    }

    pub fn set_query(&mut self, raw: &str) {
        self.query = Query::parse(raw);
    }

    pub fn set_category(&mut self, name: &str) -> Result<(), ScholarhubError> {
        let trimmed = name.trim();
        self.category = if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            None
        } else {
            let canonical = self
                .store
                .announcement_categories
                .iter()
                .find(|category| category.eq_ignore_ascii_case(trimmed))
                .ok_or_else(|| ScholarhubError::unknown_option("category", trimmed))?;
            Some(canonical.clone())
        };
        Ok(())
    }

    pub fn set_filter(&mut self, filter: ReadFilter) {
        self.filter = filter;
    }

    pub fn clear_filters(&mut self) {
        self.query = None;
        self.category = None;
        self.filter = ReadFilter::All;
    }

    pub fn visible(&self) -> Vec<AnnouncementView<'_>> {
        self.store
            .announcements
            .iter()
            .filter(|a| match &self.category {
                Some(category) => &a.category == category,
                None => true,
            })
            .filter(|a| match &self.query {
                Some(query) => a.matches(query),
                None => true,
            })
            .map(|announcement| AnnouncementView {
                announcement,
                is_read: self.tracker.is_read(&announcement.id),
            })
            .filter(|view| match self.filter {
                ReadFilter::All => true,
                ReadFilter::Read => view.is_read,
                ReadFilter::Unread => !view.is_read,
            })
            .collect()
    }

    pub fn toggle_read(&mut self, id: &str) -> Result<bool, ScholarhubError> {
        self.tracker.toggle_read(id)
    }

    pub fn mark_all_read(&mut self) {
        self.tracker.mark_all_read();
        tracing::info!(
            announcements = self.store.announcements.len(),
            "marked all announcements read"
        );
    }

    pub fn unread_count(&self) -> usize {
        self.tracker.unread_count()
    }
}
