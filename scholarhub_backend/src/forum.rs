//! Discussion forum: thread list, thread view and local replies.

use chrono::Utc;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::ScholarhubConfig;
use crate::error::ScholarhubError;
use crate::profile::Session;
use crate::search::{order, Paginator, Query, Searchable, SortCriterion};
use crate::store::models::{Thread, ThreadReply};
use crate::store::RecordStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThreadView {
    pub thread: Thread,
    /// Local replies first (newest first), then the stored ones.
    pub replies: Vec<ThreadReply>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThreadLookup {
    Found(ThreadView),
    NotFound,
}

pub struct ForumPage {
    store: Arc<RecordStore>,
    session: Session,
    query: Option<Query>,
    category: Option<String>,
    criterion: SortCriterion,
    paginator: Paginator,
    local_replies: HashMap<String, Vec<ThreadReply>>,
    open: Option<String>,
}

impl ForumPage {
    pub fn new(store: Arc<RecordStore>, config: &ScholarhubConfig, session: Session) -> Self {
        Self {
            store,
            session,
            query: None,
            category: None,
            criterion: SortCriterion::default(),
            paginator: Paginator::new(config.paging.page_size),
            local_replies: HashMap::new(),
            open: None,
        }
    }

    pub fn set_query(&mut self, raw: &str) {
        self.query = Query::parse(raw);
        self.paginator.reset();
        tracing::debug!(
            query = self.query.as_ref().map(Query::as_str).unwrap_or(""),
            matches = self.matches().len(),
            "forum filter changed"
        );
    }

    pub fn set_category(&mut self, name: &str) -> Result<(), ScholarhubError> {
        let trimmed = name.trim();
        self.category = if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            None
        } else {
            let canonical = self
                .store
                .forum_categories
                .iter()
                .find(|category| category.eq_ignore_ascii_case(trimmed))
                .ok_or_else(|| ScholarhubError::unknown_option("category", trimmed))?;
            Some(canonical.clone())
        };
        self.paginator.reset();
        Ok(())
    }

    pub fn set_sort(&mut self, criterion: SortCriterion) {
        self.criterion = criterion;
        self.paginator.reset();
    }

    pub fn clear_filters(&mut self) {
        self.query = None;
        self.category = None;
        self.paginator.reset();
    }

    pub fn criterion(&self) -> SortCriterion {
        self.criterion
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Filtered and ordered threads, sticky ones first.
    pub fn matches(&self) -> Vec<&Thread> {
        let mut threads: Vec<&Thread> = self
            .store
            .threads
            .iter()
            .filter(|thread| match &self.category {
                Some(category) => &thread.category == category,
                None => true,
            })
            .filter(|thread| match &self.query {
                Some(query) => thread.matches(query),
                None => true,
            })
            .collect();
        order(&mut threads, self.criterion);
        threads
    }

    pub fn visible(&self) -> Vec<&Thread> {
        let matches = self.matches();
        self.paginator.visible_slice(&matches).to_vec()
    }

    pub fn has_more(&self) -> bool {
        self.paginator.has_more(self.matches().len())
    }

    pub fn show_more(&mut self) -> bool {
        if !self.has_more() {
            return false;
        }
        self.paginator.advance();
        true
    }

    /// Opens a thread for reading and replying.
    pub fn open_thread(&mut self, id: &str) -> ThreadLookup {
        match self.thread_view(id) {
            Some(view) => {
                self.open = Some(view.thread.id.clone());
                ThreadLookup::Found(view)
            }
            None => {
                tracing::debug!(thread = id, "thread not found");
                self.open = None;
                ThreadLookup::NotFound
            }
        }
    }

    pub fn open_thread_id(&self) -> Option<&str> {
        self.open.as_deref()
    }

    pub fn thread_view(&self, id: &str) -> Option<ThreadView> {
        let thread = self.store.thread(id)?;
        let replies = self
            .local_replies
            .get(id)
            .into_iter()
            .flatten()
            .chain(self.store.replies_for(id))
            .cloned()
            .collect();
        Some(ThreadView {
            thread: thread.clone(),
            replies,
        })
    }

    /// Posts a reply to the open thread as the session user.
    pub fn reply(&mut self, body: &str) -> Result<ThreadReply, ScholarhubError> {
        let thread_id = self.open.clone().ok_or(ScholarhubError::NoThreadOpen)?;
        let body = body.trim();
        if body.is_empty() {
            return Err(ScholarhubError::EmptyBody("reply"));
        }
        let thread = self
            .store
            .thread(&thread_id)
            .ok_or(ScholarhubError::NoThreadOpen)?;
        if thread.is_locked {
            return Err(ScholarhubError::ThreadLocked(thread_id));
        }

        let reply = ThreadReply {
            id: format!("user-reply-{}", Uuid::new_v4()),
            body: body.to_string(),
            author: self.session.display_name.clone(),
            author_avatar: self.session.avatar.clone(),
            author_title: self.session.title.clone(),
            posted_at: Utc::now(),
            likes: 0,
            is_top_answer: false,
        };
        self.local_replies
            .entry(thread_id.clone())
            .or_default()
            .insert(0, reply.clone());
        tracing::info!(thread = %thread_id, reply = %reply.id, "posted reply");
        Ok(reply)
    }
}
