//! Home feed: article search, subject filter and infinite scroll.

use std::sync::Arc;
use std::time::Duration;

use crate::config::ScholarhubConfig;
use crate::error::ScholarhubError;
use crate::events::{AppEvent, EventSender};
use crate::search::{Paginator, Query, Searchable};
use crate::store::models::Article;
use crate::store::RecordStore;
use crate::tasks::TaskSlot;

pub struct FeedPage {
    store: Arc<RecordStore>,
    events: EventSender,
    load_delay: Duration,
    query: Option<Query>,
    subject: Option<String>,
    paginator: Paginator,
    loader: TaskSlot,
    /// Items the last completed load made visible.
    settled_end: usize,
}

impl FeedPage {
    /// Creates the page and kicks off the first load.
    pub fn new(store: Arc<RecordStore>, config: &ScholarhubConfig, events: EventSender) -> Self {
        let mut page = Self {
            store,
            events,
            load_delay: config.latency.page_load,
            query: None,
            subject: None,
            paginator: Paginator::new(config.paging.page_size),
            loader: TaskSlot::new(),
            settled_end: 0,
        };
        page.start_load();
        page
    }

    pub fn set_query(&mut self, raw: &str) {
        self.query = Query::parse(raw);
        self.restart();
    }

    /// `all` (or an empty name) clears the filter. Subject names match case-insensitively.
    pub fn set_subject(&mut self, name: &str) -> Result<(), ScholarhubError> {
        let trimmed = name.trim();
        self.subject = if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            None
        } else {
            let canonical = self
                .store
                .subjects
                .iter()
                .find(|subject| subject.eq_ignore_ascii_case(trimmed))
                .ok_or_else(|| ScholarhubError::unknown_option("subject", trimmed))?;
            Some(canonical.clone())
        };
        self.restart();
        Ok(())
    }

    pub fn clear_filters(&mut self) {
        self.query = None;
        self.subject = None;
        self.restart();
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_ref().map(Query::as_str)
    }

    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    /// Full filtered sequence, before pagination.
    pub fn matches(&self) -> Vec<&Article> {
        self.store
            .articles
            .iter()
            .filter(|article| match &self.subject {
                Some(subject) => &article.subject == subject,
                None => true,
            })
            .filter(|article| match &self.query {
                Some(query) => article.matches(query),
                None => true,
            })
            .collect()
    }

    pub fn visible(&self) -> Vec<&Article> {
        let matches = self.matches();
        let end = self.settled_end.min(matches.len());
        matches[..end].to_vec()
    }

    pub fn has_more(&self) -> bool {
        self.paginator.has_more(self.matches().len())
    }

    pub fn is_loading(&self) -> bool {
        self.loader.is_pending()
    }

    pub fn current_page(&self) -> usize {
        self.paginator.current_page()
    }

    /// Hero article, shown only on the unfiltered first page.
    pub fn featured(&self) -> Option<&Article> {
        if self.paginator.current_page() == 1 && self.subject.is_none() && self.query.is_none() {
            self.store.featured_article()
        } else {
            None
        }
    }

    /// Scroll sentinel came into view. Returns whether a new page was requested.
    pub fn on_sentinel_visible(&mut self) -> bool {
        if !self.has_more() || self.is_loading() {
            return false;
        }
        self.paginator.advance();
        self.start_load();
        true
    }

    pub fn handle_loaded(&mut self, generation: u64) {
        if !self.loader.settle(generation) {
            tracing::debug!(generation, "dropping superseded feed load");
            return;
        }
        self.settled_end = self.paginator.window_end();
        tracing::debug!(
            page = self.paginator.current_page(),
            visible = self.visible().len(),
            has_more = self.has_more(),
            "feed page loaded"
        );
    }

    fn restart(&mut self) {
        self.paginator.reset();
        self.settled_end = 0;
        tracing::debug!(
            query = self.query().unwrap_or(""),
            subject = self.subject().unwrap_or("all"),
            matches = self.matches().len(),
            "feed filter changed"
        );
        self.start_load();
    }

    fn start_load(&mut self) {
        self.loader.restart(&self.events, self.load_delay, |generation| {
            AppEvent::FeedPageLoaded { generation }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{self, EventReceiver};
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn page() -> (FeedPage, EventReceiver) {
        let (tx, rx) = events::channel();
        let store = Arc::new(RecordStore::seeded(Utc::now()));
        (FeedPage::new(store, &ScholarhubConfig::default(), tx), rx)
    }

    async fn settle(page: &mut FeedPage, rx: &mut EventReceiver) {
        while page.is_loading() {
            match rx.recv().await {
                Some(AppEvent::FeedPageLoaded { generation }) => page.handle_loaded(generation),
                Some(other) => panic!("unexpected event {other:?}"),
                None => panic!("event channel closed"),
            }
        }
    }

    fn ids(articles: &[&Article]) -> Vec<String> {
        articles.iter().map(|a| a.id.clone()).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn first_page_shows_after_load() {
        let (mut page, mut rx) = page();
        assert!(page.is_loading());
        assert!(page.visible().is_empty());

        settle(&mut page, &mut rx).await;

        assert_eq!(ids(&page.visible()), vec!["1", "2", "3", "4"]);
        assert!(page.has_more());
        assert_eq!(page.featured().map(|a| a.id.as_str()), Some("1"));
    }

    #[tokio::test(start_paused = true)]
    async fn sentinel_is_ignored_while_loading() {
        let (mut page, mut rx) = page();
        assert!(!page.on_sentinel_visible());
        settle(&mut page, &mut rx).await;

        assert!(page.on_sentinel_visible());
        assert!(!page.on_sentinel_visible());
        settle(&mut page, &mut rx).await;

        assert_eq!(page.visible().len(), 8);
        assert!(!page.has_more());
        assert!(!page.on_sentinel_visible());
        assert!(page.featured().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn subject_filter_resets_to_first_page() {
        let (mut page, mut rx) = page();
        settle(&mut page, &mut rx).await;
        page.on_sentinel_visible();
        settle(&mut page, &mut rx).await;
        assert_eq!(page.current_page(), 2);

        page.set_subject("biology").expect("known subject");
        assert_eq!(page.current_page(), 1);
        assert!(page.visible().is_empty());
        assert!(!page.has_more());
        settle(&mut page, &mut rx).await;

        assert_eq!(ids(&page.visible()), vec!["8"]);
        assert_eq!(page.subject(), Some("Biology"));
        assert!(page.featured().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn query_matches_biology_subject_case_insensitively() {
        let (mut page, mut rx) = page();
        page.set_query("BIO");
        settle(&mut page, &mut rx).await;
        let subjects: Vec<&str> = page.visible().iter().map(|a| a.subject.as_str()).collect();
        assert_eq!(subjects, vec!["Biology"]);
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_subject_is_rejected_and_state_kept() {
        let (mut page, _rx) = page();
        let err = page.set_subject("alchemy").expect_err("unknown subject");
        assert_eq!(err, ScholarhubError::unknown_option("subject", "alchemy"));
        assert_eq!(page.subject(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn no_matches_is_an_empty_page() {
        let (mut page, mut rx) = page();
        page.set_query("zzzz-no-such-article");
        settle(&mut page, &mut rx).await;
        assert!(page.visible().is_empty());
        assert!(!page.has_more());

        page.clear_filters();
        settle(&mut page, &mut rx).await;
        assert_eq!(page.visible().len(), 4);
    }
}
