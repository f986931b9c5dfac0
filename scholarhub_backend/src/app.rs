use std::sync::Arc;

use crate::announcements::AnnouncementsPage;
use crate::config::ScholarhubConfig;
use crate::events::{self, AppEvent, EventReceiver};
use crate::feed::FeedPage;
use crate::forum::ForumPage;
use crate::messages::Inbox;
use crate::profile::{ProfilePage, Session};
use crate::search::SearchSession;
use crate::store::RecordStore;

/// Owns every page and is the only place page state changes.
///
/// Must be created inside a tokio runtime: the feed starts its first load
/// immediately.
pub struct App {
    pub store: Arc<RecordStore>,
    pub session: Session,
    pub feed: FeedPage,
    pub forum: ForumPage,
    pub announcements: AnnouncementsPage,
    pub inbox: Inbox,
    pub search: SearchSession,
    pub profile: ProfilePage,
    events: EventReceiver,
}

impl App {
    pub fn new(store: Arc<RecordStore>, config: &ScholarhubConfig) -> Self {
        let (tx, rx) = events::channel();
        let session = Session::for_profile(&store.profile);
        tracing::info!(user = %session.display_name, "starting session");
        Self {
            feed: FeedPage::new(store.clone(), config, tx.clone()),
            forum: ForumPage::new(store.clone(), config, session.clone()),
            announcements: AnnouncementsPage::new(store.clone()),
            inbox: Inbox::new(store.clone(), config, tx.clone()),
            search: SearchSession::new(store.clone(), config, tx),
            profile: ProfilePage::new(store.clone()),
            session,
            store,
            events: rx,
        }
    }

    pub async fn next_event(&mut self) -> Option<AppEvent> {
        self.events.recv().await
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::FeedPageLoaded { generation } => self.feed.handle_loaded(generation),
            AppEvent::SearchCompleted { generation } => self.search.handle_completed(generation),
            AppEvent::MessageSent {
                conversation_id,
                message_id,
            } => self.inbox.handle_sent(&conversation_id, &message_id),
        }
    }

    /// Applies every event already queued. Returns how many were applied.
    pub fn process_events(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events.try_recv() {
            self.handle_event(event);
            applied += 1;
        }
        applied
    }

    pub fn is_busy(&self) -> bool {
        self.feed.is_loading() || self.search.is_searching() || self.inbox.pending_sends() > 0
    }

    /// Waits until no load, search or send is outstanding.
    pub async fn settle(&mut self) {
        while self.is_busy() {
            match self.next_event().await {
                Some(event) => self.handle_event(event),
                None => break,
            }
        }
    }
}
