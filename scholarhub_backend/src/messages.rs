//! Direct-message inbox: conversation list, transcripts and sending.

use chrono::Utc;
use serde::Serialize;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::config::ScholarhubConfig;
use crate::error::ScholarhubError;
use crate::events::{AppEvent, EventSender};
use crate::search::{Query, Searchable};
use crate::store::models::{ConversationMessage, ConversationSummary, DeliveryStatus, Sender};
use crate::store::RecordStore;
use crate::tasks::spawn_delayed;
use crate::tracking::{DeliveryTracker, ReadState, UnreadCounter};
use crate::utils::clock_label;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InboxTab {
    #[default]
    All,
    Unread,
    /// Nothing is ever archived, so this tab stays empty.
    Archived,
}

impl FromStr for InboxTab {
    type Err = ScholarhubError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_lowercase().as_str() {
            "all" => Ok(InboxTab::All),
            "unread" => Ok(InboxTab::Unread),
            "archived" => Ok(InboxTab::Archived),
            other => Err(ScholarhubError::unknown_option("inbox tab", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversationView<'a> {
    pub summary: &'a ConversationSummary,
    pub unread: u32,
}

pub struct Inbox {
    store: Arc<RecordStore>,
    events: EventSender,
    send_delay: Duration,
    unread: UnreadCounter,
    delivery: DeliveryTracker,
    query: Option<Query>,
    tab: InboxTab,
    open: Option<String>,
    outgoing: HashMap<String, Vec<ConversationMessage>>,
}

impl Inbox {
    pub fn new(store: Arc<RecordStore>, config: &ScholarhubConfig, events: EventSender) -> Self {
        let unread = UnreadCounter::seeded(&store.conversations);
        Self {
            store,
            events,
            send_delay: config.latency.send,
            unread,
            delivery: DeliveryTracker::default(),
            query: None,
            tab: InboxTab::default(),
            open: None,
            outgoing: HashMap::new(),
        }
    }

    pub fn set_query(&mut self, raw: &str) {
        self.query = Query::parse(raw);
    }

    pub fn set_tab(&mut self, tab: InboxTab) {
        self.tab = tab;
    }

    pub fn tab(&self) -> InboxTab {
        self.tab
    }

    pub fn conversations(&self) -> Vec<ConversationView<'_>> {
        self.store
            .conversations
            .iter()
            .filter(|c| match &self.query {
                Some(query) => c.matches(query),
                None => true,
            })
            .map(|summary| ConversationView {
                summary,
                unread: self.unread.unread(&summary.id),
            })
            .filter(|view| match self.tab {
                InboxTab::All => true,
                InboxTab::Unread => view.unread > 0,
                InboxTab::Archived => false,
            })
            .collect()
    }

    /// Number of conversations with unread messages.
    pub fn unread_conversations(&self) -> usize {
        self.unread.unread_count()
    }

    pub fn open(&mut self, conversation_id: &str) -> Result<&ConversationSummary, ScholarhubError> {
        let summary = self
            .store
            .conversation(conversation_id)
            .ok_or_else(|| ScholarhubError::UnknownConversation(conversation_id.to_string()))?;
        self.unread.mark_read(conversation_id)?;
        self.open = Some(summary.id.clone());
        tracing::debug!(conversation = conversation_id, "opened conversation");
        Ok(summary)
    }

    pub fn open_conversation(&self) -> Option<&ConversationSummary> {
        self.open
            .as_deref()
            .and_then(|id| self.store.conversation(id))
    }

    /// Stored transcript followed by messages sent from here, with live status.
    pub fn transcript(&self, conversation_id: &str) -> Vec<ConversationMessage> {
        let mut messages = self.store.transcript(conversation_id).to_vec();
        for message in self.outgoing.get(conversation_id).into_iter().flatten() {
            let mut message = message.clone();
            if let Some(status) = self.delivery.status(&message.id) {
                message.status = status;
            }
            messages.push(message);
        }
        messages
    }

    /// Sends `body` to the open conversation. The message starts as `Sending`
    /// and is confirmed after the configured delay.
    pub fn send(&mut self, body: &str) -> Result<ConversationMessage, ScholarhubError> {
        let conversation_id = self.open.clone().ok_or(ScholarhubError::NoConversationOpen)?;
        let body = body.trim();
        if body.is_empty() {
            return Err(ScholarhubError::EmptyBody("message"));
        }

        let message_id = Uuid::new_v4().to_string();
        self.delivery.begin_send(&message_id);
        let message = ConversationMessage {
            id: message_id.clone(),
            sender: Sender::Me,
            content: body.to_string(),
            time: clock_label(Utc::now()),
            status: DeliveryStatus::Sending,
        };
        self.outgoing
            .entry(conversation_id.clone())
            .or_default()
            .push(message.clone());

        // Detached: nothing cancels a send once queued.
        spawn_delayed(
            self.events.clone(),
            self.send_delay,
            AppEvent::MessageSent {
                conversation_id: conversation_id.clone(),
                message_id,
            },
        );
        tracing::debug!(conversation = %conversation_id, message = %message.id, "message queued");
        Ok(message)
    }

    pub fn handle_sent(&mut self, conversation_id: &str, message_id: &str) {
        if self.delivery.confirm_sent(message_id) {
            tracing::debug!(conversation = conversation_id, message = message_id, "message sent");
        }
    }

    pub fn pending_sends(&self) -> usize {
        self.delivery.pending()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{self, EventReceiver};
    use pretty_assertions::assert_eq;

    fn inbox() -> (Inbox, EventReceiver) {
        let (tx, rx) = events::channel();
        let store = Arc::new(RecordStore::seeded(Utc::now()));
        (Inbox::new(store, &ScholarhubConfig::default(), tx), rx)
    }

    fn names(views: &[ConversationView<'_>]) -> Vec<String> {
        views.iter().map(|v| v.summary.name.clone()).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn unread_tab_and_open_clear_counts() {
        let (mut inbox, _rx) = inbox();
        inbox.set_tab(InboxTab::Unread);
        assert_eq!(
            names(&inbox.conversations()),
            vec!["Dr. Sarah Johnson", "Prof. James Norton"]
        );

        inbox.open("1").expect("known conversation");
        assert_eq!(names(&inbox.conversations()), vec!["Prof. James Norton"]);
        assert_eq!(inbox.unread_conversations(), 1);
        assert_eq!(
            inbox.open("nope").map(|c| c.id.clone()),
            Err(ScholarhubError::UnknownConversation("nope".into()))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn archived_tab_is_always_empty() {
        let (mut inbox, _rx) = inbox();
        assert_eq!("Archived".parse::<InboxTab>(), Ok(InboxTab::Archived));
        inbox.set_tab(InboxTab::Archived);
        assert!(inbox.conversations().is_empty());
        inbox.set_query("sarah");
        assert!(inbox.conversations().is_empty());
        assert_eq!(inbox.unread_conversations(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn search_covers_name_and_last_message() {
        let (mut inbox, _rx) = inbox();
        inbox.set_query("conference");
        assert_eq!(names(&inbox.conversations()), vec!["Prof. James Norton"]);
        inbox.set_query("LISA");
        assert_eq!(names(&inbox.conversations()), vec!["Lisa Martinez"]);
    }

    #[tokio::test(start_paused = true)]
    async fn sent_message_settles_after_delay() {
        let (mut inbox, mut rx) = inbox();
        inbox.open("1").expect("known conversation");
        let message = inbox.send("Thanks, that would help a lot").expect("send");
        assert_eq!(message.status, DeliveryStatus::Sending);
        assert_eq!(inbox.transcript("1").len(), 7);

        // Filter changes in the meantime do not cancel delivery.
        inbox.set_query("anything");
        inbox.set_tab(InboxTab::Unread);

        match rx.recv().await {
            Some(AppEvent::MessageSent {
                conversation_id,
                message_id,
            }) => inbox.handle_sent(&conversation_id, &message_id),
            other => panic!("unexpected event {other:?}"),
        }
        let last = inbox.transcript("1").pop().expect("message");
        assert_eq!(last.id, message.id);
        assert_eq!(last.status, DeliveryStatus::Sent);
        assert_eq!(inbox.pending_sends(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn send_requires_open_conversation_and_body() {
        let (mut inbox, _rx) = inbox();
        assert_eq!(
            inbox.send("hello").map(|m| m.id),
            Err(ScholarhubError::NoConversationOpen)
        );
        inbox.open("2").expect("known conversation");
        assert_eq!(
            inbox.send("  ").map(|m| m.id),
            Err(ScholarhubError::EmptyBody("message"))
        );
        assert!(inbox.transcript("2").is_empty());
    }
}
