//! Per-record UI state that only explicit commands mutate.

use std::collections::HashMap;

use crate::error::ScholarhubError;
use crate::store::models::{Announcement, ConversationSummary, DeliveryStatus};

/// Read/unread bookkeeping shared by announcements and conversations.
pub trait ReadState {
    fn is_read(&self, id: &str) -> bool;

    /// Marks a single record read. Unknown ids are an error.
    fn mark_read(&mut self, id: &str) -> Result<(), ScholarhubError>;

    fn mark_all_read(&mut self);

    /// Number of records that still have something unread.
    fn unread_count(&self) -> usize;
}

#[derive(Debug, Clone, Default)]
pub struct AnnouncementReadTracker {
    read: HashMap<String, bool>,
}

impl AnnouncementReadTracker {
    pub fn seeded(announcements: &[Announcement]) -> Self {
        let read = announcements
            .iter()
            .map(|a| (a.id.clone(), a.is_read))
            .collect();
        Self { read }
    }

    /// Flips the flag and returns the new value.
    pub fn toggle_read(&mut self, id: &str) -> Result<bool, ScholarhubError> {
        let flag = self
            .read
            .get_mut(id)
            .ok_or_else(|| ScholarhubError::UnknownAnnouncement(id.to_string()))?;
        *flag = !*flag;
        tracing::debug!(announcement = id, is_read = *flag, "toggled read state");
        Ok(*flag)
    }
}

impl ReadState for AnnouncementReadTracker {
    fn is_read(&self, id: &str) -> bool {
        self.read.get(id).copied().unwrap_or(false)
    }

    fn mark_read(&mut self, id: &str) -> Result<(), ScholarhubError> {
        let flag = self
            .read
            .get_mut(id)
            .ok_or_else(|| ScholarhubError::UnknownAnnouncement(id.to_string()))?;
        *flag = true;
        Ok(())
    }

    fn mark_all_read(&mut self) {
        for flag in self.read.values_mut() {
            *flag = true;
        }
    }

    fn unread_count(&self) -> usize {
        self.read.values().filter(|read| !**read).count()
    }
}

/// Unread message counts per conversation.
#[derive(Debug, Clone, Default)]
pub struct UnreadCounter {
    unread: HashMap<String, u32>,
}

impl UnreadCounter {
    pub fn seeded(conversations: &[ConversationSummary]) -> Self {
        let unread = conversations
            .iter()
            .map(|c| (c.id.clone(), c.unread))
            .collect();
        Self { unread }
    }

    pub fn unread(&self, conversation_id: &str) -> u32 {
        self.unread.get(conversation_id).copied().unwrap_or(0)
    }

    pub fn total_messages(&self) -> u32 {
        self.unread.values().sum()
    }
}

impl ReadState for UnreadCounter {
    fn is_read(&self, id: &str) -> bool {
        self.unread(id) == 0
    }

    fn mark_read(&mut self, id: &str) -> Result<(), ScholarhubError> {
        let count = self
            .unread
            .get_mut(id)
            .ok_or_else(|| ScholarhubError::UnknownConversation(id.to_string()))?;
        *count = 0;
        Ok(())
    }

    fn mark_all_read(&mut self) {
        for count in self.unread.values_mut() {
            *count = 0;
        }
    }

    fn unread_count(&self) -> usize {
        self.unread.values().filter(|count| **count > 0).count()
    }
}

/// Status of messages sent from this client.
#[derive(Debug, Clone, Default)]
pub struct DeliveryTracker {
    statuses: HashMap<String, DeliveryStatus>,
}

impl DeliveryTracker {
    pub fn begin_send(&mut self, message_id: &str) {
        self.statuses
            .insert(message_id.to_string(), DeliveryStatus::Sending);
    }

    /// Moves a message from `Sending` to `Sent`. Anything else is left alone.
    pub fn confirm_sent(&mut self, message_id: &str) -> bool {
        match self.statuses.get_mut(message_id) {
            Some(status @ DeliveryStatus::Sending) => {
                *status = DeliveryStatus::Sent;
                true
            }
            _ => false,
        }
    }

    pub fn status(&self, message_id: &str) -> Option<DeliveryStatus> {
        self.statuses.get(message_id).copied()
    }

    pub fn pending(&self) -> usize {
        self.statuses
            .values()
            .filter(|status| **status == DeliveryStatus::Sending)
            .count()
    }
}
