use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub author: String,
    pub author_avatar: String,
    pub published_at: DateTime<Utc>,
    pub read_time: String,
    pub subject: String,
    pub starred: bool,
    #[serde(default)]
    pub is_featured: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastReply {
    pub author: String,
    pub replied_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thread {
    pub id: String,
    pub title: String,
    pub author: String,
    pub author_avatar: String,
    pub posted_at: DateTime<Utc>,
    pub replies: u32,
    pub views: u32,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_sticky: bool,
    #[serde(default)]
    pub is_locked: bool,
    #[serde(default)]
    pub last_reply: Option<LastReply>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadReply {
    pub id: String,
    pub body: String,
    pub author: String,
    pub author_avatar: String,
    pub author_title: String,
    pub posted_at: DateTime<Utc>,
    pub likes: u32,
    #[serde(default)]
    pub is_top_answer: bool,
}

/// One row of the inbox sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub avatar: String,
    pub is_online: bool,
    pub last_message: String,
    /// Display label such as "about 3 hours"
    pub time: String,
    pub unread: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    Me,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    Sending,
    Sent,
    Delivered,
    Read,
}

impl DeliveryStatus {
    pub fn label(self) -> &'static str {
        match self {
            DeliveryStatus::Sending => "Sending...",
            DeliveryStatus::Sent => "Sent",
            DeliveryStatus::Delivered => "Delivered",
            DeliveryStatus::Read => "Read",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub id: String,
    pub sender: Sender,
    pub content: String,
    pub time: String,
    pub status: DeliveryStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "Low Priority",
            Priority::Medium => "Medium Priority",
            Priority::High => "High Priority",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    pub id: String,
    pub title: String,
    pub content: String,
    pub posted_at: DateTime<Utc>,
    pub author: String,
    pub author_avatar: String,
    pub priority: Priority,
    pub category: String,
    /// Initial value only; live state is kept by the announcements tracker.
    pub is_read: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub avatar: String,
    pub department: String,
    pub join_date: String,
    pub publications: u32,
    pub followers: u32,
    pub following: u32,
}

/// Paper listed on the profile's publications tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publication {
    pub id: String,
    pub title: String,
    pub journal: String,
    pub year: u16,
    pub citations: u32,
    #[serde(default)]
    pub co_authors: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SavedKind {
    Article,
    Forum,
}

impl SavedKind {
    pub fn label(self) -> &'static str {
        match self {
            SavedKind::Article => "Article",
            SavedKind::Forum => "Forum Thread",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedItem {
    pub id: String,
    pub title: String,
    pub kind: SavedKind,
    pub author: String,
    pub saved_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    pub action: String,
    pub item: String,
    pub at: DateTime<Utc>,
}
