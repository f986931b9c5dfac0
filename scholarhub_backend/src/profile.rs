use serde::Serialize;
use std::cmp::Reverse;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::ScholarhubError;
use crate::store::models::{Activity, Profile, Publication, SavedItem};
use crate::store::RecordStore;

/// The signed-in user, passed to every page that needs an author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub display_name: String,
    pub avatar: String,
    pub title: String,
}

impl Session {
    pub fn for_profile(profile: &Profile) -> Self {
        Self {
            user_id: profile.id.clone(),
            display_name: profile.name.clone(),
            avatar: profile.avatar.clone(),
            title: profile.role.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileStat {
    pub label: &'static str,
    pub value: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProfileTab {
    #[default]
    Publications,
    Saved,
    Activity,
}

impl FromStr for ProfileTab {
    type Err = ScholarhubError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_lowercase().as_str() {
            "publications" => Ok(ProfileTab::Publications),
            "saved" => Ok(ProfileTab::Saved),
            "activity" => Ok(ProfileTab::Activity),
            other => Err(ScholarhubError::unknown_option("profile tab", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProfilePage {
    store: Arc<RecordStore>,
}

impl ProfilePage {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }

    pub fn profile(&self) -> &Profile {
        &self.store.profile
    }

    pub fn stats(&self) -> Vec<ProfileStat> {
        let profile = self.profile();
        vec![
            ProfileStat {
                label: "Publications",
                value: profile.publications,
            },
            ProfileStat {
                label: "Followers",
                value: profile.followers,
            },
            ProfileStat {
                label: "Following",
                value: profile.following,
            },
        ]
    }

    pub fn publications(&self) -> &[Publication] {
        &self.store.publications
    }

    pub fn saved(&self) -> &[SavedItem] {
        &self.store.saved
    }

    /// Activity history, most recent first.
    pub fn activity(&self) -> Vec<&Activity> {
        let mut entries: Vec<&Activity> = self.store.activity.iter().collect();
        entries.sort_by_key(|entry| Reverse(entry.at));
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn session_mirrors_profile_identity() {
        let store = RecordStore::seeded(Utc::now());
        let session = Session::for_profile(&store.profile);
        assert_eq!(session.display_name, "Dr. Jane Smith");
        assert_eq!(session.title, "Associate Professor");
    }

    #[test]
    fn stats_come_from_profile_counts() {
        let page = ProfilePage::new(Arc::new(RecordStore::seeded(Utc::now())));
        let stats = page.stats();
        assert_eq!(stats[0].label, "Publications");
        assert_eq!(stats[0].value, 37);
        assert_eq!(stats.len(), 3);
    }

    #[test]
    fn publications_keep_journal_and_co_authors() {
        let page = ProfilePage::new(Arc::new(RecordStore::seeded(Utc::now())));
        let publications = page.publications();
        assert_eq!(publications.len(), 3);
        assert_eq!(publications[0].journal, "Journal of Computational Environmental Science");
        assert_eq!(publications[0].year, 2024);
        assert_eq!(publications[2].citations, 210);
        assert_eq!(publications[1].co_authors, vec!["Dr. Emily Wilson", "Prof. James Harris"]);
    }

    #[test]
    fn saved_content_mixes_articles_and_threads() {
        let page = ProfilePage::new(Arc::new(RecordStore::seeded(Utc::now())));
        let kinds: Vec<&str> = page.saved().iter().map(|item| item.kind.label()).collect();
        assert_eq!(kinds, vec!["Article", "Forum Thread", "Article"]);
    }

    #[test]
    fn activity_is_listed_newest_first() {
        let mut store = RecordStore::seeded(Utc::now());
        store.activity.reverse();
        let page = ProfilePage::new(Arc::new(store));
        let activity = page.activity();
        assert_eq!(activity[0].action, "Commented on forum thread");
        assert!(activity.windows(2).all(|pair| pair[0].at >= pair[1].at));
    }

    #[test]
    fn tabs_parse_from_cli_words() {
        assert_eq!("Saved".parse::<ProfileTab>(), Ok(ProfileTab::Saved));
        assert_eq!("activity".parse::<ProfileTab>(), Ok(ProfileTab::Activity));
        assert!("settings".parse::<ProfileTab>().is_err());
    }
}
