//! Federated search across articles, forum threads and people.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use super::predicate::{filter_records, Query, Searchable};
use super::suggest::SuggestionIndex;
use crate::config::ScholarhubConfig;
use crate::error::ScholarhubError;
use crate::events::{AppEvent, EventSender};
use crate::store::models::{Article, Profile, Thread};
use crate::store::RecordStore;
use crate::tasks::TaskSlot;

const SEEDED_RECENT: [&str; 4] = [
    "quantum computing",
    "climate change",
    "neuroscience",
    "research ethics",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchTab {
    #[default]
    All,
    Articles,
    Forum,
    Users,
}

impl SearchTab {
    pub fn label(self) -> &'static str {
        match self {
            SearchTab::All => "All",
            SearchTab::Articles => "Articles",
            SearchTab::Forum => "Forum",
            SearchTab::Users => "Users",
        }
    }

    fn shows_articles(self) -> bool {
        matches!(self, SearchTab::All | SearchTab::Articles)
    }

    fn shows_threads(self) -> bool {
        matches!(self, SearchTab::All | SearchTab::Forum)
    }

    fn shows_people(self) -> bool {
        matches!(self, SearchTab::All | SearchTab::Users)
    }
}

impl fmt::Display for SearchTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SearchTab {
    type Err = ScholarhubError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_lowercase().as_str() {
            "all" => Ok(SearchTab::All),
            "articles" | "article" => Ok(SearchTab::Articles),
            "forum" | "threads" => Ok(SearchTab::Forum),
            "users" | "people" => Ok(SearchTab::Users),
            other => Err(ScholarhubError::unknown_option("tab", other)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchResults<'a> {
    pub articles: Vec<&'a Article>,
    pub threads: Vec<&'a Thread>,
    pub people: Vec<&'a Profile>,
}

impl SearchResults<'_> {
    pub fn total(&self) -> usize {
        self.articles.len() + self.threads.len() + self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

pub struct SearchSession {
    store: Arc<RecordStore>,
    events: EventSender,
    index: SuggestionIndex,
    search_delay: Duration,
    recent_limit: usize,
    input: String,
    tab: SearchTab,
    searcher: TaskSlot,
    /// Query captured at submit time, waiting for its search to finish.
    pending: Option<Query>,
    /// Query whose results are on screen.
    settled: Option<Query>,
    performed: bool,
    recent: Vec<String>,
}

impl SearchSession {
    pub fn new(store: Arc<RecordStore>, config: &ScholarhubConfig, events: EventSender) -> Self {
        let index = SuggestionIndex::build(&store, &config.search);
        let mut recent: Vec<String> = SEEDED_RECENT.iter().map(|s| s.to_string()).collect();
        recent.truncate(config.search.recent_limit);
        Self {
            store,
            events,
            index,
            search_delay: config.latency.search,
            recent_limit: config.search.recent_limit,
            input: String::new(),
            tab: SearchTab::default(),
            searcher: TaskSlot::new(),
            pending: None,
            settled: None,
            performed: false,
            recent,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, raw: &str) {
        self.input = raw.to_string();
    }

    pub fn tab(&self) -> SearchTab {
        self.tab
    }

    pub fn set_tab(&mut self, tab: SearchTab) {
        self.tab = tab;
    }

    /// Completions for the current input. Hidden once a search was performed.
    pub fn suggestions(&self) -> Vec<String> {
        if self.performed {
            return Vec::new();
        }
        self.index.suggest(&self.input)
    }

    /// Starts a search for the current input, superseding any in-flight one.
    /// A blank input does nothing and returns `false`.
    pub fn submit(&mut self) -> bool {
        let Some(query) = Query::parse(&self.input) else {
            return false;
        };
        tracing::debug!(query = query.as_str(), tab = %self.tab, "search submitted");
        self.pending = Some(query);
        self.performed = true;
        self.searcher
            .restart(&self.events, self.search_delay, |generation| {
                AppEvent::SearchCompleted { generation }
            });
        true
    }

    pub fn choose_suggestion(&mut self, suggestion: &str) -> bool {
        self.set_input(suggestion);
        self.submit()
    }

    pub fn handle_completed(&mut self, generation: u64) {
        if !self.searcher.settle(generation) {
            tracing::debug!(generation, "dropping superseded search");
            return;
        }
        let Some(query) = self.pending.take() else {
            return;
        };
        self.remember(query.as_str());
        tracing::info!(
            query = query.as_str(),
            results = self.results_for(&query).total(),
            "search completed"
        );
        self.settled = Some(query);
    }

    pub fn is_searching(&self) -> bool {
        self.searcher.is_pending()
    }

    pub fn has_searched(&self) -> bool {
        self.performed
    }

    /// Results for the last completed search, restricted to the active tab.
    /// Empty while a search is running or before any search.
    pub fn results(&self) -> SearchResults<'_> {
        match (&self.settled, self.is_searching()) {
            (Some(query), false) => self.results_for(query),
            _ => SearchResults::default(),
        }
    }

    pub fn recent(&self) -> &[String] {
        &self.recent
    }

    pub fn remove_recent(&mut self, entry: &str) -> bool {
        let before = self.recent.len();
        self.recent.retain(|existing| existing != entry);
        self.recent.len() != before
    }

    /// Back to the idle state; an in-flight search is abandoned.
    pub fn clear(&mut self) {
        self.searcher.cancel();
        self.input.clear();
        self.pending = None;
        self.settled = None;
        self.performed = false;
    }

    fn results_for(&self, query: &Query) -> SearchResults<'_> {
        let store = &*self.store;
        SearchResults {
            articles: if self.tab.shows_articles() {
                filter_records(&store.articles, Some(query))
            } else {
                Vec::new()
            },
            threads: if self.tab.shows_threads() {
                filter_records(&store.threads, Some(query))
            } else {
                Vec::new()
            },
            people: if self.tab.shows_people() && store.profile.matches(query) {
                vec![&store.profile]
            } else {
                Vec::new()
            },
        }
    }

    fn remember(&mut self, entry: &str) {
        self.recent.retain(|existing| existing != entry);
        self.recent.insert(0, entry.to_string());
        self.recent.truncate(self.recent_limit);
    }
}
