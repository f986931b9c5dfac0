use crate::config::SearchConfig;
use crate::store::RecordStore;

/// Extra completions that do not come from any record.
pub const ACADEMIC_TERMS: &[&str] = &[
    "research methods",
    "academic writing",
    "peer review",
    "data analysis",
    "literature review",
    "methodology",
    "thesis",
    "dissertation",
];

/// Fixed completion vocabulary, enumerated as subjects, forum categories,
/// article titles, thread titles, then the static academic terms.
#[derive(Debug, Clone)]
pub struct SuggestionIndex {
    vocabulary: Vec<String>,
    folded: Vec<String>,
    limit: usize,
    min_chars: usize,
}

impl SuggestionIndex {
    pub fn build(store: &RecordStore, config: &SearchConfig) -> Self {
        let vocabulary: Vec<String> = store
            .subjects
            .iter()
            .chain(store.forum_categories.iter())
            .cloned()
            .chain(store.articles.iter().map(|a| a.title.clone()))
            .chain(store.threads.iter().map(|t| t.title.clone()))
            .chain(ACADEMIC_TERMS.iter().map(|term| term.to_string()))
            .collect();
        let folded = vocabulary.iter().map(|entry| entry.to_lowercase()).collect();
        Self {
            vocabulary,
            folded,
            limit: config.suggestion_limit,
            min_chars: config.min_suggestion_chars,
        }
    }

    /// Completions for a partially typed query, in vocabulary order.
    pub fn suggest(&self, raw: &str) -> Vec<String> {
        let trimmed = raw.trim();
        if trimmed.chars().count() < self.min_chars {
            return Vec::new();
        }
        let needle = trimmed.to_lowercase();
        self.vocabulary
            .iter()
            .zip(&self.folded)
            .filter(|(_, folded)| folded.contains(&needle))
            .map(|(entry, _)| entry.clone())
            .take(self.limit)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vocabulary.is_empty()
    }
}
