//! Shared filtering, ordering and pagination used by every page, plus the
//! federated search session.

pub mod ordering;
pub mod paginate;
pub mod predicate;
pub mod session;
pub mod suggest;

pub use ordering::{order, Rankable, SortCriterion};
pub use paginate::Paginator;
pub use predicate::{filter_records, matches, Query, RecordRef, Searchable};
pub use session::{SearchResults, SearchSession, SearchTab};
pub use suggest::SuggestionIndex;
