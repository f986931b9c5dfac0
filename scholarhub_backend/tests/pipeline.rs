use chrono::{Duration as ChronoDuration, Utc};
use scholarhub_backend::events::AppEvent;
use scholarhub_backend::search::SearchTab;
use scholarhub_backend::store::models::DeliveryStatus;
use scholarhub_backend::{App, RecordStore, ScholarhubConfig};
use std::sync::Arc;
use tokio::time::{timeout, Duration, Instant};

/// Seeded store padded to ten articles.
fn ten_article_store() -> Arc<RecordStore> {
    let now = Utc::now();
    let mut store = RecordStore::seeded(now);
    for (id, age_days) in [("9", 20), ("10", 25)] {
        let mut extra = store.articles[1].clone();
        extra.id = id.to_string();
        extra.title = format!("Archive article {id}");
        extra.published_at = now - ChronoDuration::days(age_days);
        extra.is_featured = false;
        store.articles.push(extra);
    }
    Arc::new(store)
}

fn visible_ids(app: &App) -> Vec<String> {
    app.feed.visible().iter().map(|a| a.id.clone()).collect()
}

#[tokio::test(start_paused = true)]
async fn feed_pages_through_ten_articles() {
    let mut app = App::new(ten_article_store(), &ScholarhubConfig::default());
    app.settle().await;
    assert_eq!(app.feed.visible().len(), 4);
    assert!(app.feed.has_more());

    assert!(app.feed.on_sentinel_visible());
    app.settle().await;
    assert_eq!(app.feed.visible().len(), 8);
    assert!(app.feed.has_more());

    assert!(app.feed.on_sentinel_visible());
    app.settle().await;
    assert_eq!(app.feed.visible().len(), 10);
    assert!(!app.feed.has_more());
    assert!(!app.feed.on_sentinel_visible());
}

#[tokio::test(start_paused = true)]
async fn page_load_takes_the_configured_latency() {
    let mut app = App::new(ten_article_store(), &ScholarhubConfig::default());
    let started = Instant::now();

    let early = timeout(Duration::from_millis(799), app.next_event()).await;
    assert!(early.is_err(), "load finished before its delay");

    let event = app.next_event().await.expect("load completion");
    assert!(started.elapsed() >= Duration::from_millis(800));
    assert!(matches!(event, AppEvent::FeedPageLoaded { .. }));
    app.handle_event(event);
    assert_eq!(app.feed.visible().len(), 4);
}

#[tokio::test(start_paused = true)]
async fn filter_change_never_shows_previous_results() {
    let mut app = App::new(ten_article_store(), &ScholarhubConfig::default());
    app.settle().await;
    app.feed.on_sentinel_visible();
    app.settle().await;
    assert_eq!(app.feed.visible().len(), 8);

    app.feed.set_query("healthcare");
    assert_eq!(app.feed.current_page(), 1);
    assert!(app.feed.visible().is_empty());
    assert!(!app.feed.has_more());

    app.settle().await;
    assert_eq!(visible_ids(&app), vec!["2", "9", "10"]);
    assert!(!app.feed.has_more());
}

#[tokio::test(start_paused = true)]
async fn superseded_load_is_dropped() {
    let mut app = App::new(ten_article_store(), &ScholarhubConfig::default());
    app.settle().await;

    app.feed.set_query("quantum");
    tokio::time::advance(Duration::from_millis(400)).await;
    app.feed.set_subject("Biology").expect("known subject");

    let started = Instant::now();
    let event = app.next_event().await.expect("completion");
    // Only the second load fires, a full delay after it started.
    assert!(started.elapsed() >= Duration::from_millis(800));
    app.handle_event(event);

    assert!(!app.feed.is_loading());
    assert!(app.feed.visible().is_empty());
    assert_eq!(app.feed.subject(), Some("Biology"));
    assert_eq!(app.feed.query(), Some("quantum"));
    assert_eq!(app.process_events(), 0);
}

#[tokio::test(start_paused = true)]
async fn sent_message_survives_filter_changes() {
    let mut app = App::new(ten_article_store(), &ScholarhubConfig::default());
    app.inbox.open("3").expect("known conversation");
    let started = Instant::now();
    let message = app.inbox.send("Here is the preprint").expect("send");
    assert_eq!(message.status, DeliveryStatus::Sending);

    app.inbox.set_query("nothing matches this");
    app.feed.set_query("ethics");
    app.search.set_input("ethics");
    app.search.submit();

    app.settle().await;

    assert!(started.elapsed() >= Duration::from_millis(1000));
    let sent = app
        .inbox
        .transcript("3")
        .into_iter()
        .find(|m| m.id == message.id)
        .expect("message kept");
    assert_eq!(sent.status, DeliveryStatus::Sent);
}

#[tokio::test(start_paused = true)]
async fn federated_search_by_tab() {
    let mut app = App::new(ten_article_store(), &ScholarhubConfig::default());
    app.search.set_input("research");
    assert!(app.search.submit());
    assert!(app.search.suggestions().is_empty());
    app.settle().await;

    let all = app.search.results();
    assert!(!all.articles.is_empty());
    assert!(!all.threads.is_empty());
    assert!(all.people.is_empty());

    app.search.set_tab(SearchTab::Articles);
    assert!(app.search.results().threads.is_empty());
    assert_eq!(app.search.recent()[0], "research");
}
