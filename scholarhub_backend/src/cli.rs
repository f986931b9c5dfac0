use crate::announcements::ReadFilter;
use crate::app::App;
use crate::config::ScholarhubConfig;
use crate::events::AppEvent;
use crate::forum::{ThreadLookup, ThreadView};
use crate::messages::InboxTab;
use crate::profile::ProfileTab;
use crate::search::{SearchResults, SearchTab, SortCriterion, SuggestionIndex};
use crate::store::models::{Article, Sender, Thread};
use crate::store::RecordStore;
use crate::utils::relative_label;
use anyhow::{bail, Result};
use chrono::Utc;
use std::io::{self, Write};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Run the interactive shell over every page.
pub async fn run_cli(store: Arc<RecordStore>, config: ScholarhubConfig) -> Result<()> {
    let mut session = CliSession {
        app: App::new(store, &config),
    };

    println!("Scholarhub CLI ready. Type 'help' for a list of commands.");
    println!("Signed in as {}", session.app.session.display_name);
    println!("Loading feed...");

    let stdin = tokio::io::stdin();
    let mut lines = BufReader::new(stdin).lines();
    prompt()?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    println!("Exiting");
                    break;
                };
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    prompt()?;
                    continue;
                }

                let tokens = match shell_words::split(trimmed) {
                    Ok(tokens) if !tokens.is_empty() => tokens,
                    Ok(_) => {
                        prompt()?;
                        continue;
                    }
                    Err(err) => {
                        println!("Unable to parse command: {err}");
                        prompt()?;
                        continue;
                    }
                };

                match session.handle_command(&tokens) {
                    Ok(LoopAction::Continue) => {}
                    Ok(LoopAction::Exit) => break,
                    Err(err) => println!("Error: {err:#}"),
                }
                prompt()?;
            }
            Some(event) = session.app.next_event() => {
                session.on_event(event);
            }
        }
    }

    Ok(())
}

/// One federated search, printed once the simulated round-trip finishes.
pub async fn run_search(
    store: Arc<RecordStore>,
    config: ScholarhubConfig,
    query: &str,
    tab: &str,
) -> Result<()> {
    let tab: SearchTab = tab.parse()?;
    let mut app = App::new(store, &config);
    app.search.set_tab(tab);
    app.search.set_input(query);
    if !app.search.submit() {
        bail!("search query may not be empty");
    }
    app.settle().await;
    print_results(&app.search.results());
    Ok(())
}

pub fn run_suggest(store: Arc<RecordStore>, config: ScholarhubConfig, query: &str) -> Result<()> {
    let index = SuggestionIndex::build(&store, &config.search);
    let suggestions = index.suggest(query);
    if suggestions.is_empty() {
        println!("No suggestions.");
    }
    for suggestion in suggestions {
        println!("{suggestion}");
    }
    Ok(())
}

fn prompt() -> Result<()> {
    write_prompt(&mut io::stdout())?;
    Ok(())
}

fn write_prompt<W: Write>(out: &mut W) -> io::Result<()> {
    write!(out, "scholarhub> ")?;
    out.flush()
}

/// Redraws the prompt after an asynchronous update; failures are logged, not propagated.
fn redraw_prompt<W: Write>(out: &mut W) -> bool {
    match write_prompt(out) {
        Ok(()) => true,
        Err(err) => {
            tracing::debug!(error = %err, "failed to redraw prompt");
            false
        }
    }
}

struct CliSession {
    app: App,
}

enum LoopAction {
    Continue,
    Exit,
}

impl CliSession {
    fn handle_command(&mut self, tokens: &[String]) -> Result<LoopAction> {
        let command = tokens[0].as_str();
        let rest = &tokens[1..];
        match command {
            "help" => self.print_help(),
            "feed" => {
                if rest.is_empty() {
                    self.print_feed();
                } else {
                    self.app.feed.set_query(&rest.join(" "));
                    println!("Loading feed...");
                }
            }
            "subject" => {
                let Some(name) = joined(rest) else {
                    println!("Usage: subject <name|all>");
                    return Ok(LoopAction::Continue);
                };
                self.app.feed.set_subject(&name)?;
                println!("Loading feed...");
            }
            "more" => match rest.first().map(String::as_str) {
                Some("forum") => {
                    if self.app.forum.show_more() {
                        self.print_forum();
                    } else {
                        println!("No more threads.");
                    }
                }
                _ => {
                    if self.app.feed.on_sentinel_visible() {
                        println!("Loading more articles...");
                    } else if self.app.feed.is_loading() {
                        println!("Still loading.");
                    } else {
                        println!("No more articles.");
                    }
                }
            },
            "forum" => {
                if !rest.is_empty() {
                    self.app.forum.set_query(&rest.join(" "));
                }
                self.print_forum();
            }
            "category" => {
                let Some(name) = joined(rest) else {
                    println!("Usage: category <name|all>");
                    return Ok(LoopAction::Continue);
                };
                self.app.forum.set_category(&name)?;
                self.print_forum();
            }
            "sort" => {
                let Some(raw) = rest.first() else {
                    println!("Usage: sort <newest|popular|trending>");
                    return Ok(LoopAction::Continue);
                };
                let criterion: SortCriterion = raw.parse()?;
                self.app.forum.set_sort(criterion);
                self.print_forum();
            }
            "thread" => {
                let Some(id) = rest.first() else {
                    println!("Usage: thread <id>");
                    return Ok(LoopAction::Continue);
                };
                match self.app.forum.open_thread(id) {
                    ThreadLookup::Found(view) => print_thread(&view),
                    ThreadLookup::NotFound => {
                        println!("Thread {id} not found. Use 'forum' to go back to the list.")
                    }
                }
            }
            "reply" => {
                let Some(body) = joined(rest) else {
                    println!("Usage: reply <message>");
                    return Ok(LoopAction::Continue);
                };
                let reply = self.app.forum.reply(&body)?;
                println!("Posted reply {}", reply.id);
            }
            "announcements" => {
                self.apply_announcement_options(rest)?;
                self.print_announcements();
            }
            "toggle" => {
                let Some(id) = rest.first() else {
                    println!("Usage: toggle <announcement_id>");
                    return Ok(LoopAction::Continue);
                };
                let is_read = self.app.announcements.toggle_read(id)?;
                println!(
                    "Announcement {id} marked {}",
                    if is_read { "read" } else { "unread" }
                );
            }
            "mark-all-read" => {
                self.app.announcements.mark_all_read();
                println!("All announcements marked read.");
            }
            "inbox" => {
                let mut query = Vec::new();
                for token in rest {
                    match token.as_str() {
                        "--unread" => self.app.inbox.set_tab(InboxTab::Unread),
                        "--all" => self.app.inbox.set_tab(InboxTab::All),
                        "--archived" => self.app.inbox.set_tab(InboxTab::Archived),
                        other => query.push(other.to_string()),
                    }
                }
                self.app.inbox.set_query(&query.join(" "));
                self.print_inbox();
            }
            "open" => {
                let Some(id) = rest.first() else {
                    println!("Usage: open <conversation_id>");
                    return Ok(LoopAction::Continue);
                };
                let name = self.app.inbox.open(id)?.name.clone();
                println!("Conversation with {name}");
                self.print_transcript(id);
            }
            "send" => {
                let Some(body) = joined(rest) else {
                    println!("Usage: send <message>");
                    return Ok(LoopAction::Continue);
                };
                let message = self.app.inbox.send(&body)?;
                println!("[{}] {} ({})", message.time, message.content, message.status.label());
            }
            "search" => {
                let Some(query) = joined(rest) else {
                    self.print_search_state();
                    return Ok(LoopAction::Continue);
                };
                self.app.search.set_input(&query);
                if self.app.search.submit() {
                    println!("Searching...");
                }
            }
            "tab" => {
                let Some(raw) = rest.first() else {
                    println!("Usage: tab <all|articles|forum|users>");
                    return Ok(LoopAction::Continue);
                };
                self.app.search.set_tab(raw.parse()?);
                if self.app.search.has_searched() && !self.app.search.is_searching() {
                    print_results(&self.app.search.results());
                }
            }
            "suggest" => {
                self.app.search.set_input(&rest.join(" "));
                let suggestions = self.app.search.suggestions();
                if suggestions.is_empty() {
                    println!("No suggestions.");
                }
                for (index, suggestion) in suggestions.iter().enumerate() {
                    println!("  {}. {suggestion}", index + 1);
                }
            }
            "recent" => {
                for entry in self.app.search.recent() {
                    println!("  - {entry}");
                }
            }
            "forget" => {
                let Some(entry) = joined(rest) else {
                    println!("Usage: forget <recent search>");
                    return Ok(LoopAction::Continue);
                };
                if !self.app.search.remove_recent(&entry) {
                    println!("'{entry}' is not a recent search.");
                }
            }
            "clear-search" => {
                self.app.search.clear();
                println!("Search cleared.");
            }
            "profile" => {
                let tab = match rest.first() {
                    Some(raw) => raw.parse::<ProfileTab>()?,
                    None => ProfileTab::default(),
                };
                self.print_profile(tab);
            }
            "quit" | "exit" => return Ok(LoopAction::Exit),
            other => {
                println!("Unknown command '{other}'. Type 'help' for a list of commands.");
            }
        }
        Ok(LoopAction::Continue)
    }

    /// Applies a completion and prints whatever it changed.
    fn on_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::FeedPageLoaded { generation } => {
                self.app.feed.handle_loaded(generation);
                if self.app.feed.is_loading() {
                    return;
                }
                println!();
                self.print_feed();
            }
            AppEvent::SearchCompleted { generation } => {
                self.app.search.handle_completed(generation);
                if self.app.search.is_searching() || !self.app.search.has_searched() {
                    return;
                }
                println!();
                print_results(&self.app.search.results());
            }
            AppEvent::MessageSent {
                conversation_id,
                message_id,
            } => {
                self.app.inbox.handle_sent(&conversation_id, &message_id);
                println!();
                println!("Message {message_id} in conversation {conversation_id}: Sent");
            }
        }
        redraw_prompt(&mut io::stdout());
    }

    fn apply_announcement_options(&mut self, tokens: &[String]) -> Result<()> {
        let mut query = Vec::new();
        let mut iter = tokens.iter();
        while let Some(token) = iter.next() {
            match token.as_str() {
                "--all" => self.app.announcements.set_filter(ReadFilter::All),
                "--read" => self.app.announcements.set_filter(ReadFilter::Read),
                "--unread" => self.app.announcements.set_filter(ReadFilter::Unread),
                "--category" => {
                    let Some(name) = iter.next() else {
                        bail!("--category needs a value");
                    };
                    self.app.announcements.set_category(name)?;
                }
                other => query.push(other.to_string()),
            }
        }
        if !query.is_empty() {
            self.app.announcements.set_query(&query.join(" "));
        }
        Ok(())
    }

    fn print_help(&self) {
        println!("Available commands:");
        println!("  help                       Show this help message");
        println!("  feed [QUERY]               Show the article feed, or search it (\"\" clears)");
        println!("  subject <name|all>         Filter the feed by subject");
        println!("  more [forum]               Load the next page of the feed (or forum)");
        println!("  forum [QUERY]              List forum threads, optionally searching");
        println!("  category <name|all>        Filter forum threads by category");
        println!("  sort <newest|popular|trending>  Change forum ordering");
        println!("  thread <id>                Open a thread");
        println!("  reply MSG                  Reply to the open thread");
        println!("  announcements [--all|--read|--unread] [--category NAME] [QUERY]");
        println!("  toggle <id>                Toggle an announcement's read flag");
        println!("  mark-all-read              Mark every announcement read");
        println!("  inbox [--all|--unread|--archived] [QUERY]  List conversations");
        println!("  open <id>                  Open a conversation");
        println!("  send MSG                   Send a message to the open conversation");
        println!("  search [QUERY]             Run a federated search");
        println!("  tab <all|articles|forum|users>  Switch search results tab");
        println!("  suggest QUERY              Show completions for a partial query");
        println!("  recent                     List recent searches");
        println!("  forget ENTRY               Remove a recent search");
        println!("  clear-search               Reset the search page");
        println!("  profile [publications|saved|activity]  Show your profile");
        println!("  exit                       Quit the CLI");
    }

    fn print_feed(&self) {
        let feed = &self.app.feed;
        if let Some(featured) = feed.featured() {
            println!("Featured: {} ({})", featured.title, featured.subject);
        }
        let visible = feed.visible();
        if visible.is_empty() && !feed.is_loading() {
            println!("No articles found. Try 'feed \"\"' and 'subject all' to clear filters.");
            return;
        }
        for article in visible {
            print_article(article);
        }
        if feed.is_loading() {
            println!("Loading...");
        } else if feed.has_more() {
            println!("(more available: type 'more')");
        }
    }

    fn print_forum(&self) {
        let forum = &self.app.forum;
        let visible = forum.visible();
        if visible.is_empty() {
            println!("No threads found. Try 'forum \"\"' and 'category all' to clear filters.");
            return;
        }
        println!("Threads ({}):", forum.criterion());
        for thread in visible {
            print_thread_summary(thread);
        }
        if forum.has_more() {
            println!("(more available: type 'more forum')");
        }
    }

    fn print_announcements(&self) {
        let page = &self.app.announcements;
        println!("Announcements ({} unread):", page.unread_count());
        let views = page.visible();
        if views.is_empty() {
            println!("  No announcements match.");
        }
        let now = Utc::now();
        for view in views {
            let marker = if view.is_read { " " } else { "*" };
            let a = view.announcement;
            println!(
                "{marker} [{}] {} - {} ({}, {})",
                a.id,
                a.title,
                a.priority.label(),
                a.category,
                relative_label(a.posted_at, now)
            );
        }
    }

    fn print_inbox(&self) {
        let conversations = self.app.inbox.conversations();
        if conversations.is_empty() {
            if self.app.inbox.tab() == InboxTab::Archived {
                println!("No archived messages.");
            } else {
                println!("No conversations found.");
            }
        }
        for view in conversations {
            let summary = view.summary;
            let online = if summary.is_online { " (online)" } else { "" };
            let badge = if view.unread > 0 {
                format!(" [{}]", view.unread)
            } else {
                String::new()
            };
            println!(
                "  [{}] {}{}{} - {} ({})",
                summary.id, summary.name, online, badge, summary.last_message, summary.time
            );
        }
    }

    fn print_transcript(&self, conversation_id: &str) {
        let messages = self.app.inbox.transcript(conversation_id);
        if messages.is_empty() {
            println!("  (no messages yet)");
        }
        for message in messages {
            let who = match message.sender {
                Sender::Me => "me",
                Sender::Other => "them",
            };
            println!(
                "  [{}] {who}: {} ({})",
                message.time,
                message.content,
                message.status.label()
            );
        }
    }

    fn print_search_state(&self) {
        let search = &self.app.search;
        if search.is_searching() {
            println!("Searching...");
        } else if search.has_searched() {
            print_results(&search.results());
        } else {
            println!("Recent searches:");
            for entry in search.recent() {
                println!("  - {entry}");
            }
        }
    }

    fn print_profile(&self, tab: ProfileTab) {
        let page = &self.app.profile;
        let profile = page.profile();
        println!("{} <{}>", profile.name, profile.email);
        println!("{}, {}", profile.role, profile.department);
        println!("Member since {}", profile.join_date);
        for stat in page.stats() {
            println!("  {}: {}", stat.label, stat.value);
        }

        let now = Utc::now();
        match tab {
            ProfileTab::Publications => {
                println!("Publications:");
                for publication in page.publications() {
                    println!(
                        "  {} - {} ({}), {} citations",
                        publication.title,
                        publication.journal,
                        publication.year,
                        publication.citations
                    );
                    if !publication.co_authors.is_empty() {
                        println!("      with {}", publication.co_authors.join(", "));
                    }
                }
            }
            ProfileTab::Saved => {
                println!("Saved content:");
                if page.saved().is_empty() {
                    println!("  (nothing saved)");
                }
                for item in page.saved() {
                    println!(
                        "  [{}] {} by {}, saved {}",
                        item.kind.label(),
                        item.title,
                        item.author,
                        relative_label(item.saved_at, now)
                    );
                }
            }
            ProfileTab::Activity => {
                println!("Recent activity:");
                for entry in page.activity() {
                    println!(
                        "  {}: {} ({})",
                        entry.action,
                        entry.item,
                        relative_label(entry.at, now)
                    );
                }
            }
        }
    }
}

fn joined(tokens: &[String]) -> Option<String> {
    let joined = tokens.join(" ");
    if joined.trim().is_empty() {
        None
    } else {
        Some(joined)
    }
}

fn print_article(article: &Article) {
    let star = if article.starred { " *" } else { "" };
    println!(
        "  [{}] {}{} - {} ({}, {})",
        article.id,
        article.title,
        star,
        article.author,
        article.subject,
        relative_label(article.published_at, Utc::now())
    );
}

fn print_thread_summary(thread: &Thread) {
    let mut flags = String::new();
    if thread.is_sticky {
        flags.push_str(" [pinned]");
    }
    if thread.is_locked {
        flags.push_str(" [locked]");
    }
    println!(
        "  [{}] {}{} - {} ({} replies, {} views)",
        thread.id, thread.title, flags, thread.category, thread.replies, thread.views
    );
}

fn print_thread(view: &ThreadView) {
    let thread = &view.thread;
    println!("Thread: {}", thread.title);
    println!(
        "By {} in {}, {}",
        thread.author,
        thread.category,
        relative_label(thread.posted_at, Utc::now())
    );
    if !thread.tags.is_empty() {
        println!("Tags: {}", thread.tags.join(", "));
    }
    if thread.is_locked {
        println!("This thread is locked.");
    }
    if view.replies.is_empty() {
        println!("  (no replies yet)");
    }
    for reply in &view.replies {
        let top = if reply.is_top_answer { " [top answer]" } else { "" };
        println!();
        println!("{} - {}{}", reply.author, reply.author_title, top);
        println!("{}", reply.body);
        println!("Helpful ({})", reply.likes);
    }
}

fn print_results(results: &SearchResults<'_>) {
    if results.is_empty() {
        println!("No results found.");
        return;
    }
    if !results.articles.is_empty() {
        println!("Articles:");
        for article in &results.articles {
            print_article(article);
        }
    }
    if !results.threads.is_empty() {
        println!("Forum:");
        for thread in &results.threads {
            print_thread_summary(thread);
        }
    }
    if !results.people.is_empty() {
        println!("People:");
        for person in &results.people {
            println!("  {} - {}, {}", person.name, person.role, person.department);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(line: &str) -> Vec<String> {
        shell_words::split(line).expect("valid line")
    }

    fn session() -> CliSession {
        let store = Arc::new(RecordStore::seeded(Utc::now()));
        CliSession {
            app: App::new(store, &ScholarhubConfig::instant()),
        }
    }

    #[tokio::test]
    async fn quit_exits_and_unknown_commands_continue() {
        let mut session = session();
        assert!(matches!(
            session.handle_command(&tokens("nonsense")),
            Ok(LoopAction::Continue)
        ));
        assert!(matches!(
            session.handle_command(&tokens("quit")),
            Ok(LoopAction::Exit)
        ));
    }

    #[tokio::test]
    async fn domain_errors_surface_as_command_errors() {
        let mut session = session();
        let err = session
            .handle_command(&tokens("sort oldest"))
            .err()
            .expect("bad criterion");
        assert_eq!(err.to_string(), "unknown sort 'oldest'");

        let err = session
            .handle_command(&tokens("send hello"))
            .err()
            .expect("no open conversation");
        assert_eq!(err.to_string(), "no conversation is open");
    }

    #[tokio::test]
    async fn announcement_options_apply_to_page() {
        let mut session = session();
        session
            .handle_command(&tokens("announcements --unread --category Programs"))
            .expect("valid options");
        let ids: Vec<String> = session
            .app
            .announcements
            .visible()
            .iter()
            .map(|v| v.announcement.id.clone())
            .collect();
        assert_eq!(ids, vec!["5"]);
        assert!(session
            .handle_command(&tokens("announcements --category"))
            .is_err());
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn prompt_redraw_reports_write_failures() {
        let mut buffer = Vec::new();
        assert!(redraw_prompt(&mut buffer));
        assert_eq!(buffer, b"scholarhub> ");
        assert!(write_prompt(&mut BrokenPipe).is_err());
        assert!(!redraw_prompt(&mut BrokenPipe));
    }

    #[tokio::test]
    async fn profile_tabs_are_selectable() {
        let mut session = session();
        for line in ["profile", "profile saved", "profile activity"] {
            assert!(matches!(
                session.handle_command(&tokens(line)),
                Ok(LoopAction::Continue)
            ));
        }
        let err = session
            .handle_command(&tokens("profile settings"))
            .err()
            .expect("unknown tab");
        assert_eq!(err.to_string(), "unknown profile tab 'settings'");
    }

    #[tokio::test]
    async fn archived_inbox_lists_nothing() {
        let mut session = session();
        session
            .handle_command(&tokens("inbox --archived"))
            .expect("valid options");
        assert_eq!(session.app.inbox.tab(), InboxTab::Archived);
        assert!(session.app.inbox.conversations().is_empty());
    }

    #[tokio::test]
    async fn quoted_reply_reaches_open_thread() {
        let mut session = session();
        session.handle_command(&tokens("thread 3")).expect("thread");
        session
            .handle_command(&tokens("reply \"Works well with clickers\""))
            .expect("reply");
        let view = session.app.forum.thread_view("3").expect("thread");
        assert_eq!(view.replies[0].body, "Works well with clickers");
    }
}
