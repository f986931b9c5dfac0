use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;

use super::models::{
    Activity, Announcement, Article, ConversationMessage, ConversationSummary, DeliveryStatus,
    LastReply, Priority, Profile, Publication, SavedItem, SavedKind, Sender, Thread, ThreadReply,
};
use super::RecordStore;
use crate::utils::distance_label;

const PEXELS: &str = "https://images.pexels.com/photos";
const PORTRAITS: &str = "https://randomuser.me/api/portraits";

pub(super) fn build(now: DateTime<Utc>) -> RecordStore {
    let mut thread_replies = HashMap::new();
    thread_replies.insert("1".to_string(), replies(now));
    let mut transcripts = HashMap::new();
    transcripts.insert("1".to_string(), transcript());

    RecordStore {
        articles: articles(now),
        threads: threads(now),
        thread_replies,
        conversations: conversations(now),
        transcripts,
        announcements: announcements(now),
        profile: profile(),
        publications: publications(),
        saved: saved(now),
        activity: activity(now),
        subjects: labels(&[
            "Computer Science",
            "Healthcare",
            "Environmental Science",
            "Neuroscience",
            "Energy Science",
            "Linguistics",
            "Economics",
            "Biology",
            "Physics",
            "Mathematics",
            "Psychology",
            "Sociology",
            "Literature",
            "History",
            "Engineering",
        ]),
        forum_categories: labels(&[
            "Education",
            "Research Methods",
            "Teaching",
            "Publishing",
            "Research Ethics",
            "Announcements",
            "General Discussion",
            "Career Development",
            "Technology",
            "Networking",
        ]),
        announcement_categories: labels(&[
            "Administrative",
            "Events",
            "Resources",
            "Technical",
            "Programs",
            "Academic",
            "Deadlines",
            "Policies",
            "Awards",
            "Opportunities",
        ]),
    }
}

fn labels(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn days_ago(now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    now - Duration::days(days)
}

fn photo(id: &str) -> String {
    format!("{PEXELS}/{id}/pexels-photo-{id}.jpeg?auto=compress&cs=tinysrgb&dpr=2&h=750&w=1260")
}

fn portrait(kind: &str, n: u32) -> String {
    format!("{PORTRAITS}/{kind}/{n}.jpg")
}

#[allow(clippy::too_many_arguments)]
fn article(
    now: DateTime<Utc>,
    id: &str,
    title: &str,
    description: &str,
    photo_id: &str,
    author: &str,
    avatar: String,
    age_days: i64,
    read_time: &str,
    subject: &str,
    starred: bool,
) -> Article {
    Article {
        id: id.into(),
        title: title.into(),
        description: description.into(),
        image_url: photo(photo_id),
        author: author.into(),
        author_avatar: avatar,
        published_at: days_ago(now, age_days),
        read_time: read_time.into(),
        subject: subject.into(),
        starred,
        is_featured: false,
    }
}

fn articles(now: DateTime<Utc>) -> Vec<Article> {
    let mut featured = article(
        now,
        "1",
        "Advances in Quantum Computing: Breaking the Computational Barrier",
        "This article explores recent breakthroughs in quantum computing and how they might reshape our computational capabilities.",
        "373543",
        "Dr. Emma Richards",
        portrait("women", 21),
        2,
        "8 min read",
        "Computer Science",
        false,
    );
    featured.is_featured = true;

    vec![
        featured,
        article(
            now,
            "2",
            "The Ethics of Artificial Intelligence in Healthcare",
            "A comprehensive analysis of ethical considerations when implementing AI systems in healthcare environments.",
            "6476787",
            "Prof. James Norton",
            portrait("men", 32),
            3,
            "12 min read",
            "Healthcare",
            true,
        ),
        article(
            now,
            "3",
            "Climate Change: New Models Predict Accelerated Warming",
            "Recent climate models indicate faster warming than previously predicted, with implications for global policy.",
            "2559941",
            "Dr. Sarah Johnson",
            portrait("women", 44),
            5,
            "10 min read",
            "Environmental Science",
            false,
        ),
        article(
            now,
            "4",
            "Neuroscience of Learning: Why Spaced Repetition Works",
            "Exploring the neurological basis for the effectiveness of spaced repetition in learning and memory formation.",
            "3825586",
            "Prof. Michael Chen",
            portrait("men", 52),
            7,
            "9 min read",
            "Neuroscience",
            true,
        ),
        article(
            now,
            "5",
            "The Future of Renewable Energy: Beyond Solar and Wind",
            "Exploring emerging renewable energy technologies that could supplement or replace current solar and wind solutions.",
            "2800832",
            "Dr. Lisa Martinez",
            portrait("women", 67),
            9,
            "11 min read",
            "Energy Science",
            false,
        ),
        article(
            now,
            "6",
            "Modern Approaches to Language Acquisition in Children",
            "New research on how children acquire language and implications for education and development.",
            "8363033",
            "Prof. David Wilson",
            portrait("men", 41),
            12,
            "14 min read",
            "Linguistics",
            true,
        ),
        article(
            now,
            "7",
            "Economic Implications of Blockchain Technology",
            "Analysis of how blockchain technology could transform economic systems and financial institutions.",
            "8370752",
            "Dr. Rebecca Lee",
            portrait("women", 33),
            14,
            "13 min read",
            "Economics",
            false,
        ),
        article(
            now,
            "8",
            "Biodiversity Loss: Causes, Consequences, and Solutions",
            "Comprehensive review of the ongoing biodiversity crisis and potential mitigation strategies.",
            "2570524",
            "Prof. Thomas Garcia",
            portrait("men", 78),
            18,
            "15 min read",
            "Biology",
            true,
        ),
    ]
}

struct ThreadSeed<'a> {
    id: &'a str,
    title: &'a str,
    author: &'a str,
    avatar: String,
    age_days: i64,
    replies: u32,
    views: u32,
    category: &'a str,
    tags: &'a [&'a str],
    last_reply: (&'a str, i64),
}

impl ThreadSeed<'_> {
    fn into_thread(self, now: DateTime<Utc>) -> Thread {
        Thread {
            id: self.id.into(),
            title: self.title.into(),
            author: self.author.into(),
            author_avatar: self.avatar,
            posted_at: days_ago(now, self.age_days),
            replies: self.replies,
            views: self.views,
            category: self.category.into(),
            tags: labels(self.tags),
            is_sticky: false,
            is_locked: false,
            last_reply: Some(LastReply {
                author: self.last_reply.0.into(),
                replied_at: days_ago(now, self.last_reply.1),
            }),
        }
    }
}

fn threads(now: DateTime<Utc>) -> Vec<Thread> {
    let mut sticky = ThreadSeed {
        id: "1",
        title: "Discussion: Is computational thinking a fundamental skill for modern education?",
        author: "Prof. Alan Smith",
        avatar: portrait("men", 22),
        age_days: 1,
        replies: 28,
        views: 342,
        category: "Education",
        tags: &["computational-thinking", "curriculum", "future-skills"],
        last_reply: ("Dr. Maria Lopez", 0),
    }
    .into_thread(now);
    sticky.is_sticky = true;

    let mut locked = ThreadSeed {
        id: "6",
        title: "Announcement: Special issue on climate change adaptation",
        author: "Prof. Diane Roberts",
        avatar: portrait("women", 67),
        age_days: 10,
        replies: 8,
        views: 412,
        category: "Announcements",
        tags: &["climate-change", "special-issue", "publication"],
        last_reply: ("Dr. Michael Davis", 9),
    }
    .into_thread(now);
    locked.is_locked = true;

    vec![
        sticky,
        ThreadSeed {
            id: "2",
            title: "Request for resources on quantitative research methods in social sciences",
            author: "Sophia Williams",
            avatar: portrait("women", 54),
            age_days: 3,
            replies: 15,
            views: 187,
            category: "Research Methods",
            tags: &["quantitative", "social-sciences", "research"],
            last_reply: ("Prof. James Chen", 1),
        }
        .into_thread(now),
        ThreadSeed {
            id: "3",
            title: "Experiences with implementing active learning in large lecture courses?",
            author: "Dr. Robert Green",
            avatar: portrait("men", 46),
            age_days: 4,
            replies: 42,
            views: 520,
            category: "Teaching",
            tags: &["active-learning", "large-classes", "engagement"],
            last_reply: ("Lisa Nakamura", 0),
        }
        .into_thread(now),
        ThreadSeed {
            id: "4",
            title: "Academic publishing: Open access vs. traditional journals",
            author: "Dr. Emily Carter",
            avatar: portrait("women", 33),
            age_days: 7,
            replies: 56,
            views: 689,
            category: "Publishing",
            tags: &["open-access", "journals", "academic-publishing"],
            last_reply: ("Prof. Daniel White", 0),
        }
        .into_thread(now),
        ThreadSeed {
            id: "5",
            title: "Ethics approval for online research during pandemic conditions",
            author: "Marcus Johnson",
            avatar: portrait("men", 36),
            age_days: 8,
            replies: 19,
            views: 231,
            category: "Research Ethics",
            tags: &["ethics", "online-research", "pandemic"],
            last_reply: ("Dr. Sarah Kim", 2),
        }
        .into_thread(now),
        locked,
    ]
}

fn replies(now: DateTime<Utc>) -> Vec<ThreadReply> {
    let reply = |id: &str, body: &str, author: &str, avatar: String, title: &str, age: Duration, likes: u32| {
        ThreadReply {
            id: id.into(),
            body: body.into(),
            author: author.into(),
            author_avatar: avatar,
            author_title: title.into(),
            posted_at: now - age,
            likes,
            is_top_answer: false,
        }
    };

    let mut top = reply(
        "r1",
        "I believe computational thinking is absolutely essential in today's education. It teaches logical problem-solving skills that are applicable across disciplines.",
        "Dr. Maria Lopez",
        portrait("women", 29),
        "Associate Professor, Computer Science",
        Duration::hours(2),
        12,
    );
    top.is_top_answer = true;

    vec![
        top,
        reply(
            "r2",
            "While I agree it's important, we need to be careful not to prioritize computational thinking at the expense of creative and critical thinking skills. A balanced approach is key.",
            "Prof. James Wilson",
            portrait("men", 42),
            "Department Chair, Education",
            Duration::hours(4),
            8,
        ),
        reply(
            "r3",
            "I've implemented computational thinking exercises in my humanities courses with great success. Students approached text analysis and historical pattern recognition with new perspectives.",
            "Dr. Emily Chen",
            portrait("women", 56),
            "Assistant Professor, English",
            Duration::days(1),
            15,
        ),
        reply(
            "r4",
            "My research suggests that early exposure to computational thinking concepts (even without computers) helps develop problem-solving frameworks that benefit students throughout their education.",
            "Robert Green",
            portrait("men", 62),
            "PhD Candidate, Cognitive Science",
            Duration::days(2),
            7,
        ),
    ]
}

fn conversations(now: DateTime<Utc>) -> Vec<ConversationSummary> {
    let summary = |id: &str,
                   user_id: &str,
                   name: &str,
                   avatar: String,
                   is_online: bool,
                   last_message: &str,
                   age_days: i64,
                   unread: u32| ConversationSummary {
        id: id.into(),
        user_id: user_id.into(),
        name: name.into(),
        avatar,
        is_online,
        last_message: last_message.into(),
        time: distance_label(days_ago(now, age_days), now),
        unread,
    };

    vec![
        summary(
            "1",
            "u1",
            "Dr. Sarah Johnson",
            portrait("women", 44),
            true,
            "I've reviewed your research proposal and have some feedback",
            0,
            2,
        ),
        summary(
            "2",
            "u2",
            "Prof. Michael Chen",
            portrait("men", 52),
            false,
            "Are you available for the department meeting tomorrow?",
            0,
            0,
        ),
        summary(
            "3",
            "u3",
            "Emma Richards",
            portrait("women", 21),
            true,
            "Thanks for the paper recommendation, very helpful",
            1,
            0,
        ),
        summary(
            "4",
            "u4",
            "Prof. James Norton",
            portrait("men", 32),
            false,
            "The conference has been rescheduled to next month",
            2,
            1,
        ),
        summary(
            "5",
            "u5",
            "Lisa Martinez",
            portrait("women", 67),
            true,
            "I've shared my notes from the lecture series",
            3,
            0,
        ),
    ]
}

fn transcript() -> Vec<ConversationMessage> {
    let message = |id: &str, sender: Sender, content: &str, time: &str, status: DeliveryStatus| {
        ConversationMessage {
            id: id.into(),
            sender,
            content: content.into(),
            time: time.into(),
            status,
        }
    };

    vec![
        message(
            "m1",
            Sender::Other,
            "I've reviewed your research proposal on neural networks for climate modeling. The approach is innovative, but I have some concerns about the data sources you've specified.",
            "10:23 AM",
            DeliveryStatus::Read,
        ),
        message(
            "m2",
            Sender::Other,
            "Specifically, the satellite data resolution might not be sufficient for the detailed analysis you're proposing. Have you considered using the high-resolution dataset from the Climate Research Center?",
            "10:24 AM",
            DeliveryStatus::Read,
        ),
        message(
            "m3",
            Sender::Me,
            "Thank you for the feedback, Dr. Johnson. I did look into the CRC dataset initially, but was concerned about the preprocessing required to make it compatible with my model architecture.",
            "10:30 AM",
            DeliveryStatus::Sent,
        ),
        message(
            "m4",
            Sender::Me,
            "Do you think the benefits of higher resolution would outweigh the potential issues that might arise from the additional preprocessing steps?",
            "10:31 AM",
            DeliveryStatus::Sent,
        ),
        message(
            "m5",
            Sender::Other,
            "Yes, I believe it would be worth it. The improved resolution will give your model more accurate boundary conditions, which is crucial for climate modeling.",
            "10:36 AM",
            DeliveryStatus::Read,
        ),
        message(
            "m6",
            Sender::Other,
            "I can share some preprocessing scripts my research group has used successfully with that dataset if that would help.",
            "10:37 AM",
            DeliveryStatus::Delivered,
        ),
    ]
}

fn announcements(now: DateTime<Utc>) -> Vec<Announcement> {
    let announcement = |id: &str,
                        title: &str,
                        content: &str,
                        age_days: i64,
                        author: &str,
                        avatar: String,
                        priority: Priority,
                        category: &str,
                        is_read: bool| Announcement {
        id: id.into(),
        title: title.into(),
        content: content.into(),
        posted_at: days_ago(now, age_days),
        author: author.into(),
        author_avatar: avatar,
        priority,
        category: category.into(),
        is_read,
    };

    vec![
        announcement(
            "1",
            "Important: Changes to Research Funding Application Process",
            "Beginning next month, all research funding applications will follow a new submission protocol. Please review the updated guidelines on the research portal.",
            0,
            "Dr. William Harris",
            portrait("men", 60),
            Priority::High,
            "Administrative",
            false,
        ),
        announcement(
            "2",
            "Annual Academic Conference Registration Now Open",
            "Registration for the Annual Academic Conference is now open. Early bird registration discounts are available until the end of the month.",
            1,
            "Prof. Elizabeth Taylor",
            portrait("women", 28),
            Priority::Medium,
            "Events",
            true,
        ),
        announcement(
            "3",
            "Library Resource Update: New Journal Subscriptions",
            "The university library has added subscriptions to 15 new journals across various disciplines. Access is available immediately through the library portal.",
            3,
            "Margaret Wilson",
            portrait("women", 72),
            Priority::Low,
            "Resources",
            false,
        ),
        announcement(
            "4",
            "System Maintenance: Academic Portal Downtime",
            "The academic portal will be unavailable due to scheduled maintenance this Saturday from 2:00 AM to 6:00 AM Eastern Time.",
            4,
            "IT Department",
            portrait("men", 5),
            Priority::Medium,
            "Technical",
            true,
        ),
        announcement(
            "5",
            "Deadline Extension: Summer Research Program Applications",
            "Due to high demand, the application deadline for the Summer Research Program has been extended by two weeks to May 15th.",
            5,
            "Dr. Rachel Green",
            portrait("women", 39),
            Priority::High,
            "Programs",
            false,
        ),
        announcement(
            "6",
            "New Faculty Onboarding Sessions Scheduled",
            "Welcome sessions for new faculty members have been scheduled for the first week of the upcoming semester. Please check your email for specific dates and times.",
            7,
            "Human Resources",
            portrait("women", 85),
            Priority::Medium,
            "Administrative",
            true,
        ),
    ]
}

fn profile() -> Profile {
    Profile {
        id: "u001".into(),
        name: "Dr. Jane Smith".into(),
        email: "jane.smith@academia.edu".into(),
        role: "Associate Professor".into(),
        avatar: portrait("women", 40),
        department: "Computer Science".into(),
        join_date: "2018-05-15".into(),
        publications: 37,
        followers: 285,
        following: 142,
    }
}

fn publication(
    id: &str,
    title: &str,
    journal: &str,
    year: u16,
    citations: u32,
    co_authors: &[&str],
) -> Publication {
    Publication {
        id: id.into(),
        title: title.into(),
        journal: journal.into(),
        year,
        citations,
        co_authors: labels(co_authors),
    }
}

fn publications() -> Vec<Publication> {
    vec![
        publication(
            "p1",
            "Neural Network Approaches to Climate Modeling: A Comprehensive Review",
            "Journal of Computational Environmental Science",
            2024,
            128,
            &["Dr. Robert Chen", "Prof. Maria Santos", "Dr. Kevin Li"],
        ),
        publication(
            "p2",
            "Predicting Extreme Weather Events Using Multimodal Deep Learning",
            "Environmental Data Science",
            2023,
            85,
            &["Dr. Emily Wilson", "Prof. James Harris"],
        ),
        publication(
            "p3",
            "Integrating Satellite Data with Machine Learning for Enhanced Climate Predictions",
            "Remote Sensing Applications",
            2022,
            210,
            &["Dr. Lisa Martinez", "Dr. Michael Davis", "Prof. David Garcia"],
        ),
    ]
}

fn saved(now: DateTime<Utc>) -> Vec<SavedItem> {
    let item = |id: &str, title: &str, kind, author: &str, days| SavedItem {
        id: id.into(),
        title: title.into(),
        kind,
        author: author.into(),
        saved_at: days_ago(now, days),
    };
    vec![
        item(
            "s1",
            "The Ethics of Artificial Intelligence in Healthcare",
            SavedKind::Article,
            "Prof. James Norton",
            3,
        ),
        item(
            "s2",
            "Academic publishing: Open access vs. traditional journals",
            SavedKind::Forum,
            "Dr. Emily Carter",
            7,
        ),
        item(
            "s3",
            "Neuroscience of Learning: Why Spaced Repetition Works",
            SavedKind::Article,
            "Prof. Michael Chen",
            14,
        ),
    ]
}

fn activity(now: DateTime<Utc>) -> Vec<Activity> {
    let entry = |id: &str, action: &str, item: &str, at| Activity {
        id: id.into(),
        action: action.into(),
        item: item.into(),
        at,
    };
    vec![
        entry(
            "a1",
            "Commented on forum thread",
            "Discussion: Is computational thinking a fundamental skill for modern education?",
            now - Duration::hours(2),
        ),
        entry(
            "a2",
            "Published new article",
            "Neural Network Approaches to Climate Modeling: A Comprehensive Review",
            days_ago(now, 3),
        ),
        entry(
            "a3",
            "Replied to announcement",
            "Important: Changes to Research Funding Application Process",
            days_ago(now, 7),
        ),
        entry(
            "a4",
            "Saved article",
            "The Ethics of Artificial Intelligence in Healthcare",
            days_ago(now, 7),
        ),
    ]
}
