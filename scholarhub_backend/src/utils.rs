//! Shared helpers and constants.

use chrono::{DateTime, Local, Utc};

pub const APP_NAME: &str = "scholarhub_backend";

/// Human distance between two instants, e.g. "3 days" or "about 2 hours".
pub fn distance_label(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds().max(0);
    let minutes = (seconds + 30) / 60;
    let hours = (minutes + 30) / 60;
    let days = (hours + 12) / 24;

    match minutes {
        0 => "less than a minute".to_string(),
        1 => "1 minute".to_string(),
        2..=44 => format!("{minutes} minutes"),
        45..=89 => "about 1 hour".to_string(),
        90..=1439 => format!("about {hours} hours"),
        1440..=2519 => "1 day".to_string(),
        _ if days < 30 => format!("{days} days"),
        _ if days < 45 => "about 1 month".to_string(),
        _ if days < 60 => "about 2 months".to_string(),
        _ if days < 365 => format!("{} months", days / 30),
        _ => {
            let years = days / 365;
            if years == 1 {
                "about 1 year".to_string()
            } else {
                format!("about {years} years")
            }
        }
    }
}

/// Relative date shown next to posts: "2 days ago".
pub fn relative_label(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    format!("{} ago", distance_label(then, now))
}

/// Wall-clock label for chat bubbles ("03:41 PM").
pub fn clock_label(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%I:%M %p").to_string()
}
