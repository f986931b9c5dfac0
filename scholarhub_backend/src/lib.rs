pub mod announcements;
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod events;
pub mod feed;
pub mod forum;
pub mod messages;
pub mod profile;
pub mod search;
pub mod store;
pub mod tasks;
pub mod telemetry;
pub mod tracking;
pub mod utils;

pub use app::App;
pub use config::ScholarhubConfig;
pub use error::ScholarhubError;
pub use store::RecordStore;
