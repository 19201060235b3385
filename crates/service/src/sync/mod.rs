//! Store sync job: pull the latest feed entries and merge them into the list.

pub mod feed;
pub mod merge;
pub mod service;

pub use feed::{HttpImageFeed, ImageFeed};
pub use service::{SyncReport, SyncService};
