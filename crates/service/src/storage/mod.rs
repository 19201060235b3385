//! Storage abstractions for service layer
//!
//! File-backed stores shared by the lookup path and the sync job.

pub mod json_list_store;
