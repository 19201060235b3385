//! Domain types shared by the lookup service and the store sync job.

pub mod errors;
pub mod image;
pub mod feed;
