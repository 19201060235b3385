//! Service layer for the wallpaper lookup API and the store sync job.
//! - `lookup`: validate a request, pick one record, build its image URL.
//! - `sync`: merge the upstream feed into the stored list.
//! - `store`/`file`/`storage`: the narrow store seam and its JSON file backing.

pub mod errors;
pub mod storage;
pub mod store;
pub mod file;
pub mod lookup;
pub mod sync;
