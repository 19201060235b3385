use std::collections::HashSet;

use models::feed::FeedImage;
use models::image::ImageRecord;
use tracing::{debug, warn};

#[derive(Debug)]
pub struct MergeOutcome {
    pub images: Vec<ImageRecord>,
    /// Startdates appended by this merge, in feed order.
    pub added: Vec<String>,
}

/// Append feed entries whose `startdate` is not yet known, then sort the
/// whole list newest first.
///
/// Fixed-width YYYYMMDD strings sort correctly as plain strings. The sort is
/// stable, so merging an already merged batch yields the identical list.
pub fn merge_batch(mut images: Vec<ImageRecord>, batch: Vec<FeedImage>) -> MergeOutcome {
    let mut known: HashSet<String> = images.iter().map(|img| img.startdate.clone()).collect();
    let mut added = Vec::new();

    for entry in batch {
        let record = ImageRecord::from(entry);
        if let Err(e) = record.validate() {
            warn!(error = %e, urlbase = %record.urlbase, "skipping feed entry");
            continue;
        }
        if !known.insert(record.startdate.clone()) {
            debug!(startdate = %record.startdate, "already stored");
            continue;
        }
        added.push(record.startdate.clone());
        images.push(record);
    }

    images.sort_by(|a, b| b.startdate.cmp(&a.startdate));
    MergeOutcome { images, added }
}
