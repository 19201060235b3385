use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// One daily wallpaper entry as persisted in the store file.
///
/// Field order is the on-disk order: `startdate, copyright, urlbase, title`.
/// `startdate` (YYYYMMDD) is the identity key; uniqueness is kept by the
/// sync job, not enforced here.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImageRecord {
    pub startdate: String,
    pub copyright: String,
    pub urlbase: String,
    pub title: String,
}

impl ImageRecord {
    /// True when `s` is exactly 8 ASCII digits.
    pub fn is_valid_startdate(s: &str) -> bool {
        s.len() == 8 && s.bytes().all(|b| b.is_ascii_digit())
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        if !Self::is_valid_startdate(&self.startdate) {
            return Err(ModelError::InvalidStartdate(self.startdate.clone()));
        }
        Ok(())
    }
}

/// Lookup response body: the selected record plus the resolved image URL.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImageView {
    #[serde(flatten)]
    pub image: ImageRecord,
    pub url: String,
}
