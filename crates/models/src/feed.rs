use serde::Deserialize;

use crate::image::ImageRecord;

/// Image-of-the-day archive response: `{ "images": [...] }`.
#[derive(Clone, Debug, Deserialize)]
pub struct FeedResponse {
    #[serde(default)]
    pub images: Vec<FeedImage>,
}

/// One upstream archive entry. Only the four stored fields are read; the
/// feed carries many more (`enddate`, `hsh`, `url`, ...) that are ignored.
#[derive(Clone, Debug, Deserialize)]
pub struct FeedImage {
    pub startdate: String,
    #[serde(default)]
    pub copyright: String,
    pub urlbase: String,
    #[serde(default)]
    pub title: String,
}

impl From<FeedImage> for ImageRecord {
    fn from(f: FeedImage) -> Self {
        ImageRecord {
            startdate: f.startdate,
            copyright: f.copyright,
            urlbase: f.urlbase,
            title: f.title,
        }
    }
}
