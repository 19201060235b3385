use models::image::ImageRecord;
use rand::Rng;

use crate::errors::ServiceError;

/// How a single record is picked from the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Position from the front; negative counts from the back (`-1` is the oldest).
    Index(i64),
    /// Exact `startdate` match.
    Date(String),
    Random,
}

impl Default for Selector {
    fn default() -> Self {
        Selector::Index(0)
    }
}

impl Selector {
    pub fn label(&self) -> &'static str {
        match self {
            Selector::Index(_) => "index",
            Selector::Date(_) => "date",
            Selector::Random => "random",
        }
    }
}

pub fn by_index(images: &[ImageRecord], index: i64) -> Result<&ImageRecord, ServiceError> {
    let len = images.len();
    let out_of_range = || ServiceError::IndexOutOfRange { index, len };
    let pos = if index < 0 {
        // underflow past the oldest record is treated like overflow
        usize::try_from(len as i64 + index).map_err(|_| out_of_range())?
    } else {
        usize::try_from(index).map_err(|_| out_of_range())?
    };
    images.get(pos).ok_or_else(out_of_range)
}

pub fn by_date<'a>(images: &'a [ImageRecord], date: &str) -> Result<&'a ImageRecord, ServiceError> {
    images
        .iter()
        .find(|img| img.startdate == date)
        .ok_or_else(|| ServiceError::DateNotFound(date.to_string()))
}

pub fn random<'a, R: Rng + ?Sized>(images: &'a [ImageRecord], rng: &mut R) -> Result<&'a ImageRecord, ServiceError> {
    if images.is_empty() {
        return Err(ServiceError::IndexOutOfRange { index: 0, len: 0 });
    }
    let idx = rng.gen_range(0..images.len());
    by_index(images, idx as i64)
}

pub fn select<'a, R: Rng + ?Sized>(
    images: &'a [ImageRecord],
    selector: &Selector,
    rng: &mut R,
) -> Result<&'a ImageRecord, ServiceError> {
    match selector {
        Selector::Index(i) => by_index(images, *i),
        Selector::Date(d) => by_date(images, d),
        Selector::Random => random(images, rng),
    }
}
