use std::collections::HashSet;

use models::image::ImageRecord;

use crate::errors::ServiceError;
use crate::lookup::resolution::{ResolutionPolicy, SizeParams};
use crate::lookup::selector::Selector;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// 307 to the image URL.
    #[default]
    Redirect,
    /// Record plus URL as a JSON body.
    Json,
}

/// A fully validated lookup request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupQuery {
    pub selector: Selector,
    pub format: OutputFormat,
    pub size: SizeParams,
}

const KNOWN_PARAMS: [&str; 8] = ["resolution", "w", "h", "qlt", "index", "date", "rand", "format"];

impl LookupQuery {
    /// Validate raw query pairs.
    ///
    /// Selector priority: numeric `index` (or `index=random`), then `date`,
    /// then `rand=true`, otherwise index 0. Unrecognised keys are rejected
    /// unless `allow_unknown` is set, in which case they are kept for
    /// forwarding. Repeated keys are always rejected.
    pub fn from_pairs(
        pairs: &[(String, String)],
        policy: &ResolutionPolicy,
        allow_unknown: bool,
    ) -> Result<Self, ServiceError> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut index: Option<IndexParam> = None;
        let mut date: Option<String> = None;
        let mut rand = false;
        let mut query = LookupQuery::default();

        for (key, value) in pairs {
            if !seen.insert(key.as_str()) {
                return Err(ServiceError::validation(format!("query parameter '{key}' given more than once")));
            }
            match key.as_str() {
                "resolution" => query.size.resolution = Some(policy.parse(value)?),
                "w" => query.size.w = Some(parse_dimension(key, value)?),
                "h" => query.size.h = Some(parse_dimension(key, value)?),
                "qlt" => query.size.qlt = Some(parse_quality(value)?),
                "index" => index = Some(parse_index(value)?),
                "date" => {
                    if !ImageRecord::is_valid_startdate(value) {
                        return Err(ServiceError::validation("date must be 8 digits (YYYYMMDD)"));
                    }
                    date = Some(value.clone());
                }
                "rand" => rand = parse_bool(key, value)?,
                "format" => {
                    if value != "json" {
                        return Err(ServiceError::validation("format must be 'json'"));
                    }
                    query.format = OutputFormat::Json;
                }
                other if allow_unknown => query.size.extra.push((other.to_string(), value.clone())),
                other => {
                    return Err(ServiceError::validation(format!(
                        "unknown query parameter '{other}'; allowed: {}",
                        KNOWN_PARAMS.join(", ")
                    )))
                }
            }
        }

        query.selector = match (index, date) {
            (Some(IndexParam::At(i)), _) => Selector::Index(i),
            (Some(IndexParam::Random), _) => Selector::Random,
            (None, Some(d)) => Selector::Date(d),
            (None, None) if rand => Selector::Random,
            (None, None) => Selector::default(),
        };
        Ok(query)
    }
}

enum IndexParam {
    At(i64),
    Random,
}

fn parse_index(value: &str) -> Result<IndexParam, ServiceError> {
    if value == "random" {
        return Ok(IndexParam::Random);
    }
    value
        .parse::<i64>()
        .map(IndexParam::At)
        .map_err(|_| ServiceError::validation("index must be an integer or 'random'"))
}

fn parse_dimension(key: &str, value: &str) -> Result<u32, ServiceError> {
    value
        .parse::<u32>()
        .map_err(|_| ServiceError::validation(format!("{key} must be a non-negative integer")))
}

fn parse_quality(value: &str) -> Result<u8, ServiceError> {
    match value.parse::<u8>() {
        Ok(q) if q <= 100 => Ok(q),
        _ => Err(ServiceError::validation("qlt must be an integer in 0..=100")),
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ServiceError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ServiceError::validation(format!("{key} must be a boolean"))),
    }
}
