//! Resolution policy: how a requested display size is expressed in the image URL.
//!
//! - `Named`: `4k | 2k | 1080p | 720p | 480p`. The image is always the `_UHD.jpg`
//!   rendition; the named size becomes `w`/`h` resize hints unless the caller
//!   already gave `w` or `h`.
//! - `Path`: a discrete rendition token such as `1920x1080` or `UHD`, embedded in
//!   the file name (`_1920x1080.jpg`). `w`/`h`/`qlt` are forwarded unchanged.

use configs::ResolutionPolicyKind;

use crate::errors::ServiceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedResolution {
    R4k,
    R2k,
    R1080p,
    R720p,
    R480p,
}

impl NamedResolution {
    pub const ALL: [NamedResolution; 5] = [
        NamedResolution::R4k,
        NamedResolution::R2k,
        NamedResolution::R1080p,
        NamedResolution::R720p,
        NamedResolution::R480p,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NamedResolution::R4k => "4k",
            NamedResolution::R2k => "2k",
            NamedResolution::R1080p => "1080p",
            NamedResolution::R720p => "720p",
            NamedResolution::R480p => "480p",
        }
    }

    /// Pixel `(w, h)` sent upstream as resize hints.
    pub fn size(&self) -> (u32, u32) {
        match self {
            NamedResolution::R4k => (3840, 2160),
            NamedResolution::R2k => (2560, 1440),
            NamedResolution::R1080p => (1920, 1080),
            NamedResolution::R720p => (1280, 720),
            NamedResolution::R480p => (640, 480),
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == raw)
    }
}

/// Renditions the image host serves directly.
pub const PATH_RESOLUTIONS: [&str; 15] = [
    "UHD",
    "1920x1200",
    "1920x1080",
    "1366x768",
    "1280x768",
    "1024x768",
    "800x600",
    "800x480",
    "768x1280",
    "720x1280",
    "640x480",
    "480x800",
    "400x240",
    "320x240",
    "240x320",
];

fn parse_path_token(raw: &str) -> Option<&'static str> {
    PATH_RESOLUTIONS.into_iter().find(|t| *t == raw)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Named(NamedResolution),
    Path(&'static str),
}

/// Validated size-related request parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SizeParams {
    pub resolution: Option<Resolution>,
    pub w: Option<u32>,
    pub h: Option<u32>,
    pub qlt: Option<u8>,
    /// Unrecognised parameters, in request order, when forwarding them is enabled.
    pub extra: Vec<(String, String)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionPolicy {
    Named { default: NamedResolution },
    Path { default: &'static str },
}

impl ResolutionPolicy {
    pub fn named() -> Self {
        ResolutionPolicy::Named { default: NamedResolution::R1080p }
    }

    pub fn path() -> Self {
        ResolutionPolicy::Path { default: "UHD" }
    }

    pub fn from_config(kind: ResolutionPolicyKind, default: Option<&str>) -> Result<Self, ServiceError> {
        let policy = match kind {
            ResolutionPolicyKind::Named => Self::named(),
            ResolutionPolicyKind::Path => Self::path(),
        };
        match default {
            None => Ok(policy),
            Some(raw) => match policy.parse(raw)? {
                Resolution::Named(n) => Ok(ResolutionPolicy::Named { default: n }),
                Resolution::Path(t) => Ok(ResolutionPolicy::Path { default: t }),
            },
        }
    }

    /// Validate a `resolution` query value against this policy.
    pub fn parse(&self, raw: &str) -> Result<Resolution, ServiceError> {
        match self {
            ResolutionPolicy::Named { .. } => NamedResolution::parse(raw).map(Resolution::Named).ok_or_else(|| {
                let allowed: Vec<&str> = NamedResolution::ALL.iter().map(|r| r.as_str()).collect();
                ServiceError::validation(format!("resolution must be one of {}", allowed.join(", ")))
            }),
            ResolutionPolicy::Path { .. } => parse_path_token(raw).map(Resolution::Path).ok_or_else(|| {
                ServiceError::validation(format!("resolution must be one of {}", PATH_RESOLUTIONS.join(", ")))
            }),
        }
    }

    /// `{base_url}{urlbase}_{rendition}.jpg`, plus `&{hints}` when any hints apply.
    ///
    /// `urlbase` already carries the `?id=` query of the image host, so hints
    /// are appended with `&`. Hint order: `w`, `h`, `qlt`, forwarded extras,
    /// then sizes derived from a named resolution.
    pub fn build_url(&self, base_url: &str, urlbase: &str, size: &SizeParams) -> String {
        let mut hints: Vec<(String, String)> = Vec::new();
        if let Some(w) = size.w {
            hints.push(("w".into(), w.to_string()));
        }
        if let Some(h) = size.h {
            hints.push(("h".into(), h.to_string()));
        }
        if let Some(q) = size.qlt {
            hints.push(("qlt".into(), q.to_string()));
        }
        hints.extend(size.extra.iter().cloned());

        let rendition = match self {
            ResolutionPolicy::Named { default } => {
                let named = match size.resolution {
                    Some(Resolution::Named(n)) => n,
                    _ => *default,
                };
                if size.w.is_none() && size.h.is_none() {
                    let (w, h) = named.size();
                    hints.push(("w".into(), w.to_string()));
                    hints.push(("h".into(), h.to_string()));
                }
                "UHD"
            }
            ResolutionPolicy::Path { default } => match size.resolution {
                Some(Resolution::Path(t)) => t,
                _ => *default,
            },
        };

        let mut url = format!("{base_url}{urlbase}_{rendition}.jpg");
        if !hints.is_empty() {
            let query = hints
                .iter()
                .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
                .collect::<Vec<_>>()
                .join("&");
            url.push('&');
            url.push_str(&query);
        }
        url
    }
}
