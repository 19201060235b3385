use serde::Serialize;
use utoipa::{IntoParams, OpenApi, ToSchema};

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ImageViewDoc {
    /// YYYYMMDD
    pub startdate: String,
    pub copyright: String,
    pub urlbase: String,
    pub title: String,
    /// Absolute image URL, the same one the redirect points at
    pub url: String,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorBodyDoc {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub error: String,
    pub message: String,
}

/// Query parameters of `GET /v1`. Any other parameter is rejected unless
/// forwarding of unknown parameters is enabled.
#[derive(IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ImageQueryDoc {
    /// `4k|2k|1080p|720p|480p` (named policy) or `UHD|1920x1080|...` (path policy)
    pub resolution: Option<String>,
    /// Width hint, non-negative
    pub w: Option<u32>,
    /// Height hint, non-negative
    pub h: Option<u32>,
    /// JPEG quality 0..=100
    pub qlt: Option<u8>,
    /// Integer position (negative counts from the oldest), or `random`
    pub index: Option<String>,
    /// YYYYMMDD
    pub date: Option<String>,
    /// Pick a random image when neither `index` nor `date` is given
    pub rand: Option<bool>,
    /// `json` to get the record instead of a redirect
    pub format: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::metrics,
        crate::routes::get_image,
    ),
    components(
        schemas(
            HealthResponse,
            ImageViewDoc,
            ErrorBodyDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "image")
    )
)]
pub struct ApiDoc;
