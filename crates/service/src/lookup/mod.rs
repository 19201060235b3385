//! Image lookup: query validation, record selection and URL construction.

pub mod query;
pub mod resolution;
pub mod selector;
pub mod service;

pub use query::{LookupQuery, OutputFormat};
pub use resolution::ResolutionPolicy;
pub use selector::Selector;
pub use service::LookupService;
