//! Error taxonomy for region discovery.

use thiserror::Error;

pub const MISSING_QUERY: &str = "검색어를 입력하세요";
pub const MISSING_API_KEY: &str = "서버에 카카오 API 키가 설정되지 않았습니다.";
pub const ADDRESS_NOT_FOUND: &str = "주소를 찾을 수 없습니다.";

/// Failures surfaced by the finder and its geocoding collaborator.
///
/// The `Display` form is the message shown to API clients, so it must never
/// contain credentials.
#[derive(Debug, Error)]
pub enum FinderError {
    /// Client input was missing or out of range
    #[error("{0}")]
    InvalidRequest(String),

    /// Deployment problem, e.g. no geocoding credential
    #[error("{0}")]
    Configuration(String),

    /// The query did not geocode to any coordinate
    #[error("{0}")]
    NotFound(String),

    /// Transport, status or decoding failure talking to the geocoder
    #[error("{0}")]
    Upstream(String),
}

impl FinderError {
    pub fn missing_query() -> Self {
        FinderError::InvalidRequest(MISSING_QUERY.to_string())
    }

    pub fn missing_api_key() -> Self {
        FinderError::Configuration(MISSING_API_KEY.to_string())
    }

    pub fn address_not_found() -> Self {
        FinderError::NotFound(ADDRESS_NOT_FOUND.to_string())
    }
}

impl From<reqwest::Error> for FinderError {
    fn from(e: reqwest::Error) -> Self {
        // Strip the URL: it carries the user's query and nothing useful to clients
        FinderError::Upstream(e.without_url().to_string())
    }
}

pub type Result<T> = std::result::Result<T, FinderError>;
