//! `/api/search` handler.

use axum::extract::{Query, State};
use axum::Json;
use serde::Serialize;
use std::sync::Arc;

use super::AppState;
use crate::error::FinderError;
use crate::models::SearchRequest;

#[derive(Debug, Default)]
pub struct SearchQueryParams {
    /// Free-text address
    pub q: Option<String>,
    /// Search radius in km; non-integers are ignored
    pub distance: Option<String>,
}

impl SearchQueryParams {
    /// First occurrence of each known key wins; unknown keys are ignored
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "q" if params.q.is_none() => params.q = Some(value),
                "distance" if params.distance.is_none() => params.distance = Some(value),
                _ => {}
            }
        }
        params
    }
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub result: String,
}

/// Nearby-region search
pub(super) async fn search_handler(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<SearchResponse>, FinderError> {
    let params = SearchQueryParams::from_pairs(pairs);

    let query = params
        .q
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(FinderError::missing_query)?;

    let finder = state
        .finder
        .as_ref()
        .ok_or_else(FinderError::missing_api_key)?;

    let distance_km = params
        .distance
        .as_deref()
        .and_then(|d| d.trim().parse::<i64>().ok())
        .unwrap_or(state.default_distance_km);

    let request = SearchRequest {
        query,
        distance_km,
    };

    // Elapsing drops the search future, abandoning any calls still pending
    let outcome = tokio::time::timeout(state.request_timeout, finder.find_nearby_regions(&request))
        .await
        .map_err(|_| {
            FinderError::Upstream(format!(
                "search timed out after {:?}",
                state.request_timeout
            ))
        })??;

    Ok(Json(SearchResponse {
        result: outcome.to_result_string(),
    }))
}
