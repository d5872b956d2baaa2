//! Search request and outcome types.

use super::RegionName;

/// Distance used when the caller does not supply one, in kilometres
pub const DEFAULT_DISTANCE_KM: i64 = 10;

/// Payload returned when no cell resolved to a named region
pub const NO_REGIONS_FOUND: &str = "주변 동네를 찾을 수 없습니다.";

/// A single nearby-region search
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub query: String,
    pub distance_km: i64,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>, distance_km: Option<i64>) -> Self {
        Self {
            query: query.into(),
            distance_km: distance_km.unwrap_or(DEFAULT_DISTANCE_KM),
        }
    }
}

/// Successful search result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Sorted, deduplicated, never empty
    Regions(Vec<RegionName>),
    NoneFound,
}

impl SearchOutcome {
    /// Build from an already-sorted, deduplicated list
    pub fn from_sorted(regions: Vec<RegionName>) -> Self {
        if regions.is_empty() {
            SearchOutcome::NoneFound
        } else {
            SearchOutcome::Regions(regions)
        }
    }

    pub fn regions(&self) -> &[RegionName] {
        match self {
            SearchOutcome::Regions(regions) => regions,
            SearchOutcome::NoneFound => &[],
        }
    }

    /// Comma-joined region list, or the no-results sentinel
    pub fn to_result_string(&self) -> String {
        match self {
            SearchOutcome::Regions(regions) => regions
                .iter()
                .map(RegionName::as_str)
                .collect::<Vec<_>>()
                .join(","),
            SearchOutcome::NoneFound => NO_REGIONS_FOUND.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(sgg: &str, dong: &str) -> RegionName {
        RegionName::from_parts(Some(sgg), Some(dong)).unwrap()
    }

    #[test]
    fn test_default_distance() {
        let req = SearchRequest::new("강남대로", None);
        assert_eq!(req.distance_km, 10);
    }

    #[test]
    fn test_result_string_has_no_spaces_around_commas() {
        let outcome = SearchOutcome::from_sorted(vec![
            region("강남구", "논현동"),
            region("강남구", "역삼동"),
        ]);
        assert_eq!(outcome.to_result_string(), "강남구 논현동,강남구 역삼동");
    }

    #[test]
    fn test_empty_list_is_sentinel() {
        let outcome = SearchOutcome::from_sorted(vec![]);
        assert_eq!(outcome, SearchOutcome::NoneFound);
        assert_eq!(outcome.to_result_string(), NO_REGIONS_FOUND);
        assert!(outcome.regions().is_empty());
    }
}
