//! Administrative region names returned by reverse geocoding.

/// A "sgg dong" pair: second-level (city / district) and third-level
/// (neighbourhood) administrative names joined by a single space.
///
/// Equality, hashing and ordering all follow the string form, so a sorted
/// collection of these orders by code point.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionName(String);

impl RegionName {
    /// Build a region name, requiring both parts to be present and non-empty
    pub fn from_parts(sgg: Option<&str>, dong: Option<&str>) -> Option<Self> {
        match (sgg, dong) {
            (Some(sgg), Some(dong)) if !sgg.is_empty() && !dong.is_empty() => {
                Some(Self(format!("{} {}", sgg, dong)))
            }
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RegionName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RegionName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
