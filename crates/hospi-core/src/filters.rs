use serde::{Deserialize, Serialize};

pub const DEFAULT_QUERY: &str = "General Hospitals";
pub const DEFAULT_LOCATION: &str = "Lucknow";

/// Category shortcuts offered next to the search box. Selecting one searches
/// for the category name at the current location.
pub const CATEGORIES: [&str; 5] = [
    "Cardiology",
    "Oncology",
    "Emergency",
    "Neurology",
    "Maternity",
];

/// The current search parameters.
///
/// Replaced wholesale after each successful search rather than edited in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    pub query: String,
    pub location: String,
    pub services: Vec<String>,
    pub min_rating: f64,
    pub open_now: bool,
}

impl Default for SearchFilters {
    fn default() -> Self {
        Self::new(DEFAULT_QUERY, DEFAULT_LOCATION)
    }
}

impl SearchFilters {
    #[must_use]
    pub fn new(query: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            location: location.into(),
            services: Vec::new(),
            min_rating: 0.0,
            open_now: false,
        }
    }

    /// Returns a copy with `query` and `location` replaced and every other
    /// field carried over. No validation: empty strings pass through.
    #[must_use]
    pub fn with_query(&self, query: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            location: location.into(),
            ..self.clone()
        }
    }
}
