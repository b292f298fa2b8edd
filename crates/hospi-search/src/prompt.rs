//! Builds the grounded `generateContent` request for a hospital search.

use hospi_core::{Coordinates, SearchFilters};

use crate::types::{
    EmptyToolConfig, GenerateContentRequest, LatLng, RequestContent, RequestPart,
    RetrievalConfig, Tool, ToolConfig,
};

/// Substituted into the instruction when the location is empty.
pub const PROMPT_DEFAULT_LOCATION: &str = "current location";

/// The natural-language instruction for one search.
#[must_use]
pub fn build_prompt(filters: &SearchFilters) -> String {
    let location = if filters.location.is_empty() {
        PROMPT_DEFAULT_LOCATION
    } else {
        filters.location.as_str()
    };

    format!(
        "Act as a professional healthcare advisor. Find hospitals in {location} for: \"{query}\".\n\
         \n\
         For EACH facility found by Google Maps:\n\
         1. Verify specialized departments for: Cardiac Care, Cancer Care, Emergency Accident Care, Neurosciences, and Orthopaedics.\n\
         2. Use Google Search to find their official branch-specific image URL if possible.\n\
         3. Provide a realistic estimate of current bed occupancy and ER wait times based on historical trends for this region.",
        query = filters.query,
    )
}

/// Request with Maps and Search grounding enabled, biased toward
/// `coordinates` when they are known.
#[must_use]
pub fn build_request(
    filters: &SearchFilters,
    coordinates: Option<Coordinates>,
) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![RequestContent {
            role: "user".to_string(),
            parts: vec![RequestPart {
                text: build_prompt(filters),
            }],
        }],
        tools: vec![
            Tool::GoogleMaps(EmptyToolConfig {}),
            Tool::GoogleSearch(EmptyToolConfig {}),
        ],
        tool_config: coordinates.map(|c| ToolConfig {
            retrieval_config: RetrievalConfig {
                lat_lng: LatLng {
                    latitude: c.latitude,
                    longitude: c.longitude,
                },
            },
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_location_and_query() {
        let prompt = build_prompt(&SearchFilters::new("Cardiology", "Lucknow"));
        assert!(prompt.contains("Find hospitals in Lucknow for: \"Cardiology\"."));
        assert!(prompt.contains("Orthopaedics"));
        assert!(prompt.contains("ER wait times"));
    }

    #[test]
    fn prompt_defaults_empty_location() {
        let prompt = build_prompt(&SearchFilters::new("Oncology", ""));
        assert!(prompt.contains("Find hospitals in current location for: \"Oncology\"."));
    }

    #[test]
    fn request_without_coordinates_omits_tool_config() {
        let request = build_request(&SearchFilters::default(), None);
        let json = serde_json::to_value(&request).expect("serialize");
        assert!(json.get("toolConfig").is_none());
        assert_eq!(json["tools"][0], serde_json::json!({ "googleMaps": {} }));
        assert_eq!(json["tools"][1], serde_json::json!({ "googleSearch": {} }));
        assert_eq!(json["contents"][0]["role"], "user");
    }

    #[test]
    fn request_with_coordinates_sets_lat_lng_bias() {
        let coords = Coordinates {
            latitude: 26.85,
            longitude: 80.95,
        };
        let request = build_request(&SearchFilters::default(), Some(coords));
        let json = serde_json::to_value(&request).expect("serialize");
        let lat_lng = &json["toolConfig"]["retrievalConfig"]["latLng"];
        assert_eq!(lat_lng["latitude"], 26.85);
        assert_eq!(lat_lng["longitude"], 80.95);
    }
}
