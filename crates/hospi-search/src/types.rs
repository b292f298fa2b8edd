//! Gemini `generateContent` wire types.
//!
//! Only the fields this crate reads are modelled. Every response field is
//! optional or defaulted because grounding metadata is frequently absent.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// request
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<RequestContent>,
    pub tools: Vec<Tool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_config: Option<ToolConfig>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RequestContent {
    pub role: String,
    pub parts: Vec<RequestPart>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RequestPart {
    pub text: String,
}

/// Grounding tools. Each serializes as `{"googleMaps": {}}` or `{"googleSearch": {}}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Tool {
    GoogleMaps(EmptyToolConfig),
    GoogleSearch(EmptyToolConfig),
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct EmptyToolConfig {}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolConfig {
    pub retrieval_config: RetrievalConfig,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrievalConfig {
    pub lat_lng: LatLng,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

// ---------------------------------------------------------------------------
// response
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
    #[serde(default)]
    pub grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ResponsePart {
    #[serde(default)]
    pub text: Option<String>,
    /// Set on model "thinking" parts, which are not part of the answer.
    #[serde(default)]
    pub thought: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingMetadata {
    #[serde(default)]
    pub grounding_chunks: Vec<GroundingChunk>,
}

/// One grounding reference. Returned to callers untouched as diagnostic sources.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroundingChunk {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maps: Option<MapsReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web: Option<WebReference>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapsReference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebReference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl GenerateContentResponse {
    /// Answer text of the first candidate: its non-thought text parts joined.
    /// Empty when the model returned no candidate or no text.
    #[must_use]
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter(|p| p.thought != Some(true))
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }

    /// Consumes the response, returning the first candidate's grounding chunks.
    #[must_use]
    pub fn into_grounding_chunks(self) -> Vec<GroundingChunk> {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.grounding_metadata)
            .map(|m| m.grounding_chunks)
            .unwrap_or_default()
    }
}

/// Google API error envelope: `{"error": {"code": 400, "message": "...", "status": "..."}}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorEnvelope {
    pub error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tools_serialize_as_named_empty_objects() {
        let tools = vec![
            Tool::GoogleMaps(EmptyToolConfig {}),
            Tool::GoogleSearch(EmptyToolConfig {}),
        ];
        let json = serde_json::to_value(&tools).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!([{ "googleMaps": {} }, { "googleSearch": {} }])
        );
    }

    #[test]
    fn text_joins_parts_and_skips_thoughts() {
        let response: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{
                "content": { "parts": [
                    { "text": "planning...", "thought": true },
                    { "text": "Apex Heart " },
                    { "text": "Institute" }
                ]}
            }]
        }))
        .expect("deserialize");
        assert_eq!(response.text(), "Apex Heart Institute");
    }

    #[test]
    fn empty_response_has_no_text_and_no_chunks() {
        let response: GenerateContentResponse =
            serde_json::from_value(serde_json::json!({})).expect("deserialize");
        assert_eq!(response.text(), "");
        assert!(response.into_grounding_chunks().is_empty());
    }

    #[test]
    fn grounding_chunks_parse_maps_and_web_refs() {
        let response: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{
                "groundingMetadata": { "groundingChunks": [
                    { "maps": { "uri": "https://maps.google.com/?cid=1", "title": "City Care", "placeId": "places/1" } },
                    { "web": { "uri": "https://example.org", "title": "example.org" } }
                ]}
            }]
        }))
        .expect("deserialize");
        let chunks = response.into_grounding_chunks();
        assert_eq!(chunks.len(), 2);
        let maps = chunks[0].maps.as_ref().expect("maps ref");
        assert_eq!(maps.title.as_deref(), Some("City Care"));
        assert_eq!(maps.place_id.as_deref(), Some("places/1"));
        assert!(chunks[1].maps.is_none());
    }
}
