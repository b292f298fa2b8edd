//! Converts a grounded Gemini answer into [`Hospital`] records.
//!
//! Only grounding chunks carrying a Maps reference become hospitals, one per
//! chunk and in the same order. Fields the answer does not supply come from
//! the configured [`Estimator`].

use std::future::Future;

use chrono::Utc;
use hospi_core::{Coordinates, Hospital, SearchFilters, ServiceChecklist, TrustTier};
use serde::Serialize;

use crate::client::GeminiClient;
use crate::error::SearchError;
use crate::estimate::{Estimator, RandomEstimator};
use crate::images::{fallback_image, ImageUrlExtractor, TextImageExtractor};
use crate::prompt::build_request;
use crate::types::GroundingChunk;

pub const DEFAULT_HOSPITAL_NAME: &str = "Speciality Hospital";
pub const DEFAULT_ADDRESS_CITY: &str = "City Center";
const ADDRESS_DISTRICT: &str = "Medical District";
const DEFAULT_SERVICES: [&str; 3] = ["Radiology", "Diagnostics", "In-patient"];
const OPENING_HOURS: &str = "Open 24 Hours";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    pub hospitals: Vec<Hospital>,
    pub raw_text: String,
    /// Every grounding chunk from the response, including non-Maps ones.
    pub sources: Vec<GroundingChunk>,
}

/// A source of hospital search results.
pub trait HospitalSearch: Send + Sync {
    fn search(
        &self,
        filters: &SearchFilters,
        coordinates: Option<Coordinates>,
    ) -> impl Future<Output = Result<SearchResults, SearchError>> + Send;
}

pub struct ResultSynthesizer {
    client: GeminiClient,
    extractor: Box<dyn ImageUrlExtractor>,
    estimator: Box<dyn Estimator>,
}

impl ResultSynthesizer {
    /// Regex image extraction and an entropy-seeded estimator.
    #[must_use]
    pub fn new(client: GeminiClient) -> Self {
        Self {
            client,
            extractor: Box::new(TextImageExtractor),
            estimator: Box::new(RandomEstimator::new()),
        }
    }

    /// Builds the client from configuration and seeds the estimator when
    /// `estimator_seed` is set.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if the Gemini client cannot be constructed.
    pub fn from_config(config: &hospi_core::AppConfig) -> Result<Self, SearchError> {
        let synthesizer = Self::new(GeminiClient::from_config(config)?);
        Ok(match config.estimator_seed {
            Some(seed) => synthesizer.with_estimator(RandomEstimator::seeded(seed)),
            None => synthesizer,
        })
    }

    #[must_use]
    pub fn with_estimator(mut self, estimator: impl Estimator + 'static) -> Self {
        self.estimator = Box::new(estimator);
        self
    }

    #[must_use]
    pub fn with_extractor(mut self, extractor: impl ImageUrlExtractor + 'static) -> Self {
        self.extractor = Box::new(extractor);
        self
    }
}

impl HospitalSearch for ResultSynthesizer {
    async fn search(
        &self,
        filters: &SearchFilters,
        coordinates: Option<Coordinates>,
    ) -> Result<SearchResults, SearchError> {
        tracing::info!(
            query = %filters.query,
            location = %filters.location,
            has_coordinates = coordinates.is_some(),
            model = self.client.model(),
            "searching hospitals"
        );

        let request = build_request(filters, coordinates);
        let response = self.client.generate_content(&request).await?;

        let raw_text = response.text();
        let sources = response.into_grounding_chunks();
        tracing::debug!(raw_text = %raw_text, "grounded answer text");
        let hospitals = synthesize_hospitals(
            &raw_text,
            &sources,
            &filters.location,
            self.extractor.as_ref(),
            self.estimator.as_ref(),
            Utc::now().timestamp_millis(),
        );

        tracing::info!(
            hospitals = hospitals.len(),
            sources = sources.len(),
            "hospital search complete"
        );

        Ok(SearchResults {
            hospitals,
            raw_text,
            sources,
        })
    }
}

/// Builds one hospital per Maps-annotated chunk, in chunk order.
///
/// The `i`-th Maps chunk takes the `i`-th extracted image URL when it starts
/// with `http`; otherwise the name's fallback image.
#[must_use]
pub fn synthesize_hospitals(
    raw_text: &str,
    chunks: &[GroundingChunk],
    location: &str,
    extractor: &dyn ImageUrlExtractor,
    estimator: &dyn Estimator,
    timestamp_ms: i64,
) -> Vec<Hospital> {
    let image_urls = extractor.extract(raw_text);
    let evidence = KeywordEvidence::from_text(raw_text);
    let city = if location.is_empty() {
        DEFAULT_ADDRESS_CITY
    } else {
        location
    };

    chunks
        .iter()
        .filter_map(|chunk| chunk.maps.as_ref())
        .enumerate()
        .map(|(index, maps)| {
            let name = maps
                .title
                .clone()
                .unwrap_or_else(|| DEFAULT_HOSPITAL_NAME.to_string());

            let image_url = image_urls
                .get(index)
                .filter(|url| url.starts_with("http"))
                .cloned()
                .unwrap_or_else(|| fallback_image(&name).to_string());

            let estimate = estimator.estimate();
            let chance = estimate.specialty_chance;
            let checklist = ServiceChecklist {
                cardiac_care: evidence.cardiac || chance.cardiac_care,
                cancer_care: evidence.cancer || chance.cancer_care,
                emergency_care: true,
                neurosciences: evidence.neuro || chance.neurosciences,
                orthopaedics: evidence.ortho || chance.orthopaedics,
            };

            Hospital {
                id: format!("h-{index}-{timestamp_ms}"),
                address: format!("{name}, {ADDRESS_DISTRICT}, {city}"),
                name,
                rating: estimate.rating,
                reviews_count: estimate.reviews_count,
                phone: estimate.phone,
                distance: None,
                services: DEFAULT_SERVICES.iter().map(ToString::to_string).collect(),
                checklist,
                bed_availability: estimate.bed_availability,
                wait_time: estimate.wait_time,
                is_open: true,
                opening_hours: OPENING_HOURS.to_string(),
                image_url,
                map_url: maps.uri.clone(),
                is_verified: true,
                trust_score: TrustTier::High,
            }
        })
        .collect()
}

/// Specialty keywords present anywhere in the answer. Shared by every
/// hospital in the response.
// TODO: attribute keywords to the paragraph naming each hospital instead of the whole answer.
#[derive(Debug, Clone, Copy, Default)]
struct KeywordEvidence {
    cardiac: bool,
    cancer: bool,
    neuro: bool,
    ortho: bool,
}

impl KeywordEvidence {
    fn from_text(text: &str) -> Self {
        let lower = text.to_lowercase();
        Self {
            cardiac: lower.contains("cardiac"),
            cancer: lower.contains("cancer"),
            neuro: lower.contains("neuro"),
            ortho: lower.contains("ortho"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimate::{Estimate, SpecialtyChance};
    use crate::images::FALLBACK_IMAGES;
    use crate::types::{MapsReference, WebReference};

    struct FixedEstimator(SpecialtyChance);

    impl Estimator for FixedEstimator {
        fn estimate(&self) -> Estimate {
            Estimate {
                rating: 4.5,
                reviews_count: 1200,
                bed_availability: 12,
                wait_time: "25 mins".to_string(),
                phone: "+91 9000000000".to_string(),
                specialty_chance: self.0,
            }
        }
    }

    fn maps_chunk(title: Option<&str>, uri: &str) -> GroundingChunk {
        GroundingChunk {
            maps: Some(MapsReference {
                uri: Some(uri.to_string()),
                title: title.map(ToString::to_string),
                place_id: None,
            }),
            web: None,
        }
    }

    fn web_chunk() -> GroundingChunk {
        GroundingChunk {
            maps: None,
            web: Some(WebReference {
                uri: Some("https://example.org".to_string()),
                title: Some("example.org".to_string()),
            }),
        }
    }

    fn run(text: &str, chunks: &[GroundingChunk], location: &str) -> Vec<Hospital> {
        synthesize_hospitals(
            text,
            chunks,
            location,
            &TextImageExtractor,
            &FixedEstimator(SpecialtyChance::default()),
            1_700_000_000_000,
        )
    }

    #[test]
    fn one_hospital_per_maps_chunk_in_order() {
        let chunks = vec![
            maps_chunk(Some("Apex Heart Institute"), "https://maps.google.com/?cid=1"),
            web_chunk(),
            maps_chunk(Some("City Care Hospital"), "https://maps.google.com/?cid=2"),
        ];
        let hospitals = run("", &chunks, "Lucknow");

        assert_eq!(hospitals.len(), 2);
        assert_eq!(hospitals[0].name, "Apex Heart Institute");
        assert_eq!(hospitals[1].name, "City Care Hospital");
        assert_eq!(
            hospitals[1].map_url.as_deref(),
            Some("https://maps.google.com/?cid=2")
        );
        assert_eq!(hospitals[0].id, "h-0-1700000000000");
        assert_eq!(hospitals[1].id, "h-1-1700000000000");
    }

    #[test]
    fn missing_title_uses_default_name() {
        let hospitals = run("", &[maps_chunk(None, "https://maps.google.com/?cid=9")], "Pune");
        assert_eq!(hospitals[0].name, DEFAULT_HOSPITAL_NAME);
        assert_eq!(
            hospitals[0].address,
            "Speciality Hospital, Medical District, Pune"
        );
    }

    #[test]
    fn empty_location_uses_default_city_in_address() {
        let hospitals = run("", &[maps_chunk(Some("Metro Clinic"), "u")], "");
        assert_eq!(hospitals[0].address, "Metro Clinic, Medical District, City Center");
    }

    #[test]
    fn extracted_image_preferred_over_fallback() {
        let text = "Apex: https://apex.example.com/front.jpg";
        let chunks = vec![
            maps_chunk(Some("Apex Heart Institute"), "u1"),
            maps_chunk(Some("City Care Hospital"), "u2"),
        ];
        let hospitals = run(text, &chunks, "Lucknow");

        assert_eq!(hospitals[0].image_url, "https://apex.example.com/front.jpg");
        assert_eq!(hospitals[1].image_url, fallback_image("City Care Hospital"));
    }

    #[test]
    fn extracted_candidate_must_start_with_http() {
        struct BareExtractor;
        impl ImageUrlExtractor for BareExtractor {
            fn extract(&self, _text: &str) -> Vec<String> {
                vec!["//cdn.example.com/a.png".to_string()]
            }
        }

        let hospitals = synthesize_hospitals(
            "",
            &[maps_chunk(Some("Apex Heart Institute"), "u")],
            "Lucknow",
            &BareExtractor,
            &FixedEstimator(SpecialtyChance::default()),
            0,
        );
        assert_eq!(hospitals[0].image_url, fallback_image("Apex Heart Institute"));
    }

    #[test]
    fn every_hospital_has_an_image() {
        let chunks: Vec<_> = (0..12)
            .map(|i| maps_chunk(Some(&format!("Hospital {i}")), "u"))
            .collect();
        for hospital in run("", &chunks, "Lucknow") {
            assert!(FALLBACK_IMAGES.contains(&hospital.image_url.as_str()));
        }
    }

    #[test]
    fn keywords_in_answer_set_checklist_flags() {
        let text = "Offers CARDIAC surgery, a Cancer centre, Neurology and Orthopaedics.";
        let hospitals = run(text, &[maps_chunk(Some("Apex"), "u")], "Lucknow");
        assert_eq!(
            hospitals[0].checklist,
            ServiceChecklist {
                cardiac_care: true,
                cancer_care: true,
                emergency_care: true,
                neurosciences: true,
                orthopaedics: true,
            }
        );
    }

    #[test]
    fn without_keywords_flags_follow_chance_and_emergency_is_always_set() {
        let chance = SpecialtyChance {
            cardiac_care: false,
            cancer_care: true,
            neurosciences: false,
            orthopaedics: true,
        };
        let hospitals = synthesize_hospitals(
            "General ward only.",
            &[maps_chunk(Some("Apex"), "u")],
            "Lucknow",
            &TextImageExtractor,
            &FixedEstimator(chance),
            0,
        );
        let checklist = hospitals[0].checklist;
        assert!(!checklist.cardiac_care);
        assert!(checklist.cancer_care);
        assert!(checklist.emergency_care);
        assert!(!checklist.neurosciences);
        assert!(checklist.orthopaedics);
    }

    #[test]
    fn constant_fields_are_filled() {
        let hospitals = run("", &[maps_chunk(Some("Apex"), "u")], "Lucknow");
        let h = &hospitals[0];
        assert_eq!(h.services, vec!["Radiology", "Diagnostics", "In-patient"]);
        assert!(h.is_open);
        assert_eq!(h.opening_hours, "Open 24 Hours");
        assert!(h.is_verified);
        assert_eq!(h.trust_score, TrustTier::High);
        assert_eq!(h.wait_time, "25 mins");
        assert_eq!(h.bed_availability, 12);
        assert!(h.distance.is_none());
    }

    #[test]
    fn cardiology_in_lucknow_example() {
        let chunks = vec![
            maps_chunk(Some("Apex Heart Institute"), "u1"),
            maps_chunk(Some("City Care Hospital"), "u2"),
        ];
        let hospitals = synthesize_hospitals(
            "Two hospitals found.",
            &chunks,
            "Lucknow",
            &TextImageExtractor,
            &RandomEstimator::seeded(3),
            0,
        );

        assert_eq!(hospitals.len(), 2);
        for h in &hospitals {
            assert_eq!(h.image_url, fallback_image(&h.name));
            assert!(h.checklist.emergency_care);
            assert!((4.2..4.9).contains(&h.rating), "rating {}", h.rating);
        }
    }
}
