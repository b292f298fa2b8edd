//! Hospital search against Gemini with Maps and Search grounding.
//!
//! [`ResultSynthesizer`] turns one `generateContent` response into
//! [`hospi_core::Hospital`] records; [`SearchController`] owns the view state
//! that presentation layers render.

pub mod client;
pub mod controller;
pub mod error;
pub mod estimate;
pub mod geolocation;
pub mod images;
pub mod prompt;
pub mod synthesizer;
pub mod types;

pub use client::GeminiClient;
pub use controller::{
    SearchController, SearchOutcome, SearchSnapshot, ViewState, SEARCH_FAILED_MESSAGE,
};
pub use error::SearchError;
pub use estimate::{Estimate, Estimator, RandomEstimator, SpecialtyChance};
pub use geolocation::{resolve_position, FixedPosition, GeolocationError, GeolocationProvider};
pub use images::{fallback_image, fallback_image_index, ImageUrlExtractor, TextImageExtractor};
pub use synthesizer::{HospitalSearch, ResultSynthesizer, SearchResults};
pub use types::GroundingChunk;
