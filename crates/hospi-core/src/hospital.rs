//! Normalized hospital records produced by a search.
//!
//! Field names serialize in camelCase so the JSON shape matches what browser
//! clients render directly.

use serde::{Deserialize, Serialize};

/// A best-effort device position used to bias map grounding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Coarse confidence label for a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TrustTier {
    #[default]
    High,
    Medium,
    Low,
}

/// Fixed-shape specialty checklist. Every flag is always present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceChecklist {
    pub cardiac_care: bool,
    pub cancer_care: bool,
    pub emergency_care: bool,
    pub neurosciences: bool,
    pub orthopaedics: bool,
}

impl ServiceChecklist {
    /// Labelled flags in display order.
    #[must_use]
    pub fn entries(&self) -> [(&'static str, bool); 5] {
        [
            ("Cardiac Care", self.cardiac_care),
            ("Cancer Care", self.cancer_care),
            ("Emergency Care", self.emergency_care),
            ("Neurosciences", self.neurosciences),
            ("Orthopaedics", self.orthopaedics),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hospital {
    /// Unique within one response only.
    pub id: String,
    pub name: String,
    pub rating: f64,
    pub reviews_count: u32,
    pub address: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<String>,
    pub services: Vec<String>,
    pub checklist: ServiceChecklist,
    pub bed_availability: u32,
    pub wait_time: String,
    pub is_open: bool,
    pub opening_hours: String,
    /// Never empty.
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_url: Option<String>,
    pub is_verified: bool,
    pub trust_score: TrustTier,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checklist_serializes_all_five_keys() {
        let json = serde_json::to_value(ServiceChecklist::default()).expect("serialize");
        let obj = json.as_object().expect("object");
        for key in [
            "cardiacCare",
            "cancerCare",
            "emergencyCare",
            "neurosciences",
            "orthopaedics",
        ] {
            assert!(obj[key].is_boolean(), "missing boolean {key}: {json}");
        }
        assert_eq!(obj.len(), 5);
    }

    #[test]
    fn trust_tier_serializes_as_label() {
        let json = serde_json::to_string(&TrustTier::High).expect("serialize");
        assert_eq!(json, "\"High\"");
    }

    #[test]
    fn checklist_entries_follow_display_order() {
        let checklist = ServiceChecklist {
            emergency_care: true,
            ..ServiceChecklist::default()
        };
        let labels: Vec<_> = checklist.entries().iter().map(|(l, _)| *l).collect();
        assert_eq!(labels[2], "Emergency Care");
        assert!(checklist.entries()[2].1);
        assert!(!checklist.entries()[0].1);
    }
}
