//! Placeholder values for fields the grounded answer does not carry.
//!
//! Ratings, review counts, occupancy, wait time and phone numbers are not
//! returned by the Maps grounding references, so they are generated. The
//! generator sits behind [`Estimator`] so tests can pin every value.

use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const WAIT_TIME_LABELS: [&str; 4] = ["10 mins", "25 mins", "45 mins", "15 mins"];

const RATING_FLOOR: f64 = 4.2;
const RATING_SPREAD: f64 = 0.7;

/// Per-field random specialty flags, OR-ed with keyword evidence from the
/// answer text by the synthesizer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpecialtyChance {
    pub cardiac_care: bool,
    pub cancer_care: bool,
    pub neurosciences: bool,
    pub orthopaedics: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Estimate {
    /// In `[4.2, 4.9)`.
    pub rating: f64,
    /// In `[200, 5200)`.
    pub reviews_count: u32,
    /// In `[3, 48)`.
    pub bed_availability: u32,
    /// One of [`WAIT_TIME_LABELS`].
    pub wait_time: String,
    /// `+91 ` followed by a number in `[8800000000, 9999999999)`. Not a real line.
    pub phone: String,
    pub specialty_chance: SpecialtyChance,
}

pub trait Estimator: Send + Sync {
    fn estimate(&self) -> Estimate;
}

/// [`Estimator`] backed by a `StdRng`. Seed it for reproducible output.
pub struct RandomEstimator {
    rng: Mutex<StdRng>,
}

impl RandomEstimator {
    /// Seeded from OS entropy.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomEstimator {
    fn default() -> Self {
        Self::new()
    }
}

impl Estimator for RandomEstimator {
    fn estimate(&self) -> Estimate {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);

        let specialty_chance = SpecialtyChance {
            cardiac_care: rng.random::<f64>() > 0.5,
            cancer_care: rng.random::<f64>() > 0.6,
            neurosciences: rng.random::<f64>() > 0.7,
            orthopaedics: rng.random::<f64>() > 0.4,
        };

        Estimate {
            rating: RATING_FLOOR + rng.random::<f64>() * RATING_SPREAD,
            reviews_count: rng.random_range(200..5200),
            bed_availability: rng.random_range(3..48),
            wait_time: WAIT_TIME_LABELS[rng.random_range(0..WAIT_TIME_LABELS.len())].to_string(),
            phone: format!("+91 {}", rng.random_range(8_800_000_000_u64..9_999_999_999)),
            specialty_chance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estimates_stay_within_bands() {
        let estimator = RandomEstimator::seeded(7);
        for _ in 0..500 {
            let e = estimator.estimate();
            assert!((4.2..4.9).contains(&e.rating), "rating {}", e.rating);
            assert!((200..5200).contains(&e.reviews_count));
            assert!((3..48).contains(&e.bed_availability));
            assert!(WAIT_TIME_LABELS.contains(&e.wait_time.as_str()));
            let digits = e.phone.strip_prefix("+91 ").expect("country prefix");
            let number: u64 = digits.parse().expect("numeric phone");
            assert!((8_800_000_000..9_999_999_999).contains(&number));
        }
    }

    #[test]
    fn same_seed_gives_same_sequence() {
        let a = RandomEstimator::seeded(42);
        let b = RandomEstimator::seeded(42);
        for _ in 0..10 {
            assert_eq!(a.estimate(), b.estimate());
        }
    }

    #[test]
    fn specialty_chance_varies_across_draws() {
        let estimator = RandomEstimator::seeded(1);
        let draws: Vec<_> = (0..200).map(|_| estimator.estimate().specialty_chance).collect();
        assert!(draws.iter().any(|c| c.orthopaedics));
        assert!(draws.iter().any(|c| !c.neurosciences));
    }
}
