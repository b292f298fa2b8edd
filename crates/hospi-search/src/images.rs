//! Hospital image selection: URLs pulled from the model's answer text, with a
//! deterministic stock-photo fallback keyed on the hospital name.

use std::sync::LazyLock;

use regex::Regex;

/// Stock photos used when no usable image URL was found for a hospital.
pub const FALLBACK_IMAGES: [&str; 8] = [
    "https://images.unsplash.com/photo-1587351021759-3e566b6af7cc?auto=format&fit=crop&q=80&w=1200",
    "https://images.unsplash.com/photo-1519494026892-80bbd2d6fd0d?auto=format&fit=crop&q=80&w=1200",
    "https://images.unsplash.com/photo-1586773860418-d3b3a998dc55?auto=format&fit=crop&q=80&w=1200",
    "https://images.unsplash.com/photo-1516549655169-df83a0774514?auto=format&fit=crop&q=80&w=1200",
    "https://images.unsplash.com/photo-1512678080530-7760d81faba6?auto=format&fit=crop&q=80&w=1200",
    "https://images.unsplash.com/photo-1551076805-e1869033e561?auto=format&fit=crop&q=80&w=1200",
    "https://images.unsplash.com/photo-1504813184591-01592f259ee2?auto=format&fit=crop&q=80&w=1200",
    "https://images.unsplash.com/photo-1538108190963-840e28c30999?auto=format&fit=crop&q=80&w=1200",
];

static IMAGE_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)https?://\S+?\.(?:jpg|jpeg|png|webp)").expect("valid image url regex")
});

/// Pulls candidate image URLs out of free-form answer text.
pub trait ImageUrlExtractor: Send + Sync {
    /// Candidate URLs in order of appearance.
    fn extract(&self, text: &str) -> Vec<String>;
}

/// Regex scan for `http(s)` URLs ending in `.jpg`, `.jpeg`, `.png` or
/// `.webp`, case-insensitive. Matching is lazy: a URL ends at the first
/// allowed extension.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextImageExtractor;

impl ImageUrlExtractor for TextImageExtractor {
    fn extract(&self, text: &str) -> Vec<String> {
        IMAGE_URL_RE
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

/// Index into [`FALLBACK_IMAGES`]: the sum of the name's UTF-16 code units
/// modulo the pool size. Collisions between names are expected.
#[must_use]
pub fn fallback_image_index(name: &str) -> usize {
    let pool = FALLBACK_IMAGES.len();
    name.encode_utf16()
        .fold(0usize, |acc, unit| (acc + usize::from(unit)) % pool)
}

/// The stock photo for `name`. Same name, same photo, on every call.
#[must_use]
pub fn fallback_image(name: &str) -> &'static str {
    FALLBACK_IMAGES[fallback_image_index(name)]
}
