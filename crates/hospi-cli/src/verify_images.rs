use std::time::Duration;

use futures::stream::{self, StreamExt};
use hospi_core::Hospital;
use hospi_search::fallback_image;

/// Requests every card image and swaps each one that does not load for the
/// hospital's fallback photo. Returns the number of cards changed.
pub(crate) async fn verify_images(
    hospitals: &mut [Hospital],
    concurrency: usize,
) -> anyhow::Result<usize> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(12))
        .user_agent("hospi-verifier/1.0")
        .build()?;

    let checks = stream::iter(hospitals.iter().enumerate().map(|(index, hospital)| {
        let client = client.clone();
        let url = hospital.image_url.clone();
        async move {
            let result = client.get(&url).send().await;
            (index, url, result)
        }
    }))
    .buffer_unordered(concurrency.max(1))
    .collect::<Vec<_>>()
    .await;

    let mut replaced = 0usize;
    for (index, url, result) in checks {
        match result {
            Ok(resp) if resp.status().is_success() => continue,
            Ok(resp) => {
                tracing::warn!(
                    status = resp.status().as_u16(),
                    url = %url,
                    "image failed to load"
                );
            }
            Err(e) => {
                tracing::warn!(error = %e, url = %url, "image failed to load");
            }
        }

        let hospital = &mut hospitals[index];
        let fallback = fallback_image(&hospital.name);
        if hospital.image_url != fallback {
            hospital.image_url = fallback.to_string();
            replaced += 1;
        }
    }

    Ok(replaced)
}
