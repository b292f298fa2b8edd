//! Best-effort device position.

use std::future::Future;

use hospi_core::Coordinates;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeolocationError {
    #[error("location access denied: {0}")]
    Denied(String),

    #[error("location unavailable")]
    Unavailable,
}

pub trait GeolocationProvider: Send + Sync {
    fn current_position(&self) -> impl Future<Output = Result<Coordinates, GeolocationError>> + Send;
}

/// Position taken from configuration. `None` behaves like a device with no fix.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedPosition(pub Option<Coordinates>);

impl GeolocationProvider for FixedPosition {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        self.0.ok_or(GeolocationError::Unavailable)
    }
}

/// Resolves a position, logging and swallowing any failure.
pub async fn resolve_position<G: GeolocationProvider>(provider: &G) -> Option<Coordinates> {
    match provider.current_position().await {
        Ok(coordinates) => {
            tracing::debug!(
                latitude = coordinates.latitude,
                longitude = coordinates.longitude,
                "location resolved"
            );
            Some(coordinates)
        }
        Err(e) => {
            tracing::warn!(error = %e, "location access failed; searching without coordinates");
            None
        }
    }
}
