use crate::app_config::{AppConfig, Environment};
use crate::filters::{DEFAULT_LOCATION, DEFAULT_QUERY};
use crate::hospital::Coordinates;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let optional_f64 = |var: &str| -> Result<Option<f64>, ConfigError> {
        match lookup(var) {
            Ok(raw) => raw
                .trim()
                .parse::<f64>()
                .map(Some)
                .map_err(|e| invalid(var, e.to_string())),
            Err(_) => Ok(None),
        }
    };

    let env = parse_environment(&or_default("HOSPI_ENV", "development"))?;

    let bind_addr = or_default("HOSPI_BIND_ADDR", "0.0.0.0:3000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("HOSPI_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("HOSPI_LOG_LEVEL", "info");

    let gemini_api_key = lookup("GEMINI_API_KEY")
        .ok()
        .filter(|key| !key.trim().is_empty());
    let gemini_model = or_default("HOSPI_GEMINI_MODEL", "gemini-2.5-flash");
    let gemini_base_url = or_default(
        "HOSPI_GEMINI_BASE_URL",
        "https://generativelanguage.googleapis.com/",
    );
    let gemini_timeout_secs = parse_u64("HOSPI_GEMINI_TIMEOUT_SECS", "60")?;

    let default_query = or_default("HOSPI_DEFAULT_QUERY", DEFAULT_QUERY);
    let default_location = or_default("HOSPI_DEFAULT_LOCATION", DEFAULT_LOCATION);

    let estimator_seed = match lookup("HOSPI_ESTIMATOR_SEED") {
        Ok(raw) => Some(
            raw.parse::<u64>()
                .map_err(|e| invalid("HOSPI_ESTIMATOR_SEED", e.to_string()))?,
        ),
        Err(_) => None,
    };

    let latitude = optional_f64("HOSPI_USER_LATITUDE")?;
    let longitude = optional_f64("HOSPI_USER_LONGITUDE")?;
    let user_coordinates = match (latitude, longitude) {
        (Some(latitude), Some(longitude)) => Some(validate_coordinates(latitude, longitude)?),
        (Some(_), None) => {
            return Err(ConfigError::MissingEnvVar(
                "HOSPI_USER_LONGITUDE".to_string(),
            ))
        }
        (None, Some(_)) => {
            return Err(ConfigError::MissingEnvVar(
                "HOSPI_USER_LATITUDE".to_string(),
            ))
        }
        (None, None) => None,
    };

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        gemini_api_key,
        gemini_model,
        gemini_base_url,
        gemini_timeout_secs,
        default_query,
        default_location,
        estimator_seed,
        user_coordinates,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than
/// `development`, `test` or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "HOSPI_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

fn validate_coordinates(latitude: f64, longitude: f64) -> Result<Coordinates, ConfigError> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(ConfigError::InvalidEnvVar {
            var: "HOSPI_USER_LATITUDE".to_string(),
            reason: format!("{latitude} is outside -90..=90"),
        });
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(ConfigError::InvalidEnvVar {
            var: "HOSPI_USER_LONGITUDE".to_string(),
            reason: format!("{longitude} is outside -180..=180"),
        });
    }
    Ok(Coordinates {
        latitude,
        longitude,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
