use crate::app_config::AppConfig;
use crate::{Category, ConfigError};

/// Highest zoom level accepted by the map provider.
const MAX_MAP_ZOOM: u8 = 21;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable holds an invalid value.
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
/// Returns `ConfigError` if a variable holds an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it with a
/// plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    // Empty values count as unset for optional settings.
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_secs = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let secs = or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))?;
        if secs == 0 {
            return Err(invalid(var, "timeout must be at least 1 second".to_string()));
        }
        Ok(secs)
    };

    let log_level = or_default("NEARBY_LOG_LEVEL", "info");

    let places_base_url = or_default("NEARBY_PLACES_BASE_URL", "http://127.0.0.1:8000");
    if !(places_base_url.starts_with("http://") || places_base_url.starts_with("https://")) {
        return Err(invalid(
            "NEARBY_PLACES_BASE_URL",
            format!("expected an http(s) URL, got '{places_base_url}'"),
        ));
    }

    let request_timeout_secs = parse_secs("NEARBY_REQUEST_TIMEOUT_SECS", "30")?;
    let location_timeout_secs = parse_secs("NEARBY_LOCATION_TIMEOUT_SECS", "10")?;
    let user_agent = or_default("NEARBY_USER_AGENT", "nearby/0.1 (place-recommendations)");

    let default_category = or_default("NEARBY_DEFAULT_CATEGORY", Category::default().as_str())
        .parse::<Category>()
        .map_err(|e| invalid("NEARBY_DEFAULT_CATEGORY", e.to_string()))?;

    let map_zoom = or_default("NEARBY_MAP_ZOOM", "15")
        .parse::<u8>()
        .map_err(|e| invalid("NEARBY_MAP_ZOOM", e.to_string()))?;
    if map_zoom > MAX_MAP_ZOOM {
        return Err(invalid(
            "NEARBY_MAP_ZOOM",
            format!("zoom must be at most {MAX_MAP_ZOOM}, got {map_zoom}"),
        ));
    }

    let maps_api_key = optional("NEARBY_MAPS_API_KEY");
    let geolocation_url = optional("NEARBY_GEOLOCATION_URL");

    Ok(AppConfig {
        log_level,
        places_base_url,
        request_timeout_secs,
        location_timeout_secs,
        user_agent,
        default_category,
        map_zoom,
        maps_api_key,
        geolocation_url,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
