use crate::Category;

#[derive(Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub places_base_url: String,
    pub request_timeout_secs: u64,
    pub location_timeout_secs: u64,
    pub user_agent: String,
    pub default_category: Category,
    pub map_zoom: u8,
    pub maps_api_key: Option<String>,
    pub geolocation_url: Option<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field("places_base_url", &self.places_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("location_timeout_secs", &self.location_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("default_category", &self.default_category)
            .field("map_zoom", &self.map_zoom)
            .field(
                "maps_api_key",
                &self.maps_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("geolocation_url", &self.geolocation_url)
            .finish()
    }
}
