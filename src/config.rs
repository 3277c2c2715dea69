//! Runtime settings shared by the API client and the management screens.
//! Everything has a sensible default; only the API base can be changed at
//! build time through `TEACHER_REVIEW_API_BASE`.
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "/api";

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    /// Prefix prepended to every backend path, e.g. `/api`.
    pub api_base: String,
    /// Client-wide request timeout.
    pub request_timeout: Duration,
    /// Upper bound on `page_size` for the admin list screens.
    pub page_size_ceiling: u32,
    /// Page size the backend uses for the public teacher browser.
    pub browse_page_size: u32,
    /// How long a toast stays on screen.
    pub toast_duration: Duration,
    /// Largest teacher portrait accepted before upload.
    pub max_image_bytes: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            request_timeout: Duration::from_secs(10),
            page_size_ceiling: 100,
            browse_page_size: 20,
            toast_duration: Duration::from_secs(4),
            max_image_bytes: 5 * 1024 * 1024,
        }
    }
}

impl AppConfig {
    /// Defaults, with the API base taken from the build environment if set.
    pub fn from_env() -> Self {
        Self::with_api_base(option_env!("TEACHER_REVIEW_API_BASE"))
    }

    fn with_api_base(base: Option<&str>) -> Self {
        let mut config = Self::default();
        if let Some(base) = base.map(str::trim).filter(|base| !base.is_empty()) {
            config.api_base = base.trim_end_matches('/').to_string();
        }
        config
    }

    /// Joins the API base and a backend path such as `/teachers/`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_backend_contract() {
        let config = AppConfig::default();
        assert_eq!(config.api_base, "/api");
        assert_eq!(config.page_size_ceiling, 100);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.max_image_bytes, 5_242_880);
    }

    #[test]
    fn test_api_base_override_strips_trailing_slash() {
        let config = AppConfig::with_api_base(Some("https://reviews.example.edu/api/"));
        assert_eq!(
            config.endpoint("/teachers/"),
            "https://reviews.example.edu/api/teachers/"
        );
    }

    #[test]
    fn test_blank_override_is_ignored() {
        let config = AppConfig::with_api_base(Some("   "));
        assert_eq!(config.api_base, DEFAULT_API_BASE);
    }
}
