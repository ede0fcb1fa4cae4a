use std::env;
use std::time::Duration;

use crate::api::gamebanana::GameBananaClient;
use crate::services::likes_service::FetchPolicy;

/// Server configuration derived from environment variables (and `.env`)
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind: String,
    pub port: u16,
    pub api_base_url: String,
    pub fetch_policy: FetchPolicy,
    pub default_section: String,
    pub default_id: String,
    pub http_timeout: Duration,
    /// `max-age` of successful graph responses
    pub cache_max_age_secs: u64,
}

fn env_str(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = FetchPolicy::default();

        Self {
            bind: env_str("BIND", "0.0.0.0"),
            port: env_parse("PORT", 3000),
            api_base_url: env_str("GAMEBANANA_API_URL", GameBananaClient::DEFAULT_BASE_URL),
            fetch_policy: FetchPolicy {
                max_pages: env_parse("LIKES_MAX_PAGES", defaults.max_pages).max(1),
                batch_size: env_parse("LIKES_BATCH_SIZE", defaults.batch_size).max(1),
            },
            default_section: env_str("DEFAULT_SECTION", "Tool"),
            default_id: env_str("DEFAULT_ID", "19049"),
            http_timeout: Duration::from_secs(env_parse("HTTP_TIMEOUT_SECS", 10)),
            cache_max_age_secs: env_parse("CACHE_MAX_AGE_SECS", 3600),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_helpers_fall_back_to_defaults() {
        assert_eq!(env_str("BANANA_LIKES_TEST_UNSET_STR", "Tool"), "Tool");
        assert_eq!(env_parse("BANANA_LIKES_TEST_UNSET_NUM", 250u32), 250);
    }

    #[test]
    fn test_env_parse_reads_and_rejects() {
        env::set_var("BANANA_LIKES_TEST_PAGES", " 40 ");
        assert_eq!(env_parse("BANANA_LIKES_TEST_PAGES", 250u32), 40);

        env::set_var("BANANA_LIKES_TEST_PAGES_BAD", "lots");
        assert_eq!(env_parse("BANANA_LIKES_TEST_PAGES_BAD", 250u32), 250);

        env::set_var("BANANA_LIKES_TEST_BLANK", "   ");
        assert_eq!(env_str("BANANA_LIKES_TEST_BLANK", "Tool"), "Tool");
    }
}
