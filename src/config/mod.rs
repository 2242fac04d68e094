//! Service configuration, loaded from the environment once at startup.
//!
//! Every component receives its settings explicitly from this struct;
//! there is no global config or debug toggle.

use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct Config {
    // ── LLM Configuration
    pub openai_base_url: String,
    pub openai_api_key: String,
    pub chat_model: String,
    pub plan_model: String,
    pub title_model: String,
    pub max_output_tokens: u32,

    // ── Database Configuration
    pub database_url: String,
    pub sqlite_max_connections: u32,

    // ── Orchestrator Settings
    pub max_tool_rounds: usize,

    // ── Server Configuration
    pub host: String,
    pub port: u16,

    // ── Test/Bootstrap Paths
    /// Gates the travel-concierge auth bypass and the insert-course route.
    /// Must never be enabled in production deployments.
    pub allow_test_bypass: bool,

    // ── Logging
    pub log_level: String,
}

/// Parse an environment variable, falling back to a default.
/// Trailing comments and whitespace in the value are stripped before parsing.
fn env_var_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
{
    match std::env::var(key) {
        Ok(val) => {
            let clean = val.split('#').next().unwrap_or("").trim();
            clean.parse::<T>().unwrap_or(default)
        }
        Err(_) => default,
    }
}

impl Config {
    pub fn from_env() -> Self {
        // Load .env if present; plain environment variables otherwise.
        let _ = dotenvy::dotenv();

        Self {
            openai_base_url: env_var_or("OPENAI_BASE_URL", "https://api.openai.com".to_string()),
            openai_api_key: env_var_or("OPENAI_API_KEY", String::new()),
            chat_model: env_var_or("CONCIERGE_CHAT_MODEL", "gpt-4o".to_string()),
            plan_model: env_var_or("CONCIERGE_PLAN_MODEL", "gpt-3.5-turbo".to_string()),
            title_model: env_var_or("CONCIERGE_TITLE_MODEL", "gpt-3.5-turbo".to_string()),
            max_output_tokens: env_var_or("CONCIERGE_MAX_OUTPUT_TOKENS", 4096),
            database_url: env_var_or("DATABASE_URL", "sqlite:./concierge.db".to_string()),
            sqlite_max_connections: env_var_or("SQLITE_MAX_CONNECTIONS", 5),
            max_tool_rounds: env_var_or("CONCIERGE_MAX_TOOL_ROUNDS", 5),
            host: env_var_or("CONCIERGE_HOST", "127.0.0.1".to_string()),
            port: env_var_or("CONCIERGE_PORT", 8787),
            allow_test_bypass: env_var_or("CONCIERGE_ALLOW_TEST_BYPASS", false),
            log_level: env_var_or("CONCIERGE_LOG_LEVEL", "info".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_var_or_strips_comments() {
        std::env::set_var("CONCIERGE_TEST_PORT", "9000 # local override");
        let port: u16 = env_var_or("CONCIERGE_TEST_PORT", 8787);
        assert_eq!(port, 9000);
        std::env::remove_var("CONCIERGE_TEST_PORT");
    }

    #[test]
    fn test_env_var_or_default_on_missing() {
        let rounds: usize = env_var_or("CONCIERGE_TEST_MISSING", 5);
        assert_eq!(rounds, 5);
    }
}
