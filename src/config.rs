use crate::error::{Error, Result};
use crate::generation::AnswerFormat;
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;
use std::time::Duration;

const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-pro-latest";

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_ttl_hours: i64,
    pub admin_emails: Vec<String>,
    pub gemini: GeminiSettings,
    pub model_timeout: Duration,
    pub max_ai_questions: usize,
    pub answer_format: AnswerFormat,
    pub app_env: String,
}

/// Everything the Gemini client needs, fixed at startup.
#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
    pub safety_threshold: String,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            temperature: 0.9,
            top_p: 0.95,
            top_k: 64,
            max_output_tokens: 8192,
            safety_threshold: "BLOCK_ONLY_HIGH".to_string(),
        }
    }
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let gemini = GeminiSettings {
            api_key: env::var("GEMINI_API_KEY").unwrap_or_default(),
            base_url: get_env_or("GEMINI_BASE_URL", DEFAULT_GEMINI_BASE_URL),
            model: get_env_or("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
            ..GeminiSettings::default()
        };

        Ok(Self {
            server_address: get_env("SERVER_ADDRESS")?,
            database_url: get_env("DATABASE_URL")?,
            jwt_secret: get_env("JWT_SECRET")?,
            jwt_ttl_hours: get_env_parse_or("JWT_TTL_HOURS", 24)?,
            admin_emails: parse_list(&env::var("ADMIN_EMAILS").unwrap_or_default()),
            gemini,
            model_timeout: Duration::from_secs(get_env_parse_or("MODEL_TIMEOUT_SECS", 60)?),
            max_ai_questions: get_env_parse_or("MAX_AI_QUESTIONS", 30)?,
            answer_format: get_env_parse_or("ANSWER_FORMAT", AnswerFormat::Letter)?,
            app_env: get_env_or("APP_ENV", "production"),
        })
    }

    pub fn is_admin_email(&self, email: &str) -> bool {
        self.admin_emails
            .iter()
            .any(|admin| admin.eq_ignore_ascii_case(email.trim()))
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}

/// Internal error detail is only rendered in development deployments.
pub fn expose_error_details() -> bool {
    CONFIG
        .get()
        .map(|c| c.app_env.eq_ignore_ascii_case("development"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_list_is_trimmed_and_lowercased() {
        assert_eq!(
            parse_list(" Root@Example.com, ,ops@example.com "),
            vec!["root@example.com".to_string(), "ops@example.com".to_string()]
        );
        assert!(parse_list("").is_empty());
    }

    #[test]
    fn gemini_defaults_match_generation_profile() {
        let s = GeminiSettings::default();
        assert_eq!(s.model, "gemini-1.5-pro-latest");
        assert_eq!(s.top_k, 64);
        assert_eq!(s.max_output_tokens, 8192);
        assert_eq!(s.safety_threshold, "BLOCK_ONLY_HIGH");
    }
}
