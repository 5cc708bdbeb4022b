// --- File: src/config.rs ---

use crate::utils::{ensure_dotenv_loaded, env_opt};
use std::fmt;

/// Currency used when the merchant config does not name one (Zambian Kwacha).
pub const DEFAULT_CURRENCY: &str = "ZMW";
/// Country used for mobile money routing when neither the call nor the config names one.
pub const DEFAULT_COUNTRY: &str = "Zambia";
/// DPO API v6 endpoint every request document is posted to.
pub const DEFAULT_ENDPOINT: &str = "https://api.directpay.online/API/v6/";
/// Hosted payment page the customer is sent to with `?ID={token}`.
pub const DEFAULT_PAYMENT_URL: &str = "https://secure.3gdirectpay.com/";

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing {0} env var")]
    Missing(&'static str),
    #[error("Invalid {0}: {1}")]
    Invalid(&'static str, String),
}

/// Merchant configuration for the DPO gateway.
///
/// Immutable once constructed. `currency` and `country` fall back to
/// [`DEFAULT_CURRENCY`] and [`DEFAULT_COUNTRY`] when absent.
///
/// The `Debug` implementation redacts `company_token`.
#[derive(Clone, PartialEq, Eq)]
pub struct DpoConfig {
    pub redirect_url: String,
    pub back_url: String,
    pub company_token: String,
    pub service_id: String,
    pub currency: Option<String>,
    pub country: Option<String>,
}

impl fmt::Debug for DpoConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DpoConfig")
            .field("redirect_url", &self.redirect_url)
            .field("back_url", &self.back_url)
            .field("company_token", &"[REDACTED]")
            .field("service_id", &self.service_id)
            .field("currency", &self.currency)
            .field("country", &self.country)
            .finish()
    }
}

impl DpoConfig {
    /// Loads the DPO configuration from environment variables.
    ///
    /// Required: `DPO_REDIRECT_URL`, `DPO_BACK_URL`, `DPO_COMPANY_TOKEN`,
    /// `DPO_SERVICE_ID`. Optional: `DPO_CURRENCY`, `DPO_COUNTRY`.
    pub fn load() -> Result<Self, ConfigError> {
        ensure_dotenv_loaded();
        Ok(Self {
            redirect_url: required("DPO_REDIRECT_URL")?,
            back_url: required("DPO_BACK_URL")?,
            company_token: required("DPO_COMPANY_TOKEN")?,
            service_id: required("DPO_SERVICE_ID")?,
            currency: env_opt("DPO_CURRENCY"),
            country: env_opt("DPO_COUNTRY"),
        })
    }

    /// Currency sent with `createToken`.
    pub fn currency(&self) -> &str {
        non_blank(self.currency.as_deref()).unwrap_or(DEFAULT_CURRENCY)
    }

    /// Country used for mobile money when the caller gives none.
    pub fn country(&self) -> &str {
        non_blank(self.country.as_deref()).unwrap_or(DEFAULT_COUNTRY)
    }
}

/// The two fixed gateway URLs: the API endpoint and the hosted payment page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub api_url: String,
    pub payment_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_ENDPOINT.to_string(),
            payment_url: DEFAULT_PAYMENT_URL.to_string(),
        }
    }
}

/// A static record of placeholder values, with the endpoint pair exposed as
/// overridable fields. Not read by [`DpoConfig::load`]; useful for wiring a
/// client against a sandbox or a mock gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentConfig {
    pub endpoint: String,
    pub payment_url: String,
    pub redirect_url: String,
    pub back_url: String,
    pub company_token: String,
    pub service_id: String,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://example.com/api".to_string(),
            payment_url: "https://example.com/pay".to_string(),
            redirect_url: "https://example.com/redirect".to_string(),
            back_url: "https://example.com/back".to_string(),
            company_token: "YOUR_COMPANY_TOKEN".to_string(),
            service_id: "YOUR_SERVICE_ID".to_string(),
        }
    }
}

impl PaymentConfig {
    /// Splits the record into client configuration and endpoints.
    pub fn split(self) -> (DpoConfig, Endpoints) {
        (
            DpoConfig {
                redirect_url: self.redirect_url,
                back_url: self.back_url,
                company_token: self.company_token,
                service_id: self.service_id,
                currency: None,
                country: None,
            },
            Endpoints {
                api_url: self.endpoint,
                payment_url: self.payment_url,
            },
        )
    }
}

// --- Unified Configuration Struct ---
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_port: u16,
    pub governor_burst: u32,
    pub governor_per_second: u64,
    pub dpo_config: DpoConfig,
}

impl AppConfig {
    // Load configuration from environment variables
    pub fn load() -> Result<Self, ConfigError> {
        ensure_dotenv_loaded();

        let server_port = parse_or("SERVER_PORT", 6666)?;
        let governor_burst = parse_or("GOVERNOR_BURST", 5)?;
        let governor_per_second = parse_or("GOVERNOR_PER_SECOND", 2)?;
        let dpo_config = DpoConfig::load()?;

        Ok(AppConfig {
            server_port,
            governor_burst,
            governor_per_second,
            dpo_config,
        })
    }
}

/// Blank overrides count as unset.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn required(key: &'static str) -> Result<String, ConfigError> {
    env_opt(key).ok_or(ConfigError::Missing(key))
}

fn parse_or<T: std::str::FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env_opt(key) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid(key, raw)),
        None => Ok(default),
    }
}
