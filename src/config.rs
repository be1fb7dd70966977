//! Process configuration
//!
//! Everything the binaries need from the environment is read here, once, into
//! [`AppConfig`]. Components receive the pieces they need as plain structs.

use std::env;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://rendafixa.db?mode=rwc";
pub const DEFAULT_SERVER_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_BCB_SELIC_URL: &str =
    "https://api.bcb.gov.br/dados/serie/bcdata.sgs.432/dados/ultimos/1?formato=json";
pub const DEFAULT_TESOURO_URL: &str = "https://www.tesourodireto.com.br/titulos/precos-e-taxas.htm";
pub const DEFAULT_DOLLAR_URL: &str = "https://www.melhorcambio.com/dolar-hoje";
pub const DEFAULT_FALLBACK_SELIC: f64 = 11.25;
pub const DEFAULT_CDI_SPREAD: f64 = 0.10;
pub const DEFAULT_CUSTODY_FEE_RATE: f64 = 0.002;

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { name: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(name) => write!(f, "{} must be set", name),
            ConfigError::Invalid { name, value } => {
                write!(f, "{} has an invalid value: '{}'", name, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

impl GeminiConfig {
    /// The key is optional until an operation actually talks to the model.
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.api_key.as_deref().ok_or(ConfigError::Missing("GEMINI_KEY"))
    }
}

#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub sender: String,
    pub recipient: String,
    pub app_password: String,
    pub smtp_host: String,
    pub smtp_port: u16,
}

#[derive(Debug, Clone)]
pub struct MarketConfig {
    pub selic_url: String,
    pub fallback_selic: f64,
    pub cdi_spread: f64,
}

#[derive(Debug, Clone)]
pub struct SourcesConfig {
    pub tesouro_url: String,
    pub dollar_url: String,
}

#[derive(Debug, Clone)]
pub struct FilesConfig {
    pub treasury_data: String,
    pub dollar_history: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub server_addr: String,
    pub gemini: GeminiConfig,
    pub market: MarketConfig,
    pub sources: SourcesConfig,
    pub files: FilesConfig,
    pub custody_fee_rate: f64,
    email: Option<EmailConfig>,
    email_error: Option<ConfigError>,
}

impl AppConfig {
    /// Reads the process environment. Call `dotenvy::dotenv()` first.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let or_default = |name: &str, default: &str| get(name).unwrap_or_else(|| default.to_string());

        let (email, email_error) = match read_email(&get) {
            Ok(email) => (Some(email), None),
            Err(e) => (None, Some(e)),
        };

        Ok(Self {
            database_url: or_default("DATABASE_URL", DEFAULT_DATABASE_URL),
            server_addr: or_default("SERVER_ADDR", DEFAULT_SERVER_ADDR),
            gemini: GeminiConfig {
                api_key: get("GEMINI_KEY"),
                model: or_default("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
                base_url: or_default("GEMINI_BASE_URL", DEFAULT_GEMINI_BASE_URL),
            },
            market: MarketConfig {
                selic_url: or_default("BCB_SELIC_URL", DEFAULT_BCB_SELIC_URL),
                fallback_selic: parse_or("FALLBACK_SELIC", get("FALLBACK_SELIC"), DEFAULT_FALLBACK_SELIC)?,
                cdi_spread: parse_or("CDI_SPREAD", get("CDI_SPREAD"), DEFAULT_CDI_SPREAD)?,
            },
            sources: SourcesConfig {
                tesouro_url: or_default("TESOURO_URL", DEFAULT_TESOURO_URL),
                dollar_url: or_default("DOLLAR_URL", DEFAULT_DOLLAR_URL),
            },
            files: FilesConfig {
                treasury_data: or_default("TREASURY_DATA_FILE", "tesouro_taxas.csv"),
                dollar_history: or_default("DOLLAR_HISTORY_FILE", "historico_dolar.csv"),
            },
            custody_fee_rate: parse_or(
                "CUSTODY_FEE_RATE",
                get("CUSTODY_FEE_RATE"),
                DEFAULT_CUSTODY_FEE_RATE,
            )?,
            email,
            email_error,
        })
    }

    /// Email settings, or the first problem found while reading them.
    pub fn email(&self) -> Result<&EmailConfig, ConfigError> {
        match (&self.email, &self.email_error) {
            (Some(email), _) => Ok(email),
            (None, Some(e)) => Err(e.clone()),
            (None, None) => Err(ConfigError::Missing("EMAIL_SENDER")),
        }
    }
}

/// Positional `[principal] [years]` shared by the treasury pipeline binaries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineArgs {
    pub principal: f64,
    pub years: u32,
}

impl PipelineArgs {
    pub const DEFAULT: PipelineArgs = PipelineArgs { principal: 1000.0, years: 2 };

    /// Parse the arguments after the program name. Missing values fall back
    /// to [`PipelineArgs::DEFAULT`]; present but unusable values are errors.
    pub fn from_args(args: &[String]) -> Result<Self, ConfigError> {
        let principal = parse_or("principal", args.first().cloned(), Self::DEFAULT.principal)?;
        if !principal.is_finite() || principal <= 0.0 {
            return Err(ConfigError::Invalid { name: "principal", value: principal.to_string() });
        }

        let years = parse_or("years", args.get(1).cloned(), Self::DEFAULT.years)?;
        if years == 0 {
            return Err(ConfigError::Invalid { name: "years", value: years.to_string() });
        }

        Ok(Self { principal, years })
    }
}

fn read_email<G>(get: &G) -> Result<EmailConfig, ConfigError>
where
    G: Fn(&str) -> Option<String>,
{
    let sender = get("EMAIL_SENDER").ok_or(ConfigError::Missing("EMAIL_SENDER"))?;
    let recipient = get("EMAIL_RECIPIENT").unwrap_or_else(|| sender.clone());
    let app_password =
        get("EMAIL_APP_PASSWORD").ok_or(ConfigError::Missing("EMAIL_APP_PASSWORD"))?;

    Ok(EmailConfig {
        sender,
        recipient,
        app_password,
        smtp_host: get("SMTP_HOST").unwrap_or_else(|| "smtp.gmail.com".to_string()),
        smtp_port: parse_or("SMTP_PORT", get("SMTP_PORT"), 465)?,
    })
}

fn parse_or<T: FromStr>(name: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_without_environment() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.gemini.model, DEFAULT_GEMINI_MODEL);
        assert_eq!(config.market.fallback_selic, 11.25);
        assert_eq!(config.market.cdi_spread, 0.10);
        assert_eq!(config.custody_fee_rate, 0.002);
        assert!(config.gemini.api_key.is_none());
    }

    #[test]
    fn test_missing_gemini_key_is_reported() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(
            config.gemini.require_api_key(),
            Err(ConfigError::Missing("GEMINI_KEY"))
        );

        let config = AppConfig::from_lookup(lookup(&[("GEMINI_KEY", "abc")])).unwrap();
        assert_eq!(config.gemini.require_api_key(), Ok("abc"));
    }

    #[test]
    fn test_blank_values_count_as_missing() {
        let config = AppConfig::from_lookup(lookup(&[("GEMINI_KEY", "  ")])).unwrap();
        assert!(config.gemini.require_api_key().is_err());
    }

    #[test]
    fn test_email_requires_password() {
        let config =
            AppConfig::from_lookup(lookup(&[("EMAIL_SENDER", "me@example.com")])).unwrap();
        assert_eq!(
            config.email().unwrap_err(),
            ConfigError::Missing("EMAIL_APP_PASSWORD")
        );
    }

    #[test]
    fn test_email_recipient_defaults_to_sender() {
        let config = AppConfig::from_lookup(lookup(&[
            ("EMAIL_SENDER", "me@example.com"),
            ("EMAIL_APP_PASSWORD", "secret"),
        ]))
        .unwrap();
        let email = config.email().unwrap();
        assert_eq!(email.recipient, "me@example.com");
        assert_eq!(email.smtp_port, 465);
        assert_eq!(email.smtp_host, "smtp.gmail.com");
    }

    #[test]
    fn test_invalid_number_is_rejected() {
        let result = AppConfig::from_lookup(lookup(&[("CDI_SPREAD", "ten")]));
        assert!(matches!(
            result,
            Err(ConfigError::Invalid { name: "CDI_SPREAD", .. })
        ));
    }

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_pipeline_args_defaults() {
        assert_eq!(PipelineArgs::from_args(&[]).unwrap(), PipelineArgs::DEFAULT);
        assert_eq!(
            PipelineArgs::from_args(&args(&["2500"])).unwrap(),
            PipelineArgs { principal: 2500.0, years: 2 }
        );
        assert_eq!(
            PipelineArgs::from_args(&args(&["2500.50", "5"])).unwrap(),
            PipelineArgs { principal: 2500.5, years: 5 }
        );
    }

    #[test]
    fn test_pipeline_args_reject_bad_values() {
        let cases: [&[&str]; 7] = [
            &["abc"],
            &["0"],
            &["-10"],
            &["NaN"],
            &["1000", "two"],
            &["1000", "0"],
            &["1000", "-1"],
        ];
        for bad in cases {
            assert!(PipelineArgs::from_args(&args(bad)).is_err(), "accepted {:?}", bad);
        }
        assert!(matches!(
            PipelineArgs::from_args(&args(&["1000", "x"])),
            Err(ConfigError::Invalid { name: "years", .. })
        ));
    }
}
