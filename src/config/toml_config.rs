use crate::core::mollie::LIVE_URL;
use crate::domain::model::PaymentDefaults;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{GatewayError, Result};
use crate::utils::validation::{validate_api_key, validate_range, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    pub gateway: GatewaySection,
    pub defaults: Option<PaymentDefaults>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewaySection {
    pub api_key: String,
    pub base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub format: Option<String>,
}

impl GatewayConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            gateway: GatewaySection {
                api_key: api_key.into(),
                base_url: None,
                timeout_seconds: None,
            },
            defaults: None,
            logging: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.gateway.base_url = Some(base_url.into());
        self
    }

    pub fn with_defaults(mut self, defaults: PaymentDefaults) -> Self {
        self.defaults = Some(defaults);
        self
    }

    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(GatewayError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| GatewayError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 從環境變數建立配置
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("MOLLIE_API_KEY").map_err(|_| GatewayError::MissingConfigError {
            field: "MOLLIE_API_KEY".to_string(),
        })?;

        Self::new(api_key).with_env_overrides()
    }

    /// 套用 MOLLIE_BASE_URL 與 MOLLIE_TIMEOUT_SECONDS
    pub fn with_env_overrides(mut self) -> Result<Self> {
        if let Ok(base_url) = std::env::var("MOLLIE_BASE_URL") {
            self.gateway.base_url = Some(base_url);
        }

        if let Ok(value) = std::env::var("MOLLIE_TIMEOUT_SECONDS") {
            let timeout = value
                .parse::<u64>()
                .map_err(|_| GatewayError::InvalidConfigValueError {
                    field: "MOLLIE_TIMEOUT_SECONDS".to_string(),
                    value: value.clone(),
                    reason: "Value must be a whole number of seconds".to_string(),
                })?;
            self.gateway.timeout_seconds = Some(timeout);
        }

        Ok(self)
    }

    /// 替換環境變數 (例如 ${MOLLIE_API_KEY})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| GatewayError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validate_api_key("gateway.api_key", &self.gateway.api_key)?;

        if let Some(base_url) = &self.gateway.base_url {
            validate_url("gateway.base_url", base_url)?;
        }

        if let Some(timeout) = self.gateway.timeout_seconds {
            validate_range("gateway.timeout_seconds", timeout, 1, 300)?;
        }

        if let Some(defaults) = &self.defaults {
            if let Some(url) = &defaults.redirect_url {
                validate_url("defaults.redirect_url", url)?;
            }
            if let Some(url) = &defaults.webhook_url {
                validate_url("defaults.webhook_url", url)?;
            }
        }

        if let Some(format) = self.logging.as_ref().and_then(|l| l.format.as_deref()) {
            let valid_formats = ["compact", "json"];
            if !valid_formats.contains(&format) {
                return Err(GatewayError::InvalidConfigValueError {
                    field: "logging.format".to_string(),
                    value: format.to_string(),
                    reason: format!(
                        "Unsupported format. Valid formats: {}",
                        valid_formats.join(", ")
                    ),
                });
            }
        }

        Ok(())
    }

    pub fn log_level(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|l| l.level.as_deref())
            .unwrap_or("info")
    }

    pub fn json_logging(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.format.as_deref())
            .is_some_and(|f| f == "json")
    }
}

impl ConfigProvider for GatewayConfig {
    fn api_key(&self) -> &str {
        &self.gateway.api_key
    }

    fn base_url(&self) -> &str {
        self.gateway.base_url.as_deref().unwrap_or(LIVE_URL)
    }

    fn timeout_seconds(&self) -> u64 {
        self.gateway
            .timeout_seconds
            .unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    fn defaults(&self) -> PaymentDefaults {
        self.defaults.clone().unwrap_or_default()
    }
}

impl Validate for GatewayConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[gateway]
api_key = "test_dHar4XY7LxsDOtmnkVtjNVWXLSlXsM"
timeout_seconds = 10

[defaults]
description = "Webshop order"
redirect_url = "https://shop.example/return"
locale = "nl_NL"
"#;

        let config = GatewayConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.api_key(), "test_dHar4XY7LxsDOtmnkVtjNVWXLSlXsM");
        assert_eq!(config.base_url(), LIVE_URL);
        assert_eq!(config.timeout_seconds(), 10);
        assert_eq!(
            config.defaults(),
            PaymentDefaults {
                description: Some("Webshop order".to_string()),
                redirect_url: Some("https://shop.example/return".to_string()),
                webhook_url: None,
                locale: Some("nl_NL".to_string()),
            }
        );
        assert_eq!(config.log_level(), "info");
        assert!(!config.json_logging());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("TEST_TOML_MOLLIE_KEY", "test_fromEnvironment123");

        let toml_content = r#"
[gateway]
api_key = "${TEST_TOML_MOLLIE_KEY}"
base_url = "${TEST_TOML_UNSET_VARIABLE}"
"#;

        let config = GatewayConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.gateway.api_key, "test_fromEnvironment123");
        // 未設定的變數保持原樣
        assert_eq!(
            config.gateway.base_url.as_deref(),
            Some("${TEST_TOML_UNSET_VARIABLE}")
        );
        assert!(config.validate().is_err());

        std::env::remove_var("TEST_TOML_MOLLIE_KEY");
    }

    #[test]
    fn test_config_validation() {
        let bad_key = GatewayConfig::new("sk_not_a_mollie_key");
        assert!(bad_key.validate().is_err());

        let bad_timeout = r#"
[gateway]
api_key = "live_abc123"
timeout_seconds = 0
"#;
        let config = GatewayConfig::from_toml_str(bad_timeout).unwrap();
        assert!(config.validate().is_err());

        let bad_format = r#"
[gateway]
api_key = "live_abc123"

[logging]
format = "xml"
"#;
        let config = GatewayConfig::from_toml_str(bad_format).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_gateway_section() {
        let result = GatewayConfig::from_toml_str("[defaults]\nlocale = \"nl_NL\"\n");
        assert!(matches!(
            result,
            Err(GatewayError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[gateway]
api_key = "test_fileConfig"
base_url = "http://127.0.0.1:9999/v2"

[logging]
level = "debug"
format = "json"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = GatewayConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.base_url(), "http://127.0.0.1:9999/v2");
        assert_eq!(config.log_level(), "debug");
        assert!(config.json_logging());
    }
}
