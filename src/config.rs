//! 配置管理模块
//! 支持从环境变量和配置文件加载配置

use std::{fmt, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::{error::AppError, infrastructure::log_redact::redact_account_token};

/// 应用配置结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub relay_cache: RelayCacheConfig,
    #[serde(default)]
    pub account: AccountConfig,
    #[serde(default)]
    pub startup: StartupConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 中继缓存配置
/// 配置文件中未出现的字段取环境变量默认值
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayCacheConfig {
    /// 缓存目录，未设置时使用 $HOME/.cache/vpncore
    pub cache_dir: Option<String>,
    pub file_name: String,
}

/// 账户配置
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountConfig {
    pub token: Option<Zeroizing<String>>,
}

impl fmt::Debug for AccountConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountConfig")
            .field("token", &self.token.as_ref().map(|t| redact_account_token(t)))
            .finish()
    }
}

/// 启动配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StartupConfig {
    /// 中继缓存不可用时是否继续启动
    pub allow_degraded_start: bool,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String, // "json" or "text"
    pub enable_file_logging: bool,
    pub log_file_path: Option<String>,
    pub max_files: u32,
}

impl Default for RelayCacheConfig {
    fn default() -> Self {
        Self {
            cache_dir: std::env::var("RELAY_CACHE_DIR").ok(),
            file_name: std::env::var("RELAY_CACHE_FILE")
                .unwrap_or_else(|_| "relays.json".into()),
        }
    }
}

impl AccountConfig {
    pub fn from_env() -> Self {
        Self {
            token: std::env::var("ACCOUNT_TOKEN")
                .ok()
                .filter(|t| !t.trim().is_empty())
                .map(Zeroizing::new),
        }
    }
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            allow_degraded_start: std::env::var("ALLOW_DEGRADED_START")
                .ok()
                .map(|v| v == "1")
                .unwrap_or(true),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            format: std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".into()),
            enable_file_logging: std::env::var("LOG_FILE_ENABLED")
                .ok()
                .map(|v| v == "1")
                .unwrap_or(false),
            log_file_path: std::env::var("LOG_FILE_PATH").ok(),
            max_files: std::env::var("LOG_MAX_FILES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
        }
    }
}

impl Config {
    /// 从环境变量加载配置
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            relay_cache: RelayCacheConfig::default(),
            account: AccountConfig::from_env(),
            startup: StartupConfig::default(),
            logging: LoggingConfig::default(),
        })
    }

    /// 从配置文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        let config: Config =
            toml::from_str(&content).with_context(|| "Failed to parse config file as TOML")?;

        Ok(config)
    }

    /// 从环境变量和配置文件合并加载（配置文件优先级更高）
    ///
    /// 配置文件可以只包含部分字段，缺失字段保留环境变量中的值
    pub fn from_env_and_file<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        let mut config = Self::from_env()?;

        if let Some(path) = path {
            if path.as_ref().exists() {
                let file_config = Self::from_file(path)?;
                let env_token = config.account.token.take();
                config = file_config;
                if config.account.token.is_none() {
                    config.account.token = env_token;
                }
            }
        }

        Ok(config)
    }

    /// 加载并验证配置，失败时统一映射为 `AppError::Config`
    pub fn load<P: AsRef<Path>>(path: Option<P>) -> std::result::Result<Self, AppError> {
        let config = Self::from_env_and_file(path).map_err(|e| AppError::config(&e))?;
        config.validate().map_err(|e| AppError::config(&e))?;
        Ok(config)
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<()> {
        // 验证缓存文件名（不允许携带目录）
        let file_name = self.relay_cache.file_name.trim();
        if file_name.is_empty() || file_name.contains('/') || file_name.contains('\\') {
            anyhow::bail!("RELAY_CACHE_FILE must be a plain file name");
        }

        // 验证日志级别
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            anyhow::bail!("LOG_LEVEL must be one of: {:?}", valid_levels);
        }

        // 验证日志格式
        if self.logging.format != "json" && self.logging.format != "text" {
            anyhow::bail!("LOG_FORMAT must be 'json' or 'text'");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_config_from_file() {
        let file = write_config(
            r#"
[relay_cache]
cache_dir = "/var/cache/vpncore"
file_name = "relays.json"

[account]
token = "1234567890123456"

[startup]
allow_degraded_start = false

[logging]
level = "debug"
format = "json"
enable_file_logging = false
max_files = 5
"#,
        );

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(
            config.relay_cache.cache_dir.as_deref(),
            Some("/var/cache/vpncore")
        );
        assert_eq!(
            config.account.token.as_ref().map(|t| t.as_str()),
            Some("1234567890123456")
        );
        assert!(!config.startup.allow_degraded_start);
        assert_eq!(config.logging.max_files, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_rejects_bad_values() {
        let file = write_config(
            r#"
[relay_cache]
file_name = "../relays.json"

[logging]
level = "info"
format = "text"
enable_file_logging = false
max_files = 10
"#,
        );
        let mut config = Config::from_file(file.path()).unwrap();
        assert!(config.validate().is_err());

        config.relay_cache.file_name = "relays.json".to_string();
        assert!(config.validate().is_ok());

        config.logging.level = "verbose".to_string();
        assert!(config.validate().is_err());

        config.logging.level = "info".to_string();
        config.logging.format = "xml".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_falls_back_to_env() {
        let config =
            Config::from_env_and_file(Some("/nonexistent/vpncore/config.toml")).unwrap();
        assert!(!config.relay_cache.file_name.is_empty());
    }

    #[test]
    fn test_partial_file_overrides_only_given_keys() {
        let file = write_config(
            r#"
[relay_cache]
cache_dir = "/var/cache/vpncore"
"#,
        );
        let config = Config::from_env_and_file(Some(file.path())).unwrap();
        let env = Config::from_env().unwrap();

        assert_eq!(
            config.relay_cache.cache_dir.as_deref(),
            Some("/var/cache/vpncore")
        );
        assert_eq!(config.relay_cache.file_name, env.relay_cache.file_name);
        assert_eq!(config.logging.level, env.logging.level);
        assert_eq!(config.logging.format, env.logging.format);
        assert_eq!(
            config.startup.allow_degraded_start,
            env.startup.allow_degraded_start
        );
    }

    #[test]
    fn test_partial_logging_section() {
        let file = write_config(
            r#"
[account]
token = "1234567890123456"

[logging]
level = "warn"
"#,
        );
        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.max_files, LoggingConfig::default().max_files);
        assert_eq!(
            config.account.token.as_ref().map(|t| t.as_str()),
            Some("1234567890123456")
        );
    }

    #[test]
    fn test_load_reports_config_error() {
        let file = write_config(
            r#"
[relay_cache]
file_name = "nested/relays.json"
"#,
        );
        let err = Config::load(Some(file.path())).unwrap_err();
        assert_eq!(err.code(), crate::error::AppErrorCode::ConfigInvalid);
        assert!(err.to_string().contains("RELAY_CACHE_FILE"));

        let broken = write_config("[logging\nlevel = ");
        let err = Config::load(Some(broken.path())).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_account_token_not_in_debug_output() {
        let account = AccountConfig {
            token: Some(Zeroizing::new("1234567890123456".to_string())),
        };
        let debug = format!("{:?}", account);
        assert!(!debug.contains("1234567890123456"));
    }
}
