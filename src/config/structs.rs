use serde::{Deserialize, Serialize};

use crate::errors::{Result, ServiceError};
use crate::metrics::validate_buckets;

/// Default configuration file, resolved relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 静态配置（从 TOML 加载，启动时使用）
///
/// 包含：
/// - server: 监听地址、端口、worker 数量
/// - logging: 日志配置
/// - metrics: Prometheus 指标配置
/// - inventory: Ansible inventory 生成配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StaticConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub inventory: InventoryConfig,
}

impl StaticConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：ENV > config.toml > 默认值
    /// ENV 前缀：MS，分隔符：__
    /// 示例：MS__SERVER__PORT=9000
    ///
    /// Falls back to defaults (and reports to stderr) when the sources cannot
    /// be deserialized, since logging is not up yet at this point.
    pub fn load_from(path: &str) -> Self {
        match Self::try_load_from(path) {
            Ok(config) => {
                if std::path::Path::new(path).exists() {
                    eprintln!("[INFO] Configuration loaded from: {}", path);
                }
                config
            }
            Err(e) => {
                eprintln!("[ERROR] {}", e);
                Self::default()
            }
        }
    }

    /// Same as [`StaticConfig::load_from`] but surfaces errors.
    pub fn try_load_from(path: &str) -> Result<Self> {
        use config::{Config, Environment, File};

        let settings = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("MS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: StaticConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would only fail later at registry or server build time.
    pub fn validate(&self) -> Result<()> {
        if self.server.workers == 0 {
            return Err(ServiceError::config("server.workers must be at least 1"));
        }

        validate_buckets(&self.metrics.latency_buckets).map_err(|e| {
            ServiceError::config(format!("metrics.latency_buckets: {}", e.message()))
        })?;

        Ok(())
    }

    /// 生成示例 TOML 配置文件
    pub fn generate_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config)
            .unwrap_or_else(|e| format!("Error generating sample config: {}", e))
    }
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    /// Worker threads. Values above 32 are capped at startup, with a warning.
    #[serde(default = "default_workers")]
    pub workers: usize,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
}

/// 指标配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Prefix for every metric name, joined with `_`. Empty means none.
    #[serde(default)]
    pub namespace: String,
    /// Upper bounds of the latency histogram buckets, in seconds.
    #[serde(default = "default_latency_buckets")]
    pub latency_buckets: Vec<f64>,
}

/// Ansible inventory 生成配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryConfig {
    #[serde(default = "default_terraform_dir")]
    pub terraform_dir: String,
    #[serde(default = "default_output_path")]
    pub output_path: String,
    #[serde(default = "default_host_group")]
    pub host_group: String,
    #[serde(default = "default_host_alias")]
    pub host_alias: String,
    #[serde(default = "default_ansible_user")]
    pub ansible_user: String,
    /// Path written into the inventory. The key material itself is never written.
    #[serde(default = "default_private_key_file")]
    pub private_key_file: String,
    #[serde(default = "default_python_interpreter")]
    pub python_interpreter: String,
}

// ============================================================
// Default value functions for static config
// ============================================================

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    5000
}

fn default_workers() -> usize {
    num_cpus::get()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_max_backups() -> u32 {
    5
}

fn default_enable_rotation() -> bool {
    true
}

fn default_latency_buckets() -> Vec<f64> {
    prometheus::DEFAULT_BUCKETS.to_vec()
}

fn default_terraform_dir() -> String {
    "../terraform-k8s".to_string()
}

fn default_output_path() -> String {
    "inventory.ini".to_string()
}

fn default_host_group() -> String {
    "ci_cd_servers".to_string()
}

fn default_host_alias() -> String {
    "ci-cd-vm".to_string()
}

fn default_ansible_user() -> String {
    "azureuser".to_string()
}

fn default_private_key_file() -> String {
    "~/.ssh/id_rsa".to_string()
}

fn default_python_interpreter() -> String {
    "/usr/bin/python3".to_string()
}

// ============================================================
// Default implementations
// ============================================================

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            workers: default_workers(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
            max_backups: default_max_backups(),
            enable_rotation: default_enable_rotation(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            namespace: String::new(),
            latency_buckets: default_latency_buckets(),
        }
    }
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            terraform_dir: default_terraform_dir(),
            output_path: default_output_path(),
            host_group: default_host_group(),
            host_alias: default_host_alias(),
            ansible_user: default_ansible_user(),
            private_key_file: default_private_key_file(),
            python_interpreter: default_python_interpreter(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = StaticConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.metrics.latency_buckets.len(), 11);
        assert_eq!(config.inventory.ansible_user, "azureuser");
    }

    #[test]
    fn test_validate_rejects_unsorted_buckets() {
        let mut config = StaticConfig::default();
        config.metrics.latency_buckets = vec![0.1, 0.05, 1.0];
        assert!(matches!(config.validate(), Err(ServiceError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_non_finite_buckets() {
        let mut config = StaticConfig::default();
        config.metrics.latency_buckets = vec![0.1, f64::INFINITY];
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ServiceError::Config(_)));
        assert!(err.message().starts_with("metrics.latency_buckets:"));
    }

    #[test]
    fn test_validate_rejects_empty_buckets() {
        let mut config = StaticConfig::default();
        config.metrics.latency_buckets.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_workers() {
        let mut config = StaticConfig::default();
        config.server.workers = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_sample_config_round_trips() {
        let sample = StaticConfig::generate_sample_config();
        assert!(sample.contains("[server]"));
        assert!(sample.contains("[inventory]"));
        let parsed: StaticConfig = toml::from_str(&sample).expect("sample should parse");
        assert_eq!(parsed.server.host, "127.0.0.1");
    }

    #[test]
    fn test_try_load_from_toml_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("service.toml");
        std::fs::write(
            &path,
            "[server]\nport = 9123\n\n[metrics]\nnamespace = \"shop\"\n",
        )
        .unwrap();

        let config = StaticConfig::try_load_from(path.to_str().unwrap()).unwrap();
        assert_eq!(config.server.port, 9123);
        assert_eq!(config.metrics.namespace, "shop");
        assert_eq!(config.logging.level, "info");
    }
}
