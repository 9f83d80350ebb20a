use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 全局配置单例
static CONFIG: OnceCell<AppConfig> = OnceCell::new();

/// 二维码边长的硬上限（像素），防止无界内存分配。
pub const MAX_QR_SIZE: u32 = 2048;

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "ServerConfig::default_host")]
    pub host: String,
    /// 监听端口
    #[serde(default = "ServerConfig::default_port")]
    pub port: u16,
}

impl ServerConfig {
    fn default_host() -> String {
        "0.0.0.0".to_string()
    }
    fn default_port() -> u16 {
        8080
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别（未设置 RUST_LOG 时生效）
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,
    /// 日志格式：full | compact
    #[serde(default = "LoggingConfig::default_format")]
    pub format: String,
}

impl LoggingConfig {
    fn default_level() -> String {
        "info".to_string()
    }
    fn default_format() -> String {
        "full".to_string()
    }

    /// 组装默认的 EnvFilter 指令
    pub fn filter_directive(&self) -> String {
        format!("qr_backend={0},tower_http={0}", self.level)
    }

    pub fn is_compact(&self) -> bool {
        self.format.eq_ignore_ascii_case("compact")
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
            format: Self::default_format(),
        }
    }
}

/// 静态资源配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetsConfig {
    /// 静态资源根目录（启动时递归预加载）
    #[serde(default = "AssetsConfig::default_dir")]
    pub dir: String,
    /// 首页文件（相对资源根目录）
    #[serde(default = "AssetsConfig::default_index")]
    pub index: String,
}

impl AssetsConfig {
    fn default_dir() -> String {
        "./static".to_string()
    }
    fn default_index() -> String {
        "index.html".to_string()
    }
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            dir: Self::default_dir(),
            index: Self::default_index(),
        }
    }
}

/// 二维码生成配置
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenerateConfig {
    /// 未传 size 时的默认边长（像素）
    #[serde(default = "GenerateConfig::default_size")]
    pub default_size: u32,
    /// 允许的最大边长（像素），不会超过 [`MAX_QR_SIZE`]
    #[serde(default = "GenerateConfig::default_max_size")]
    pub max_size: u32,
}

impl GenerateConfig {
    fn default_size() -> u32 {
        256
    }
    fn default_max_size() -> u32 {
        MAX_QR_SIZE
    }

    /// 实际生效的最大边长：夹在 [1, MAX_QR_SIZE] 之间
    pub fn effective_max_size(&self) -> u32 {
        self.max_size.clamp(1, MAX_QR_SIZE)
    }

    /// 实际生效的默认边长：夹在 [1, effective_max_size()] 之间
    pub fn effective_default_size(&self) -> u32 {
        self.default_size.clamp(1, self.effective_max_size())
    }
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            default_size: Self::default_size(),
            max_size: Self::default_max_size(),
        }
    }
}

/// 优雅退出配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShutdownConfig {
    /// 优雅退出超时时间（秒）
    #[serde(default = "ShutdownConfig::default_timeout")]
    pub timeout_secs: u64,
}

impl ShutdownConfig {
    fn default_timeout() -> u64 {
        30
    }

    /// 获取优雅退出超时时间
    pub fn timeout_duration(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ShutdownConfig {
    fn default() -> Self {
        Self {
            timeout_secs: Self::default_timeout(),
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// 静态资源配置
    #[serde(default)]
    pub assets: AssetsConfig,
    /// 二维码生成配置
    #[serde(default)]
    pub generate: GenerateConfig,
    /// 优雅退出配置
    #[serde(default)]
    pub shutdown: ShutdownConfig,
}

impl AppConfig {
    /// 从配置文件加载配置（文件可缺省），支持环境变量覆盖
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::get_config_path();

        let builder = ConfigBuilder::builder()
            .add_source(File::from(config_path).required(false))
            // 支持环境变量覆盖，例如：APP_SERVER__PORT=9000
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        builder.try_deserialize()
    }

    /// 初始化全局配置
    pub fn init_global() -> Result<&'static AppConfig, ConfigError> {
        let config = Self::load()?;
        CONFIG
            .set(config)
            .map_err(|_| ConfigError::Message("配置已经被初始化".to_string()))?;
        CONFIG
            .get()
            .ok_or_else(|| ConfigError::Message("配置初始化失败".to_string()))
    }

    /// 获取配置文件路径
    fn get_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    /// 获取服务器监听地址
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// 获取静态资源根目录
    pub fn assets_path(&self) -> PathBuf {
        PathBuf::from(&self.assets.dir)
    }
}
