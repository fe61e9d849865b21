use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

/// 程序配置
///
/// 加载顺序：默认值 → TOML 文件（可选）→ 环境变量
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub browser: BrowserSettings,
    pub timing: TimingSettings,
    pub evasion: EvasionSettings,
    /// 结果 JSON 的输出目录
    pub output_dir: PathBuf,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

/// 浏览器会话配置
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct BrowserSettings {
    pub headless: bool,
    pub executable_path: Option<PathBuf>,
    pub user_agent: String,
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub locale: String,
    pub timezone: String,
}

/// 各类等待的时长（毫秒）
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct TimingSettings {
    /// 首页导航超时
    pub navigation_timeout_ms: u64,
    /// 每页等待列表内容出现的超时
    pub page_content_timeout_ms: u64,
    /// 首次加载时判断是否遇到验证页的超时
    pub challenge_probe_timeout_ms: u64,
    /// 点击下一页之后的固定等待
    pub settle_delay_ms: u64,
    /// 等待选择器时的轮询间隔
    pub poll_interval_ms: u64,
}

/// 反检测行为参数
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct EvasionSettings {
    /// 随机等待区间 `[min, max)`（毫秒）
    pub delay_ms: [u64; 2],
    /// 指针随机落点的区域边长
    pub pointer_region: [u32; 2],
    /// 指针移动分几步完成
    pub pointer_steps: u32,
    /// 随机滚动距离区间 `[min, max)`
    pub scroll_px: [u32; 2],
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            headless: false,
            executable_path: None,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36".to_string(),
            viewport_width: 1920,
            viewport_height: 1080,
            locale: "en-US".to_string(),
            timezone: "America/New_York".to_string(),
        }
    }
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            navigation_timeout_ms: 60_000,
            page_content_timeout_ms: 15_000,
            challenge_probe_timeout_ms: 5_000,
            settle_delay_ms: 3_000,
            poll_interval_ms: 250,
        }
    }
}

impl Default for EvasionSettings {
    fn default() -> Self {
        Self {
            delay_ms: [2_000, 5_000],
            pointer_region: [500, 500],
            pointer_steps: 10,
            scroll_px: [100, 400],
        }
    }
}

impl TimingSettings {
    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_millis(self.navigation_timeout_ms)
    }

    pub fn page_content_timeout(&self) -> Duration {
        Duration::from_millis(self.page_content_timeout_ms)
    }

    pub fn challenge_probe_timeout(&self) -> Duration {
        Duration::from_millis(self.challenge_probe_timeout_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }
}

impl Config {
    /// 按“默认值 → 文件 → 环境变量”加载配置
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_toml_file(path)?,
            None => Self::with_default_output(),
        };
        config.apply_env(|name| std::env::var(name).ok())
    }

    /// 从 TOML 文件加载，缺省字段使用默认值
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content, &path.display().to_string())
    }

    pub fn from_toml_str(content: &str, origin: &str) -> Result<Self, ConfigError> {
        let mut config: Config =
            toml::from_str(content).map_err(|source| ConfigError::TomlParseFailed {
                path: origin.to_string(),
                source,
            })?;
        if config.output_dir.as_os_str().is_empty() {
            config.output_dir = default_output_dir();
        }
        Ok(config)
    }

    fn with_default_output() -> Self {
        Self {
            output_dir: default_output_dir(),
            ..Self::default()
        }
    }

    /// 用环境变量覆盖配置，`lookup` 便于测试替换
    pub fn apply_env<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("SCRAPER_HEADLESS") {
            self.browser.headless = parse_bool("SCRAPER_HEADLESS", &value)?;
        }
        if let Some(value) = lookup("SCRAPER_VERBOSE") {
            self.verbose_logging = parse_bool("SCRAPER_VERBOSE", &value)?;
        }
        if let Some(value) = lookup("SCRAPER_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(value);
        }
        if let Some(value) = lookup("SCRAPER_USER_AGENT") {
            self.browser.user_agent = value;
        }
        if let Some(value) = lookup("SCRAPER_CHROME_PATH") {
            self.browser.executable_path = Some(PathBuf::from(value));
        }
        Ok(self)
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

fn parse_bool(var_name: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::EnvVarParseFailed {
            var_name: var_name.to_string(),
            value: value.to_string(),
            expected_type: "bool",
        }),
    }
}
