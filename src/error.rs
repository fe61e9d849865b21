use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 浏览器相关错误
    #[error("浏览器错误: {0}")]
    Browser(#[from] BrowserError),
    /// 首页无法到达或无法渲染，唯一会从分页引擎传出的错误
    #[error("导航到 {url} 失败: {source}")]
    Navigation {
        url: String,
        #[source]
        source: BrowserError,
    },
    /// 日期窗口错误
    #[error("日期窗口错误: {0}")]
    Window(#[from] WindowError),
    /// 不支持的来源站点
    #[error("不支持的来源: \"{0}\"")]
    UnknownSource(String),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
}

/// 浏览器相关错误
#[derive(Debug, Error)]
pub enum BrowserError {
    /// 启动浏览器失败
    #[error("启动浏览器失败: {0}")]
    Launch(String),
    /// 浏览器配置失败
    #[error("浏览器配置失败: {0}")]
    Configuration(String),
    /// CDP 协议错误
    #[error("CDP 错误: {0}")]
    Cdp(#[from] chromiumoxide::error::CdpError),
    /// 等待超时
    #[error("等待 {what} 超时 ({millis}ms)")]
    Timeout { what: String, millis: u64 },
    /// 元素操作失败（不可见、已分离等）
    #[error("元素操作失败: {0}")]
    Element(String),
}

/// 日期窗口错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WindowError {
    /// 起始日期晚于结束日期
    #[error("起始日期 {start} 不能晚于结束日期 {end}")]
    StartAfterEnd {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },
    /// 日期格式无法解析
    #[error("无效的日期格式 '{value}'，请使用 YYYY-MM-DD")]
    InvalidDate { value: String },
}

/// 单个字段提取错误
///
/// 只在适配器内部流转，引擎只会看到“该条目被跳过”
#[derive(Debug, Error)]
pub enum FieldError {
    /// 没有匹配到节点或属性
    #[error("字段 {field} 不存在")]
    Missing { field: &'static str },
    /// 节点存在但内容为空
    #[error("字段 {field} 为空")]
    Empty { field: &'static str },
    /// 日期文本无法按站点格式解析
    #[error("日期 '{raw}' 无法解析")]
    UnparseableDate { raw: String },
    /// 读取过程中浏览器报错
    #[error("读取字段 {field} 时浏览器出错: {source}")]
    Browser {
        field: &'static str,
        #[source]
        source: BrowserError,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 配置文件读取失败
    #[error("读取配置文件 {path} 失败: {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML 解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: &'static str,
    },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 创建目录失败
    #[error("创建目录失败 ({path}): {source}")]
    CreateDirFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// JSON 序列化失败
    #[error("JSON 序列化失败: {0}")]
    Serialize(#[from] serde_json::Error),
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建导航失败错误
    pub fn navigation(url: impl Into<String>, source: BrowserError) -> Self {
        AppError::Navigation {
            url: url.into(),
            source,
        }
    }
}

impl FieldError {
    /// 包装浏览器错误
    pub fn browser(field: &'static str, source: BrowserError) -> Self {
        FieldError::Browser { field, source }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

/// 浏览器操作结果类型
pub type BrowserResult<T> = Result<T, BrowserError>;

/// 字段提取结果类型
pub type FieldResult<T> = Result<T, FieldError>;
