//! 编排层（Orchestration Layer）
//!
//! ### `app` - 运行入口
//! - 持有浏览器会话，保证关闭
//! - 写出结果文件、输出统计
//!
//! ### `pagination` - 分页引擎
//! - 逐页驱动站点适配器
//! - 日期窗口过滤与早停
//! - 人机验证等待与反检测调度
//!
//! ```text
//! app (持有 BrowserSession)
//!     ↓
//! pagination::PaginationEngine (逐页循环)
//!     ↓
//! sites::SiteAdapter (站点解析) / services (验证闸门、反检测)
//!     ↓
//! browser::PageDriver (页面能力)
//! ```

pub mod app;
pub mod pagination;

pub use app::{App, RunRequest, RunSummary};
pub use pagination::{EngineOptions, EngineState, ExtractionResult, PaginationEngine, StopReason};
