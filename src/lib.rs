//! # Review Scraper
//!
//! 按日期窗口从第三方评论站点抓取产品评论，输出规范化的记录
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Browser）
//! - `browser/` - 持有稀缺资源（Page），只暴露页面能力
//! - `PageDriver` - 导航 / 查询 / 读取 / 点击 / 指针 / 滚动
//! - `BrowserSession` - 浏览器会话，由调用方创建并关闭
//!
//! ### ② 站点适配层（Sites）
//! - `sites/` - G2 / Capterra / TrustRadius 的选择器与解析规则
//! - `SiteAdapter` - 封闭的站点集合，统一的提取能力
//!
//! ### ③ 业务能力层（Services）
//! - `AntiDetection` - 随机等待、指针移动、滚动
//! - `ChallengeGate` - 人机验证时无限期等待人工处理
//! - `OutputWriter` - 写出 JSON 结果
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/pagination` - 分页引擎，日期窗口过滤与早停
//! - `orchestrator/app` - 会话生命周期与结果输出

pub mod browser;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod sites;
pub mod utils;

// 重新导出常用类型
pub use browser::{BrowserSession, ChromiumPage, PageDriver, Selector};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{DateWindow, Rating, ReviewRecord, SiteTag};
pub use orchestrator::{App, ExtractionResult, PaginationEngine, RunRequest, StopReason};
pub use sites::SiteAdapter;
