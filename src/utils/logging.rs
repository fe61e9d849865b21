//! 日志工具模块
//!
//! 提供日志初始化和阶段输出的辅助函数

use std::path::Path;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::orchestrator::{ExtractionResult, RunRequest};

/// 初始化日志
///
/// 优先使用 `RUST_LOG`，否则按 `verbose` 选择 debug 或 info
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(request: &RunRequest) {
    info!("{}", "=".repeat(60));
    info!("🚀 评论抓取启动");
    info!("🎯 目标: {}", request.company);
    info!("📰 来源: {}", request.source);
    info!(
        "📅 日期窗口: {} ~ {}",
        request.window.start(),
        request.window.end()
    );
    info!("{}", "=".repeat(60));
}

/// 打印最终统计信息
pub fn print_final_stats(result: &ExtractionResult, output_path: &Path) {
    info!("\n{}", "=".repeat(60));
    info!("📊 抓取完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 提取评论: {}", result.records.len());
    info!("📄 访问页数: {}", result.pages_visited);
    info!("⏭️ 跳过条目: {}", result.skipped_items);
    info!("🛑 停止原因: {:?}", result.stop);
    info!("{}", "=".repeat(60));
    info!("\n结果已保存至: {}", output_path.display());
}

/// 截断长文本用于日志显示
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
