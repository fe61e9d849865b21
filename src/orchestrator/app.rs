//! 运行入口 - 编排层
//!
//! ## 职责
//!
//! 1. **会话管理**：启动浏览器，保证任何退出路径都会关闭
//! 2. **调度引擎**：选定站点适配器，运行分页引擎
//! 3. **结果输出**：整体写出 JSON 文件，输出统计信息

use std::path::PathBuf;

use tracing::error;

use crate::browser::{BrowserSession, PageDriver};
use crate::config::Config;
use crate::error::AppResult;
use crate::models::{DateWindow, SiteTag};
use crate::orchestrator::pagination::{EngineOptions, ExtractionResult, PaginationEngine};
use crate::services::OutputWriter;
use crate::sites::SiteAdapter;
use crate::utils::logging;

/// 一次抓取请求（已通过校验）
#[derive(Debug, Clone)]
pub struct RunRequest {
    /// 公司标识或完整 URL
    pub company: String,
    pub source: SiteTag,
    pub window: DateWindow,
}

/// 一次运行的汇总
#[derive(Debug)]
pub struct RunSummary {
    pub result: ExtractionResult,
    pub output_path: PathBuf,
}

/// 应用主结构
pub struct App {
    config: Config,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// 启动浏览器，抓取并写出结果；浏览器在返回前一定会关闭
    pub async fn run(&self, request: &RunRequest) -> AppResult<RunSummary> {
        logging::log_startup(request);

        let session = BrowserSession::launch(&self.config.browser).await?;
        let outcome = self.scrape(session.page(), request).await;
        session.close().await;

        if let Err(e) = &outcome {
            error!("❌ 运行失败: {}", e);
        }
        outcome
    }

    /// 在给定页面上运行引擎并写出结果
    pub async fn scrape<D: PageDriver>(
        &self,
        driver: &D,
        request: &RunRequest,
    ) -> AppResult<RunSummary> {
        let engine = PaginationEngine::new(EngineOptions::from_config(&self.config));
        let adapter = SiteAdapter::for_source(request.source);

        let result = engine
            .run(driver, adapter, &request.company, request.window)
            .await?;

        let writer = OutputWriter::new(&self.config.output_dir);
        let output_path = writer
            .write(
                &result.records,
                &request.company,
                request.source,
                chrono::Local::now().date_naive(),
            )
            .await?;

        logging::print_final_stats(&result, &output_path);

        Ok(RunSummary {
            result,
            output_path,
        })
    }
}
