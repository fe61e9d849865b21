//! 命令行参数
//!
//! 校验在进入抓取之前完成：日期格式、起止顺序、来源站点

use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;
use crate::error::AppResult;
use crate::models::{DateWindow, SiteTag};
use crate::orchestrator::RunRequest;

/// SaaS 评论抓取工具
#[derive(Debug, Parser)]
#[command(name = "review-scraper", version, about = "SaaS review scraper")]
pub struct Cli {
    /// 公司标识或完整 URL
    #[arg(short = 'c', long = "company")]
    pub company: String,

    /// 起始日期 (YYYY-MM-DD)
    #[arg(short = 's', long = "start_date")]
    pub start_date: String,

    /// 结束日期 (YYYY-MM-DD)
    #[arg(short = 'e', long = "end_date")]
    pub end_date: String,

    /// 来源站点 (g2, capterra, trustradius)
    #[arg(long = "source")]
    pub source: String,

    /// TOML 配置文件
    #[arg(long = "config")]
    pub config: Option<PathBuf>,

    /// 输出目录，覆盖配置
    #[arg(long = "output-dir")]
    pub output_dir: Option<PathBuf>,

    /// 无头模式运行（无法手动处理验证）
    #[arg(long)]
    pub headless: bool,

    /// 显示详细日志
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// 校验参数并生成抓取请求
    pub fn to_request(&self) -> AppResult<RunRequest> {
        let window = DateWindow::parse(&self.start_date, &self.end_date)?;
        let source: SiteTag = self.source.parse()?;
        Ok(RunRequest {
            company: self.company.trim().to_string(),
            source,
            window,
        })
    }

    /// 命令行开关覆盖配置
    pub fn apply_overrides(&self, mut config: Config) -> Config {
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if self.headless {
            config.browser.headless = true;
        }
        if self.verbose {
            config.verbose_logging = true;
        }
        config
    }
}
