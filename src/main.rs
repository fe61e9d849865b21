use anyhow::{Context, Result};
use clap::Parser;

use review_scraper::cli::Cli;
use review_scraper::config::Config;
use review_scraper::orchestrator::App;
use review_scraper::utils::logging;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置
    let config = cli.apply_overrides(
        Config::load(cli.config.as_deref()).context("加载配置失败")?,
    );

    // 初始化日志
    logging::init(config.verbose_logging);

    // 校验参数，失败时不启动浏览器
    let request = cli.to_request().context("参数校验失败")?;

    let summary = App::new(config).run(&request).await?;
    println!(
        "Extracted {} reviews. Data saved to {}",
        summary.result.records.len(),
        summary.output_path.display()
    );

    Ok(())
}
