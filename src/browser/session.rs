use std::time::Duration;

use chromiumoxide::cdp::browser_protocol::emulation::{
    SetLocaleOverrideParams, SetTimezoneOverrideParams,
};
use chromiumoxide::handler::viewport::Viewport;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use super::chromium::ChromiumPage;
use crate::config::BrowserSettings;
use crate::error::{BrowserError, BrowserResult};

/// 一次抓取运行独占的浏览器会话
///
/// 由调用方创建并显式关闭，引擎只借用其中的页面
pub struct BrowserSession {
    browser: Browser,
    handler_task: Option<JoinHandle<()>>,
    page: ChromiumPage,
}

impl BrowserSession {
    /// 启动浏览器并打开一个已完成伪装配置的空白页面
    pub async fn launch(settings: &BrowserSettings) -> BrowserResult<Self> {
        info!(
            "🚀 启动浏览器 (headless: {}, 视口: {}x{})",
            settings.headless, settings.viewport_width, settings.viewport_height
        );

        let config = build_config(settings)?;

        let (browser, mut handler) = Browser::launch(config).await.map_err(|e| {
            error!("启动浏览器失败: {}", e);
            BrowserError::Launch(e.to_string())
        })?;
        debug!("浏览器启动成功");

        // 在后台处理浏览器事件
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("浏览器事件处理出错: {}", e);
                }
            }
        });

        // 添加短暂延迟以等待浏览器状态同步
        sleep(Duration::from_millis(300)).await;

        let page = browser.new_page("about:blank").await.map_err(|e| {
            error!("创建页面失败: {}", e);
            BrowserError::from(e)
        })?;
        configure_page(&page, settings).await?;
        debug!("页面伪装配置完成");

        Ok(Self {
            browser,
            handler_task: Some(handler_task),
            page: ChromiumPage::new(page),
        })
    }

    pub fn page(&self) -> &ChromiumPage {
        &self.page
    }

    /// 关闭浏览器并回收事件处理任务
    pub async fn close(mut self) {
        info!("正在关闭浏览器...");
        if let Err(e) = self.browser.close().await {
            warn!("浏览器未能正常关闭: {}", e);
        }
        if let Err(e) = self.browser.wait().await {
            debug!("等待浏览器进程退出失败: {}", e);
        }
        if let Some(handle) = self.handler_task.take() {
            handle.abort();
            let _ = handle.await;
        }
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        if let Some(handle) = &self.handler_task {
            if !handle.is_finished() {
                warn!("BrowserSession 未调用 close() 就被释放");
            }
        }
    }
}

fn build_config(settings: &BrowserSettings) -> BrowserResult<BrowserConfig> {
    let mut builder = BrowserConfig::builder()
        .window_size(settings.viewport_width, settings.viewport_height)
        .viewport(Viewport {
            width: settings.viewport_width,
            height: settings.viewport_height,
            device_scale_factor: None,
            emulating_mobile: false,
            is_landscape: settings.viewport_width >= settings.viewport_height,
            has_touch: false,
        })
        .args(vec![
            format!("--lang={}", settings.locale),
            "--disable-blink-features=AutomationControlled".to_string(),
            "--no-first-run".to_string(),
        ]);

    // 默认有头模式，遇到人机验证时操作员需要看到窗口
    if !settings.headless {
        builder = builder.with_head();
    }
    if let Some(path) = &settings.executable_path {
        builder = builder.chrome_executable(path);
    }

    builder.build().map_err(|e| {
        error!("配置浏览器失败: {}", e);
        BrowserError::Configuration(e)
    })
}

async fn configure_page(page: &Page, settings: &BrowserSettings) -> BrowserResult<()> {
    page.enable_stealth_mode_with_agent(&settings.user_agent)
        .await?;
    page.execute(SetLocaleOverrideParams {
        locale: Some(settings.locale.clone()),
    })
    .await?;
    page.execute(SetTimezoneOverrideParams::new(settings.timezone.clone()))
        .await?;
    Ok(())
}
