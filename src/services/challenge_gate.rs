//! 人机验证闸门 - 业务能力层
//!
//! 首次加载时内容标志迟迟不出现，就暂停等待操作员在浏览器窗口中手动通过验证。
//! 这里的等待没有超时，也不会尝试自动绕过；只有内容标志出现才能离开

use std::time::Duration;

use tracing::{info, warn};

use crate::browser::{PageDriver, Selector};
use crate::error::BrowserResult;

/// 人机验证闸门
#[derive(Debug, Clone)]
pub struct ChallengeGate {
    poll_interval: Duration,
}

impl ChallengeGate {
    pub fn new(poll_interval: Duration) -> Self {
        Self { poll_interval }
    }

    /// 无限期等待内容标志出现
    pub async fn await_clearance<D: PageDriver>(
        &self,
        driver: &D,
        marker: &Selector,
    ) -> BrowserResult<()> {
        warn!("🛑 检测到安全验证，请在浏览器窗口中手动完成验证");
        warn!("⏸️ 程序已暂停，等待验证通过...");

        driver
            .wait_for_selector(marker, None, self.poll_interval)
            .await?;

        info!("✓ 验证通过，继续抓取");
        Ok(())
    }
}
