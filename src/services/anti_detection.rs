//! 反检测行为 - 业务能力层
//!
//! 翻页之间插入随机等待、指针移动和滚动，只产生副作用，不返回错误

use std::time::Duration;

use rand::{thread_rng, Rng};
use tokio::time::sleep;
use tracing::debug;

use crate::browser::PageDriver;
use crate::config::EvasionSettings;

/// 一次模拟的具体动作
#[derive(Debug, Clone, PartialEq)]
pub struct EvasionPlan {
    pub delay: Duration,
    /// 指针经过的点，最后一个点是落点
    pub pointer_path: Vec<(f64, f64)>,
    pub scroll: f64,
}

/// 人类行为模拟器
#[derive(Debug, Clone)]
pub struct AntiDetection {
    settings: EvasionSettings,
    last_point: (f64, f64),
}

impl AntiDetection {
    pub fn new(settings: EvasionSettings) -> Self {
        Self {
            settings,
            last_point: (0.0, 0.0),
        }
    }

    /// 生成一次模拟动作
    pub fn plan<R: Rng>(&self, rng: &mut R) -> EvasionPlan {
        let [delay_min, delay_max] = self.settings.delay_ms;
        let delay = Duration::from_millis(sample(rng, delay_min, delay_max));

        let [width, height] = self.settings.pointer_region;
        let target = (
            sample(rng, 0, u64::from(width)) as f64,
            sample(rng, 0, u64::from(height)) as f64,
        );
        let steps = self.settings.pointer_steps.max(1);
        let (start_x, start_y) = self.last_point;
        let pointer_path = (1..=steps)
            .map(|step| {
                let t = f64::from(step) / f64::from(steps);
                (
                    start_x + (target.0 - start_x) * t,
                    start_y + (target.1 - start_y) * t,
                )
            })
            .collect();

        let [scroll_min, scroll_max] = self.settings.scroll_px;
        let scroll = sample(rng, u64::from(scroll_min), u64::from(scroll_max)) as f64;

        EvasionPlan {
            delay,
            pointer_path,
            scroll,
        }
    }

    /// 等待、移动指针、滚动
    ///
    /// 指针和滚动失败只记录 debug 日志
    pub async fn simulate<D: PageDriver>(&mut self, driver: &D) {
        let plan = {
            let mut rng = thread_rng();
            self.plan(&mut rng)
        };
        debug!(
            "模拟人类行为: 等待 {}ms, 滚动 {}px",
            plan.delay.as_millis(),
            plan.scroll
        );

        sleep(plan.delay).await;

        for &(x, y) in &plan.pointer_path {
            if let Err(e) = driver.move_pointer(x, y).await {
                debug!("指针移动失败: {}", e);
                break;
            }
            self.last_point = (x, y);
        }

        if let Err(e) = driver.scroll_by(plan.scroll).await {
            debug!("滚动失败: {}", e);
        }
    }
}

/// 在 `[min, max)` 内均匀取值，区间为空时返回 `min`
fn sample<R: Rng>(rng: &mut R, min: u64, max: u64) -> u64 {
    if max > min {
        rng.gen_range(min..max)
    } else {
        min
    }
}
