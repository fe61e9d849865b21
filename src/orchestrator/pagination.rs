//! 分页引擎 - 编排层
//!
//! ## 流程
//!
//! ```text
//! Navigating → Preparing ─┬─────────────────────→ Listing{1}
//!                         └→ AwaitingClearance ──→ Listing{1}
//! Listing{n} → 提取 / 过滤 → Advancing{n} → Listing{n+1}
//!     任何一步满足停止条件 → Done(StopReason)
//! ```
//!
//! 早停规则假设评论按日期从新到旧排列：遇到早于窗口起点的条目立即停止，
//! 当前页剩余条目和后续页面都不再处理。站点若按“最有帮助”等方式排序，
//! 会导致提前停止，这里不做检测。

use chrono::NaiveDate;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::browser::PageDriver;
use crate::config::{Config, EvasionSettings, TimingSettings};
use crate::error::{AppError, AppResult};
use crate::models::{DateWindow, ReviewRecord, WindowPosition};
use crate::services::{AntiDetection, ChallengeGate};
use crate::sites::{ParseContext, RawItem, SiteAdapter};
use crate::utils::logging;

/// 停止翻页的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// 遇到早于窗口起点的评论
    ReachedWindowStart,
    /// 没有可点击的下一页
    NoNextPage,
    /// 列表内容在限定时间内没有出现
    ContentTimeout,
}

/// 引擎状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Navigating,
    Preparing,
    /// 等待人工通过验证，没有超时，只能由内容标志出现而离开
    AwaitingClearance,
    Listing { page: usize },
    Advancing { page: usize },
    Done(StopReason),
}

/// 一次运行的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionResult {
    /// 按页面出现顺序排列的记录
    pub records: Vec<ReviewRecord>,
    pub pages_visited: usize,
    /// 解析失败或日期晚于窗口的条目数
    pub skipped_items: usize,
    pub stop: StopReason,
}

/// 引擎参数
#[derive(Debug, Clone)]
pub struct EngineOptions {
    pub timing: TimingSettings,
    pub evasion: EvasionSettings,
    /// 站点缺少日期时使用的日期，`None` 表示运行当天
    pub today: Option<NaiveDate>,
}

impl EngineOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            timing: config.timing.clone(),
            evasion: config.evasion.clone(),
            today: None,
        }
    }
}

/// 单页处理结果
#[derive(Debug, Default)]
struct PageOutcome {
    appended: usize,
    skipped: usize,
    reached_window_start: bool,
}

/// 分页引擎
///
/// 不持有浏览器资源，每次 `run` 都是独立的生命周期
pub struct PaginationEngine {
    options: EngineOptions,
}

impl PaginationEngine {
    pub fn new(options: EngineOptions) -> Self {
        Self { options }
    }

    /// 驱动适配器逐页抓取
    ///
    /// 只有首页无法到达时才返回错误；之后的任何问题都以部分结果结束
    pub async fn run<D: PageDriver>(
        &self,
        driver: &D,
        adapter: SiteAdapter,
        company: &str,
        window: DateWindow,
    ) -> AppResult<ExtractionResult> {
        let timing = &self.options.timing;
        let poll = timing.poll_interval();
        let marker = adapter.content_marker();
        let url = adapter.build_url(company);
        let ctx = ParseContext {
            today: self
                .options
                .today
                .unwrap_or_else(|| chrono::Local::now().date_naive()),
        };
        let gate = ChallengeGate::new(poll);
        let mut evasion = AntiDetection::new(self.options.evasion.clone());

        let mut records = Vec::new();
        let mut pages_visited = 0;
        let mut skipped_items = 0;
        let mut state = EngineState::Navigating;

        let stop = loop {
            debug!("engine_state={:?}", state);
            state = match state {
                EngineState::Done(reason) => break reason,

                EngineState::Navigating => {
                    info!("🌐 正在导航: {}", url);
                    driver
                        .goto(&url, timing.navigation_timeout())
                        .await
                        .map_err(|e| AppError::navigation(&url, e))?;
                    EngineState::Preparing
                }

                EngineState::Preparing if adapter.has_challenge_gate() => {
                    let rendered = driver
                        .wait_for_selector(&marker, Some(timing.challenge_probe_timeout()), poll)
                        .await
                        .map_err(|e| AppError::navigation(&url, e))?;
                    if rendered {
                        if adapter.needs_evasion() {
                            evasion.simulate(driver).await;
                        }
                        EngineState::Listing { page: 1 }
                    } else {
                        EngineState::AwaitingClearance
                    }
                }

                EngineState::Preparing => {
                    if let Err(e) = adapter.prepare(driver).await {
                        warn!("进入评论列表失败: {}", e);
                    }
                    EngineState::Listing { page: 1 }
                }

                EngineState::AwaitingClearance => {
                    gate.await_clearance(driver, &marker)
                        .await
                        .map_err(|e| AppError::navigation(&url, e))?;
                    if adapter.needs_evasion() {
                        evasion.simulate(driver).await;
                    }
                    EngineState::Listing { page: 1 }
                }

                EngineState::Listing { page } => {
                    info!("⏳ 等待第 {} 页内容...", page);
                    let ready = driver
                        .wait_for_selector(&marker, Some(timing.page_content_timeout()), poll)
                        .await
                        .unwrap_or(false);
                    if !ready {
                        warn!("⚠️ 未找到评论或页面被拦截");
                        EngineState::Done(StopReason::ContentTimeout)
                    } else {
                        pages_visited += 1;
                        let items = adapter.extract_page(driver).await.unwrap_or_else(|e| {
                            warn!("读取第 {} 页评论失败: {}", page, e);
                            Vec::new()
                        });
                        let total = items.len();
                        let outcome = self
                            .process_page(driver, &adapter, &items, &window, &ctx, &mut records)
                            .await;
                        skipped_items += outcome.skipped;
                        info!(
                            "📄 第 {} 页: 共 {} 条, 保留 {} 条, 跳过 {} 条",
                            page, total, outcome.appended, outcome.skipped
                        );
                        if outcome.reached_window_start {
                            EngineState::Done(StopReason::ReachedWindowStart)
                        } else {
                            EngineState::Advancing { page }
                        }
                    }
                }

                EngineState::Advancing { page } => {
                    self.advance(driver, &adapter, &mut evasion, page).await
                }
            };
        };

        log_stop(stop, records.len());

        Ok(ExtractionResult {
            records,
            pages_visited,
            skipped_items,
            stop,
        })
    }

    /// 按页面顺序处理条目，遇到早于窗口起点的条目立即停止
    async fn process_page<D: PageDriver>(
        &self,
        driver: &D,
        adapter: &SiteAdapter,
        items: &[RawItem<D::Node>],
        window: &DateWindow,
        ctx: &ParseContext,
        records: &mut Vec<ReviewRecord>,
    ) -> PageOutcome {
        let mut outcome = PageOutcome::default();

        for item in items {
            let candidate = match adapter.parse_item(driver, item, ctx).await {
                Ok(candidate) => candidate,
                Err(e) => {
                    debug!("跳过一条评论: {}", e);
                    outcome.skipped += 1;
                    continue;
                }
            };

            match window.position(candidate.date) {
                WindowPosition::Before => {
                    debug!("评论日期 {} 早于窗口起点，停止翻页", candidate.date);
                    outcome.reached_window_start = true;
                    break;
                }
                WindowPosition::After => {
                    debug!("评论日期 {} 晚于窗口终点，跳过", candidate.date);
                    outcome.skipped += 1;
                }
                WindowPosition::Within => {
                    debug!(
                        "保留 [{}] {}",
                        candidate.date,
                        logging::truncate_text(&candidate.title, 60)
                    );
                    records.push(candidate.into_record(adapter.source()));
                    outcome.appended += 1;
                }
            }
        }

        outcome
    }

    /// 点击下一页；找不到或点不动都视为自然结束
    async fn advance<D: PageDriver>(
        &self,
        driver: &D,
        adapter: &SiteAdapter,
        evasion: &mut AntiDetection,
        page: usize,
    ) -> EngineState {
        let next = match adapter.locate_next_control(driver).await {
            Ok(Some(next)) => next,
            Ok(None) => return EngineState::Done(StopReason::NoNextPage),
            Err(e) => {
                debug!("查找下一页失败: {}", e);
                return EngineState::Done(StopReason::NoNextPage);
            }
        };

        if let Err(e) = driver.click(&next).await {
            debug!("点击下一页失败: {}", e);
            return EngineState::Done(StopReason::NoNextPage);
        }

        sleep(self.options.timing.settle_delay()).await;
        if adapter.needs_evasion() {
            evasion.simulate(driver).await;
        }
        EngineState::Listing { page: page + 1 }
    }
}

fn log_stop(stop: StopReason, count: usize) {
    match stop {
        StopReason::ReachedWindowStart => info!("✓ 已到达日期窗口起点，停止翻页"),
        StopReason::NoNextPage => info!("✓ 没有更多页面"),
        StopReason::ContentTimeout => info!("✓ 列表内容未出现，结束抓取"),
    }
    info!("✅ 共提取 {} 条评论", count);
}
