//! 页面驱动能力 - 基础设施层
//!
//! 只暴露“导航 / 查询 / 读取 / 点击 / 指针 / 滚动”能力，
//! 不认识任何站点，也不关心分页流程

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::{sleep, Instant};
use tracing::debug;

use crate::error::BrowserResult;

/// 选择器：CSS 表达式 + 可选的文本过滤
///
/// `text` 要求节点的 innerText 包含该文本，用于定位“Next”这类按钮
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Selector {
    pub css: &'static str,
    pub text: Option<&'static str>,
}

impl Selector {
    pub const fn css(css: &'static str) -> Self {
        Self { css, text: None }
    }

    pub const fn with_text(css: &'static str, text: &'static str) -> Self {
        Self {
            css,
            text: Some(text),
        }
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.text {
            Some(text) => write!(f, "{}:has-text(\"{}\")", self.css, text),
            None => f.write_str(self.css),
        }
    }
}

/// 浏览器页面能力
///
/// 所有读取类操作都允许“软失败”：查不到返回空 / `None`，
/// 只有浏览器本身出错时才返回 `Err`
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// 页面上的 DOM 节点句柄
    type Node: Send + Sync;

    /// 导航到 URL，等待页面加载完成，超过 `timeout` 视为失败
    async fn goto(&self, url: &str, timeout: Duration) -> BrowserResult<()>;

    /// 等待当前导航（点击链接之后）完成
    async fn wait_for_load(&self) -> BrowserResult<()>;

    /// 页面上所有匹配节点，按文档顺序
    async fn find_all(&self, selector: &Selector) -> BrowserResult<Vec<Self::Node>>;

    /// 节点内所有匹配的子孙节点，按文档顺序
    async fn find_all_in(
        &self,
        node: &Self::Node,
        selector: &Selector,
    ) -> BrowserResult<Vec<Self::Node>>;

    /// 节点的 innerText
    async fn inner_text(&self, node: &Self::Node) -> BrowserResult<Option<String>>;

    /// 节点属性
    async fn attribute(&self, node: &Self::Node, name: &str) -> BrowserResult<Option<String>>;

    async fn is_visible(&self, node: &Self::Node) -> BrowserResult<bool>;

    async fn is_enabled(&self, node: &Self::Node) -> BrowserResult<bool>;

    async fn click(&self, node: &Self::Node) -> BrowserResult<()>;

    /// 把虚拟指针移动到视口坐标
    async fn move_pointer(&self, x: f64, y: f64) -> BrowserResult<()>;

    /// 垂直滚动视口
    async fn scroll_by(&self, delta_y: f64) -> BrowserResult<()>;

    async fn find_first(&self, selector: &Selector) -> BrowserResult<Option<Self::Node>> {
        Ok(self.find_all(selector).await?.into_iter().next())
    }

    async fn find_first_in(
        &self,
        node: &Self::Node,
        selector: &Selector,
    ) -> BrowserResult<Option<Self::Node>> {
        Ok(self.find_all_in(node, selector).await?.into_iter().next())
    }

    async fn count(&self, selector: &Selector) -> BrowserResult<usize> {
        Ok(self.find_all(selector).await?.len())
    }

    /// 等待选择器出现
    ///
    /// `timeout` 为 `None` 时无限等待。超时返回 `Ok(false)`，不是错误。
    /// 轮询期间的浏览器错误按“尚未出现”处理（页面可能正在跳转）
    async fn wait_for_selector(
        &self,
        selector: &Selector,
        timeout: Option<Duration>,
        poll_interval: Duration,
    ) -> BrowserResult<bool> {
        let deadline = timeout.map(|t| Instant::now() + t);
        loop {
            match self.count(selector).await {
                Ok(n) if n > 0 => return Ok(true),
                Ok(_) => {}
                Err(e) => debug!("等待 {} 时查询失败: {}", selector, e),
            }
            if let Some(deadline) = deadline {
                if Instant::now() >= deadline {
                    return Ok(false);
                }
            }
            sleep(poll_interval).await;
        }
    }

    /// 节点是否可以点击：可见且未禁用
    async fn is_actionable(&self, node: &Self::Node) -> BrowserResult<bool> {
        Ok(self.is_visible(node).await? && self.is_enabled(node).await?)
    }
}
