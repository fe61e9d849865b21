//! Chromium 页面驱动 - 基础设施层
//!
//! 持有唯一的 page 资源，把 CDP 调用包装成 `PageDriver` 能力

use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::element::Element;
use chromiumoxide::layout::Point;
use chromiumoxide::Page;
use tracing::debug;

use super::driver::{PageDriver, Selector};
use crate::error::{BrowserError, BrowserResult};

const VISIBLE_JS: &str = r#"function() {
    const rect = this.getBoundingClientRect();
    const style = window.getComputedStyle(this);
    return rect.width > 0 && rect.height > 0
        && style.visibility !== 'hidden'
        && style.display !== 'none';
}"#;

const ENABLED_JS: &str = r#"function() {
    return !this.disabled && this.getAttribute('aria-disabled') !== 'true';
}"#;

/// Chromium 页面驱动
///
/// 职责：
/// - 持有 Page
/// - 实现选择器的文本过滤
/// - 不认识任何站点
pub struct ChromiumPage {
    page: Page,
}

impl ChromiumPage {
    /// 创建新的页面驱动
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    /// 获取 page 的引用（用于其他操作）
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// 在元素上执行返回布尔值的 JS 函数
    async fn eval_bool(&self, node: &Element, js_fn: &str) -> BrowserResult<bool> {
        let returns = node.call_js_fn(js_fn, false).await?;
        Ok(returns
            .result
            .value
            .and_then(|v| v.as_bool())
            .unwrap_or(false))
    }

    /// 按选择器的文本条件过滤节点
    async fn filter_by_text(
        &self,
        nodes: Vec<Element>,
        selector: &Selector,
    ) -> BrowserResult<Vec<Element>> {
        let Some(needle) = selector.text else {
            return Ok(nodes);
        };
        let needle = needle.to_lowercase();
        let mut matched = Vec::with_capacity(nodes.len());
        for node in nodes {
            let text = node.inner_text().await?.unwrap_or_default();
            if text.to_lowercase().contains(&needle) {
                matched.push(node);
            }
        }
        Ok(matched)
    }
}

#[async_trait]
impl PageDriver for ChromiumPage {
    type Node = Element;

    async fn goto(&self, url: &str, timeout: Duration) -> BrowserResult<()> {
        debug!("导航到: {}", url);
        tokio::time::timeout(timeout, async {
            self.page.goto(url).await?;
            self.page.wait_for_navigation().await?;
            Ok::<_, BrowserError>(())
        })
        .await
        .map_err(|_| BrowserError::Timeout {
            what: format!("页面加载 {}", url),
            millis: timeout.as_millis() as u64,
        })?
    }

    async fn wait_for_load(&self) -> BrowserResult<()> {
        self.page.wait_for_navigation().await?;
        Ok(())
    }

    async fn find_all(&self, selector: &Selector) -> BrowserResult<Vec<Element>> {
        let nodes = self.page.find_elements(selector.css).await?;
        self.filter_by_text(nodes, selector).await
    }

    async fn find_all_in(&self, node: &Element, selector: &Selector) -> BrowserResult<Vec<Element>> {
        let nodes = node.find_elements(selector.css).await?;
        self.filter_by_text(nodes, selector).await
    }

    async fn inner_text(&self, node: &Element) -> BrowserResult<Option<String>> {
        Ok(node.inner_text().await?)
    }

    async fn attribute(&self, node: &Element, name: &str) -> BrowserResult<Option<String>> {
        Ok(node.attribute(name).await?)
    }

    async fn is_visible(&self, node: &Element) -> BrowserResult<bool> {
        self.eval_bool(node, VISIBLE_JS).await
    }

    async fn is_enabled(&self, node: &Element) -> BrowserResult<bool> {
        self.eval_bool(node, ENABLED_JS).await
    }

    async fn click(&self, node: &Element) -> BrowserResult<()> {
        node.click().await?;
        Ok(())
    }

    async fn move_pointer(&self, x: f64, y: f64) -> BrowserResult<()> {
        self.page.move_mouse(Point::new(x, y)).await?;
        Ok(())
    }

    async fn scroll_by(&self, delta_y: f64) -> BrowserResult<()> {
        let js = format!("window.scrollBy(0, {});", delta_y);
        self.page.evaluate(js.as_str()).await?;
        Ok(())
    }
}
