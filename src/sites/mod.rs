//! 站点适配层
//!
//! 每个站点实现同一组能力：
//! - `build_url` - 公司标识 → 列表页 URL
//! - `prepare` - 进入列表前的一次性步骤（可选）
//! - `extract_page` - 当前页上的全部评论容器
//! - `parse_item` - 单条评论的字段提取
//! - `locate_next_control` - 可点击的“下一页”
//!
//! 站点集合是封闭的，运行开始时由 `SiteTag` 选定一次，通过 `match` 分发

pub mod capterra;
pub mod field;
pub mod g2;
pub mod trustradius;

use chrono::NaiveDate;

use crate::browser::{PageDriver, Selector};
use crate::error::{BrowserResult, FieldResult};
use crate::models::{Rating, ReviewRecord, SiteTag};

pub use capterra::Capterra;
pub use g2::G2;
pub use trustradius::TrustRadius;

/// 站点原始的评论片段
///
/// 只能交还给产生它的适配器解析
pub struct RawItem<N>(N);

impl<N> RawItem<N> {
    fn node(&self) -> &N {
        &self.0
    }
}

/// 一条评论解析出的候选字段，尚未经过日期窗口过滤
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub date: NaiveDate,
    pub title: String,
    pub description: String,
    pub rating: Rating,
    pub reviewer: String,
}

impl Candidate {
    pub fn into_record(self, source: SiteTag) -> ReviewRecord {
        ReviewRecord {
            source,
            title: self.title,
            description: self.description,
            date: self.date,
            rating: self.rating,
            reviewer: self.reviewer,
        }
    }
}

/// 单条评论解析时可用的上下文
#[derive(Debug, Clone, Copy)]
pub struct ParseContext {
    /// 站点缺少日期时使用的“今天”
    pub today: NaiveDate,
}

/// 站点适配器
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteAdapter {
    G2(G2),
    Capterra(Capterra),
    TrustRadius(TrustRadius),
}

impl SiteAdapter {
    pub fn for_source(source: SiteTag) -> Self {
        match source {
            SiteTag::G2 => SiteAdapter::G2(G2),
            SiteTag::Capterra => SiteAdapter::Capterra(Capterra),
            SiteTag::TrustRadius => SiteAdapter::TrustRadius(TrustRadius),
        }
    }

    pub fn source(&self) -> SiteTag {
        match self {
            SiteAdapter::G2(_) => SiteTag::G2,
            SiteAdapter::Capterra(_) => SiteTag::Capterra,
            SiteAdapter::TrustRadius(_) => SiteTag::TrustRadius,
        }
    }

    /// 公司标识或完整 URL → 列表页 URL
    pub fn build_url(&self, company: &str) -> String {
        let template = match self {
            SiteAdapter::G2(_) => G2::URL_TEMPLATE,
            SiteAdapter::Capterra(_) => Capterra::URL_TEMPLATE,
            SiteAdapter::TrustRadius(_) => TrustRadius::URL_TEMPLATE,
        };
        build_url(template, company)
    }

    /// 列表内容已渲染的标志
    pub fn content_marker(&self) -> Selector {
        match self {
            SiteAdapter::G2(_) => G2::SELECTORS.review_card,
            SiteAdapter::Capterra(_) => Capterra::SELECTORS.review_card,
            SiteAdapter::TrustRadius(_) => TrustRadius::SELECTORS.review_card,
        }
    }

    /// 首次加载时内容迟迟不出现是否意味着人机验证
    pub fn has_challenge_gate(&self) -> bool {
        matches!(self, SiteAdapter::G2(_))
    }

    /// 翻页之间是否需要模拟人类行为
    pub fn needs_evasion(&self) -> bool {
        matches!(self, SiteAdapter::G2(_))
    }

    pub async fn prepare<D: PageDriver>(&self, driver: &D) -> BrowserResult<()> {
        match self {
            SiteAdapter::TrustRadius(site) => site.prepare(driver).await,
            SiteAdapter::G2(_) | SiteAdapter::Capterra(_) => Ok(()),
        }
    }

    pub async fn extract_page<D: PageDriver>(
        &self,
        driver: &D,
    ) -> BrowserResult<Vec<RawItem<D::Node>>> {
        let nodes = driver.find_all(&self.content_marker()).await?;
        Ok(nodes.into_iter().map(RawItem).collect())
    }

    pub async fn parse_item<D: PageDriver>(
        &self,
        driver: &D,
        item: &RawItem<D::Node>,
        ctx: &ParseContext,
    ) -> FieldResult<Candidate> {
        match self {
            SiteAdapter::G2(site) => site.parse_item(driver, item.node(), ctx).await,
            SiteAdapter::Capterra(site) => site.parse_item(driver, item.node(), ctx).await,
            SiteAdapter::TrustRadius(site) => site.parse_item(driver, item.node()).await,
        }
    }

    /// 找到可点击的“下一页”，不存在、不可见或已禁用时返回 `None`
    pub async fn locate_next_control<D: PageDriver>(
        &self,
        driver: &D,
    ) -> BrowserResult<Option<D::Node>> {
        match self {
            SiteAdapter::G2(_) => first_visible(driver, &G2::NEXT_CONTROLS).await,
            SiteAdapter::Capterra(site) => site.locate_next_control(driver).await,
            SiteAdapter::TrustRadius(_) => first_visible(driver, &TrustRadius::NEXT_CONTROLS).await,
        }
    }
}

/// 含有 URL scheme 的输入原样返回，否则填入站点模板
pub fn build_url(template: &str, company: &str) -> String {
    let company = company.trim();
    if company.contains("://") {
        company.to_string()
    } else {
        template.replace("{company}", company)
    }
}

/// 依次尝试候选选择器，返回第一个可见的节点
async fn first_visible<D: PageDriver>(
    driver: &D,
    candidates: &[Selector],
) -> BrowserResult<Option<D::Node>> {
    for selector in candidates {
        if let Some(node) = driver.find_first(selector).await? {
            if driver.is_visible(&node).await? {
                return Ok(Some(node));
            }
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_identifiers_use_the_site_template() {
        let cases = [
            (SiteTag::G2, "https://www.g2.com/products/notion/reviews"),
            (SiteTag::Capterra, "https://www.capterra.in/software/notion"),
            (
                SiteTag::TrustRadius,
                "https://www.trustradius.com/products/notion/reviews",
            ),
        ];
        for (source, expected) in cases {
            assert_eq!(SiteAdapter::for_source(source).build_url("notion"), expected);
        }
    }

    #[test]
    fn full_urls_pass_through_unchanged() {
        let url = "https://www.capterra.in/software/135003/slack";
        for source in SiteTag::ALL {
            assert_eq!(SiteAdapter::for_source(source).build_url(url), url);
        }
    }

    #[test]
    fn only_g2_uses_the_gate_and_evasion() {
        let g2 = SiteAdapter::for_source(SiteTag::G2);
        assert!(g2.has_challenge_gate() && g2.needs_evasion());
        for source in [SiteTag::Capterra, SiteTag::TrustRadius] {
            let adapter = SiteAdapter::for_source(source);
            assert!(!adapter.has_challenge_gate());
            assert!(!adapter.needs_evasion());
            assert_eq!(adapter.source(), source);
        }
    }
}
