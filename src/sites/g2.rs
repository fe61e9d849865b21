//! G2 适配器
//!
//! 日期来自结构化的 `datePublished`，缺失时使用当天日期；
//! 首次加载可能遇到人机验证，翻页之间需要模拟人类行为

use crate::browser::{PageDriver, Selector};
use crate::error::{FieldError, FieldResult};
use crate::models::{parse_calendar_date, Rating};

use super::field::{first_attribute, first_text, OrFallback};
use super::{Candidate, ParseContext};

/// G2 页面选择器
#[derive(Debug, Clone, Copy)]
pub struct G2Selectors {
    pub review_card: Selector,
    pub date_meta: Selector,
    pub rating_meta: Selector,
    pub title: Selector,
    pub body: Selector,
    pub reviewer: Selector,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct G2;

impl G2 {
    pub const URL_TEMPLATE: &'static str = "https://www.g2.com/products/{company}/reviews";

    /// G2 使用 5 分制
    pub const RATING_SCALE: u8 = 5;

    pub const SELECTORS: G2Selectors = G2Selectors {
        review_card: Selector::css("article"),
        date_meta: Selector::css(r#"meta[itemprop="datePublished"]"#),
        rating_meta: Selector::css(r#"[itemprop="ratingValue"]"#),
        title: Selector::css("h3"),
        body: Selector::css(r#"[itemprop="reviewBody"]"#),
        reviewer: Selector::css(r#"[itemprop="author"]"#),
    };

    /// 按顺序尝试，第一个可见的即为下一页
    pub const NEXT_CONTROLS: [Selector; 2] = [
        Selector::with_text("a", "Next"),
        Selector::css(r#"[rel="next"]"#),
    ];

    pub async fn parse_item<D: PageDriver>(
        &self,
        driver: &D,
        node: &D::Node,
        ctx: &ParseContext,
    ) -> FieldResult<Candidate> {
        let s = &Self::SELECTORS;

        // 没有 datePublished 时按当天处理；有但无法解析则丢弃该条
        let date = match first_attribute(driver, node, &s.date_meta, "content", "date").await {
            Ok(raw) => parse_calendar_date(&raw)
                .map_err(|_| FieldError::UnparseableDate { raw })?,
            Err(FieldError::Missing { .. } | FieldError::Empty { .. }) => ctx.today,
            Err(e) => return Err(e),
        };

        let title = first_text(driver, node, &s.title, "title").await.or_fallback("Review");
        let body = first_text(driver, node, &s.body, "description").await.or_fallback("");
        let reviewer = first_text(driver, node, &s.reviewer, "reviewer")
            .await
            .or_fallback("Anonymous");
        let rating = match first_attribute(driver, node, &s.rating_meta, "content", "rating").await
        {
            Ok(value) => Rating::scored(value, Self::RATING_SCALE),
            Err(_) => Rating::NotAvailable,
        };

        Ok(Candidate {
            date,
            title,
            description: collapse_newlines(&body),
            rating,
            reviewer,
        })
    }
}

/// 正文中的换行折叠为空格
pub fn collapse_newlines(text: &str) -> String {
    text.trim().replace("\r\n", " ").replace('\n', " ")
}
