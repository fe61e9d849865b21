//! TrustRadius 适配器
//!
//! 日期必须严格按 "Month DD, YYYY" 解析，失败的条目直接丢弃；
//! 评分来自 `data-rating` 属性，10 分制

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::browser::{PageDriver, Selector};
use crate::error::{BrowserResult, FieldError, FieldResult};
use crate::models::Rating;

use super::field::{all_texts, first_attribute, first_text, join_sections, OrFallback};
use super::Candidate;

/// TrustRadius 页面选择器
#[derive(Debug, Clone, Copy)]
pub struct TrustRadiusSelectors {
    pub review_card: Selector,
    pub title: Selector,
    pub date: Selector,
    pub reviewer: Selector,
    pub body_sections: Selector,
    pub rating_container: Selector,
    pub view_all_link: Selector,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrustRadius;

impl TrustRadius {
    pub const URL_TEMPLATE: &'static str = "https://www.trustradius.com/products/{company}/reviews";

    pub const RATING_SCALE: u8 = 10;

    pub const DATE_FORMAT: &'static str = "%B %d, %Y";

    pub const SELECTORS: TrustRadiusSelectors = TrustRadiusSelectors {
        review_card: Selector::css("article"),
        title: Selector::css(r#"h4, [class*="Header_heading"]"#),
        date: Selector::css(r#"[class*="Header_date"]"#),
        reviewer: Selector::css(r#"[class*="Byline_name"]"#),
        body_sections: Selector::css(r#"[class*="ReviewAnswer_longForm"]"#),
        rating_container: Selector::css(r#"[data-testid="stars-container"]"#),
        view_all_link: Selector::with_text("a", "View all reviews"),
    };

    pub const NEXT_CONTROLS: [Selector; 2] = [
        Selector::css(r#"a[aria-label="Next Page"]"#),
        Selector::with_text("a", "Next"),
    ];

    /// 产品页只显示摘要时，先进入完整评论列表
    pub async fn prepare<D: PageDriver>(&self, driver: &D) -> BrowserResult<()> {
        if driver.count(&Self::SELECTORS.review_card).await? > 0 {
            return Ok(());
        }
        match driver.find_first(&Self::SELECTORS.view_all_link).await? {
            Some(link) => {
                info!("正在加载完整评论列表...");
                driver.click(&link).await?;
                driver.wait_for_load().await?;
            }
            None => debug!("页面没有评论容器，也没有“View all reviews”链接"),
        }
        Ok(())
    }

    pub async fn parse_item<D: PageDriver>(
        &self,
        driver: &D,
        node: &D::Node,
    ) -> FieldResult<Candidate> {
        let s = &Self::SELECTORS;

        // 日期是硬性要求，没有回退
        let raw_date = first_text(driver, node, &s.date, "date").await?;
        let date = parse_review_date(&raw_date)?;

        let sections = all_texts(driver, node, &s.body_sections, "description").await?;
        let title = first_text(driver, node, &s.title, "title").await.or_fallback("Review");
        let reviewer = first_text(driver, node, &s.reviewer, "reviewer")
            .await
            .or_fallback("Verified User");
        let rating =
            match first_attribute(driver, node, &s.rating_container, "data-rating", "rating").await
            {
                Ok(value) => Rating::scored(value, Self::RATING_SCALE),
                Err(_) => Rating::NotAvailable,
            };

        Ok(Candidate {
            date,
            title,
            description: join_sections(&sections, "\n\n"),
            rating,
            reviewer,
        })
    }
}

/// 解析 "June 05, 2024" 格式的日期
pub fn parse_review_date(raw: &str) -> FieldResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), TrustRadius::DATE_FORMAT).map_err(|_| {
        FieldError::UnparseableDate {
            raw: raw.to_string(),
        }
    })
}
