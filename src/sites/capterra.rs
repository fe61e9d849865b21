//! Capterra 适配器
//!
//! 评分优先读评分文本，其次读星级容器的 aria-label；
//! 日期需要在多段头部文本中用正则查找

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::browser::{PageDriver, Selector};
use crate::error::{BrowserResult, FieldResult};
use crate::models::Rating;

use super::field::{all_texts, first_attribute, first_text, join_sections, OrFallback};
use super::{Candidate, ParseContext};

/// Capterra 页面选择器
#[derive(Debug, Clone, Copy)]
pub struct CapterraSelectors {
    pub review_card: Selector,
    pub title: Selector,
    pub reviewer: Selector,
    pub body_text: Selector,
    pub date_section: Selector,
    pub rating_text: Selector,
    pub star_container: Selector,
    pub next_button: Selector,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capterra;

impl Capterra {
    pub const URL_TEMPLATE: &'static str = "https://www.capterra.in/software/{company}";

    /// Capterra 使用 5 分制
    pub const RATING_SCALE: u8 = 5;

    pub const SELECTORS: CapterraSelectors = CapterraSelectors {
        review_card: Selector::css("div.review-card"),
        title: Selector::css("h3"),
        reviewer: Selector::css("div.fw-600"),
        body_text: Selector::css(".text-neutral-99"),
        date_section: Selector::css("div.text-neutral-90"),
        rating_text: Selector::css(".star-rating-component span.ms-1"),
        star_container: Selector::css(".star-rating-component"),
        next_button: Selector::with_text("button", "Next"),
    };

    pub async fn parse_item<D: PageDriver>(
        &self,
        driver: &D,
        node: &D::Node,
        ctx: &ParseContext,
    ) -> FieldResult<Candidate> {
        let s = &Self::SELECTORS;

        let rating = match first_text(driver, node, &s.rating_text, "rating").await {
            Ok(text) => Rating::scored(text, Self::RATING_SCALE),
            Err(_) => match first_attribute(driver, node, &s.star_container, "aria-label", "rating")
                .await
            {
                Ok(label) => rating_from_label(&label),
                Err(_) => Rating::NotAvailable,
            },
        };

        // 头部找不到日期时按当天处理
        let headers = all_texts(driver, node, &s.date_section, "date").await?;
        let date = find_header_date(&headers).unwrap_or(ctx.today);

        let title = first_text(driver, node, &s.title, "title").await.or_fallback("Review");
        let reviewer = first_text(driver, node, &s.reviewer, "reviewer")
            .await
            .or_fallback("Anonymous");
        let sections = all_texts(driver, node, &s.body_text, "description").await?;

        Ok(Candidate {
            date,
            title,
            description: join_sections(&sections, "\n"),
            rating,
            reviewer,
        })
    }

    /// 下一页按钮需要可见且可用
    pub async fn locate_next_control<D: PageDriver>(
        &self,
        driver: &D,
    ) -> BrowserResult<Option<D::Node>> {
        match driver.find_first(&Self::SELECTORS.next_button).await? {
            Some(node) if driver.is_actionable(&node).await? => Ok(Some(node)),
            _ => Ok(None),
        }
    }
}

fn date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(\d{1,2})\s([A-Za-z]+)\s(\d{4})").expect("date pattern is valid")
    })
}

/// 在多段头部文本中查找第一个 “日 月份名 年” 格式的日期
pub fn find_header_date(headers: &[String]) -> Option<NaiveDate> {
    headers.iter().find_map(|text| {
        let matched = date_pattern().find(text)?;
        NaiveDate::parse_from_str(matched.as_str(), "%d %B %Y").ok()
    })
}

/// aria-label 的第一个词是评分数值，如 "4.5 out of 5 stars"
pub fn rating_from_label(label: &str) -> Rating {
    match label.split_whitespace().next() {
        Some(value) => Rating::scored(value, Capterra::RATING_SCALE),
        None => Rating::NotAvailable,
    }
}
