//! 字段读取工具
//!
//! 每个字段都返回 `FieldResult`，由各站点决定是丢弃条目还是使用默认值

use tracing::debug;

use crate::browser::{PageDriver, Selector};
use crate::error::{FieldError, FieldResult};

/// 读取节点内第一个匹配元素的文本（已去除首尾空白）
pub async fn first_text<D: PageDriver>(
    driver: &D,
    scope: &D::Node,
    selector: &Selector,
    field: &'static str,
) -> FieldResult<String> {
    let node = driver
        .find_first_in(scope, selector)
        .await
        .map_err(|e| FieldError::browser(field, e))?
        .ok_or(FieldError::Missing { field })?;
    let text = driver
        .inner_text(&node)
        .await
        .map_err(|e| FieldError::browser(field, e))?
        .ok_or(FieldError::Missing { field })?;
    non_empty(text, field)
}

/// 读取节点内所有匹配元素的文本，按文档顺序
pub async fn all_texts<D: PageDriver>(
    driver: &D,
    scope: &D::Node,
    selector: &Selector,
    field: &'static str,
) -> FieldResult<Vec<String>> {
    let nodes = driver
        .find_all_in(scope, selector)
        .await
        .map_err(|e| FieldError::browser(field, e))?;
    let mut texts = Vec::with_capacity(nodes.len());
    for node in &nodes {
        let text = driver
            .inner_text(node)
            .await
            .map_err(|e| FieldError::browser(field, e))?;
        texts.push(text.unwrap_or_default());
    }
    Ok(texts)
}

/// 读取节点内第一个匹配元素的属性（已去除首尾空白）
pub async fn first_attribute<D: PageDriver>(
    driver: &D,
    scope: &D::Node,
    selector: &Selector,
    attribute: &str,
    field: &'static str,
) -> FieldResult<String> {
    let node = driver
        .find_first_in(scope, selector)
        .await
        .map_err(|e| FieldError::browser(field, e))?
        .ok_or(FieldError::Missing { field })?;
    let value = driver
        .attribute(&node, attribute)
        .await
        .map_err(|e| FieldError::browser(field, e))?
        .ok_or(FieldError::Missing { field })?;
    non_empty(value, field)
}

fn non_empty(value: String, field: &'static str) -> FieldResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(FieldError::Empty { field })
    } else {
        Ok(trimmed.to_string())
    }
}

/// 字段缺失时回退到站点默认值
pub trait OrFallback {
    fn or_fallback(self, fallback: &str) -> String;
}

impl OrFallback for FieldResult<String> {
    fn or_fallback(self, fallback: &str) -> String {
        self.unwrap_or_else(|e| {
            debug!("{}，使用默认值 '{}'", e, fallback);
            fallback.to_string()
        })
    }
}

/// 多段文本合并为一段
pub fn join_sections(sections: &[String], separator: &str) -> String {
    sections.join(separator).trim().to_string()
}
