use chrono::NaiveDate;
use serde::{Serialize, Serializer};

use super::source::SiteTag;

/// 规范化后的评分，序列化为 `"<value>/<scale>"` 或 `"N/A"`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rating {
    Scored { value: String, scale: u8 },
    NotAvailable,
}

impl Rating {
    /// 由站点原始文本构造，空白文本视为无评分
    pub fn scored(value: impl AsRef<str>, scale: u8) -> Self {
        let value = value.as_ref().trim();
        if value.is_empty() {
            Rating::NotAvailable
        } else {
            Rating::Scored {
                value: value.to_string(),
                scale,
            }
        }
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rating::Scored { value, scale } => write!(f, "{}/{}", value, scale),
            Rating::NotAvailable => f.write_str("N/A"),
        }
    }
}

impl Serialize for Rating {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// 一条规范化的评论记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewRecord {
    #[serde(serialize_with = "serialize_source")]
    pub source: SiteTag,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub rating: Rating,
    pub reviewer: String,
}

fn serialize_source<S: Serializer>(source: &SiteTag, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(source.name())
}
