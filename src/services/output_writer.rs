//! 结果写入服务 - 业务能力层
//!
//! 把一次运行的全部记录写成一个 JSON 数组文件（整体覆盖，不追加）

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::debug;

use crate::error::FileError;
use crate::models::{ReviewRecord, SiteTag};

/// 结果写入服务
pub struct OutputWriter {
    output_dir: PathBuf,
}

impl OutputWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// 输出文件路径：`<目录>/<公司>_<来源>_<yyyymmdd>.json`
    pub fn output_path(&self, company: &str, source: SiteTag, run_date: NaiveDate) -> PathBuf {
        let file_name = format!(
            "{}_{}_{}.json",
            safe_company_name(company),
            source.tag(),
            run_date.format("%Y%m%d")
        );
        self.output_dir.join(file_name)
    }

    /// 写入记录，返回文件路径
    pub async fn write(
        &self,
        records: &[ReviewRecord],
        company: &str,
        source: SiteTag,
        run_date: NaiveDate,
    ) -> Result<PathBuf, FileError> {
        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|source| FileError::CreateDirFailed {
                path: self.output_dir.display().to_string(),
                source,
            })?;

        let path = self.output_path(company, source, run_date);
        let json = serde_json::to_string_pretty(records)?;
        debug!("写入 {} 条记录到 {}", records.len(), path.display());

        tokio::fs::write(&path, json)
            .await
            .map_err(|source| FileError::WriteFailed {
                path: path.display().to_string(),
                source,
            })?;

        Ok(path)
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

/// 公司是 URL 时取最后一个非空路径段作为文件名
pub fn safe_company_name(company: &str) -> String {
    let company = company.trim();
    if !company.contains("://") {
        return company.to_string();
    }
    company
        .split('/')
        .filter(|segment| !segment.is_empty())
        .last()
        .unwrap_or(company)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_companies_use_last_path_segment() {
        assert_eq!(safe_company_name("slack"), "slack");
        assert_eq!(
            safe_company_name("https://www.capterra.in/software/135003/slack"),
            "slack"
        );
        assert_eq!(
            safe_company_name("https://www.trustradius.com/products/notion/reviews/"),
            "reviews"
        );
    }

    #[test]
    fn file_name_includes_source_and_run_date() {
        let writer = OutputWriter::new("output");
        let path = writer.output_path(
            "notion",
            SiteTag::TrustRadius,
            NaiveDate::from_ymd_opt(2024, 7, 2).unwrap(),
        );
        assert_eq!(path, PathBuf::from("output/notion_trustradius_20240702.json"));
    }
}
