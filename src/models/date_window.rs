//! 日期窗口
//!
//! 一次抓取运行只关心 `[start, end]` 闭区间内的评论

use chrono::NaiveDate;

use crate::error::WindowError;

/// 日历日期的标准格式
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// 闭区间日期窗口，构造后不可变
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    start: NaiveDate,
    end: NaiveDate,
}

/// 某个日期相对窗口的位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowPosition {
    /// 早于起始日期
    Before,
    /// 位于窗口内
    Within,
    /// 晚于结束日期
    After,
}

impl DateWindow {
    /// 创建日期窗口，`start > end` 时失败
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, WindowError> {
        if start > end {
            return Err(WindowError::StartAfterEnd { start, end });
        }
        Ok(Self { start, end })
    }

    /// 从两个 ISO 日期字符串创建
    pub fn parse(start: &str, end: &str) -> Result<Self, WindowError> {
        Self::new(parse_calendar_date(start)?, parse_calendar_date(end)?)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn position(&self, date: NaiveDate) -> WindowPosition {
        if date < self.start {
            WindowPosition::Before
        } else if date > self.end {
            WindowPosition::After
        } else {
            WindowPosition::Within
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.position(date) == WindowPosition::Within
    }
}

/// 解析 ISO 日历日期 (YYYY-MM-DD)
///
/// 也接受带时间部分的 ISO 时间戳，只取日期部分
pub fn parse_calendar_date(value: &str) -> Result<NaiveDate, WindowError> {
    let trimmed = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, ISO_DATE_FORMAT) {
        return Ok(date);
    }
    if let Ok(timestamp) = chrono::DateTime::parse_from_rfc3339(trimmed) {
        return Ok(timestamp.date_naive());
    }
    if let Ok(timestamp) = chrono::NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return Ok(timestamp.date());
    }
    Err(WindowError::InvalidDate {
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn rejects_start_after_end() {
        let err = DateWindow::new(date(2024, 7, 1), date(2024, 6, 1)).unwrap_err();
        assert_eq!(
            err,
            WindowError::StartAfterEnd {
                start: date(2024, 7, 1),
                end: date(2024, 6, 1)
            }
        );
    }

    #[test]
    fn single_day_window_is_valid() {
        let window = DateWindow::new(date(2024, 6, 1), date(2024, 6, 1)).unwrap();
        assert!(window.contains(date(2024, 6, 1)));
    }

    #[test]
    fn bounds_are_inclusive() {
        let window = DateWindow::parse("2024-06-01", "2024-06-30").unwrap();
        assert_eq!(window.position(date(2024, 5, 31)), WindowPosition::Before);
        assert_eq!(window.position(date(2024, 6, 1)), WindowPosition::Within);
        assert_eq!(window.position(date(2024, 6, 30)), WindowPosition::Within);
        assert_eq!(window.position(date(2024, 7, 1)), WindowPosition::After);
    }

    #[test]
    fn reparsing_iso_output_is_stable() {
        let parsed = parse_calendar_date("2024-02-29").unwrap();
        let reparsed = parse_calendar_date(&parsed.format(ISO_DATE_FORMAT).to_string()).unwrap();
        assert_eq!(parsed, reparsed);
        assert_eq!(parsed.to_string(), "2024-02-29");
    }

    #[test]
    fn accepts_timestamps() {
        assert_eq!(
            parse_calendar_date("2024-06-10T08:30:00Z").unwrap(),
            date(2024, 6, 10)
        );
        assert_eq!(
            parse_calendar_date("2024-06-10T08:30:00").unwrap(),
            date(2024, 6, 10)
        );
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            parse_calendar_date("10/06/2024"),
            Err(WindowError::InvalidDate { .. })
        ));
        assert!(DateWindow::parse("2024-13-01", "2024-12-31").is_err());
    }
}
