//! 时间工具函数
//!
//! 所有持久化时间戳统一为 Unix millis (`i64`)，
//! 日期字符串只在 API handler 层校验。

use chrono::NaiveDate;

use super::{AppError, AppResult};

/// 当前 Unix millis
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// 解析日期字符串 (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_accepts_iso() {
        assert!(parse_date("2026-09-14").is_ok());
    }

    #[test]
    fn parse_date_rejects_garbage() {
        assert!(parse_date("14/09/2026").is_err());
        assert!(parse_date("").is_err());
    }
}
