//! 时间与分页工具
//!
//! 厂商接口的时间参数格式各不相同：
//! - 腾讯云使用 `YYYY-MM-DD HH:MM:SS` 本地时间字符串 + `UTC+08:00` 形式的时区标签
//! - 华为云使用毫秒时间戳
//!
//! 统一模型内部一律使用 Unix 秒。

use chrono::{DateTime, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;

/// 未指定时区时使用的默认时区
pub const DEFAULT_TIME_ZONE: &str = "Asia/Shanghai";

/// 厂商接口使用的日期时间格式
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 解析 IANA 时区名，缺省或无法识别时回退到 [`DEFAULT_TIME_ZONE`]
pub fn resolve_time_zone(name: Option<&str>) -> Tz {
    let Some(name) = name.filter(|n| !n.is_empty()) else {
        return chrono_tz::Asia::Shanghai;
    };
    name.parse::<Tz>().unwrap_or_else(|_| {
        log::warn!("Unknown time zone '{name}', falling back to {DEFAULT_TIME_ZONE}");
        chrono_tz::Asia::Shanghai
    })
}

/// Unix 秒 -> 指定时区的 `YYYY-MM-DD HH:MM:SS`
pub fn format_in_time_zone(timestamp: i64, tz: Tz) -> String {
    DateTime::<Utc>::from_timestamp(timestamp, 0)
        .unwrap_or_default()
        .with_timezone(&tz)
        .format(DATETIME_FORMAT)
        .to_string()
}

/// 指定时区的 `YYYY-MM-DD HH:MM:SS` -> Unix 秒，无法解析时返回 0
pub fn parse_in_time_zone(datetime: &str, tz: Tz) -> i64 {
    let Ok(naive) = NaiveDateTime::parse_from_str(datetime, DATETIME_FORMAT) else {
        log::warn!("Unparseable datetime '{datetime}'");
        return 0;
    };
    tz.from_local_datetime(&naive)
        .earliest()
        .map_or(0, |dt| dt.timestamp())
}

/// 时区在指定时刻的偏移标签，如 `UTC+08:00`、`UTC-05:00`
pub fn utc_offset_label_at(tz: Tz, at: DateTime<Utc>) -> String {
    let seconds = at.with_timezone(&tz).offset().fix().local_minus_utc();
    let sign = if seconds < 0 { '-' } else { '+' };
    let abs = seconds.unsigned_abs();
    format!("UTC{sign}{:02}:{:02}", abs / 3600, (abs % 3600) / 60)
}

/// 时区当前的偏移标签
pub fn utc_offset_label(tz: Tz) -> String {
    utc_offset_label_at(tz, Utc::now())
}

/// 页码/页大小 -> (offset, limit)
///
/// `page <= 0` 视为第 1 页，`page_size <= 0` 视为 10。
pub fn calc_offset_and_limit(page: i64, page_size: i64) -> (i64, i64) {
    let page = if page <= 0 { 1 } else { page };
    let page_size = if page_size <= 0 { 10 } else { page_size };
    ((page - 1) * page_size, page_size)
}

/// 页码归一化，返回 (page, page_size)
pub fn normalize_page(page: i64, page_size: i64) -> (i64, i64) {
    let (offset, limit) = calc_offset_and_limit(page, page_size);
    (offset / limit + 1, limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2024-01-15 08:00:00 UTC
    const TS: i64 = 1_705_305_600;

    #[test]
    fn format_shanghai() {
        let tz = resolve_time_zone(None);
        assert_eq!(format_in_time_zone(TS, tz), "2024-01-15 16:00:00");
    }

    #[test]
    fn format_and_parse_are_inverse() {
        let tz = resolve_time_zone(Some("America/New_York"));
        let text = format_in_time_zone(TS, tz);
        assert_eq!(text, "2024-01-15 03:00:00");
        assert_eq!(parse_in_time_zone(&text, tz), TS);
    }

    #[test]
    fn unknown_zone_falls_back() {
        assert_eq!(resolve_time_zone(Some("Mars/Olympus")), chrono_tz::Asia::Shanghai);
        assert_eq!(resolve_time_zone(Some("")), chrono_tz::Asia::Shanghai);
    }

    #[test]
    fn parse_invalid_returns_zero() {
        assert_eq!(parse_in_time_zone("yesterday", chrono_tz::UTC), 0);
    }

    #[test]
    fn parse_utc() {
        assert_eq!(parse_in_time_zone("2024-01-15 08:00:00", chrono_tz::UTC), TS);
    }

    #[test]
    fn offset_labels() {
        let at = DateTime::<Utc>::from_timestamp(TS, 0).unwrap_or_default();
        assert_eq!(utc_offset_label_at(chrono_tz::Asia::Shanghai, at), "UTC+08:00");
        assert_eq!(utc_offset_label_at(chrono_tz::America::New_York, at), "UTC-05:00");
        assert_eq!(utc_offset_label_at(chrono_tz::Asia::Kolkata, at), "UTC+05:30");
        assert_eq!(utc_offset_label_at(chrono_tz::UTC, at), "UTC+00:00");
    }

    #[test]
    fn paging_defaults() {
        assert_eq!(calc_offset_and_limit(0, 0), (0, 10));
        assert_eq!(calc_offset_and_limit(-3, 20), (0, 20));
        assert_eq!(calc_offset_and_limit(3, 20), (40, 20));
        assert_eq!(normalize_page(0, -1), (1, 10));
        assert_eq!(normalize_page(4, 25), (4, 25));
    }
}
