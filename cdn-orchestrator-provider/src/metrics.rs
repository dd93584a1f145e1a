//! 统计数据归一化
//!
//! 各厂商返回的时间序列形态不同：华为云按下标给出数值数组，腾讯云给出带时间字符串的点。
//! 这里统一整理成 `domain -> [{time, value}]`：先由请求窗口与粒度算出时间网格，
//! 每个请求域名在网格的每个时间点上恰好有一个值（缺失补 0）。
//! 状态码类指标按 `domain#code` 展开，只保留实际返回的状态码，不补零。

use crate::error::{ProviderError, Result};
use crate::types::{AccessStatsRequest, StatPoint, StatSeries};

/// 单次查询允许的最大时间点数
pub const MAX_GRID_POINTS: usize = 100_000;

fn grid_points(start: i64, end: i64, interval: i64) -> impl Iterator<Item = i64> {
    std::iter::successors((interval > 0).then_some(start), move |t| {
        t.checked_add(interval)
    })
    .take_while(move |t| *t < end)
}

/// 半开区间时间网格：`start, start + interval, ... < end`
///
/// `interval <= 0` 或 `end <= start` 时为空；最多 [`MAX_GRID_POINTS`] 个点。
pub fn timestamp_grid(start: i64, end: i64, interval: i64) -> Vec<i64> {
    grid_points(start, end, interval)
        .take(MAX_GRID_POINTS)
        .collect()
}

/// 查询前构造网格，超过 [`MAX_GRID_POINTS`] 的窗口返回 `InvalidRequest`
pub fn checked_grid(provider: &str, start: i64, end: i64, interval: i64) -> Result<Vec<i64>> {
    let grid: Vec<i64> = grid_points(start, end, interval)
        .take(MAX_GRID_POINTS + 1)
        .collect();
    if grid.len() > MAX_GRID_POINTS {
        return Err(ProviderError::InvalidRequest {
            provider: provider.to_string(),
            detail: format!(
                "time window {start}..{end} at {interval}s exceeds {MAX_GRID_POINTS} points"
            ),
        });
    }
    Ok(grid)
}

/// 网格上全为 0 的序列
pub fn zero_series(grid: &[i64]) -> Vec<StatPoint> {
    grid.iter().map(|&t| StatPoint::new(t, 0.0)).collect()
}

/// 状态码指标的序列 key
pub fn status_code_key(domain: &str, code: &str) -> String {
    format!("{domain}#{code}")
}

/// 为每个请求域名生成零填充序列
pub fn zero_filled(domains: &[String], grid: &[i64]) -> StatSeries {
    domains
        .iter()
        .map(|d| (d.clone(), zero_series(grid)))
        .collect()
}

/// 按下标把数值写入网格，超出网格的部分丢弃
pub fn place_by_index(series: &mut Vec<StatPoint>, grid: &[i64], values: &[f64]) {
    if series.len() != grid.len() {
        *series = zero_series(grid);
    }
    for (point, value) in series.iter_mut().zip(values) {
        point.value = *value;
    }
}

/// 按时间戳把数据点写入网格，不落在网格上的点丢弃
pub fn place_by_time(series: &mut Vec<StatPoint>, grid: &[i64], points: &[StatPoint]) {
    if series.len() != grid.len() {
        *series = zero_series(grid);
    }
    for p in points {
        if let Ok(idx) = grid.binary_search(&p.time) {
            series[idx].value = p.value;
        }
    }
}

/// 状态码序列：按下标与网格对齐，只保留网格内的部分
pub fn index_aligned(grid: &[i64], values: &[f64]) -> Vec<StatPoint> {
    grid.iter()
        .zip(values)
        .map(|(&t, &v)| StatPoint::new(t, v))
        .collect()
}

/// 过滤条件互斥校验，在任何网络调用之前执行
///
/// - 指定了 `ip_protocol` 时，`district` 与 `isp` 都不能指定
/// - 未指定 `ip_protocol` 时，`district` 与 `isp` 不能同时指定
pub fn verify_mutual_exclusion(provider: &str, req: &AccessStatsRequest) -> Result<()> {
    let detail = match (req.ip_protocol, req.district, req.isp) {
        (Some(_), Some(_), _) | (Some(_), _, Some(_)) => {
            "ip_protocol cannot be combined with district or isp"
        }
        (None, Some(_), Some(_)) => "district and isp cannot both be set",
        _ => return Ok(()),
    };
    Err(ProviderError::MutualExclusionViolation {
        provider: provider.to_string(),
        detail: detail.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{IpProtocol, IspCode, ProvinceCode};

    const HOUR: i64 = 3600;

    #[test]
    fn grid_is_half_open() {
        let grid = timestamp_grid(0, HOUR, 300);
        assert_eq!(grid.len(), 12);
        assert_eq!(grid.first(), Some(&0));
        assert_eq!(grid.last(), Some(&3300));
    }

    #[test]
    fn grid_degenerate_windows() {
        assert!(timestamp_grid(100, 100, 300).is_empty());
        assert!(timestamp_grid(200, 100, 300).is_empty());
        assert!(timestamp_grid(0, HOUR, 0).is_empty());
        assert_eq!(timestamp_grid(0, 301, 300), vec![0, 300]);
    }

    #[test]
    fn oversized_window_is_rejected() {
        let r = checked_grid("tencent", 0, i64::MAX, 300);
        assert!(
            matches!(&r, Err(ProviderError::InvalidRequest { .. })),
            "unexpected result: {:?}",
            r.map(|g| g.len())
        );
        assert_eq!(timestamp_grid(0, i64::MAX, 300).len(), MAX_GRID_POINTS);
        assert_eq!(timestamp_grid(i64::MAX - 10, i64::MAX, 300), vec![i64::MAX - 10]);

        let r = checked_grid("tencent", 0, HOUR, 300);
        assert!(matches!(&r, Ok(g) if g.len() == 12), "unexpected result: {r:?}");
    }

    #[test]
    fn sparse_domain_is_zero_filled() {
        let domains = vec!["a.com".to_string(), "b.com".to_string()];
        let grid = timestamp_grid(0, HOUR, 300);
        let mut series = zero_filled(&domains, &grid);

        let full: Vec<f64> = (0..12).map(f64::from).collect();
        if let Some(s) = series.get_mut("a.com") {
            place_by_index(s, &grid, &full);
        }
        let sparse = [
            StatPoint::new(0, 5.0),
            StatPoint::new(600, 6.0),
            StatPoint::new(1200, 7.0),
            // 不在网格上
            StatPoint::new(1201, 8.0),
        ];
        if let Some(s) = series.get_mut("b.com") {
            place_by_time(s, &grid, &sparse);
        }

        assert_eq!(series["a.com"].len(), 12);
        assert_eq!(series["b.com"].len(), 12);
        let zeros = series["b.com"].iter().filter(|p| p.value == 0.0).count();
        assert_eq!(zeros, 9);
        assert_eq!(series["b.com"][2], StatPoint::new(600, 6.0));
    }

    #[test]
    fn index_placement_drops_overflow() {
        let grid = timestamp_grid(0, 900, 300);
        let mut s = zero_series(&grid);
        place_by_index(&mut s, &grid, &[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(s.len(), 3);
        assert_eq!(s[2].value, 3.0);

        let codes = index_aligned(&grid, &[9.0]);
        assert_eq!(codes, vec![StatPoint::new(0, 9.0)]);
    }

    #[test]
    fn status_code_keys() {
        assert_eq!(status_code_key("a.com", "404"), "a.com#404");
    }

    // ============ 互斥校验 ============

    #[test]
    fn ip_protocol_with_district_is_rejected() {
        let req = AccessStatsRequest {
            ip_protocol: Some(IpProtocol::V6),
            district: Some(ProvinceCode::Beijing.code()),
            ..AccessStatsRequest::default()
        };
        let r = verify_mutual_exclusion("huaweicloud", &req);
        assert!(
            matches!(&r, Err(ProviderError::MutualExclusionViolation { .. })),
            "unexpected result: {r:?}"
        );
    }

    #[test]
    fn ip_protocol_with_isp_is_rejected() {
        let req = AccessStatsRequest {
            ip_protocol: Some(IpProtocol::V4),
            isp: Some(IspCode::Yidong),
            ..AccessStatsRequest::default()
        };
        assert!(verify_mutual_exclusion("tencent", &req).is_err());
    }

    #[test]
    fn district_with_isp_is_rejected() {
        let req = AccessStatsRequest {
            district: Some(ProvinceCode::Beijing.code()),
            isp: Some(IspCode::Yidong),
            ..AccessStatsRequest::default()
        };
        assert!(verify_mutual_exclusion("tencent", &req).is_err());
    }

    #[test]
    fn single_filters_are_allowed() {
        let only_ip = AccessStatsRequest {
            ip_protocol: Some(IpProtocol::V4),
            ..AccessStatsRequest::default()
        };
        let only_isp = AccessStatsRequest {
            isp: Some(IspCode::Dianxin),
            ..AccessStatsRequest::default()
        };
        assert!(verify_mutual_exclusion("t", &only_ip).is_ok());
        assert!(verify_mutual_exclusion("t", &only_isp).is_ok());
        assert!(verify_mutual_exclusion("t", &AccessStatsRequest::default()).is_ok());
    }
}
