//! 腾讯云枚举映射
//!
//! 统一枚举 -> 腾讯云 CDN API 字符串/数字编码，以及域名/任务相关的反向映射。

use std::net::IpAddr;

use crate::types::{
    AccessMetric, AreaCode, AuthRange, CacheParameterStatus, CacheStatus, ChannelType,
    CompressMethod, CompressRuleType, CountryCode, DataInterval, DomainStatus, EffectiveType,
    EncryptManner, HeaderAction, HttpProtocol, HttpsJumpType, IpProtocol, IspCode, ListType,
    OriginMateMethod, OriginMetric, OriginProtocol, OriginUrlMatchMode, ProductType, ProvinceCode,
    PurgePathMode, PurgeType, RemoteAuthTimeoutAction, RequestMethod, RequestUrlRewriteType,
    RuleType, Switch, TaskStatus, TimeFormat, TlsVersion, TopFilter,
};

// ============ 域名 ============

pub fn area(area: AreaCode) -> &'static str {
    match area {
        AreaCode::Mainland => "mainland",
        AreaCode::Oversea => "overseas",
        AreaCode::Global => "global",
    }
}

pub fn area_from(value: &str) -> AreaCode {
    match value {
        "overseas" => AreaCode::Oversea,
        "global" => AreaCode::Global,
        _ => AreaCode::Mainland,
    }
}

pub fn service_type(channel: ChannelType) -> &'static str {
    match channel {
        ChannelType::Web => "web",
        ChannelType::Download => "download",
        ChannelType::Media => "media",
        ChannelType::Hybrid => "hybrid",
    }
}

pub fn channel_from(value: &str) -> ChannelType {
    match value {
        "download" => ChannelType::Download,
        "media" => ChannelType::Media,
        "hybrid" => ChannelType::Hybrid,
        _ => ChannelType::Web,
    }
}

pub fn domain_status(value: &str) -> DomainStatus {
    match value {
        "online" => DomainStatus::Deployed,
        "closing" => DomainStatus::Stopping,
        "offline" => DomainStatus::Stopped,
        // rejected / processing
        _ => DomainStatus::Deploying,
    }
}

/// 列表过滤用的状态值
pub fn domain_status_filter(status: DomainStatus) -> &'static str {
    match status {
        DomainStatus::Deploying | DomainStatus::Failed => "processing",
        DomainStatus::Deployed => "online",
        DomainStatus::Stopping => "closing",
        DomainStatus::Stopped => "offline",
        DomainStatus::Deleting | DomainStatus::Deleted => "deleted",
    }
}

pub fn product(product: ProductType) -> &'static str {
    match product {
        ProductType::Cdn => "cdn",
        ProductType::Ecdn => "ecdn",
    }
}

// ============ 规则匹配 ============

pub fn rule_type(rule: RuleType) -> &'static str {
    match rule {
        RuleType::All => "all",
        RuleType::FileSuffix => "file",
        RuleType::Directory => "directory",
        RuleType::Path => "path",
        RuleType::Index => "index",
        RuleType::ContentType => "contentType",
    }
}

/// 规则匹配内容：`All` 使用 `*`，首页使用 `/`
pub fn rule_paths(rule: RuleType, content: &[String]) -> Vec<String> {
    match rule {
        RuleType::Index => vec!["/".to_string()],
        _ if rule == RuleType::All || content.is_empty() => vec!["*".to_string()],
        _ => content.to_vec(),
    }
}

pub fn effective_type(effective: EffectiveType) -> &'static str {
    match effective {
        EffectiveType::All => "all",
        EffectiveType::FileSuffix => "file",
        EffectiveType::Directory => "directory",
        EffectiveType::Path => "path",
        EffectiveType::Index => "index",
    }
}

pub fn effective_paths(effective: EffectiveType, content: &[String]) -> Vec<String> {
    if effective == EffectiveType::All || content.is_empty() {
        return vec!["*".to_string()];
    }
    if effective == EffectiveType::Index {
        return vec!["/".to_string()];
    }
    content.to_vec()
}

pub fn compress_rule_type(rule: CompressRuleType) -> &'static str {
    match rule {
        CompressRuleType::All => "all",
        CompressRuleType::FileSuffix => "file",
        CompressRuleType::ContentType => "contentType",
    }
}

pub fn compress_paths(rule: CompressRuleType, content: &[String]) -> Vec<String> {
    if rule == CompressRuleType::All || content.is_empty() {
        return vec!["*".to_string()];
    }
    content.to_vec()
}

pub fn switch(value: Switch) -> &'static str {
    if value.is_on() { "on" } else { "off" }
}

pub fn list_type(list: ListType) -> &'static str {
    match list {
        ListType::Black => "blacklist",
        ListType::White => "whitelist",
    }
}

// ============ 回源 ============

pub fn origin_pull_protocol(protocol: OriginProtocol) -> &'static str {
    match protocol {
        OriginProtocol::Http => "http",
        OriginProtocol::Https => "https",
        OriginProtocol::Follow => "follow",
    }
}

/// 根据回源地址推断源站类型：`ip` / `ipv6` / `domain`，混合时用 `_` 连接
pub fn origin_type_by_addresses<'a>(addresses: impl IntoIterator<Item = &'a str>) -> String {
    let (mut v4, mut v6, mut domain) = (false, false, false);
    for addr in addresses {
        match addr.parse::<IpAddr>() {
            Ok(IpAddr::V4(_)) => v4 = true,
            Ok(IpAddr::V6(_)) => v6 = true,
            Err(_) => domain = true,
        }
    }
    let mut kinds = Vec::new();
    if v4 {
        kinds.push("ip");
    }
    if v6 {
        kinds.push("ipv6");
    }
    if domain {
        kinds.push("domain");
    }
    kinds.join("_")
}

/// `addr[:port][:weight]`，权重只在同角色有多个源站时追加
pub fn origin_address(address: &str, port: i64, weight: i64, role_len: usize) -> String {
    let mut out = address.to_string();
    if port != 0 {
        out.push_str(&format!(":{port}"));
    }
    if weight != 0 && role_len > 1 {
        out.push_str(&format!(":{weight}"));
    }
    out
}

pub fn header_mode(action: HeaderAction) -> &'static str {
    match action {
        HeaderAction::Delete => "del",
        HeaderAction::Set => "set",
        HeaderAction::Add => "add",
    }
}

/// 回源 URL 改写：除 `All` 外均按正则匹配
pub fn origin_url_regex(method: OriginMateMethod) -> bool {
    method != OriginMateMethod::All
}

pub fn origin_url_full_match(method: OriginMateMethod) -> bool {
    method == OriginMateMethod::All
}

pub fn advance_rule_type(mode: OriginUrlMatchMode) -> &'static str {
    match mode {
        OriginUrlMatchMode::File => "file",
        OriginUrlMatchMode::Directory => "directory",
    }
}

// ============ 鉴权 ============

pub fn auth_filter_type(range: AuthRange) -> &'static str {
    match range {
        AuthRange::All | AuthRange::Include => "blacklist",
        AuthRange::Exclude => "whitelist",
    }
}

pub fn auth_file_extensions(suffixes: &[String]) -> Vec<String> {
    match suffixes.first() {
        None => vec!["*".to_string()],
        Some(first) if first.is_empty() => vec!["*".to_string()],
        Some(_) => suffixes.to_vec(),
    }
}

pub fn auth_algorithm(encrypt: EncryptManner) -> &'static str {
    match encrypt {
        EncryptManner::Md5 => "md5",
        EncryptManner::Sha256 => "sha256",
    }
}

pub fn time_format(format: TimeFormat) -> &'static str {
    match format {
        TimeFormat::Dec => "dec",
        TimeFormat::Hex => "hex",
    }
}

pub fn auth_timeout_action(action: RemoteAuthTimeoutAction) -> &'static str {
    match action {
        RemoteAuthTimeoutAction::Return200 => "RETURN_200",
        RemoteAuthTimeoutAction::Return403 => "RETURN_403",
    }
}

pub fn remote_auth_method(method: RequestMethod) -> &'static str {
    match method {
        RequestMethod::Get => "get",
        RequestMethod::Post => "post",
        RequestMethod::Head => "head",
    }
}

// ============ 缓存 / 重写 ============

pub fn follow_origin(status: CacheStatus) -> &'static str {
    switch(Switch::from(status == CacheStatus::Follow))
}

/// `CacheParameterStatus::Off` 表示不忽略参数，即全路径缓存
pub fn full_url_cache(status: CacheParameterStatus) -> &'static str {
    switch(Switch::from(status == CacheParameterStatus::Off))
}

/// 参数过滤动作，只有 include/exclude 才需要下发
pub fn query_string_action(status: CacheParameterStatus) -> Option<&'static str> {
    match status {
        CacheParameterStatus::Include => Some("includeCustom"),
        CacheParameterStatus::Exclude => Some("excludeCustom"),
        CacheParameterStatus::Off | CacheParameterStatus::All => None,
    }
}

pub fn url_redirect_full_match(method: RequestUrlRewriteType) -> bool {
    method == RequestUrlRewriteType::FullPath
}

// ============ HTTPS / 压缩 ============

pub fn tls_version(version: TlsVersion) -> &'static str {
    match version {
        TlsVersion::V1_0 => "TLSv1",
        TlsVersion::V1_1 => "TLSv1.1",
        TlsVersion::V1_2 => "TLSv1.2",
        TlsVersion::V1_3 => "TLSv1.3",
    }
}

/// 未指定 TLS 版本时开启 1.0 ~ 1.2
pub fn tls_versions(versions: &[TlsVersion]) -> Vec<String> {
    if versions.is_empty() {
        return ["TLSv1", "TLSv1.1", "TLSv1.2"]
            .iter()
            .map(ToString::to_string)
            .collect();
    }
    versions.iter().map(|v| tls_version(*v).to_string()).collect()
}

pub fn jump_type(jump: HttpsJumpType) -> &'static str {
    match jump {
        HttpsJumpType::Http => "http",
        HttpsJumpType::Https => "https",
    }
}

pub fn compress_algorithm(method: CompressMethod) -> &'static str {
    match method {
        CompressMethod::Gzip => "gzip",
        CompressMethod::Brotli => "brotli",
    }
}

// ============ 刷新预热 ============

pub fn task_status(value: &str) -> TaskStatus {
    match value {
        "done" => TaskStatus::Success,
        "process" => TaskStatus::Doing,
        // fail 及未知值
        _ => TaskStatus::Fail,
    }
}

pub fn task_status_filter(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Doing => "process",
        TaskStatus::Success => "done",
        TaskStatus::Fail => "fail",
    }
}

pub fn purge_type(purge: PurgeType) -> &'static str {
    match purge {
        PurgeType::Url => "url",
        PurgeType::Path => "path",
    }
}

pub fn flush_type(mode: PurgePathMode) -> &'static str {
    match mode {
        PurgePathMode::All => "delete",
        PurgePathMode::File => "flush",
    }
}

// ============ 统计 ============

pub fn ip_protocol(ip: IpProtocol) -> &'static str {
    match ip {
        IpProtocol::V4 => "ipv4",
        IpProtocol::V6 => "ipv6",
    }
}

pub fn http_protocol(protocol: HttpProtocol) -> &'static str {
    match protocol {
        HttpProtocol::Https => "https",
        HttpProtocol::Http | HttpProtocol::Quic => "http",
    }
}

pub fn access_metric(metric: AccessMetric) -> &'static str {
    match metric {
        AccessMetric::Flux => "flux",
        AccessMetric::Bandwidth => "bandwidth",
        AccessMetric::Request => "request",
        AccessMetric::HitRequest => "hitRequest",
        AccessMetric::HitFlux => "hitFlux",
        AccessMetric::Status2xx => "2xx",
        AccessMetric::Status3xx => "3xx",
        AccessMetric::Status4xx => "4xx",
        AccessMetric::Status5xx => "5xx",
    }
}

pub fn origin_metric(metric: OriginMetric) -> &'static str {
    match metric {
        OriginMetric::Flux => "flux",
        OriginMetric::Bandwidth => "bandwidth",
        OriginMetric::Request => "request",
        OriginMetric::FailRequest => "failRequest",
        OriginMetric::Status2xx => "2xx",
        OriginMetric::Status3xx => "3xx",
        OriginMetric::Status4xx => "4xx",
        OriginMetric::Status5xx => "5xx",
    }
}

pub fn interval(interval: DataInterval) -> &'static str {
    match interval {
        DataInterval::FiveMinutes => "5min",
        DataInterval::Hour => "hour",
        DataInterval::Day => "day",
    }
}

pub fn top_filter(filter: TopFilter) -> &'static str {
    match filter {
        TopFilter::Flux => "flux",
        TopFilter::Request => "request",
    }
}

// ============ 地区 / 运营商 ============

/// 境外查询中代表中国境内的国家编码
pub const CHINA_COUNTRY: i64 = 4460;
/// 境内查询中代表境外的省份编码
pub const OVERSEA_PROVINCE: i64 = -1;

pub fn country(code: CountryCode) -> i64 {
    match code {
        CountryCode::Cn => CHINA_COUNTRY,
        CountryCode::Ae => 386,
        CountryCode::Au => 4450,
        CountryCode::Br => 2613,
        CountryCode::Ca => 3839,
        CountryCode::Ch => 707,
        CountryCode::De => 209,
        CountryCode::Es => 214,
        CountryCode::Fr => 192,
        CountryCode::Gb => 207,
        CountryCode::Id => 1195,
        CountryCode::Il => 391,
        CountryCode::In => 73,
        CountryCode::It => 213,
        CountryCode::Jp => 1044,
        CountryCode::Kr => 3379,
        CountryCode::Mx => 2626,
        CountryCode::My => 3701,
        CountryCode::Nl => 714,
        CountryCode::No => 578,
        CountryCode::Ph => 2588,
        CountryCode::Qa => 1233,
        CountryCode::Sa => 471,
        CountryCode::Se => 208,
        CountryCode::Sg => 1176,
        CountryCode::Th => 57,
        CountryCode::Us => 669,
        CountryCode::Vn => 144,
        CountryCode::Za => 1559,
    }
}

pub fn province(code: ProvinceCode) -> i64 {
    match code {
        ProvinceCode::Anhui => 121,
        ProvinceCode::Beijing => 22,
        ProvinceCode::Chongqing => 1051,
        ProvinceCode::Fujian => 2,
        ProvinceCode::Gansu => 1208,
        ProvinceCode::Guangdong => 4,
        ProvinceCode::Guangxi => 173,
        ProvinceCode::Guizhou => 118,
        ProvinceCode::Hainan => 1441,
        ProvinceCode::Hebei => 1069,
        ProvinceCode::Heilongjiang => 145,
        ProvinceCode::Henan => 182,
        ProvinceCode::Hubei => 1135,
        ProvinceCode::Hunan => 1466,
        ProvinceCode::Jiangsu => 120,
        ProvinceCode::Jiangxi => 1465,
        ProvinceCode::Jilin => 1445,
        ProvinceCode::Liaoning => 1464,
        ProvinceCode::Neimenggu => 86,
        ProvinceCode::Ningxia => 119,
        ProvinceCode::Qinghai => 1467,
        ProvinceCode::Shaanxi => 152,
        ProvinceCode::Shandong => 122,
        ProvinceCode::Shanghai => 1050,
        ProvinceCode::Shanxi => 146,
        ProvinceCode::Sichuan => 1068,
        ProvinceCode::Tianjin => 1177,
        ProvinceCode::Xinjiang => 1468,
        ProvinceCode::Xizang => 1155,
        ProvinceCode::Yunnan => 153,
        ProvinceCode::Zhejiang => 1442,
        ProvinceCode::Gangaotai => 1,
        ProvinceCode::Other => 0,
        ProvinceCode::Oversea => OVERSEA_PROVINCE,
    }
}

pub fn isp(code: IspCode) -> i64 {
    match code {
        IspCode::Dianxin => 2,
        IspCode::Yidong => 1046,
        IspCode::Liantong => 26,
        IspCode::Tietong => 3947,
        IspCode::Jiaoyuwang => 38,
        IspCode::Other => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn area_round_trip() {
        for &a in AreaCode::ALL {
            assert_eq!(area_from(area(a)), a);
        }
        for &c in ChannelType::ALL {
            assert_eq!(channel_from(service_type(c)), c);
        }
    }

    #[test]
    fn domain_status_values() {
        assert_eq!(domain_status("online"), DomainStatus::Deployed);
        assert_eq!(domain_status("offline"), DomainStatus::Stopped);
        assert_eq!(domain_status("rejected"), DomainStatus::Deploying);
        assert_eq!(domain_status("processing"), DomainStatus::Deploying);
        assert_eq!(domain_status_filter(DomainStatus::Deleted), "deleted");
        for status in [DomainStatus::Deployed, DomainStatus::Stopping, DomainStatus::Stopped] {
            assert_eq!(domain_status(domain_status_filter(status)), status);
        }
    }

    #[test]
    fn task_status_round_trip() {
        for &s in TaskStatus::ALL {
            assert_eq!(task_status(task_status_filter(s)), s);
        }
        assert_eq!(task_status("unknown"), TaskStatus::Fail);
    }

    #[test]
    fn rule_paths_wildcards() {
        let dirs = strings(&["/static"]);
        assert_eq!(rule_paths(RuleType::All, &dirs), strings(&["*"]));
        assert_eq!(rule_paths(RuleType::Index, &dirs), strings(&["/"]));
        assert_eq!(rule_paths(RuleType::Directory, &[]), strings(&["*"]));
        assert_eq!(rule_paths(RuleType::Directory, &dirs), dirs);

        assert_eq!(effective_paths(EffectiveType::Index, &[]), strings(&["*"]));
        assert_eq!(effective_paths(EffectiveType::Index, &dirs), strings(&["/"]));
        assert_eq!(
            compress_paths(CompressRuleType::All, &strings(&["js"])),
            strings(&["*"])
        );
    }

    #[test]
    fn origin_types_by_address() {
        assert_eq!(origin_type_by_addresses(["1.1.1.1", "2.2.2.2"]), "ip");
        assert_eq!(origin_type_by_addresses(["origin.example.com"]), "domain");
        assert_eq!(origin_type_by_addresses(["1.1.1.1", "::1"]), "ip_ipv6");
        assert_eq!(
            origin_type_by_addresses(["::1", "origin.example.com", "1.1.1.1"]),
            "ip_ipv6_domain"
        );
    }

    #[test]
    fn origin_address_suffixes() {
        assert_eq!(origin_address("1.1.1.1", 0, 10, 1), "1.1.1.1");
        assert_eq!(origin_address("1.1.1.1", 8080, 10, 1), "1.1.1.1:8080");
        assert_eq!(origin_address("1.1.1.1", 8080, 10, 2), "1.1.1.1:8080:10");
        assert_eq!(origin_address("1.1.1.1", 0, 0, 2), "1.1.1.1");
    }

    #[test]
    fn auth_helpers() {
        assert_eq!(auth_file_extensions(&[]), strings(&["*"]));
        assert_eq!(auth_file_extensions(&strings(&[""])), strings(&["*"]));
        assert_eq!(auth_file_extensions(&strings(&["mp4"])), strings(&["mp4"]));
        assert_eq!(auth_filter_type(AuthRange::Exclude), "whitelist");
        assert_eq!(auth_filter_type(AuthRange::All), "blacklist");
    }

    #[test]
    fn tls_defaults_are_separate_entries() {
        assert_eq!(
            tls_versions(&[]),
            strings(&["TLSv1", "TLSv1.1", "TLSv1.2"])
        );
        assert_eq!(
            tls_versions(&[TlsVersion::V1_2, TlsVersion::V1_3]),
            strings(&["TLSv1.2", "TLSv1.3"])
        );
    }

    #[test]
    fn region_codes() {
        assert_eq!(country(CountryCode::Cn), 4460);
        assert_eq!(country(CountryCode::Us), 669);
        assert_eq!(province(ProvinceCode::Oversea), -1);
        assert_eq!(province(ProvinceCode::Guangdong), 4);
        assert_eq!(isp(IspCode::Yidong), 1046);
        assert_eq!(country(CountryCode::from_code(-5)), 4460);
    }

    #[test]
    fn cache_key_switches() {
        assert_eq!(full_url_cache(CacheParameterStatus::Off), "on");
        assert_eq!(full_url_cache(CacheParameterStatus::All), "off");
        assert_eq!(query_string_action(CacheParameterStatus::All), None);
        assert_eq!(
            query_string_action(CacheParameterStatus::Exclude),
            Some("excludeCustom")
        );
        assert_eq!(follow_origin(CacheStatus::Follow), "on");
    }
}
