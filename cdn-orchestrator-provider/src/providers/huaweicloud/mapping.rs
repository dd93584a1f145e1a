//! 华为云枚举映射
//!
//! 统一枚举 -> 华为云 CDN API 字符串，以及少量反向映射（区域、业务类型、域名状态、任务状态）。

use crate::providers::common::{dotted_suffixes, truncate_parameters};
use crate::types::{
    AccessMetric, AreaCode, AuthManner, CacheParameterStatus, CacheStatus, CacheUnit,
    CertificateType, ChannelType, CompressMethod, CountryCode, DomainStatus,
    EffectiveType, EncryptManner, HeaderAction, HttpProtocol, HttpsJumpType, InheritTimeType,
    IpProtocol, IspCode, ListType, OriginMateMethod, OriginMetric, OriginPriority,
    OriginProtocol, OriginType, OriginUrlMatchMode, ProvinceCode, PurgePathMode, PurgeType,
    RemoteAuthTimeoutAction, RequestMethod, RequestUrlRewriteType, RuleType, StatisticType,
    Switch, TaskStatus, TimeFormat, TlsVersion, TopFilter,
};

// ============ 域名 ============

pub fn service_area(area: AreaCode) -> &'static str {
    match area {
        AreaCode::Mainland => "mainland_china",
        AreaCode::Oversea => "outside_mainland_china",
        AreaCode::Global => "global",
    }
}

pub fn area_from_service_area(value: &str) -> AreaCode {
    match value {
        "outside_mainland_china" => AreaCode::Oversea,
        "global" => AreaCode::Global,
        _ => AreaCode::Mainland,
    }
}

pub fn business_type(channel: ChannelType) -> &'static str {
    match channel {
        ChannelType::Web => "web",
        ChannelType::Download => "download",
        ChannelType::Media => "video",
        ChannelType::Hybrid => "wholeSite",
    }
}

pub fn channel_from_business_type(value: &str) -> ChannelType {
    match value {
        "download" => ChannelType::Download,
        "video" => ChannelType::Media,
        "wholeSite" => ChannelType::Hybrid,
        _ => ChannelType::Web,
    }
}

pub fn domain_status(value: &str) -> DomainStatus {
    match value {
        "online" => DomainStatus::Deployed,
        "offline" => DomainStatus::Stopped,
        "configure_failed" => DomainStatus::Failed,
        _ => DomainStatus::Deploying,
    }
}

pub fn domain_status_filter(status: DomainStatus) -> &'static str {
    match status {
        DomainStatus::Deployed => "online",
        DomainStatus::Stopped => "offline",
        DomainStatus::Failed => "configure_failed",
        _ => "configuring",
    }
}

// ============ 通用 ============

pub fn switch(s: Switch) -> &'static str {
    match s {
        Switch::Off => "off",
        Switch::On => "on",
    }
}

pub fn list_type(t: ListType) -> &'static str {
    match t {
        ListType::Black => "black",
        ListType::White => "white",
    }
}

pub fn rule_type(t: RuleType) -> &'static str {
    match t {
        RuleType::All => "all",
        RuleType::FileSuffix => "file_extension",
        RuleType::Directory => "catalog",
        RuleType::Path => "full_path",
        RuleType::Index => "home_page",
        RuleType::ContentType => "contentType",
    }
}

/// 规则匹配内容
///
/// 目录/路径中的 `*` 需要转义；其余类型华为云不支持内容匹配，下发占位值 `data`。
pub fn rule_paths(t: RuleType, content: &[String]) -> String {
    if content.is_empty() {
        return String::new();
    }
    match t {
        RuleType::All => String::new(),
        RuleType::FileSuffix => dotted_suffixes(content).join(","),
        RuleType::Directory | RuleType::Path => content.join(",").replace('*', "\\*"),
        RuleType::Index | RuleType::ContentType => "data".to_string(),
    }
}

/// `All` 与 `Index` 不下发匹配内容
pub const fn rule_has_content(t: RuleType) -> bool {
    !matches!(t, RuleType::All | RuleType::Index)
}

// ============ 回源 ============

pub fn origin_protocol(p: OriginProtocol) -> &'static str {
    match p {
        OriginProtocol::Http => "http",
        OriginProtocol::Https => "https",
        OriginProtocol::Follow => "follow",
    }
}

pub fn origin_type(t: OriginType) -> &'static str {
    match t {
        OriginType::Ip => "ipaddr",
        OriginType::Domain => "domain",
        OriginType::Bucket => "obs_bucket",
    }
}

/// 主源 70，备源 30
pub const fn origin_priority(p: OriginPriority) -> i64 {
    match p {
        OriginPriority::Primary => 70,
        OriginPriority::Backup => 30,
    }
}

/// 创建域名时的主备标识：主源 1，备源 0
pub const fn active_standby(p: OriginPriority) -> i64 {
    match p {
        OriginPriority::Primary => 1,
        OriginPriority::Backup => 0,
    }
}

pub fn advance_match_type(mode: OriginUrlMatchMode) -> &'static str {
    match mode {
        OriginUrlMatchMode::File => "file_extension",
        OriginUrlMatchMode::Directory => "file_path",
    }
}

/// 高级回源匹配规则，`;` 分隔
pub fn advance_match_pattern(mode: OriginUrlMatchMode, rules: &[String]) -> String {
    match mode {
        OriginUrlMatchMode::File => dotted_suffixes(rules).join(";"),
        OriginUrlMatchMode::Directory => rules
            .iter()
            .map(|r| format!("/{}", r.trim_start_matches('/')))
            .collect::<Vec<_>>()
            .join(";"),
    }
}

pub fn header_action(a: HeaderAction) -> &'static str {
    match a {
        HeaderAction::Delete => "delete",
        HeaderAction::Set => "set",
        HeaderAction::Add => "add",
    }
}

pub fn origin_url_match_type(m: OriginMateMethod) -> &'static str {
    match m {
        OriginMateMethod::All => "all",
        OriginMateMethod::Url => "file_path",
        OriginMateMethod::Regex => "wildcard",
        OriginMateMethod::Path => "full_path",
    }
}

// ============ 鉴权 ============

/// 继承配置：小写，全角逗号替换为半角
pub fn inherit_type(conf: &str) -> String {
    conf.to_lowercase().replace('，', ",")
}

pub fn inherit_time_type(t: InheritTimeType) -> &'static str {
    match t {
        InheritTimeType::Parent => "parent_url_time",
        InheritTimeType::System => "sys_time",
    }
}

/// 华为云鉴权只支持全部文件
pub const fn auth_match_type() -> &'static str {
    "all"
}

pub fn auth_type(m: AuthManner) -> &'static str {
    match m {
        AuthManner::TypeA => "type_a",
        AuthManner::TypeB => "type_b",
        AuthManner::TypeC => "type_c1",
        AuthManner::TypeD => "type_c2",
    }
}

/// A/B 固定十进制，C 固定十六进制，D 由 `time_format` 决定
pub fn auth_time_format(m: AuthManner, format: TimeFormat) -> &'static str {
    match (m, format) {
        (AuthManner::TypeC, _) | (AuthManner::TypeD, TimeFormat::Hex) => "hex",
        _ => "dec",
    }
}

pub fn sign_method(e: EncryptManner) -> &'static str {
    match e {
        EncryptManner::Md5 => "md5",
        EncryptManner::Sha256 => "sha256",
    }
}

pub fn remote_auth_file_type(t: EffectiveType) -> &'static str {
    match t {
        EffectiveType::All => "all",
        _ => "specific_file",
    }
}

pub fn remote_auth_timeout_action(a: RemoteAuthTimeoutAction) -> &'static str {
    match a {
        RemoteAuthTimeoutAction::Return200 => "pass",
        RemoteAuthTimeoutAction::Return403 => "forbid",
    }
}

pub fn request_method(m: RequestMethod) -> &'static str {
    match m {
        RequestMethod::Get => "GET",
        RequestMethod::Post => "POST",
        RequestMethod::Head => "HEAD",
    }
}

// ============ 缓存 ============

pub fn cache_unit(u: CacheUnit) -> &'static str {
    match u {
        CacheUnit::Second => "s",
        CacheUnit::Minute => "m",
        CacheUnit::Hour => "h",
        CacheUnit::Day => "d",
    }
}

/// 节点缓存是否遵循源站
pub fn follow_origin(s: CacheStatus) -> &'static str {
    match s {
        CacheStatus::Follow => "on",
        CacheStatus::Off | CacheStatus::On => "off",
    }
}

pub fn browser_cache_type(s: CacheStatus) -> &'static str {
    match s {
        CacheStatus::Follow => "follow_origin",
        CacheStatus::On => "ttl",
        CacheStatus::Off => "never",
    }
}

pub fn url_parameter_type(s: CacheParameterStatus) -> &'static str {
    match s {
        CacheParameterStatus::Off => "full_url",
        CacheParameterStatus::All => "ignore_url_params",
        CacheParameterStatus::Include => "reserve_params",
        CacheParameterStatus::Exclude => "del_params",
    }
}

/// 参数值只对保留/删除指定参数生效，最多 10 个
pub fn url_parameter_value(s: CacheParameterStatus, values: &[String]) -> String {
    match s {
        CacheParameterStatus::Include | CacheParameterStatus::Exclude => {
            truncate_parameters(values).join(",")
        }
        CacheParameterStatus::Off | CacheParameterStatus::All => String::new(),
    }
}

pub fn url_rewrite_match_type(t: RequestUrlRewriteType) -> &'static str {
    match t {
        RequestUrlRewriteType::Directory => "catalog",
        RequestUrlRewriteType::FullPath => "full_path",
    }
}

pub fn compress_type(m: CompressMethod) -> &'static str {
    match m {
        CompressMethod::Gzip => "gzip",
        CompressMethod::Brotli => "br",
    }
}

// ============ HTTPS ============

pub fn tls_version(v: TlsVersion) -> &'static str {
    match v {
        TlsVersion::V1_0 => "TLSv1.0",
        TlsVersion::V1_1 => "TLSv1.1",
        TlsVersion::V1_2 => "TLSv1.2",
        TlsVersion::V1_3 => "TLSv1.3",
    }
}

/// 未指定版本时默认开启 TLSv1.0 ~ TLSv1.2
pub fn tls_versions(versions: &[TlsVersion]) -> String {
    if versions.is_empty() {
        return "TLSv1.0,TLSv1.1,TLSv1.2".to_string();
    }
    versions
        .iter()
        .map(|v| tls_version(*v))
        .collect::<Vec<_>>()
        .join(",")
}

pub fn certificate_type(t: CertificateType) -> &'static str {
    match t {
        CertificateType::China => "server_sm",
        CertificateType::Global => "server",
    }
}

pub fn jump_type(t: HttpsJumpType) -> &'static str {
    match t {
        HttpsJumpType::Http => "http",
        HttpsJumpType::Https => "https",
    }
}

// ============ 刷新预热 ============

pub fn purge_mode(m: PurgePathMode) -> &'static str {
    match m {
        PurgePathMode::All => "all",
        PurgePathMode::File => "detect_modify_refresh",
    }
}

pub fn task_status(value: &str) -> TaskStatus {
    match value {
        "task_done" => TaskStatus::Success,
        "task_inprocess" => TaskStatus::Doing,
        _ => TaskStatus::Fail,
    }
}

/// 任务列表过滤：华为云只能按“处理中”或“已完成”过滤
pub fn task_status_filter(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Success => "task_done",
        TaskStatus::Doing | TaskStatus::Fail => "task_inprocess",
    }
}

pub fn task_file_type(t: PurgeType) -> &'static str {
    match t {
        PurgeType::Url => "file",
        PurgeType::Path => "directory",
    }
}

// ============ 统计 ============

pub fn access_stat_type(m: AccessMetric) -> &'static str {
    match m {
        AccessMetric::Flux => "flux",
        AccessMetric::Bandwidth => "bw",
        AccessMetric::Request => "req_num",
        AccessMetric::HitRequest => "hit_num",
        AccessMetric::HitFlux => "hit_flux",
        AccessMetric::Status2xx => "status_code_2xx",
        AccessMetric::Status3xx => "status_code_3xx",
        AccessMetric::Status4xx => "status_code_4xx",
        AccessMetric::Status5xx => "status_code_5xx",
    }
}

pub fn origin_stat_type(m: OriginMetric) -> &'static str {
    match m {
        OriginMetric::Flux => "bs_flux",
        OriginMetric::Bandwidth => "bs_bw",
        OriginMetric::Request => "bs_num",
        OriginMetric::FailRequest => "bs_fail_num",
        OriginMetric::Status2xx => "bs_status_code_2xx",
        OriginMetric::Status3xx => "bs_status_code_3xx",
        OriginMetric::Status4xx => "bs_status_code_4xx",
        OriginMetric::Status5xx => "bs_status_code_5xx",
    }
}

/// 地区统计 action
pub fn location_action(t: StatisticType) -> &'static str {
    match t {
        StatisticType::Sum => "location_summary",
        StatisticType::Detail => "location_detail",
    }
}

/// 域名统计 action
pub fn stats_action(t: StatisticType) -> &'static str {
    match t {
        StatisticType::Sum => "summary",
        StatisticType::Detail => "detail",
    }
}

pub fn ip_version(p: IpProtocol) -> &'static str {
    match p {
        IpProtocol::V4 => "ipv4",
        IpProtocol::V6 => "ipv6",
    }
}

/// 华为云不区分 QUIC，按 HTTP 处理
pub fn http_protocol(p: HttpProtocol) -> &'static str {
    match p {
        HttpProtocol::Https => "https",
        HttpProtocol::Http | HttpProtocol::Quic => "http",
    }
}

pub fn top_url_stat_type(f: TopFilter) -> &'static str {
    match f {
        TopFilter::Flux => "flux",
        TopFilter::Request => "req_num",
    }
}

// ============ 地区 / 运营商 ============

pub fn country(code: CountryCode) -> &'static str {
    match code {
        CountryCode::Cn => "cn",
        CountryCode::Ae => "ae",
        CountryCode::Au => "au",
        CountryCode::Br => "br",
        CountryCode::Ca => "ca",
        CountryCode::Ch => "ch",
        CountryCode::De => "de",
        CountryCode::Es => "es",
        CountryCode::Fr => "fr",
        CountryCode::Gb => "gb",
        CountryCode::Id => "id",
        CountryCode::Il => "il",
        CountryCode::In => "in",
        CountryCode::It => "it",
        CountryCode::Jp => "jp",
        CountryCode::Kr => "kr",
        CountryCode::Mx => "mx",
        CountryCode::My => "my",
        CountryCode::Nl => "nl",
        CountryCode::No => "no",
        CountryCode::Ph => "ph",
        CountryCode::Qa => "qa",
        CountryCode::Sa => "sa",
        CountryCode::Se => "se",
        CountryCode::Sg => "sg",
        CountryCode::Th => "th",
        CountryCode::Us => "us",
        CountryCode::Vn => "vn",
        CountryCode::Za => "za",
    }
}

/// 地区统计支持的国家列表（逗号分隔），去掉 `ignore` 中的国家
pub fn all_countries_except(ignore: &[&str]) -> String {
    const ALL: [&str; 29] = [
        "cn", "ae", "au", "br", "ca", "de", "ch", "es", "fr", "gb", "id", "il", "in", "it", "jp",
        "kr", "mx", "my", "nl", "no", "ph", "qa", "sa", "se", "sg", "th", "us", "vn", "za",
    ];
    ALL.iter()
        .filter(|c| !ignore.contains(c))
        .copied()
        .collect::<Vec<_>>()
        .join(",")
}

pub fn province(code: ProvinceCode) -> &'static str {
    match code {
        ProvinceCode::Anhui => "anhui",
        ProvinceCode::Chongqing => "chongqing",
        ProvinceCode::Fujian => "fujian",
        ProvinceCode::Gansu => "gansu",
        ProvinceCode::Guangdong => "guangdong",
        ProvinceCode::Guangxi => "guangxi",
        ProvinceCode::Guizhou => "guizhou",
        ProvinceCode::Hainan => "hainan",
        ProvinceCode::Hebei => "hebei",
        ProvinceCode::Heilongjiang => "heilongjiang",
        ProvinceCode::Henan => "henan",
        ProvinceCode::Hubei => "hubei",
        ProvinceCode::Hunan => "hunan",
        ProvinceCode::Jiangsu => "jiangsu",
        ProvinceCode::Jiangxi => "jiangxi",
        ProvinceCode::Jilin => "jilin",
        // 华为云接口拼写如此
        ProvinceCode::Liaoning => "liaoling",
        ProvinceCode::Neimenggu => "neimenggu",
        ProvinceCode::Ningxia => "ningxia",
        ProvinceCode::Qinghai => "qinghai",
        ProvinceCode::Shaanxi => "shaanxi",
        ProvinceCode::Shandong => "shandong",
        ProvinceCode::Shanghai => "shanghai",
        ProvinceCode::Shanxi => "shanxi",
        ProvinceCode::Sichuan => "sichuan",
        ProvinceCode::Tianjin => "tianjin",
        ProvinceCode::Xinjiang => "xinjiang",
        ProvinceCode::Xizang => "xizang",
        ProvinceCode::Yunnan => "yunnan",
        ProvinceCode::Zhejiang => "zhejiang",
        ProvinceCode::Gangaotai => "gangaotai",
        ProvinceCode::Other => "qita",
        ProvinceCode::Beijing | ProvinceCode::Oversea => "beijing",
    }
}

pub fn isp(code: IspCode) -> &'static str {
    match code {
        IspCode::Dianxin => "dianxin",
        IspCode::Yidong => "yidong",
        IspCode::Liantong => "liantong",
        IspCode::Tietong => "tietong",
        IspCode::Jiaoyuwang => "jiaoyuwang",
        IspCode::Other => "qita",
    }
}
