//! 统一枚举
//!
//! 所有枚举都以整数编码（序列化为整数），与各厂商的字符串/枚举词汇之间的
//! 映射由各 provider 的 `mapping` 模块负责。未知整数一律回落到该枚举的默认值。

use serde::{Deserialize, Serialize};

/// 定义一个整数编码的统一枚举
///
/// 生成：`ALL` 常量、`code()` / `from_code()`、`Default`、与 `i64` 的双向转换，
/// 以及基于整数的 serde 表示。
macro_rules! canonical_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident (default = $default:ident) {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = $code:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(from = "i64", into = "i64")]
        #[repr(i64)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                $variant = $code,
            )+
        }

        impl $name {
            /// 全部取值，按编码升序
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// 整数编码
            pub const fn code(self) -> i64 {
                self as i64
            }

            /// 由整数编码解析，未知编码返回默认值
            pub const fn from_code(code: i64) -> Self {
                match code {
                    $($code => Self::$variant,)+
                    _ => Self::$default,
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }

        impl From<i64> for $name {
            fn from(code: i64) -> Self {
                Self::from_code(code)
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> Self {
                value.code()
            }
        }
    };
}

// ============ 通用 ============

canonical_enum! {
    /// 开关
    pub enum Switch (default = Off) {
        Off = 0,
        On = 1,
    }
}

impl Switch {
    pub const fn is_on(self) -> bool {
        matches!(self, Self::On)
    }
}

impl From<bool> for Switch {
    fn from(on: bool) -> Self {
        if on { Self::On } else { Self::Off }
    }
}

canonical_enum! {
    /// 黑白名单
    pub enum ListType (default = Black) {
        Black = 0,
        White = 1,
    }
}

canonical_enum! {
    pub enum IpProtocol (default = V4) {
        V4 = 0,
        V6 = 1,
    }
}

canonical_enum! {
    pub enum HttpProtocol (default = Http) {
        Http = 0,
        Https = 1,
        Quic = 2,
    }
}

// ============ 域名 ============

canonical_enum! {
    /// 加速区域
    pub enum AreaCode (default = Mainland) {
        /// 中国大陆
        Mainland = 0,
        /// 中国境外
        Oversea = 1,
        /// 全球
        Global = 2,
    }
}

canonical_enum! {
    pub enum CdnType (default = Cdn) {
        Cdn = 0,
        Dcdn = 1,
        Scdn = 2,
    }
}

canonical_enum! {
    /// 业务类型
    pub enum ChannelType (default = Web) {
        /// 网页
        Web = 0,
        /// 下载
        Download = 1,
        /// 音视频点播
        Media = 2,
        /// 全站加速
        Hybrid = 3,
    }
}

canonical_enum! {
    /// 域名生命周期状态
    pub enum DomainStatus (default = Deploying) {
        Deploying = 0,
        Deployed = 1,
        Failed = 2,
        Stopping = 3,
        Stopped = 4,
        Deleting = 5,
        Deleted = 6,
    }
}

impl DomainStatus {
    /// `Failed` 与 `Deleted` 为终态
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Failed | Self::Deleted)
    }
}

// ============ 规则匹配 ============

canonical_enum! {
    /// 规则匹配类型
    pub enum RuleType (default = All) {
        All = 0,
        FileSuffix = 1,
        Directory = 2,
        Path = 3,
        Index = 4,
        ContentType = 5,
    }
}

canonical_enum! {
    /// 访问控制生效范围
    pub enum EffectiveType (default = All) {
        All = 0,
        FileSuffix = 1,
        Directory = 2,
        Path = 3,
        Index = 4,
    }
}

canonical_enum! {
    pub enum CompressRuleType (default = All) {
        All = 0,
        FileSuffix = 1,
        ContentType = 2,
    }
}

// ============ 回源 ============

canonical_enum! {
    pub enum OriginProtocol (default = Http) {
        Http = 0,
        Https = 1,
        /// 协议跟随
        Follow = 2,
    }
}

canonical_enum! {
    pub enum OriginType (default = Ip) {
        Ip = 0,
        Domain = 1,
        /// 对象存储桶
        Bucket = 2,
    }
}

canonical_enum! {
    pub enum OriginUrlMatchMode (default = File) {
        File = 0,
        Directory = 1,
    }
}

canonical_enum! {
    pub enum HeaderAction (default = Add) {
        Delete = 0,
        Set = 1,
        Add = 2,
    }
}

canonical_enum! {
    pub enum OriginPriority (default = Primary) {
        Primary = 0,
        Backup = 1,
    }
}

canonical_enum! {
    /// 回源 URL 改写匹配方式
    pub enum OriginMateMethod (default = All) {
        All = 0,
        Url = 1,
        Regex = 2,
        Path = 3,
    }
}

// ============ 鉴权 ============

canonical_enum! {
    /// URL 鉴权方式
    pub enum AuthManner (default = TypeA) {
        TypeA = 0,
        TypeB = 1,
        TypeC = 2,
        TypeD = 3,
    }
}

canonical_enum! {
    pub enum InheritTimeType (default = Parent) {
        Parent = 0,
        System = 1,
    }
}

canonical_enum! {
    pub enum AuthRange (default = All) {
        All = 0,
        Include = 1,
        Exclude = 2,
    }
}

canonical_enum! {
    pub enum EncryptManner (default = Md5) {
        Md5 = 0,
        Sha256 = 1,
    }
}

canonical_enum! {
    pub enum TimeFormat (default = Dec) {
        Dec = 0,
        Hex = 1,
    }
}

canonical_enum! {
    pub enum RemoteAuthTimeoutAction (default = Return200) {
        Return200 = 0,
        Return403 = 1,
    }
}

canonical_enum! {
    pub enum RequestMethod (default = Get) {
        Get = 0,
        Post = 1,
        Head = 2,
    }
}

// ============ 缓存 ============

canonical_enum! {
    pub enum CacheStatus (default = On) {
        /// 遵循源站
        Follow = 0,
        Off = 1,
        On = 2,
    }
}

canonical_enum! {
    pub enum CacheUnit (default = Second) {
        Second = 0,
        Minute = 1,
        Hour = 2,
        Day = 3,
    }
}

impl CacheUnit {
    /// 单位对应的秒数
    pub const fn seconds(self) -> i64 {
        match self {
            Self::Second => 1,
            Self::Minute => 60,
            Self::Hour => 3600,
            Self::Day => 86_400,
        }
    }
}

canonical_enum! {
    /// 缓存 key 中参数的处理方式
    pub enum CacheParameterStatus (default = All) {
        /// 不做参数处理，完整 URL 作为缓存 key
        Off = 0,
        /// 忽略全部参数
        All = 1,
        Include = 2,
        Exclude = 3,
    }
}

canonical_enum! {
    pub enum RequestUrlRewriteType (default = Directory) {
        Directory = 0,
        FullPath = 1,
    }
}

canonical_enum! {
    pub enum RedirectCode (default = R301) {
        R301 = 0,
        R302 = 1,
    }
}

impl RedirectCode {
    pub const fn status(self) -> u16 {
        match self {
            Self::R301 => 301,
            Self::R302 => 302,
        }
    }
}

canonical_enum! {
    pub enum CompressMethod (default = Gzip) {
        Gzip = 0,
        Brotli = 1,
    }
}

// ============ HTTPS ============

canonical_enum! {
    pub enum TlsVersion (default = V1_0) {
        V1_0 = 0,
        V1_1 = 1,
        V1_2 = 2,
        V1_3 = 3,
    }
}

canonical_enum! {
    pub enum HttpsJumpType (default = Http) {
        Http = 0,
        Https = 1,
    }
}

canonical_enum! {
    pub enum CertificateType (default = China) {
        China = 0,
        Global = 1,
    }
}

// ============ 刷新预热 ============

canonical_enum! {
    pub enum PurgePathMode (default = All) {
        /// 刷新目录下全部资源
        All = 0,
        /// 只刷新变更资源
        File = 1,
    }
}

canonical_enum! {
    pub enum TaskStatus (default = Doing) {
        Doing = 0,
        Success = 1,
        Fail = 2,
    }
}

canonical_enum! {
    pub enum PurgeType (default = Url) {
        Url = 0,
        Path = 1,
    }
}

// ============ 统计 ============

canonical_enum! {
    pub enum ProductType (default = Cdn) {
        Cdn = 0,
        Ecdn = 1,
    }
}

canonical_enum! {
    /// 访问数据指标
    pub enum AccessMetric (default = Flux) {
        Flux = 0,
        Bandwidth = 1,
        Request = 2,
        HitRequest = 3,
        HitFlux = 4,
        Status2xx = 5,
        Status3xx = 6,
        Status4xx = 7,
        Status5xx = 8,
    }
}

impl AccessMetric {
    /// 状态码类指标按具体状态码展开，不做零填充
    pub const fn is_status_code(self) -> bool {
        matches!(
            self,
            Self::Status2xx | Self::Status3xx | Self::Status4xx | Self::Status5xx
        )
    }
}

canonical_enum! {
    /// 回源数据指标
    pub enum OriginMetric (default = Flux) {
        Flux = 0,
        Bandwidth = 1,
        Request = 2,
        FailRequest = 3,
        Status2xx = 4,
        Status3xx = 5,
        Status4xx = 6,
        Status5xx = 7,
    }
}

impl OriginMetric {
    pub const fn is_status_code(self) -> bool {
        matches!(
            self,
            Self::Status2xx | Self::Status3xx | Self::Status4xx | Self::Status5xx
        )
    }
}

canonical_enum! {
    /// 统计粒度
    pub enum DataInterval (default = FiveMinutes) {
        FiveMinutes = 0,
        Hour = 1,
        Day = 2,
    }
}

impl DataInterval {
    /// 粒度对应的秒数
    pub const fn seconds(self) -> i64 {
        match self {
            Self::FiveMinutes => 300,
            Self::Hour => 3600,
            Self::Day => 86_400,
        }
    }
}

canonical_enum! {
    pub enum StatisticType (default = Detail) {
        Sum = 0,
        Detail = 1,
    }
}

canonical_enum! {
    pub enum TopFilter (default = Flux) {
        Flux = 0,
        Request = 1,
    }
}

// ============ 地区 / 运营商 ============

canonical_enum! {
    /// 国家/地区
    pub enum CountryCode (default = Cn) {
        /// 中国
        Cn = 1000,
        /// 阿联酋
        Ae = 1001,
        /// 澳大利亚
        Au = 1002,
        /// 巴西
        Br = 1003,
        /// 加拿大
        Ca = 1004,
        /// 瑞士
        Ch = 1005,
        /// 德国
        De = 1006,
        /// 西班牙
        Es = 1007,
        /// 法国
        Fr = 1008,
        /// 英国
        Gb = 1009,
        /// 印度尼西亚
        Id = 1010,
        /// 以色列
        Il = 1011,
        /// 印度
        In = 1012,
        /// 意大利
        It = 1013,
        /// 日本
        Jp = 1014,
        /// 韩国
        Kr = 1015,
        /// 墨西哥
        Mx = 1016,
        /// 马来西亚
        My = 1017,
        /// 荷兰
        Nl = 1018,
        /// 挪威
        No = 1019,
        /// 菲律宾
        Ph = 1020,
        /// 卡塔尔
        Qa = 1021,
        /// 沙特阿拉伯
        Sa = 1022,
        /// 瑞典
        Se = 1023,
        /// 新加坡
        Sg = 1024,
        /// 泰国
        Th = 1025,
        /// 美国
        Us = 1026,
        /// 越南
        Vn = 1027,
        /// 南非
        Za = 1028,
    }
}

canonical_enum! {
    /// 中国大陆省份
    pub enum ProvinceCode (default = Beijing) {
        Anhui = 2000,
        Beijing = 2001,
        Chongqing = 2002,
        Fujian = 2003,
        Gansu = 2004,
        Guangdong = 2005,
        Guangxi = 2006,
        Guizhou = 2007,
        Hainan = 2008,
        Hebei = 2009,
        Heilongjiang = 2010,
        Henan = 2011,
        Hubei = 2012,
        Hunan = 2013,
        Jiangsu = 2014,
        Jiangxi = 2015,
        Jilin = 2016,
        Liaoning = 2017,
        Neimenggu = 2018,
        Ningxia = 2019,
        Qinghai = 2020,
        Shaanxi = 2021,
        Shandong = 2022,
        Shanghai = 2023,
        Shanxi = 2024,
        Sichuan = 2025,
        Tianjin = 2026,
        Xinjiang = 2027,
        Xizang = 2028,
        Yunnan = 2029,
        Zhejiang = 2030,
        /// 港澳台
        Gangaotai = 2031,
        Other = 2032,
        /// 境外
        Oversea = 2033,
    }
}

canonical_enum! {
    /// 运营商
    pub enum IspCode (default = Dianxin) {
        /// 中国电信
        Dianxin = 3000,
        /// 中国移动
        Yidong = 3001,
        /// 中国联通
        Liantong = 3002,
        /// 中国铁通
        Tietong = 3003,
        /// 中国教育网
        Jiaoyuwang = 3004,
        Other = 3005,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_roundtrip_for_every_variant() {
        for v in AreaCode::ALL {
            assert_eq!(AreaCode::from_code(v.code()), *v);
        }
        for v in CountryCode::ALL {
            assert_eq!(CountryCode::from_code(v.code()), *v);
        }
        for v in ProvinceCode::ALL {
            assert_eq!(ProvinceCode::from_code(v.code()), *v);
        }
        for v in IspCode::ALL {
            assert_eq!(IspCode::from_code(v.code()), *v);
        }
    }

    #[test]
    fn unknown_codes_resolve_to_default() {
        assert_eq!(CacheStatus::from_code(99), CacheStatus::On);
        assert_eq!(CacheParameterStatus::from_code(-1), CacheParameterStatus::All);
        assert_eq!(HeaderAction::from_code(7), HeaderAction::Add);
        assert_eq!(ProvinceCode::from_code(0), ProvinceCode::Beijing);
        assert_eq!(IspCode::from_code(i64::MAX), IspCode::Dianxin);
        assert_eq!(CountryCode::from_code(999), CountryCode::Cn);
        assert_eq!(StatisticType::from_code(5), StatisticType::Detail);
        assert_eq!(DomainStatus::from_code(42), DomainStatus::Deploying);
        assert_eq!(Switch::from_code(2), Switch::Off);
    }

    #[test]
    fn codes_follow_declaration_order() {
        assert_eq!(CountryCode::Za.code(), 1028);
        assert_eq!(ProvinceCode::Oversea.code(), 2033);
        assert_eq!(IspCode::Other.code(), 3005);
        assert_eq!(AccessMetric::Status5xx.code(), 8);
        assert_eq!(OriginMetric::Status5xx.code(), 7);
    }

    #[test]
    fn serializes_as_integer() {
        let json = serde_json::to_string(&AreaCode::Global).unwrap();
        assert_eq!(json, "2");
        let back: CacheStatus = serde_json::from_str("0").unwrap();
        assert_eq!(back, CacheStatus::Follow);
        let fallback: CacheStatus = serde_json::from_str("17").unwrap();
        assert_eq!(fallback, CacheStatus::On);
    }

    #[test]
    fn terminal_states() {
        assert!(DomainStatus::Failed.is_terminal());
        assert!(DomainStatus::Deleted.is_terminal());
        assert!(!DomainStatus::Stopped.is_terminal());
    }

    #[test]
    fn interval_seconds() {
        assert_eq!(DataInterval::FiveMinutes.seconds(), 300);
        assert_eq!(DataInterval::Hour.seconds(), 3600);
        assert_eq!(DataInterval::Day.seconds(), 86_400);
        assert_eq!(CacheUnit::Day.seconds(), 86_400);
    }

    #[test]
    fn status_code_metrics() {
        assert!(AccessMetric::Status4xx.is_status_code());
        assert!(!AccessMetric::HitFlux.is_status_code());
        assert!(OriginMetric::Status2xx.is_status_code());
        assert!(!OriginMetric::FailRequest.is_status_code());
    }
}
