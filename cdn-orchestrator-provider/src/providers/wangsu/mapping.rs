//! 统一枚举 <-> 网宿取值

use crate::types::{
    AreaCode, ChannelType, DomainStatus, EffectiveType, HeaderAction, ListType, RedirectCode,
    RequestUrlRewriteType, RuleType,
};

use super::types::DomainSummary;

// ============ 域名 ============

/// 服务类型统一使用 https 版本，上传证书后才真正开启 https
pub fn service_type(channel: ChannelType) -> &'static str {
    match channel {
        ChannelType::Web => "web-https",
        ChannelType::Download => "dl-https",
        ChannelType::Media => "vod-https",
        ChannelType::Hybrid => "wsa-https",
    }
}

pub fn channel_from(service_type: &str) -> ChannelType {
    let base = service_type.split('-').next().unwrap_or_default();
    match base {
        "dl" | "download" => ChannelType::Download,
        "vod" | "vodstream" => ChannelType::Media,
        "wsa" => ChannelType::Hybrid,
        _ => ChannelType::Web,
    }
}

pub fn service_areas(area: AreaCode) -> &'static str {
    match area {
        AreaCode::Mainland => "cn",
        AreaCode::Oversea => "am;emea;apac",
        AreaCode::Global => "am;emea;apac;cn",
    }
}

/// 启用状态优先于部署状态
pub fn domain_status(domain: &DomainSummary) -> DomainStatus {
    if domain.enabled == "false" || domain.cdn_service_status == "false" {
        return DomainStatus::Stopped;
    }
    match domain.status.as_str() {
        "Deployed" => DomainStatus::Deployed,
        _ => DomainStatus::Deploying,
    }
}

// ============ 规则匹配 ============

/// 匹配全部 URL 的正则
pub const ALL_PATHS: &str = ".*";

/// 转义正则元字符
fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if "\\.+*?()|[]{}^$".contains(c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn alternatives<'a>(values: impl IntoIterator<Item = &'a str>) -> String {
    values.into_iter().map(escape).collect::<Vec<_>>().join("|")
}

/// 规则匹配 -> `path-pattern` 正则
///
/// 网宿的各配置接口都接受 URL 正则，文件后缀/目录/路径统一折算成正则。
/// `ContentType` 无法用 URL 表达，按全部匹配处理。
pub fn path_pattern(rule: RuleType, content: &[String]) -> String {
    match rule {
        RuleType::All | RuleType::ContentType => ALL_PATHS.to_string(),
        RuleType::Index => "^/$".to_string(),
        RuleType::FileSuffix => format!(
            ".*\\.({})$",
            alternatives(content.iter().map(|s| s.trim_start_matches('.')))
        ),
        RuleType::Directory => format!("^({})", alternatives(content.iter().map(String::as_str))),
        RuleType::Path => format!("^({})$", alternatives(content.iter().map(String::as_str))),
    }
}

pub fn effective_rule(effective: EffectiveType) -> RuleType {
    match effective {
        EffectiveType::All => RuleType::All,
        EffectiveType::FileSuffix => RuleType::FileSuffix,
        EffectiveType::Directory => RuleType::Directory,
        EffectiveType::Path => RuleType::Path,
        EffectiveType::Index => RuleType::Index,
    }
}

/// URL 重定向的 `before-value`，匹配含协议与域名的完整 URL
pub fn rewrite_before(method: RequestUrlRewriteType, url: &str) -> String {
    match method {
        RequestUrlRewriteType::FullPath => format!("^(https?://[^/]+){}$", escape(url)),
        RequestUrlRewriteType::Directory => format!("^(https?://[^/]+){}(.*)$", escape(url)),
    }
}

/// URL 重定向的 `after-value`，带状态码前缀
pub fn rewrite_after(method: RequestUrlRewriteType, code: RedirectCode, target: &str) -> String {
    let suffix = match method {
        RequestUrlRewriteType::FullPath => "",
        RequestUrlRewriteType::Directory => "$2",
    };
    format!("{}:$1{target}{suffix}", code.status())
}

// ============ 头部 / 访问控制 ============

pub fn header_action(action: HeaderAction) -> &'static str {
    match action {
        HeaderAction::Add => "add",
        HeaderAction::Set => "set",
        HeaderAction::Delete => "delete",
    }
}

pub const TO_ORIGIN: &str = "cache2origin";
pub const TO_VISITOR: &str = "cache2visitor";

/// 名单按类型放入 (允许, 禁止) 两个位置之一
pub fn split_by_list_type(list: ListType, joined: String) -> (String, String) {
    match list {
        ListType::White => (joined, String::new()),
        ListType::Black => (String::new(), joined),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(status: &str, enabled: &str) -> DomainSummary {
        DomainSummary {
            status: status.to_string(),
            enabled: enabled.to_string(),
            cdn_service_status: "true".to_string(),
            ..DomainSummary::default()
        }
    }

    #[test]
    fn service_type_round_trip() {
        for &c in ChannelType::ALL {
            assert_eq!(channel_from(service_type(c)), c);
        }
        assert_eq!(channel_from("download"), ChannelType::Download);
        assert_eq!(channel_from("livestream"), ChannelType::Web);
    }

    #[test]
    fn areas() {
        assert_eq!(service_areas(AreaCode::Mainland), "cn");
        assert_eq!(service_areas(AreaCode::Oversea), "am;emea;apac");
        assert_eq!(service_areas(AreaCode::Global), "am;emea;apac;cn");
    }

    #[test]
    fn status_from_summary() {
        assert_eq!(domain_status(&summary("Deployed", "true")), DomainStatus::Deployed);
        assert_eq!(domain_status(&summary("InProgress", "true")), DomainStatus::Deploying);
        assert_eq!(domain_status(&summary("Deployed", "false")), DomainStatus::Stopped);
        let cancelled = DomainSummary {
            cdn_service_status: "false".to_string(),
            ..summary("Deployed", "true")
        };
        assert_eq!(domain_status(&cancelled), DomainStatus::Stopped);
    }

    #[test]
    fn path_patterns() {
        let v = |items: &[&str]| items.iter().map(ToString::to_string).collect::<Vec<_>>();
        assert_eq!(path_pattern(RuleType::All, &v(&["ignored"])), ".*");
        assert_eq!(path_pattern(RuleType::Index, &[]), "^/$");
        assert_eq!(
            path_pattern(RuleType::FileSuffix, &v(&[".jpg", "png"])),
            r".*\.(jpg|png)$"
        );
        assert_eq!(
            path_pattern(RuleType::Directory, &v(&["/static/", "/img/"])),
            "^(/static/|/img/)"
        );
        assert_eq!(path_pattern(RuleType::Path, &v(&["/a.html"])), r"^(/a\.html)$");
        assert_eq!(effective_rule(EffectiveType::Index), RuleType::Index);
    }

    #[test]
    fn rewrite_values() {
        assert_eq!(
            rewrite_before(RequestUrlRewriteType::Directory, "/old/"),
            "^(https?://[^/]+)/old/(.*)$"
        );
        assert_eq!(
            rewrite_after(RequestUrlRewriteType::Directory, RedirectCode::R302, "/new/"),
            "302:$1/new/$2"
        );
        assert_eq!(
            rewrite_after(RequestUrlRewriteType::FullPath, RedirectCode::R301, "/b.html"),
            "301:$1/b.html"
        );
    }

    #[test]
    fn list_slots() {
        assert_eq!(
            split_by_list_type(ListType::Black, "1.1.1.1".to_string()),
            (String::new(), "1.1.1.1".to_string())
        );
        assert_eq!(header_action(HeaderAction::Delete), "delete");
    }
}
