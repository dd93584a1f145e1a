//! 统一配置 -> 网宿分功能配置接口
//!
//! 网宿没有整体配置文档，每个功能一个接口。一次更新先把各步骤写入
//! [`ConfigUpdate`]，同一接口的多个步骤合并为一次调用（例如 IP 名单与 Referer
//! 都落在 `visitcontrol`），随后由 provider 逐个接口下发。

use crate::types::{
    CacheStatus, DomainConfig, HeaderRule, OriginPriority, UpdateAction, UpdateDomainRequest,
};

use super::mapping::{
    ALL_PATHS, TO_ORIGIN, TO_VISITOR, effective_rule, header_action, path_pattern,
    rewrite_after, rewrite_before, split_by_list_type,
};
use super::types::{
    AccessSpeedRequest, AccessSpeedRule, AdvSrcConfigs, AdvSrcSetting, CacheTimeBehavior,
    HeaderModifyRequest, HeaderModifyRule, HttpCodeCacheRequest, HttpCodeCacheRule,
    InnerRedirectRequest, IpControlRule, RefererControlRule, RewriteRuleSetting,
    SrcConfigRequest, UaControlRule, VisitControlRequest, VisitControlRule,
};

/// 网宿未填写时的默认优先级
const DEFAULT_PRIORITY: i64 = 10;
/// 单请求限速
const LIMIT_MODE: &str = "single_request";
const DENY_ACTION: &str = "403";

/// 网宿支持的配置步骤
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    OriginConf,
    OriginServer,
    CacheList,
    CacheCode,
    Speed,
    OriginRequestHeader,
    ResponseHeader,
    UrlRewrite,
    IpFilter,
    Referer,
    UserAgent,
}

const RECOMMEND_STEPS: &[Step] = &[Step::CacheList, Step::OriginConf];

const FULL_STEPS: &[Step] = &[
    Step::OriginConf,
    Step::OriginServer,
    Step::OriginRequestHeader,
    Step::IpFilter,
    Step::Referer,
    Step::UserAgent,
    Step::Speed,
    Step::CacheList,
    Step::CacheCode,
    Step::UrlRewrite,
    Step::ResponseHeader,
];

/// 动作 -> 步骤；网宿不支持的原子动作返回 `None`
pub(crate) fn steps(action: UpdateAction) -> Option<&'static [Step]> {
    let steps: &'static [Step] = match action {
        UpdateAction::OriginConf => &[Step::OriginConf],
        UpdateAction::OriginServer => &[Step::OriginServer],
        UpdateAction::CacheList => &[Step::CacheList],
        UpdateAction::CacheCode => &[Step::CacheCode],
        UpdateAction::Speed => &[Step::Speed],
        UpdateAction::OriginRequestHeader => &[Step::OriginRequestHeader],
        UpdateAction::ResponseHeader => &[Step::ResponseHeader],
        UpdateAction::UrlRewrite => &[Step::UrlRewrite],
        UpdateAction::IpFilter => &[Step::IpFilter],
        UpdateAction::Referer => &[Step::Referer],
        UpdateAction::UserAgent => &[Step::UserAgent],
        UpdateAction::Recommend => RECOMMEND_STEPS,
        UpdateAction::Full => FULL_STEPS,
        UpdateAction::Base
        | UpdateAction::Area
        | UpdateAction::OriginAdvance
        | UpdateAction::OriginUrl
        | UpdateAction::IpFrequency
        | UpdateAction::Auth
        | UpdateAction::RemoteAuth
        | UpdateAction::BrowserCache
        | UpdateAction::ErrorPage
        | UpdateAction::Compression
        | UpdateAction::Https => return None,
    };
    Some(steps)
}

/// 一次更新要调用的各接口请求体
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct ConfigUpdate {
    /// `POST /api/domain/setsrcconfig`
    pub src_config: Option<SrcConfigRequest>,
    /// `PUT /api/config/cachetime/{domain}`
    pub cache_time: Option<Vec<CacheTimeBehavior>>,
    /// `PUT /api/config/httpcodecache/{domain}`
    pub http_code_cache: Option<HttpCodeCacheRequest>,
    /// `PUT /api/config/accessspeed/{domain}`
    pub access_speed: Option<AccessSpeedRequest>,
    /// `PUT /api/config/headermodify/{domain}`
    pub header_modify: Option<HeaderModifyRequest>,
    /// `PUT /api/config/InnerRedirect/{domain}`
    pub inner_redirect: Option<InnerRedirectRequest>,
    /// `PUT /api/config/visitcontrol/{domain}`
    pub visit_control: Option<VisitControlRequest>,
}

impl ConfigUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

pub(crate) fn build_update(req: &UpdateDomainRequest, steps: &[Step]) -> ConfigUpdate {
    let mut update = ConfigUpdate::default();
    for &step in steps {
        apply_step(&mut update, step, &req.domain, &req.config);
    }
    update
}

fn priority(value: i64) -> i64 {
    if value > 0 { value } else { DEFAULT_PRIORITY }
}

fn src_config<'a>(update: &'a mut ConfigUpdate, domain: &str) -> &'a mut SrcConfigRequest {
    update.src_config.get_or_insert_with(|| SrcConfigRequest {
        domain_name: domain.to_string(),
        ..SrcConfigRequest::default()
    })
}

fn header_rules(rules: &[HeaderRule], direction: &str) -> Vec<HeaderModifyRule> {
    rules
        .iter()
        .map(|r| HeaderModifyRule {
            path_pattern: ALL_PATHS.to_string(),
            header_direction: direction.to_string(),
            action: header_action(r.action).to_string(),
            header_name: r.key.clone(),
            header_value: r.value.clone(),
            priority: DEFAULT_PRIORITY,
        })
        .collect()
}

fn visit_rule(path: String) -> VisitControlRule {
    VisitControlRule {
        path_pattern: path,
        control_action: DENY_ACTION.to_string(),
        priority: DEFAULT_PRIORITY,
        ..VisitControlRule::default()
    }
}

fn push_visit_rules(update: &mut ConfigUpdate, rules: Vec<VisitControlRule>) {
    update
        .visit_control
        .get_or_insert_with(VisitControlRequest::default)
        .visit_control_rules
        .extend(rules);
}

fn apply_step(update: &mut ConfigUpdate, step: Step, domain: &str, config: &DomainConfig) {
    match step {
        Step::OriginConf => {
            let Some(origin) = &config.origin else { return };
            let src = src_config(update, domain);
            src.use_range = Some(origin.range.is_on());
            src.follow301 = Some(origin.follow.is_on());
            src.follow302 = Some(origin.follow.is_on());
        }
        Step::OriginServer => {
            let Some(servers) = config.origin_servers.as_deref().filter(|s| !s.is_empty()) else {
                return;
            };
            let addresses = |p: OriginPriority| {
                servers
                    .iter()
                    .filter(|s| s.priority == p)
                    .map(|s| s.address.clone())
                    .collect()
            };
            src_config(update, domain).adv_src_setting = Some(AdvSrcSetting {
                use_adv_src: true,
                adv_src_configs: AdvSrcConfigs {
                    master_ips: addresses(OriginPriority::Primary),
                    backup_ips: addresses(OriginPriority::Backup),
                },
                ..AdvSrcSetting::default()
            });
        }
        Step::CacheList => {
            let Some(rules) = &config.cache_rules else { return };
            update.cache_time = Some(
                rules
                    .iter()
                    .map(|r| CacheTimeBehavior {
                        path_pattern: path_pattern(r.rule_type, &r.content),
                        cache_ttl: match r.status {
                            CacheStatus::Off => "0".to_string(),
                            CacheStatus::On | CacheStatus::Follow => r.ttl_seconds().to_string(),
                        },
                        is_respect_server: r.status == CacheStatus::Follow,
                        ignore_letter_case: r.ignore_case.is_on(),
                        priority: priority(r.priority),
                    })
                    .collect(),
            );
        }
        Step::CacheCode => {
            let Some(rules) = &config.cache_codes else { return };
            update.http_code_cache = Some(HttpCodeCacheRequest {
                http_code_cache_rules: rules
                    .iter()
                    .map(|r| HttpCodeCacheRule {
                        cache_ttl: r.ttl_seconds().to_string(),
                        http_codes: vec![r.http_code.to_string()],
                    })
                    .collect(),
            });
        }
        Step::Speed => {
            let Some(speed) = &config.speed else { return };
            // 关闭时下发空列表清除限速
            let rules = if speed.status.is_on() {
                speed
                    .rules
                    .iter()
                    .map(|r| AccessSpeedRule {
                        path_pattern: path_pattern(r.rule_type, &r.content),
                        limit_mode: LIMIT_MODE.to_string(),
                        speed: r.kbps.to_string(),
                        priority: DEFAULT_PRIORITY,
                    })
                    .collect()
            } else {
                Vec::new()
            };
            update.access_speed = Some(AccessSpeedRequest {
                access_speed_rules: rules,
            });
        }
        Step::OriginRequestHeader | Step::ResponseHeader => {
            let (rules, direction) = if step == Step::OriginRequestHeader {
                (&config.origin_request_headers, TO_ORIGIN)
            } else {
                (&config.response_headers, TO_VISITOR)
            };
            let Some(rules) = rules else { return };
            update
                .header_modify
                .get_or_insert_with(HeaderModifyRequest::default)
                .header_modify_rules
                .extend(header_rules(rules, direction));
        }
        Step::UrlRewrite => {
            let Some(rules) = &config.url_rewrites else { return };
            update.inner_redirect = Some(InnerRedirectRequest {
                rewrite_rule_settings: rules
                    .iter()
                    .map(|r| RewriteRuleSetting {
                        path_pattern: ALL_PATHS.to_string(),
                        ignore_letter_case: true,
                        publish_type: "Cache".to_string(),
                        priority: priority(r.priority),
                        before_value: rewrite_before(r.mate_method, &r.rewrite_url),
                        after_value: rewrite_after(r.mate_method, r.redirect_code, &r.target_url),
                        rewrite_type: "before".to_string(),
                    })
                    .collect(),
            });
        }
        Step::IpFilter => {
            let Some(filter) = &config.ip_filter else { return };
            // 关闭或开启但没有规则时下发空名单
            let rules = if filter.status.is_on() && !filter.rules.is_empty() {
                filter
                    .rules
                    .iter()
                    .map(|r| {
                        let (allowed_ips, forbidden_ips) =
                            split_by_list_type(r.list_type, r.ips.join(";"));
                        VisitControlRule {
                            ip_control_rule: Some(IpControlRule {
                                forbidden_ips,
                                allowed_ips,
                            }),
                            ..visit_rule(path_pattern(
                                effective_rule(r.effective_type),
                                &r.effective_rules,
                            ))
                        }
                    })
                    .collect()
            } else {
                vec![VisitControlRule {
                    ip_control_rule: Some(IpControlRule::default()),
                    ..visit_rule(ALL_PATHS.to_string())
                }]
            };
            push_visit_rules(update, rules);
        }
        Step::Referer => {
            let Some(referer) = &config.referer else { return };
            let control = if referer.status.is_on() && !referer.referers.is_empty() {
                let (valid_referer, invalid_referer) =
                    split_by_list_type(referer.list_type, referer.referers.join(" "));
                RefererControlRule {
                    allow_null_referer: referer.include_empty.is_on().to_string(),
                    valid_referer,
                    invalid_referer,
                }
            } else {
                RefererControlRule::default()
            };
            push_visit_rules(
                update,
                vec![VisitControlRule {
                    referer_control_rule: Some(control),
                    ..visit_rule(ALL_PATHS.to_string())
                }],
            );
        }
        Step::UserAgent => {
            let Some(ua) = &config.user_agent else { return };
            let rules = if ua.status.is_on() && !ua.rules.is_empty() {
                ua.rules
                    .iter()
                    .map(|r| {
                        let (valid_user_agents, invalid_user_agents) =
                            split_by_list_type(r.list_type, r.agents.join("|"));
                        VisitControlRule {
                            ua_control_rule: Some(UaControlRule {
                                valid_user_agents,
                                invalid_user_agents,
                            }),
                            ..visit_rule(path_pattern(
                                effective_rule(r.effective_type),
                                &r.effective_rules,
                            ))
                        }
                    })
                    .collect()
            } else {
                vec![VisitControlRule {
                    ua_control_rule: Some(UaControlRule::default()),
                    ..visit_rule(ALL_PATHS.to_string())
                }]
            };
            push_visit_rules(update, rules);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        CacheCodeRule, CacheRule, CacheUnit, EffectiveType, HeaderAction, IpFilterConf,
        IpFilterRule, ListType, OriginConf, OriginServer, RedirectCode, RefererConf,
        RequestUrlRewriteType, RuleType, SpeedConf, SpeedRule, Switch, UrlRewriteRule,
        UserAgentConf, UserAgentRule,
    };

    fn request(action: UpdateAction, config: DomainConfig) -> UpdateDomainRequest {
        UpdateDomainRequest::new(action, "cdn.example.com", config)
    }

    fn build(action: UpdateAction, config: DomainConfig) -> ConfigUpdate {
        let req = request(action, config);
        let Some(steps) = steps(req.action) else {
            panic!("unsupported action {}", req.action);
        };
        build_update(&req, steps)
    }

    // ============ 动作分派 ============

    #[test]
    fn unsupported_primitives() {
        for action in [
            UpdateAction::Base,
            UpdateAction::Area,
            UpdateAction::Https,
            UpdateAction::Compression,
            UpdateAction::Auth,
        ] {
            assert!(steps(action).is_none(), "{action} should be unsupported");
        }
        assert_eq!(steps(UpdateAction::Full).map(<[Step]>::len), Some(11));
    }

    #[test]
    fn absent_configs_produce_nothing() {
        assert!(build(UpdateAction::Full, DomainConfig::default()).is_empty());
    }

    // ============ 回源 ============

    #[test]
    fn origin_conf_and_servers_share_one_call() {
        let config = DomainConfig {
            origin: Some(OriginConf {
                range: Switch::On,
                follow: Switch::Off,
                ..OriginConf::default()
            }),
            origin_servers: Some(vec![
                OriginServer {
                    address: "1.1.1.1".to_string(),
                    ..OriginServer::default()
                },
                OriginServer {
                    address: "backup.example.com".to_string(),
                    priority: OriginPriority::Backup,
                    ..OriginServer::default()
                },
            ]),
            ..DomainConfig::default()
        };
        let update = build(UpdateAction::Full, config);
        let Some(src) = update.src_config else {
            panic!("src config missing");
        };
        assert_eq!(src.domain_name, "cdn.example.com");
        assert_eq!(src.use_range, Some(true));
        assert_eq!(src.follow302, Some(false));
        let Some(adv) = src.adv_src_setting else {
            panic!("adv src missing");
        };
        assert!(adv.use_adv_src);
        assert_eq!(adv.adv_src_configs.master_ips, vec!["1.1.1.1"]);
        assert_eq!(adv.adv_src_configs.backup_ips, vec!["backup.example.com"]);
    }

    #[test]
    fn empty_server_list_is_skipped() {
        let config = DomainConfig {
            origin_servers: Some(Vec::new()),
            ..DomainConfig::default()
        };
        assert!(build(UpdateAction::OriginServer, config).is_empty());
    }

    // ============ 缓存 ============

    #[test]
    fn cache_rules() {
        let config = DomainConfig {
            cache_rules: Some(vec![
                CacheRule {
                    rule_type: RuleType::FileSuffix,
                    content: vec!["jpg".to_string()],
                    ttl: 2,
                    unit: CacheUnit::Hour,
                    ignore_case: Switch::On,
                    ..CacheRule::default()
                },
                CacheRule {
                    status: CacheStatus::Off,
                    ttl: 30,
                    priority: 20,
                    ..CacheRule::default()
                },
                CacheRule {
                    status: CacheStatus::Follow,
                    ..CacheRule::default()
                },
            ]),
            cache_codes: Some(vec![CacheCodeRule {
                http_code: 404,
                ttl: 1,
                unit: CacheUnit::Minute,
            }]),
            ..DomainConfig::default()
        };
        let update = build(UpdateAction::Full, config);
        let Some(behaviors) = update.cache_time else {
            panic!("cache time missing");
        };
        assert_eq!(behaviors[0].path_pattern, r".*\.(jpg)$");
        assert_eq!(behaviors[0].cache_ttl, "7200");
        assert_eq!(behaviors[0].priority, DEFAULT_PRIORITY);
        assert!(behaviors[0].ignore_letter_case);
        assert_eq!(behaviors[1].cache_ttl, "0");
        assert_eq!(behaviors[1].priority, 20);
        assert!(behaviors[2].is_respect_server);

        let Some(codes) = update.http_code_cache else {
            panic!("code cache missing");
        };
        assert_eq!(codes.http_code_cache_rules[0].cache_ttl, "60");
        assert_eq!(codes.http_code_cache_rules[0].http_codes, vec!["404"]);
    }

    #[test]
    fn speed_off_clears_rules() {
        let speed = |status| DomainConfig {
            speed: Some(SpeedConf {
                status,
                rules: vec![SpeedRule {
                    kbps: 512,
                    ..SpeedRule::default()
                }],
            }),
            ..DomainConfig::default()
        };
        let on = build(UpdateAction::Speed, speed(Switch::On));
        let Some(req) = on.access_speed else {
            panic!("speed missing");
        };
        assert_eq!(req.access_speed_rules[0].speed, "512");
        assert_eq!(req.access_speed_rules[0].limit_mode, LIMIT_MODE);

        let off = build(UpdateAction::Speed, speed(Switch::Off));
        assert_eq!(
            off.access_speed,
            Some(AccessSpeedRequest {
                access_speed_rules: Vec::new()
            })
        );
    }

    // ============ 头部 / 重定向 ============

    #[test]
    fn header_directions_merge() {
        let header = |key: &str| HeaderRule {
            action: HeaderAction::Set,
            key: key.to_string(),
            value: "v".to_string(),
        };
        let config = DomainConfig {
            origin_request_headers: Some(vec![header("X-Origin")]),
            response_headers: Some(vec![header("X-Visitor")]),
            ..DomainConfig::default()
        };
        let update = build(UpdateAction::Full, config);
        let Some(req) = update.header_modify else {
            panic!("header modify missing");
        };
        let rules = &req.header_modify_rules;
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].header_direction, TO_ORIGIN);
        assert_eq!(rules[1].header_direction, TO_VISITOR);
        assert_eq!(rules[1].action, "set");
    }

    #[test]
    fn url_rewrite_settings() {
        let config = DomainConfig {
            url_rewrites: Some(vec![UrlRewriteRule {
                mate_method: RequestUrlRewriteType::FullPath,
                rewrite_url: "/a.html".to_string(),
                target_url: "/b.html".to_string(),
                redirect_code: RedirectCode::R302,
                priority: 0,
            }]),
            ..DomainConfig::default()
        };
        let update = build(UpdateAction::UrlRewrite, config);
        let Some(req) = update.inner_redirect else {
            panic!("inner redirect missing");
        };
        let s = &req.rewrite_rule_settings[0];
        assert_eq!(s.before_value, r"^(https?://[^/]+)/a\.html$");
        assert_eq!(s.after_value, "302:$1/b.html");
        assert_eq!(s.publish_type, "Cache");
        assert_eq!(s.priority, DEFAULT_PRIORITY);
    }

    // ============ 访问控制 ============

    #[test]
    fn visit_control_rules_accumulate() {
        let config = DomainConfig {
            ip_filter: Some(IpFilterConf {
                status: Switch::On,
                rules: vec![IpFilterRule {
                    list_type: ListType::White,
                    ips: vec!["1.1.1.0/24".to_string(), "2.2.2.2".to_string()],
                    effective_type: EffectiveType::Directory,
                    effective_rules: vec!["/api/".to_string()],
                }],
            }),
            referer: Some(RefererConf {
                list_type: ListType::Black,
                referers: vec!["bad.com".to_string(), "worse.com".to_string()],
                include_empty: Switch::On,
                status: Switch::On,
            }),
            user_agent: Some(UserAgentConf {
                status: Switch::On,
                rules: vec![UserAgentRule {
                    list_type: ListType::Black,
                    agents: vec!["curl".to_string(), "wget".to_string()],
                    ..UserAgentRule::default()
                }],
            }),
            ..DomainConfig::default()
        };
        let update = build(UpdateAction::Full, config);
        let Some(req) = update.visit_control else {
            panic!("visit control missing");
        };
        let rules = &req.visit_control_rules;
        assert_eq!(rules.len(), 3);

        assert_eq!(rules[0].path_pattern, "^(/api/)");
        assert_eq!(
            rules[0].ip_control_rule,
            Some(IpControlRule {
                forbidden_ips: String::new(),
                allowed_ips: "1.1.1.0/24;2.2.2.2".to_string(),
            })
        );

        let Some(referer) = &rules[1].referer_control_rule else {
            panic!("referer rule missing");
        };
        assert_eq!(referer.invalid_referer, "bad.com worse.com");
        assert_eq!(referer.allow_null_referer, "true");

        let Some(ua) = &rules[2].ua_control_rule else {
            panic!("ua rule missing");
        };
        assert_eq!(ua.invalid_user_agents, "curl|wget");
        assert_eq!(rules[2].control_action, DENY_ACTION);
    }

    #[test]
    fn filters_off_send_empty_objects() {
        let config = DomainConfig {
            ip_filter: Some(IpFilterConf {
                status: Switch::On,
                rules: Vec::new(),
            }),
            referer: Some(RefererConf::default()),
            ..DomainConfig::default()
        };
        let update = build(UpdateAction::Full, config);
        let Some(req) = update.visit_control else {
            panic!("visit control missing");
        };
        assert_eq!(
            req.visit_control_rules[0].ip_control_rule,
            Some(IpControlRule::default())
        );
        assert_eq!(
            req.visit_control_rules[1].referer_control_rule,
            Some(RefererControlRule::default())
        );
    }
}
