//! 华为云域名配置构造
//!
//! 把统一 `DomainConfig` 转成 `UpdateDomainFullConfig` 的 `configs` 文档。
//! 每个原子 `UpdateAction` 对应一个步骤；组合动作展开为固定顺序的步骤表。

use crate::providers::common::dotted_suffixes;
use crate::types::{
    AccessFilterValues, DomainConfig, EffectiveType, HeaderRule, HttpsConf, OriginServer, Switch,
    UpdateAction, UpdateDomainRequest,
};

use super::mapping::{
    active_standby, advance_match_pattern, advance_match_type, auth_match_type, auth_time_format,
    auth_type, browser_cache_type, cache_unit, certificate_type, compress_type, follow_origin,
    header_action, inherit_time_type, inherit_type, jump_type, list_type, origin_priority,
    origin_protocol, origin_type, origin_url_match_type, remote_auth_file_type,
    remote_auth_timeout_action, request_method, rule_has_content, rule_paths, rule_type,
    service_area, sign_method, switch, tls_versions, url_parameter_type, url_parameter_value,
    url_rewrite_match_type,
};
use super::types::{
    AccessFilter, BackSource, BrowserCacheRuleConfig, CacheRuleConfig, Compress, Configs,
    CreateSource, ErrorCodeCache, ErrorCodeRedirectRule, FlexibleOrigin, ForceRedirect,
    HeaderConfig, Hsts, HttpsConfig, InheritConfig, IpFrequencyLimit, OriginRequestUrlRewrite,
    RefererConfig, RemoteAuth, RemoteAuthRule, RequestUrlRewrite, RuleCondition, Sni,
    SourceConfig, UrlAuth,
};

/// 推荐配置
const RECOMMEND_STEPS: &[UpdateAction] = &[
    UpdateAction::BrowserCache,
    UpdateAction::CacheList,
    UpdateAction::OriginConf,
    UpdateAction::Https,
    UpdateAction::Compression,
    UpdateAction::IpFrequency,
];

/// 全量配置（不含华为云不支持的限速与高级回源）
const FULL_STEPS: &[UpdateAction] = &[
    UpdateAction::Base,
    UpdateAction::OriginConf,
    UpdateAction::OriginServer,
    UpdateAction::OriginUrl,
    UpdateAction::OriginRequestHeader,
    UpdateAction::IpFilter,
    UpdateAction::IpFrequency,
    UpdateAction::Referer,
    UpdateAction::UserAgent,
    UpdateAction::Auth,
    UpdateAction::RemoteAuth,
    UpdateAction::CacheList,
    UpdateAction::CacheCode,
    UpdateAction::BrowserCache,
    UpdateAction::UrlRewrite,
    UpdateAction::ErrorPage,
    UpdateAction::Compression,
    UpdateAction::ResponseHeader,
    UpdateAction::Https,
];

/// 回源超时未设置时的默认值（秒）
const DEFAULT_ORIGIN_TIMEOUT: i64 = 30;

/// 动作展开后的步骤；华为云没有对应配置项的动作返回 `None`
pub(crate) fn steps(action: UpdateAction) -> Option<Vec<UpdateAction>> {
    match action {
        UpdateAction::Recommend => Some(RECOMMEND_STEPS.to_vec()),
        UpdateAction::Full => Some(FULL_STEPS.to_vec()),
        UpdateAction::Speed => None,
        primitive => Some(vec![primitive]),
    }
}

/// 构造 `configs` 文档；缺失的子配置对应的步骤被跳过
pub(crate) fn build_configs(req: &UpdateDomainRequest) -> Configs {
    let mut configs = Configs::default();
    for step in steps(req.action).into_iter().flatten() {
        apply_step(&mut configs, step, &req.config);
    }
    configs
}

fn apply_step(configs: &mut Configs, step: UpdateAction, config: &DomainConfig) {
    match step {
        UpdateAction::Base => {
            if let Some(base) = &config.base {
                configs.ipv6_accelerate = Some(base.support_ipv6.code());
            }
        }
        UpdateAction::Area => {
            if let Some(base) = &config.base {
                configs.service_area = Some(service_area(base.area_code).to_string());
            }
        }
        UpdateAction::OriginConf => with_origin_conf(configs, config),
        UpdateAction::OriginServer => with_origin_servers(configs, config),
        UpdateAction::OriginAdvance => with_origin_advance(configs, config),
        UpdateAction::OriginRequestHeader => {
            if let Some(rules) = &config.origin_request_headers {
                configs.origin_request_header = Some(header_configs(rules));
            }
        }
        UpdateAction::OriginUrl => {
            if let Some(rules) = &config.origin_urls {
                configs.origin_request_url_rewrite = Some(
                    rules
                        .iter()
                        .map(|r| OriginRequestUrlRewrite {
                            priority: r.priority,
                            match_type: origin_url_match_type(r.mate_method).to_string(),
                            source_url: r.rewrite_url.clone(),
                            target_url: r.target_url.clone(),
                        })
                        .collect(),
                );
            }
        }
        UpdateAction::IpFilter => {
            if let Some(conf) = &config.ip_filter {
                configs.ip_filter = Some(access_filter(&conf.filter_values()));
            }
        }
        UpdateAction::UserAgent => {
            if let Some(conf) = &config.user_agent {
                configs.user_agent_filter = Some(access_filter(&conf.filter_values()));
            }
        }
        UpdateAction::IpFrequency => {
            if let Some(conf) = &config.ip_frequency {
                configs.ip_frequency_limit = Some(IpFrequencyLimit {
                    status: switch(conf.status).to_string(),
                    qps: conf.qps,
                });
            }
        }
        UpdateAction::Referer => {
            if let Some(conf) = &config.referer {
                let filter_type = if conf.status.is_on() {
                    list_type(conf.list_type)
                } else {
                    "off"
                };
                configs.referer = Some(RefererConfig {
                    filter_type: filter_type.to_string(),
                    value: conf.referers.join(","),
                    include_empty: conf.include_empty.is_on(),
                });
            }
        }
        UpdateAction::Auth => with_url_auth(configs, config),
        UpdateAction::RemoteAuth => with_remote_auth(configs, config),
        UpdateAction::CacheList => with_cache_rules(configs, config),
        UpdateAction::CacheCode => {
            if let Some(rules) = &config.cache_codes {
                configs.error_code_cache = Some(
                    rules
                        .iter()
                        .map(|r| ErrorCodeCache {
                            code: r.http_code,
                            ttl: r.ttl_seconds(),
                        })
                        .collect(),
                );
            }
        }
        UpdateAction::BrowserCache => with_browser_cache(configs, config),
        UpdateAction::UrlRewrite => {
            if let Some(rules) = &config.url_rewrites {
                configs.request_url_rewrite = Some(
                    rules
                        .iter()
                        .map(|r| RequestUrlRewrite {
                            condition: RuleCondition {
                                match_type: url_rewrite_match_type(r.mate_method).to_string(),
                                match_value: Some(r.rewrite_url.clone()),
                                priority: r.priority,
                            },
                            redirect_status_code: r.redirect_code.status(),
                            redirect_url: r.target_url.clone(),
                            execution_mode: "redirect".to_string(),
                        })
                        .collect(),
                );
            }
        }
        UpdateAction::ErrorPage => {
            if let Some(rules) = &config.error_pages {
                configs.error_code_redirect_rules = Some(
                    rules
                        .iter()
                        .map(|r| ErrorCodeRedirectRule {
                            error_code: r.status_code,
                            target_code: r.redirect_code.status(),
                            target_link: r.target.clone(),
                        })
                        .collect(),
                );
            }
        }
        UpdateAction::Compression => with_compression(configs, config),
        UpdateAction::ResponseHeader => {
            if let Some(rules) = &config.response_headers {
                configs.http_response_header = Some(header_configs(rules));
            }
        }
        UpdateAction::Https => {
            if let Some(https) = &config.https {
                with_https(configs, https);
            }
        }
        UpdateAction::Speed | UpdateAction::Recommend | UpdateAction::Full => {
            log::debug!("[huaweicloud] step {step} has no configs mapping, skipped");
        }
    }
}

// ============ 回源 ============

fn with_origin_conf(configs: &mut Configs, config: &DomainConfig) {
    let Some(origin) = &config.origin else {
        return;
    };
    configs.origin_protocol = Some(origin_protocol(origin.protocol).to_string());
    configs.origin_follow302_status = Some(switch(origin.follow).to_string());
    configs.origin_range_status = Some(switch(origin.range).to_string());
    configs.origin_receive_timeout = Some(if origin.timeout > 0 {
        origin.timeout
    } else {
        DEFAULT_ORIGIN_TIMEOUT
    });
    if let Some(sni_switch) = origin.sni_switch {
        configs.sni = Some(Sni {
            status: switch(sni_switch).to_string(),
            server_name: origin.sni_value.clone(),
        });
    }
}

fn with_origin_servers(configs: &mut Configs, config: &DomainConfig) {
    let Some(servers) = config.origin_servers.as_ref().filter(|s| !s.is_empty()) else {
        return;
    };
    configs.sources = Some(
        servers
            .iter()
            .map(|s| SourceConfig {
                origin_type: origin_type(s.origin_type).to_string(),
                origin_addr: s.address.clone(),
                priority: origin_priority(s.priority),
                weight: s.weight,
                http_port: s.http_port,
                https_port: s.https_port,
                host_name: s.host.clone(),
            })
            .collect(),
    );
}

fn with_origin_advance(configs: &mut Configs, config: &DomainConfig) {
    let Some(servers) = &config.origin_advance else {
        return;
    };
    configs.flexible_origin = Some(
        servers
            .iter()
            .map(|s| FlexibleOrigin {
                match_type: advance_match_type(s.url_match_mode).to_string(),
                match_pattern: advance_match_pattern(s.url_match_mode, &s.url_match_rule),
                priority: s.priority_value,
                back_sources: vec![BackSource {
                    sources_type: origin_type(s.origin_type).to_string(),
                    ip_or_domain: s.address.clone(),
                    http_port: s.http_port,
                    https_port: s.https_port,
                }],
            })
            .collect(),
    );
}

fn header_configs(rules: &[HeaderRule]) -> Vec<HeaderConfig> {
    rules
        .iter()
        .map(|r| HeaderConfig {
            name: r.key.clone(),
            value: r.value.clone(),
            action: header_action(r.action).to_string(),
        })
        .collect()
}

// ============ 访问控制 ============

/// IP / UA 黑白名单
///
/// 开启且有规则时取第一条规则的名单类型，合并所有规则的值；开启但无规则按空黑名单下发。
fn access_filter(values: &AccessFilterValues) -> AccessFilter {
    if !values.status.is_on() {
        return AccessFilter {
            filter_type: "off".to_string(),
            value: None,
        };
    }
    AccessFilter {
        filter_type: list_type(values.list_type).to_string(),
        value: Some(values.values.join(",")),
    }
}

// ============ 鉴权 ============

fn with_url_auth(configs: &mut Configs, config: &DomainConfig) {
    let Some(auth) = &config.auth else {
        return;
    };
    let inherit_config = if auth.inherit_conf.is_empty() {
        InheritConfig {
            status: "off".to_string(),
            inherit_type: None,
            inherit_time_type: None,
        }
    } else {
        InheritConfig {
            status: "on".to_string(),
            inherit_type: Some(inherit_type(&auth.inherit_conf)),
            inherit_time_type: Some(inherit_time_type(auth.inherit_time_type).to_string()),
        }
    };
    configs.url_auth = Some(UrlAuth {
        status: switch(auth.status).to_string(),
        auth_type: auth_type(auth.manner).to_string(),
        expire_time: auth.ttl,
        sign_method: sign_method(auth.encrypt).to_string(),
        match_type: auth_match_type().to_string(),
        inherit_config,
        key: auth.key.clone(),
        backup_key: auth.backup_key.clone(),
        sign_arg: auth.parameter.clone(),
        time_format: auth_time_format(auth.manner, auth.time_format).to_string(),
    });
}

fn with_remote_auth(configs: &mut Configs, config: &DomainConfig) {
    let Some(remote) = &config.remote_auth else {
        return;
    };
    let specified_file_type = (remote.file_type != EffectiveType::All)
        .then(|| remote.file_content.join("|"));
    configs.remote_auth = Some(RemoteAuth {
        remote_authentication: switch(remote.status).to_string(),
        remote_auth_rules: RemoteAuthRule {
            auth_server: remote.auth_url.clone(),
            request_method: request_method(remote.method).to_string(),
            file_type_setting: remote_auth_file_type(remote.file_type).to_string(),
            specified_file_type,
            reserve_args_setting: "reserve_all_args".to_string(),
            reserve_args: String::new(),
            add_custom_args_rules: Vec::new(),
            reserve_headers_setting: "reserve_all_headers".to_string(),
            reserve_headers: String::new(),
            add_custom_headers_rules: Vec::new(),
            auth_success_status: "200".to_string(),
            auth_failed_status: "403".to_string(),
            response_status: "403".to_string(),
            timeout: remote.timeout,
            timeout_action: remote_auth_timeout_action(remote.timeout_action).to_string(),
        },
    });
}

// ============ 缓存 ============

fn with_cache_rules(configs: &mut Configs, config: &DomainConfig) {
    let Some(rules) = &config.cache_rules else {
        return;
    };
    configs.cache_rules = Some(
        rules
            .iter()
            .map(|r| CacheRuleConfig {
                match_type: rule_type(r.rule_type).to_string(),
                match_value: rule_has_content(r.rule_type)
                    .then(|| rule_paths(r.rule_type, &r.content)),
                ttl: (r.ttl > 0).then_some(r.ttl),
                ttl_unit: cache_unit(r.unit).to_string(),
                priority: r.priority,
                follow_origin: follow_origin(r.status).to_string(),
                url_parameter_type: url_parameter_type(r.parameter_status).to_string(),
                url_parameter_value: url_parameter_value(r.parameter_status, &r.parameter_values),
            })
            .collect(),
    );
}

fn with_browser_cache(configs: &mut Configs, config: &DomainConfig) {
    let Some(rules) = &config.browser_cache else {
        return;
    };
    configs.browser_cache_rules = Some(
        rules
            .iter()
            .map(|r| BrowserCacheRuleConfig {
                condition: RuleCondition {
                    match_type: rule_type(r.rule_type).to_string(),
                    match_value: rule_has_content(r.rule_type)
                        .then(|| rule_paths(r.rule_type, &r.content)),
                    priority: r.priority,
                },
                cache_type: browser_cache_type(r.status).to_string(),
                ttl: (r.ttl > 0).then_some(r.ttl),
                ttl_unit: (r.ttl > 0).then(|| cache_unit(r.unit).to_string()),
            })
            .collect(),
    );
}

// ============ 压缩 ============

fn with_compression(configs: &mut Configs, config: &DomainConfig) {
    let Some(conf) = &config.compression else {
        return;
    };
    let mut compress = Compress {
        status: switch(conf.status).to_string(),
        compress_type: None,
        file_type: None,
    };
    if let Some(first) = conf.rules.first() {
        let contents: Vec<String> = conf.rules.iter().flat_map(|r| r.content.clone()).collect();
        compress.compress_type = Some(compress_type(first.method).to_string());
        compress.file_type = Some(dotted_suffixes(&contents).join(","));
    }
    configs.compress = Some(compress);
}

// ============ HTTPS ============

fn with_https(configs: &mut Configs, https: &HttpsConf) {
    if https.https_status == Switch::Off {
        configs.https = Some(HttpsConfig {
            https_status: "off".to_string(),
            certificate_name: None,
            certificate_value: None,
            private_key: None,
            certificate_source: None,
            certificate_type: None,
            http2_status: None,
            tls_version: None,
            ocsp_stapling_status: None,
        });
        return;
    }

    configs.force_redirect = Some(ForceRedirect {
        status: switch(https.force_redirect).to_string(),
        jump_type: jump_type(https.jump_type).to_string(),
        redirect_code: https.redirect_code.status(),
    });
    configs.https = Some(HttpsConfig {
        https_status: "on".to_string(),
        certificate_name: Some(https.cert_name.clone()),
        certificate_value: Some(https.cert_value.clone()),
        private_key: Some(https.cert_key.clone()),
        certificate_source: Some(0),
        certificate_type: Some(certificate_type(https.cert_type).to_string()),
        http2_status: Some(switch(https.http2).to_string()),
        tls_version: Some(tls_versions(&https.tls_versions)),
        ocsp_stapling_status: Some(switch(https.ocsp).to_string()),
    });
    configs.hsts = Some(Hsts {
        status: switch(https.hsts_status).to_string(),
        max_age: https.hsts_max_age,
        include_subdomains: switch(https.hsts_subdomains).to_string(),
    });
}

/// 创建域名时的源站
pub(crate) fn create_sources(sources: &[OriginServer]) -> Vec<CreateSource> {
    sources
        .iter()
        .map(|s| CreateSource {
            ip_or_domain: s.address.clone(),
            origin_type: origin_type(s.origin_type).to_string(),
            active_standby: active_standby(s.priority),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        AreaCode, BaseConf, CacheParameterStatus, CacheRule, CompressMethod, CompressionConf,
        CompressionRule, IpFilterConf, IpFilterRule, IpFrequencyConf, ListType, OriginConf,
        OriginPriority, RuleType,
    };

    fn request(action: UpdateAction, config: DomainConfig) -> UpdateDomainRequest {
        UpdateDomainRequest::new(action, "cdn.example.com", config)
    }

    #[test]
    fn composite_step_order() {
        assert_eq!(
            steps(UpdateAction::Recommend),
            Some(vec![
                UpdateAction::BrowserCache,
                UpdateAction::CacheList,
                UpdateAction::OriginConf,
                UpdateAction::Https,
                UpdateAction::Compression,
                UpdateAction::IpFrequency,
            ])
        );
        let full = steps(UpdateAction::Full).unwrap_or_default();
        assert_eq!(full.len(), 19);
        assert_eq!(full.first(), Some(&UpdateAction::Base));
        assert_eq!(full.last(), Some(&UpdateAction::Https));
        assert!(!full.contains(&UpdateAction::Speed));
        assert_eq!(steps(UpdateAction::Speed), None);
        assert_eq!(
            steps(UpdateAction::Referer),
            Some(vec![UpdateAction::Referer])
        );
    }

    #[test]
    fn absent_sub_configs_are_skipped() {
        let cfg = DomainConfig {
            ip_frequency: Some(IpFrequencyConf {
                qps: 100,
                status: Switch::On,
            }),
            ..DomainConfig::default()
        };
        let configs = build_configs(&request(UpdateAction::Recommend, cfg));
        assert_eq!(
            configs.ip_frequency_limit,
            Some(IpFrequencyLimit {
                status: "on".to_string(),
                qps: 100,
            })
        );
        assert!(configs.https.is_none());
        assert!(configs.cache_rules.is_none());
        assert!(configs.origin_protocol.is_none());

        let json = serde_json::to_value(&configs).unwrap();
        assert_eq!(json.as_object().map(serde_json::Map::len), Some(1));
    }

    #[test]
    fn https_off_omits_hsts_and_redirect() {
        let cfg = DomainConfig {
            https: Some(HttpsConf::default()),
            ..DomainConfig::default()
        };
        let configs = build_configs(&request(UpdateAction::Https, cfg));
        assert_eq!(
            configs.https.as_ref().map(|h| h.https_status.as_str()),
            Some("off")
        );
        assert!(configs.hsts.is_none());
        assert!(configs.force_redirect.is_none());
    }

    #[test]
    fn https_on_sends_certificate_and_hsts() {
        let cfg = DomainConfig {
            https: Some(HttpsConf {
                https_status: Switch::On,
                cert_name: "cert".to_string(),
                hsts_status: Switch::On,
                hsts_max_age: 3600,
                ..HttpsConf::default()
            }),
            ..DomainConfig::default()
        };
        let configs = build_configs(&request(UpdateAction::Https, cfg));
        let Some(https) = configs.https else {
            panic!("https should be present");
        };
        assert_eq!(https.certificate_source, Some(0));
        assert_eq!(https.tls_version.as_deref(), Some("TLSv1.0,TLSv1.1,TLSv1.2"));
        assert_eq!(configs.hsts.map(|h| h.max_age), Some(3600));
        assert_eq!(configs.force_redirect.map(|f| f.redirect_code), Some(301));
    }

    #[test]
    fn cache_parameters_capped_at_ten() {
        let cfg = DomainConfig {
            cache_rules: Some(vec![CacheRule {
                rule_type: RuleType::FileSuffix,
                content: vec!["jpg".to_string(), "png".to_string()],
                ttl: 0,
                parameter_status: CacheParameterStatus::Include,
                parameter_values: (0..15).map(|i| format!("p{i}")).collect(),
                ..CacheRule::default()
            }]),
            ..DomainConfig::default()
        };
        let configs = build_configs(&request(UpdateAction::CacheList, cfg));
        let Some(rule) = configs.cache_rules.and_then(|r| r.into_iter().next()) else {
            panic!("cache rule should be present");
        };
        assert_eq!(rule.url_parameter_value.split(',').count(), 10);
        assert_eq!(rule.url_parameter_type, "reserve_params");
        assert_eq!(rule.match_value.as_deref(), Some(".jpg,.png"));
        assert_eq!(rule.ttl, None);
    }

    #[test]
    fn ip_filter_on_without_rules_is_empty_blacklist() {
        let cfg = DomainConfig {
            ip_filter: Some(IpFilterConf {
                status: Switch::On,
                rules: Vec::new(),
            }),
            ..DomainConfig::default()
        };
        let configs = build_configs(&request(UpdateAction::IpFilter, cfg));
        assert_eq!(
            configs.ip_filter,
            Some(AccessFilter {
                filter_type: "black".to_string(),
                value: Some(String::new()),
            })
        );
    }

    #[test]
    fn ip_filter_merges_rule_values() {
        let cfg = DomainConfig {
            ip_filter: Some(IpFilterConf {
                status: Switch::On,
                rules: vec![
                    IpFilterRule {
                        list_type: ListType::White,
                        ips: vec!["1.1.1.1".to_string()],
                        ..IpFilterRule::default()
                    },
                    IpFilterRule {
                        list_type: ListType::Black,
                        ips: vec!["2.2.2.0/24".to_string()],
                        ..IpFilterRule::default()
                    },
                ],
            }),
            ..DomainConfig::default()
        };
        let configs = build_configs(&request(UpdateAction::IpFilter, cfg));
        let filter = configs.ip_filter.map(|f| (f.filter_type, f.value));
        assert_eq!(
            filter,
            Some(("white".to_string(), Some("1.1.1.1,2.2.2.0/24".to_string())))
        );
    }

    #[test]
    fn origin_defaults() {
        let cfg = DomainConfig {
            base: Some(BaseConf::default()),
            origin: Some(OriginConf::default()),
            origin_servers: Some(Vec::new()),
            ..DomainConfig::default()
        };
        let configs = build_configs(&request(UpdateAction::Full, cfg));
        assert_eq!(configs.origin_receive_timeout, Some(30));
        assert_eq!(configs.origin_protocol.as_deref(), Some("http"));
        assert!(configs.sni.is_none());
        assert!(configs.sources.is_none());
        assert_eq!(configs.ipv6_accelerate, Some(0));
        // Area 不在全量步骤中
        assert!(configs.service_area.is_none());
    }

    #[test]
    fn origin_servers_priority() {
        let cfg = DomainConfig {
            origin_servers: Some(vec![
                OriginServer {
                    address: "1.1.1.1".to_string(),
                    ..OriginServer::default()
                },
                OriginServer {
                    address: "2.2.2.2".to_string(),
                    priority: OriginPriority::Backup,
                    ..OriginServer::default()
                },
            ]),
            ..DomainConfig::default()
        };
        let configs = build_configs(&request(UpdateAction::OriginServer, cfg));
        let priorities: Vec<i64> = configs
            .sources
            .unwrap_or_default()
            .iter()
            .map(|s| s.priority)
            .collect();
        assert_eq!(priorities, vec![70, 30]);
    }

    #[test]
    fn compression_uses_first_method_and_all_suffixes() {
        let cfg = DomainConfig {
            compression: Some(CompressionConf {
                status: Switch::On,
                rules: vec![
                    CompressionRule {
                        content: vec!["js".to_string()],
                        method: CompressMethod::Brotli,
                        ..CompressionRule::default()
                    },
                    CompressionRule {
                        content: vec![".css".to_string()],
                        method: CompressMethod::Gzip,
                        ..CompressionRule::default()
                    },
                ],
            }),
            ..DomainConfig::default()
        };
        let configs = build_configs(&request(UpdateAction::Compression, cfg));
        assert_eq!(
            configs.compress,
            Some(Compress {
                status: "on".to_string(),
                compress_type: Some("br".to_string()),
                file_type: Some(".js,.css".to_string()),
            })
        );
    }

    #[test]
    fn area_step() {
        let req = UpdateDomainRequest::area("cdn.example.com", AreaCode::Global);
        let configs = build_configs(&req);
        assert_eq!(configs.service_area.as_deref(), Some("global"));
        assert!(configs.ipv6_accelerate.is_none());
    }
}
