//! 腾讯云域名配置构造
//!
//! 把统一 `DomainConfig` 转成 `UpdateDomainConfig` 请求体。请求体总是先写入域名，
//! 再按动作展开的步骤依次填充；缺失的子配置对应的步骤被跳过。

use crate::providers::common::truncate_parameters;
use crate::types::{
    AuthConf, AuthManner, CacheParameterStatus, CacheRule, CacheStatus, DomainConfig, HeaderRule,
    HttpsConf, OriginPriority, OriginProtocol, OriginServer, RuleType, UpdateAction,
    UpdateDomainRequest,
};

use super::mapping::{
    advance_rule_type, area, auth_algorithm, auth_file_extensions, auth_filter_type,
    auth_timeout_action, compress_algorithm, compress_paths, compress_rule_type,
    effective_paths, effective_type, follow_origin, full_url_cache, header_mode, jump_type,
    list_type, origin_address, origin_pull_protocol, origin_type_by_addresses,
    origin_url_full_match, origin_url_regex, query_string_action, remote_auth_method, rule_paths,
    rule_type, switch, time_format, tls_versions, url_redirect_full_match,
};
use super::types::{
    Authentication, AuthenticationTypeDetail, Cache, CacheConfigCache, CacheKey, CappingRule,
    Compression, CompressionRule, DownstreamCapping, ErrorPage, ErrorPageRule, ForceRedirect,
    HeaderConfig, HeaderRuleItem, Hsts, Https, IpFilter, IpFilterRuleItem, IpFreqLimit, KeyRule,
    MaxAge, MaxAgeRule, Origin, OriginPullTimeout, OriginSni, PathBasedOriginRule, PathRule,
    QueryStringKey, Referer, RefererRuleItem, RemoteAuthentication, RemoteAuthenticationRule,
    RuleCache, RuleCacheConfig, ServerCert, StatusCodeCache, StatusCodeCacheRule, SwitchConfig,
    UpdateDomainConfigRequest, UrlRedirect, UrlRedirectRule, UserAgentFilter,
    UserAgentFilterRule,
};

/// 推荐配置
const RECOMMEND_STEPS: &[UpdateAction] = &[
    UpdateAction::BrowserCache,
    UpdateAction::OriginConf,
    UpdateAction::CacheList,
    UpdateAction::Https,
    UpdateAction::Compression,
    UpdateAction::IpFrequency,
];

/// 全量配置；`OriginServer` 步骤写入主备源站
const FULL_STEPS: &[UpdateAction] = &[
    UpdateAction::Base,
    UpdateAction::OriginConf,
    UpdateAction::OriginServer,
    UpdateAction::OriginUrl,
    UpdateAction::OriginAdvance,
    UpdateAction::OriginRequestHeader,
    UpdateAction::IpFilter,
    UpdateAction::IpFrequency,
    UpdateAction::Referer,
    UpdateAction::UserAgent,
    UpdateAction::Speed,
    UpdateAction::Auth,
    UpdateAction::RemoteAuth,
    UpdateAction::CacheList,
    UpdateAction::CacheCode,
    UpdateAction::UrlRewrite,
    UpdateAction::BrowserCache,
    UpdateAction::ErrorPage,
    UpdateAction::Compression,
    UpdateAction::ResponseHeader,
    UpdateAction::Https,
];

/// 回源建连/接收超时下限（秒）
const MIN_CONNECT_TIMEOUT: i64 = 5;
const MIN_RECEIVE_TIMEOUT: i64 = 10;

/// 智能压缩的文件大小范围
const COMPRESS_MIN_LENGTH: i64 = 256;
const COMPRESS_MAX_LENGTH: i64 = 30 * 1024 * 1024;

/// 动作展开后的步骤；回源相关动作都会先写入源站列表
pub(crate) fn steps(action: UpdateAction) -> Vec<UpdateAction> {
    match action {
        UpdateAction::Recommend => RECOMMEND_STEPS.to_vec(),
        UpdateAction::Full => FULL_STEPS.to_vec(),
        UpdateAction::OriginConf | UpdateAction::OriginUrl | UpdateAction::OriginAdvance => {
            vec![UpdateAction::OriginServer, action]
        }
        primitive => vec![primitive],
    }
}

/// 构造 `UpdateDomainConfig` 请求体
pub(crate) fn build_update_request(req: &UpdateDomainRequest) -> UpdateDomainConfigRequest {
    let mut body = UpdateDomainConfigRequest {
        domain: req.domain.clone(),
        ..UpdateDomainConfigRequest::default()
    };
    for step in steps(req.action) {
        apply_step(&mut body, step, &req.config);
    }
    body
}

fn apply_step(body: &mut UpdateDomainConfigRequest, step: UpdateAction, config: &DomainConfig) {
    match step {
        UpdateAction::Base => {
            if let Some(base) = &config.base {
                body.ipv6_access = Some(SwitchConfig::new(switch(base.support_ipv6)));
            }
        }
        UpdateAction::Area => {
            if let Some(base) = &config.base {
                body.area = Some(area(base.area_code).to_string());
            }
        }
        UpdateAction::OriginServer => with_origins(body, config),
        UpdateAction::OriginConf => {
            if let Some(origin) = &config.origin {
                body.origin_pull_timeout = Some(OriginPullTimeout {
                    connect_timeout: origin.tcp_timeout.max(MIN_CONNECT_TIMEOUT),
                    receive_timeout: origin.timeout.max(MIN_RECEIVE_TIMEOUT),
                });
                body.follow_redirect = Some(SwitchConfig::new(switch(origin.follow)));
                body.range_origin_pull = Some(SwitchConfig::new(switch(origin.range)));
            }
        }
        UpdateAction::OriginUrl => {
            if let Some(rules) = &config.origin_urls {
                body.origin.get_or_insert_with(Origin::default).path_rules = Some(
                    rules
                        .iter()
                        .map(|r| PathRule {
                            regex: origin_url_regex(r.mate_method),
                            path: r.rewrite_url.clone(),
                            origin: String::new(),
                            forward_uri: r.target_url.clone(),
                            full_match: origin_url_full_match(r.mate_method),
                        })
                        .collect(),
                );
            }
        }
        UpdateAction::OriginAdvance => {
            if let Some(servers) = &config.origin_advance {
                let protocol = config.origin_protocol();
                body.origin.get_or_insert_with(Origin::default).path_based_origin = Some(
                    servers
                        .iter()
                        .map(|s| PathBasedOriginRule {
                            rule_type: advance_rule_type(s.url_match_mode).to_string(),
                            rule_paths: s.url_match_rule.clone(),
                            origin: vec![origin_address(&s.address, s.port_for(protocol), 0, 1)],
                        })
                        .collect(),
                );
            }
        }
        UpdateAction::OriginRequestHeader => {
            if let Some(rules) = &config.origin_request_headers {
                body.request_header = Some(header_config(rules));
            }
        }
        UpdateAction::ResponseHeader => {
            if let Some(rules) = &config.response_headers {
                body.response_header = Some(header_config(rules));
            }
        }
        UpdateAction::IpFilter => {
            if let Some(conf) = &config.ip_filter {
                body.ip_filter = Some(IpFilter {
                    switch: switch(conf.status).to_string(),
                    filter_rules: conf
                        .rules
                        .iter()
                        .filter(|r| !r.ips.is_empty())
                        .map(|r| IpFilterRuleItem {
                            filter_type: list_type(r.list_type).to_string(),
                            filters: r.ips.clone(),
                            rule_type: effective_type(r.effective_type).to_string(),
                            rule_paths: effective_paths(r.effective_type, &r.effective_rules),
                        })
                        .collect(),
                });
            }
        }
        UpdateAction::UserAgent => {
            if let Some(conf) = &config.user_agent {
                body.user_agent_filter = Some(UserAgentFilter {
                    switch: switch(conf.status).to_string(),
                    filter_rules: conf
                        .rules
                        .iter()
                        .filter(|r| !r.agents.is_empty())
                        .map(|r| UserAgentFilterRule {
                            filter_type: list_type(r.list_type).to_string(),
                            user_agents: r.agents.clone(),
                            rule_type: effective_type(r.effective_type).to_string(),
                            rule_paths: effective_paths(r.effective_type, &r.effective_rules),
                        })
                        .collect(),
                });
            }
        }
        UpdateAction::Referer => {
            if let Some(conf) = &config.referer {
                let mut referer = Referer {
                    switch: switch(conf.status).to_string(),
                    referer_rules: Vec::new(),
                };
                if !conf.referers.is_empty() {
                    referer.referer_rules.push(RefererRuleItem {
                        rule_type: "all".to_string(),
                        rule_paths: vec!["*".to_string()],
                        referer_type: list_type(conf.list_type).to_string(),
                        referers: conf.referers.clone(),
                        allow_empty: conf.include_empty.is_on(),
                    });
                }
                body.referer = Some(referer);
            }
        }
        UpdateAction::IpFrequency => {
            if let Some(conf) = &config.ip_frequency {
                body.ip_freq_limit = Some(IpFreqLimit {
                    switch: switch(conf.status).to_string(),
                    qps: (conf.status.is_on() && conf.qps > 0).then_some(conf.qps),
                });
            }
        }
        UpdateAction::Speed => {
            if let Some(conf) = &config.speed {
                body.downstream_capping = Some(DownstreamCapping {
                    switch: switch(conf.status).to_string(),
                    capping_rules: conf
                        .rules
                        .iter()
                        .map(|r| CappingRule {
                            rule_type: rule_type(r.rule_type).to_string(),
                            rule_paths: rule_paths(r.rule_type, &r.content),
                            kbps_threshold: r.kbps,
                        })
                        .collect(),
                });
            }
        }
        UpdateAction::Auth => {
            if let Some(auth) = &config.auth {
                body.authentication = Some(authentication(auth));
            }
        }
        UpdateAction::RemoteAuth => {
            if let Some(conf) = &config.remote_auth {
                let mut remote = RemoteAuthentication {
                    switch: switch(conf.status).to_string(),
                    remote_authentication_rules: Vec::new(),
                };
                if conf.status.is_on() {
                    remote
                        .remote_authentication_rules
                        .push(RemoteAuthenticationRule {
                            server: conf.auth_url.clone(),
                            auth_method: remote_auth_method(conf.method).to_string(),
                            rule_type: effective_type(conf.file_type).to_string(),
                            rule_paths: effective_paths(conf.file_type, &conf.file_content),
                            auth_timeout: conf.timeout,
                            auth_timeout_action: auth_timeout_action(conf.timeout_action)
                                .to_string(),
                        });
                }
                body.remote_authentication = Some(remote);
            }
        }
        UpdateAction::CacheList => {
            if let Some(rules) = &config.cache_rules {
                body.cache = Some(Cache {
                    rule_cache: rules.iter().map(rule_cache).collect(),
                });
                body.cache_key = Some(cache_key(rules));
            }
        }
        UpdateAction::CacheCode => {
            if let Some(rules) = &config.cache_codes {
                body.status_code_cache = Some(StatusCodeCache {
                    switch: switch((!rules.is_empty()).into()).to_string(),
                    cache_rules: rules
                        .iter()
                        .map(|r| StatusCodeCacheRule {
                            status_code: r.http_code.to_string(),
                            cache_time: r.ttl_seconds(),
                        })
                        .collect(),
                });
            }
        }
        UpdateAction::BrowserCache => {
            if let Some(rules) = &config.browser_cache {
                body.max_age = Some(MaxAge {
                    switch: switch((!rules.is_empty()).into()).to_string(),
                    max_age_rules: rules
                        .iter()
                        .map(|r| MaxAgeRule {
                            max_age_type: rule_type(r.rule_type).to_string(),
                            max_age_contents: rule_paths(r.rule_type, &r.content),
                            max_age_time: r.ttl_seconds(),
                            follow_origin: follow_origin(r.status).to_string(),
                        })
                        .collect(),
                });
            }
        }
        UpdateAction::UrlRewrite => {
            if let Some(rules) = &config.url_rewrites {
                body.url_redirect = Some(UrlRedirect {
                    switch: switch((!rules.is_empty()).into()).to_string(),
                    path_rules: rules
                        .iter()
                        .map(|r| UrlRedirectRule {
                            redirect_status_code: i64::from(r.redirect_code.status()),
                            pattern: r.rewrite_url.clone(),
                            redirect_url: r.target_url.clone(),
                            full_match: url_redirect_full_match(r.mate_method),
                        })
                        .collect(),
                });
            }
        }
        UpdateAction::ErrorPage => {
            if let Some(rules) = &config.error_pages {
                body.error_page = Some(ErrorPage {
                    switch: switch((!rules.is_empty()).into()).to_string(),
                    page_rules: rules
                        .iter()
                        .map(|r| ErrorPageRule {
                            status_code: r.status_code,
                            redirect_code: i64::from(r.redirect_code.status()),
                            redirect_url: r.target.clone(),
                        })
                        .collect(),
                });
            }
        }
        UpdateAction::Compression => {
            if let Some(conf) = &config.compression {
                body.compression = Some(Compression {
                    switch: switch(conf.status).to_string(),
                    compression_rules: conf
                        .rules
                        .iter()
                        .map(|r| CompressionRule {
                            compress: true,
                            min_length: COMPRESS_MIN_LENGTH,
                            max_length: COMPRESS_MAX_LENGTH,
                            algorithms: vec![compress_algorithm(r.method).to_string()],
                            rule_type: compress_rule_type(r.rule_type).to_string(),
                            rule_paths: compress_paths(r.rule_type, &r.content),
                        })
                        .collect(),
                });
            }
        }
        UpdateAction::Https => {
            if let Some(https) = &config.https {
                with_https(body, https);
            }
        }
        UpdateAction::Recommend | UpdateAction::Full => {
            log::debug!("[tencent] step {step} has no config mapping, skipped");
        }
    }
}

// ============ 源站 ============

/// 同一角色（主/备）的源站地址列表及类型
fn role_origins(protocol: OriginProtocol, servers: &[&OriginServer]) -> (Vec<String>, String) {
    let addresses = servers
        .iter()
        .map(|s| {
            origin_address(
                &s.address,
                s.port_for(protocol),
                s.weight,
                servers.len(),
            )
        })
        .collect();
    let origin_type = origin_type_by_addresses(servers.iter().map(|s| s.address.as_str()));
    (addresses, origin_type)
}

fn non_empty(host: &str) -> Option<String> {
    (!host.is_empty()).then(|| host.to_string())
}

/// 主备拆分后的回源配置，`ServerName` 取各角色第一个源站的回源 Host
fn split_origins(protocol: OriginProtocol, servers: &[OriginServer]) -> Origin {
    let (primary, backup): (Vec<&OriginServer>, Vec<&OriginServer>) = servers
        .iter()
        .partition(|s| s.priority == OriginPriority::Primary);

    let (origins, origin_type) = role_origins(protocol, &primary);
    let mut origin = Origin {
        origins: Some(origins),
        origin_type: Some(origin_type),
        server_name: primary.first().and_then(|s| non_empty(&s.host)),
        origin_pull_protocol: Some(origin_pull_protocol(protocol).to_string()),
        ..Origin::default()
    };
    if !backup.is_empty() {
        let (backup_origins, backup_type) = role_origins(protocol, &backup);
        origin.backup_origins = Some(backup_origins);
        origin.backup_origin_type = Some(backup_type);
        origin.backup_server_name = backup.first().and_then(|s| non_empty(&s.host));
    }
    origin
}

fn with_origins(body: &mut UpdateDomainConfigRequest, config: &DomainConfig) {
    let Some(servers) = &config.origin_servers else {
        return;
    };
    let mut origin = split_origins(config.origin_protocol(), servers);
    if let Some(conf) = &config.origin {
        if let Some(sni) = conf.sni_switch {
            origin.sni = Some(OriginSni {
                switch: switch(sni).to_string(),
                server_name: conf.sni_value.clone(),
            });
        }
    }
    // 同一请求中先写入的改写规则保留
    if let Some(existing) = body.origin.take() {
        origin.path_rules = existing.path_rules;
        origin.path_based_origin = existing.path_based_origin;
    }
    body.origin = Some(origin);
}

/// `AddCdnDomain` 的回源配置：主备共用第一个源站的回源 Host
pub(crate) fn create_origin(protocol: OriginProtocol, sources: &[OriginServer]) -> Origin {
    let host = sources.first().and_then(|s| non_empty(&s.host));
    let mut origin = split_origins(protocol, sources);
    origin.server_name.clone_from(&host);
    if origin.backup_origins.is_some() {
        origin.backup_server_name = host;
    }
    origin
}

// ============ 头部 / 缓存 / 鉴权 / HTTPS ============

fn header_config(rules: &[HeaderRule]) -> HeaderConfig {
    HeaderConfig {
        switch: switch((!rules.is_empty()).into()).to_string(),
        header_rules: rules
            .iter()
            .map(|r| HeaderRuleItem {
                header_mode: header_mode(r.action).to_string(),
                header_name: r.key.clone(),
                header_value: r.value.clone(),
                rule_type: "all".to_string(),
                rule_paths: vec!["*".to_string()],
            })
            .collect(),
    }
}

fn rule_cache(rule: &CacheRule) -> RuleCache {
    let on = || Some(SwitchConfig::new("on"));
    let cache_config = match rule.status {
        CacheStatus::Follow => RuleCacheConfig {
            follow_origin: on(),
            ..RuleCacheConfig::default()
        },
        CacheStatus::On => RuleCacheConfig {
            cache: Some(CacheConfigCache {
                switch: "on".to_string(),
                cache_time: rule.ttl_seconds(),
            }),
            ..RuleCacheConfig::default()
        },
        CacheStatus::Off => RuleCacheConfig {
            no_cache: on(),
            ..RuleCacheConfig::default()
        },
    };
    RuleCache {
        rule_type: rule_type(rule.rule_type).to_string(),
        rule_paths: rule_paths(rule.rule_type, &rule.content),
        cache_config,
    }
}

/// 参数过滤：只有 include/exclude 才开启，参数值最多 10 个
fn query_string(status: CacheParameterStatus, values: &[String]) -> QueryStringKey {
    match query_string_action(status) {
        Some(action) => QueryStringKey {
            switch: "on".to_string(),
            action: Some(action.to_string()),
            value: Some(truncate_parameters(values).join(";")),
        },
        None => QueryStringKey {
            switch: "off".to_string(),
            action: None,
            value: None,
        },
    }
}

/// 缓存键：全部文件规则写入顶层配置，其余规则写入 `KeyRules`
fn cache_key(rules: &[CacheRule]) -> CacheKey {
    let mut key = CacheKey::default();
    for rule in rules {
        if rule.rule_type == RuleType::All {
            key.query_string = Some(query_string(rule.parameter_status, &rule.parameter_values));
            key.full_url_cache = Some(full_url_cache(rule.parameter_status).to_string());
            key.ignore_case = Some(switch(rule.ignore_case).to_string());
            continue;
        }
        key.key_rules.push(KeyRule {
            rule_type: rule_type(rule.rule_type).to_string(),
            rule_paths: rule_paths(rule.rule_type, &rule.content),
            full_url_cache: full_url_cache(rule.parameter_status).to_string(),
            ignore_case: switch(rule.ignore_case).to_string(),
            query_string: query_string(rule.parameter_status, &rule.parameter_values),
        });
    }
    key
}

fn authentication(auth: &AuthConf) -> Authentication {
    let mut out = Authentication {
        switch: switch(auth.status).to_string(),
        auth_algorithm: Some(auth_algorithm(auth.encrypt).to_string()),
        ..Authentication::default()
    };
    if !auth.status.is_on() {
        return out;
    }

    let mut detail = AuthenticationTypeDetail {
        secret_key: auth.key.clone(),
        backup_secret_key: Some(auth.backup_key.clone()),
        expire_time: auth.ttl,
        file_extensions: auth_file_extensions(&auth.file_suffix),
        filter_type: auth_filter_type(auth.range).to_string(),
        ..AuthenticationTypeDetail::default()
    };
    match auth.manner {
        AuthManner::TypeA => {
            detail.sign_param = Some(auth.parameter.clone());
            out.type_a = Some(detail);
        }
        AuthManner::TypeB => out.type_b = Some(detail),
        AuthManner::TypeC => {
            detail.time_format = Some(time_format(auth.time_format).to_string());
            out.type_c = Some(detail);
        }
        AuthManner::TypeD => {
            detail.sign_param = Some(auth.parameter.clone());
            detail.time_param = Some("t".to_string());
            detail.time_format = Some(time_format(auth.time_format).to_string());
            out.type_d = Some(detail);
        }
    }
    out
}

fn with_https(body: &mut UpdateDomainConfigRequest, conf: &HttpsConf) {
    let status = switch(conf.https_status).to_string();
    body.https_billing = Some(SwitchConfig::new(&status));
    let mut https = Https {
        switch: status,
        ..Https::default()
    };
    if conf.https_status.is_on() {
        https.http2 = Some(switch(conf.http2).to_string());
        https.ocsp_stapling = Some(switch(conf.ocsp).to_string());
        https.cert_info = Some(ServerCert {
            certificate: conf.cert_value.clone(),
            private_key: conf.cert_key.clone(),
            message: conf.cert_name.clone(),
            from: "upload".to_string(),
        });
        https.hsts = Some(Hsts {
            switch: switch(conf.hsts_status).to_string(),
            max_age: conf.hsts_max_age,
            include_sub_domains: switch(conf.hsts_subdomains).to_string(),
        });
        https.tls_version = Some(tls_versions(&conf.tls_versions));
        body.force_redirect = Some(ForceRedirect {
            switch: switch(conf.force_redirect).to_string(),
            redirect_type: Some(jump_type(conf.jump_type).to_string()),
            redirect_status_code: Some(i64::from(conf.redirect_code.status())),
        });
    }
    body.https = Some(https);
}
