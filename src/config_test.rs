use std::collections::HashMap;

use super::*;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn from_lookup_defaults_to_development() {
    let cfg = ClientConfig::from_lookup(lookup_from(&[])).unwrap();
    assert_eq!(cfg.mode, EnvMode::Development);
    assert_eq!(cfg.base_url(), DEFAULT_DEVELOPMENT_BASE_URL);
    assert_eq!(cfg.timeouts, Timeouts { request_secs: 300, connect_secs: 10 });
    assert!(cfg.origin.is_none());
}

#[test]
fn production_mode_uses_relative_prefix() {
    let cfg = ClientConfig::from_lookup(lookup_from(&[("APP_ENV", "production")])).unwrap();
    assert_eq!(cfg.mode, EnvMode::Production);
    assert_eq!(cfg.base_url(), "/api/v1");
}

#[test]
fn base_url_override_wins_over_mode() {
    let cfg = ClientConfig::from_lookup(lookup_from(&[
        ("APP_ENV", "prod"),
        ("API_BASE_URL", "https://api.example.test/v2/"),
    ]))
    .unwrap();
    assert_eq!(cfg.base_url(), "https://api.example.test/v2");
    assert_eq!(cfg.endpoint().unwrap(), "https://api.example.test/v2");
}

#[test]
fn blank_values_are_ignored() {
    let cfg = ClientConfig::from_lookup(lookup_from(&[("APP_ENV", "  "), ("API_BASE_URL", "")])).unwrap();
    assert_eq!(cfg.mode, EnvMode::Development);
    assert!(cfg.base_url_override.is_none());
}

#[test]
fn timeouts_parse_and_fall_back_on_garbage() {
    let cfg = ClientConfig::from_lookup(lookup_from(&[
        ("API_TIMEOUT_SECS", "42"),
        ("API_CONNECT_TIMEOUT_SECS", "soon"),
    ]))
    .unwrap();
    assert_eq!(cfg.timeouts, Timeouts { request_secs: 42, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS });
    assert_eq!(cfg.timeouts.request(), Duration::from_secs(42));
}

#[test]
fn unknown_mode_errors() {
    let err = ClientConfig::from_lookup(lookup_from(&[("APP_ENV", "staging")])).unwrap_err();
    assert_eq!(err, ConfigError::InvalidMode("staging".to_owned()));
    assert!(err.to_string().contains("unknown APP_ENV"));
}

#[test]
fn mode_parse_is_case_insensitive() {
    assert_eq!(EnvMode::parse("PRODUCTION").unwrap(), EnvMode::Production);
    assert_eq!(EnvMode::parse(" Dev ").unwrap(), EnvMode::Development);
}

#[test]
fn relative_base_needs_origin() {
    let cfg = ClientConfig::new(EnvMode::Production);
    assert_eq!(cfg.endpoint(), Err(ConfigError::RelativeBaseUrl("/api/v1".to_owned())));

    let cfg = cfg.with_origin("https://app.example.test/");
    assert_eq!(cfg.endpoint().unwrap(), "https://app.example.test/api/v1");
}

#[test]
fn development_endpoint_is_absolute() {
    let cfg = ClientConfig::new(EnvMode::Development);
    assert_eq!(cfg.endpoint().unwrap(), "http://localhost:8010/api/v1");
}

#[test]
fn unparseable_base_url_errors() {
    let cfg = ClientConfig::new(EnvMode::Development).with_base_url("not a url");
    assert!(matches!(cfg.endpoint(), Err(ConfigError::InvalidBaseUrl(_))));
}
