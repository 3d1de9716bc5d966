use super::*;

#[test]
fn defaults_apply_when_env_is_absent() {
    let config = ClientConfig::from_values(None, None, None);
    assert_eq!(config, ClientConfig::default());
    assert_eq!(config.api_base_url, "http://localhost:5000/api");
    assert_eq!(config.verify_timeout, Duration::from_secs(10));
}

#[test]
fn base_url_is_trimmed_and_loses_trailing_slash() {
    let config = ClientConfig::from_values(Some("  https://api.example.org/v1/ "), None, None);
    assert_eq!(config.api_base_url, "https://api.example.org/v1");
}

#[test]
fn blank_base_url_falls_back_to_default() {
    let config = ClientConfig::from_values(Some("   "), None, None);
    assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
}

#[test]
fn invalid_or_zero_timeouts_fall_back_to_defaults() {
    let config = ClientConfig::from_values(None, Some("soon"), Some("0"));
    assert_eq!(config.verify_timeout, Duration::from_millis(DEFAULT_VERIFY_TIMEOUT_MS));
    assert_eq!(config.request_timeout, Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS));
}

#[test]
fn timeouts_parse_milliseconds() {
    let config = ClientConfig::from_values(None, Some("2500"), Some(" 7000 "));
    assert_eq!(config.verify_timeout, Duration::from_millis(2500));
    assert_eq!(config.request_timeout, Duration::from_millis(7000));
}

#[test]
fn url_joins_paths_with_single_slash() {
    let config = ClientConfig::default();
    assert_eq!(config.url("/auth/login"), "http://localhost:5000/api/auth/login");
    assert_eq!(config.url("auth/verify"), "http://localhost:5000/api/auth/verify");
}
