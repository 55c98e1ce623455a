use std::time::Duration;

use pretty_assertions::assert_eq;
use prime_client::{ClientConfig, PrimeClient, PrimeError};

#[test]
fn test_config_error() {
    // Invalid API root
    let err = ClientConfig::builder()
        .api_root("not a url")
        .username("test-user")
        .password("test-password")
        .build()
        .unwrap_err();
    match err {
        PrimeError::ConfigurationError(msg) => {
            assert!(msg.contains("Invalid API root"), "unexpected message: {msg}");
        }
        other => panic!("Expected ConfigurationError for invalid API root, got {other:?}"),
    }

    // Missing host
    let err = ClientConfig::builder()
        .username("test-user")
        .password("test-password")
        .build()
        .unwrap_err();
    match err {
        PrimeError::ConfigurationError(msg) => assert_eq!(msg, "Host is required"),
        other => panic!("Expected ConfigurationError for missing host, got {other:?}"),
    }

    // Missing username
    let err = ClientConfig::builder()
        .host("prime.example.com")
        .password("test-password")
        .build()
        .unwrap_err();
    match err {
        PrimeError::ConfigurationError(msg) => assert_eq!(msg, "Username is required"),
        other => panic!("Expected ConfigurationError for missing username, got {other:?}"),
    }
}

#[test]
fn test_builder_rejects_empty_username_and_password() {
    let err = ClientConfig::builder()
        .host("prime.example.com")
        .username("   ")
        .password("non-empty")
        .build()
        .unwrap_err();
    match err {
        PrimeError::ConfigurationError(msg) => assert_eq!(msg, "Username is required"),
        other => panic!("Expected ConfigurationError for username, got {other:?}"),
    }

    let err = ClientConfig::builder()
        .host("prime.example.com")
        .username("user")
        .password("")
        .build()
        .unwrap_err();
    match err {
        PrimeError::ConfigurationError(msg) => assert_eq!(msg, "Password is required"),
        other => panic!("Expected ConfigurationError for password, got {other:?}"),
    }

    let err = ClientConfig::builder()
        .host("  ")
        .username("user")
        .password("secret")
        .build()
        .unwrap_err();
    match err {
        PrimeError::ConfigurationError(msg) => assert_eq!(msg, "Host is required"),
        other => panic!("Expected ConfigurationError for blank host, got {other:?}"),
    }
}

#[test]
fn test_password_from_missing_env_var() {
    let err = ClientConfig::builder()
        .host("prime.example.com")
        .username("user")
        .password_from_env("PRIME_CLIENT_TEST_UNSET_PASSWORD_VAR")
        .build()
        .unwrap_err();
    match err {
        PrimeError::ConfigurationError(msg) => {
            assert!(msg.contains("PRIME_CLIENT_TEST_UNSET_PASSWORD_VAR"));
        }
        other => panic!("Expected ConfigurationError for env var, got {other:?}"),
    }
}

#[test]
fn test_defaults_and_derived_urls() {
    let config = ClientConfig::builder()
        .host("prime.example.com")
        .username("user")
        .password("secret")
        .build()
        .unwrap();

    assert_eq!(config.host(), "prime.example.com");
    assert_eq!(config.username(), "user");
    assert!(!config.verify_tls());
    assert_eq!(config.timeout(), Duration::from_secs(2));
    assert_eq!(
        config.api_root().as_str(),
        "https://prime.example.com/webacs/api/v1"
    );
    assert_eq!(
        config.data_url(),
        "https://prime.example.com/webacs/api/v1/data"
    );
}

#[test]
fn test_api_root_override_supplies_host() {
    let config = ClientConfig::builder()
        .api_root("http://127.0.0.1:8080/webacs/api/v1/")
        .username("user")
        .password("secret")
        .verify_tls(true)
        .timeout(Duration::from_secs(15))
        .build()
        .unwrap();

    assert_eq!(config.host(), "127.0.0.1");
    assert!(config.verify_tls());
    assert_eq!(config.timeout(), Duration::from_secs(15));
    assert_eq!(config.data_url(), "http://127.0.0.1:8080/webacs/api/v1/data");
}

#[test]
fn test_debug_output_hides_password() {
    let config = ClientConfig::builder()
        .host("prime.example.com")
        .username("user")
        .password("hunter2-very-secret")
        .build()
        .unwrap();
    let client = PrimeClient::new(config).unwrap();

    let rendered = format!("{client:?}");
    assert!(rendered.contains("prime.example.com"));
    assert!(!rendered.contains("hunter2-very-secret"));
}
