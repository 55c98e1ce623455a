use std::time::Duration;

use prime_client::{ClientConfig, PrimeClient};
use serde_json::{json, Value};

#[allow(dead_code)]
pub const API_ROOT: &str = "/webacs/api/v1";

/// `Authorization` header for the test credentials.
#[allow(dead_code)]
pub const BASIC_AUTH: &str = "Basic dGVzdC11c2VyOnRlc3QtcGFzc3dvcmQ=";

/// Path of an endpoint below the API root, as seen by the mock server.
#[allow(dead_code)]
pub fn api_path(path: &str) -> String {
    format!("{API_ROOT}/{path}")
}

#[allow(dead_code)]
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Config pointing at the mock server, with predefined credentials.
#[allow(dead_code)]
pub fn test_config(server_url: &str, timeout: Duration) -> ClientConfig {
    ClientConfig::builder()
        .host("prime.test")
        .api_root(format!("{server_url}{API_ROOT}"))
        .username("test-user")
        .password("test-password")
        .timeout(timeout)
        .build()
        .expect("Failed to build ClientConfig")
}

/// Set up a test client with predefined credentials.
#[allow(dead_code)]
pub fn setup_test_client(server_url: &str) -> PrimeClient {
    init_logging();
    PrimeClient::new(test_config(server_url, Duration::from_secs(5)))
        .expect("Failed to build PrimeClient")
}

/// A `data/Devices` query response with the given count and `entityId` value.
#[allow(dead_code)]
pub fn query_response(count: &str, entity_id: Option<Value>) -> Value {
    let mut query = json!({
        "@type": "Devices",
        "@rootUrl": "https://prime.test/webacs/api/v1/data",
        "@requestUrl": "https://prime.test/webacs/api/v1/data/Devices",
        "@responseType": "listEntityIds",
        "@count": count,
        "@first": "0",
        "@last": "0",
    });
    if let Some(entity_id) = entity_id {
        query["entityId"] = entity_id;
    }
    json!({ "queryResponse": query })
}

/// One `entityId` entry.
#[allow(dead_code)]
pub fn entity(id: &str) -> Value {
    json!({
        "@type": "Devices",
        "@url": format!("https://prime.test/webacs/api/v1/data/Devices/{id}"),
        "$": id
    })
}
