use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;

use common::{api_path, setup_test_client, BASIC_AUTH};
use prime_client::{ErrorCode, Outcome, SnmpVersion};

fn bulk_import_response(job_name: &str) -> serde_json::Value {
    json!({
        "mgmtResponse": {
            "@requestUrl": "https://prime.test/webacs/api/v1/op/devices/bulkImport",
            "@responseType": "operation",
            "bulkImportResult": { "jobName": job_name }
        }
    })
}

#[tokio::test]
async fn test_add_device_returns_job_name() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path(api_path("op/devices/bulkImport")))
        .and(header("authorization", BASIC_AUTH))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "devicesImport": {
                "devices": {
                    "device": {
                        "ipAddress": "10.0.0.5",
                        "networkMask": "255.255.255.0",
                        "snmpCommunity": "public",
                        "snmpRetries": "2",
                        "snmpTimeout": "10",
                        "snmpVersion": "2c"
                    }
                }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(bulk_import_response("Job-123")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = setup_test_client(&mock_server.uri());
    let outcome = client
        .devices()
        .add("10.0.0.5", "255.255.255.0")
        .snmp_community("public")
        .send()
        .await;

    assert!(outcome.is_success());
    assert_eq!(outcome.into_data(), Some("Job-123".to_string()));
}

#[tokio::test]
async fn test_add_device_custom_snmp_settings() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path(api_path("op/devices/bulkImport")))
        .and(body_json(json!({
            "devicesImport": {
                "devices": {
                    "device": {
                        "ipAddress": "10.0.0.6",
                        "networkMask": "255.255.0.0",
                        "snmpCommunity": "private",
                        "snmpRetries": "5",
                        "snmpTimeout": "30",
                        "snmpVersion": "2c"
                    }
                }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(bulk_import_response("Job-124")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = setup_test_client(&mock_server.uri());
    let outcome = client
        .devices()
        .add("10.0.0.6", "255.255.0.0")
        .snmp_community("private")
        .snmp_retries(5)
        .snmp_timeout_secs(30)
        .snmp_version(SnmpVersion::V2c)
        .send()
        .await;

    assert_eq!(outcome.into_data(), Some("Job-124".to_string()));
}

#[tokio::test]
async fn test_add_device_v2c_without_community_makes_no_request() {
    let mock_server = MockServer::start().await;

    let client = setup_test_client(&mock_server.uri());
    let outcome = client.devices().add("10.0.0.5", "255.255.255.0").send().await;

    assert!(!outcome.is_success());
    assert_eq!(outcome.error_code(), Some(ErrorCode::Validation));
    assert_eq!(
        outcome.message(),
        Some("SNMP community is required for SNMP version 2c")
    );

    let requests = mock_server
        .received_requests()
        .await
        .expect("failed to read recorded requests");
    assert!(requests.is_empty(), "no request should reach the server");
}

#[test]
fn test_add_device_validation_needs_no_server() {
    // Nothing listens on this address; validation fails before any I/O.
    let client = setup_test_client("http://127.0.0.1:9");

    let outcome = tokio_test::block_on(client.devices().add("10.0.0.5", "255.255.255.0").send());

    assert_eq!(outcome.error_code(), Some(ErrorCode::Validation));
}

#[tokio::test]
async fn test_add_device_other_versions_omit_snmp_fields() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path(api_path("op/devices/bulkImport")))
        .and(body_json(json!({
            "devicesImport": {
                "devices": {
                    "device": {
                        "ipAddress": "10.0.0.7",
                        "networkMask": "255.255.255.0"
                    }
                }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(bulk_import_response("Job-125")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = setup_test_client(&mock_server.uri());
    let outcome = client
        .devices()
        .add("10.0.0.7", "255.255.255.0")
        .snmp_community("ignored")
        .snmp_version(SnmpVersion::V3)
        .send()
        .await;

    assert_eq!(outcome, Outcome::success("Job-125".to_string()));
}

#[test]
fn test_add_device_payload_shape() {
    let client = setup_test_client("http://127.0.0.1:9");

    let payload = client
        .devices()
        .add("10.0.0.8", "255.255.255.252")
        .snmp_version(SnmpVersion::V1)
        .payload()
        .expect("v1 payload needs no community");

    assert_eq!(
        serde_json::to_value(payload).unwrap(),
        json!({
            "devicesImport": {
                "devices": {
                    "device": { "ipAddress": "10.0.0.8", "networkMask": "255.255.255.252" }
                }
            }
        })
    );
}

#[tokio::test]
async fn test_add_device_remote_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path(api_path("op/devices/bulkImport")))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let client = setup_test_client(&mock_server.uri());
    let outcome = client
        .devices()
        .add("10.0.0.5", "255.255.255.0")
        .snmp_community("public")
        .send()
        .await;

    assert_eq!(outcome.error_code(), Some(ErrorCode::Http(500)));
    assert_eq!(outcome.message(), Some("Internal Server Error"));
}
