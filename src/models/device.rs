use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::models::envelope::one_or_many;

/// Opaque identifier the inventory assigns to a device.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DeviceId(String);

impl DeviceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DeviceId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for DeviceId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

// Older API versions send the identifier as a number.
impl<'de> Deserialize<'de> for DeviceId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(u64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(text) => DeviceId(text),
            Raw::Number(n) => DeviceId(n.to_string()),
        })
    }
}

/// SNMP protocol version used by the server to reach an imported device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnmpVersion {
    #[serde(rename = "1")]
    V1,
    #[default]
    #[serde(rename = "2c")]
    V2c,
    #[serde(rename = "3")]
    V3,
}

impl SnmpVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            SnmpVersion::V1 => "1",
            SnmpVersion::V2c => "2c",
            SnmpVersion::V3 => "3",
        }
    }
}

impl fmt::Display for SnmpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request body for `op/devices/bulkImport`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkImportRequest {
    pub devices_import: DevicesImport,
}

impl BulkImportRequest {
    /// Wraps a single device descriptor in the bulk-import envelope.
    pub fn single(device: DeviceImport) -> Self {
        Self {
            devices_import: DevicesImport {
                devices: ImportDevices { device },
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DevicesImport {
    pub devices: ImportDevices,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportDevices {
    pub device: DeviceImport,
}

/// Descriptor of one device to import.
///
/// The SNMP fields are serialized only when set; the server falls back to its
/// own credential profile otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceImport {
    /// Management address of the device.
    pub ip_address: String,
    /// Subnet mask, e.g. `255.255.255.0`.
    pub network_mask: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snmp_community: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snmp_retries: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snmp_timeout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snmp_version: Option<SnmpVersion>,
}

impl DeviceImport {
    pub fn new(ip_address: impl Into<String>, network_mask: impl Into<String>) -> Self {
        Self {
            ip_address: ip_address.into(),
            network_mask: network_mask.into(),
            snmp_community: None,
            snmp_retries: None,
            snmp_timeout: None,
            snmp_version: None,
        }
    }

    /// Adds SNMP credentials to the descriptor.
    pub fn with_snmp(
        mut self,
        community: impl Into<String>,
        retries: u32,
        timeout_secs: u32,
        version: SnmpVersion,
    ) -> Self {
        self.snmp_community = Some(community.into());
        self.snmp_retries = Some(retries.to_string());
        self.snmp_timeout = Some(timeout_secs.to_string());
        self.snmp_version = Some(version);
        self
    }
}

/// Response of `op/devices/bulkImport`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkImportResponse {
    pub mgmt_response: BulkImportMgmtResponse,
}

impl BulkImportResponse {
    /// Name of the asynchronous import job created by the server.
    pub fn job_name(&self) -> &str {
        &self.mgmt_response.bulk_import_result.job_name
    }

    pub fn into_job_name(self) -> String {
        self.mgmt_response.bulk_import_result.job_name
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkImportMgmtResponse {
    pub bulk_import_result: BulkImportResult,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkImportResult {
    pub job_name: String,
}

/// Request body for `op/devices/deleteDevices`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteDevicesRequest {
    pub device_delete_candidates: DeleteCandidates,
}

impl DeleteDevicesRequest {
    pub fn new(ip_address: impl Into<String>) -> Self {
        Self {
            device_delete_candidates: DeleteCandidates {
                ip_addresses: IpAddresses {
                    ip_address: ip_address.into(),
                },
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteCandidates {
    pub ip_addresses: IpAddresses,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IpAddresses {
    pub ip_address: String,
}

/// Response of `op/devices/deleteDevices`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteDevicesResponse {
    pub mgmt_response: DeleteMgmtResponse,
}

impl DeleteDevicesResponse {
    /// Status string of the first delete candidate, `"Success"` or `"Failure"`.
    pub fn status(&self) -> Option<&str> {
        self.mgmt_response
            .delete_device_result
            .delete_statuses
            .delete_status
            .first()
            .map(|status| status.status.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteMgmtResponse {
    pub delete_device_result: DeleteDeviceResult,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteDeviceResult {
    pub delete_statuses: DeleteStatuses,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteStatuses {
    #[serde(deserialize_with = "one_or_many")]
    pub delete_status: Vec<DeleteStatus>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteStatus {
    pub status: String,
    #[serde(default)]
    pub ip_address: Option<String>,
}
