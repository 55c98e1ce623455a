use http::StatusCode;
use log::warn;
use reqwest::Method;
use serde_json::Value;

use crate::models::device::{
    BulkImportRequest, BulkImportResponse, DeleteDevicesRequest, DeleteDevicesResponse, DeviceId,
    DeviceImport, SnmpVersion,
};
use crate::models::envelope::QueryEnvelope;
use crate::models::outcome::Outcome;
use crate::{PrimeClient, PrimeError, PrimeResult};

const DEVICES_PATH: &str = "data/Devices";
const BULK_IMPORT_PATH: &str = "op/devices/bulkImport";
const DELETE_DEVICES_PATH: &str = "op/devices/deleteDevices";

const DEFAULT_SNMP_RETRIES: u32 = 2;
const DEFAULT_SNMP_TIMEOUT_SECS: u32 = 10;

/// Converts the result of an operation into an [`Outcome`], logging failures.
fn finish<T>(operation: &str, result: PrimeResult<T>) -> Outcome<T> {
    if let Err(err) = &result {
        warn!("{operation} failed: {err}");
    }
    result.into()
}

/// Provides the device inventory operations of Prime Infrastructure.
///
/// Every operation is a builder; call `send()` to execute it. `send()` always
/// resolves to an [`Outcome`] and never returns an error.
#[derive(Debug)]
pub struct DeviceHandler {
    client: PrimeClient,
}

impl DeviceHandler {
    /// Creates a new device API instance.
    ///
    /// This method is intended for internal use by the Prime client.
    pub(crate) fn new(client: PrimeClient) -> Self {
        Self { client }
    }

    /// Lists the identifiers of all devices in the inventory.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use prime_client::PrimeClient;
    /// #
    /// # async fn example(client: &PrimeClient) {
    /// let outcome = client.devices().list().send().await;
    /// for id in outcome.data().into_iter().flatten() {
    ///     println!("device {id}");
    /// }
    /// # }
    /// ```
    pub fn list(&self) -> ListDevicesBuilder {
        ListDevicesBuilder::new(self.client.clone())
    }

    /// Fetches the full record of the device managed at `ip_address`.
    ///
    /// The address is looked up first and the matching record fetched by its
    /// identifier. An address with no match fails with code 404; one with
    /// several matches fails with [`ErrorCode::Ambiguous`](crate::ErrorCode::Ambiguous).
    pub fn get(&self, ip_address: impl Into<String>) -> GetDeviceBuilder {
        GetDeviceBuilder::new(self.client.clone(), ip_address.into())
    }

    /// Adds a device through a bulk-import job.
    ///
    /// Bulk import is the only way the server accepts new devices. The
    /// returned data is the job name; completion of the job is not awaited.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use prime_client::PrimeClient;
    /// #
    /// # async fn example(client: &PrimeClient) {
    /// let outcome = client
    ///     .devices()
    ///     .add("10.0.0.5", "255.255.255.0")
    ///     .snmp_community("public")
    ///     .send()
    ///     .await;
    ///
    /// if let Some(job) = outcome.data() {
    ///     println!("import job {job} started");
    /// }
    /// # }
    /// ```
    pub fn add(
        &self,
        ip_address: impl Into<String>,
        network_mask: impl Into<String>,
    ) -> AddDeviceBuilder {
        AddDeviceBuilder::new(self.client.clone(), ip_address.into(), network_mask.into())
    }

    /// Removes the device managed at `ip_address` from the inventory.
    pub fn delete(&self, ip_address: impl Into<String>) -> DeleteDeviceBuilder {
        DeleteDeviceBuilder::new(self.client.clone(), ip_address.into())
    }
}

#[derive(Debug, Clone)]
pub struct ListDevicesBuilder {
    client: PrimeClient,
}

impl ListDevicesBuilder {
    pub(crate) fn new(client: PrimeClient) -> Self {
        Self { client }
    }

    pub async fn send(self) -> Outcome<Vec<DeviceId>> {
        finish("list devices", self.execute().await)
    }

    async fn execute(&self) -> PrimeResult<Vec<DeviceId>> {
        let url = self.client.endpoint(DEVICES_PATH)?;
        let response = self.client.send(Method::GET, url, None::<&()>).await?;

        if response.status() != StatusCode::OK {
            return Err(response.into_remote_error());
        }

        let query = response.json::<QueryEnvelope>()?.query_response;
        let count = query.count;
        let device_ids = query.into_device_ids();
        if count > 0 && device_ids.is_empty() {
            return Err(response.unexpected(format!(
                "@count is {count} but no entityId was returned"
            )));
        }

        Ok(device_ids)
    }
}

#[derive(Debug, Clone)]
pub struct GetDeviceBuilder {
    client: PrimeClient,
    ip_address: String,
}

impl GetDeviceBuilder {
    pub(crate) fn new(client: PrimeClient, ip_address: String) -> Self {
        Self { client, ip_address }
    }

    pub async fn send(self) -> Outcome<Value> {
        finish("get device", self.execute().await)
    }

    async fn execute(&self) -> PrimeResult<Value> {
        let device_id = self.lookup().await?;

        let url = self
            .client
            .endpoint(&format!("{DEVICES_PATH}/{device_id}"))?;
        let response = self.client.send(Method::GET, url, None::<&()>).await?;

        match response.status() {
            StatusCode::OK => response.json(),
            StatusCode::NOT_FOUND => Err(PrimeError::NotFound(format!("{device_id} not found"))),
            _ => Err(response.into_remote_error()),
        }
    }

    /// Resolves the address to exactly one device identifier.
    async fn lookup(&self) -> PrimeResult<DeviceId> {
        // The filter value is passed through verbatim, except that a `#` would
        // turn the rest of it into a URL fragment.
        if self.ip_address.contains('#') {
            return Err(PrimeError::ValidationError(format!(
                "IP address must not contain '#': {}",
                self.ip_address
            )));
        }

        let url = self
            .client
            .endpoint(&format!("{DEVICES_PATH}?ipAddress=\"{}\"", self.ip_address))?;
        let response = self.client.send(Method::GET, url, None::<&()>).await?;

        if response.status() != StatusCode::OK {
            return Err(response.into_remote_error());
        }

        let query = response.json::<QueryEnvelope>()?.query_response;
        match query.count {
            0 => Err(PrimeError::NotFound(format!("{} not found", self.ip_address))),
            1 => match query.into_device_ids().into_iter().next() {
                Some(device_id) => Ok(device_id),
                None => Err(response.unexpected("@count is 1 but no entityId was returned")),
            },
            count => Err(PrimeError::AmbiguousMatch {
                ip_address: self.ip_address.clone(),
                count,
            }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AddDeviceBuilder {
    client: PrimeClient,
    ip_address: String,
    network_mask: String,
    snmp_community: String,
    snmp_retries: u32,
    snmp_timeout_secs: u32,
    snmp_version: SnmpVersion,
}

impl AddDeviceBuilder {
    pub(crate) fn new(client: PrimeClient, ip_address: String, network_mask: String) -> Self {
        Self {
            client,
            ip_address,
            network_mask,
            snmp_community: String::new(),
            snmp_retries: DEFAULT_SNMP_RETRIES,
            snmp_timeout_secs: DEFAULT_SNMP_TIMEOUT_SECS,
            snmp_version: SnmpVersion::default(),
        }
    }

    /// Read community string. Required for SNMP v2c.
    pub fn snmp_community(mut self, community: impl Into<String>) -> Self {
        self.snmp_community = community.into();
        self
    }

    pub fn snmp_retries(mut self, retries: u32) -> Self {
        self.snmp_retries = retries;
        self
    }

    pub fn snmp_timeout_secs(mut self, timeout_secs: u32) -> Self {
        self.snmp_timeout_secs = timeout_secs;
        self
    }

    /// SNMP version, `2c` by default. Credentials are only sent for `2c`.
    pub fn snmp_version(mut self, version: SnmpVersion) -> Self {
        self.snmp_version = version;
        self
    }

    /// Builds the bulk-import body, rejecting a v2c import without community.
    pub fn payload(&self) -> PrimeResult<BulkImportRequest> {
        let device = DeviceImport::new(&self.ip_address, &self.network_mask);

        let device = match self.snmp_version {
            SnmpVersion::V2c if self.snmp_community.is_empty() => {
                return Err(PrimeError::ValidationError(
                    "SNMP community is required for SNMP version 2c".into(),
                ));
            }
            SnmpVersion::V2c => device.with_snmp(
                &self.snmp_community,
                self.snmp_retries,
                self.snmp_timeout_secs,
                self.snmp_version,
            ),
            SnmpVersion::V1 | SnmpVersion::V3 => device,
        };

        Ok(BulkImportRequest::single(device))
    }

    pub async fn send(self) -> Outcome<String> {
        finish("add device", self.execute().await)
    }

    async fn execute(&self) -> PrimeResult<String> {
        let payload = self.payload()?;

        let url = self.client.endpoint(BULK_IMPORT_PATH)?;
        let response = self.client.send(Method::PUT, url, Some(&payload)).await?;

        if response.status() != StatusCode::OK {
            return Err(response.into_remote_error());
        }

        Ok(response.json::<BulkImportResponse>()?.into_job_name())
    }
}

#[derive(Debug, Clone)]
pub struct DeleteDeviceBuilder {
    client: PrimeClient,
    ip_address: String,
}

impl DeleteDeviceBuilder {
    pub(crate) fn new(client: PrimeClient, ip_address: String) -> Self {
        Self { client, ip_address }
    }

    /// On success the data is the deleted address.
    pub async fn send(self) -> Outcome<String> {
        let message = format!("{} successfully deleted", self.ip_address);
        finish("delete device", self.execute().await).with_message(message)
    }

    async fn execute(&self) -> PrimeResult<String> {
        let payload = DeleteDevicesRequest::new(&self.ip_address);

        let url = self.client.endpoint(DELETE_DEVICES_PATH)?;
        let response = self.client.send(Method::PUT, url, Some(&payload)).await?;

        if response.status() != StatusCode::OK {
            return Err(response.into_remote_error());
        }

        // The server reports a missing device as a plain "Failure".
        let status = response.json::<DeleteDevicesResponse>()?.status().map(str::to_string);
        match status.as_deref() {
            Some("Success") => Ok(self.ip_address.clone()),
            Some("Failure") => Err(PrimeError::NotFound(format!("{} not found", self.ip_address))),
            _ => Err(response.into_remote_error()),
        }
    }
}
