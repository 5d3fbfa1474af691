use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use shared::{
    domain::Vehicle,
    error::{CheckSubmitError, ErrorResponse},
    protocol::CreateCheckRequest,
};
use tracing::debug;

use crate::{CheckPersistence, VehicleDirectory};

/// HTTP client for the vehicle directory service.
pub struct HttpVehicleDirectory {
    http: Client,
    base_url: String,
}

impl HttpVehicleDirectory {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl VehicleDirectory for HttpVehicleDirectory {
    async fn list_vehicles(&self) -> Result<Vec<Vehicle>> {
        let vehicles = self
            .http
            .get(format!("{}/vehicles", self.base_url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(vehicles)
    }
}

/// HTTP client for the check-persistence service. Owns the mapping from a
/// failed response body to [`CheckSubmitError`].
pub struct HttpCheckPersistence {
    http: Client,
    base_url: String,
}

impl HttpCheckPersistence {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl CheckPersistence for HttpCheckPersistence {
    async fn create_check(&self, request: CreateCheckRequest) -> Result<(), CheckSubmitError> {
        let response = self
            .http
            .post(format!("{}/checks", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|err| CheckSubmitError::Transport(err.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response
            .text()
            .await
            .map_err(|err| CheckSubmitError::Transport(err.to_string()))?;
        Err(classify_rejection(status, &body))
    }
}

/// A parseable body with field details is a validation failure; everything
/// else collapses into the generic transport case.
fn classify_rejection(status: StatusCode, body: &str) -> CheckSubmitError {
    if let Ok(response) = serde_json::from_str::<ErrorResponse>(body) {
        if response.validation_details().is_some() {
            return CheckSubmitError::from(response);
        }
    }
    debug!(status = %status, "check service failure carried no field details");
    CheckSubmitError::Transport(format!("check service responded with status {status}"))
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
