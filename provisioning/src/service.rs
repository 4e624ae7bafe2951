use std::time::Duration;

use anyhow::{bail, Result};
use init_settings::InitSettings;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{info, trace};

use crate::errors::{ProvisioningError, ProvisioningErrorCodes};

const PACKAGE_NAME: &str = env!("CARGO_PKG_NAME");

/// Timeout applied to each request sent to the instance.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Endpoint reporting the instance boot state.
pub const STARTUP_STATUS_PATH: &str = "/api/startup-status";

/// Endpoint that creates the admin account and activates the license.
pub const INITIALIZE_PATH: &str = "/api/v1/system/initialize";

/// Startup status document served by the instance while it boots. Only the
/// setup assistant flag drives any decision, the remaining fields are kept
/// for logging.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct StartupStatus {
    #[serde(default)]
    pub setup_assistant_necessary: bool,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

/// Request body for the system initialize endpoint.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct InitializeRequest {
    pub activation_code: String,
    pub institution_name: String,
    pub eula_accepted: bool,
    pub username: String,
    pub password: String,
    pub email: Option<String>,
    pub jss_url: String,
}

impl InitializeRequest {
    pub fn from_settings(settings: &InitSettings) -> Self {
        Self {
            activation_code: settings.instance.activation_code.clone(),
            institution_name: settings.admin.institution_name.clone(),
            eula_accepted: true,
            username: settings.admin.username.clone(),
            password: settings.admin.password.clone(),
            email: settings.admin.email.clone(),
            jss_url: settings.instance.url.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProvisioningService {
    settings: InitSettings,
}

impl ProvisioningService {
    pub fn new(settings: InitSettings) -> Self {
        Self { settings }
    }

    /// # Checks the instance startup status
    ///
    /// Fetches the startup-status document and returns it parsed. Any
    /// transport failure, non-success status or unparsable body is an error,
    /// the caller decides whether to retry.
    pub async fn check_startup_status(&self) -> Result<StartupStatus> {
        let fn_name = "check_startup_status";
        let url = format!("{}{}", &self.settings.instance.url, STARTUP_STATUS_PATH);
        trace!(
            func = fn_name,
            package = PACKAGE_NAME,
            "startup status url formatted {}",
            url
        );

        let client = reqwest::Client::new();
        let response = match client
            .get(&url)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
        {
            Ok(v) => v,
            Err(e) => bail!(ProvisioningError::new(
                ProvisioningErrorCodes::StatusCheckRequestError,
                format!("startup status request failed - {}", e),
            )),
        };

        let status = response.status();
        if !status.is_success() {
            match status {
                reqwest::StatusCode::INTERNAL_SERVER_ERROR => bail!(ProvisioningError::new(
                    ProvisioningErrorCodes::StatusCheckServerError,
                    format!("startup status returned server error - {}", status),
                )),
                reqwest::StatusCode::BAD_REQUEST => bail!(ProvisioningError::new(
                    ProvisioningErrorCodes::StatusCheckBadRequestError,
                    format!("startup status returned bad request - {}", status),
                )),
                reqwest::StatusCode::NOT_FOUND => bail!(ProvisioningError::new(
                    ProvisioningErrorCodes::StatusCheckNotFoundError,
                    format!("startup status endpoint not found - {}", status),
                )),
                _ => bail!(ProvisioningError::new(
                    ProvisioningErrorCodes::UnknownError,
                    format!("startup status returned unexpected status - {}", status),
                )),
            }
        }

        let body = match response.text().await {
            Ok(b) => b,
            Err(e) => bail!(ProvisioningError::new(
                ProvisioningErrorCodes::StatusCheckResponseParseError,
                format!("error reading startup status body - {}", e),
            )),
        };

        let startup_status = match serde_json::from_str::<StartupStatus>(&unescape_quotes(&body)) {
            Ok(s) => s,
            Err(e) => bail!(ProvisioningError::new(
                ProvisioningErrorCodes::StatusCheckResponseParseError,
                format!("error parsing startup status response - {}", e),
            )),
        };

        info!(
            func = fn_name,
            package = PACKAGE_NAME,
            "startup status - {:?}",
            startup_status
        );
        Ok(startup_status)
    }

    /// # Initializes the instance
    ///
    /// Posts the initialization payload, creating the admin account and
    /// activating the license. Callers must send this at most once per run.
    pub async fn initialize(&self) -> Result<bool> {
        let fn_name = "initialize";
        let url = format!("{}{}", &self.settings.instance.url, INITIALIZE_PATH);
        trace!(
            func = fn_name,
            package = PACKAGE_NAME,
            "initialize url formatted {}",
            url
        );

        let request_body = InitializeRequest::from_settings(&self.settings);
        let client = reqwest::Client::new();
        let response = match client
            .post(&url)
            .json(&request_body)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
        {
            Ok(v) => v,
            Err(e) => bail!(ProvisioningError::new(
                ProvisioningErrorCodes::InitializeRequestError,
                format!("initialize request failed - {}", e),
            )),
        };

        let status = response.status();
        match status {
            s if s.is_success() => {
                info!(
                    func = fn_name,
                    package = PACKAGE_NAME,
                    "instance initialized, status - {}",
                    status
                );
                Ok(true)
            }
            reqwest::StatusCode::INTERNAL_SERVER_ERROR => bail!(ProvisioningError::new(
                ProvisioningErrorCodes::InitializeServerError,
                format!("initialize returned server error - {}", status),
            )),
            reqwest::StatusCode::BAD_REQUEST => bail!(ProvisioningError::new(
                ProvisioningErrorCodes::InitializeBadRequestError,
                format!("initialize returned bad request - {}", status),
            )),
            reqwest::StatusCode::NOT_FOUND => bail!(ProvisioningError::new(
                ProvisioningErrorCodes::InitializeNotFoundError,
                format!("initialize endpoint not found - {}", status),
            )),
            _ => bail!(ProvisioningError::new(
                ProvisioningErrorCodes::UnknownError,
                format!("initialize returned unexpected status - {}", status),
            )),
        }
    }
}

// Some builds serve the status document with HTML-escaped quotes.
fn unescape_quotes(body: &str) -> String {
    body.replace("&quot;", "\"")
}
