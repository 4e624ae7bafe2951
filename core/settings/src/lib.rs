use serde::{Deserialize, Serialize};
use url::Url;

/// Institution name recorded on the admin account unless overridden.
pub const DEFAULT_INSTITUTION_NAME: &str = "Jamf";

/// Number of startup-status checks performed before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

/// Delay between consecutive startup-status checks, in seconds.
pub const DEFAULT_ATTEMPT_DELAY_SECS: u64 = 30;

/// Log level applied when none is requested on the command line.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Init Settings - Struct holding the full configuration for one
/// initialization run, assembled from the command line at startup
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct InitSettings {
    pub instance: InstanceSettings,
    pub admin: AdminSettings,
    pub retry: RetrySettings,
    pub logging: LoggingSettings,
}

impl Default for InitSettings {
    fn default() -> Self {
        Self {
            instance: InstanceSettings::default(),
            admin: AdminSettings::default(),
            retry: RetrySettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

/// InstanceSettings - Settings parameter for the target instance and its
/// license activation code
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct InstanceSettings {
    pub url: String,
    pub activation_code: String,
}

impl InstanceSettings {
    /// Builds instance settings from raw command-line values, trimming
    /// trailing slashes so endpoint paths can be appended verbatim.
    pub fn new(url: &str, activation_code: &str) -> Self {
        Self {
            url: url.trim_end_matches('/').to_string(),
            activation_code: activation_code.to_string(),
        }
    }
}

impl Default for InstanceSettings {
    fn default() -> Self {
        Self {
            url: String::from(""),
            activation_code: String::from(""),
        }
    }
}

/// AdminSettings - Settings parameter for the admin account created during
/// initialization
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct AdminSettings {
    pub username: String,
    pub password: String,
    pub email: Option<String>,
    pub institution_name: String,
}

impl Default for AdminSettings {
    fn default() -> Self {
        Self {
            username: String::from(""),
            password: String::from(""),
            email: None,
            institution_name: String::from(DEFAULT_INSTITUTION_NAME),
        }
    }
}

/// RetrySettings - Settings parameter for how often and how long to poll
/// for instance readiness
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct RetrySettings {
    pub max_attempts: u32,
    pub attempt_delay_secs: u64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            attempt_delay_secs: DEFAULT_ATTEMPT_DELAY_SECS,
        }
    }
}

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct LoggingSettings {
    pub level: String,
    pub path: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: String::from(DEFAULT_LOG_LEVEL),
            path: String::from(""),
        }
    }
}

/// # Validates an instance URL
///
/// Checks that the value carries both a scheme and a host, rejecting
/// malformed URLs before any request is made. Shaped to plug into a
/// clap value parser.
pub fn validate_instance_url(value: &str) -> Result<String, String> {
    match Url::parse(value) {
        Ok(parsed) if parsed.has_host() => Ok(value.to_string()),
        Ok(_) | Err(_) => Err(format!(
            "invalid URL format: {}. URL must include a scheme (e.g. https://) and a host",
            value
        )),
    }
}
