use clap::Parser;
use crypto::random::generate_admin_password;
use init_settings::{
    validate_instance_url, AdminSettings, InitSettings, InstanceSettings, LoggingSettings,
    RetrySettings, DEFAULT_ATTEMPT_DELAY_SECS, DEFAULT_INSTITUTION_NAME, DEFAULT_LOG_LEVEL,
    DEFAULT_MAX_ATTEMPTS,
};

/// jamf-init - Initializes a newly deployed Jamf Pro instance
#[derive(Parser, Debug)]
#[command(name = "jamf-init")]
#[command(version)]
#[command(
    about = "Waits for a Jamf Pro instance to come up and initializes it over the admin API",
    long_about = None
)]
pub struct Args {
    /// Base URL of the instance (e.g. https://myinstance.jamfcloud.com)
    #[arg(short = 'u', long = "url", value_parser = validate_instance_url)]
    pub url: String,

    /// Username for the admin account created during initialization
    #[arg(short = 'a', long = "username")]
    pub username: String,

    /// Password for the admin account, generated when not provided
    #[arg(
        short = 'p',
        long = "password",
        env = "JAMF_ADMIN_PASSWORD",
        hide_env_values = true
    )]
    pub password: Option<String>,

    /// Activation code for the license
    #[arg(
        short = 'c',
        long = "activationcode",
        env = "JAMF_ACTIVATION_CODE",
        hide_env_values = true
    )]
    pub activation_code: String,

    /// Institution name recorded on the admin account
    #[arg(short = 'i', long = "institution-name", default_value = DEFAULT_INSTITUTION_NAME)]
    pub institution_name: String,

    /// Email address for the admin account
    #[arg(short = 'e', long = "email")]
    pub email: Option<String>,

    /// Number of startup-status checks before giving up
    #[arg(long = "max-attempts", value_name = "COUNT", default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: u32,

    /// Delay between startup-status checks in seconds
    #[arg(
        long = "attempt-delay",
        value_name = "SECONDS",
        default_value_t = DEFAULT_ATTEMPT_DELAY_SECS
    )]
    pub attempt_delay: u64,

    /// Log level for console and file output
    #[arg(
        long = "log-level",
        value_name = "LEVEL",
        default_value = DEFAULT_LOG_LEVEL,
        value_parser = ["trace", "debug", "info", "warn", "error"]
    )]
    pub log_level: String,

    /// Append logs to this file in addition to the console
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<String>,
}

impl Args {
    /// Resolves the parsed arguments into run settings. An empty or missing
    /// password is replaced with a generated one, which is also returned so
    /// the caller can announce it.
    pub fn to_settings(&self) -> (InitSettings, Option<String>) {
        let (password, generated) = match &self.password {
            Some(password) if !password.is_empty() => (password.clone(), None),
            _ => {
                let password = generate_admin_password();
                (password.clone(), Some(password))
            }
        };

        let settings = InitSettings {
            instance: InstanceSettings::new(&self.url, &self.activation_code),
            admin: AdminSettings {
                username: self.username.clone(),
                password,
                email: self.email.clone(),
                institution_name: self.institution_name.clone(),
            },
            retry: RetrySettings {
                max_attempts: self.max_attempts,
                attempt_delay_secs: self.attempt_delay,
            },
            logging: LoggingSettings {
                level: self.log_level.clone(),
                path: self.log_file.clone().unwrap_or_default(),
            },
        };
        (settings, generated)
    }
}
