use init_settings::InitSettings;
use provisioning::service::ProvisioningService;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info, warn};

const PACKAGE_NAME: &str = env!("CARGO_PKG_NAME");

/// What a single startup-status check said about the instance.
enum InstanceState {
    NeedsSetup,
    AlreadyInitialized,
    Unknown,
}

/// Result of one full initialization run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    Initialized,
    AlreadyInitialized,
    InitializationFailed,
    AttemptsExhausted,
}

impl InitOutcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            InitOutcome::Initialized | InitOutcome::AlreadyInitialized => 0,
            InitOutcome::InitializationFailed | InitOutcome::AttemptsExhausted => 1,
        }
    }
}

/// # Runs the initialization loop
///
/// Polls the startup-status endpoint until the instance reports a state,
/// then initializes it if the setup assistant is still pending. The
/// initialize request is sent at most once per run. Checks that fail are
/// retried after the configured delay, no delay follows the final attempt.
pub async fn run_initialization(settings: InitSettings) -> InitOutcome {
    let fn_name = "run_initialization";
    let service = ProvisioningService::new(settings.clone());
    let max_attempts = settings.retry.max_attempts;
    info!(
        func = fn_name,
        package = PACKAGE_NAME,
        "starting initialization process for {}",
        settings.instance.url
    );

    for attempt in 1..=max_attempts {
        info!(
            func = fn_name,
            package = PACKAGE_NAME,
            "checking instance status (attempt {}/{})",
            attempt,
            max_attempts
        );

        let state = match service.check_startup_status().await {
            Ok(status) => {
                if status.setup_assistant_necessary {
                    InstanceState::NeedsSetup
                } else {
                    InstanceState::AlreadyInitialized
                }
            }
            Err(e) => {
                warn!(
                    func = fn_name,
                    package = PACKAGE_NAME,
                    "unable to get instance status, will retry - {}",
                    e
                );
                InstanceState::Unknown
            }
        };

        match state {
            InstanceState::NeedsSetup => {
                info!(
                    func = fn_name,
                    package = PACKAGE_NAME,
                    "instance requires initialization, proceeding"
                );
                match service.initialize().await {
                    Ok(_) => {
                        info!(
                            func = fn_name,
                            package = PACKAGE_NAME,
                            "instance initialization successful"
                        );
                        return InitOutcome::Initialized;
                    }
                    Err(e) => {
                        error!(
                            func = fn_name,
                            package = PACKAGE_NAME,
                            "instance initialization failed - {}",
                            e
                        );
                        return InitOutcome::InitializationFailed;
                    }
                }
            }
            InstanceState::AlreadyInitialized => {
                info!(
                    func = fn_name,
                    package = PACKAGE_NAME,
                    "instance is already initialized or in an unexpected state"
                );
                return InitOutcome::AlreadyInitialized;
            }
            InstanceState::Unknown => {
                if attempt < max_attempts {
                    sleep(Duration::from_secs(settings.retry.attempt_delay_secs)).await;
                }
            }
        }
    }

    error!(
        func = fn_name,
        package = PACKAGE_NAME,
        "maximum attempts ({}) reached without successful initialization",
        max_attempts
    );
    InitOutcome::AttemptsExhausted
}
