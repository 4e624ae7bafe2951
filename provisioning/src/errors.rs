use std::fmt;
use tracing::error;

#[derive(Debug, Default, Clone, Copy)]
pub enum ProvisioningErrorCodes {
    #[default]
    UnknownError,
    StatusCheckRequestError,
    StatusCheckServerError,
    StatusCheckNotFoundError,
    StatusCheckBadRequestError,
    StatusCheckResponseParseError,
    InitializeRequestError,
    InitializeServerError,
    InitializeNotFoundError,
    InitializeBadRequestError,
}

impl fmt::Display for ProvisioningErrorCodes {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ProvisioningErrorCodes::UnknownError => {
                write!(f, "ProvisioningErrorCodes: UnknownError")
            }
            ProvisioningErrorCodes::StatusCheckRequestError => {
                write!(f, "ProvisioningErrorCodes: StatusCheckRequestError")
            }
            ProvisioningErrorCodes::StatusCheckServerError => {
                write!(f, "ProvisioningErrorCodes: StatusCheckServerError")
            }
            ProvisioningErrorCodes::StatusCheckNotFoundError => {
                write!(f, "ProvisioningErrorCodes: StatusCheckNotFoundError")
            }
            ProvisioningErrorCodes::StatusCheckBadRequestError => {
                write!(f, "ProvisioningErrorCodes: StatusCheckBadRequestError")
            }
            ProvisioningErrorCodes::StatusCheckResponseParseError => {
                write!(f, "ProvisioningErrorCodes: StatusCheckResponseParseError")
            }
            ProvisioningErrorCodes::InitializeRequestError => {
                write!(f, "ProvisioningErrorCodes: InitializeRequestError")
            }
            ProvisioningErrorCodes::InitializeServerError => {
                write!(f, "ProvisioningErrorCodes: InitializeServerError")
            }
            ProvisioningErrorCodes::InitializeNotFoundError => {
                write!(f, "ProvisioningErrorCodes: InitializeNotFoundError")
            }
            ProvisioningErrorCodes::InitializeBadRequestError => {
                write!(f, "ProvisioningErrorCodes: InitializeBadRequestError")
            }
        }
    }
}

#[derive(Debug)]
pub struct ProvisioningError {
    pub code: ProvisioningErrorCodes,
    pub message: String,
}

impl std::fmt::Display for ProvisioningError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ProvisioningErrorCodes:(code: {:?}, message: {})",
            self.code, self.message
        )
    }
}

impl ProvisioningError {
    pub fn new(code: ProvisioningErrorCodes, message: String) -> Self {
        error!(
            target = "provisioning",
            "error: (code: {:?}, message: {})", code, message
        );
        Self { code, message }
    }
}
