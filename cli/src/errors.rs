use std::fmt;

#[derive(Debug, Default, Clone, Copy)]
pub enum InitErrorCodes {
    #[default]
    UnknownError,
    InitLoggerError,
}

impl fmt::Display for InitErrorCodes {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            InitErrorCodes::UnknownError => write!(f, "UnknownError"),
            InitErrorCodes::InitLoggerError => write!(f, "InitLoggerError"),
        }
    }
}

#[derive(Debug)]
pub struct InitError {
    pub code: InitErrorCodes,
    pub message: String,
}

impl std::fmt::Display for InitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "InitErrorCodes:(code: {:?}, message: {})",
            self.code, self.message
        )
    }
}

impl InitError {
    pub fn new(code: InitErrorCodes, message: String) -> Self {
        Self { code, message }
    }
}
