pub mod args;
pub mod errors;
pub mod init;
pub mod logging;
