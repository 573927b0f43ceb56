pub mod init;
pub mod logger;
