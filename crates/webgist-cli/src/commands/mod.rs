pub mod init_config;
pub mod summarize;
