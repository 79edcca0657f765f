pub mod config;
pub mod feature;
pub mod init;
pub mod jira;
pub mod localize;
