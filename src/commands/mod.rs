//! CLI commands for solace

pub mod analyze;
pub mod delete;
pub mod dispatch;
pub mod dump;
pub mod edit;
pub mod export;
pub mod favorite;
pub mod helpers;
pub mod import;
pub mod init;
pub mod list;
pub mod search;
pub mod show;
pub mod similar;
pub mod status;
pub mod tag;
pub mod transcribe;
