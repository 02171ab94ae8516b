//! Solace Core Library
//!
//! Core domain logic for the Solace CBT journaling system.

pub mod client;
pub mod config;
pub mod db;
pub mod dump;
pub mod error;
pub mod export;
pub mod id;
pub mod logging;
pub mod record;
pub mod search;
pub mod similarity;
pub mod store;
pub mod tag;
