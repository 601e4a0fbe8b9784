#![forbid(unsafe_code)]

//! Core domain model and business logic for the Eunoia companion.
//!
//! This crate provides:
//! - Domain types (cycle configuration, log entries, profile, education topics)
//! - The pure cycle-date engine
//! - Key-value persistence and the daily logbook
//! - Built-in content catalog and bilingual strings
//! - Chat backend client

pub mod types;
pub mod error;
pub mod cycle;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod store;
pub mod logbook;
pub mod profile;
pub mod i18n;
pub mod chat;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{build_default_catalog, get_default_catalog};
pub use chat::ChatClient;
pub use config::Config;
pub use cycle::{facts_for, CycleFacts};
pub use i18n::Language;
pub use store::Store;
