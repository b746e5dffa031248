//! donorgate-core
//!
//! Pure domain types for donor screening and health declarations: closed
//! answer domains, the declaration form, appointments, drafts, storage key
//! conventions and engine configuration. No I/O beyond the config file.

#[macro_use]
pub mod domain;

pub mod config;
pub mod error;
pub mod keys;
pub mod models;
