//! Configuration loading and management for the Payroll Engine.
//!
//! This module provides functionality to load payroll configurations from YAML files,
//! including the shift policy, the overtime and allowance rules, and the
//! statutory contribution and tax tables.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/motorph").unwrap();
//! println!("Loaded configuration: {}", config.metadata().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{ContributionsFile, PayPolicy, PayrollConfig, PayrollFile, PayrollMetadata};
