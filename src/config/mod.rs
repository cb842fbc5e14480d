//! Configuration loading and management for the Holiday Entitlement Engine.
//!
//! This module provides functionality to load statutory holiday configuration
//! from YAML files: scheme metadata, holiday rules and weekly pay caps.
//!
//! # Example
//!
//! ```no_run
//! use holiday_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/statutory").unwrap();
//! println!("Loaded scheme: {}", config.scheme().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{HolidayRules, SchemeMetadata, StatutoryConfig, WeeklyPayCap};
