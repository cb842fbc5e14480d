//! Holiday Entitlement Engine for insolvency claims
//!
//! This crate calculates the holiday pay owed to an employee of an insolvent
//! employer: holiday pay accrued (HPA) in the current holiday year, and
//! holiday taken not paid (HTNP) as reported by the RP1 and RP14a input
//! sources, reconciled so that only one source is paid.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
