//! Local eligibility audits and device settings synchronization.
//!
//! The [`audit`] module scores applicants for subsidy eligibility entirely in-process, while
//! [`settings`] keeps the device preferences in a key-value store and notifies listeners when
//! they change.

pub mod audit;
pub mod config;
pub mod error;
pub mod settings;
pub mod telemetry;
