//! Headless core of the ПДн process registry console: schema-free records,
//! reference lookups, list state, the process form and sub-record tabs.

pub mod domain;
pub mod shared;
pub mod system;
