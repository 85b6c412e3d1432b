//! Declared resources managed by subnetctl.
//!
//! Each resource implements [`declarative::Resource`] and answers state
//! queries from the discovery pass that built the plan.

pub mod subnet;

pub use subnet::SubnetResource;
