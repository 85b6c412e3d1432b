//! Execution engine for subnetctl
//!
//! The engine orchestrates:
//! 1. Planning - Discover subnets and bind them to the manifest
//! 2. Diffing - Compute current vs desired state
//! 3. Executing - Apply changes in declaration order

pub mod differ;
pub mod executor;
pub mod planner;

pub use executor::{RunOptions, execute};
pub use planner::build_plan;
