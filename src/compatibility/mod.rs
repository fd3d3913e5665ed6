//! Compatibility lookup layer
//!
//! Answers which component versions go with a Kubernetes release.
//!
//! # Modules
//!
//! - [`matrix`]: The read-only compatibility table and lookups
//! - [`data`]: Built-in table for supported releases
//! - [`check`]: Evaluation of installed versions against a release
//! - [`upgrade`]: Upgrade path planning
//! - [`history`]: Component versions across releases

pub mod check;
pub mod data;
pub mod history;
pub mod matrix;
pub mod upgrade;

pub use matrix::{ComponentInfo, Matrix, Release, ReleaseOverrides};
