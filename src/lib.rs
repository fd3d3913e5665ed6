//! Kubernetes component version compatibility checker
//!
//! Answers "which component versions go with Kubernetes X" from a
//! hand-maintained compatibility table, and checks installed versions
//! against the Kubernetes version skew policy.

pub mod cli;
pub mod commands;
pub mod compatibility;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod version;
