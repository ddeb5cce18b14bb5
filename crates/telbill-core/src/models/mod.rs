//! Data models for structured bills and pipeline configuration.

pub mod bill;
pub mod config;
