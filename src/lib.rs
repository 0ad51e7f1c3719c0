//! Dccfs - filesystem entities for DCC tooling
//!
//! This library crate exposes the configuration layer for integration testing.

pub mod config;
