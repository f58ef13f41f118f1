//! Common test utilities and helpers
//!
//! Recording doubles for the SCM and credential seams, plus fixtures for
//! release contexts and configuration files.

#![allow(dead_code)]

pub mod mock_services;
pub mod test_fixtures;
