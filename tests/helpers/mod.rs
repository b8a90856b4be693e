//! Test helpers module
//!
//! This module provides utilities and helpers for testing the Ticketdesk client.
//! It includes a mock ticketing API, test data and test context setup.

#![allow(dead_code)]

pub mod api_mock;
pub mod test_context;
pub mod test_data;

pub use api_mock::*;
pub use test_context::*;
pub use test_data::*;
