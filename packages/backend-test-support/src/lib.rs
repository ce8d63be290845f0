//! Backend test support utilities
//!
//! Shared logging bootstrap and Problem Details assertions for the
//! backend's integration suites.

pub mod logging;
pub mod problem_details;
