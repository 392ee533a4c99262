//! Test support for the engine's integration tests.
//!
//! Logging setup shared by every test binary, and builders for the ISS table
//! lines the remote-table tests feed in.

pub mod iss_lines;
pub mod logging;
