//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises a full producer →
//! mailbox → dispatcher → adapter path against mock (or in-memory)
//! adapters.  All tests run on the host with no real hardware required.

#![cfg(not(target_os = "espidf"))]

mod cloud_flow_tests;
mod mock_adapters;
mod routing_tests;
