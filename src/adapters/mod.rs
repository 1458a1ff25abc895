//! Adapters binding the port traits to concrete backends.

pub mod cloud_table;
pub mod hardware;
