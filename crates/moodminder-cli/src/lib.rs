//! moodminder-cli library root.
//!
//! Command implementations live here so integration tests can drive them
//! without spawning the binary.

pub mod commands;
