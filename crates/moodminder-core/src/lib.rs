//! moodminder-core
//!
//! Pure domain types and history key conventions. No scoring logic and no
//! I/O: this is the shared vocabulary between the assessment engine, the
//! history store and the front ends.

pub mod error;
pub mod keys;
pub mod models;
