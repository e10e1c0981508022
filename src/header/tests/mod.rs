//! Header block tests
//!
//! Parsing, rendering and change-log wording for every header kind.

pub mod parameter_resolution;
