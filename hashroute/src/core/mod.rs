//! Deterministic, pure logic shared by the navigation runtime.
//!
//! Core modules must be free of environment access and interior mutability.
//! They operate on in-memory values and return deterministic outputs
//! suitable for tests.

pub mod active;
pub mod fragment;
pub mod resolver;
pub mod table;
pub mod types;
