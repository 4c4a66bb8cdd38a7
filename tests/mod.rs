//! Test module organization.
//!
//! This module organizes all integration tests for the MACC simulator.


/// Packed word, offset and error type tests.
mod common_tests;


/// Run controller state machine tests.
mod controller_tests;


/// Madd4 pipeline arithmetic and timing tests.
mod madd4_tests;
