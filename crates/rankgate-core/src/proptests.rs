//! Property-based tests for the registry state machine.
