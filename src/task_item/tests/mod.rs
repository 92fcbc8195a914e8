//! Unit tests for the task item module.
