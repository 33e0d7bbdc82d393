//! Unit tests for the adapter bounded context.
