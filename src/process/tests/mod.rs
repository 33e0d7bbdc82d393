//! Unit tests for the process bounded context.
