//! Gateway implementations: the HTTP client for the real API and an
//! in-process backend for tests and demos.

pub mod http;
pub mod in_memory;
