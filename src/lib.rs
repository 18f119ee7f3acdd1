// Library target for integration tests and criterion benchmarks.
// The binary entry point is main.rs; this file re-declares the module tree so
// that tests can import types via `tango::session::*` / `tango::words::*`.
// Terminal-facing code is only exercised through the binary, so suppress dead_code warnings.
#![allow(dead_code)]

// Public: used directly by tests and benchmarks
pub mod config;
pub mod engine;
pub mod logging;
pub mod notify;
pub mod session;
pub mod words;

// Private: the terminal front end
mod app;
mod event;
mod ui;
