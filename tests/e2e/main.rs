//! End-to-end tests driving the built binaries

mod cli_basic;
