//! End-to-end tests for the `schematika` driver: CLI flags, batch-mode
//! file execution, and the REPL, run against the built binary.

mod cli_tests;
