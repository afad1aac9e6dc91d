//! Integration tests for the fgqc binary.
//!
//! These tests run the `fgqc` executable over metrics files written to temporary
//! directories and check the files it produces.

mod helpers;
mod test_duplex_report_command;
mod test_error_paths;
