//! CLI command implementations for fgqc.
//!
//! ## Reporting
//! - [`duplex_report`] - Build report sections from duplex sequencing metrics

#![allow(clippy::missing_errors_doc, clippy::must_use_candidate)]

pub mod command;
pub mod duplex_report;
