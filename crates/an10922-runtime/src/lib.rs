//! Batch runner for diversification requests.
//!
//! Requests are independent: each one derives and wraps a key against the
//! same read-only key handles. The runner spreads them over a fixed-size
//! worker pool and blocks until every outcome is in.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod batch;

pub use crate::batch::{BatchConfig, BatchOutcome, BatchReport, BatchRunner, RuntimeError};
