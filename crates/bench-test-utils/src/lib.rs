//! Shared test utilities for the bench-manager workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`git`]: git repository fixtures at three realism levels
//! - [`bench`]: [`bench::TestBench`] builder for bench directory scenarios

pub mod bench;
pub mod git;
