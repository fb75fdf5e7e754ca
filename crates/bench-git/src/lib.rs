//! Git abstraction for the bench manager
//!
//! Answers the questions the app registry asks of an application checkout:
//! is it a repository, which branch is checked out, and which commit does a
//! branch resolve to. Also clones applications into a bench.

pub mod checkout;
pub mod error;
pub mod inspector;

pub use checkout::{CloneOptions, ClonedApp, clone_app};
pub use error::{Error, Result};
pub use inspector::{Git2Inspector, GitRefInspector};
