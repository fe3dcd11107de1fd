//! Decode a one-shot inventory of the current host.
//!
//! Every fact is read through a [`Platform`], which abstracts the handful of
//! operating system queries the decoders need. [`collect`] uses the backend
//! for the running operating system; tests substitute their own.

#[macro_use]
extern crate log;

mod error;
pub mod facts;
pub mod platform;

pub use crate::error::{Error, ErrorKind, Result};
pub use crate::facts::HostReport;
pub use crate::platform::{NativePlatform, Platform};

/// Collect the [`HostReport`] for the current system.
pub fn collect() -> HostReport {
    HostReport::collect(&NativePlatform::default())
}
