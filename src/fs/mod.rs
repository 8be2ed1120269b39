//! Filesystem utilities for confsync.
//!
//! Configuration files are owned by the user; they are only ever replaced
//! wholesale through an atomic write so no partial file is observable.

pub mod atomic;

pub use atomic::atomic_write;
