//! # rstore Core
//!
//! The storage contract shared by every rstore backend, together with the
//! error vocabulary callers match on. Generic consumers (session stores,
//! response caches) depend on this crate only and never see backend types.

pub mod error;
pub mod storage;
pub mod telemetry;

pub use error::*;
pub use storage::*;
