//! Background Tasks Module
//!
//! Optional background work layered on top of lazy expiry.
//!
//! # Tasks
//! - TTL Cleanup: Removes expired cache entries at a fixed interval

mod cleanup;

pub use cleanup::spawn_cleanup_task;
