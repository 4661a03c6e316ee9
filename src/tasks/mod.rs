//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Expiry Sweep: drops expired derived-cache entries at configured intervals

mod sweep;

pub use sweep::spawn_sweep_task;
