//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Idle sweep: evicts cache entries left unused past their idle window

mod sweep;

pub use sweep::spawn_sweep_task;
