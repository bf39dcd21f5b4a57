//! Background Tasks Module
//!
//! Houses long-running maintenance tasks.

mod sweep;

pub use sweep::spawn_sweep_task;
