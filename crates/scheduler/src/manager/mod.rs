//! The run coordinator.
//!
//! Split across files the way the run unfolds:
//! - `core.rs`: struct, phase bookkeeping, model publication
//! - `assign.rs`: least-loaded assignment, distribution, queue closing
//! - `lifecycle.rs`: model acquisition and the full run

mod assign;
mod core;
mod lifecycle;


pub use self::core::Manager;
