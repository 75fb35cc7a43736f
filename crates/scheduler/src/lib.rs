//! Load-balancing document scheduler and its worker threads.
//!
//! A [`Manager`] owns the run: it acquires the model (load or train),
//! publishes it through the [`ModelGate`], assigns every document to the
//! least-loaded worker queue, and closes each queue with a [`Task::Stop`]
//! sentinel. Workers block on the gate, then on their own queue, and exit
//! when they pop the sentinel.
//!
//! All shared state lives in one [`RunContext`], handed to the manager and
//! every worker as an `Arc`.

pub mod acquire;
pub mod context;
pub mod error;
pub mod gate;
pub mod manager;
pub mod metrics;
pub mod phase;
pub mod pool;
pub mod queue;
pub mod types;
pub mod worker;

pub use acquire::{ModelOrigin, ModelPlan};
pub use context::RunContext;
pub use error::SchedulerError;
pub use gate::ModelGate;
pub use manager::Manager;
pub use metrics::{DispatchMetrics, RunSummary};
pub use phase::RunPhase;
pub use pool::WorkerPool;
pub use queue::{Task, TaskQueue};
pub use types::SchedulerConfig;
pub use worker::{Worker, WorkerReport};
