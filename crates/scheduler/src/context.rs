use std::sync::{Arc, RwLock};

use shelf_ingest::{DocumentSource, ReportSink};
use tracing::warn;
use uuid::Uuid;

use crate::error::SchedulerError;
use crate::gate::ModelGate;
use crate::metrics::{DispatchMetrics, Outcome};
use crate::queue::TaskQueue;
use crate::types::SchedulerConfig;

/// Everything the manager and the workers share for one run.
pub struct RunContext {
    run_id: Uuid,
    queues: Vec<TaskQueue>,
    efficiencies: Vec<u32>,
    parallel_dispatch: bool,
    gate: ModelGate,
    source: Arc<dyn DocumentSource>,
    sink: Arc<dyn ReportSink>,
    metrics: Arc<RwLock<DispatchMetrics>>,
}

impl RunContext {
    pub fn new(
        config: &SchedulerConfig,
        source: Arc<dyn DocumentSource>,
        sink: Arc<dyn ReportSink>,
    ) -> Result<Self, SchedulerError> {
        let efficiencies = config.resolved_efficiencies()?;
        let workers = efficiencies.len();
        Ok(Self {
            run_id: Uuid::new_v4(),
            queues: (0..workers).map(|_| TaskQueue::new()).collect(),
            efficiencies,
            parallel_dispatch: config.parallel_dispatch,
            gate: ModelGate::new(),
            source,
            sink,
            metrics: Arc::new(RwLock::new(DispatchMetrics::new(workers))),
        })
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn worker_count(&self) -> usize {
        self.queues.len()
    }

    pub fn queue(&self, worker: usize) -> Option<&TaskQueue> {
        self.queues.get(worker)
    }

    pub fn queues(&self) -> &[TaskQueue] {
        &self.queues
    }

    pub fn efficiencies(&self) -> &[u32] {
        &self.efficiencies
    }

    pub fn parallel_dispatch(&self) -> bool {
        self.parallel_dispatch
    }

    pub fn gate(&self) -> &ModelGate {
        &self.gate
    }

    pub fn source(&self) -> &dyn DocumentSource {
        self.source.as_ref()
    }

    pub fn sink(&self) -> &dyn ReportSink {
        self.sink.as_ref()
    }

    pub fn metrics(&self) -> Arc<RwLock<DispatchMetrics>> {
        Arc::clone(&self.metrics)
    }

    /// `queue length × efficiency` for one worker.
    pub fn load(&self, worker: usize) -> Result<u64, SchedulerError> {
        let queue = self.queues.get(worker).ok_or_else(|| {
            SchedulerError::InvalidArgument(format!("no worker {}", worker))
        })?;
        Ok(queue.len() as u64 * u64::from(self.efficiencies[worker]))
    }

    /// Copy of the current counters.
    pub fn metrics_snapshot(&self) -> Option<DispatchMetrics> {
        self.metrics.read().ok().map(|m| m.clone())
    }

    pub(crate) fn record_outcome(&self, outcome: &Outcome) {
        match self.metrics.write() {
            Ok(mut m) => m.record_outcome(outcome),
            Err(_) => warn!("metrics lock poisoned, outcome not recorded"),
        }
    }
}
