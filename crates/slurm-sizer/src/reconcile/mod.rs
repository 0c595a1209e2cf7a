//! Recomputation of the number of nodes required by pending jobs.
//!
//! The node count reported by `squeue` for a pending job is only a lower bound. It does not take
//! into account that tasks cannot be split across nodes, nor GPUs requested with `--gpus` or
//! `--gpus-per-task`. The passes in this module raise the node count to the real minimum.
//! They never lower it.

pub mod filter;
pub mod gpus;
pub mod slots;

use crate::PendingJob;

pub use filter::JobFilter;
pub use gpus::recompute_nodes_by_gpus;
pub use slots::recompute_nodes_by_slots;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileParams {
    /// Number of CPU slots of a compute node. `None` disables the slot pass.
    pub node_slots: Option<u64>,
    /// Number of GPUs of a compute node. Zero or less disables the GPU pass.
    pub gpus_per_node: i64,
}

/// Raises the node count of each job to the minimum it actually needs.
///
/// The slot pass runs first, the GPU pass then works with its results.
pub fn reconcile_required_nodes(jobs: &mut [PendingJob], params: &ReconcileParams) {
    for job in jobs.iter_mut() {
        if job.nodes == 0 {
            job.nodes = 1;
        }
    }
    if let Some(node_slots) = params.node_slots {
        recompute_nodes_by_slots(jobs, node_slots);
    }
    recompute_nodes_by_gpus(jobs, params.gpus_per_node);
}
