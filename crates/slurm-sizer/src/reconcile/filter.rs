use crate::{PendingJob, Set};

/// Selects jobs that can be used for a scaling decision.
///
/// All criteria have to be satisfied; a criterion that is not set accepts every job.
#[derive(Debug, Clone, Default)]
pub struct JobFilter {
    /// Maximum number of slots of a compute node.
    pub max_slots: Option<u64>,
    /// Maximum number of nodes in the cluster.
    pub max_nodes: Option<u64>,
    /// Accepted pending reasons. An empty set accepts every reason.
    pub pending_reasons: Option<Set<String>>,
}

impl JobFilter {
    pub fn is_empty(&self) -> bool {
        self.max_slots.is_none()
            && self.max_nodes.is_none()
            && self
                .pending_reasons
                .as_ref()
                .is_none_or(|reasons| reasons.is_empty())
    }

    pub fn accepts(&self, job: &PendingJob) -> bool {
        if let Some(max_slots) = self.max_slots {
            if job.cpus_min_per_node > max_slots {
                log::info!(
                    "Skipping job {} since required slots per node ({}) exceed max slots ({})",
                    job.id,
                    job.cpus_min_per_node,
                    max_slots
                );
                return false;
            }
        }
        if let Some(max_nodes) = self.max_nodes {
            if job.nodes > max_nodes {
                log::info!(
                    "Skipping job {} since required nodes ({}) exceed max nodes in cluster ({})",
                    job.id,
                    job.nodes,
                    max_nodes
                );
                return false;
            }
        }
        if let Some(reasons) = &self.pending_reasons {
            if !reasons.is_empty() && !reasons.contains(&job.pending_reason) {
                log::info!(
                    "Skipping pending job {} due to pending reason: {}",
                    job.id,
                    job.pending_reason
                );
                return false;
            }
        }
        true
    }

    /// Returns the accepted jobs in their original order.
    pub fn apply(&self, jobs: &[PendingJob]) -> Vec<PendingJob> {
        if self.is_empty() {
            return jobs.to_vec();
        }
        jobs.iter().filter(|job| self.accepts(job)).cloned().collect()
    }
}
