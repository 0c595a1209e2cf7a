use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use crate::jobs::tres::{GPU_RESOURCE_NAME, TresMap};

/// Job state as reported by Slurm, either in the compact (`PD`) or in the long (`PENDING`) form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobState {
    Pending,
    Running,
    Suspended,
    Completing,
    Completed,
    Cancelled,
    Failed,
    Timeout,
    NodeFail,
    Preempted,
    OutOfMemory,
    Unknown(String),
}

impl From<&str> for JobState {
    fn from(value: &str) -> Self {
        match value.trim().to_uppercase().as_str() {
            "PD" | "PENDING" => JobState::Pending,
            "R" | "RUNNING" => JobState::Running,
            "S" | "SUSPENDED" => JobState::Suspended,
            "CG" | "COMPLETING" => JobState::Completing,
            "CD" | "COMPLETED" => JobState::Completed,
            "CA" | "CANCELLED" => JobState::Cancelled,
            "F" | "FAILED" => JobState::Failed,
            "TO" | "TIMEOUT" => JobState::Timeout,
            "NF" | "NODE_FAIL" => JobState::NodeFail,
            "PR" | "PREEMPTED" => JobState::Preempted,
            "OOM" | "OUT_OF_MEMORY" => JobState::OutOfMemory,
            _ => JobState::Unknown(value.trim().to_string()),
        }
    }
}

impl Display for JobState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let code = match self {
            JobState::Pending => "PD",
            JobState::Running => "R",
            JobState::Suspended => "S",
            JobState::Completing => "CG",
            JobState::Completed => "CD",
            JobState::Cancelled => "CA",
            JobState::Failed => "F",
            JobState::Timeout => "TO",
            JobState::NodeFail => "NF",
            JobState::Preempted => "PR",
            JobState::OutOfMemory => "OOM",
            JobState::Unknown(code) => code,
        };
        f.write_str(code)
    }
}

impl Default for JobState {
    fn default() -> Self {
        JobState::Unknown(String::new())
    }
}

impl JobState {
    pub fn is_pending(&self) -> bool {
        matches!(self, JobState::Pending)
    }
}

/// A single job from a `squeue` snapshot.
///
/// Records live only for a single poll of the scheduler. `nodes` and `cpus_total` start as
/// reported by Slurm and can only be raised by [`crate::reconcile`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingJob {
    pub id: String,
    pub state: JobState,
    /// Minimum number of nodes required by the job.
    pub nodes: u64,
    pub cpus_total: u64,
    pub tasks: u64,
    pub cpus_per_task: u64,
    pub cpus_min_per_node: u64,
    pub pending_reason: String,
    pub tres_per_job: TresMap,
    pub tres_per_task: TresMap,
    pub tres_per_node: TresMap,
}

impl PendingJob {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            state: JobState::Pending,
            nodes: 0,
            cpus_total: 0,
            tasks: 0,
            cpus_per_task: 0,
            cpus_min_per_node: 0,
            pending_reason: String::new(),
            tres_per_job: Default::default(),
            tres_per_task: Default::default(),
            tres_per_node: Default::default(),
        }
    }

    pub fn gpus_per_job(&self) -> Option<u64> {
        self.tres_per_job.get(GPU_RESOURCE_NAME).copied()
    }

    pub fn gpus_per_task(&self) -> Option<u64> {
        self.tres_per_task.get(GPU_RESOURCE_NAME).copied()
    }
}

#[cfg(test)]
mod test {
    use super::JobState;

    #[test]
    fn test_parse_state() {
        assert_eq!(JobState::from("PD"), JobState::Pending);
        assert_eq!(JobState::from("pending"), JobState::Pending);
        assert_eq!(JobState::from(" R "), JobState::Running);
        assert_eq!(JobState::from("NODE_FAIL"), JobState::NodeFail);
        assert_eq!(JobState::from("BF"), JobState::Unknown("BF".to_string()));
    }

    #[test]
    fn test_display_state() {
        assert_eq!(JobState::Pending.to_string(), "PD");
        assert_eq!(JobState::from("CANCELLED").to_string(), "CA");
        assert_eq!(JobState::from("BF").to_string(), "BF");
    }
}
