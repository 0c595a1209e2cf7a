//! Pipeline that turns a snapshot of Slurm jobs into the list of pending jobs with their real
//! node requirements.

use std::path::PathBuf;

use crate::common::manager::slurm::{PENDING_STATE_FILTER, SqueueCommand};
use crate::jobs::table::{InvalidFieldPolicy, parse_squeue_table};
use crate::reconcile::{JobFilter, ReconcileParams, reconcile_required_nodes};
use crate::{JobState, PendingJob};

/// Provides a complete snapshot of jobs.
pub trait JobSource {
    fn jobs(&self) -> crate::Result<Vec<PendingJob>>;
}

impl JobSource for Vec<PendingJob> {
    fn jobs(&self) -> crate::Result<Vec<PendingJob>> {
        Ok(self.clone())
    }
}

/// Reads jobs directly from Slurm.
pub struct SqueueSource {
    command: SqueueCommand,
    states: Option<String>,
    policy: InvalidFieldPolicy,
}

impl SqueueSource {
    pub fn new(command: SqueueCommand, policy: InvalidFieldPolicy) -> Self {
        Self {
            command,
            states: Some(PENDING_STATE_FILTER.to_string()),
            policy,
        }
    }

    /// Query jobs in the given states instead of only pending jobs.
    pub fn with_states(mut self, states: Option<String>) -> Self {
        self.states = states;
        self
    }
}

impl JobSource for SqueueSource {
    fn jobs(&self) -> crate::Result<Vec<PendingJob>> {
        let output = self.command.query(self.states.as_deref())?;
        parse_squeue_table(&output, self.policy)
    }
}

/// Parses a `squeue --states` list (e.g. `PD,R`). Returns `None` when every state is accepted.
pub fn parse_state_filter(states: &str) -> Option<Vec<JobState>> {
    let states: Vec<&str> = states
        .split(',')
        .map(str::trim)
        .filter(|state| !state.is_empty())
        .collect();
    if states.is_empty() || states.iter().any(|state| state.eq_ignore_ascii_case("all")) {
        return None;
    }
    Some(states.into_iter().map(JobState::from).collect())
}

/// Reads jobs from a file with previously captured `squeue` output.
///
/// The file may hold jobs in any state, so the state filter is applied after parsing.
pub struct TableFileSource {
    path: PathBuf,
    states: Option<Vec<JobState>>,
    policy: InvalidFieldPolicy,
}

impl TableFileSource {
    pub fn new(path: PathBuf, policy: InvalidFieldPolicy) -> Self {
        Self {
            path,
            states: None,
            policy,
        }
    }

    /// Keep only jobs in the given states; all jobs are kept by default.
    pub fn with_states(mut self, states: Option<String>) -> Self {
        self.states = states.as_deref().and_then(parse_state_filter);
        self
    }
}

impl JobSource for TableFileSource {
    fn jobs(&self) -> crate::Result<Vec<PendingJob>> {
        let table = std::fs::read_to_string(&self.path)?;
        let mut jobs = parse_squeue_table(&table, self.policy)?;
        if let Some(states) = &self.states {
            jobs.retain(|job| states.contains(&job.state));
        }
        Ok(jobs)
    }
}

/// Returns the job snapshot as reported by the source.
pub fn get_jobs(source: &dyn JobSource) -> crate::Result<Vec<PendingJob>> {
    source.jobs()
}

/// Returns pending jobs with recomputed node requirements that pass the given filter.
///
/// The snapshot is fetched completely before any job is modified, so a failing source never
/// produces a partial result.
pub fn get_pending_jobs(
    source: &dyn JobSource,
    params: &ReconcileParams,
    filter: &JobFilter,
) -> crate::Result<Vec<PendingJob>> {
    let mut jobs: Vec<PendingJob> = source
        .jobs()?
        .into_iter()
        .filter(|job| {
            let pending = job.state.is_pending();
            if !pending {
                log::debug!("Ignoring job {} in state {}", job.id, job.state);
            }
            pending
        })
        .collect();

    reconcile_required_nodes(&mut jobs, params);
    Ok(filter.apply(&jobs))
}

/// Number of nodes needed to start all given jobs at once.
pub fn total_required_nodes(jobs: &[PendingJob]) -> u64 {
    jobs.iter().map(|job| job.nodes).fold(0, u64::saturating_add)
}
