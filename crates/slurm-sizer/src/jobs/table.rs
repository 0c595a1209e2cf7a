//! Ingest of the fixed-width table printed by `squeue -O`.
//!
//! `squeue -O` only supports fixed-width columns, so every column is requested with the same
//! width ([`SQUEUE_FIELD_SIZE`]) and cut back into cells by position.

use serde::{Deserialize, Serialize};

use crate::Map;
use crate::common::error::SizerError;
use crate::jobs::record::{JobState, PendingJob};
use crate::jobs::tres::parse_tres;

/// Width of every column requested from `squeue`.
pub const SQUEUE_FIELD_SIZE: usize = 200;

type ApplyFn = fn(&mut PendingJob, &str) -> anyhow::Result<()>;

/// Maps one `squeue -O` field onto a [`PendingJob`] attribute.
pub struct Column {
    /// Field name passed to `squeue -O`.
    pub field: &'static str,
    /// Header printed by `squeue` for the field.
    pub header: &'static str,
    apply: ApplyFn,
}

pub const JOB_ID_HEADER: &str = "JOBID";

/// Columns requested from `squeue`, in the order in which they are requested.
pub static SQUEUE_SCHEMA: [Column; 11] = [
    Column {
        field: "jobid",
        header: JOB_ID_HEADER,
        apply: apply_id,
    },
    Column {
        field: "statecompact",
        header: "ST",
        apply: apply_state,
    },
    Column {
        field: "numnodes",
        header: "NODES",
        apply: apply_nodes,
    },
    Column {
        field: "numcpus",
        header: "CPUS",
        apply: apply_cpus_total,
    },
    Column {
        field: "numtasks",
        header: "TASKS",
        apply: apply_tasks,
    },
    Column {
        field: "cpus-per-task",
        header: "CPUS_PER_TASK",
        apply: apply_cpus_per_task,
    },
    Column {
        field: "mincpus",
        header: "MIN_CPUS",
        apply: apply_cpus_min_per_node,
    },
    Column {
        field: "reason",
        header: "REASON",
        apply: apply_pending_reason,
    },
    Column {
        field: "tres-per-job",
        header: "TRES_PER_JOB",
        apply: apply_tres_per_job,
    },
    Column {
        field: "tres-per-task",
        header: "TRES_PER_TASK",
        apply: apply_tres_per_task,
    },
    Column {
        field: "tres-per-node",
        header: "TRES_PER_NODE",
        apply: apply_tres_per_node,
    },
];

fn parse_count(value: &str) -> anyhow::Result<u64> {
    Ok(value.parse::<u64>()?)
}

fn apply_id(job: &mut PendingJob, value: &str) -> anyhow::Result<()> {
    if value.is_empty() {
        anyhow::bail!("job id cannot be empty");
    }
    job.id = value.to_string();
    Ok(())
}

fn apply_state(job: &mut PendingJob, value: &str) -> anyhow::Result<()> {
    job.state = JobState::from(value);
    Ok(())
}

fn apply_nodes(job: &mut PendingJob, value: &str) -> anyhow::Result<()> {
    job.nodes = parse_count(value)?;
    Ok(())
}

fn apply_cpus_total(job: &mut PendingJob, value: &str) -> anyhow::Result<()> {
    job.cpus_total = parse_count(value)?;
    Ok(())
}

fn apply_tasks(job: &mut PendingJob, value: &str) -> anyhow::Result<()> {
    job.tasks = parse_count(value)?;
    Ok(())
}

fn apply_cpus_per_task(job: &mut PendingJob, value: &str) -> anyhow::Result<()> {
    job.cpus_per_task = parse_count(value)?;
    Ok(())
}

fn apply_cpus_min_per_node(job: &mut PendingJob, value: &str) -> anyhow::Result<()> {
    job.cpus_min_per_node = parse_count(value)?;
    Ok(())
}

fn apply_pending_reason(job: &mut PendingJob, value: &str) -> anyhow::Result<()> {
    job.pending_reason = value.to_string();
    Ok(())
}

fn apply_tres_per_job(job: &mut PendingJob, value: &str) -> anyhow::Result<()> {
    job.tres_per_job = parse_tres(value)?;
    Ok(())
}

fn apply_tres_per_task(job: &mut PendingJob, value: &str) -> anyhow::Result<()> {
    job.tres_per_task = parse_tres(value)?;
    Ok(())
}

fn apply_tres_per_node(job: &mut PendingJob, value: &str) -> anyhow::Result<()> {
    job.tres_per_node = parse_tres(value)?;
    Ok(())
}

/// Builds the `-O` argument of `squeue`, e.g. `jobid:200,statecompact:200,...`.
pub fn squeue_format_string() -> String {
    SQUEUE_SCHEMA
        .iter()
        .map(|column| format!("{}:{}", column.field, SQUEUE_FIELD_SIZE))
        .collect::<Vec<_>>()
        .join(",")
}

/// What to do with a job that contains a value which cannot be parsed.
#[derive(clap::ValueEnum, Serialize, Deserialize, Copy, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum InvalidFieldPolicy {
    /// Fail the whole snapshot.
    #[default]
    Reject,
    /// Drop the job from the snapshot.
    SkipJob,
    /// Keep the job, leaving the field at its default value (zero or no resources).
    Default,
}

/// Splits a fixed-width line into trimmed cells.
///
/// `squeue` pads columns to a width in bytes. A multi-byte character crossing a column boundary
/// stays in the column where it starts.
fn split_cells(line: &str) -> Vec<&str> {
    let mut cells = Vec::new();
    let mut rest = line;
    while !rest.is_empty() {
        let mut split_at = SQUEUE_FIELD_SIZE.min(rest.len());
        while !rest.is_char_boundary(split_at) {
            split_at += 1;
        }
        let (cell, tail) = rest.split_at(split_at);
        cells.push(cell.trim());
        rest = tail;
    }
    cells
}

/// Parses the output of `squeue -O` into job records, preserving row order.
///
/// The first non-empty line has to be the header. Headers that are not part of
/// [`SQUEUE_SCHEMA`] are ignored; schema columns missing from the header keep their default
/// value, except for the job id, which is required. Jobs without a state column are
/// considered pending.
pub fn parse_squeue_table(
    table: &str,
    policy: InvalidFieldPolicy,
) -> crate::Result<Vec<PendingJob>> {
    let mut lines = table.lines().filter(|line| !line.trim().is_empty());
    let Some(header) = lines.next() else {
        return Ok(Vec::new());
    };

    let positions: Map<&str, usize> = split_cells(header)
        .into_iter()
        .enumerate()
        .map(|(index, name)| (name, index))
        .collect();
    let Some(&id_position) = positions.get(JOB_ID_HEADER) else {
        return Err(SizerError::MissingColumn(JOB_ID_HEADER));
    };
    let columns: Vec<(&Column, usize)> = SQUEUE_SCHEMA
        .iter()
        .filter_map(|column| match positions.get(column.header) {
            Some(&position) => Some((column, position)),
            None => {
                log::debug!("Column {} not found in squeue output", column.header);
                None
            }
        })
        .collect();

    let mut jobs = Vec::new();
    for line in lines {
        let cells = split_cells(line);
        if let Some(job) = parse_row(&cells, id_position, &columns, policy)? {
            jobs.push(job);
        }
    }
    Ok(jobs)
}

fn parse_row(
    cells: &[&str],
    id_position: usize,
    columns: &[(&Column, usize)],
    policy: InvalidFieldPolicy,
) -> crate::Result<Option<PendingJob>> {
    let mut job = PendingJob::new(cells.get(id_position).copied().unwrap_or_default());

    for (column, position) in columns {
        let value = cells.get(*position).copied().unwrap_or_default();
        if let Err(error) = (column.apply)(&mut job, value) {
            let error = SizerError::InvalidField {
                column: column.header,
                value: value.to_string(),
                reason: error.to_string(),
            };
            match policy {
                InvalidFieldPolicy::Reject => return Err(error),
                InvalidFieldPolicy::SkipJob => {
                    log::warn!("Skipping job {}: {error}", job.id);
                    return Ok(None);
                }
                InvalidFieldPolicy::Default => {
                    log::warn!("Job {}: {error}, using the default value", job.id);
                }
            }
        }
    }
    if job.id.is_empty() {
        log::warn!("Skipping squeue row without a job id");
        return Ok(None);
    }
    Ok(Some(job))
}
