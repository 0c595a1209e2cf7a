use crate::PendingJob;
use crate::jobs::table::SQUEUE_FIELD_SIZE;
use crate::jobs::tres::{GPU_RESOURCE_NAME, TresMap};

pub fn pending_job(id: &str) -> PendingJob {
    PendingJob {
        nodes: 1,
        ..PendingJob::new(id)
    }
}

pub fn gpu_tres(count: u64) -> TresMap {
    let mut tres = TresMap::new();
    tres.insert(GPU_RESOURCE_NAME.to_string(), count);
    tres
}

/// Renders rows in the fixed-width format of `squeue -O`, padding each cell to a width in bytes.
pub fn squeue_table(rows: &[&[&str]]) -> String {
    let mut table = String::new();
    for row in rows {
        for cell in row.iter() {
            table.push_str(cell);
            table.push_str(&" ".repeat(SQUEUE_FIELD_SIZE.saturating_sub(cell.len())));
        }
        table.push('\n');
    }
    table
}
