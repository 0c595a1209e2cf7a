use crate::PendingJob;

#[derive(clap::ValueEnum, Clone)]
pub enum Outputs {
    CLI,
    JSON,
    Quiet,
}

pub trait Output {
    /// Jobs after node recomputation and filtering.
    fn print_pending_jobs(&self, jobs: &[PendingJob]);
    /// Jobs as reported by Slurm.
    fn print_job_list(&self, jobs: &[PendingJob]);

    fn print_error(&self, error: anyhow::Error);
}
