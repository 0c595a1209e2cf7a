use crate::PendingJob;
use crate::client::output::outputs::Output;

#[derive(Default)]
pub struct Quiet;

fn format_job(job: &PendingJob) -> String {
    format!("{} {}", job.id, job.nodes)
}

impl Output for Quiet {
    fn print_pending_jobs(&self, jobs: &[PendingJob]) {
        for job in jobs {
            println!("{}", format_job(job));
        }
    }

    fn print_job_list(&self, jobs: &[PendingJob]) {
        for job in jobs {
            println!("{}", format_job(job));
        }
    }

    fn print_error(&self, error: anyhow::Error) {
        eprintln!("{error:?}");
    }
}
