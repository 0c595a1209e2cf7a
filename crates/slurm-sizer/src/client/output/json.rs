use serde_json::{Value, json};

use crate::PendingJob;
use crate::client::output::outputs::Output;
use crate::pending::total_required_nodes;

#[derive(Default)]
pub struct JsonOutput;

impl JsonOutput {
    fn print(&self, data: Value) {
        println!("{data:#}");
    }
}

fn format_pending_jobs(jobs: &[PendingJob]) -> Value {
    json!({
        "required_nodes": total_required_nodes(jobs),
        "jobs": jobs,
    })
}

impl Output for JsonOutput {
    fn print_pending_jobs(&self, jobs: &[PendingJob]) {
        self.print(format_pending_jobs(jobs));
    }

    fn print_job_list(&self, jobs: &[PendingJob]) {
        self.print(json!(jobs));
    }

    fn print_error(&self, error: anyhow::Error) {
        self.print(json!({
            "error": format!("{error:?}"),
        }));
    }
}

#[cfg(test)]
mod test {
    use super::format_pending_jobs;
    use crate::PendingJob;
    use crate::tests::utils::{gpu_tres, pending_job};
    use serde_json::json;

    #[test]
    fn test_format_pending_jobs() {
        let jobs = vec![PendingJob {
            nodes: 3,
            cpus_total: 3,
            tasks: 1,
            cpus_per_task: 1,
            cpus_min_per_node: 1,
            pending_reason: "Resources".to_string(),
            tres_per_job: gpu_tres(12),
            ..pending_job("79")
        }];
        assert_eq!(
            format_pending_jobs(&jobs),
            json!({
                "required_nodes": 3,
                "jobs": [{
                    "id": "79",
                    "state": "Pending",
                    "nodes": 3,
                    "cpus_total": 3,
                    "tasks": 1,
                    "cpus_per_task": 1,
                    "cpus_min_per_node": 1,
                    "pending_reason": "Resources",
                    "tres_per_job": {"gpu": 12},
                    "tres_per_task": {},
                    "tres_per_node": {},
                }]
            })
        );
    }
}
