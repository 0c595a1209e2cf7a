use crate::PendingJob;

/// Adjusts the number of required nodes based on the requested GPUs.
///
/// When a job uses `--gpus` or `--gpus-per-task` without an explicit node count, `squeue`
/// reports a single node. The real count is derived from the per-job and per-task GPU
/// requests. For example, `sbatch --gpus=12` needs 3 nodes with 4 GPUs and
/// `sbatch --gpus-per-task=2 -n 3` needs 2 of them.
///
/// When `gpus_per_node` is not positive, the cluster has no GPU nodes and Slurm rejects GPU jobs
/// on its own, so nothing is changed.
pub fn recompute_nodes_by_gpus(jobs: &mut [PendingJob], gpus_per_node: i64) {
    let gpus_per_node = match u64::try_from(gpus_per_node) {
        Ok(gpus) if gpus > 0 => gpus,
        _ => return,
    };

    for job in jobs.iter_mut() {
        if let Some(gpus) = job.gpus_per_job().filter(|&gpus| gpus > 0) {
            raise_min_nodes(job, gpus.div_ceil(gpus_per_node));
        }

        if let Some(gpus) = job.gpus_per_task().filter(|&gpus| gpus > 0) {
            let tasks_per_node = gpus_per_node / gpus;
            if tasks_per_node == 0 {
                log::warn!(
                    "Job {} requests {} GPUs per task, but nodes have only {} GPUs",
                    job.id,
                    gpus,
                    gpus_per_node
                );
            } else {
                raise_min_nodes(job, job.tasks.div_ceil(tasks_per_node));
            }
        }
    }
}

/// Raises the node count to `min_nodes` and makes sure that the job asks for enough CPUs
/// to cover `cpus_min_per_node` on every node.
fn raise_min_nodes(job: &mut PendingJob, min_nodes: u64) {
    if min_nodes <= job.nodes {
        return;
    }
    job.nodes = min_nodes;
    let min_cpus = job.nodes.saturating_mul(job.cpus_min_per_node);
    if job.cpus_total < min_cpus {
        job.cpus_total = min_cpus;
    }
}

#[cfg(test)]
mod test {
    use super::recompute_nodes_by_gpus;
    use crate::PendingJob;
    use crate::tests::utils::{gpu_tres, pending_job};

    fn recompute(job: PendingJob, gpus_per_node: i64) -> PendingJob {
        let mut jobs = vec![job];
        recompute_nodes_by_gpus(&mut jobs, gpus_per_node);
        jobs.pop().unwrap()
    }

    fn per_job(nodes: u64, gpus: u64) -> PendingJob {
        PendingJob {
            nodes,
            cpus_total: 1,
            tasks: 1,
            cpus_per_task: 1,
            cpus_min_per_node: 1,
            tres_per_job: gpu_tres(gpus),
            ..pending_job("79")
        }
    }

    fn per_task(nodes: u64, tasks: u64, gpus: u64) -> PendingJob {
        PendingJob {
            nodes,
            cpus_total: tasks,
            tasks,
            cpus_per_task: 1,
            cpus_min_per_node: 1,
            tres_per_task: gpu_tres(gpus),
            ..pending_job("92")
        }
    }

    #[test]
    fn test_gpus_per_job() {
        let job = recompute(per_job(1, 12), 4);
        assert_eq!(job.nodes, 3);
        assert_eq!(job.cpus_total, 3);
    }

    #[test]
    fn test_gpus_per_job_rounds_up() {
        assert_eq!(recompute(per_job(1, 13), 4).nodes, 4);
        assert_eq!(recompute(per_job(1, 3), 4).nodes, 1);
    }

    #[test]
    fn test_gpus_per_job_keep_bigger_node_count() {
        let job = recompute(per_job(5, 12), 4);
        assert_eq!(job.nodes, 5);
        assert_eq!(job.cpus_total, 1);
    }

    #[test]
    fn test_gpus_per_task() {
        let job = recompute(per_task(1, 3, 2), 4);
        assert_eq!(job.nodes, 2);
        assert_eq!(job.cpus_total, 3);
    }

    #[test]
    fn test_gpus_per_task_raise_cpus() {
        let job = recompute(
            PendingJob {
                cpus_total: 4,
                cpus_min_per_node: 4,
                ..per_task(1, 4, 1)
            },
            1,
        );
        assert_eq!(job.nodes, 4);
        assert_eq!(job.cpus_total, 16);
    }

    #[test]
    fn test_gpus_per_task_bigger_than_node() {
        let job = recompute(per_task(1, 3, 8), 4);
        assert_eq!(job.nodes, 1);
        assert_eq!(job.cpus_total, 3);
    }

    #[test]
    fn test_gpus_per_job_and_per_task() {
        let job = recompute(
            PendingJob {
                tres_per_job: gpu_tres(8),
                ..per_task(1, 10, 2)
            },
            4,
        );
        assert_eq!(job.nodes, 5);
        assert_eq!(job.cpus_total, 10);

        let job = recompute(
            PendingJob {
                tres_per_job: gpu_tres(40),
                ..per_task(1, 10, 2)
            },
            4,
        );
        assert_eq!(job.nodes, 10);
    }

    #[test]
    fn test_zero_gpus_requested() {
        assert_eq!(recompute(per_job(1, 0), 4).nodes, 1);
        assert_eq!(recompute(per_task(1, 6, 0), 4).nodes, 1);
    }

    #[test]
    fn test_no_gpu_nodes() {
        for gpus_per_node in [0, -4] {
            let job = per_job(1, 12);
            assert_eq!(recompute(job.clone(), gpus_per_node), job);
            let job = per_task(1, 3, 2);
            assert_eq!(recompute(job.clone(), gpus_per_node), job);
        }
    }

    #[test]
    fn test_other_resources_ignored() {
        let mut job = per_job(1, 0);
        job.tres_per_job.clear();
        job.tres_per_job.insert("license/matlab".to_string(), 12);
        job.tres_per_node.insert("gpu".to_string(), 12);
        assert_eq!(recompute(job, 4).nodes, 1);
    }
}
