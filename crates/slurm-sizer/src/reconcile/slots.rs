use crate::PendingJob;

/// Adjusts the number of required nodes based on the CPUs required per node.
///
/// `squeue` reports the minimum number of nodes of a pending job, which is wrong when the job
/// specifies a CPU count instead of a node count. For example, `sbatch -c 3 -n 5` on a cluster
/// with 4-slot nodes is reported with 15 CPUs and 3 CPUs per node, but only one task fits
/// into a node, so the job needs 5 nodes.
///
/// The node count reported by Slurm is kept when it is bigger, as with `sbatch -c 1 -N 2 -n 2`.
pub fn recompute_nodes_by_slots(jobs: &mut [PendingJob], node_slots: u64) {
    for job in jobs.iter_mut() {
        let cpus_per_node = job.cpus_min_per_node;
        if cpus_per_node == 0 || node_slots < cpus_per_node {
            log::debug!(
                "Job {}: cannot fit {} CPUs into nodes with {} slots, keeping {} nodes",
                job.id,
                cpus_per_node,
                node_slots,
                job.nodes
            );
            continue;
        }

        // Slots that can be filled with whole tasks
        let usable_slots_per_node = node_slots - (node_slots % cpus_per_node);
        let required_nodes = job.cpus_total.div_ceil(usable_slots_per_node);
        job.nodes = job.nodes.max(required_nodes);
    }
}
