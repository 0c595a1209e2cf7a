pub mod record;
pub mod table;
pub mod tres;

/// Pending reasons that indicate that a job waits for cluster resources,
/// as opposed to e.g. waiting for a dependency.
pub const RESOURCE_PENDING_REASONS: &[&str] = &[
    "Resources",
    "Nodes required for job are DOWN, DRAINED or reserved for jobs in higher priority partitions",
    "BeginTime",
    "NodeDown",
    "Priority",
    "ReqNodeNotAvail, May be reserved for other job",
];
