use serde::Deserialize;
use std::path::Path;

use crate::Set;
use crate::common::error::error;
use crate::jobs::RESOURCE_PENDING_REASONS;
use crate::jobs::table::InvalidFieldPolicy;
use crate::reconcile::{JobFilter, ReconcileParams};

/// Description of the cluster for which the node requirements are computed.
///
/// Can be loaded from a TOML file; every value can be overridden from the command line.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ClusterConfig {
    /// Number of CPU slots of a compute node.
    pub node_slots: Option<u64>,
    /// Number of GPUs of a compute node.
    #[serde(default)]
    pub gpus_per_node: i64,
    /// Skip jobs that need more slots per node than this.
    pub max_slots: Option<u64>,
    /// Skip jobs that need more nodes than this.
    pub max_nodes: Option<u64>,
    /// Only keep jobs pending for one of these reasons.
    #[serde(default)]
    pub pending_reasons: Vec<String>,
    /// Only keep jobs waiting for resources.
    #[serde(default)]
    pub resource_reasons: bool,
    #[serde(default)]
    pub invalid_fields: InvalidFieldPolicy,
}

impl ClusterConfig {
    pub fn parse(content: &str) -> crate::Result<ClusterConfig> {
        let config: ClusterConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> crate::Result<ClusterConfig> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn validate(&self) -> crate::Result<()> {
        if self.node_slots == Some(0) {
            return error("node_slots has to be positive".to_string());
        }
        if self.max_slots == Some(0) {
            return error("max_slots has to be positive".to_string());
        }
        if self.max_nodes == Some(0) {
            return error("max_nodes has to be positive".to_string());
        }
        Ok(())
    }

    pub fn reconcile_params(&self) -> ReconcileParams {
        ReconcileParams {
            node_slots: self.node_slots,
            gpus_per_node: self.gpus_per_node,
        }
    }

    pub fn job_filter(&self) -> JobFilter {
        let mut reasons: Set<String> = self.pending_reasons.iter().cloned().collect();
        if self.resource_reasons {
            reasons.extend(RESOURCE_PENDING_REASONS.iter().map(|r| r.to_string()));
        }
        JobFilter {
            max_slots: self.max_slots,
            max_nodes: self.max_nodes,
            pending_reasons: (!reasons.is_empty()).then_some(reasons),
        }
    }
}

#[cfg(test)]
mod test {
    use super::ClusterConfig;
    use crate::Error;
    use crate::jobs::table::InvalidFieldPolicy;

    #[test]
    fn test_parse_empty() {
        let config = ClusterConfig::parse("").unwrap();
        assert_eq!(config, ClusterConfig::default());
        assert!(config.job_filter().is_empty());
    }

    #[test]
    fn test_parse_full() {
        let config = ClusterConfig::parse(
            r#"
            node_slots = 48
            gpus_per_node = 4
            max_slots = 48
            max_nodes = 100
            pending_reasons = ["Resources", "Priority"]
            invalid_fields = "skip-job"
            "#,
        )
        .unwrap();
        assert_eq!(config.node_slots, Some(48));
        assert_eq!(config.gpus_per_node, 4);
        assert_eq!(config.invalid_fields, InvalidFieldPolicy::SkipJob);

        let params = config.reconcile_params();
        assert_eq!(params.node_slots, Some(48));
        assert_eq!(params.gpus_per_node, 4);

        let filter = config.job_filter();
        assert_eq!(filter.max_slots, Some(48));
        assert_eq!(filter.max_nodes, Some(100));
        assert_eq!(filter.pending_reasons.unwrap().len(), 2);
    }

    #[test]
    fn test_resource_reasons() {
        let config = ClusterConfig::parse(
            r#"
            pending_reasons = ["Resources", "Licenses"]
            resource_reasons = true
            "#,
        )
        .unwrap();
        let reasons = config.job_filter().pending_reasons.unwrap();
        assert_eq!(reasons.len(), 7);
        assert!(reasons.contains("Licenses"));
        assert!(reasons.contains("NodeDown"));
    }

    #[test]
    fn test_unknown_key() {
        assert!(matches!(
            ClusterConfig::parse("nodes_slots = 4"),
            Err(Error::DeserializationError(_))
        ));
    }

    #[test]
    fn test_zero_values() {
        assert!(matches!(
            ClusterConfig::parse("node_slots = 0"),
            Err(Error::GenericError(_))
        ));
        assert!(ClusterConfig::parse("max_nodes = 0").is_err());
    }

    #[test]
    fn test_negative_gpus() {
        let config = ClusterConfig::parse("gpus_per_node = -1").unwrap();
        assert_eq!(config.reconcile_params().gpus_per_node, -1);
    }
}
