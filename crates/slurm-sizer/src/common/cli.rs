use std::path::PathBuf;

use clap::Parser;

use crate::client::output::outputs::Outputs;
use crate::common::config::ClusterConfig;
use crate::common::manager::slurm::DEFAULT_SQUEUE_PROGRAM;
use crate::jobs::table::InvalidFieldPolicy;

#[derive(clap::ValueEnum, Clone)]
pub enum ColorPolicy {
    /// Use colors if the stdout is detected to be a terminal.
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

// Common CLI options
#[derive(Parser)]
pub struct CommonOpts {
    /// Sets console color policy
    #[arg(
        long,
        default_value_t = ColorPolicy::Auto,
        value_enum,
        global = true,
        help_heading("GLOBAL OPTIONS"),
        hide_short_help(true)
    )]
    pub colors: ColorPolicy,

    /// Sets output formatting
    #[arg(
        long,
        env = "SLURM_SIZER_OUTPUT_MODE",
        default_value_t = Outputs::CLI,
        value_enum,
        global = true,
        help_heading("GLOBAL OPTIONS"),
        hide_short_help(true)
    )]
    pub output_mode: Outputs,

    /// Enables more detailed log output
    #[arg(
        long,
        env = "SLURM_SIZER_DEBUG",
        global = true,
        help_heading("GLOBAL OPTIONS"),
        hide_short_help(true)
    )]
    pub debug: bool,

    /// Path to the `squeue` program
    #[arg(
        long,
        env = "SLURM_SIZER_SQUEUE",
        default_value = DEFAULT_SQUEUE_PROGRAM,
        value_hint = clap::ValueHint::ExecutablePath,
        global = true,
        help_heading("GLOBAL OPTIONS"),
        hide_short_help(true)
    )]
    pub squeue: PathBuf,
}

// Root CLI options
#[derive(Parser)]
#[command(
    author,
    about,
    version(crate::SIZER_VERSION),
    disable_help_subcommand(true),
    help_expected(true)
)]
pub struct RootOptions {
    #[clap(flatten)]
    pub common: CommonOpts,

    #[clap(subcommand)]
    pub subcmd: SubCommand,
}

#[derive(Parser)]
pub enum SubCommand {
    /// Display pending jobs with their real node requirements
    Pending(PendingOpts),
    /// Display jobs as reported by Slurm
    Jobs(JobsOpts),
}

#[derive(Parser)]
pub struct InputOpts {
    /// Read a captured `squeue -O` table from a file instead of running `squeue`
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub input: Option<PathBuf>,

    /// How to handle jobs with values that cannot be parsed
    #[arg(long, value_enum)]
    pub invalid_fields: Option<InvalidFieldPolicy>,
}

#[derive(Parser)]
pub struct PendingOpts {
    #[clap(flatten)]
    pub input: InputOpts,

    /// TOML file with the cluster description
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Number of CPU slots of a compute node
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub node_slots: Option<u64>,

    /// Number of GPUs of a compute node, zero disables GPU based recomputation
    #[arg(long, allow_negative_numbers(true))]
    pub gpus_per_node: Option<i64>,

    /// Skip jobs that need more CPUs per node than this
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub max_slots: Option<u64>,

    /// Skip jobs that need more nodes than this
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub max_nodes: Option<u64>,

    /// Only keep jobs pending for this reason.
    /// Can be used multiple times.
    #[arg(long = "reason")]
    pub pending_reasons: Vec<String>,

    /// Only keep jobs waiting for cluster resources
    #[arg(long)]
    pub resource_reasons: bool,
}

impl PendingOpts {
    /// Merges the options into the configuration loaded from `--config`.
    /// Values given on the command line take precedence.
    pub fn cluster_config(&self) -> crate::Result<ClusterConfig> {
        let mut config = match &self.config {
            Some(path) => ClusterConfig::load(path)?,
            None => ClusterConfig::default(),
        };
        if let Some(node_slots) = self.node_slots {
            config.node_slots = Some(node_slots);
        }
        if let Some(gpus_per_node) = self.gpus_per_node {
            config.gpus_per_node = gpus_per_node;
        }
        if let Some(max_slots) = self.max_slots {
            config.max_slots = Some(max_slots);
        }
        if let Some(max_nodes) = self.max_nodes {
            config.max_nodes = Some(max_nodes);
        }
        if !self.pending_reasons.is_empty() {
            config.pending_reasons = self.pending_reasons.clone();
        }
        config.resource_reasons |= self.resource_reasons;
        if let Some(policy) = self.input.invalid_fields {
            config.invalid_fields = policy;
        }
        Ok(config)
    }
}

#[derive(Parser)]
pub struct JobsOpts {
    #[clap(flatten)]
    pub input: InputOpts,

    /// Only show jobs in the given states (e.g. `PD,R`); all states by default
    #[arg(long)]
    pub states: Option<String>,
}
