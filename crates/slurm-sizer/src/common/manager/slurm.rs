use std::path::PathBuf;

use crate::common::manager::common::run_command;
use crate::jobs::table::squeue_format_string;

/// Default program used to query Slurm.
pub const DEFAULT_SQUEUE_PROGRAM: &str = "squeue";

/// Compact state of jobs that wait for an allocation.
pub const PENDING_STATE_FILTER: &str = "PD";

/// Queries job information from Slurm using `squeue`.
#[derive(Debug, Clone)]
pub struct SqueueCommand {
    program: PathBuf,
}

impl Default for SqueueCommand {
    fn default() -> Self {
        Self::new(DEFAULT_SQUEUE_PROGRAM)
    }
}

impl SqueueCommand {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn arguments(&self, states: Option<&str>) -> Vec<String> {
        let mut arguments = vec![
            self.program.display().to_string(),
            "-r".to_string(),
            "-O".to_string(),
            squeue_format_string(),
        ];
        if let Some(states) = states {
            arguments.push("--states".to_string());
            arguments.push(states.to_string());
        }
        arguments
    }

    /// Returns the raw fixed-width table with jobs in the given states (all states if `None`).
    /// This function is blocking.
    pub fn query(&self, states: Option<&str>) -> crate::Result<String> {
        let arguments = self.arguments(states);
        let arguments: Vec<&str> = arguments.iter().map(|arg| arg.as_str()).collect();
        run_command(&arguments)
    }
}

#[cfg(test)]
mod test {
    use super::SqueueCommand;
    use crate::jobs::table::squeue_format_string;

    #[test]
    fn test_squeue_arguments() {
        let command = SqueueCommand::new("/opt/slurm/bin/squeue");
        assert_eq!(
            command.arguments(Some("PD")),
            vec![
                "/opt/slurm/bin/squeue".to_string(),
                "-r".to_string(),
                "-O".to_string(),
                squeue_format_string(),
                "--states".to_string(),
                "PD".to_string(),
            ]
        );
        assert_eq!(command.arguments(None).len(), 4);
    }

    #[test]
    fn test_query_uses_program_output() {
        let command = SqueueCommand::new("echo");
        let output = command.query(Some("PD")).unwrap();
        assert!(output.starts_with("-r -O jobid:200,"));
        assert!(output.trim_end().ends_with("--states PD"));
    }
}
