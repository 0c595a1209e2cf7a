use cli_table::format::{Justify, Separator};
use cli_table::{Cell, CellStruct, ColorChoice, Style, Table, TableStruct, print_stdout};

use colored::Colorize;

use crate::client::output::outputs::Output;
use crate::jobs::tres::format_tres;
use crate::pending::total_required_nodes;
use crate::{JobState, PendingJob};

const TERMINAL_WIDTH: usize = 80;

pub struct CliOutput {
    color_policy: ColorChoice,
}

impl CliOutput {
    pub fn new(color_policy: ColorChoice) -> CliOutput {
        CliOutput { color_policy }
    }

    fn print_horizontal_table(&self, rows: Vec<Vec<CellStruct>>, header: Vec<CellStruct>) {
        let table = rows
            .table()
            .separator(
                Separator::builder()
                    .title(Some(Default::default()))
                    .column(Some(Default::default()))
                    .build(),
            )
            .title(header);
        self.print_table(table);
    }

    fn print_table(&self, table: TableStruct) {
        let table = table.color_choice(self.color_policy);
        if let Err(e) = print_stdout(table) {
            log::error!("Cannot print table to stdout: {e:?}");
        }
    }

    fn print_jobs(&self, jobs: &[PendingJob]) {
        let header = vec![
            "ID".cell().bold(true),
            "State".cell().bold(true),
            "Nodes".cell().bold(true),
            "CPUs".cell().bold(true),
            "Tasks".cell().bold(true),
            "CPUs/task".cell().bold(true),
            "Min CPUs/node".cell().bold(true),
            "Reason".cell().bold(true),
            "TRES/job".cell().bold(true),
            "TRES/task".cell().bold(true),
            "TRES/node".cell().bold(true),
        ];
        let rows = jobs.iter().map(job_row).collect();
        self.print_horizontal_table(rows, header);
    }
}

fn job_row(job: &PendingJob) -> Vec<CellStruct> {
    vec![
        job.id.as_str().cell().justify(Justify::Right),
        format_state(&job.state).cell(),
        job.nodes.cell().justify(Justify::Right),
        job.cpus_total.cell().justify(Justify::Right),
        job.tasks.cell().justify(Justify::Right),
        job.cpus_per_task.cell().justify(Justify::Right),
        job.cpus_min_per_node.cell().justify(Justify::Right),
        textwrap_reason(&job.pending_reason).cell(),
        format_tres(&job.tres_per_job).cell(),
        format_tres(&job.tres_per_task).cell(),
        format_tres(&job.tres_per_node).cell(),
    ]
}

fn format_state(state: &JobState) -> String {
    let code = state.to_string();
    match state {
        JobState::Pending => code.yellow().to_string(),
        JobState::Running | JobState::Completing => code.cyan().to_string(),
        JobState::Completed => code.green().to_string(),
        JobState::Failed
        | JobState::Timeout
        | JobState::NodeFail
        | JobState::OutOfMemory
        | JobState::Cancelled => code.red().to_string(),
        _ => code,
    }
}

/// Long pending reasons are split into multiple lines to keep the table readable.
fn textwrap_reason(reason: &str) -> String {
    let options = textwrap::Options::new(TERMINAL_WIDTH / 2)
        .wrap_algorithm(textwrap::WrapAlgorithm::FirstFit);
    textwrap::fill(reason, options)
}

impl Output for CliOutput {
    fn print_pending_jobs(&self, jobs: &[PendingJob]) {
        if jobs.is_empty() {
            log::info!("No pending jobs require additional nodes");
            return;
        }
        self.print_jobs(jobs);
        println!(
            "{} {} ({} jobs)",
            "Required nodes:".bold(),
            total_required_nodes(jobs),
            jobs.len()
        );
    }

    fn print_job_list(&self, jobs: &[PendingJob]) {
        if jobs.is_empty() {
            log::info!("No jobs found");
            return;
        }
        self.print_jobs(jobs);
    }

    fn print_error(&self, error: anyhow::Error) {
        eprintln!("{error:?}");
    }
}
