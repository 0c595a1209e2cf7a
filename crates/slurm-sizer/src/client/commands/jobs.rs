use crate::client::globalsettings::GlobalSettings;
use crate::common::cli::{InputOpts, JobsOpts, PendingOpts};
use crate::common::manager::slurm::PENDING_STATE_FILTER;
use crate::jobs::table::InvalidFieldPolicy;
use crate::pending::{JobSource, SqueueSource, TableFileSource, get_jobs, get_pending_jobs};

fn create_source(
    gsettings: &GlobalSettings,
    input: &InputOpts,
    policy: InvalidFieldPolicy,
    states: Option<String>,
) -> Box<dyn JobSource> {
    match &input.input {
        Some(path) => {
            log::debug!("Reading squeue output from {}", path.display());
            Box::new(TableFileSource::new(path.clone(), policy).with_states(states))
        }
        None => Box::new(SqueueSource::new(gsettings.squeue().clone(), policy).with_states(states)),
    }
}

pub fn command_pending(gsettings: &GlobalSettings, opts: PendingOpts) -> anyhow::Result<()> {
    let config = opts.cluster_config()?;
    log::debug!("Cluster configuration: {config:?}");

    let source = create_source(
        gsettings,
        &opts.input,
        config.invalid_fields,
        Some(PENDING_STATE_FILTER.to_string()),
    );
    let jobs = get_pending_jobs(
        source.as_ref(),
        &config.reconcile_params(),
        &config.job_filter(),
    )?;
    gsettings.printer().print_pending_jobs(&jobs);
    Ok(())
}

pub fn command_jobs(gsettings: &GlobalSettings, opts: JobsOpts) -> anyhow::Result<()> {
    let policy = opts.input.invalid_fields.unwrap_or_default();
    let source = create_source(gsettings, &opts.input, policy, opts.states);
    let jobs = get_jobs(source.as_ref())?;
    gsettings.printer().print_job_list(&jobs);
    Ok(())
}
