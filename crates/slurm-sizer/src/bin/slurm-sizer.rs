use std::io::IsTerminal;

use clap::{CommandFactory, FromArgMatches};
use cli_table::ColorChoice;

use slurm_sizer::client::commands::jobs::{command_jobs, command_pending};
use slurm_sizer::client::globalsettings::GlobalSettings;
use slurm_sizer::client::output::cli::CliOutput;
use slurm_sizer::client::output::json::JsonOutput;
use slurm_sizer::client::output::outputs::{Output, Outputs};
use slurm_sizer::client::output::quiet::Quiet;
use slurm_sizer::common::cli::{ColorPolicy, CommonOpts, RootOptions, SubCommand};
use slurm_sizer::common::manager::slurm::SqueueCommand;
use slurm_sizer::common::setup::setup_logging;

fn make_global_settings(opts: CommonOpts) -> GlobalSettings {
    let color_policy = match opts.colors {
        ColorPolicy::Always => ColorChoice::AlwaysAnsi,
        ColorPolicy::Auto => {
            if std::io::stdout().is_terminal() {
                ColorChoice::Auto
            } else {
                ColorChoice::Never
            }
        }
        ColorPolicy::Never => ColorChoice::Never,
    };

    // Create Printer
    let printer: Box<dyn Output> = match opts.output_mode {
        Outputs::CLI => {
            // Set colored public for CLI
            match color_policy {
                ColorChoice::Always | ColorChoice::AlwaysAnsi => {
                    colored::control::set_override(true)
                }
                ColorChoice::Never => colored::control::set_override(false),
                _ => {}
            }
            Box::new(CliOutput::new(color_policy))
        }
        Outputs::JSON => Box::<JsonOutput>::default(),
        Outputs::Quiet => Box::<Quiet>::default(),
    };

    GlobalSettings::new(SqueueCommand::new(opts.squeue), printer)
}

fn main() {
    let matches = RootOptions::command().get_matches();
    let top_opts = match RootOptions::from_arg_matches(&matches) {
        Ok(opts) => opts,
        Err(error) => error.exit(),
    };

    setup_logging(top_opts.common.debug);

    let gsettings = make_global_settings(top_opts.common);

    let result = match top_opts.subcmd {
        SubCommand::Pending(opts) => command_pending(&gsettings, opts),
        SubCommand::Jobs(opts) => command_jobs(&gsettings, opts),
    };

    if let Err(e) = result {
        gsettings.printer().print_error(e);
        std::process::exit(1);
    }
}
