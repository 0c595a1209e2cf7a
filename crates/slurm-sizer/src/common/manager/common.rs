use bstr::ByteSlice;
use std::process::{Command, Output};

pub fn create_command(arguments: &[&str]) -> Command {
    let mut command = Command::new(arguments[0]);
    command.args(&arguments[1..]);
    command
}

/// Runs the command and returns its stdout, failing when the command cannot be started,
/// exits with a non-zero code or produces invalid UTF-8.
pub fn run_command(arguments: &[&str]) -> crate::Result<String> {
    let program = arguments[0];
    log::debug!("Running command `{}`", arguments.join(" "));

    let output = create_command(arguments).output()?;
    let output = check_command_output(program, output)?;
    let stdout = output
        .stdout
        .to_str()
        .map_err(|error| crate::Error::CommandError {
            program: program.to_string(),
            message: format!("invalid UTF-8 in output: {error:?}"),
        })?;
    Ok(stdout.to_string())
}

pub fn check_command_output(program: &str, output: Output) -> crate::Result<Output> {
    let status = output.status;
    if !status.success() {
        return Err(crate::Error::CommandError {
            program: program.to_string(),
            message: format!(
                "Exit code: {}\nStderr: {}\nStdout: {}",
                status.code().unwrap_or(-1),
                output.stderr.to_str_lossy().trim(),
                output.stdout.to_str_lossy().trim()
            ),
        });
    }
    Ok(output)
}
