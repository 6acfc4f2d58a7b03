#[macro_use]
extern crate structopt;

#[macro_use]
extern crate serde_derive;

#[macro_use]
extern crate failure_derive;

#[macro_use]
extern crate tracing;

extern crate failure;
extern crate rusoto_core;
extern crate rusoto_ssm;
extern crate serde;
extern crate serde_json;

use std::io::{self, Write};
use std::process;

use serde_json::Value;
use structopt::StructOpt;
use tracing_subscriber::EnvFilter;

use args::*;
use confirm::{Confirm, TerminalConfirm};
use errors::SsmError;
use invoke::{invoke, InvokeOptions};
use ssm_ops::{SSMOps, SsmApi};

mod args;
mod confirm;
mod errors;
mod invoke;
mod operations;
mod select;
mod ssm_ops;
mod ssm_types;
#[cfg(test)]
mod testing;

/// AWS SSM Command Line
/// --region, -r => Region to call (env AWS_REGION)
/// --endpoint-url => Custom endpoint, e.g. a local mock
/// --select, -s => '*' whole response, FieldName, or '^InputName'
/// --pass-thru => Deprecated, echo the main input
/// --force, -f => Skip confirmation on mutating operations
/// --quiet, -q => Only errors and command output
/// <operation> [inputs] => One subcommand per SSM API operation, see --help
fn main() {
    let clap_options = Opt::clap().get_matches_safe();

    // Will exit with error code 1 even for VersionDisplayed and HelpDisplayed
    let matches = match clap_options {
        Ok(matches) => matches,
        Err(err) => {
            println!("{}", err.message);
            process::exit(1)
        }
    };

    let options = Opt::from_clap(&matches);
    init_tracing(options.quiet, options.verbose);

    let mut confirm = TerminalConfirm;
    let result = SSMOps::new(&options.region, options.endpoint_url.as_deref())
        .and_then(|ssm| run(&options.cmd, &options.invoke_options(), &ssm, &mut confirm))
        .and_then(|output| output.map(|value| render(&value)).transpose());

    match result {
        Ok(Some(document)) => {
            if let Err(err) = write_document(&mut io::stdout().lock(), &document) {
                eprintln!("unable to write output: {}", err);
                process::exit(1)
            }
        }
        Ok(None) => {}
        Err(err) => {
            debug!(validation = err.is_validation(), "invocation failed");
            eprintln!("{}", err);
            process::exit(1)
        }
    }
}

/// A closed pipe (`| head`) ends output quietly.
fn write_document<W: Write>(out: &mut W, document: &str) -> io::Result<()> {
    match writeln!(out, "{}", document).and_then(|_| out.flush()) {
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

fn init_tracing(quiet: bool, verbose: u8) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(format!("ssm_cmd={}", level)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run(
    cmd: &Command,
    options: &InvokeOptions,
    api: &dyn SsmApi,
    confirm: &mut dyn Confirm,
) -> Result<Option<Value>, SsmError> {
    match cmd {
        Command::AddTagsToResource(op) => invoke(op, options, api, confirm),
        Command::CreateActivation(op) => invoke(op, options, api, confirm),
        Command::CreateAssociation(op) => invoke(op, options, api, confirm),
        Command::CreateDocument(op) => invoke(op, options, api, confirm),
        Command::CreateMaintenanceWindow(op) => invoke(op, options, api, confirm),
        Command::CreateOpsItem(op) => invoke(op, options, api, confirm),
        Command::CreatePatchBaseline(op) => invoke(op, options, api, confirm),
        Command::DeleteParameter(op) => invoke(op, options, api, confirm),
        Command::GetParameters(op) => invoke(op, options, api, confirm),
        Command::PutParameter(op) => invoke(op, options, api, confirm),
        Command::SendCommand(op) => invoke(op, options, api, confirm),
        Command::StartAutomationExecution(op) => invoke(op, options, api, confirm),
        Command::UpdateDocumentDefaultVersion(op) => invoke(op, options, api, confirm),
        Command::UpdateMaintenanceWindowTask(op) => invoke(op, options, api, confirm),
    }
}

/// The selected value as a single JSON document.
fn render(output: &Value) -> Result<String, SsmError> {
    serde_json::to_string(output).map_err(|e| SsmError::Output { message: e.to_string() })
}
